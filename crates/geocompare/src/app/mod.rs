//! Application controller: commands, reducer, frame scheduling and search.
//!
//! Purpose
//! - Turn UI gestures into discrete `Command` values applied by one reducer
//!   (`apply`) to an owned `AppState`.
//! - Coalesce any number of mutations into at most one `Frame` per tick.
//! - Keep the dragged element's on-screen position authoritative while
//!   everything else is recomputed from the model.
//!
//! Model
//! - Single-threaded. Every entry point runs to completion synchronously.
//! - Timers and the geocoder belong to the host; this module only keeps the
//!   clock-driven state (`Debouncer`) and the token bookkeeping.
//!
//! Code cross-refs: `Controller`, `apply`, `render_frame`, `crate::share`

mod command;
mod controller;
mod frame;
mod schedule;
mod search;

pub use command::{apply, command_for_key, Command, DragTarget, Outcome};
pub use controller::{Controller, Dispatch};
pub use frame::{render_frame, Frame, MapFrame, VertexHandle};
pub use schedule::FrameScheduler;
pub use search::{
    Debouncer, GeocodeError, Geocoder, Place, QueryToken, SearchBox, SearchStatus, SearchTracker,
};
