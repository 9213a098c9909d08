//! Two-map shape comparison core.
//!
//! A shape drawn on one map is mirrored, rigidly and at matching scale, onto
//! the other map where it can be moved and rotated. This crate holds the
//! geometry model, the per-viewport render transform, length/area
//! measurement, the shared-link codec and the controller that ties them
//! together. Tile rendering, geocoding and DOM wiring stay with the host.
//!
//! API Policy
//! - Pre-1.0. Types may change when the model or the link format changes;
//!   the link format itself is versioned (see `share::layout`).

pub mod app;
pub mod cfg;
pub mod geo;
pub mod measure;
pub mod shape;
pub mod share;
pub mod state;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for callers driving the controller.
pub mod prelude {
    pub use crate::app::{Command, Controller, DragTarget, Frame, MapFrame, Outcome};
    pub use crate::geo::{LatLng, MapId, Projector, Viewport, WebMercator};
    pub use crate::measure::{Mode, Units};
    pub use crate::shape::Shape;
    pub use crate::state::{AppState, Layer, Settings};
}
