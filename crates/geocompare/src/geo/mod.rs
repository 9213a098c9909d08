//! Geographic primitives and the projector seam.
//!
//! Purpose
//! - Hold the small value types (`LatLng`, `MapId`, `Viewport`, `GeoBounds`)
//!   every other module speaks in.
//! - Define the `Projector` trait the shape model calls, plus the
//!   `WebMercator` implementation used by the controller and the CLI.
//!
//! Code cross-refs: `crate::shape`, `crate::measure`

mod projection;
mod sphere;
mod types;

pub use projection::{zoom_scale, Projector, WebMercator};
pub use sphere::great_circle_distance;
pub use types::{GeoBounds, LatLng, MapId, Viewport};

#[cfg(test)]
mod tests;
