//! Shape model and render transform.
//!
//! Purpose
//! - Own the canonical geometry of the one shape (pixel offsets at
//!   `REF_ZOOM` around an origin anchor) together with the comparison anchor
//!   and rotation of its mirror on the other map.
//! - Derive, without mutation, the geographic vertices each viewport draws.
//!
//! Invariants
//! - A `Shape` always holds at least one point.
//! - Origin-map rendering ignores `comparison_anchor` and `rotation`.
//! - Point edits never move untouched vertices on either map.
//!
//! Code cross-refs: `Shape`, `Similarity2`, `crate::geo::Projector`

mod model;
mod render;
mod types;

pub use model::{Removal, Shape, ShapeError};
pub use render::rotation_from_handle;
pub use types::{centroid, rotation_matrix, Similarity2};
