//! The single editable shape and its mutation rules.
//!
//! Model
//! - Geometry is a non-empty list of pixel offsets relative to
//!   `origin_anchor`, measured at `REF_ZOOM`.
//! - The comparison map shows the same offsets recentered on their centroid,
//!   rotated by `rotation` and placed at `comparison_anchor`.
//! - Every point edit moves `comparison_anchor` by the centroid displacement,
//!   rotated into the overlay frame, so untouched vertices keep their place on
//!   the comparison map.
//!
//! Code cross-refs: `super::render` (per-viewport placement), `crate::share`

use std::fmt;

use nalgebra::Vector2;

use super::types::{centroid, rotation_matrix};
use crate::cfg::REF_ZOOM;
use crate::geo::{LatLng, MapId, Projector};

/// Errors returned by shape mutations. The shape is unchanged when one is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeError {
    IndexOutOfRange { index: usize, len: usize },
    NonFiniteCoordinate,
    NonFiniteRotation,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "point index {index} out of range for {len} points")
            }
            Self::NonFiniteCoordinate => write!(f, "coordinate must be finite"),
            Self::NonFiniteRotation => write!(f, "rotation must be finite"),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Result of `Shape::remove_last_point`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// A point was removed; this many remain.
    Removed { remaining: usize },
    /// Only one point was left. The shape is untouched and its owner must drop it.
    LastPoint,
}

/// A polyline/polygon drawn on one map and mirrored on the other.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    origin_map: MapId,
    origin_anchor: LatLng,
    comparison_anchor: LatLng,
    local_points: Vec<Vector2<f64>>,
    rotation: f64,
}

impl Shape {
    /// New one-point shape anchored at the first click.
    pub fn create(anchor: LatLng, origin_map: MapId, comparison_anchor: LatLng) -> Self {
        Self {
            origin_map,
            origin_anchor: anchor,
            comparison_anchor,
            local_points: vec![Vector2::zeros()],
            rotation: 0.0,
        }
    }

    /// Rebuild a shape from stored fields; `None` when `local_points` is empty.
    pub fn from_parts(
        origin_map: MapId,
        origin_anchor: LatLng,
        comparison_anchor: LatLng,
        rotation: f64,
        local_points: Vec<Vector2<f64>>,
    ) -> Option<Self> {
        if local_points.is_empty() {
            return None;
        }
        Some(Self {
            origin_map,
            origin_anchor,
            comparison_anchor,
            local_points,
            rotation,
        })
    }

    #[inline]
    pub fn origin_map(&self) -> MapId {
        self.origin_map
    }
    #[inline]
    pub fn comparison_map(&self) -> MapId {
        self.origin_map.other()
    }
    #[inline]
    pub fn origin_anchor(&self) -> LatLng {
        self.origin_anchor
    }
    #[inline]
    pub fn comparison_anchor(&self) -> LatLng {
        self.comparison_anchor
    }
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
    #[inline]
    pub fn local_points(&self) -> &[Vector2<f64>] {
        &self.local_points
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.local_points.len()
    }
    /// Never true for a live shape.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.local_points.is_empty()
    }
    #[inline]
    pub fn local_centroid(&self) -> Vector2<f64> {
        centroid(&self.local_points)
    }

    /// Insert a vertex clicked on `map` at `at` (appending when `None` or past
    /// the end). Returns the index the vertex landed at.
    pub fn add_point<P: Projector>(
        &mut self,
        proj: &P,
        map: MapId,
        geo: LatLng,
        at: Option<usize>,
    ) -> Result<usize, ShapeError> {
        if !geo.is_finite() {
            return Err(ShapeError::NonFiniteCoordinate);
        }
        let local = self.local_from_geo(proj, map, geo);
        let before = self.local_centroid();
        let index = at
            .unwrap_or(self.local_points.len())
            .min(self.local_points.len());
        self.local_points.insert(index, local);
        self.drift_comparison_anchor(proj, before);
        Ok(index)
    }

    /// Move vertex `index` to a position picked on `map`.
    pub fn update_point<P: Projector>(
        &mut self,
        proj: &P,
        map: MapId,
        index: usize,
        geo: LatLng,
    ) -> Result<(), ShapeError> {
        let len = self.local_points.len();
        if index >= len {
            return Err(ShapeError::IndexOutOfRange { index, len });
        }
        if !geo.is_finite() {
            return Err(ShapeError::NonFiniteCoordinate);
        }
        let local = self.local_from_geo(proj, map, geo);
        let before = self.local_centroid();
        self.local_points[index] = local;
        self.drift_comparison_anchor(proj, before);
        Ok(())
    }

    /// Drop the most recent vertex.
    pub fn remove_last_point<P: Projector>(&mut self, proj: &P) -> Removal {
        if self.local_points.len() <= 1 {
            return Removal::LastPoint;
        }
        let before = self.local_centroid();
        self.local_points.pop();
        self.drift_comparison_anchor(proj, before);
        Removal::Removed {
            remaining: self.local_points.len(),
        }
    }

    pub fn set_overlay_position(&mut self, geo: LatLng) -> Result<(), ShapeError> {
        if !geo.is_finite() {
            return Err(ShapeError::NonFiniteCoordinate);
        }
        self.comparison_anchor = geo;
        Ok(())
    }

    pub fn set_overlay_rotation(&mut self, radians: f64) -> Result<(), ShapeError> {
        if !radians.is_finite() {
            return Err(ShapeError::NonFiniteRotation);
        }
        self.rotation = radians;
        Ok(())
    }

    /// Local offset (pixels at `REF_ZOOM`) of a coordinate picked on `map`.
    ///
    /// On the comparison map the pointer is pulled back through the overlay
    /// placement, so the vertex lands under the pointer once the anchor drifts.
    pub fn local_from_geo<P: Projector>(&self, proj: &P, map: MapId, geo: LatLng) -> Vector2<f64> {
        let p = proj.project(geo, REF_ZOOM);
        if map == self.origin_map {
            p - proj.project(self.origin_anchor, REF_ZOOM)
        } else {
            let rel = p - proj.project(self.comparison_anchor, REF_ZOOM);
            rotation_matrix(-self.rotation) * rel + self.local_centroid()
        }
    }

    fn drift_comparison_anchor<P: Projector>(&mut self, proj: &P, before: Vector2<f64>) {
        let delta = self.local_centroid() - before;
        if delta == Vector2::zeros() {
            return;
        }
        let shift = rotation_matrix(self.rotation) * delta;
        let anchor = proj.project(self.comparison_anchor, REF_ZOOM) + shift;
        self.comparison_anchor = proj.unproject(anchor, REF_ZOOM);
    }
}
