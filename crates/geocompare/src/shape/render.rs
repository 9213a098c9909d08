//! Per-viewport rendering of the shape (read-only).
//!
//! Model
//! - Origin map: `px = s · l + project(origin_anchor, z)`.
//! - Comparison map: `px = s · R(θ) · (l − c) + project(comparison_anchor, z)`,
//!   with `c` the local centroid.
//! - `s = 2^(z − REF_ZOOM)` for the viewport's live zoom `z`, so both maps show
//!   one rigid shape whose pixel size follows each map's own zoom.
//!
//! Code cross-refs: `super::model::Shape`, `crate::app::frame`

use nalgebra::Vector2;

use super::model::Shape;
use super::types::{rotation_matrix, Similarity2};
use crate::cfg::{REF_ZOOM, ROTATION_HANDLE_MARGIN_PX};
use crate::geo::{zoom_scale, LatLng, MapId, Projector, Viewport};

impl Shape {
    /// Map from local offsets to pixels at `viewport.zoom` on `map`.
    pub fn placement<P: Projector>(&self, proj: &P, viewport: &Viewport, map: MapId) -> Similarity2 {
        let s = zoom_scale(viewport.zoom, REF_ZOOM);
        if map == self.origin_map() {
            let anchor = proj.project(self.origin_anchor(), viewport.zoom);
            Similarity2::new(s, 0.0, anchor)
        } else {
            let anchor = proj.project(self.comparison_anchor(), viewport.zoom);
            let m = rotation_matrix(self.rotation()) * s;
            Similarity2 {
                m,
                t: anchor - m * self.local_centroid(),
            }
        }
    }

    /// Geographic vertices to draw on `map` at the viewport's live zoom.
    pub fn render_points<P: Projector>(
        &self,
        proj: &P,
        viewport: &Viewport,
        map: MapId,
    ) -> Vec<LatLng> {
        let place = self.placement(proj, viewport, map);
        self.local_points()
            .iter()
            .map(|l| proj.unproject(place.apply(*l), viewport.zoom))
            .collect()
    }

    /// Position of the rotation handle on the comparison map: straight "up" in
    /// the overlay frame, just outside the farthest vertex.
    pub fn rotation_handle<P: Projector>(&self, proj: &P, viewport: &Viewport) -> LatLng {
        let s = zoom_scale(viewport.zoom, REF_ZOOM);
        let c = self.local_centroid();
        let reach = self
            .local_points()
            .iter()
            .map(|l| (l - c).norm())
            .fold(0.0, f64::max);
        let radius = reach * s + ROTATION_HANDLE_MARGIN_PX;
        let anchor = proj.project(self.comparison_anchor(), viewport.zoom);
        let offset = rotation_matrix(self.rotation()) * Vector2::new(0.0, -radius);
        proj.unproject(anchor + offset, viewport.zoom)
    }

    /// Midpoint handles on the origin map; each entry carries the insert
    /// index a click on it should use. `closed` adds the last-to-first segment.
    pub fn insertion_handles<P: Projector>(
        &self,
        proj: &P,
        viewport: &Viewport,
        closed: bool,
    ) -> Vec<(usize, LatLng)> {
        let n = self.len();
        if n < 2 {
            return Vec::new();
        }
        let place = self.placement(proj, viewport, self.origin_map());
        let px: Vec<Vector2<f64>> = self.local_points().iter().map(|l| place.apply(*l)).collect();
        let mut out = Vec::with_capacity(n);
        for k in 0..n - 1 {
            let mid = (px[k] + px[k + 1]) / 2.0;
            out.push((k + 1, proj.unproject(mid, viewport.zoom)));
        }
        if closed && n >= 3 {
            let mid = (px[n - 1] + px[0]) / 2.0;
            out.push((n, proj.unproject(mid, viewport.zoom)));
        }
        out
    }
}

/// Overlay rotation implied by dragging the rotation handle to `pointer`
/// while the overlay sits at `anchor`. `None` when the pointer is on the anchor.
pub fn rotation_from_handle<P: Projector>(
    proj: &P,
    viewport: &Viewport,
    anchor: LatLng,
    pointer: LatLng,
) -> Option<f64> {
    let d = proj.project(pointer, viewport.zoom) - proj.project(anchor, viewport.zoom);
    if d.norm() < 1e-9 {
        return None;
    }
    Some(d.x.atan2(-d.y))
}
