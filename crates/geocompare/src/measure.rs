//! Length/area of a rendered vertex list and its display text.
//!
//! Model
//! - `Line`: sum of great-circle distances between consecutive vertices.
//! - `Area`: vertices are laid out on a local plane around the first vertex
//!   (x = signed distance to its meridian, y = signed distance to its
//!   parallel) and the shoelace formula is applied. This is a planar
//!   approximation; `is_planar_valid` reports whether the shape is small
//!   enough (`PLANAR_VALIDITY_RADIUS_M`) for it to stay within 1%.
//! - Degenerate input (fewer than two vertices, repeated or collinear
//!   vertices) measures exactly zero.
//!
//! Code cross-refs: `crate::geo::great_circle_distance`, `crate::app::frame`

use crate::cfg::PLANAR_VALIDITY_RADIUS_M;
use crate::geo::{great_circle_distance, LatLng};

const YARDS_PER_METER: f64 = 1.09361;
const MILES_PER_METER: f64 = 0.000621371;
const SQ_YARDS_PER_SQ_METER: f64 = 1.19599;
const SQ_MILES_PER_SQ_METER: f64 = 3.861e-7;
const YARDS_PER_MILE: f64 = 1760.0;
const SQ_YARDS_PER_SQ_MILE: f64 = 3_097_600.0;

/// What the shape measures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Line,
    Area,
}

impl Mode {
    /// Area shapes are drawn as closed polygons.
    #[inline]
    pub fn is_closed(self) -> bool {
        matches!(self, Mode::Area)
    }
}

/// Unit system for display text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

/// Measured value in meters (`Line`) or square meters (`Area`).
pub fn value(mode: Mode, points: &[LatLng]) -> f64 {
    match mode {
        Mode::Line => path_length(points),
        Mode::Area => planar_area(points),
    }
}

/// Total great-circle length of the polyline.
pub fn path_length(points: &[LatLng]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points
        .windows(2)
        .map(|w| great_circle_distance(w[0], w[1]))
        .sum()
}

/// Local-plane shoelace area of the polygon, in square meters.
pub fn planar_area(points: &[LatLng]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let origin = points[0];
    let plane: Vec<(f64, f64)> = points.iter().map(|p| to_local_plane(origin, *p)).collect();
    let n = plane.len();
    let mut twice = 0.0;
    for i in 0..n {
        let (x0, y0) = plane[i];
        let (x1, y1) = plane[(i + 1) % n];
        twice += x0 * y1 - x1 * y0;
    }
    (twice / 2.0).abs()
}

fn to_local_plane(origin: LatLng, p: LatLng) -> (f64, f64) {
    let x = great_circle_distance(LatLng::new(p.lat, origin.lng), p);
    let y = great_circle_distance(LatLng::new(origin.lat, p.lng), p);
    // signed longitude delta, wrapped into [-180, 180)
    let dlng = (p.lng - origin.lng + 180.0).rem_euclid(360.0) - 180.0;
    let sx = if dlng < 0.0 { -1.0 } else { 1.0 };
    let sy = if p.lat < origin.lat { -1.0 } else { 1.0 };
    (sx * x, sy * y)
}

/// True when every vertex lies within `PLANAR_VALIDITY_RADIUS_M` of the first.
pub fn is_planar_valid(points: &[LatLng]) -> bool {
    match points.split_first() {
        None => true,
        Some((first, rest)) => rest
            .iter()
            .all(|p| great_circle_distance(*first, *p) <= PLANAR_VALIDITY_RADIUS_M),
    }
}

/// Display text for a measured value. Zero (or a non-finite value) reads `---`.
pub fn format(value: f64, mode: Mode, units: Units) -> String {
    if value == 0.0 || !value.is_finite() {
        return "---".to_string();
    }
    match (units, mode) {
        (Units::Metric, Mode::Line) => {
            if value < 1000.0 {
                format!("{value:.0} m")
            } else {
                format!("{:.2} km", value / 1000.0)
            }
        }
        (Units::Metric, Mode::Area) => {
            if value < 1_000_000.0 {
                format!("{value:.0} m²")
            } else {
                format!("{:.2} km²", value / 1_000_000.0)
            }
        }
        (Units::Imperial, Mode::Line) => {
            let yards = value * YARDS_PER_METER;
            if yards < YARDS_PER_MILE {
                format!("{yards:.0} yd")
            } else {
                format!("{:.2} mi", value * MILES_PER_METER)
            }
        }
        (Units::Imperial, Mode::Area) => {
            let sq_yards = value * SQ_YARDS_PER_SQ_METER;
            if sq_yards < SQ_YARDS_PER_SQ_MILE {
                format!("{sq_yards:.0} yd²")
            } else {
                format!("{:.2} mi²", value * SQ_MILES_PER_SQ_METER)
            }
        }
    }
}

/// Relative change of `comparison` against `origin`, in percent.
/// `None` when the origin measures zero.
pub fn percent_difference(origin: f64, comparison: f64) -> Option<f64> {
    if origin == 0.0 || !origin.is_finite() || !comparison.is_finite() {
        return None;
    }
    Some((comparison - origin) / origin * 100.0)
}

/// Signed one-decimal percentage, `---` when undefined.
pub fn format_percent(diff: Option<f64>) -> String {
    match diff {
        Some(p) => format!("{p:+.1}%"),
        None => "---".to_string(),
    }
}
