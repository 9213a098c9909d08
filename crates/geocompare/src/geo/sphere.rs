//! Distances on the spherical Earth model.

use super::types::LatLng;
use crate::cfg::EARTH_RADIUS_M;

/// Great-circle distance in meters (haversine form).
pub fn great_circle_distance(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = phi2 - phi1;
    let dlambda = (b.lng - a.lng).to_radians();
    let s_phi = (dphi / 2.0).sin();
    let s_lambda = (dlambda / 2.0).sin();
    let h = s_phi * s_phi + phi1.cos() * phi2.cos() * s_lambda * s_lambda;
    // h can drift past 1 for antipodal inputs
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}
