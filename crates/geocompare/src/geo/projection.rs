//! Geographic ↔ pixel projection.
//!
//! Model
//! - Pixel space at zoom `z` is the spherical-Mercator plane scaled to a world
//!   of `TILE_SIZE · 2^z` pixels, origin at the north-west corner, y down.
//! - Because the scale is a pure power of two, `project(p, z1)` equals
//!   `project(p, z0) · 2^(z1 − z0)` up to rounding; the shape model relies on this.
//!
//! Code cross-refs: `crate::shape::Shape`, `crate::shape::render`

use nalgebra::Vector2;

use super::types::LatLng;
use crate::cfg::{MAX_LATITUDE, TILE_SIZE};

/// Converts between geographic coordinates and pixel coordinates at an
/// arbitrary zoom level.
pub trait Projector {
    fn project(&self, geo: LatLng, zoom: f64) -> Vector2<f64>;
    fn unproject(&self, px: Vector2<f64>, zoom: f64) -> LatLng;
}

impl<P: Projector + ?Sized> Projector for &P {
    #[inline]
    fn project(&self, geo: LatLng, zoom: f64) -> Vector2<f64> {
        (**self).project(geo, zoom)
    }
    #[inline]
    fn unproject(&self, px: Vector2<f64>, zoom: f64) -> LatLng {
        (**self).unproject(px, zoom)
    }
}

/// Pixel scale factor between zoom `to` and zoom `from`.
#[inline]
pub fn zoom_scale(to: f64, from: f64) -> f64 {
    (to - from).exp2()
}

/// Standard slippy-map spherical Mercator (EPSG:3857 pixel space).
#[derive(Clone, Copy, Debug, Default)]
pub struct WebMercator;

impl WebMercator {
    #[inline]
    fn world_size(zoom: f64) -> f64 {
        TILE_SIZE * zoom.exp2()
    }
}

impl Projector for WebMercator {
    fn project(&self, geo: LatLng, zoom: f64) -> Vector2<f64> {
        let size = Self::world_size(zoom);
        let lat = geo.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = geo.lng / 360.0 + 0.5;
        let y = 0.5 - (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln() / std::f64::consts::TAU;
        Vector2::new(x * size, y * size)
    }

    fn unproject(&self, px: Vector2<f64>, zoom: f64) -> LatLng {
        let size = Self::world_size(zoom);
        let x = px.x / size;
        let y = px.y / size;
        let lng = (x - 0.5) * 360.0;
        let lat = 2.0 * ((0.5 - y) * std::f64::consts::TAU).exp().atan() - std::f64::consts::FRAC_PI_2;
        LatLng::new(lat.to_degrees(), lng)
    }
}
