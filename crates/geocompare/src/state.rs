//! Application state value: settings, both viewport poses, and the shape.
//!
//! The controller owns one `AppState`; the reducer in `crate::app` is the only
//! code that mutates it, and the share codec reads/writes it as a whole.

use crate::geo::{LatLng, MapId, Viewport};
use crate::measure::{Mode, Units};
use crate::shape::Shape;

/// Base map layer shown under both viewports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Streets,
    Satellite,
    Topographic,
    Dark,
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Layer::Streets,
        Layer::Satellite,
        Layer::Topographic,
        Layer::Dark,
    ];

    /// Two-bit index used in the shared-link flags byte.
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Layer::Streets => 0,
            Layer::Satellite => 1,
            Layer::Topographic => 2,
            Layer::Dark => 3,
        }
    }

    /// Inverse of `index`; only the low two bits are read.
    #[inline]
    pub fn from_index(i: u8) -> Self {
        Self::ALL[(i & 0b11) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Layer::Streets => "streets",
            Layer::Satellite => "satellite",
            Layer::Topographic => "topographic",
            Layer::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }
}

/// Display and measurement settings carried in shared links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub layer: Layer,
    pub mode: Mode,
    pub units: Units,
    pub show_vertex_numbers: bool,
    pub show_bbox: bool,
}

/// Everything a shared link restores.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub settings: Settings,
    pub viewports: [Viewport; 2],
    pub shape: Option<Shape>,
}

impl AppState {
    pub fn new(settings: Settings, viewports: [Viewport; 2]) -> Self {
        Self {
            settings,
            viewports,
            shape: None,
        }
    }

    #[inline]
    pub fn viewport(&self, map: MapId) -> &Viewport {
        &self.viewports[map.index()]
    }

    #[inline]
    pub fn viewport_mut(&mut self, map: MapId) -> &mut Viewport {
        &mut self.viewports[map.index()]
    }
}

impl Default for AppState {
    /// Paris on the left, London on the right, city-scale zoom.
    fn default() -> Self {
        Self::new(
            Settings::default(),
            [
                Viewport::new(LatLng::new(48.8566, 2.3522), 13.0),
                Viewport::new(LatLng::new(51.5074, -0.1278), 13.0),
            ],
        )
    }
}
