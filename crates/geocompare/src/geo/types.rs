//! Geographic value types shared by every layer.
//!
//! - `LatLng`: a WGS84 coordinate in degrees.
//! - `MapId`: which of the two viewports a value belongs to.
//! - `Viewport`: the pose (center + zoom) of one map.
//! - `GeoBounds`: axis-aligned lat/lng box around a point sequence.

/// Geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// One of the two side-by-side maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapId {
    One,
    Two,
}

impl MapId {
    pub const ALL: [MapId; 2] = [MapId::One, MapId::Two];

    /// The opposite map.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            MapId::One => MapId::Two,
            MapId::Two => MapId::One,
        }
    }

    /// Zero-based slot, for indexing `[T; 2]` arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            MapId::One => 0,
            MapId::Two => 1,
        }
    }

    /// One-based identifier as written into shared links.
    #[inline]
    pub fn wire(self) -> u8 {
        match self {
            MapId::One => 1,
            MapId::Two => 2,
        }
    }

    pub fn from_wire(v: u8) -> Option<Self> {
        match v {
            1 => Some(MapId::One),
            2 => Some(MapId::Two),
            _ => None,
        }
    }
}

/// Pose of one map: center coordinate and fractional zoom level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

impl Viewport {
    #[inline]
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }

    #[inline]
    pub fn center(&self) -> LatLng {
        self.center
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = zoom;
    }
}

/// Lat/lng box (south-west to north-east corner).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    /// Smallest box containing every point; `None` for an empty slice.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut b = GeoBounds {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        for p in rest {
            b.south = b.south.min(p.lat);
            b.north = b.north.max(p.lat);
            b.west = b.west.min(p.lng);
            b.east = b.east.max(p.lng);
        }
        Some(b)
    }

    #[inline]
    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.south, self.west)
    }

    #[inline]
    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.north, self.east)
    }

    /// Corners in drawing order, starting south-west and going counterclockwise.
    pub fn corners(&self) -> [LatLng; 4] {
        [
            LatLng::new(self.south, self.west),
            LatLng::new(self.south, self.east),
            LatLng::new(self.north, self.east),
            LatLng::new(self.north, self.west),
        ]
    }
}
