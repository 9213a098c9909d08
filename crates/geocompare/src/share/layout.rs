//! Shared-link record layout (version 1).
//!
//! All multi-byte fields are big-endian and packed back to back:
//!
//! ```text
//! u8  version            (= 1)
//! u8  flags              bits0-1 layer, bit2 area, bit3 imperial,
//!                        bit4 vertex numbers, bit5 bbox, bits6-7 reserved
//! [u8; 8] reserved       zero on write, skipped on read
//! f32 lat, f32 lng, u16 zoom×100      viewport 1
//! f32 lat, f32 lng, u16 zoom×100      viewport 2
//! u8  has_shape          (0 | 1)
//! -- only when has_shape == 1 --
//! u8  origin map         (1 | 2)
//! f32 lat, f32 lng       origin anchor
//! f32 lat, f32 lng       comparison anchor
//! f32 rotation           radians
//! u16 count
//! count × (f32 x, f32 y) local points
//! ```

use crate::measure::{Mode, Units};
use crate::state::{Layer, Settings};

pub const VERSION: u8 = 1;
pub const RESERVED_LEN: usize = 8;

/// Header + both viewports + has_shape byte.
pub const FIXED_LEN: usize = 1 + 1 + RESERVED_LEN + 2 * VIEWPORT_LEN + 1;
pub const VIEWPORT_LEN: usize = 4 + 4 + 2;
/// Shape block before the point list.
pub const SHAPE_HEADER_LEN: usize = 1 + 8 + 8 + 4 + 2;
pub const POINT_LEN: usize = 8;

const LAYER_MASK: u8 = 0b0000_0011;
const MODE_AREA: u8 = 1 << 2;
const UNITS_IMPERIAL: u8 = 1 << 3;
const VERTEX_NUMBERS: u8 = 1 << 4;
const BBOX: u8 = 1 << 5;

pub fn pack_flags(s: &Settings) -> u8 {
    let mut flags = s.layer.index() & LAYER_MASK;
    if s.mode == Mode::Area {
        flags |= MODE_AREA;
    }
    if s.units == Units::Imperial {
        flags |= UNITS_IMPERIAL;
    }
    if s.show_vertex_numbers {
        flags |= VERTEX_NUMBERS;
    }
    if s.show_bbox {
        flags |= BBOX;
    }
    flags
}

/// Reserved bits 6-7 are ignored.
pub fn unpack_flags(flags: u8) -> Settings {
    Settings {
        layer: Layer::from_index(flags & LAYER_MASK),
        mode: if flags & MODE_AREA != 0 {
            Mode::Area
        } else {
            Mode::Line
        },
        units: if flags & UNITS_IMPERIAL != 0 {
            Units::Imperial
        } else {
            Units::Metric
        },
        show_vertex_numbers: flags & VERTEX_NUMBERS != 0,
        show_bbox: flags & BBOX != 0,
    }
}

/// Encoded size in bytes for a state with `points` shape vertices (`None`: no shape).
pub fn encoded_len(points: Option<usize>) -> usize {
    match points {
        None => FIXED_LEN,
        Some(n) => FIXED_LEN + SHAPE_HEADER_LEN + n * POINT_LEN,
    }
}
