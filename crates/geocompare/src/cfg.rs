//! Fixed constants for projection, measurement and input handling.
//!
//! Policy
//! - Values are plain constants so every module reads the same numbers. The
//!   shared-link format depends on `REF_ZOOM`; changing it invalidates links
//!   written by older builds.

/// Zoom level at which shape geometry is stored in pixel space.
pub const REF_ZOOM: f64 = 16.0;

/// Edge length of one map tile in pixels (world width is `TILE_SIZE * 2^zoom`).
pub const TILE_SIZE: f64 = 256.0;

/// Mean Earth radius in meters used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Latitude limit of the spherical Mercator projection, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Radius around the first vertex inside which the planar area approximation
/// stays within 1% of the spherical area.
pub const PLANAR_VALIDITY_RADIUS_M: f64 = 100_000.0;

/// Gap in pixels between the overlay outline and its rotation handle.
pub const ROTATION_HANDLE_MARGIN_PX: f64 = 30.0;

/// Quiet period before a typed place query is sent.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
