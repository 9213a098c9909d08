use super::*;
use crate::cfg::{MAX_LATITUDE, TILE_SIZE};
use nalgebra::vector;
use proptest::prelude::*;

#[test]
fn mercator_origin_and_corners() {
    let m = WebMercator;
    let center = m.project(LatLng::new(0.0, 0.0), 0.0);
    assert!((center - vector![128.0, 128.0]).norm() < 1e-9);
    let nw = m.project(LatLng::new(MAX_LATITUDE, -180.0), 0.0);
    assert!(nw.x.abs() < 1e-9);
    assert!(nw.y.abs() < 1e-6);
    let se = m.project(LatLng::new(-MAX_LATITUDE, 180.0), 2.0);
    assert!((se.x - 4.0 * TILE_SIZE).abs() < 1e-9);
    assert!((se.y - 4.0 * TILE_SIZE).abs() < 1e-5);
}

#[test]
fn mercator_clamps_polar_latitudes() {
    let m = WebMercator;
    let pole = m.project(LatLng::new(90.0, 10.0), 3.0);
    let limit = m.project(LatLng::new(MAX_LATITUDE, 10.0), 3.0);
    assert!(pole.y.is_finite());
    assert!((pole - limit).norm() < 1e-9);
}

#[test]
fn mercator_scales_by_power_of_two() {
    let m = WebMercator;
    let p = LatLng::new(48.8566, 2.3522);
    let a = m.project(p, 10.0);
    let b = m.project(p, 13.5);
    let s = zoom_scale(13.5, 10.0);
    assert!((a * s - b).norm() < 1e-6);
}

#[test]
fn haversine_known_distances() {
    let d = great_circle_distance(LatLng::new(0.0, 0.0), LatLng::new(0.01, 0.0));
    assert!((d - 1111.95).abs() < 0.1, "d = {d}");
    let quarter = great_circle_distance(LatLng::new(0.0, 0.0), LatLng::new(0.0, 90.0));
    let expected = std::f64::consts::FRAC_PI_2 * crate::cfg::EARTH_RADIUS_M;
    assert!((quarter - expected).abs() < 1e-6);
    let antipodal = great_circle_distance(LatLng::new(0.0, 0.0), LatLng::new(0.0, 180.0));
    assert!(antipodal.is_finite());
    assert_eq!(great_circle_distance(LatLng::new(12.0, 34.0), LatLng::new(12.0, 34.0)), 0.0);
}

#[test]
fn bounds_cover_points() {
    assert!(GeoBounds::from_points(&[]).is_none());
    let b = GeoBounds::from_points(&[
        LatLng::new(1.0, 5.0),
        LatLng::new(-2.0, 7.0),
        LatLng::new(0.5, 4.0),
    ])
    .unwrap();
    assert_eq!(b.south_west(), LatLng::new(-2.0, 4.0));
    assert_eq!(b.north_east(), LatLng::new(1.0, 7.0));
    assert_eq!(b.corners()[2], b.north_east());
}

#[test]
fn map_ids_pair_up() {
    assert_eq!(MapId::One.other(), MapId::Two);
    assert_eq!(MapId::Two.other().index(), 0);
    assert_eq!(MapId::from_wire(MapId::Two.wire()), Some(MapId::Two));
    assert_eq!(MapId::from_wire(0), None);
    assert_eq!(MapId::from_wire(3), None);
}

proptest! {
    #[test]
    fn mercator_roundtrip(lat in -85.0f64..85.0, lng in -179.9f64..179.9, zoom in 0.0f64..22.0) {
        let m = WebMercator;
        let back = m.unproject(m.project(LatLng::new(lat, lng), zoom), zoom);
        prop_assert!((back.lat - lat).abs() < 1e-9);
        prop_assert!((back.lng - lng).abs() < 1e-9);
    }
}
