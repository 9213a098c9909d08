use super::layout::{encoded_len, pack_flags, unpack_flags, FIXED_LEN};
use super::*;
use crate::geo::{LatLng, MapId, Viewport};
use crate::measure::{Mode, Units};
use crate::shape::Shape;
use crate::state::{AppState, Layer, Settings};
use nalgebra::{vector, Vector2};
use proptest::prelude::*;

fn sample_state() -> AppState {
    let settings = Settings {
        layer: Layer::Topographic,
        mode: Mode::Area,
        units: Units::Imperial,
        show_vertex_numbers: true,
        show_bbox: false,
    };
    let mut state = AppState::new(
        settings,
        [
            Viewport::new(LatLng::new(48.8566, 2.3522), 13.0),
            Viewport::new(LatLng::new(40.7128, -74.0060), 11.25),
        ],
    );
    state.shape = Shape::from_parts(
        MapId::Two,
        LatLng::new(40.7, -74.0),
        LatLng::new(48.85, 2.35),
        0.75,
        vec![vector![0.0, 0.0], vector![120.5, -40.25], vector![-3.0, 88.0]],
    );
    state
}

fn assert_close(a: f64, b: f64) {
    let tol = 1e-5 * a.abs().max(1.0);
    assert!((a - b).abs() <= tol, "{a} vs {b}");
}

#[test]
fn empty_state_layout() {
    let state = AppState::default();
    let bytes = encode_bytes(&state).unwrap();
    assert_eq!(bytes.len(), FIXED_LEN);
    assert_eq!(bytes.len(), 31);
    assert_eq!(bytes[0], 1);
    assert_eq!(bytes[1], 0);
    assert!(bytes[2..10].iter().all(|b| *b == 0));
    // zoom 13 → 1300 = 0x0514, big-endian, after the first lat/lng pair
    assert_eq!(&bytes[18..20], &[0x05, 0x14]);
    assert_eq!(&bytes[10..14], &(48.8566f32).to_be_bytes());
    assert_eq!(bytes[30], 0);
}

#[test]
fn shape_layout_is_sequential() {
    let state = sample_state();
    let bytes = encode_bytes(&state).unwrap();
    assert_eq!(bytes.len(), 54 + 3 * 8);
    assert_eq!(bytes.len(), encoded_len(Some(3)));
    assert_eq!(bytes[1], 0b0001_1110);
    assert_eq!(bytes[30], 1);
    assert_eq!(bytes[31], 2);
    assert_eq!(&bytes[32..36], &(40.7f32).to_be_bytes());
    assert_eq!(&bytes[48..52], &(0.75f32).to_be_bytes());
    assert_eq!(&bytes[52..54], &[0, 3]);
    assert_eq!(&bytes[62..66], &(120.5f32).to_be_bytes());
}

#[test]
fn roundtrip_sample() {
    let state = sample_state();
    let link = encode(&state).unwrap();
    let back = decode(&link).unwrap();
    assert_eq!(back.settings, state.settings);
    for (a, b) in state.viewports.iter().zip(&back.viewports) {
        assert_close(a.center.lat, b.center.lat);
        assert_close(a.center.lng, b.center.lng);
        assert_eq!(a.zoom, b.zoom);
    }
    let (s, t) = (state.shape.unwrap(), back.shape.unwrap());
    assert_eq!(s.origin_map(), t.origin_map());
    assert_eq!(s.len(), t.len());
    assert_close(s.rotation(), t.rotation());
    for (p, q) in s.local_points().iter().zip(t.local_points()) {
        assert_close(p.x, q.x);
        assert_close(p.y, q.y);
    }
}

#[test]
fn every_flag_combination_survives() {
    for layer in Layer::ALL {
        for mode in [Mode::Line, Mode::Area] {
            for units in [Units::Metric, Units::Imperial] {
                for bits in 0..4u8 {
                    let s = Settings {
                        layer,
                        mode,
                        units,
                        show_vertex_numbers: bits & 1 != 0,
                        show_bbox: bits & 2 != 0,
                    };
                    assert_eq!(unpack_flags(pack_flags(&s)), s);
                    let state = AppState::new(s, AppState::default().viewports);
                    assert_eq!(decode(&encode(&state).unwrap()).unwrap().settings, s);
                }
            }
        }
    }
}

#[test]
fn link_uses_url_alphabet_without_padding() {
    let mut state = sample_state();
    state.shape = Shape::from_parts(
        MapId::One,
        LatLng::new(-1.0e-3, -179.99),
        LatLng::new(-89.0, 179.99),
        -3.1,
        (0..40)
            .map(|i| Vector2::new(-1.0e30 - i as f64, -2.5e-30))
            .collect(),
    );
    let link = encode(&state).unwrap();
    assert!(!link.contains('+') && !link.contains('/') && !link.contains('='));
    let padded = {
        let mut s = link.clone();
        while s.len() % 4 != 0 {
            s.push('=');
        }
        s
    };
    assert_eq!(decode(&padded).unwrap().shape.unwrap().len(), 40);
}

#[test]
fn zoom_rounds_to_hundredths() {
    let mut state = AppState::default();
    state.viewports[0].zoom = 13.456;
    state.viewports[1].zoom = -2.0;
    let back = decode(&encode(&state).unwrap()).unwrap();
    assert_eq!(back.viewports[0].zoom, 13.46);
    assert_eq!(back.viewports[1].zoom, 0.0);
}

#[test]
fn reserved_bits_and_bytes_are_ignored() {
    let mut bytes = encode_bytes(&sample_state()).unwrap();
    bytes[1] |= 0b1100_0000;
    bytes[5] = 0xAB;
    bytes.extend_from_slice(&[9, 9, 9]);
    let back = decode_bytes(&bytes).unwrap();
    assert_eq!(back.settings, sample_state().settings);
    assert_eq!(back.shape.unwrap().len(), 3);
}

#[test]
fn malformed_payloads_are_rejected() {
    let good = encode_bytes(&sample_state()).unwrap();

    assert!(matches!(
        decode("not*base64!"),
        Err(DecodeError::InvalidBase64 { .. })
    ));
    assert!(matches!(
        decode(""),
        Err(DecodeError::Truncated { offset: 0, .. })
    ));
    assert!(matches!(
        decode_bytes(&good[..good.len() - 1]),
        Err(DecodeError::Truncated { .. })
    ));
    assert!(matches!(
        decode_bytes(&good[..20]),
        Err(DecodeError::Truncated { offset: 20, .. })
    ));

    let mut v2 = good.clone();
    v2[0] = 2;
    assert_eq!(
        decode_bytes(&v2),
        Err(DecodeError::UnsupportedVersion { version: 2 })
    );

    let mut bad_flag = good.clone();
    bad_flag[30] = 7;
    assert_eq!(
        decode_bytes(&bad_flag),
        Err(DecodeError::InvalidShapeFlag { value: 7 })
    );

    let mut bad_map = good.clone();
    bad_map[31] = 3;
    assert_eq!(
        decode_bytes(&bad_map),
        Err(DecodeError::InvalidOriginMap { value: 3 })
    );

    let mut empty = good[..54].to_vec();
    empty[52] = 0;
    empty[53] = 0;
    assert_eq!(decode_bytes(&empty), Err(DecodeError::EmptyShape));

    let mut nan = good.clone();
    nan[48..52].copy_from_slice(&f32::NAN.to_be_bytes());
    assert_eq!(
        decode_bytes(&nan),
        Err(DecodeError::NonFinite { field: "rotation" })
    );
}

#[test]
fn encode_failures_are_explicit() {
    let mut state = AppState::default();
    state.shape = Shape::from_parts(
        MapId::One,
        LatLng::new(0.0, 0.0),
        LatLng::new(1.0, 1.0),
        0.0,
        vec![Vector2::zeros(); u16::MAX as usize + 1],
    );
    assert_eq!(
        encode(&state),
        Err(EncodeError::TooManyPoints {
            count: u16::MAX as usize + 1
        })
    );

    let mut huge = sample_state();
    huge.shape = Shape::from_parts(
        MapId::One,
        LatLng::new(0.0, 0.0),
        LatLng::new(1.0, 1.0),
        0.0,
        vec![vector![1.0e300, 0.0]],
    );
    assert_eq!(
        encode_bytes(&huge),
        Err(EncodeError::NonFinite { field: "point x" })
    );

    let mut bad_zoom = AppState::default();
    bad_zoom.viewports[1].zoom = f64::NAN;
    assert!(matches!(encode(&bad_zoom), Err(EncodeError::NonFinite { .. })));
}

fn arb_settings() -> impl Strategy<Value = Settings> {
    (0u8..4, any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(layer, area, imperial, numbers, bbox)| Settings {
            layer: Layer::from_index(layer),
            mode: if area { Mode::Area } else { Mode::Line },
            units: if imperial { Units::Imperial } else { Units::Metric },
            show_vertex_numbers: numbers,
            show_bbox: bbox,
        },
    )
}

fn arb_viewport() -> impl Strategy<Value = Viewport> {
    (-85.0f64..85.0, -180.0f64..180.0, 0u16..2200)
        .prop_map(|(lat, lng, z)| Viewport::new(LatLng::new(lat, lng), f64::from(z) / 100.0))
}

fn arb_shape() -> impl Strategy<Value = Option<Shape>> {
    prop::option::of(
        (
            any::<bool>(),
            (-85.0f64..85.0, -180.0f64..180.0),
            (-85.0f64..85.0, -180.0f64..180.0),
            -10.0f64..10.0,
            prop::collection::vec((-1.0e5f64..1.0e5, -1.0e5f64..1.0e5), 1..40),
        )
            .prop_map(|(two, o, c, rot, pts)| {
                Shape::from_parts(
                    if two { MapId::Two } else { MapId::One },
                    LatLng::new(o.0, o.1),
                    LatLng::new(c.0, c.1),
                    rot,
                    pts.into_iter().map(|(x, y)| Vector2::new(x, y)).collect(),
                )
            }),
    )
    .prop_map(Option::flatten)
}

proptest! {
    #[test]
    fn roundtrip_preserves_state(
        settings in arb_settings(),
        v1 in arb_viewport(),
        v2 in arb_viewport(),
        shape in arb_shape(),
    ) {
        let state = AppState { settings, viewports: [v1, v2], shape };
        let back = decode(&encode(&state).unwrap()).unwrap();
        prop_assert_eq!(back.settings, state.settings);
        for (a, b) in state.viewports.iter().zip(&back.viewports) {
            prop_assert!((a.center.lat - b.center.lat).abs() <= 1e-5 * a.center.lat.abs().max(1.0));
            prop_assert!((a.center.lng - b.center.lng).abs() <= 1e-5 * a.center.lng.abs().max(1.0));
            prop_assert!((a.zoom - b.zoom).abs() < 1e-9);
        }
        prop_assert_eq!(state.shape.is_some(), back.shape.is_some());
        if let (Some(s), Some(t)) = (&state.shape, &back.shape) {
            prop_assert_eq!(s.origin_map(), t.origin_map());
            prop_assert_eq!(s.len(), t.len());
            prop_assert!((s.rotation() - t.rotation()).abs() <= 1e-5 * s.rotation().abs().max(1.0));
            for (p, q) in s.local_points().iter().zip(t.local_points()) {
                prop_assert!((p - q).norm() <= 1e-5 * p.norm().max(1.0));
            }
        }
    }

    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..120)) {
        let _ = decode_bytes(&bytes);
    }
}
