//! Byte-level encode/decode of `AppState` plus the base64url wrapper.

use std::fmt;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use nalgebra::Vector2;

use super::layout::{self, RESERVED_LEN, VERSION};
use crate::geo::{LatLng, MapId, Viewport};
use crate::shape::Shape;
use crate::state::AppState;

/// RFC 4648 §5 alphabet; writes no padding, accepts it on read.
const LINK_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Clone, Debug, PartialEq)]
pub enum EncodeError {
    TooManyPoints { count: usize },
    NonFinite { field: &'static str },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyPoints { count } => {
                write!(f, "shape has {count} points, at most {} fit in a link", u16::MAX)
            }
            Self::NonFinite { field } => write!(f, "{field} is not a finite number"),
        }
    }
}

impl std::error::Error for EncodeError {}

#[derive(Clone, Debug, PartialEq)]
pub enum DecodeError {
    InvalidBase64 { reason: String },
    Truncated { offset: usize, needed: usize, len: usize },
    UnsupportedVersion { version: u8 },
    InvalidShapeFlag { value: u8 },
    InvalidOriginMap { value: u8 },
    EmptyShape,
    NonFinite { field: &'static str },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBase64 { reason } => write!(f, "invalid base64url payload: {reason}"),
            Self::Truncated {
                offset,
                needed,
                len,
            } => write!(
                f,
                "truncated payload: need {needed} bytes at offset {offset}, have {len}"
            ),
            Self::UnsupportedVersion { version } => {
                write!(f, "unsupported link version {version} (expected {VERSION})")
            }
            Self::InvalidShapeFlag { value } => write!(f, "invalid has-shape byte {value}"),
            Self::InvalidOriginMap { value } => write!(f, "invalid origin map {value}"),
            Self::EmptyShape => write!(f, "shape without points"),
            Self::NonFinite { field } => write!(f, "{field} is not a finite number"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Encode the full state into a base64url link token.
pub fn encode(state: &AppState) -> Result<String, EncodeError> {
    let bytes = encode_bytes(state)?;
    Ok(LINK_ENGINE.encode(bytes))
}

/// Decode a link token produced by `encode`.
pub fn decode(token: &str) -> Result<AppState, DecodeError> {
    let bytes = LINK_ENGINE
        .decode(token.trim())
        .map_err(|e| DecodeError::InvalidBase64 {
            reason: e.to_string(),
        })?;
    decode_bytes(&bytes)
}

/// Binary record for `state`. Nothing is returned unless every field encodes.
pub fn encode_bytes(state: &AppState) -> Result<Vec<u8>, EncodeError> {
    let points = state.shape.as_ref().map(|s| s.len());
    if let Some(count) = points {
        if count > u16::MAX as usize {
            return Err(EncodeError::TooManyPoints { count });
        }
    }
    let mut w = ByteWriter::with_capacity(layout::encoded_len(points));
    w.u8(VERSION);
    w.u8(layout::pack_flags(&state.settings));
    w.bytes(&[0; RESERVED_LEN]);
    for vp in &state.viewports {
        w.lat_lng(vp.center, "viewport center")?;
        w.u16(zoom_to_wire(vp.zoom)?);
    }
    match &state.shape {
        None => w.u8(0),
        Some(shape) => {
            w.u8(1);
            w.u8(shape.origin_map().wire());
            w.lat_lng(shape.origin_anchor(), "origin anchor")?;
            w.lat_lng(shape.comparison_anchor(), "comparison anchor")?;
            w.f32(shape.rotation(), "rotation")?;
            // count checked against u16::MAX above
            w.u16(shape.len() as u16);
            for p in shape.local_points() {
                w.f32(p.x, "point x")?;
                w.f32(p.y, "point y")?;
            }
        }
    }
    Ok(w.finish())
}

/// Parse a binary record. Trailing bytes after the point list are ignored.
pub fn decode_bytes(bytes: &[u8]) -> Result<AppState, DecodeError> {
    let mut r = ByteReader::new(bytes);
    let version = r.u8()?;
    if version != VERSION {
        return Err(DecodeError::UnsupportedVersion { version });
    }
    let settings = layout::unpack_flags(r.u8()?);
    r.skip(RESERVED_LEN)?;
    let mut viewports = [Viewport::new(LatLng::new(0.0, 0.0), 0.0); 2];
    for vp in &mut viewports {
        let center = r.lat_lng("viewport center")?;
        let zoom = f64::from(r.u16()?) / 100.0;
        *vp = Viewport::new(center, zoom);
    }
    let shape = match r.u8()? {
        0 => None,
        1 => Some(read_shape(&mut r)?),
        value => return Err(DecodeError::InvalidShapeFlag { value }),
    };
    Ok(AppState {
        settings,
        viewports,
        shape,
    })
}

fn read_shape(r: &mut ByteReader<'_>) -> Result<Shape, DecodeError> {
    let raw_map = r.u8()?;
    let origin_map =
        MapId::from_wire(raw_map).ok_or(DecodeError::InvalidOriginMap { value: raw_map })?;
    let origin_anchor = r.lat_lng("origin anchor")?;
    let comparison_anchor = r.lat_lng("comparison anchor")?;
    let rotation = r.f32("rotation")?;
    let count = usize::from(r.u16()?);
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let x = r.f32("point x")?;
        let y = r.f32("point y")?;
        points.push(Vector2::new(x, y));
    }
    Shape::from_parts(
        origin_map,
        origin_anchor,
        comparison_anchor,
        rotation,
        points,
    )
    .ok_or(DecodeError::EmptyShape)
}

fn zoom_to_wire(zoom: f64) -> Result<u16, EncodeError> {
    if !zoom.is_finite() {
        return Err(EncodeError::NonFinite {
            field: "viewport zoom",
        });
    }
    Ok((zoom * 100.0).round().clamp(0.0, f64::from(u16::MAX)) as u16)
}

struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    fn with_capacity(n: usize) -> Self {
        Self {
            buf: Vec::with_capacity(n),
        }
    }

    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    fn bytes(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }

    fn f32(&mut self, v: f64, field: &'static str) -> Result<(), EncodeError> {
        let narrow = v as f32;
        if !narrow.is_finite() {
            return Err(EncodeError::NonFinite { field });
        }
        self.buf.extend_from_slice(&narrow.to_be_bytes());
        Ok(())
    }

    fn lat_lng(&mut self, p: LatLng, field: &'static str) -> Result<(), EncodeError> {
        self.f32(p.lat, field)?;
        self.f32(p.lng, field)
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos + n;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(DecodeError::Truncated {
                offset: self.pos,
                needed: n,
                len: self.bytes.len(),
            })?;
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.take(n).map(|_| ())
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn f32(&mut self, field: &'static str) -> Result<f64, DecodeError> {
        let b = self.take(4)?;
        let v = f32::from_be_bytes([b[0], b[1], b[2], b[3]]);
        if !v.is_finite() {
            return Err(DecodeError::NonFinite { field });
        }
        Ok(f64::from(v))
    }

    fn lat_lng(&mut self, field: &'static str) -> Result<LatLng, DecodeError> {
        let lat = self.f32(field)?;
        let lng = self.f32(field)?;
        Ok(LatLng::new(lat, lng))
    }
}
