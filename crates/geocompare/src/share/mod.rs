//! Shared-link codec.
//!
//! Purpose
//! - Serialize the whole `AppState` (settings, both viewport poses, optional
//!   shape) into a compact big-endian record, wrapped as unpadded base64url.
//! - Parse such a link back. Parsing is total: every malformed input maps to a
//!   `DecodeError`, and callers keep their current state on error.
//!
//! Conventions
//! - Floats travel as f32, so coordinates, rotation and offsets round-trip to
//!   f32 precision; zoom travels as `round(zoom·100)` in a u16.
//! - The leading version byte is a discriminator. Only version 1 is read.
//!
//! Code cross-refs: `layout` (field order), `crate::app::Controller::load_shared`

mod codec;
pub mod layout;

pub use codec::{decode, decode_bytes, encode, encode_bytes, DecodeError, EncodeError};

#[cfg(test)]
mod tests;
