//! Identifier codec.
//!
//! Identifiers are written as plain JSON unsigned integers. An unidentified
//! surface has no `geometryId` field at all, so every `u64` (zero included)
//! stays available as a real identifier.

use detgeo_surfaces::GeometryIdentifier;
use serde_json::Value;

use crate::error::{Result, SurfaceJsonError};
use crate::GEOMETRY_ID_KEY;

const KIND: &str = "GeometryIdentifier";

/// Encode an identifier as a JSON integer.
pub fn encode_identifier(id: GeometryIdentifier) -> Value {
    Value::from(id.value())
}

/// Decode an identifier from a JSON integer.
///
/// Negative integers and integers beyond `u64::MAX` are range errors; any
/// other non-integer value is a format error.
pub fn decode_identifier(value: &Value) -> Result<GeometryIdentifier> {
    let Value::Number(n) = value else {
        return Err(SurfaceJsonError::format(
            GEOMETRY_ID_KEY,
            KIND,
            format!("expected an unsigned integer, got {value}"),
        ));
    };
    if let Some(raw) = n.as_u64() {
        return Ok(GeometryIdentifier::new(raw));
    }
    if n.as_i64().is_some() {
        return Err(SurfaceJsonError::range(GEOMETRY_ID_KEY, n));
    }
    // Integer literals outside i64/u64 are parsed as floats.
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && (f < 0.0 || f >= u64::MAX as f64) => {
            Err(SurfaceJsonError::range(GEOMETRY_ID_KEY, n))
        }
        _ => Err(SurfaceJsonError::format(
            GEOMETRY_ID_KEY,
            KIND,
            format!("expected an unsigned integer, got {n}"),
        )),
    }
}
