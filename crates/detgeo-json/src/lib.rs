#![warn(missing_docs)]

//! JSON conversion for detgeo surfaces.
//!
//! A surface document looks like
//!
//! ```json
//! {
//!   "type": "ConeSurface",
//!   "transform": [1, 0, 0, 0,  0, 1, 0, 0,  0, 0, 1, -7],
//!   "bounds": { "type": "ConeBounds", "values": [0.123, 10, 100] },
//!   "geometryId": 13
//! }
//! ```
//!
//! `bounds` is absent for unbounded kinds and `geometryId` is absent until an
//! identifier has been assigned.
//!
//! # Example
//!
//! ```
//! use detgeo_json::{surface_from_json, surface_to_json};
//! use detgeo_math::Transform;
//! use detgeo_surfaces::{CylinderBounds, CylinderSurface, GeometryIdentifier, Surface};
//!
//! let mut cylinder = CylinderSurface::new(
//!     Transform::translation(0.0, 0.0, -7.0),
//!     CylinderBounds::new(5.0, 20.0),
//! );
//! cylinder.assign_geometry_id(GeometryIdentifier::new(11));
//!
//! let document = surface_to_json(&cylinder);
//! let restored = surface_from_json(&document).unwrap();
//! assert_eq!(restored.type_name(), "CylinderSurface");
//! assert_eq!(restored.bounds(), cylinder.bounds());
//! ```

use serde_json::Value;

mod bounds;
mod converter;
mod error;
mod factory;
mod identifier;
mod options;
mod transform;

pub use bounds::{decode_bounds, encode_bounds};
pub use converter::{surface_from_json, surface_to_json, SurfaceConverter};
pub use error::{Result, SurfaceJsonError};
pub use factory::{required_bounds, Reconstructor, SurfaceFactory};
pub use identifier::{decode_identifier, encode_identifier};
pub use options::{ConverterOptions, TransformLayout};
pub use transform::{decode_transform, encode_transform};

/// Key of the type tag, in surface documents and bounds fragments.
pub const TYPE_KEY: &str = "type";
/// Key of the transform array.
pub const TRANSFORM_KEY: &str = "transform";
/// Key of the bounds fragment.
pub const BOUNDS_KEY: &str = "bounds";
/// Key of the parameter list inside a bounds fragment.
pub const VALUES_KEY: &str = "values";
/// Key of the geometry identifier.
pub const GEOMETRY_ID_KEY: &str = "geometryId";

/// Read an array of numbers, naming the offending entry on failure.
pub(crate) fn f64_array(value: &Value, field: &str, kind: &str) -> Result<Vec<f64>> {
    let entries = value.as_array().ok_or_else(|| {
        SurfaceJsonError::format(field, kind, format!("expected an array of numbers, got {value}"))
    })?;
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry.as_f64().ok_or_else(|| {
                SurfaceJsonError::format(
                    format!("{field}[{i}]"),
                    kind,
                    format!("expected a number, got {entry}"),
                )
            })
        })
        .collect()
}
