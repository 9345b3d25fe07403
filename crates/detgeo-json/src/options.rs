//! Converter configuration.

use serde::{Deserialize, Serialize};

/// Array layout used when writing a transform.
///
/// Decoding accepts both layouts regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformLayout {
    /// Top three rows of the affine matrix, 12 values row-major.
    #[default]
    #[serde(rename = "affine3x4")]
    Affine3x4,
    /// Full 4x4 matrix, 16 values row-major.
    #[serde(rename = "full4x4")]
    Full4x4,
}

impl TransformLayout {
    /// Number of values written for this layout.
    pub fn value_count(self) -> usize {
        match self {
            TransformLayout::Affine3x4 => 12,
            TransformLayout::Full4x4 => 16,
        }
    }
}

/// Options controlling how surfaces are written and checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Layout of the `transform` array on encode.
    pub transform_layout: TransformLayout,
    /// Relative precision for transform comparisons after a round trip.
    pub approx_precision: f64,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            transform_layout: TransformLayout::Affine3x4,
            approx_precision: detgeo_math::Transform::DEFAULT_PRECISION,
        }
    }
}
