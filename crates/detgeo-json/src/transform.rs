//! Transform codec: affine matrices as flat row-major arrays.
//!
//! The codec carries the matrix faithfully. It does not orthonormalize the
//! rotation block or otherwise check that the transform is a rigid placement.

use detgeo_math::Transform;
use serde_json::Value;
use tracing::warn;

use crate::error::{Result, SurfaceJsonError};
use crate::options::TransformLayout;
use crate::{f64_array, TRANSFORM_KEY};

const KIND: &str = "Transform";

/// Encode a transform as a flat row-major array.
///
/// JSON has no NaN or infinity: a non-finite entry is written as `null`,
/// which [`decode_transform`] rejects. A warning is logged when that happens.
pub fn encode_transform(transform: &Transform, layout: TransformLayout) -> Value {
    let values: Vec<f64> = match layout {
        TransformLayout::Affine3x4 => transform.to_affine_rows().to_vec(),
        TransformLayout::Full4x4 => transform.to_rows().to_vec(),
    };
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        warn!(
            index,
            value = values[index],
            "non-finite transform entry encoded as null"
        );
    }
    Value::from(values)
}

/// Decode a transform from 12 (affine rows) or 16 (full matrix) values.
pub fn decode_transform(value: &Value) -> Result<Transform> {
    let values = f64_array(value, TRANSFORM_KEY, KIND)?;
    match values.len() {
        12 => {
            let mut rows = [0.0; 12];
            rows.copy_from_slice(&values);
            Ok(Transform::from_affine_rows(&rows))
        }
        16 => {
            let mut rows = [0.0; 16];
            rows.copy_from_slice(&values);
            let transform = Transform::from_rows(&rows);
            if !transform.is_affine() {
                return Err(SurfaceJsonError::format(
                    TRANSFORM_KEY,
                    KIND,
                    format!(
                        "last row must be [0, 0, 0, 1] for an affine transform, got {:?}",
                        &values[12..]
                    ),
                ));
            }
            Ok(transform)
        }
        n => Err(SurfaceJsonError::format(
            TRANSFORM_KEY,
            KIND,
            format!("expected 12 or 16 values, got {n}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detgeo_math::{Dir3, Vec3};
    use serde_json::json;

    #[test]
    fn translation_layout() {
        let t = Transform::translation(0.0, 0.0, -7.0);
        let v = encode_transform(&t, TransformLayout::Affine3x4);
        assert_eq!(
            v,
            json!([1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, -7.0])
        );
        assert_eq!(decode_transform(&v).unwrap(), t);
    }

    #[test]
    fn full_layout_roundtrip() {
        let axis = Dir3::new_normalize(Vec3::new(0.3, -1.0, 2.0));
        let t = Transform::translation(-1.0, -2.0, -7.0)
            .then(&Transform::rotation_about_axis(&axis, 1.1));
        let v = encode_transform(&t, TransformLayout::Full4x4);
        assert_eq!(v.as_array().map(Vec::len), Some(16));
        let back = decode_transform(&v).unwrap();
        assert!(back.is_approx(&t, Transform::DEFAULT_PRECISION));
    }

    #[test]
    fn rotation_is_carried_not_corrected() {
        // a shear is not a rotation, but the codec passes it through
        let mut rows = Transform::identity().to_affine_rows();
        rows[1] = 0.5;
        let v = Value::from(rows.to_vec());
        let t = decode_transform(&v).unwrap();
        assert_eq!(t.matrix[(0, 1)], 0.5);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = decode_transform(&json!([1.0, 0.0, 0.0])).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("got 3"));

        assert!(decode_transform(&json!([])).is_err());
        let thirteen: Vec<f64> = vec![0.0; 13];
        assert!(decode_transform(&Value::from(thirteen)).is_err());
    }

    #[test]
    fn rejects_non_affine_bottom_row() {
        let mut values = Transform::identity().to_rows().to_vec();
        values[14] = 0.5;
        let err = decode_transform(&Value::from(values)).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn non_finite_entry_does_not_survive() {
        let t = Transform::translation(0.0, f64::INFINITY, -7.0);
        let v = encode_transform(&t, TransformLayout::Affine3x4);
        assert!(v[7].is_null());
        let err = decode_transform(&v).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("transform[7]"));
    }

    #[test]
    fn rejects_non_numeric_entries() {
        let err = decode_transform(&json!("identity")).unwrap_err();
        assert!(err.is_format());

        let mut values: Vec<Value> = vec![json!(0.0); 12];
        values[4] = json!("1");
        let err = decode_transform(&Value::Array(values)).unwrap_err();
        assert!(err.to_string().contains("transform[4]"));
    }
}
