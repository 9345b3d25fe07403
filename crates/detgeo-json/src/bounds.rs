//! Bounds codec.
//!
//! A bounds fragment is `{"type": "<tag>", "values": [..]}` with the values
//! in the order of [`BoundsKind::parameter_names`].

use detgeo_surfaces::{BoundsError, BoundsKind, SurfaceBounds};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::error::{Result, SurfaceJsonError};
use crate::{f64_array, BOUNDS_KEY, TYPE_KEY, VALUES_KEY};

const KIND: &str = "SurfaceBounds";

/// Encode bounds as a `{type, values}` fragment.
///
/// A non-finite value is written as `null` and will not decode; a warning is
/// logged for it.
pub fn encode_bounds(bounds: &SurfaceBounds) -> Value {
    let values = bounds.values();
    for (name, value) in bounds.kind().parameter_names().iter().zip(&values) {
        if !value.is_finite() {
            warn!(
                kind = %bounds.kind(),
                parameter = *name,
                value = *value,
                "non-finite bound encoded as null"
            );
        }
    }
    let mut fragment = Map::new();
    fragment.insert(TYPE_KEY.into(), Value::from(bounds.kind().type_name()));
    fragment.insert(VALUES_KEY.into(), Value::from(values));
    Value::Object(fragment)
}

/// Decode a bounds fragment.
///
/// With `expected` set, a recognized kind outside that list is rejected as a
/// format error; callers use this to pin a surface to the shapes it accepts.
pub fn decode_bounds(fragment: &Value, expected: Option<&[BoundsKind]>) -> Result<SurfaceBounds> {
    let object = fragment.as_object().ok_or_else(|| {
        SurfaceJsonError::format(
            BOUNDS_KEY,
            KIND,
            format!("expected an object, got {fragment}"),
        )
    })?;

    let type_field = format!("{BOUNDS_KEY}.{TYPE_KEY}");
    let tag = match object.get(TYPE_KEY) {
        Some(Value::String(tag)) => tag.as_str(),
        Some(other) => {
            return Err(SurfaceJsonError::format(
                type_field,
                KIND,
                format!("expected a string, got {other}"),
            ))
        }
        None => return Err(SurfaceJsonError::format(type_field, KIND, "missing field")),
    };
    let kind = BoundsKind::from_type_name(tag)
        .ok_or_else(|| SurfaceJsonError::unknown_kind(type_field.as_str(), tag))?;

    if let Some(accepted) = expected {
        if !accepted.contains(&kind) {
            let names: Vec<&str> = accepted.iter().map(|k| k.type_name()).collect();
            return Err(SurfaceJsonError::format(
                type_field,
                kind.type_name(),
                format!("expected one of [{}]", names.join(", ")),
            ));
        }
    }

    let values_field = format!("{BOUNDS_KEY}.{VALUES_KEY}");
    let values = match object.get(VALUES_KEY) {
        Some(values) => f64_array(values, &values_field, kind.type_name())?,
        None => {
            return Err(SurfaceJsonError::format(
                values_field,
                kind.type_name(),
                "missing field",
            ))
        }
    };

    trace!(kind = kind.type_name(), ?values, "decoding bounds");
    SurfaceBounds::from_values(kind, &values).map_err(|err| match err {
        BoundsError::InvalidArity {
            expected, actual, ..
        } => SurfaceJsonError::format(
            values_field,
            kind.type_name(),
            format!(
                "expected {expected} values ({}), got {actual}",
                kind.parameter_names().join(", ")
            ),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use detgeo_surfaces::{
        ConeBounds, CylinderBounds, LineBounds, RadialBounds, TrapezoidBounds,
    };
    use serde_json::json;

    #[test]
    fn cone_fragment_layout() {
        let bounds = SurfaceBounds::from(ConeBounds::new(0.123, 10.0, 100.0));
        let fragment = encode_bounds(&bounds);
        assert_eq!(
            fragment,
            json!({"type": "ConeBounds", "values": [0.123, 10.0, 100.0]})
        );
        assert_eq!(decode_bounds(&fragment, None).unwrap(), bounds);
    }

    #[test]
    fn integer_values_are_accepted() {
        let fragment = json!({"type": "RadialBounds", "values": [0, 4]});
        assert_eq!(
            decode_bounds(&fragment, None).unwrap(),
            SurfaceBounds::from(RadialBounds::new(0.0, 4.0))
        );
    }

    #[test]
    fn arity_is_enforced_for_every_kind() {
        for kind in BoundsKind::ALL {
            let too_few = vec![1.0; kind.arity() - 1];
            let too_many = vec![1.0; kind.arity() + 1];
            for values in [too_few, too_many] {
                let fragment = json!({"type": kind.type_name(), "values": values});
                let err = decode_bounds(&fragment, None).unwrap_err();
                assert!(err.is_format(), "{kind}: {err}");
                assert!(err.to_string().contains(kind.type_name()));
            }
        }
    }

    #[test]
    fn non_finite_bound_is_rejected_on_decode() {
        let fragment = encode_bounds(&CylinderBounds::new(5.0, f64::INFINITY).into());
        assert_eq!(fragment, json!({"type": "CylinderBounds", "values": [5.0, null]}));
        let err = decode_bounds(&fragment, None).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("bounds.values[1]"));
    }

    #[test]
    fn unknown_bounds_type() {
        let fragment = json!({"type": "EllipseBounds", "values": [1.0, 2.0]});
        let err = decode_bounds(&fragment, None).unwrap_err();
        assert!(err.is_unknown_kind());
        assert_eq!(err.to_string(), "unknown bounds.type `EllipseBounds`");
    }

    #[test]
    fn expected_kinds_pin_the_shape() {
        let fragment = encode_bounds(&LineBounds::new(1.0, 100.0).into());
        let err = decode_bounds(&fragment, Some(&[BoundsKind::Cylinder])).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("CylinderBounds"));

        let planar = encode_bounds(&TrapezoidBounds::new(2.0, 3.0, 4.0).into());
        let ok = decode_bounds(&planar, Some(&[BoundsKind::Trapezoid, BoundsKind::Rectangle]));
        assert!(ok.is_ok());
    }

    #[test]
    fn structural_defects() {
        assert!(decode_bounds(&json!([1.0, 2.0]), None).unwrap_err().is_format());
        assert!(decode_bounds(&json!({"values": [1.0, 2.0]}), None)
            .unwrap_err()
            .is_format());
        assert!(decode_bounds(&json!({"type": 3, "values": [1.0]}), None)
            .unwrap_err()
            .is_format());
        assert!(decode_bounds(&json!({"type": "LineBounds"}), None)
            .unwrap_err()
            .is_format());
        assert!(
            decode_bounds(&json!({"type": "LineBounds", "values": [1.0, "x"]}), None)
                .unwrap_err()
                .is_format()
        );
    }
}
