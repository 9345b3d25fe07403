//! Bounds shapes constraining the extent of a surface.
//!
//! Every bounds type is a fixed, ordered list of `f64` parameters. The order
//! is part of the serialized contract: [`SurfaceBounds::values`] and
//! [`SurfaceBounds::from_values`] always use the order given by
//! [`BoundsKind::parameter_names`].

use std::fmt;

use thiserror::Error;

/// Errors from building bounds out of raw parameter lists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    /// Parameter count does not match the kind's arity.
    #[error("{kind} expects {expected} values, got {actual}")]
    InvalidArity {
        /// Bounds kind being built.
        kind: BoundsKind,
        /// Arity of that kind.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
}

// =============================================================================
// Kinds
// =============================================================================

/// The kind of a bounds value (for match-based dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundsKind {
    /// Cone section between two z positions.
    Cone,
    /// Ring or full disc.
    Radial,
    /// Cylinder section symmetric in z.
    Cylinder,
    /// Symmetric trapezoid in a plane.
    Trapezoid,
    /// Axis-aligned rectangle in a plane.
    Rectangle,
    /// Straw tube around a line.
    Line,
}

impl BoundsKind {
    /// Every supported kind.
    pub const ALL: [BoundsKind; 6] = [
        BoundsKind::Cone,
        BoundsKind::Radial,
        BoundsKind::Cylinder,
        BoundsKind::Trapezoid,
        BoundsKind::Rectangle,
        BoundsKind::Line,
    ];

    /// Serialized type tag, e.g. `"ConeBounds"`.
    pub fn type_name(self) -> &'static str {
        match self {
            BoundsKind::Cone => "ConeBounds",
            BoundsKind::Radial => "RadialBounds",
            BoundsKind::Cylinder => "CylinderBounds",
            BoundsKind::Trapezoid => "TrapezoidBounds",
            BoundsKind::Rectangle => "RectangleBounds",
            BoundsKind::Line => "LineBounds",
        }
    }

    /// Look up a kind by its serialized type tag.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == name)
    }

    /// Parameter names in serialized order.
    pub fn parameter_names(self) -> &'static [&'static str] {
        match self {
            BoundsKind::Cone => &["alpha", "min_z", "max_z"],
            BoundsKind::Radial => &["inner_radius", "outer_radius"],
            BoundsKind::Cylinder => &["radius", "half_length_z"],
            BoundsKind::Trapezoid => &[
                "half_length_x_neg_y",
                "half_length_x_pos_y",
                "half_length_y",
            ],
            BoundsKind::Rectangle => &["min_x", "min_y", "max_x", "max_y"],
            BoundsKind::Line => &["radius", "half_length_z"],
        }
    }

    /// Number of parameters.
    pub fn arity(self) -> usize {
        self.parameter_names().len()
    }
}

impl fmt::Display for BoundsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// =============================================================================
// Concrete bounds
// =============================================================================

/// Cone bounds: opening angle and z extent along the cone axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeBounds {
    /// Half opening angle in radians.
    pub alpha: f64,
    /// Lower z limit.
    pub min_z: f64,
    /// Upper z limit.
    pub max_z: f64,
}

impl ConeBounds {
    /// Create cone bounds.
    pub fn new(alpha: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            alpha,
            min_z,
            max_z,
        }
    }
}

/// Radial bounds of a disc: inner and outer radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialBounds {
    /// Inner radius (0 for a full disc).
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
}

impl RadialBounds {
    /// Create radial bounds.
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
        }
    }
}

/// Cylinder bounds: radius and half length along z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderBounds {
    /// Cylinder radius.
    pub radius: f64,
    /// Half length along the cylinder axis.
    pub half_length_z: f64,
}

impl CylinderBounds {
    /// Create cylinder bounds.
    pub fn new(radius: f64, half_length_z: f64) -> Self {
        Self {
            radius,
            half_length_z,
        }
    }
}

/// Symmetric trapezoid in the local xy plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidBounds {
    /// Half length in x at negative y.
    pub half_length_x_neg_y: f64,
    /// Half length in x at positive y.
    pub half_length_x_pos_y: f64,
    /// Half length in y.
    pub half_length_y: f64,
}

impl TrapezoidBounds {
    /// Create trapezoid bounds.
    pub fn new(half_length_x_neg_y: f64, half_length_x_pos_y: f64, half_length_y: f64) -> Self {
        Self {
            half_length_x_neg_y,
            half_length_x_pos_y,
            half_length_y,
        }
    }
}

/// Axis-aligned rectangle in the local xy plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleBounds {
    /// Minimum local x.
    pub min_x: f64,
    /// Minimum local y.
    pub min_y: f64,
    /// Maximum local x.
    pub max_x: f64,
    /// Maximum local y.
    pub max_y: f64,
}

impl RectangleBounds {
    /// Create rectangle bounds from its corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle centered on the local origin.
    pub fn centered(half_x: f64, half_y: f64) -> Self {
        Self::new(-half_x, -half_y, half_x, half_y)
    }
}

/// Straw bounds: tube radius and half length along the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBounds {
    /// Tube radius.
    pub radius: f64,
    /// Half length along the line.
    pub half_length_z: f64,
}

impl LineBounds {
    /// Create line bounds.
    pub fn new(radius: f64, half_length_z: f64) -> Self {
        Self {
            radius,
            half_length_z,
        }
    }
}

// =============================================================================
// Type-erased bounds
// =============================================================================

/// Any bounds value. Equality is exact on kind and every parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceBounds {
    /// Cone bounds.
    Cone(ConeBounds),
    /// Radial (disc) bounds.
    Radial(RadialBounds),
    /// Cylinder bounds.
    Cylinder(CylinderBounds),
    /// Trapezoid (plane) bounds.
    Trapezoid(TrapezoidBounds),
    /// Rectangle (plane) bounds.
    Rectangle(RectangleBounds),
    /// Line (straw) bounds.
    Line(LineBounds),
}

impl SurfaceBounds {
    /// The kind of this bounds value.
    pub fn kind(&self) -> BoundsKind {
        match self {
            SurfaceBounds::Cone(_) => BoundsKind::Cone,
            SurfaceBounds::Radial(_) => BoundsKind::Radial,
            SurfaceBounds::Cylinder(_) => BoundsKind::Cylinder,
            SurfaceBounds::Trapezoid(_) => BoundsKind::Trapezoid,
            SurfaceBounds::Rectangle(_) => BoundsKind::Rectangle,
            SurfaceBounds::Line(_) => BoundsKind::Line,
        }
    }

    /// Parameters in the kind's declared order.
    pub fn values(&self) -> Vec<f64> {
        match *self {
            SurfaceBounds::Cone(b) => vec![b.alpha, b.min_z, b.max_z],
            SurfaceBounds::Radial(b) => vec![b.inner_radius, b.outer_radius],
            SurfaceBounds::Cylinder(b) => vec![b.radius, b.half_length_z],
            SurfaceBounds::Trapezoid(b) => vec![
                b.half_length_x_neg_y,
                b.half_length_x_pos_y,
                b.half_length_y,
            ],
            SurfaceBounds::Rectangle(b) => vec![b.min_x, b.min_y, b.max_x, b.max_y],
            SurfaceBounds::Line(b) => vec![b.radius, b.half_length_z],
        }
    }

    /// Build bounds of `kind` from parameters in declared order.
    pub fn from_values(kind: BoundsKind, values: &[f64]) -> Result<Self, BoundsError> {
        if values.len() != kind.arity() {
            return Err(BoundsError::InvalidArity {
                kind,
                expected: kind.arity(),
                actual: values.len(),
            });
        }
        let v = values;
        Ok(match kind {
            BoundsKind::Cone => SurfaceBounds::Cone(ConeBounds::new(v[0], v[1], v[2])),
            BoundsKind::Radial => SurfaceBounds::Radial(RadialBounds::new(v[0], v[1])),
            BoundsKind::Cylinder => SurfaceBounds::Cylinder(CylinderBounds::new(v[0], v[1])),
            BoundsKind::Trapezoid => {
                SurfaceBounds::Trapezoid(TrapezoidBounds::new(v[0], v[1], v[2]))
            }
            BoundsKind::Rectangle => {
                SurfaceBounds::Rectangle(RectangleBounds::new(v[0], v[1], v[2], v[3]))
            }
            BoundsKind::Line => SurfaceBounds::Line(LineBounds::new(v[0], v[1])),
        })
    }
}

impl fmt::Display for SurfaceBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind())?;
        for (i, v) in self.values().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str(")")
    }
}

macro_rules! impl_from_bounds {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SurfaceBounds {
                fn from(b: $ty) -> Self {
                    SurfaceBounds::$variant(b)
                }
            }
        )*
    };
}

impl_from_bounds! {
    ConeBounds => Cone,
    RadialBounds => Radial,
    CylinderBounds => Cylinder,
    TrapezoidBounds => Trapezoid,
    RectangleBounds => Rectangle,
    LineBounds => Line,
}

/// Bounds a plane surface may carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanarBounds {
    /// Trapezoid shape.
    Trapezoid(TrapezoidBounds),
    /// Rectangle shape.
    Rectangle(RectangleBounds),
}

impl PlanarBounds {
    /// Kinds a plane accepts.
    pub const KINDS: [BoundsKind; 2] = [BoundsKind::Trapezoid, BoundsKind::Rectangle];
}

impl From<TrapezoidBounds> for PlanarBounds {
    fn from(b: TrapezoidBounds) -> Self {
        PlanarBounds::Trapezoid(b)
    }
}

impl From<RectangleBounds> for PlanarBounds {
    fn from(b: RectangleBounds) -> Self {
        PlanarBounds::Rectangle(b)
    }
}

impl From<PlanarBounds> for SurfaceBounds {
    fn from(b: PlanarBounds) -> Self {
        match b {
            PlanarBounds::Trapezoid(t) => SurfaceBounds::Trapezoid(t),
            PlanarBounds::Rectangle(r) => SurfaceBounds::Rectangle(r),
        }
    }
}

impl TryFrom<SurfaceBounds> for PlanarBounds {
    type Error = BoundsKind;

    /// Fails with the offending kind for non-planar bounds.
    fn try_from(b: SurfaceBounds) -> Result<Self, Self::Error> {
        match b {
            SurfaceBounds::Trapezoid(t) => Ok(PlanarBounds::Trapezoid(t)),
            SurfaceBounds::Rectangle(r) => Ok(PlanarBounds::Rectangle(r)),
            other => Err(other.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_roundtrip() {
        for kind in BoundsKind::ALL {
            assert_eq!(BoundsKind::from_type_name(kind.type_name()), Some(kind));
        }
        assert_eq!(BoundsKind::from_type_name("EllipseBounds"), None);
        assert_eq!(BoundsKind::from_type_name("conebounds"), None);
    }

    #[test]
    fn declared_parameter_order() {
        let cone = SurfaceBounds::from(ConeBounds::new(0.123, 10.0, 100.0));
        assert_eq!(cone.values(), vec![0.123, 10.0, 100.0]);

        let trap = SurfaceBounds::from(TrapezoidBounds::new(2.0, 3.0, 4.0));
        assert_eq!(trap.values(), vec![2.0, 3.0, 4.0]);

        let rect = SurfaceBounds::from(RectangleBounds::centered(1.0, 2.0));
        assert_eq!(rect.values(), vec![-1.0, -2.0, 1.0, 2.0]);
    }

    #[test]
    fn values_match_arity() {
        let samples: [SurfaceBounds; 6] = [
            ConeBounds::new(0.1, 1.0, 2.0).into(),
            RadialBounds::new(0.0, 4.0).into(),
            CylinderBounds::new(5.0, 20.0).into(),
            TrapezoidBounds::new(2.0, 3.0, 4.0).into(),
            RectangleBounds::new(-1.0, -1.0, 1.0, 1.0).into(),
            LineBounds::new(1.0, 100.0).into(),
        ];
        for b in samples {
            assert_eq!(b.values().len(), b.kind().arity());
            assert_eq!(SurfaceBounds::from_values(b.kind(), &b.values()), Ok(b));
        }
    }

    #[test]
    fn from_values_rejects_wrong_arity() {
        let err = SurfaceBounds::from_values(BoundsKind::Cone, &[0.1, 1.0]).unwrap_err();
        assert_eq!(
            err,
            BoundsError::InvalidArity {
                kind: BoundsKind::Cone,
                expected: 3,
                actual: 2
            }
        );
        assert!(SurfaceBounds::from_values(BoundsKind::Line, &[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn equality_is_exact() {
        let a = SurfaceBounds::from(CylinderBounds::new(5.0, 20.0));
        let b = SurfaceBounds::from(CylinderBounds::new(5.0, 20.0 + 1e-12));
        assert_ne!(a, b);
        // same numbers, different kind
        let line = SurfaceBounds::from(LineBounds::new(5.0, 20.0));
        assert_ne!(a, line);
    }

    #[test]
    fn planar_conversion() {
        let trap = TrapezoidBounds::new(2.0, 3.0, 4.0);
        let planar = PlanarBounds::from(trap);
        assert_eq!(SurfaceBounds::from(planar), SurfaceBounds::Trapezoid(trap));
        let disc = SurfaceBounds::from(RadialBounds::new(0.0, 4.0));
        assert_eq!(PlanarBounds::try_from(disc), Err(BoundsKind::Radial));
    }

    #[test]
    fn display_lists_values() {
        let b = SurfaceBounds::from(LineBounds::new(1.0, 100.0));
        assert_eq!(b.to_string(), "LineBounds(1, 100)");
    }
}
