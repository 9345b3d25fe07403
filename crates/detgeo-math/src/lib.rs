#![warn(missing_docs)]

//! Math types for the detgeo detector geometry model.
//!
//! Thin wrappers around nalgebra providing the placement types surfaces
//! need: points, vectors, directions, affine transforms, and the opaque
//! geometry context token under which a transform is evaluated.

use nalgebra::{Matrix3, Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 3x3 rotation block.
pub type Mat3 = Matrix3<f64>;

/// Opaque context token under which surface placements are evaluated.
///
/// Alignment-aware geometry passes a context to every transform lookup.
/// Nothing in this workspace reads it yet, and it is never serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryContext;

impl GeometryContext {
    /// The nominal (unaligned) context.
    pub fn nominal() -> Self {
        Self
    }
}

/// A 4x4 affine transformation matrix.
///
/// Surfaces use it as a rigid placement (rotation + translation) in global
/// space, but the type itself does not enforce orthonormality.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Default relative precision for [`Transform::is_approx`].
    pub const DEFAULT_PRECISION: f64 = 1e-12;

    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    ///
    /// Uses Rodrigues' rotation formula.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Build from the top three rows of a row-major affine matrix.
    ///
    /// The implicit bottom row is `[0, 0, 0, 1]`.
    pub fn from_affine_rows(rows: &[f64; 12]) -> Self {
        let mut m = Matrix4::identity();
        for r in 0..3 {
            for c in 0..4 {
                m[(r, c)] = rows[r * 4 + c];
            }
        }
        Self { matrix: m }
    }

    /// The top three rows of the matrix, row-major.
    pub fn to_affine_rows(&self) -> [f64; 12] {
        let mut rows = [0.0; 12];
        for r in 0..3 {
            for c in 0..4 {
                rows[r * 4 + c] = self.matrix[(r, c)];
            }
        }
        rows
    }

    /// Build from all sixteen entries, row-major. The bottom row is kept as
    /// given; check [`Transform::is_affine`] when it comes from outside.
    pub fn from_rows(rows: &[f64; 16]) -> Self {
        Self {
            matrix: Matrix4::from_row_slice(rows),
        }
    }

    /// All sixteen matrix entries, row-major.
    pub fn to_rows(&self) -> [f64; 16] {
        let mut rows = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                rows[r * 4 + c] = self.matrix[(r, c)];
            }
        }
        rows
    }

    /// Whether the bottom row is exactly `[0, 0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.matrix[(3, 0)] == 0.0
            && self.matrix[(3, 1)] == 0.0
            && self.matrix[(3, 2)] == 0.0
            && self.matrix[(3, 3)] == 1.0
    }

    /// Translation component.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }

    /// Upper-left 3x3 block (rotation for rigid placements).
    pub fn rotation_part(&self) -> Mat3 {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// Relative fuzzy comparison of the full matrices.
    ///
    /// True when `‖a − b‖ ≤ precision · min(‖a‖, ‖b‖)` under the Frobenius
    /// norm, which makes the check scale-aware for large translations.
    pub fn is_approx(&self, other: &Transform, precision: f64) -> bool {
        let diff = (self.matrix - other.matrix).norm_squared();
        let scale = self
            .matrix
            .norm_squared()
            .min(other.matrix.norm_squared());
        diff <= precision * precision * scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
