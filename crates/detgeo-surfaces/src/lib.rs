#![warn(missing_docs)]

//! Bounded surfaces for the detgeo detector geometry model.
//!
//! A surface is a placement in global space plus a bounds shape, optionally
//! tagged with a [`GeometryIdentifier`]. Concrete kinds share the [`Surface`]
//! trait so collections and serializers can work on `Box<dyn Surface>`.

use std::any::Any;

use detgeo_math::{GeometryContext, Point3, Transform};

mod bounds;
mod identifier;

pub use bounds::{
    BoundsError, BoundsKind, ConeBounds, CylinderBounds, LineBounds, PlanarBounds, RadialBounds,
    RectangleBounds, SurfaceBounds, TrapezoidBounds,
};
pub use identifier::GeometryIdentifier;

/// A bounded surface placed in 3D space.
pub trait Surface: Send + Sync + std::fmt::Debug {
    /// Serialized type tag of the concrete kind, e.g. `"ConeSurface"`.
    fn type_name(&self) -> &'static str;

    /// Placement of the surface in global space.
    fn transform(&self, gctx: &GeometryContext) -> &Transform;

    /// Origin of the local frame in global coordinates.
    fn center(&self, gctx: &GeometryContext) -> Point3 {
        Point3::from(self.transform(gctx).translation_part())
    }

    /// Bounds shape, `None` for unbounded kinds.
    fn bounds(&self) -> Option<SurfaceBounds>;

    /// Assigned identifier, `None` while unidentified.
    fn geometry_id(&self) -> Option<GeometryIdentifier>;

    /// Assign the identifier. Called once, after construction.
    fn assign_geometry_id(&mut self, id: GeometryIdentifier);

    /// Clone this surface into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Surface>;

    /// Downcast to a concrete type via `Any`.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Surface> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// =============================================================================
// Cone
// =============================================================================

/// Conical surface around the local z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeSurface {
    transform: Transform,
    bounds: ConeBounds,
    geometry_id: Option<GeometryIdentifier>,
}

impl ConeSurface {
    /// Serialized type tag.
    pub const TYPE_NAME: &'static str = "ConeSurface";

    /// Create an unidentified cone surface.
    pub fn new(transform: Transform, bounds: ConeBounds) -> Self {
        Self {
            transform,
            bounds,
            geometry_id: None,
        }
    }

    /// The cone bounds.
    pub fn cone_bounds(&self) -> &ConeBounds {
        &self.bounds
    }
}

impl Surface for ConeSurface {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn transform(&self, _gctx: &GeometryContext) -> &Transform {
        &self.transform
    }

    fn bounds(&self) -> Option<SurfaceBounds> {
        Some(self.bounds.into())
    }

    fn geometry_id(&self) -> Option<GeometryIdentifier> {
        self.geometry_id
    }

    fn assign_geometry_id(&mut self, id: GeometryIdentifier) {
        self.geometry_id = Some(id);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// Disc
// =============================================================================

/// Disc or ring in the local xy plane.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscSurface {
    transform: Transform,
    bounds: RadialBounds,
    geometry_id: Option<GeometryIdentifier>,
}

impl DiscSurface {
    /// Serialized type tag.
    pub const TYPE_NAME: &'static str = "DiscSurface";

    /// Create an unidentified disc surface.
    pub fn new(transform: Transform, bounds: RadialBounds) -> Self {
        Self {
            transform,
            bounds,
            geometry_id: None,
        }
    }

    /// The radial bounds.
    pub fn radial_bounds(&self) -> &RadialBounds {
        &self.bounds
    }
}

impl Surface for DiscSurface {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn transform(&self, _gctx: &GeometryContext) -> &Transform {
        &self.transform
    }

    fn bounds(&self) -> Option<SurfaceBounds> {
        Some(self.bounds.into())
    }

    fn geometry_id(&self) -> Option<GeometryIdentifier> {
        self.geometry_id
    }

    fn assign_geometry_id(&mut self, id: GeometryIdentifier) {
        self.geometry_id = Some(id);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// Cylinder
// =============================================================================

/// Cylindrical surface around the local z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderSurface {
    transform: Transform,
    bounds: CylinderBounds,
    geometry_id: Option<GeometryIdentifier>,
}

impl CylinderSurface {
    /// Serialized type tag.
    pub const TYPE_NAME: &'static str = "CylinderSurface";

    /// Create an unidentified cylinder surface.
    pub fn new(transform: Transform, bounds: CylinderBounds) -> Self {
        Self {
            transform,
            bounds,
            geometry_id: None,
        }
    }

    /// The cylinder bounds.
    pub fn cylinder_bounds(&self) -> &CylinderBounds {
        &self.bounds
    }
}

impl Surface for CylinderSurface {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn transform(&self, _gctx: &GeometryContext) -> &Transform {
        &self.transform
    }

    fn bounds(&self) -> Option<SurfaceBounds> {
        Some(self.bounds.into())
    }

    fn geometry_id(&self) -> Option<GeometryIdentifier> {
        self.geometry_id
    }

    fn assign_geometry_id(&mut self, id: GeometryIdentifier) {
        self.geometry_id = Some(id);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// Plane
// =============================================================================

/// Planar surface in the local xy plane, bounded by a trapezoid or rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSurface {
    transform: Transform,
    bounds: PlanarBounds,
    geometry_id: Option<GeometryIdentifier>,
}

impl PlaneSurface {
    /// Serialized type tag.
    pub const TYPE_NAME: &'static str = "PlaneSurface";

    /// Create an unidentified plane surface.
    pub fn new(transform: Transform, bounds: impl Into<PlanarBounds>) -> Self {
        Self {
            transform,
            bounds: bounds.into(),
            geometry_id: None,
        }
    }

    /// The planar bounds.
    pub fn planar_bounds(&self) -> &PlanarBounds {
        &self.bounds
    }
}

impl Surface for PlaneSurface {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn transform(&self, _gctx: &GeometryContext) -> &Transform {
        &self.transform
    }

    fn bounds(&self) -> Option<SurfaceBounds> {
        Some(self.bounds.into())
    }

    fn geometry_id(&self) -> Option<GeometryIdentifier> {
        self.geometry_id
    }

    fn assign_geometry_id(&mut self, id: GeometryIdentifier) {
        self.geometry_id = Some(id);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// Straw
// =============================================================================

/// Straw tube around the local z axis (drift-tube measurement surface).
#[derive(Debug, Clone, PartialEq)]
pub struct StrawSurface {
    transform: Transform,
    bounds: LineBounds,
    geometry_id: Option<GeometryIdentifier>,
}

impl StrawSurface {
    /// Serialized type tag.
    pub const TYPE_NAME: &'static str = "StrawSurface";

    /// Create an unidentified straw surface.
    pub fn new(transform: Transform, bounds: LineBounds) -> Self {
        Self {
            transform,
            bounds,
            geometry_id: None,
        }
    }

    /// The line bounds.
    pub fn line_bounds(&self) -> &LineBounds {
        &self.bounds
    }
}

impl Surface for StrawSurface {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn transform(&self, _gctx: &GeometryContext) -> &Transform {
        &self.transform
    }

    fn bounds(&self) -> Option<SurfaceBounds> {
        Some(self.bounds.into())
    }

    fn geometry_id(&self) -> Option<GeometryIdentifier> {
        self.geometry_id
    }

    fn assign_geometry_id(&mut self, id: GeometryIdentifier) {
        self.geometry_id = Some(id);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// Perigee
// =============================================================================

/// Unbounded line surface anchored at a reference point.
///
/// Used as the reference for track parameters expressed at the point of
/// closest approach. It has no bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PerigeeSurface {
    transform: Transform,
    geometry_id: Option<GeometryIdentifier>,
}

impl PerigeeSurface {
    /// Serialized type tag.
    pub const TYPE_NAME: &'static str = "PerigeeSurface";

    /// Create an unidentified perigee surface with a full placement.
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            geometry_id: None,
        }
    }

    /// Create a perigee surface at `point` with the global axes.
    pub fn from_point(point: Point3) -> Self {
        Self::new(Transform::translation(point.x, point.y, point.z))
    }
}

impl Surface for PerigeeSurface {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn transform(&self, _gctx: &GeometryContext) -> &Transform {
        &self.transform
    }

    fn bounds(&self) -> Option<SurfaceBounds> {
        None
    }

    fn geometry_id(&self) -> Option<GeometryIdentifier> {
        self.geometry_id
    }

    fn assign_geometry_id(&mut self, id: GeometryIdentifier) {
        self.geometry_id = Some(id);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gctx() -> GeometryContext {
        GeometryContext::nominal()
    }

    #[test]
    fn cone_surface_accessors() {
        let trf = Transform::translation(0.0, 0.0, -7.0);
        let mut cone = ConeSurface::new(trf.clone(), ConeBounds::new(0.123, 10.0, 100.0));
        assert_eq!(cone.type_name(), "ConeSurface");
        assert_eq!(cone.transform(&gctx()), &trf);
        assert_eq!(cone.geometry_id(), None);
        assert_eq!(
            cone.bounds(),
            Some(SurfaceBounds::Cone(ConeBounds::new(0.123, 10.0, 100.0)))
        );

        cone.assign_geometry_id(GeometryIdentifier::new(13));
        assert_eq!(cone.geometry_id(), Some(GeometryIdentifier::new(13)));
    }

    #[test]
    fn center_follows_translation() {
        let disc = DiscSurface::new(
            Transform::translation(1.0, 2.0, 3.0).then(&Transform::rotation_x(0.7)),
            RadialBounds::new(0.0, 4.0),
        );
        let c = disc.center(&gctx());
        assert_eq!(c, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn plane_accepts_both_planar_shapes() {
        let trap = PlaneSurface::new(Transform::identity(), TrapezoidBounds::new(2.0, 3.0, 4.0));
        assert_eq!(trap.bounds().map(|b| b.kind()), Some(BoundsKind::Trapezoid));

        let rect = PlaneSurface::new(Transform::identity(), RectangleBounds::centered(5.0, 5.0));
        assert_eq!(rect.bounds().map(|b| b.kind()), Some(BoundsKind::Rectangle));
    }

    #[test]
    fn perigee_has_no_bounds() {
        let perigee = PerigeeSurface::from_point(Point3::new(-1.0, -2.0, -7.0));
        assert!(perigee.bounds().is_none());
        assert_eq!(
            perigee.transform(&gctx()),
            &Transform::translation(-1.0, -2.0, -7.0)
        );
    }

    #[test]
    fn boxed_clone_keeps_concrete_type() {
        let mut straw = StrawSurface::new(Transform::identity(), LineBounds::new(1.0, 100.0));
        straw.assign_geometry_id(GeometryIdentifier::new(12));
        let boxed: Box<dyn Surface> = Box::new(straw.clone());
        let copy = boxed.clone();
        let concrete = copy
            .as_any()
            .downcast_ref::<StrawSurface>()
            .expect("straw surface");
        assert_eq!(concrete, &straw);
        assert!(copy.as_any().downcast_ref::<CylinderSurface>().is_none());
    }
}
