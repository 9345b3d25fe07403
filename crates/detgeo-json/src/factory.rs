//! Surface factory: maps a surface type tag to the routine that rebuilds it.

use std::collections::HashMap;
use std::fmt;

use detgeo_math::Transform;
use detgeo_surfaces::{
    BoundsKind, ConeSurface, CylinderSurface, DiscSurface, PerigeeSurface, PlanarBounds,
    PlaneSurface, StrawSurface, Surface, SurfaceBounds,
};
use serde_json::Value;
use tracing::warn;

use crate::bounds::decode_bounds;
use crate::error::{Result, SurfaceJsonError};
use crate::{BOUNDS_KEY, TYPE_KEY};

/// Rebuilds one concrete surface kind from its decoded transform and raw
/// bounds fragment. The identifier is stamped afterwards by the converter.
pub type Reconstructor =
    Box<dyn Fn(Transform, Option<&Value>) -> Result<Box<dyn Surface>> + Send + Sync>;

/// Registry of surface reconstructors keyed by type tag.
///
/// Registration takes `&mut self`; set the factory up before sharing it
/// between threads.
pub struct SurfaceFactory {
    reconstructors: HashMap<String, Reconstructor>,
}

impl SurfaceFactory {
    /// An empty factory with no kinds registered.
    pub fn new() -> Self {
        Self {
            reconstructors: HashMap::new(),
        }
    }

    /// A factory with the cone, disc, cylinder, plane, straw and perigee
    /// kinds registered.
    pub fn with_builtin_kinds() -> Self {
        let mut factory = Self::new();
        factory.register(ConeSurface::TYPE_NAME, reconstruct_cone);
        factory.register(DiscSurface::TYPE_NAME, reconstruct_disc);
        factory.register(CylinderSurface::TYPE_NAME, reconstruct_cylinder);
        factory.register(PlaneSurface::TYPE_NAME, reconstruct_plane);
        factory.register(StrawSurface::TYPE_NAME, reconstruct_straw);
        factory.register(PerigeeSurface::TYPE_NAME, reconstruct_perigee);
        factory
    }

    /// Register `reconstructor` for `tag`, returning any routine it replaces.
    pub fn register<F>(&mut self, tag: impl Into<String>, reconstructor: F) -> Option<Reconstructor>
    where
        F: Fn(Transform, Option<&Value>) -> Result<Box<dyn Surface>> + Send + Sync + 'static,
    {
        let tag = tag.into();
        let previous = self.reconstructors.insert(tag.clone(), Box::new(reconstructor));
        if previous.is_some() {
            warn!(kind = %tag, "replacing registered surface reconstructor");
        }
        previous
    }

    /// Whether `tag` has a registered reconstructor.
    pub fn contains(&self, tag: &str) -> bool {
        self.reconstructors.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.reconstructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Rebuild a surface of kind `tag`.
    pub fn reconstruct(
        &self,
        tag: &str,
        transform: Transform,
        bounds: Option<&Value>,
    ) -> Result<Box<dyn Surface>> {
        let reconstructor = self
            .reconstructors
            .get(tag)
            .ok_or_else(|| SurfaceJsonError::unknown_kind(TYPE_KEY, tag))?;
        reconstructor(transform, bounds)
    }
}

impl Default for SurfaceFactory {
    fn default() -> Self {
        Self::with_builtin_kinds()
    }
}

impl fmt::Debug for SurfaceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceFactory")
            .field("kinds", &self.kinds())
            .finish()
    }
}

// =============================================================================
// Built-in reconstructors
// =============================================================================

/// Decode the bounds a bounded surface kind requires.
///
/// An absent or `null` fragment is a format error for `surface`.
pub fn required_bounds(
    surface: &str,
    fragment: Option<&Value>,
    accepted: &[BoundsKind],
) -> Result<SurfaceBounds> {
    match fragment {
        Some(fragment) if !fragment.is_null() => {
            decode_bounds(fragment, Some(accepted)).map_err(|e| e.in_surface(surface))
        }
        _ => Err(SurfaceJsonError::format(
            BOUNDS_KEY,
            surface,
            "missing bounds for a bounded surface",
        )),
    }
}

fn unexpected_bounds(surface: &str, bounds: SurfaceBounds) -> SurfaceJsonError {
    SurfaceJsonError::format(
        BOUNDS_KEY,
        surface,
        format!("cannot be bounded by {}", bounds.kind()),
    )
}

fn reconstruct_cone(transform: Transform, bounds: Option<&Value>) -> Result<Box<dyn Surface>> {
    let kind = ConeSurface::TYPE_NAME;
    match required_bounds(kind, bounds, &[BoundsKind::Cone])? {
        SurfaceBounds::Cone(b) => Ok(Box::new(ConeSurface::new(transform, b))),
        other => Err(unexpected_bounds(kind, other)),
    }
}

fn reconstruct_disc(transform: Transform, bounds: Option<&Value>) -> Result<Box<dyn Surface>> {
    let kind = DiscSurface::TYPE_NAME;
    match required_bounds(kind, bounds, &[BoundsKind::Radial])? {
        SurfaceBounds::Radial(b) => Ok(Box::new(DiscSurface::new(transform, b))),
        other => Err(unexpected_bounds(kind, other)),
    }
}

fn reconstruct_cylinder(transform: Transform, bounds: Option<&Value>) -> Result<Box<dyn Surface>> {
    let kind = CylinderSurface::TYPE_NAME;
    match required_bounds(kind, bounds, &[BoundsKind::Cylinder])? {
        SurfaceBounds::Cylinder(b) => Ok(Box::new(CylinderSurface::new(transform, b))),
        other => Err(unexpected_bounds(kind, other)),
    }
}

fn reconstruct_plane(transform: Transform, bounds: Option<&Value>) -> Result<Box<dyn Surface>> {
    let kind = PlaneSurface::TYPE_NAME;
    let bounds = required_bounds(kind, bounds, &PlanarBounds::KINDS)?;
    let planar = PlanarBounds::try_from(bounds).map_err(|_| unexpected_bounds(kind, bounds))?;
    Ok(Box::new(PlaneSurface::new(transform, planar)))
}

fn reconstruct_straw(transform: Transform, bounds: Option<&Value>) -> Result<Box<dyn Surface>> {
    let kind = StrawSurface::TYPE_NAME;
    match required_bounds(kind, bounds, &[BoundsKind::Line])? {
        SurfaceBounds::Line(b) => Ok(Box::new(StrawSurface::new(transform, b))),
        other => Err(unexpected_bounds(kind, other)),
    }
}

fn reconstruct_perigee(transform: Transform, bounds: Option<&Value>) -> Result<Box<dyn Surface>> {
    match bounds {
        Some(fragment) if !fragment.is_null() => Err(SurfaceJsonError::format(
            BOUNDS_KEY,
            PerigeeSurface::TYPE_NAME,
            "perigee surfaces are unbounded",
        )),
        _ => Ok(Box::new(PerigeeSurface::new(transform))),
    }
}
