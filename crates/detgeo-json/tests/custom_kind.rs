//! Registering surface kinds beyond the built-in set.

use std::any::Any;
use std::thread;

use detgeo_json::{required_bounds, SurfaceConverter, SurfaceFactory, SurfaceJsonError};
use detgeo_math::{GeometryContext, Transform};
use detgeo_surfaces::{
    BoundsKind, CylinderBounds, GeometryIdentifier, LineBounds, Surface, SurfaceBounds,
};
use serde_json::{json, Value};

/// Beam pipe modelled as its own kind so navigation can treat it specially.
#[derive(Debug, Clone, PartialEq)]
struct BeamPipeSurface {
    transform: Transform,
    bounds: CylinderBounds,
    geometry_id: Option<GeometryIdentifier>,
}

impl Surface for BeamPipeSurface {
    fn type_name(&self) -> &'static str {
        "BeamPipeSurface"
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

fn reconstruct_beam_pipe(
    transform: Transform,
    bounds: Option<&Value>,
) -> detgeo_json::Result<Box<dyn Surface>> {
    match required_bounds("BeamPipeSurface", bounds, &[BoundsKind::Cylinder])? {
        SurfaceBounds::Cylinder(bounds) => Ok(Box::new(BeamPipeSurface {
            transform,
            bounds,
            geometry_id: None,
        })),
        other => Err(SurfaceJsonError::format(
            "bounds",
            "BeamPipeSurface",
            format!("cannot be bounded by {}", other.kind()),
        )),
    }
}

fn converter_with_beam_pipe() -> SurfaceConverter {
    let mut converter = SurfaceConverter::default();
    converter
        .factory_mut()
        .register("BeamPipeSurface", reconstruct_beam_pipe);
    converter
}

fn beam_pipe() -> BeamPipeSurface {
    BeamPipeSurface {
        transform: Transform::identity(),
        bounds: CylinderBounds::new(25.0, 3000.0),
        geometry_id: Some(GeometryIdentifier::new(1)),
    }
}

#[test]
fn registered_kind_roundtrips() {
    let converter = converter_with_beam_pipe();
    let document = converter.to_document(&beam_pipe());
    assert_eq!(document["type"], json!("BeamPipeSurface"));

    let restored = converter.from_document(&document).unwrap();
    let concrete = restored
        .as_any()
        .downcast_ref::<BeamPipeSurface>()
        .expect("beam pipe surface");
    assert_eq!(concrete, &beam_pipe());
}

#[test]
fn unregistered_kind_is_unknown() {
    let document = converter_with_beam_pipe().to_document(&beam_pipe());
    let err = SurfaceConverter::default()
        .from_document(&document)
        .unwrap_err();
    assert!(err.is_unknown_kind());
}

#[test]
fn registered_kind_checks_its_bounds() {
    let converter = converter_with_beam_pipe();
    let mut document = converter.to_document(&beam_pipe());
    document["bounds"] = json!({"type": "LineBounds", "values": [1.0, 100.0]});
    let err = converter.from_document(&document).unwrap_err();
    assert!(err.is_format());
    assert!(err.to_string().contains("BeamPipeSurface"));
}

#[test]
fn factory_with_only_custom_kinds() {
    let mut factory = SurfaceFactory::new();
    factory.register("BeamPipeSurface", reconstruct_beam_pipe);
    let converter = SurfaceConverter::new(factory, Default::default());
    assert_eq!(converter.factory().kinds(), vec!["BeamPipeSurface"]);

    let straw = detgeo_surfaces::StrawSurface::new(Transform::identity(), LineBounds::new(1.0, 2.0));
    let document = converter.to_document(&straw);
    assert!(converter.from_document(&document).unwrap_err().is_unknown_kind());
}

#[test]
fn shared_converter_decodes_concurrently() {
    let converter = converter_with_beam_pipe();
    let documents: Vec<Value> = (0..8u64)
        .map(|i| {
            let mut pipe = beam_pipe();
            pipe.geometry_id = Some(GeometryIdentifier::new(100 + i));
            converter.to_document(&pipe)
        })
        .collect();

    thread::scope(|scope| {
        for (i, document) in documents.iter().enumerate() {
            let converter = &converter;
            scope.spawn(move || {
                let surface = converter.from_document(document).unwrap();
                assert_eq!(
                    surface.geometry_id(),
                    Some(GeometryIdentifier::new(100 + i as u64))
                );
            });
        }
    });
}
