//! Surface converter: whole surfaces to and from JSON documents.

use std::sync::OnceLock;

use detgeo_math::GeometryContext;
use detgeo_surfaces::Surface;
use serde_json::{Map, Value};
use tracing::debug;

use crate::bounds::encode_bounds;
use crate::error::{Result, SurfaceJsonError};
use crate::factory::SurfaceFactory;
use crate::identifier::{decode_identifier, encode_identifier};
use crate::options::ConverterOptions;
use crate::transform::{decode_transform, encode_transform};
use crate::{BOUNDS_KEY, GEOMETRY_ID_KEY, TRANSFORM_KEY, TYPE_KEY};

const DOCUMENT: &str = "SurfaceDocument";

/// Converts surfaces to JSON documents and back.
///
/// Decoding dispatches on the document's `type` through the
/// [`SurfaceFactory`], so custom kinds only need to be registered there.
#[derive(Debug, Default)]
pub struct SurfaceConverter {
    factory: SurfaceFactory,
    options: ConverterOptions,
}

impl SurfaceConverter {
    /// Create a converter from a factory and options.
    pub fn new(factory: SurfaceFactory, options: ConverterOptions) -> Self {
        Self { factory, options }
    }

    /// Built-in kinds with the given options.
    pub fn with_options(options: ConverterOptions) -> Self {
        Self::new(SurfaceFactory::with_builtin_kinds(), options)
    }

    /// The factory used for decoding.
    pub fn factory(&self) -> &SurfaceFactory {
        &self.factory
    }

    /// Mutable factory access, for registering kinds before use.
    pub fn factory_mut(&mut self) -> &mut SurfaceFactory {
        &mut self.factory
    }

    /// The active options.
    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Encode a surface.
    ///
    /// Writes `type` and `transform` always, `bounds` only for bounded kinds
    /// and `geometryId` only once an identifier has been assigned. The
    /// transform is read under the nominal geometry context.
    pub fn to_document(&self, surface: &dyn Surface) -> Value {
        let gctx = GeometryContext::nominal();
        debug!(kind = surface.type_name(), "encoding surface");

        let mut document = Map::new();
        document.insert(TYPE_KEY.into(), Value::from(surface.type_name()));
        document.insert(
            TRANSFORM_KEY.into(),
            encode_transform(surface.transform(&gctx), self.options.transform_layout),
        );
        if let Some(bounds) = surface.bounds() {
            document.insert(BOUNDS_KEY.into(), encode_bounds(&bounds));
        }
        if let Some(id) = surface.geometry_id() {
            document.insert(GEOMETRY_ID_KEY.into(), encode_identifier(id));
        }
        Value::Object(document)
    }

    /// Decode a surface, recovering its concrete kind from `type`.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_document(&self, document: &Value) -> Result<Box<dyn Surface>> {
        let object = document.as_object().ok_or_else(|| {
            SurfaceJsonError::format(
                "document",
                DOCUMENT,
                format!("expected an object, got {document}"),
            )
        })?;

        // a missing or non-string tag names no registered kind
        let kind = match object.get(TYPE_KEY) {
            Some(Value::String(kind)) => kind.as_str(),
            Some(other) => {
                return Err(SurfaceJsonError::unknown_kind(TYPE_KEY, other.to_string()))
            }
            None => return Err(SurfaceJsonError::unknown_kind(TYPE_KEY, "")),
        };
        if !self.factory.contains(kind) {
            return Err(SurfaceJsonError::unknown_kind(TYPE_KEY, kind));
        }
        debug!(kind, "decoding surface");

        let transform = object
            .get(TRANSFORM_KEY)
            .ok_or_else(|| SurfaceJsonError::format(TRANSFORM_KEY, kind, "missing field"))
            .and_then(decode_transform)
            .map_err(|e| e.in_surface(kind))?;

        let geometry_id = match object.get(GEOMETRY_ID_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => Some(decode_identifier(value).map_err(|e| e.in_surface(kind))?),
        };

        let mut surface = self
            .factory
            .reconstruct(kind, transform, object.get(BOUNDS_KEY))?;
        if let Some(id) = geometry_id {
            surface.assign_geometry_id(id);
        }
        Ok(surface)
    }

    /// Encode a surface as pretty-printed JSON text.
    pub fn to_json_string(&self, surface: &dyn Surface) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document(surface))?)
    }

    /// Parse JSON text and decode the surface in it.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_json_str(&self, json: &str) -> Result<Box<dyn Surface>> {
        let document: Value = serde_json::from_str(json)?;
        self.from_document(&document)
    }

    /// Encode several surfaces as a JSON array.
    pub fn surfaces_to_document(&self, surfaces: &[Box<dyn Surface>]) -> Value {
        Value::Array(
            surfaces
                .iter()
                .map(|s| self.to_document(s.as_ref()))
                .collect(),
        )
    }

    /// Decode a JSON array of surface documents.
    ///
    /// Stops at the first entry that fails, reporting its index.
    pub fn surfaces_from_document(&self, document: &Value) -> Result<Vec<Box<dyn Surface>>> {
        let entries = document.as_array().ok_or_else(|| {
            SurfaceJsonError::format(
                "document",
                DOCUMENT,
                format!("expected an array, got {document}"),
            )
        })?;
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                self.from_document(entry)
                    .map_err(|source| SurfaceJsonError::Entry {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect()
    }
}

fn default_converter() -> &'static SurfaceConverter {
    static CONVERTER: OnceLock<SurfaceConverter> = OnceLock::new();
    CONVERTER.get_or_init(SurfaceConverter::default)
}

/// Encode a surface with the built-in kinds and default options.
pub fn surface_to_json(surface: &dyn Surface) -> Value {
    default_converter().to_document(surface)
}

/// Decode a surface with the built-in kinds and default options.
pub fn surface_from_json(document: &Value) -> Result<Box<dyn Surface>> {
    default_converter().from_document(document)
}
