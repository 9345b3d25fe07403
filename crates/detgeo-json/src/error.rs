//! Error types for surface JSON conversion.

use thiserror::Error;

/// Errors that can occur while decoding surface documents.
///
/// Encoding never fails; every variant here comes from a decode path.
#[derive(Error, Debug)]
pub enum SurfaceJsonError {
    /// A type tag that is neither built in nor registered.
    #[error("unknown {field} `{kind}`")]
    UnknownKind {
        /// Field holding the tag (`type` or `bounds.type`).
        field: String,
        /// The unrecognized tag.
        kind: String,
    },

    /// Structural defect: missing field, wrong arity, wrong value type.
    #[error("{kind}: malformed `{field}`: {message}")]
    Format {
        /// Offending field.
        field: String,
        /// Kind being decoded when the defect was found.
        kind: String,
        /// Error message.
        message: String,
    },

    /// Value outside the field's domain.
    #[error("`{field}` out of range: {value}")]
    Range {
        /// Offending field.
        field: String,
        /// The rejected value as written in the document.
        value: String,
    },

    /// Text could not be parsed as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One entry of a surface array failed to decode.
    #[error("surface entry {index}: {source}")]
    Entry {
        /// Position in the array.
        index: usize,
        /// The entry's error.
        source: Box<SurfaceJsonError>,
    },
}

impl SurfaceJsonError {
    /// Create an unknown kind error.
    pub fn unknown_kind(field: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnknownKind {
            field: field.into(),
            kind: kind.into(),
        }
    }

    /// Create a format error.
    pub fn format(
        field: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Format {
            field: field.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a range error.
    pub fn range(field: impl Into<String>, value: impl ToString) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Qualify a format error with the surface kind it occurred in.
    pub(crate) fn in_surface(self, surface: &str) -> Self {
        match self {
            Self::Format {
                field,
                kind,
                message,
            } if kind != surface => Self::Format {
                field,
                kind: format!("{surface}/{kind}"),
                message,
            },
            other => other,
        }
    }

    /// Whether this is (or wraps) an [`SurfaceJsonError::UnknownKind`].
    pub fn is_unknown_kind(&self) -> bool {
        match self {
            Self::UnknownKind { .. } => true,
            Self::Entry { source, .. } => source.is_unknown_kind(),
            _ => false,
        }
    }

    /// Whether this is (or wraps) an [`SurfaceJsonError::Format`].
    pub fn is_format(&self) -> bool {
        match self {
            Self::Format { .. } => true,
            Self::Entry { source, .. } => source.is_format(),
            _ => false,
        }
    }
}

/// Result alias for surface JSON conversion.
pub type Result<T> = std::result::Result<T, SurfaceJsonError>;
