//! Opaque geometry identifiers.

use std::fmt;

/// Lookup key assigned to a surface within a detector geometry.
///
/// The value has no internal structure as far as this crate is concerned:
/// it is compared for equality and carried through serialization unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GeometryIdentifier(u64);

impl GeometryIdentifier {
    /// Wrap a raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for GeometryIdentifier {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<GeometryIdentifier> for u64 {
    fn from(id: GeometryIdentifier) -> Self {
        id.0
    }
}

impl fmt::Display for GeometryIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_roundtrip() {
        let id = GeometryIdentifier::new(13);
        assert_eq!(id.value(), 13);
        assert_eq!(u64::from(id), 13);
        assert_eq!(GeometryIdentifier::from(13u64), id);
        assert_eq!(id.to_string(), "13");
    }

    #[test]
    fn full_u64_domain() {
        let max = GeometryIdentifier::new(u64::MAX);
        assert_eq!(max.value(), u64::MAX);
        assert!(GeometryIdentifier::new(0) < max);
    }
}
