//! External type descriptors
//!
//! A [`TypeDescriptor`] identifies a type that lives outside the document
//! model (usually a Rust type with a JSON Schema implementation). Placeholders
//! in a document point at descriptors; schema synthesis turns each distinct
//! descriptor into one entry of `#/components/schemas`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which side of a type's wire contract a schema describes
///
/// In validation mode computed fields are left out and optional fields stay
/// optional. In serialization mode computed fields are included and required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonSchemaMode {
    #[default]
    Validation,
    Serialization,
}

impl fmt::Display for JsonSchemaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonSchemaMode::Validation => write!(f, "validation"),
            JsonSchemaMode::Serialization => write!(f, "serialization"),
        }
    }
}

/// Opaque identity of an external type
///
/// Two descriptors that compare equal are the same logical schema. The
/// requested [`mode`](Self::mode) is a property of the type, not part of its
/// identity: equality, hashing and ordering only look at the names.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Namespace the type is declared in (e.g., "app::models")
    pub module: String,

    /// Simple name of the type (e.g., "Pet")
    pub name: String,

    /// Declared local name; differs from `name` for nested or
    /// parametrized types (e.g., "Outer.Pet" or "Page[Pet]")
    pub qualified_name: String,

    /// Schema mode requested for this type
    pub mode: JsonSchemaMode,
}

impl TypeDescriptor {
    /// Create a descriptor whose declared name equals its simple name
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            module: module.into(),
            qualified_name: name.clone(),
            name,
            mode: JsonSchemaMode::default(),
        }
    }

    /// Set the declared local name
    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = qualified_name.into();
        self
    }

    /// Set the schema mode
    pub fn with_mode(mut self, mode: JsonSchemaMode) -> Self {
        self.mode = mode;
        self
    }

    /// Registry key for this type
    ///
    /// The namespace is only prepended when the declared name differs from
    /// the simple name. The result is safe to embed in a JSON reference.
    ///
    /// # Example
    /// ```
    /// use oas_forge_common::TypeDescriptor;
    ///
    /// let plain = TypeDescriptor::new("app.models", "Generic[Inner]");
    /// assert_eq!(plain.generated_name(), "Generic_Inner_");
    ///
    /// let nested = TypeDescriptor::new("app.models", "Pet").with_qualified_name("Store.Pet");
    /// assert_eq!(nested.generated_name(), "app__models__Store__Pet");
    /// ```
    pub fn generated_name(&self) -> String {
        if self.qualified_name != self.name {
            sanitize_ref_name(&format!("{}.{}", self.module, self.qualified_name))
        } else {
            sanitize_ref_name(&self.name)
        }
    }
}

impl TypeDescriptor {
    fn identity(&self) -> (&str, &str, &str) {
        (&self.module, &self.name, &self.qualified_name)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for TypeDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} ({})", self.module, self.qualified_name, self.mode)
    }
}

/// Make a name usable as a `$ref` path segment
///
/// Every character outside `[A-Za-z0-9.\-_]` becomes `_`, then each `.`
/// becomes `__`.
pub fn sanitize_ref_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .replace('.', "__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_brackets() {
        assert_eq!(sanitize_ref_name("Generic[Inner]"), "Generic_Inner_");
        assert_eq!(
            sanitize_ref_name("Page[Generic[Inner], str]"),
            "Page_Generic_Inner___str_"
        );
    }

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_ref_name("Pet-v2_final"), "Pet-v2_final");
        assert_eq!(sanitize_ref_name("a.b"), "a__b");
        assert_eq!(sanitize_ref_name("Größe"), "Gr__e");
    }

    #[test]
    fn test_generated_name_simple() {
        let descriptor = TypeDescriptor::new("app::models", "PingRequest");
        assert_eq!(descriptor.generated_name(), "PingRequest");
    }

    #[test]
    fn test_generated_name_qualified() {
        let descriptor =
            TypeDescriptor::new("app::models", "Inner").with_qualified_name("Outer.Inner");
        assert_eq!(descriptor.generated_name(), "app__models__Outer__Inner");
    }

    #[test]
    fn test_mode_is_not_part_of_identity() {
        let validation = TypeDescriptor::new("app", "Sample");
        let serialization = validation.clone().with_mode(JsonSchemaMode::Serialization);
        assert_eq!(validation, serialization);
        assert_eq!(validation.cmp(&serialization), Ordering::Equal);

        let mut seen = std::collections::HashSet::new();
        seen.insert(validation);
        assert!(!seen.insert(serialization));
    }

    #[test]
    fn test_qualified_name_is_part_of_identity() {
        let plain = TypeDescriptor::new("app", "Pet");
        let nested = plain.clone().with_qualified_name("Store.Pet");
        assert_ne!(plain, nested);
    }
}
