//! Reference objects and the slots that may hold them
//!
//! Any place where the OpenAPI specification accepts "X or a Reference
//! Object" is modeled as [`ReferenceOr<X>`]. Schema positions additionally
//! accept a [`Placeholder`], which stands in for an external type until
//! schema synthesis replaces it with a reference.

use indexmap::IndexMap;
use oas_forge_common::{TypeDescriptor, REF_PREFIX};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Specification extensions and any other unknown fields of an entity
pub type Extensions = IndexMap<String, Value>;

/// Reference Object
///
/// Allows referencing other components in the document, e.g.
/// `{"$ref": "#/components/schemas/Pet"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// The reference string
    #[serde(rename = "$ref", alias = "ref")]
    pub ref_path: String,

    /// Short summary overriding the referenced component's (3.1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Description overriding the referenced component's (3.1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Reference {
    pub fn new(ref_path: impl Into<String>) -> Self {
        Self {
            ref_path: ref_path.into(),
            summary: None,
            description: None,
            extensions: Extensions::new(),
        }
    }

    /// Reference into `#/components/schemas`
    pub fn schema(name: &str) -> Self {
        Self::new(format!("{}{}", REF_PREFIX, name))
    }

    /// Name of the referenced schema, if this points into `#/components/schemas`
    pub fn schema_name(&self) -> Option<&str> {
        self.ref_path.strip_prefix(REF_PREFIX)
    }
}

/// Whether a raw value has the shape of a Reference Object
pub(crate) fn is_reference(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("$ref") || map.contains_key("ref"))
}

/// Either a Reference Object or an inline item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReferenceOr<T> {
    Reference(Reference),
    Item(T),
}

impl<T> ReferenceOr<T> {
    pub fn as_item(&self) -> Option<&T> {
        match self {
            ReferenceOr::Item(item) => Some(item),
            ReferenceOr::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            ReferenceOr::Reference(reference) => Some(reference),
            ReferenceOr::Item(_) => None,
        }
    }
}

impl<T> From<Reference> for ReferenceOr<T> {
    fn from(reference: Reference) -> Self {
        ReferenceOr::Reference(reference)
    }
}

impl<'de, T> Deserialize<'de> for ReferenceOr<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if is_reference(&value) {
            Reference::deserialize(value)
                .map(ReferenceOr::Reference)
                .map_err(D::Error::custom)
        } else {
            T::deserialize(value)
                .map(ReferenceOr::Item)
                .map_err(D::Error::custom)
        }
    }
}

/// Marker for a schema that will be generated from an external type
///
/// Placeholders are built in code, never parsed. Schema synthesis replaces
/// each one with a reference to `#/components/schemas/<generated name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    pub descriptor: TypeDescriptor,
}

impl Placeholder {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self { descriptor }
    }

    /// The reference this placeholder turns into
    pub fn to_reference(&self) -> Reference {
        Reference::schema(&self.descriptor.generated_name())
    }
}

impl Serialize for Placeholder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("x-placeholder", &self.descriptor.generated_name())?;
        map.end()
    }
}

/// A schema position: inline schema, reference, or placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaOrRef<S> {
    Reference(Reference),
    Placeholder(Placeholder),
    Schema(Box<S>),
}

impl<S> SchemaOrRef<S> {
    pub fn schema(schema: S) -> Self {
        SchemaOrRef::Schema(Box::new(schema))
    }

    pub fn reference(ref_path: impl Into<String>) -> Self {
        SchemaOrRef::Reference(Reference::new(ref_path))
    }

    pub fn placeholder(descriptor: TypeDescriptor) -> Self {
        SchemaOrRef::Placeholder(Placeholder::new(descriptor))
    }

    pub fn as_schema(&self) -> Option<&S> {
        match self {
            SchemaOrRef::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            SchemaOrRef::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, SchemaOrRef::Placeholder(_))
    }
}

impl<S> From<Reference> for SchemaOrRef<S> {
    fn from(reference: Reference) -> Self {
        SchemaOrRef::Reference(reference)
    }
}

impl<S> From<Placeholder> for SchemaOrRef<S> {
    fn from(placeholder: Placeholder) -> Self {
        SchemaOrRef::Placeholder(placeholder)
    }
}

impl<'de, S> Deserialize<'de> for SchemaOrRef<S>
where
    S: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = match Value::deserialize(deserializer)? {
            // Boolean schemas: `true` accepts anything, `false` nothing
            Value::Bool(true) => Value::Object(Default::default()),
            Value::Bool(false) => serde_json::json!({ "not": {} }),
            other => other,
        };

        if is_reference(&value) {
            Reference::deserialize(value)
                .map(SchemaOrRef::Reference)
                .map_err(D::Error::custom)
        } else {
            S::deserialize(value)
                .map(SchemaOrRef::schema)
                .map_err(D::Error::custom)
        }
    }
}

/// A schema position that also accepts a plain boolean,
/// such as `additionalProperties`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoolOrSchema<S> {
    Bool(bool),
    Schema(SchemaOrRef<S>),
}

impl<'de, S> Deserialize<'de> for BoolOrSchema<S>
where
    S: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(flag) => Ok(BoolOrSchema::Bool(flag)),
            other => SchemaOrRef::deserialize(other)
                .map(BoolOrSchema::Schema)
                .map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Dummy {
        #[serde(default)]
        title: Option<String>,
    }

    #[test]
    fn test_reference_alias() {
        let canonical: Reference = serde_json::from_value(json!({"$ref": "#/dummy"})).unwrap();
        let internal: Reference = serde_json::from_value(json!({"ref": "#/dummy"})).unwrap();
        assert_eq!(canonical, internal);
        assert_eq!(canonical, Reference::new("#/dummy"));
        assert_eq!(serde_json::to_value(&internal).unwrap(), json!({"$ref": "#/dummy"}));
    }

    #[test]
    fn test_reference_keeps_unknown_fields() {
        let reference: Reference =
            serde_json::from_value(json!({"$ref": "#/a", "nullable": true})).unwrap();
        assert_eq!(reference.extensions.get("nullable"), Some(&json!(true)));
    }

    #[test]
    fn test_schema_or_ref_prefers_reference() {
        let slot: SchemaOrRef<Dummy> =
            serde_json::from_value(json!({"$ref": "#/components/schemas/Pet"})).unwrap();
        assert_eq!(
            slot.as_reference().and_then(Reference::schema_name),
            Some("Pet")
        );

        let slot: SchemaOrRef<Dummy> = serde_json::from_value(json!({"title": "x"})).unwrap();
        assert_eq!(slot.as_schema().and_then(|s| s.title.as_deref()), Some("x"));
    }

    #[test]
    fn test_boolean_schemas() {
        let slot: SchemaOrRef<Dummy> = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(slot.as_schema(), Some(&Dummy::default()));

        let extra: BoolOrSchema<Dummy> = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(extra, BoolOrSchema::Bool(false));
    }

    #[test]
    fn test_placeholder_serialization() {
        let slot: SchemaOrRef<Dummy> =
            SchemaOrRef::placeholder(TypeDescriptor::new("app", "Page[Pet]"));
        assert_eq!(
            serde_json::to_value(&slot).unwrap(),
            json!({"x-placeholder": "Page_Pet_"})
        );
        assert!(slot.is_placeholder());
    }
}
