//! OpenAPI 3.0 Schema Object
//!
//! An extended subset of JSON Schema Wright Draft 00. Compared to 3.1 it
//! expresses nullability with `nullable`, uses boolean exclusive bounds, and
//! allows a single `type` only.

use crate::entity::Entity;
use crate::reference::{BoolOrSchema, Extensions, SchemaOrRef};
use crate::shared::{Discriminator, ExternalDocumentation, Xml};
use crate::walk::{Walk, Walker};
use indexmap::IndexMap;
use oas_forge_common::{ModelError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Primitive data types; 3.0 has no `null` type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Integer => "integer",
            DataType::Boolean => "boolean",
            DataType::Array => "array",
            DataType::Object => "object",
        };
        f.write_str(name)
    }
}

/// Definition of an input or output data type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "multipleOf")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    /// When true, `maximum` itself is excluded
    #[serde(rename = "exclusiveMaximum")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    /// When true, `minimum` itself is excluded
    #[serde(rename = "exclusiveMinimum")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,

    #[serde(rename = "maxLength")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(rename = "minLength")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    /// ECMA 262 regular expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "maxItems")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(rename = "minItems")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(rename = "uniqueItems")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(rename = "maxProperties")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,

    #[serde(rename = "minProperties")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(rename = "enum", alias = "schema_enum")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_enum: Option<Vec<Value>>,

    #[serde(rename = "type", alias = "schema_type")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<DataType>,

    #[serde(rename = "allOf")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaOrRef<Schema>>>,

    #[serde(rename = "oneOf")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaOrRef<Schema>>>,

    #[serde(rename = "anyOf")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaOrRef<Schema>>>,

    #[serde(rename = "not", alias = "schema_not")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_not: Option<SchemaOrRef<Schema>>,

    /// Required when `type` is `array`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaOrRef<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaOrRef<Schema>>>,

    #[serde(rename = "additionalProperties")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<BoolOrSchema<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "format", alias = "schema_format")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Allows `null` in addition to the declared type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,

    #[serde(rename = "readOnly")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(rename = "writeOnly")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<Xml>,

    #[serde(rename = "externalDocs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Schema {
    /// Schema with only `type` set
    pub fn of_type(schema_type: DataType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }
}

impl Walk for Schema {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.all_of)?;
        walker.descend(&mut self.one_of)?;
        walker.descend(&mut self.any_of)?;
        walker.descend(&mut self.schema_not)?;
        walker.descend(&mut self.items)?;
        walker.descend(&mut self.properties)?;
        walker.descend(&mut self.additional_properties)
    }
}

impl Entity for Schema {}

/// Validate a raw mapping as a 3.0 schema position
pub fn schema_validate(value: Value) -> Result<SchemaOrRef<Schema>> {
    serde_json::from_value(value)
        .map_err(|e| ModelError::SchemaMismatch(format!("Not a valid OpenAPI 3.0 schema: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_schema_aliases() {
        let canonical = schema_validate(json!({
            "type": "string",
            "format": "uuid",
            "enum": ["a"],
            "not": {"type": "integer"}
        }))
        .unwrap();
        let internal = schema_validate(json!({
            "schema_type": "string",
            "schema_format": "uuid",
            "schema_enum": ["a"],
            "schema_not": {"schema_type": "integer"}
        }))
        .unwrap();
        assert_eq!(canonical, internal);
    }

    #[test]
    fn test_nullable_and_boolean_bounds() {
        let slot = schema_validate(json!({
            "type": "integer",
            "minimum": 0,
            "exclusiveMinimum": true,
            "nullable": true
        }))
        .unwrap();
        let schema = slot.as_schema().unwrap();
        assert_eq!(schema.exclusive_minimum, Some(true));
        assert_eq!(schema.nullable, Some(true));
        assert_eq!(schema.minimum, Some(Number::from(0)));
    }

    #[test]
    fn test_null_type_is_rejected() {
        let err = schema_validate(json!({"type": "null"})).unwrap_err();
        assert!(matches!(err, ModelError::SchemaMismatch(_)));
    }

    #[test]
    fn test_additional_properties_forms() {
        let slot = schema_validate(json!({
            "type": "object",
            "additionalProperties": {"$ref": "#/components/schemas/Pet"}
        }))
        .unwrap();
        let extra = slot.as_schema().unwrap().additional_properties.as_ref();
        assert!(matches!(extra, Some(BoolOrSchema::Schema(SchemaOrRef::Reference(_)))));

        let slot = schema_validate(json!({"additionalProperties": false})).unwrap();
        assert_eq!(
            slot.as_schema().unwrap().additional_properties,
            Some(BoolOrSchema::Bool(false))
        );
    }
}
