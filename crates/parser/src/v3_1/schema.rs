//! OpenAPI 3.1 Schema Object
//!
//! A superset of JSON Schema Draft 2020-12. Keywords are grouped below the
//! way the 2020-12 vocabularies group them.

use crate::entity::Entity;
use crate::reference::{BoolOrSchema, Extensions, SchemaOrRef};
use crate::shared::{Discriminator, ExternalDocumentation, Xml};
use crate::walk::{Walk, Walker};
use indexmap::IndexMap;
use oas_forge_common::{ModelError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Primitive data types, including `null`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Null,
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
            DataType::Null => "null",
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

/// Value of the `type` keyword: one type or a list of types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(DataType),
    Multiple(Vec<DataType>),
}

impl SchemaType {
    pub fn contains(&self, data_type: DataType) -> bool {
        match self {
            SchemaType::Single(single) => *single == data_type,
            SchemaType::Multiple(types) => types.contains(&data_type),
        }
    }
}

impl From<DataType> for SchemaType {
    fn from(data_type: DataType) -> Self {
        SchemaType::Single(data_type)
    }
}

/// Definition of an input or output data type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    // Core vocabulary
    #[serde(rename = "$schema")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_dialect: Option<String>,

    #[serde(rename = "$vocabulary")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<IndexMap<String, bool>>,

    #[serde(rename = "$id")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "$anchor")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    #[serde(rename = "$dynamicAnchor")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_anchor: Option<String>,

    /// Only reachable when built in code; parsed `$ref` objects become
    /// [`crate::reference::Reference`] slots
    #[serde(rename = "$ref", alias = "ref")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    #[serde(rename = "$dynamicRef")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_ref: Option<String>,

    #[serde(rename = "$defs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defs: Option<IndexMap<String, SchemaOrRef<Schema>>>,

    #[serde(rename = "$comment")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    // Applicators
    #[serde(rename = "allOf")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaOrRef<Schema>>>,

    #[serde(rename = "anyOf")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaOrRef<Schema>>>,

    #[serde(rename = "oneOf")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaOrRef<Schema>>>,

    #[serde(rename = "not", alias = "schema_not")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_not: Option<SchemaOrRef<Schema>>,

    #[serde(rename = "if", alias = "schema_if")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_if: Option<SchemaOrRef<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<SchemaOrRef<Schema>>,

    #[serde(rename = "else", alias = "schema_else")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_else: Option<SchemaOrRef<Schema>>,

    #[serde(rename = "dependentSchemas")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_schemas: Option<IndexMap<String, SchemaOrRef<Schema>>>,

    #[serde(rename = "prefixItems")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_items: Option<Vec<SchemaOrRef<Schema>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaOrRef<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<SchemaOrRef<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaOrRef<Schema>>>,

    #[serde(rename = "patternProperties")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_properties: Option<IndexMap<String, SchemaOrRef<Schema>>>,

    #[serde(rename = "additionalProperties")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<BoolOrSchema<Schema>>,

    #[serde(rename = "propertyNames")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_names: Option<SchemaOrRef<Schema>>,

    #[serde(rename = "unevaluatedItems")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unevaluated_items: Option<BoolOrSchema<Schema>>,

    #[serde(rename = "unevaluatedProperties")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unevaluated_properties: Option<BoolOrSchema<Schema>>,

    // Validation
    #[serde(rename = "type", alias = "schema_type")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(rename = "enum", alias = "schema_enum")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_enum: Option<Vec<Value>>,

    #[serde(rename = "const")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,

    #[serde(rename = "multipleOf")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    #[serde(rename = "exclusiveMaximum")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    #[serde(rename = "exclusiveMinimum")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<Number>,

    #[serde(rename = "maxLength")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(rename = "minLength")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

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

    #[serde(rename = "maxContains")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_contains: Option<u64>,

    #[serde(rename = "minContains")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_contains: Option<u64>,

    #[serde(rename = "maxProperties")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,

    #[serde(rename = "minProperties")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(rename = "dependentRequired")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_required: Option<IndexMap<String, Vec<String>>>,

    // Format and content
    #[serde(rename = "format", alias = "schema_format")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_format: Option<String>,

    #[serde(rename = "contentEncoding")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,

    #[serde(rename = "contentMediaType")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_media_type: Option<String>,

    #[serde(rename = "contentSchema")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_schema: Option<SchemaOrRef<Schema>>,

    // Meta-data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(rename = "readOnly")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(rename = "writeOnly")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,

    // OpenAPI vocabulary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<Xml>,

    #[serde(rename = "externalDocs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,

    /// Deprecated in favor of `examples`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Schema {
    /// Schema with only `type` set
    pub fn of_type(schema_type: impl Into<SchemaType>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }
}

impl Walk for Schema {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.defs)?;
        walker.descend(&mut self.all_of)?;
        walker.descend(&mut self.any_of)?;
        walker.descend(&mut self.one_of)?;
        walker.descend(&mut self.schema_not)?;
        walker.descend(&mut self.schema_if)?;
        walker.descend(&mut self.then)?;
        walker.descend(&mut self.schema_else)?;
        walker.descend(&mut self.dependent_schemas)?;
        walker.descend(&mut self.prefix_items)?;
        walker.descend(&mut self.items)?;
        walker.descend(&mut self.contains)?;
        walker.descend(&mut self.properties)?;
        walker.descend(&mut self.pattern_properties)?;
        walker.descend(&mut self.additional_properties)?;
        walker.descend(&mut self.property_names)?;
        walker.descend(&mut self.unevaluated_items)?;
        walker.descend(&mut self.unevaluated_properties)?;
        walker.descend(&mut self.content_schema)
    }
}

impl Entity for Schema {}

/// Validate a raw mapping as a 3.1 schema position
pub fn schema_validate(value: Value) -> Result<SchemaOrRef<Schema>> {
    serde_json::from_value(value)
        .map_err(|e| ModelError::SchemaMismatch(format!("Not a valid OpenAPI 3.1 schema: {}", e)))
}
