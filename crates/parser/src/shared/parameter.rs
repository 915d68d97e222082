//! Operation parameters and headers

use super::content::MediaType;
use super::metadata::Example;
use crate::entity::impl_entity;
use crate::reference::{Extensions, ReferenceOr, SchemaOrRef};
use crate::walk::{Walk, Walker};
use indexmap::IndexMap;
use oas_forge_common::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Where a parameter lives in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Cookie => write!(f, "cookie"),
        }
    }
}

/// A single operation parameter, unique by name and location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct Parameter<S> {
    pub name: String,

    #[serde(rename = "in", alias = "param_in")]
    pub param_in: ParameterLocation,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Must be true for path parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(rename = "allowEmptyValue")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,

    /// Serialization style, e.g. "form" or "simple"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    #[serde(rename = "allowReserved")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,

    #[serde(rename = "schema", alias = "param_schema")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_schema: Option<SchemaOrRef<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<IndexMap<String, ReferenceOr<Example>>>,

    /// Alternative to `schema` for complex serialization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType<S>>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl<S> Parameter<S> {
    pub fn new(name: impl Into<String>, param_in: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            param_in,
            description: None,
            required: None,
            deprecated: None,
            allow_empty_value: None,
            style: None,
            explode: None,
            allow_reserved: None,
            param_schema: None,
            example: None,
            examples: None,
            content: None,
            extensions: Extensions::new(),
        }
    }

    pub fn with_schema(mut self, schema: impl Into<SchemaOrRef<S>>) -> Self {
        self.param_schema = Some(schema.into());
        self
    }
}

impl<S: Walk> Walk for Parameter<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.param_schema)?;
        walker.descend(&mut self.content)
    }
}

/// Header Object
///
/// Follows the Parameter Object without `name` (given by the map key) and
/// `in` (implicitly `header`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct Header<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    #[serde(rename = "schema", alias = "param_schema")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_schema: Option<SchemaOrRef<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<IndexMap<String, ReferenceOr<Example>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType<S>>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl<S> Default for Header<S> {
    fn default() -> Self {
        Self {
            description: None,
            required: None,
            deprecated: None,
            style: None,
            explode: None,
            param_schema: None,
            example: None,
            examples: None,
            content: None,
            extensions: Extensions::new(),
        }
    }
}

impl<S: Walk> Walk for Header<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.param_schema)?;
        walker.descend(&mut self.content)
    }
}

impl_entity!(generic: Parameter, Header);
