//! Descriptive entities: contacts, tags, servers, external docs, examples

use crate::entity::impl_entity;
use crate::reference::Extensions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Contact information for the exposed API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Identifying name of the contact person/organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Reference to external documentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocumentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// URL of the target documentation
    pub url: String,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Metadata for a single tag used by operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "externalDocs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A server hosting the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL, possibly templated with `{variables}`
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Substitution values for the URL template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<IndexMap<String, ServerVariable>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
            variables: None,
            extensions: Extensions::new(),
        }
    }
}

/// A variable for server URL template substitution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    #[serde(rename = "enum", alias = "enum_values")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    pub default: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Example Object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Embedded literal example
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// URL pointing to the literal example
    #[serde(rename = "externalValue")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// XML representation hints for a schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Xml {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<bool>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Hint for telling polymorphic payloads apart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discriminator {
    #[serde(rename = "propertyName")]
    pub property_name: String,

    /// Payload values mapped to schema names or references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<IndexMap<String, String>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl_entity!(
    Contact,
    ExternalDocumentation,
    Tag,
    Server,
    ServerVariable,
    Example,
    Xml,
    Discriminator,
);
