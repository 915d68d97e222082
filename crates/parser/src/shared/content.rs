//! Media types and their encodings

use super::metadata::Example;
use super::parameter::Header;
use crate::entity::impl_entity;
use crate::reference::{Extensions, ReferenceOr, SchemaOrRef};
use crate::walk::{Walk, Walker};
use indexmap::IndexMap;
use oas_forge_common::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema and examples for one media type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct MediaType<S> {
    #[serde(rename = "schema", alias = "media_type_schema")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type_schema: Option<SchemaOrRef<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<IndexMap<String, ReferenceOr<Example>>>,

    /// Per-property encoding, for multipart and form bodies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<IndexMap<String, Encoding<S>>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl<S> MediaType<S> {
    pub fn with_schema(schema: impl Into<SchemaOrRef<S>>) -> Self {
        Self {
            media_type_schema: Some(schema.into()),
            ..Self::default()
        }
    }
}

impl<S> Default for MediaType<S> {
    fn default() -> Self {
        Self {
            media_type_schema: None,
            example: None,
            examples: None,
            encoding: None,
            extensions: Extensions::new(),
        }
    }
}

impl<S: Walk> Walk for MediaType<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.media_type_schema)?;
        walker.descend(&mut self.encoding)
    }
}

/// Encoding of a single schema property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct Encoding<S> {
    #[serde(rename = "contentType")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, ReferenceOr<Header<S>>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    #[serde(rename = "allowReserved")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl<S> Default for Encoding<S> {
    fn default() -> Self {
        Self {
            content_type: None,
            headers: None,
            style: None,
            explode: None,
            allow_reserved: None,
            extensions: Extensions::new(),
        }
    }
}

impl<S: Walk> Walk for Encoding<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.headers)
    }
}

impl_entity!(generic: MediaType, Encoding);
