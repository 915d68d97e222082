//! Static description of each supported OpenAPI version
//!
//! Code that works on "any version" is written once against [`Dialect`] and
//! instantiated with [`V30`] or [`V31`].

use crate::entity::Entity;
use crate::parser::VersionedDocument;
use crate::reference::SchemaOrRef;
use crate::walk::Walk;
use crate::{v3_0, v3_1};
use indexmap::IndexMap;
use oas_forge_common::{ModelError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// An OpenAPI version together with its document and schema types
pub trait Dialect: Copy + Debug + Send + Sync + 'static {
    type Schema: Walk + Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync;
    type Document: Walk + Entity + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync;

    /// Human-readable name used in messages
    const NAME: &'static str;

    /// Every version string of this dialect starts with this prefix
    const VERSION_PREFIX: &'static str;

    /// Version written into documents built in code
    const DEFAULT_VERSION: &'static str;

    fn accepts(version: &str) -> bool {
        version.starts_with(Self::VERSION_PREFIX)
    }

    /// Validate a raw document into this dialect's tree
    fn parse(raw: Value) -> Result<Self::Document> {
        serde_json::from_value(raw)
            .map_err(|e| ModelError::Parse(format!("Failed to parse {} document: {}", Self::NAME, e)))
    }

    fn wrap(document: Self::Document) -> VersionedDocument;

    /// The schema registry, if the document has one
    fn schemas(document: &Self::Document) -> Option<&IndexMap<String, SchemaOrRef<Self::Schema>>>;

    /// The schema registry, creating `components` and `schemas` when absent
    fn schemas_mut(document: &mut Self::Document) -> &mut IndexMap<String, SchemaOrRef<Self::Schema>>;

    fn validate_schema(raw: Value) -> Result<SchemaOrRef<Self::Schema>>;
}

/// OpenAPI 3.0.x
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V30;

/// OpenAPI 3.1.x
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V31;

impl Dialect for V30 {
    type Schema = v3_0::Schema;
    type Document = v3_0::OpenApi;

    const NAME: &'static str = "OpenAPI 3.0";
    const VERSION_PREFIX: &'static str = v3_0::VERSION_PREFIX;
    const DEFAULT_VERSION: &'static str = v3_0::DEFAULT_VERSION;

    fn wrap(document: Self::Document) -> VersionedDocument {
        VersionedDocument::V3_0(document)
    }

    fn schemas(document: &Self::Document) -> Option<&IndexMap<String, SchemaOrRef<Self::Schema>>> {
        document.schemas()
    }

    fn schemas_mut(document: &mut Self::Document) -> &mut IndexMap<String, SchemaOrRef<Self::Schema>> {
        document.schemas_mut()
    }

    fn validate_schema(raw: Value) -> Result<SchemaOrRef<Self::Schema>> {
        v3_0::schema_validate(raw)
    }
}

impl Dialect for V31 {
    type Schema = v3_1::Schema;
    type Document = v3_1::OpenApi;

    const NAME: &'static str = "OpenAPI 3.1";
    const VERSION_PREFIX: &'static str = v3_1::VERSION_PREFIX;
    const DEFAULT_VERSION: &'static str = v3_1::DEFAULT_VERSION;

    fn wrap(document: Self::Document) -> VersionedDocument {
        VersionedDocument::V3_1(document)
    }

    fn schemas(document: &Self::Document) -> Option<&IndexMap<String, SchemaOrRef<Self::Schema>>> {
        document.schemas()
    }

    fn schemas_mut(document: &mut Self::Document) -> &mut IndexMap<String, SchemaOrRef<Self::Schema>> {
        document.schemas_mut()
    }

    fn validate_schema(raw: Value) -> Result<SchemaOrRef<Self::Schema>> {
        v3_1::schema_validate(raw)
    }
}
