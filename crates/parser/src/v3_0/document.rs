//! OpenAPI 3.0 root document, info and components

use super::Schema;
use crate::entity::impl_entity;
use crate::reference::{Extensions, ReferenceOr, SchemaOrRef};
use crate::shared::{
    Callback, Contact, Example, ExternalDocumentation, Header, Link, Parameter, Paths,
    RequestBody, Response, SecurityRequirement, SecurityScheme, Server, Tag,
};
use crate::walk::{Walk, Walker};
use indexmap::IndexMap;
use oas_forge_common::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Version written when a document is built without an explicit one
pub const DEFAULT_VERSION: &str = "3.0.4";

/// Prefix shared by every 3.0 version string
pub const VERSION_PREFIX: &str = "3.0.";

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn deserialize_version<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let version = String::deserialize(deserializer)?;
    if version.starts_with(VERSION_PREFIX) {
        Ok(version)
    } else {
        Err(D::Error::custom(format!(
            "unsupported OpenAPI version '{}', expected {}x",
            version, VERSION_PREFIX
        )))
    }
}

/// License information for the exposed API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Metadata about the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "termsOfService")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,

    /// Version of the API (not of the OpenAPI specification)
    pub version: String,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Info {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
            version: version.into(),
            extensions: Extensions::new(),
        }
    }
}

/// Reusable objects referenced from elsewhere in the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// The schema registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<IndexMap<String, SchemaOrRef<Schema>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<IndexMap<String, ReferenceOr<Response<Schema>>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, ReferenceOr<Parameter<Schema>>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<IndexMap<String, ReferenceOr<Example>>>,

    #[serde(rename = "requestBodies")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_bodies: Option<IndexMap<String, ReferenceOr<RequestBody<Schema>>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, ReferenceOr<Header<Schema>>>>,

    #[serde(rename = "securitySchemes")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<IndexMap<String, ReferenceOr<SecurityScheme>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<IndexMap<String, ReferenceOr<Link>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<IndexMap<String, ReferenceOr<Callback<Schema>>>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Walk for Components {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.schemas)?;
        walker.descend(&mut self.responses)?;
        walker.descend(&mut self.parameters)?;
        walker.descend(&mut self.request_bodies)?;
        walker.descend(&mut self.headers)?;
        walker.descend(&mut self.callbacks)
    }
}

/// Root of an OpenAPI 3.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    /// Semantic version of the OpenAPI specification in use
    #[serde(default = "default_version", deserialize_with = "deserialize_version")]
    pub openapi: String,

    pub info: Info,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,

    pub paths: Paths<Schema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    #[serde(rename = "externalDocs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl OpenApi {
    /// Empty document at the default version
    pub fn new(info: Info) -> Self {
        Self {
            openapi: default_version(),
            info,
            servers: None,
            paths: Paths::new(),
            components: None,
            security: None,
            tags: None,
            external_docs: None,
            extensions: Extensions::new(),
        }
    }

    /// The schema registry, if the document has one
    pub fn schemas(&self) -> Option<&IndexMap<String, SchemaOrRef<Schema>>> {
        self.components.as_ref()?.schemas.as_ref()
    }

    /// The schema registry, created (with its parent) when absent
    pub fn schemas_mut(&mut self) -> &mut IndexMap<String, SchemaOrRef<Schema>> {
        self.components
            .get_or_insert_with(Components::default)
            .schemas
            .get_or_insert_with(IndexMap::new)
    }
}

impl Walk for OpenApi {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.paths)?;
        walker.descend(&mut self.components)
    }
}

impl_entity!(License, Info, Components, OpenApi);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_version() {
        let doc: OpenApi = serde_json::from_value(json!({
            "info": {"title": "Pets", "version": "1.0.0"},
            "paths": {}
        }))
        .unwrap();
        assert_eq!(doc.openapi, "3.0.4");
        assert_eq!(OpenApi::new(Info::new("Pets", "1.0.0")), doc);
    }

    #[test]
    fn test_rejects_other_versions() {
        let result: std::result::Result<OpenApi, _> = serde_json::from_value(json!({
            "openapi": "3.1.0",
            "info": {"title": "Pets", "version": "1.0.0"},
            "paths": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_schemas_mut_creates_registry() {
        let mut doc = OpenApi::new(Info::new("Pets", "1.0.0"));
        assert!(doc.schemas().is_none());

        doc.schemas_mut()
            .insert("Pet".to_string(), SchemaOrRef::schema(Schema::default()));
        assert_eq!(
            doc.to_value().unwrap()["components"],
            json!({"schemas": {"Pet": {}}})
        );
    }
}
