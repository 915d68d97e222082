//! Operations, request bodies, responses, links and callbacks

use super::content::MediaType;
use super::metadata::{ExternalDocumentation, Server};
use super::parameter::{Header, Parameter};
use super::path_item::PathItem;
use super::security::SecurityRequirement;
use crate::entity::impl_entity;
use crate::reference::{Extensions, ReferenceOr};
use crate::walk::{Walk, Walker};
use indexmap::IndexMap;
use oas_forge_common::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body of an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct RequestBody<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Media type range mapped to its description
    pub content: IndexMap<String, MediaType<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl<S> RequestBody<S> {
    pub fn new(content: IndexMap<String, MediaType<S>>) -> Self {
        Self {
            description: None,
            content,
            required: None,
            extensions: Extensions::new(),
        }
    }
}

impl<S: Walk> Walk for RequestBody<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.content)
    }
}

/// A single response from an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct Response<S> {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, ReferenceOr<Header<S>>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType<S>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<IndexMap<String, ReferenceOr<Link>>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl<S> Response<S> {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            headers: None,
            content: None,
            links: None,
            extensions: Extensions::new(),
        }
    }

    pub fn with_content(mut self, content: IndexMap<String, MediaType<S>>) -> Self {
        self.content = Some(content);
        self
    }
}

impl<S: Walk> Walk for Response<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.headers)?;
        walker.descend(&mut self.content)
    }
}

/// Status code (or `default`) mapped to the expected response
pub type Responses<S> = IndexMap<String, ReferenceOr<Response<S>>>;

/// Runtime expression mapped to the path item describing the callback
pub type Callback<S> = IndexMap<String, PathItem<S>>;

/// Design-time link between a response and another operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "operationRef")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_ref: Option<String>,

    #[serde(rename = "operationId")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, Value>>,

    #[serde(rename = "requestBody")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<Server>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A single API operation on a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct Operation<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "externalDocs")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,

    /// Unique identifier of the operation
    #[serde(rename = "operationId")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ReferenceOr<Parameter<S>>>>,

    #[serde(rename = "requestBody")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<ReferenceOr<RequestBody<S>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Responses<S>>,

    /// Out-of-band callbacks keyed by a unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<IndexMap<String, ReferenceOr<Callback<S>>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl<S> Default for Operation<S> {
    fn default() -> Self {
        Self {
            tags: None,
            summary: None,
            description: None,
            external_docs: None,
            operation_id: None,
            parameters: None,
            request_body: None,
            responses: None,
            callbacks: None,
            deprecated: None,
            security: None,
            servers: None,
            extensions: Extensions::new(),
        }
    }
}

impl<S: Walk> Walk for Operation<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.descend(&mut self.parameters)?;
        walker.descend(&mut self.request_body)?;
        walker.descend(&mut self.responses)?;
        walker.descend(&mut self.callbacks)
    }
}

impl_entity!(generic: RequestBody, Response, Operation);
impl_entity!(Link);
