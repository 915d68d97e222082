//! OpenAPI 3.1.x entity catalog

mod document;
mod schema;

pub use document::{Components, Info, License, OpenApi, DEFAULT_VERSION, VERSION_PREFIX};
pub use schema::{schema_validate, DataType, Schema, SchemaType};

pub use crate::reference::{Placeholder, Reference, ReferenceOr};
pub use crate::shared::{
    Contact, Discriminator, Example, ExternalDocumentation, Link, OAuthFlow, OAuthFlows,
    ParameterLocation, SecurityRequirement, SecurityScheme, Server, ServerVariable, Tag, Xml,
};

/// A schema position in a 3.1 document
pub type SchemaOrRef = crate::reference::SchemaOrRef<Schema>;
pub type Parameter = crate::shared::Parameter<Schema>;
pub type Header = crate::shared::Header<Schema>;
pub type MediaType = crate::shared::MediaType<Schema>;
pub type Encoding = crate::shared::Encoding<Schema>;
pub type RequestBody = crate::shared::RequestBody<Schema>;
pub type Response = crate::shared::Response<Schema>;
pub type Responses = crate::shared::Responses<Schema>;
pub type Operation = crate::shared::Operation<Schema>;
pub type PathItem = crate::shared::PathItem<Schema>;
pub type Paths = crate::shared::Paths<Schema>;
pub type Callback = crate::shared::Callback<Schema>;
