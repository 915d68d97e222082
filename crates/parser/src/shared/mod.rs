//! Entities whose shape is the same in OpenAPI 3.0 and 3.1
//!
//! Entities that contain schema positions are generic over the schema type
//! and bound to a concrete version by the aliases in `v3_0` and `v3_1`.

mod content;
mod metadata;
mod operation;
mod parameter;
mod path_item;
mod security;

pub use content::{Encoding, MediaType};
pub use metadata::{
    Contact, Discriminator, Example, ExternalDocumentation, Server, ServerVariable, Tag, Xml,
};
pub use operation::{Callback, Link, Operation, RequestBody, Response, Responses};
pub use parameter::{Header, Parameter, ParameterLocation};
pub use path_item::{PathItem, Paths};
pub use security::{OAuthFlow, OAuthFlows, SecurityRequirement, SecurityScheme};
