//! Security schemes and requirements

use crate::entity::impl_entity;
use crate::reference::Extensions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Security scheme usable by operations
///
/// Supported types are `apiKey`, `http`, `oauth2`, `openIdConnect` and,
/// for 3.1 documents, `mutualTLS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type", alias = "scheme_type")]
    pub scheme_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Header, query or cookie parameter name (`apiKey`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Location of the API key: query, header or cookie (`apiKey`)
    #[serde(rename = "in", alias = "security_scheme_in")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_scheme_in: Option<String>,

    /// HTTP Authorization scheme, e.g. "bearer" (`http`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(rename = "bearerFormat")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows: Option<OAuthFlows>,

    #[serde(rename = "openIdConnectUrl")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id_connect_url: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl SecurityScheme {
    pub fn new(scheme_type: impl Into<String>) -> Self {
        Self {
            scheme_type: scheme_type.into(),
            description: None,
            name: None,
            security_scheme_in: None,
            scheme: None,
            bearer_format: None,
            flows: None,
            open_id_connect_url: None,
            extensions: Extensions::new(),
        }
    }
}

/// Supported OAuth flows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuthFlows {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,

    #[serde(rename = "clientCredentials")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlow>,

    #[serde(rename = "authorizationCode")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlow>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Configuration of a single OAuth flow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuthFlow {
    #[serde(rename = "authorizationUrl")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,

    #[serde(rename = "tokenUrl")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,

    #[serde(rename = "refreshUrl")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,

    /// Available scopes mapped to a short description
    pub scopes: IndexMap<String, String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Security schemes required to execute an operation, mapped to the
/// scopes needed (empty for non-OAuth schemes)
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

impl_entity!(SecurityScheme, OAuthFlows, OAuthFlow);
