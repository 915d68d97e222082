//! Version-discriminated document parsing

use crate::dialect::{Dialect, V30, V31};
use crate::entity::Entity;
use crate::{v3_0, v3_1};
use oas_forge_common::{ModelError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A parsed document of either supported version
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedDocument {
    V3_0(v3_0::OpenApi),
    V3_1(v3_1::OpenApi),
}

impl VersionedDocument {
    /// The `openapi` version string
    pub fn version(&self) -> &str {
        match self {
            VersionedDocument::V3_0(doc) => &doc.openapi,
            VersionedDocument::V3_1(doc) => &doc.openapi,
        }
    }

    pub fn info_title(&self) -> &str {
        match self {
            VersionedDocument::V3_0(doc) => &doc.info.title,
            VersionedDocument::V3_1(doc) => &doc.info.title,
        }
    }

    pub fn is_3_0(&self) -> bool {
        matches!(self, VersionedDocument::V3_0(_))
    }

    pub fn is_3_1(&self) -> bool {
        matches!(self, VersionedDocument::V3_1(_))
    }

    /// Export using canonical OpenAPI field names
    pub fn to_value(&self) -> Result<Value> {
        match self {
            VersionedDocument::V3_0(doc) => doc.to_value(),
            VersionedDocument::V3_1(doc) => doc.to_value(),
        }
    }
}

impl From<v3_0::OpenApi> for VersionedDocument {
    fn from(doc: v3_0::OpenApi) -> Self {
        V30::wrap(doc)
    }
}

impl From<v3_1::OpenApi> for VersionedDocument {
    fn from(doc: v3_1::OpenApi) -> Self {
        V31::wrap(doc)
    }
}

/// Parse a raw document, choosing the version from its `openapi` field
///
/// `3.0.x` yields a 3.0 tree and `3.1.x` a 3.1 tree. A missing, non-string
/// or unsupported version is a [`ModelError::SchemaMismatch`].
pub fn parse_value(raw: Value) -> Result<VersionedDocument> {
    let version = match raw.get("openapi") {
        Some(Value::String(version)) => version.clone(),
        Some(other) => {
            return Err(ModelError::SchemaMismatch(format!(
                "'openapi' must be a version string, found {}",
                other
            )))
        }
        None => {
            return Err(ModelError::SchemaMismatch(
                "Document has no 'openapi' version field".to_string(),
            ))
        }
    };

    if V30::accepts(&version) {
        tracing::debug!("Parsing {} document (version {})", V30::NAME, version);
        V30::parse(raw).map(V30::wrap)
    } else if V31::accepts(&version) {
        tracing::debug!("Parsing {} document (version {})", V31::NAME, version);
        V31::parse(raw).map(V31::wrap)
    } else {
        Err(ModelError::SchemaMismatch(format!(
            "Unsupported OpenAPI version '{}', expected 3.0.x or 3.1.x",
            version
        )))
    }
}

/// Parse a document from JSON text
pub fn from_json(json: &str) -> Result<VersionedDocument> {
    parse_value(serde_json::from_str(json)?)
}

/// Parse a document from YAML text
pub fn from_yaml(yaml: &str) -> Result<VersionedDocument> {
    parse_value(serde_yaml::from_str(yaml)?)
}

/// Load a document from disk
///
/// `.yaml` and `.yml` files are read as YAML, everything else as JSON.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<VersionedDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        ModelError::Parse(format!("Failed to read OpenAPI file {}: {}", path.display(), e))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => from_yaml(&content),
        _ => from_json(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_version() {
        let err = parse_value(json!({"info": {"title": "x", "version": "1"}})).unwrap_err();
        assert!(matches!(err, ModelError::SchemaMismatch(_)));
    }

    #[test]
    fn test_non_string_version() {
        let err = parse_value(json!({"openapi": 3.1})).unwrap_err();
        assert!(matches!(err, ModelError::SchemaMismatch(_)));
    }

    #[test]
    fn test_swagger_2_is_rejected() {
        let err = parse_value(json!({"openapi": "2.0"})).unwrap_err();
        assert!(err.to_string().contains("Unsupported OpenAPI version '2.0'"));
    }

    #[test]
    fn test_invalid_body_is_parse_error() {
        let err = parse_value(json!({"openapi": "3.0.3", "paths": {}})).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_accessors() {
        let doc = parse_value(json!({
            "openapi": "3.1.0",
            "info": {"title": "Pets", "version": "1.0.0"}
        }))
        .unwrap();
        assert!(doc.is_3_1());
        assert!(!doc.is_3_0());
        assert_eq!(doc.version(), "3.1.0");
        assert_eq!(doc.info_title(), "Pets");
    }
}
