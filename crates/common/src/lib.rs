//! Common types and utilities for oas-forge
//!
//! This crate contains the error taxonomy and the external type descriptors
//! shared by the parser, the schema generator, and the CLI.

mod descriptor;

pub use descriptor::{sanitize_ref_name, JsonSchemaMode, TypeDescriptor};

use thiserror::Error;

/// Prefix of every reference into the schema registry
pub const REF_PREFIX: &str = "#/components/schemas/";

/// Errors that can occur while parsing or synthesizing OpenAPI documents
#[derive(Error, Debug)]
pub enum ModelError {
    /// No document variant or schema entity matches the input
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Document traversal went deeper than the configured limit
    #[error("Traversal depth {depth} exceeds limit of {limit}")]
    TraversalDepth { depth: usize, limit: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    /// The schema compiler rejected a request or produced unusable output
    #[error("Compiler error: {0}")]
    Compiler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for oas-forge operations
pub type Result<T> = std::result::Result<T, ModelError>;
