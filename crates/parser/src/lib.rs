//! Typed OpenAPI 3.0 and 3.1 documents
//!
//! This crate defines the entity catalog for both OpenAPI versions, the
//! reference and placeholder slots that can appear in schema positions, and
//! version-discriminated parsing of raw documents.
//!
//! ## Layout
//!
//! - `shared` entities look the same in both versions. Those holding schema
//!   positions are generic over the schema type.
//! - `v3_0` and `v3_1` provide each version's `Schema`, `Info`, `License`,
//!   `Components` and `OpenApi`, plus aliases binding the shared entities.
//! - [`parse_value`] reads the `openapi` field and dispatches to a version.
//! - [`Walk`] traverses a tree in place; schema synthesis uses it to find
//!   and replace placeholders.
//!
//! ## Example
//! ```
//! use serde_json::json;
//!
//! let doc = oas_forge_parser::parse_value(json!({
//!     "openapi": "3.1.0",
//!     "info": {"title": "Pets", "version": "1.0.0"}
//! }))
//! .unwrap();
//! assert!(doc.is_3_1());
//! ```

mod dialect;
mod entity;
mod parser;
mod reference;
pub mod shared;
pub mod v3_0;
pub mod v3_1;
mod walk;

pub use dialect::{Dialect, V30, V31};
pub use entity::Entity;
pub use parser::{from_file, from_json, from_yaml, parse_value, VersionedDocument};
pub use reference::{BoolOrSchema, Extensions, Placeholder, Reference, ReferenceOr, SchemaOrRef};
pub use walk::{walk_document, SchemaVisitor, Walk, Walker, MAX_DEPTH};
