//! Schema synthesis for OpenAPI documents
//!
//! This crate fills `#/components/schemas` from types that live outside the
//! document. Documents refer to such types through placeholders; synthesis
//! discovers them, compiles one JSON Schema per distinct type, adapts it to
//! the document's OpenAPI version and merges it into the registry.
//!
//! ## Pipeline
//!
//! 1. Walk a copy of the document, replacing placeholders with references
//! 2. Add explicitly requested types, sort by generated name
//! 3. Compile everything in one batch through a [`SchemaCompiler`]
//! 4. Downgrade to the 3.0 dialect where needed, validate, merge
//!
//! ## Example
//! ```
//! use oas_forge_generator::{synthesize, SchemarsCompiler, SynthesisOptions};
//! use oas_forge_parser::{v3_1, SchemaOrRef, V31};
//!
//! #[derive(schemars::JsonSchema)]
//! struct Pet {
//!     name: String,
//!     tag: Option<String>,
//! }
//!
//! let mut compiler = SchemarsCompiler::new();
//! let pet = compiler.register::<Pet>();
//!
//! let mut doc = v3_1::OpenApi::new(v3_1::Info::new("Pets", "1.0.0"));
//! doc.schemas_mut()
//!     .insert("PetList".to_string(), SchemaOrRef::placeholder(pet));
//!
//! let result = synthesize::<V31>(&doc, &compiler, &SynthesisOptions::default()).unwrap();
//! assert!(result.schemas().unwrap().contains_key("Pet"));
//! ```

mod collect;
mod compiler;
pub mod openapi30;
mod registry;
mod schemars_compiler;
mod synthesize;
mod target;

pub use compiler::{CompileRequest, SchemaCompiler, REF_TEMPLATE};
pub use schemars_compiler::{descriptor_for, SchemarsCompiler};
pub use synthesize::{synthesize, synthesize_versioned, SynthesisOptions};
pub use target::SynthesisTarget;
