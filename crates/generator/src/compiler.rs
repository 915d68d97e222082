//! The boundary to whatever turns external types into JSON Schema

use oas_forge_common::{JsonSchemaMode, ModelError, Result, TypeDescriptor};
use serde_json::{Map, Value};

/// Reference template every compiler must use for cross-references
pub const REF_TEMPLATE: &str = "#/components/schemas/{model}";

/// One type to compile, in the mode it asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub descriptor: TypeDescriptor,
    pub mode: JsonSchemaMode,
}

impl CompileRequest {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        let mode = descriptor.mode;
        Self { descriptor, mode }
    }
}

/// Produces JSON Schema definitions for a batch of external types
///
/// The result is a mapping with a `$defs` (or `definitions`) object. Each
/// requested type is keyed by its generated name; types it depends on may
/// be added under their own names. References between definitions follow
/// [`REF_TEMPLATE`].
#[cfg_attr(test, mockall::automock)]
pub trait SchemaCompiler {
    /// Compile every request in one pass
    ///
    /// `by_alias` selects wire names over internal field names.
    fn compile(&self, requests: &[CompileRequest], by_alias: bool) -> Result<Value>;
}

/// Pull the definitions mapping out of a compiler's output
pub(crate) fn definitions_of(output: Value) -> Result<Map<String, Value>> {
    let Value::Object(mut bag) = output else {
        return Err(ModelError::Compiler(
            "Compiler output must be a mapping".to_string(),
        ));
    };

    match bag.remove("$defs").or_else(|| bag.remove("definitions")) {
        Some(Value::Object(definitions)) => Ok(definitions),
        Some(other) => Err(ModelError::Compiler(format!(
            "Compiler definitions must be a mapping, found {}",
            other
        ))),
        None => Err(ModelError::Compiler(
            "Compiler output has no '$defs' mapping".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_takes_descriptor_mode() {
        let descriptor =
            TypeDescriptor::new("app", "Pet").with_mode(JsonSchemaMode::Serialization);
        assert_eq!(
            CompileRequest::new(descriptor).mode,
            JsonSchemaMode::Serialization
        );
    }

    #[test]
    fn test_definitions_key_variants() {
        let defs = definitions_of(json!({"$defs": {"Pet": {}}})).unwrap();
        assert!(defs.contains_key("Pet"));

        let defs = definitions_of(json!({"definitions": {"Pet": {}}})).unwrap();
        assert!(defs.contains_key("Pet"));

        let err = definitions_of(json!({"schemas": {}})).unwrap_err();
        assert!(matches!(err, ModelError::Compiler(_)));
    }
}
