//! Merging synthesized schemas into `components.schemas`

use oas_forge_common::REF_PREFIX;
use oas_forge_parser::{Dialect, SchemaOrRef};

/// Insert `entries` into the document's registry, creating it if needed
///
/// Existing keys are overwritten; each overwrite is logged as a warning.
pub(crate) fn merge_schemas<D: Dialect>(
    document: &mut D::Document,
    entries: Vec<(String, SchemaOrRef<D::Schema>)>,
) {
    let schemas = D::schemas_mut(document);

    for (name, schema) in entries {
        if schemas.contains_key(&name) {
            tracing::warn!(
                "\"{}\" already exists in {}. The value of \"{}{}\" will be overwritten.",
                name,
                REF_PREFIX,
                REF_PREFIX,
                name
            );
        }
        schemas.insert(name, schema);
    }
}
