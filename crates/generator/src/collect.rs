//! Placeholder discovery

use oas_forge_common::TypeDescriptor;
use oas_forge_parser::{Placeholder, Reference, SchemaVisitor};

/// Records the descriptor of every placeholder, in walk order, and swaps
/// each one for a reference to its future registry entry
#[derive(Debug, Default)]
pub(crate) struct PlaceholderCollector {
    found: Vec<TypeDescriptor>,
}

impl PlaceholderCollector {
    pub(crate) fn into_descriptors(self) -> Vec<TypeDescriptor> {
        self.found
    }
}

impl SchemaVisitor for PlaceholderCollector {
    fn visit_placeholder(&mut self, placeholder: &Placeholder) -> Reference {
        let reference = placeholder.to_reference();
        tracing::debug!(
            "Placeholder for {} replaced with {}",
            placeholder.descriptor,
            reference.ref_path
        );
        self.found.push(placeholder.descriptor.clone());
        reference
    }
}
