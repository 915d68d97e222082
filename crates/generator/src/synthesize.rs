//! Populating `components.schemas` from external types

use crate::collect::PlaceholderCollector;
use crate::compiler::{definitions_of, CompileRequest, SchemaCompiler};
use crate::registry::merge_schemas;
use crate::target::SynthesisTarget;
use indexmap::IndexSet;
use oas_forge_common::{ModelError, Result, TypeDescriptor};
use oas_forge_parser::{walk_document, VersionedDocument, V30, V31};
use std::borrow::Cow;

/// Options for [`synthesize`]
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Types to add to the registry even if no placeholder mentions them
    pub extra_types: Vec<TypeDescriptor>,

    /// Walk the document and replace placeholders with references
    pub scan_for_placeholders: bool,

    /// Use wire names for fields in the generated schemas
    pub by_alias: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            extra_types: Vec::new(),
            scan_for_placeholders: true,
            by_alias: true,
        }
    }
}

impl SynthesisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_types(mut self, types: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.extra_types.extend(types);
        self
    }

    pub fn with_scan_for_placeholders(mut self, scan: bool) -> Self {
        self.scan_for_placeholders = scan;
        self
    }

    pub fn with_by_alias(mut self, by_alias: bool) -> Self {
        self.by_alias = by_alias;
        self
    }
}

/// Build a copy of `document` whose registry holds a schema for every
/// external type it mentions
///
/// When scanning is enabled every placeholder in the copy is replaced by a
/// reference to `#/components/schemas/<generated name>`. The discovered
/// types and `options.extra_types` are compiled in one batch, adapted to the
/// document's version, validated and merged into the registry.
///
/// If there is nothing to compile the input itself is returned as
/// `Cow::Borrowed`. The input is never mutated.
pub fn synthesize<'a, D: SynthesisTarget>(
    document: &'a D::Document,
    compiler: &dyn SchemaCompiler,
    options: &SynthesisOptions,
) -> Result<Cow<'a, D::Document>> {
    let mut result = document.clone();

    let found = if options.scan_for_placeholders {
        let mut collector = PlaceholderCollector::default();
        walk_document(&mut result, &mut collector)?;
        collector.into_descriptors()
    } else {
        Vec::new()
    };

    let mut types = IndexSet::new();
    for descriptor in found.into_iter().chain(options.extra_types.iter().cloned()) {
        add_type(&mut types, descriptor)?;
    }

    if types.is_empty() {
        tracing::debug!("No external types to synthesize");
        return Ok(Cow::Borrowed(document));
    }

    let mut types: Vec<TypeDescriptor> = types.into_iter().collect();
    types.sort_by(|a, b| {
        a.generated_name()
            .cmp(&b.generated_name())
            .then_with(|| a.cmp(b))
    });
    tracing::debug!(
        "Synthesizing {} schema(s) for {}: {}",
        types.len(),
        D::NAME,
        types
            .iter()
            .map(|t| t.generated_name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let requests: Vec<CompileRequest> = types.into_iter().map(CompileRequest::new).collect();
    let definitions = definitions_of(compiler.compile(&requests, options.by_alias)?)?;

    let mut entries = Vec::with_capacity(definitions.len());
    for (name, raw) in definitions {
        let schema = D::validate_schema(D::adapt_schema(raw)).map_err(|e| {
            ModelError::SchemaMismatch(format!(
                "Synthesized schema '{}' is not valid for {}: {}",
                name,
                D::NAME,
                e
            ))
        })?;
        entries.push((name, schema));
    }

    merge_schemas::<D>(&mut result, entries);
    Ok(Cow::Owned(result))
}

/// Add `descriptor` unless it is already present
///
/// One type has one schema per batch, so asking for it in both modes is an
/// error.
fn add_type(types: &mut IndexSet<TypeDescriptor>, descriptor: TypeDescriptor) -> Result<()> {
    if let Some(existing) = types.get(&descriptor) {
        if existing.mode != descriptor.mode {
            return Err(ModelError::SchemaMismatch(format!(
                "{} is requested in both {} and {} mode",
                descriptor.generated_name(),
                existing.mode,
                descriptor.mode
            )));
        }
        return Ok(());
    }
    types.insert(descriptor);
    Ok(())
}

/// [`synthesize`] for a document of either version
pub fn synthesize_versioned<'a>(
    document: &'a VersionedDocument,
    compiler: &dyn SchemaCompiler,
    options: &SynthesisOptions,
) -> Result<Cow<'a, VersionedDocument>> {
    match document {
        VersionedDocument::V3_0(inner) => Ok(lift::<V30>(
            document,
            synthesize::<V30>(inner, compiler, options)?,
        )),
        VersionedDocument::V3_1(inner) => Ok(lift::<V31>(
            document,
            synthesize::<V31>(inner, compiler, options)?,
        )),
    }
}

fn lift<'a, D: SynthesisTarget>(
    outer: &'a VersionedDocument,
    inner: Cow<'_, D::Document>,
) -> Cow<'a, VersionedDocument> {
    match inner {
        Cow::Borrowed(_) => Cow::Borrowed(outer),
        Cow::Owned(document) => Cow::Owned(D::wrap(document)),
    }
}
