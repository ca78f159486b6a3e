mod builder;
pub use builder::{Fragment, MergeBuilder, MergedDocument};

use crate::{
    document::{Document, Element},
    resolve::{KeyTypePolicy, Resolution, Resolver},
    schema::TypeResolver,
    template::Templates,
    Result,
};

use std::{
    collections::HashMap,
    io::{Read, Write},
};

/// Merges synthesized statements into mapping documents.
///
/// A merger holds only shared, read-only collaborators and may be used from
/// many threads at once. Each call works on its own document.
pub struct Merger<'a> {
    /// Resolves document namespaces to mapper types
    types: &'a dyn TypeResolver,

    /// Statement templates, by operation name
    templates: &'a Templates,

    resolver: Resolver,
}

impl<'a> Merger<'a> {
    pub fn new(types: &'a dyn TypeResolver, templates: &'a Templates) -> Self {
        Self {
            types,
            templates,
            resolver: Resolver::default(),
        }
    }

    /// Sets which contract's key binding wins when several are bound.
    pub fn key_type_policy(mut self, policy: KeyTypePolicy) -> Self {
        self.resolver = Resolver::new(policy);
        self
    }

    /// Reads a document from `input`, merges it and writes the result to
    /// `output`.
    ///
    /// Nothing is written unless the merge succeeds.
    pub fn merge(&self, input: impl Read, mut output: impl Write) -> Result<MergedDocument> {
        let doc = Document::read(input)?;
        let merged = self.merge_document(&doc)?;

        merged.write_to(&mut output)?;
        output.flush()?;

        Ok(merged)
    }

    /// Parses and merges a document held in memory.
    pub fn merge_str(&self, source: &str) -> Result<MergedDocument> {
        let doc = Document::parse(source)?;
        self.merge_document(&doc)
    }

    pub fn merge_document(&self, doc: &Document) -> Result<MergedDocument> {
        let Some(ty) = self.types.resolve(doc.namespace()) else {
            tracing::debug!(namespace = doc.namespace(), "unknown mapper type; passing through");
            return Ok(MergedDocument::pass_through(doc));
        };

        let Some(resolution) = self.resolver.resolve(doc, ty)? else {
            tracing::debug!(namespace = doc.namespace(), "mapper has no table; passing through");
            return Ok(MergedDocument::pass_through(doc));
        };

        self.synthesize(doc, &resolution)
    }

    fn synthesize(&self, doc: &Document, resolution: &Resolution) -> Result<MergedDocument> {
        // Fail before rendering anything if a contract declares an
        // operation no template covers.
        self.templates.validate(&resolution.operations)?;

        let existing = existing_operations(doc);
        let mut builder = MergeBuilder::new(doc);

        for operation in resolution.operations.iter() {
            if let Some(element) = existing.get(operation) {
                tracing::debug!(
                    namespace = doc.namespace(),
                    operation,
                    tag = element.name(),
                    "keeping user-defined statement"
                );
                builder.retain(operation);
                continue;
            }

            let text = self
                .templates
                .render(operation, &resolution.table)
                .map_err(|err| err.context(crate::err!("rendering `{operation}`")))?;

            builder.push(Fragment::parse(operation, text)?);
            tracing::debug!(namespace = doc.namespace(), operation, "synthesized statement");
        }

        Ok(builder.build())
    }
}

/// Indexes the document's top-level elements by `id`, whatever their tag.
fn existing_operations(doc: &Document) -> HashMap<&str, &Element> {
    doc.elements()
        .iter()
        .filter_map(|element| Some((element.id()?, element)))
        .collect()
}
