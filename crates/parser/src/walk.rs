//! Mutable traversal of a document tree
//!
//! Every entity implements [`Walk`]. Walking visits the populated fields that
//! can hold a schema position, every element of sequences, and every value of
//! maps. When a [`Placeholder`] is reached the [`SchemaVisitor`] decides which
//! [`Reference`] replaces it; placeholders are leaves and never descended into.
//!
//! Owned trees cannot contain cycles, but they can be arbitrarily deep. The
//! [`Walker`] counts nesting and fails with [`ModelError::TraversalDepth`]
//! instead of exhausting the stack.

use crate::reference::{BoolOrSchema, Placeholder, Reference, ReferenceOr, SchemaOrRef};
use indexmap::IndexMap;
use oas_forge_common::{ModelError, Result};

/// Default nesting limit for a [`Walker`]
pub const MAX_DEPTH: usize = 256;

/// Receives every placeholder found during a walk
pub trait SchemaVisitor {
    /// Return the reference that replaces `placeholder` in the tree
    fn visit_placeholder(&mut self, placeholder: &Placeholder) -> Reference;
}

/// Depth-tracking driver for a walk
pub struct Walker<'v> {
    visitor: &'v mut dyn SchemaVisitor,
    depth: usize,
    limit: usize,
}

impl<'v> Walker<'v> {
    pub fn new(visitor: &'v mut dyn SchemaVisitor) -> Self {
        Self::with_limit(visitor, MAX_DEPTH)
    }

    pub fn with_limit(visitor: &'v mut dyn SchemaVisitor, limit: usize) -> Self {
        Self {
            visitor,
            depth: 0,
            limit,
        }
    }

    /// Walk a child node one level deeper
    pub fn descend<W: Walk + ?Sized>(&mut self, node: &mut W) -> Result<()> {
        if self.depth >= self.limit {
            return Err(ModelError::TraversalDepth {
                depth: self.depth + 1,
                limit: self.limit,
            });
        }

        self.depth += 1;
        let result = node.walk(self);
        self.depth -= 1;
        result
    }

    fn replace(&mut self, placeholder: &Placeholder) -> Reference {
        self.visitor.visit_placeholder(placeholder)
    }
}

/// A node that can be walked in place
pub trait Walk {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()>;
}

/// Walk `root` with `visitor`, using the default depth limit
pub fn walk_document<W: Walk + ?Sized>(root: &mut W, visitor: &mut dyn SchemaVisitor) -> Result<()> {
    Walker::new(visitor).descend(root)
}

impl<S: Walk> Walk for SchemaOrRef<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        let reference = match self {
            SchemaOrRef::Placeholder(placeholder) => walker.replace(placeholder),
            SchemaOrRef::Schema(schema) => return schema.walk(walker),
            SchemaOrRef::Reference(_) => return Ok(()),
        };
        *self = SchemaOrRef::Reference(reference);
        Ok(())
    }
}

impl<S: Walk> Walk for BoolOrSchema<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        match self {
            BoolOrSchema::Schema(schema) => schema.walk(walker),
            BoolOrSchema::Bool(_) => Ok(()),
        }
    }
}

impl<T: Walk> Walk for ReferenceOr<T> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        match self {
            ReferenceOr::Item(item) => item.walk(walker),
            ReferenceOr::Reference(_) => Ok(()),
        }
    }
}

impl<T: Walk> Walk for Option<T> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        match self {
            Some(value) => value.walk(walker),
            None => Ok(()),
        }
    }
}

impl<T: Walk + ?Sized> Walk for Box<T> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        (**self).walk(walker)
    }
}

impl<T: Walk> Walk for Vec<T> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        self.iter_mut().try_for_each(|item| item.walk(walker))
    }
}

impl<T: Walk> Walk for IndexMap<String, T> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        self.values_mut().try_for_each(|value| value.walk(walker))
    }
}
