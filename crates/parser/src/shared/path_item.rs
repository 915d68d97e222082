//! Path items and the paths map

use super::metadata::Server;
use super::operation::Operation;
use super::parameter::Parameter;
use crate::entity::impl_entity;
use crate::reference::{Extensions, ReferenceOr};
use crate::walk::{Walk, Walker};
use indexmap::IndexMap;
use oas_forge_common::Result;
use serde::{Deserialize, Serialize};

/// Relative path (e.g. "/pets/{id}") mapped to its operations
pub type Paths<S> = IndexMap<String, PathItem<S>>;

/// Operations available on a single path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct PathItem<S> {
    /// External definition of this path item
    #[serde(rename = "$ref", alias = "ref")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation<S>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,

    /// Parameters shared by every operation on this path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ReferenceOr<Parameter<S>>>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl<S> PathItem<S> {
    /// Populated operations paired with their lowercase HTTP method
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation<S>)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
            ("trace", &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, operation)| operation.as_ref().map(|op| (method, op)))
    }
}

impl<S> Default for PathItem<S> {
    fn default() -> Self {
        Self {
            ref_path: None,
            summary: None,
            description: None,
            get: None,
            put: None,
            post: None,
            delete: None,
            options: None,
            head: None,
            patch: None,
            trace: None,
            servers: None,
            parameters: None,
            extensions: Extensions::new(),
        }
    }
}

impl<S: Walk> Walk for PathItem<S> {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        for operation in [
            &mut self.get,
            &mut self.put,
            &mut self.post,
            &mut self.delete,
            &mut self.options,
            &mut self.head,
            &mut self.patch,
            &mut self.trace,
        ] {
            walker.descend(operation)?;
        }
        walker.descend(&mut self.parameters)
    }
}

impl_entity!(generic: PathItem);
