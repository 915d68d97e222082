//! Behavior common to every document entity

use indexmap::IndexSet;
use oas_forge_common::Result;
use serde::Serialize;
use serde_json::Value;

/// A typed OpenAPI document node
pub trait Entity: Serialize {
    /// Wire names of the fields that were explicitly populated
    ///
    /// Unset optional fields are `None` and are not reported; unknown fields
    /// preserved from the input are.
    fn fields_set(&self) -> IndexSet<String> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.into_iter().map(|(key, _)| key).collect(),
            _ => IndexSet::new(),
        }
    }

    /// Export to an untyped mapping using canonical OpenAPI field names
    fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Implement [`Entity`] for plain and schema-generic entity types
macro_rules! impl_entity {
    (generic: $($ty:ident),+ $(,)?) => {
        $(impl<S: serde::Serialize> $crate::entity::Entity for $ty<S> {})+
    };
    ($($ty:ident),+ $(,)?) => {
        $(impl $crate::entity::Entity for $ty {})+
    };
}

pub(crate) use impl_entity;
