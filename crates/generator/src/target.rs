//! Per-version adaptation of compiled schemas

use crate::openapi30;
use oas_forge_parser::{Dialect, V30, V31};
use serde_json::Value;

/// A document version that synthesized schemas can be merged into
pub trait SynthesisTarget: Dialect {
    /// Rewrite a compiled JSON Schema into this version's schema dialect
    fn adapt_schema(raw: Value) -> Value;
}

impl SynthesisTarget for V30 {
    fn adapt_schema(mut raw: Value) -> Value {
        openapi30::downgrade_schema(&mut raw);
        raw
    }
}

/// 3.1 schemas are JSON Schema 2020-12 already
impl SynthesisTarget for V31 {
    fn adapt_schema(raw: Value) -> Value {
        raw
    }
}
