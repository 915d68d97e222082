//! Rewriting JSON Schema 2020-12 output into the OpenAPI 3.0 dialect
//!
//! 3.0 has no `null` type, no `const`, boolean exclusive bounds and a single
//! `example`. Compilers emit modern JSON Schema, so every synthesized schema
//! for a 3.0 document passes through [`downgrade_schema`] first.

use serde_json::{json, Map, Value};

/// Keywords whose value is literal data rather than a subschema
const LITERAL_KEYWORDS: &[&str] = &["enum", "const", "default", "example", "examples"];

/// Keywords holding a single subschema (or, for `items`, possibly a list)
const SCHEMA_KEYWORDS: &[&str] = &[
    "items",
    "additionalProperties",
    "not",
    "if",
    "then",
    "else",
    "contains",
    "propertyNames",
    "unevaluatedItems",
    "unevaluatedProperties",
    "contentSchema",
];

/// Keywords holding a list of subschemas
const SCHEMA_LIST_KEYWORDS: &[&str] = &["allOf", "anyOf", "oneOf", "prefixItems"];

/// Keywords holding a name-to-subschema mapping
const SCHEMA_MAP_KEYWORDS: &[&str] = &[
    "properties",
    "patternProperties",
    "dependentSchemas",
    "$defs",
    "definitions",
];

/// Keywords 3.0 does not know
const DROPPED_KEYWORDS: &[&str] = &["$schema", "$id", "$comment"];

/// Rewrite `schema` in place so it is valid in an OpenAPI 3.0 document
///
/// # Example
/// ```
/// use oas_forge_generator::openapi30::downgrade_schema;
/// use serde_json::json;
///
/// let mut schema = json!({"type": ["string", "null"]});
/// downgrade_schema(&mut schema);
/// assert_eq!(schema, json!({"type": "string", "nullable": true}));
/// ```
pub fn downgrade_schema(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };

    for keyword in DROPPED_KEYWORDS {
        map.remove(*keyword);
    }

    for (keyword, value) in map.iter_mut() {
        let keyword = keyword.as_str();
        if LITERAL_KEYWORDS.contains(&keyword) {
            continue;
        }

        if SCHEMA_KEYWORDS.contains(&keyword) {
            match value {
                Value::Array(list) => list.iter_mut().for_each(downgrade_schema),
                other => downgrade_schema(other),
            }
        } else if SCHEMA_LIST_KEYWORDS.contains(&keyword) {
            if let Value::Array(list) = value {
                list.iter_mut().for_each(downgrade_schema);
            }
        } else if SCHEMA_MAP_KEYWORDS.contains(&keyword) {
            if let Value::Object(children) = value {
                children.values_mut().for_each(downgrade_schema);
            }
        }
    }

    collapse_type_list(map);
    strip_null_branches(map);
    const_to_enum(map);
    type_literal_enum(map);
    boolean_exclusive_bounds(map);
    single_example(map);
}

/// JSON type name of a literal value, as far as 3.0 can express it
fn classify(value: &Value) -> Option<&'static str> {
    match value {
        Value::String(_) => Some("string"),
        Value::Bool(_) => Some("boolean"),
        Value::Number(n) if n.is_f64() => Some("number"),
        Value::Number(_) => Some("integer"),
        Value::Array(_) => Some("array"),
        Value::Null | Value::Object(_) => None,
    }
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

/// `type: [T, "null"]` becomes `type: T` plus `nullable`
fn collapse_type_list(map: &mut Map<String, Value>) {
    let types = match map.remove("type") {
        Some(Value::Array(types)) => types,
        Some(single) => {
            map.insert("type".to_string(), single);
            return;
        }
        None => return,
    };

    let nullable = types.iter().any(|t| t.as_str() == Some("null"));
    let mut rest: Vec<Value> = types
        .into_iter()
        .filter(|t| t.as_str() != Some("null"))
        .collect();

    if rest.len() == 1 {
        map.insert("type".to_string(), rest.remove(0));
    } else if !rest.is_empty() {
        let branches: Vec<Value> = rest.into_iter().map(|t| json!({ "type": t })).collect();
        if map.contains_key("anyOf") {
            push_all_of(map, json!({ "anyOf": branches }));
        } else {
            map.insert("anyOf".to_string(), Value::Array(branches));
        }
    }

    if nullable {
        map.insert("nullable".to_string(), Value::Bool(true));
    }
}

/// `anyOf`/`oneOf` with a `{type: "null"}` branch become `nullable`
fn strip_null_branches(map: &mut Map<String, Value>) {
    for keyword in ["anyOf", "oneOf"] {
        let mut branches = match map.remove(keyword) {
            Some(Value::Array(branches)) => branches,
            Some(other) => {
                map.insert(keyword.to_string(), other);
                continue;
            }
            None => continue,
        };

        let before = branches.len();
        branches.retain(|branch| !is_null_schema(branch));
        if branches.len() == before {
            map.insert(keyword.to_string(), Value::Array(branches));
            continue;
        }

        map.insert("nullable".to_string(), Value::Bool(true));
        match branches.len() {
            0 => {}
            1 => merge_branch(map, branches.remove(0)),
            _ => {
                map.insert(keyword.to_string(), Value::Array(branches));
            }
        }
    }
}

/// Fold the only remaining branch of a union into its parent
///
/// 3.0 ignores siblings of `$ref`, so a reference is kept behind `allOf`.
fn merge_branch(map: &mut Map<String, Value>, branch: Value) {
    match branch {
        Value::Object(fields) if fields.contains_key("$ref") => {
            push_all_of(map, Value::Object(fields));
        }
        Value::Object(fields) => {
            for (key, value) in fields {
                map.entry(key).or_insert(value);
            }
        }
        other => {
            map.insert("anyOf".to_string(), Value::Array(vec![other]));
        }
    }
}

fn push_all_of(map: &mut Map<String, Value>, schema: Value) {
    match map
        .entry("allOf")
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(list) => list.push(schema),
        other => *other = Value::Array(vec![other.take(), schema]),
    }
}

/// `const: v` becomes a one-element `enum` with its type
fn const_to_enum(map: &mut Map<String, Value>) {
    let Some(value) = map.remove("const") else {
        return;
    };

    if let Some(data_type) = classify(&value) {
        map.insert("type".to_string(), Value::String(data_type.to_string()));
    }
    map.insert("enum".to_string(), Value::Array(vec![value]));
}

/// Literal enums carry a `type` only when every member has the same one
///
/// A `null` member becomes `nullable`; object literals keep whatever `type`
/// the schema already declares.
fn type_literal_enum(map: &mut Map<String, Value>) {
    let Some(Value::Array(values)) = map.get_mut("enum") else {
        return;
    };

    if values.iter().any(Value::is_null) && values.iter().any(|v| !v.is_null()) {
        values.retain(|v| !v.is_null());
        map.insert("nullable".to_string(), Value::Bool(true));
    }

    let Some(Value::Array(values)) = map.get("enum") else {
        return;
    };
    if !values.is_empty() && values.iter().all(Value::is_object) {
        return;
    }

    let mut types = values.iter().map(classify);
    let first = types.next().flatten();
    let homogeneous = first.is_some() && types.all(|t| t == first);

    match first {
        Some(data_type) if homogeneous => {
            map.insert("type".to_string(), Value::String(data_type.to_string()));
        }
        _ => {
            map.remove("type");
        }
    }
}

/// Numeric `exclusiveMinimum: n` becomes `minimum: n, exclusiveMinimum: true`
fn boolean_exclusive_bounds(map: &mut Map<String, Value>) {
    for (exclusive, inclusive) in [
        ("exclusiveMinimum", "minimum"),
        ("exclusiveMaximum", "maximum"),
    ] {
        if let Some(bound) = map.get(exclusive).filter(|v| v.is_number()).cloned() {
            map.insert(inclusive.to_string(), bound);
            map.insert(exclusive.to_string(), Value::Bool(true));
        }
    }
}

fn single_example(map: &mut Map<String, Value>) {
    if let Some(examples) = map.remove("examples") {
        if let Some(first) = examples.as_array().and_then(|list| list.first()) {
            map.entry("example").or_insert_with(|| first.clone());
        }
    }
}
