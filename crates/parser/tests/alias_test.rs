//! Alternate field names build the same entities as canonical names

use oas_forge_parser::v3_1::{
    Header, MediaType, Parameter, ParameterLocation, PathItem, Reference, Schema, SchemaOrRef,
    SecurityScheme,
};
use oas_forge_parser::Entity;
use serde_json::json;

#[test]
fn test_media_type_alias() {
    let built = MediaType::with_schema(SchemaOrRef::schema(Schema::default()));
    let internal: MediaType = serde_json::from_value(json!({"media_type_schema": {}})).unwrap();
    let canonical: MediaType = serde_json::from_value(json!({"schema": {}})).unwrap();

    assert_eq!(built, internal);
    assert_eq!(internal, canonical);
}

#[test]
fn test_parameter_alias() {
    let built = Parameter::new("test", ParameterLocation::Path)
        .with_schema(SchemaOrRef::schema(Schema::default()));
    let internal: Parameter = serde_json::from_value(json!({
        "name": "test",
        "param_in": "path",
        "param_schema": {}
    }))
    .unwrap();
    let canonical: Parameter = serde_json::from_value(json!({
        "name": "test",
        "in": "path",
        "schema": {}
    }))
    .unwrap();

    assert_eq!(built, internal);
    assert_eq!(internal, canonical);
    assert_eq!(
        internal.to_value().unwrap(),
        json!({"name": "test", "in": "path", "schema": {}})
    );
}

#[test]
fn test_header_alias() {
    let internal: Header = serde_json::from_value(json!({"param_schema": {"type": "string"}})).unwrap();
    let canonical: Header = serde_json::from_value(json!({"schema": {"type": "string"}})).unwrap();
    assert_eq!(internal, canonical);
}

#[test]
fn test_path_item_alias() {
    let built = PathItem {
        ref_path: Some("#/dummy".to_string()),
        ..PathItem::default()
    };
    let internal: PathItem = serde_json::from_value(json!({"ref": "#/dummy"})).unwrap();
    let canonical: PathItem = serde_json::from_value(json!({"$ref": "#/dummy"})).unwrap();

    assert_eq!(built, internal);
    assert_eq!(internal, canonical);
}

#[test]
fn test_reference_alias() {
    let internal: Reference = serde_json::from_value(json!({"ref": "#/dummy"})).unwrap();
    let canonical: Reference = serde_json::from_value(json!({"$ref": "#/dummy"})).unwrap();
    assert_eq!(Reference::new("#/dummy"), internal);
    assert_eq!(internal, canonical);
}

#[test]
fn test_security_scheme_alias() {
    let mut built = SecurityScheme::new("apiKey");
    built.security_scheme_in = Some("header".to_string());

    let internal: SecurityScheme =
        serde_json::from_value(json!({"type": "apiKey", "security_scheme_in": "header"})).unwrap();
    let canonical: SecurityScheme =
        serde_json::from_value(json!({"type": "apiKey", "in": "header"})).unwrap();

    assert_eq!(built, internal);
    assert_eq!(internal, canonical);
}

#[test]
fn test_schema_alias() {
    let built = Schema {
        schema_not: Some(SchemaOrRef::schema(Schema::default())),
        schema_format: Some("email".to_string()),
        ..Schema::default()
    };
    let internal: Schema =
        serde_json::from_value(json!({"schema_not": {}, "schema_format": "email"})).unwrap();
    let canonical: Schema = serde_json::from_value(json!({"not": {}, "format": "email"})).unwrap();

    assert_eq!(built, internal);
    assert_eq!(internal, canonical);
}
