//! Integration tests for version-discriminated parsing

use oas_forge_parser::{from_json, from_yaml, parse_value, v3_0, v3_1, Entity, VersionedDocument};
use pretty_assertions::assert_eq;
use serde_json::json;

fn minimal(version: &str) -> serde_json::Value {
    json!({
        "openapi": version,
        "info": {"title": "foo", "version": "0.1.0"},
        "paths": {"/": {}}
    })
}

#[test]
fn test_parse_3_0_versions() {
    for version in ["3.0.4", "3.0.3", "3.0.2", "3.0.1", "3.0.0"] {
        let result = parse_value(minimal(version)).unwrap();

        let mut expected = v3_0::OpenApi::new(v3_0::Info::new("foo", "0.1.0"));
        expected.openapi = version.to_string();
        expected
            .paths
            .insert("/".to_string(), v3_0::PathItem::default());

        assert_eq!(result, VersionedDocument::V3_0(expected));
    }
}

#[test]
fn test_parse_3_1_versions() {
    for version in ["3.1.1", "3.1.0"] {
        let result = parse_value(minimal(version)).unwrap();

        let mut expected = v3_1::OpenApi::new(v3_1::Info::new("foo", "0.1.0"));
        expected.openapi = version.to_string();
        expected.paths = Some(
            [("/".to_string(), v3_1::PathItem::default())]
                .into_iter()
                .collect(),
        );

        assert_eq!(result, VersionedDocument::V3_1(expected));
    }
}

#[test]
fn test_round_trip_petstore() {
    let raw = json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Swagger Petstore",
            "license": {"name": "MIT"},
            "version": "1.0.0"
        },
        "servers": [{"url": "http://petstore.swagger.io/v1"}],
        "paths": {
            "/pets": {
                "get": {
                    "summary": "List all pets",
                    "operationId": "listPets",
                    "tags": ["pets"],
                    "parameters": [{
                        "name": "limit",
                        "in": "query",
                        "required": false,
                        "schema": {"type": "integer", "format": "int32", "maximum": 100}
                    }],
                    "responses": {
                        "200": {
                            "description": "A paged array of pets",
                            "headers": {
                                "x-next": {"description": "Next page", "schema": {"type": "string"}}
                            },
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/Pets"}
                                }
                            }
                        },
                        "default": {
                            "description": "unexpected error",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/Error"}
                                }
                            }
                        }
                    },
                    "x-codegen-request-body-name": "body"
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "required": ["id", "name"],
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "name": {"type": "string"},
                        "tag": {"type": "string", "nullable": true}
                    }
                },
                "Pets": {
                    "type": "array",
                    "maxItems": 100,
                    "items": {"$ref": "#/components/schemas/Pet"}
                },
                "Error": {
                    "type": "object",
                    "required": ["code", "message"],
                    "properties": {
                        "code": {"type": "integer", "format": "int32"},
                        "message": {"type": "string"}
                    }
                }
            },
            "securitySchemes": {
                "api_key": {"type": "apiKey", "name": "api_key", "in": "header"}
            }
        }
    });

    let doc = parse_value(raw.clone()).unwrap();
    assert!(doc.is_3_0());
    assert_eq!(doc.to_value().unwrap(), raw);
    assert_eq!(parse_value(doc.to_value().unwrap()).unwrap(), doc);
}

#[test]
fn test_unknown_fields_are_preserved() {
    let doc = parse_value(json!({
        "openapi": "3.1.0",
        "info": {"title": "foo", "version": "1", "x-logo": {"url": "logo.png"}},
        "x-tagGroups": [{"name": "Pets", "tags": ["pets"]}]
    }))
    .unwrap();

    let VersionedDocument::V3_1(inner) = &doc else {
        panic!("expected a 3.1 document");
    };
    assert!(inner.fields_set().contains("x-tagGroups"));
    assert_eq!(inner.info.extensions["x-logo"], json!({"url": "logo.png"}));
}

#[test]
fn test_from_json_and_yaml_agree() {
    let json_text = r#"{
        "openapi": "3.1.0",
        "info": {"title": "Pets", "version": "1.0.0"},
        "paths": {"/pets": {"get": {"responses": {"200": {"description": "ok"}}}}}
    }"#;
    let yaml_text = r#"
openapi: 3.1.0
info:
  title: Pets
  version: 1.0.0
paths:
  /pets:
    get:
      responses:
        "200":
          description: ok
"#;

    assert_eq!(from_json(json_text).unwrap(), from_yaml(yaml_text).unwrap());
}

#[test]
fn test_3_1_schema_features_survive_dispatch() {
    let doc = parse_value(json!({
        "openapi": "3.1.0",
        "info": {"title": "foo", "version": "1"},
        "components": {
            "schemas": {
                "MaybeName": {"type": ["string", "null"]},
                "Exact": {"const": "only_choice"}
            }
        }
    }))
    .unwrap();

    let VersionedDocument::V3_1(inner) = doc else {
        panic!("expected a 3.1 document");
    };
    let schemas = inner.schemas().unwrap();
    let maybe = schemas["MaybeName"].as_schema().unwrap();
    assert!(maybe
        .schema_type
        .as_ref()
        .unwrap()
        .contains(v3_1::DataType::Null));
    let exact = schemas["Exact"].as_schema().unwrap();
    assert_eq!(exact.const_value, Some(json!("only_choice")));
}

#[test]
fn test_from_file_detects_yaml() {
    use std::io::Write;

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "openapi: 3.0.2\ninfo:\n  title: Pets\n  version: '1'\npaths: {{}}").unwrap();

    let doc = oas_forge_parser::from_file(file.path()).unwrap();
    assert!(doc.is_3_0());
    assert_eq!(doc.info_title(), "Pets");
}

#[test]
fn test_from_file_missing() {
    let err = oas_forge_parser::from_file("/nonexistent/openapi.json").unwrap_err();
    assert!(err.to_string().contains("Failed to read OpenAPI file"));
}
