//! Integration tests for schema synthesis

use oas_forge_common::{JsonSchemaMode, Result, TypeDescriptor};
use oas_forge_generator::{
    synthesize, synthesize_versioned, CompileRequest, SchemaCompiler, SchemarsCompiler,
    SynthesisOptions,
};
use oas_forge_parser::{parse_value, v3_0, v3_1, Entity, ReferenceOr, SchemaOrRef, V30, V31};
use pretty_assertions::assert_eq;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::io;
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
#[derive(Serialize, Deserialize, JsonSchema)]
struct Pet {
    name: String,
    tag: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
enum Choice {
    #[serde(rename = "only_choice")]
    OnlyChoice,
}

#[allow(dead_code)]
#[derive(Serialize, Deserialize, JsonSchema)]
struct Ballot {
    choice: Choice,
}

/// Answers every request with an empty object schema under its generated
/// name and remembers what it was asked
#[derive(Default)]
struct RecordingCompiler {
    calls: RefCell<Vec<(Vec<CompileRequest>, bool)>>,
}

impl SchemaCompiler for RecordingCompiler {
    fn compile(&self, requests: &[CompileRequest], by_alias: bool) -> Result<Value> {
        self.calls.borrow_mut().push((requests.to_vec(), by_alias));
        let defs: serde_json::Map<String, Value> = requests
            .iter()
            .map(|r| (r.descriptor.generated_name(), json!({"type": "object"})))
            .collect();
        Ok(json!({ "$defs": defs }))
    }
}

/// Log sink shared between a test and its subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn response_with(schema: v3_1::SchemaOrRef) -> ReferenceOr<v3_1::Response> {
    ReferenceOr::Item(
        v3_1::Response::new("ok").with_content(
            [(
                "application/json".to_string(),
                v3_1::MediaType::with_schema(schema),
            )]
            .into_iter()
            .collect(),
        ),
    )
}

fn doc_with_placeholders(descriptors: &[TypeDescriptor]) -> v3_1::OpenApi {
    let mut doc = v3_1::OpenApi::new(v3_1::Info::new("Pets", "1.0.0"));
    let responses: v3_1::Responses = descriptors
        .iter()
        .enumerate()
        .map(|(i, d)| {
            (
                (200 + i).to_string(),
                response_with(SchemaOrRef::placeholder(d.clone())),
            )
        })
        .collect();
    let item = v3_1::PathItem {
        get: Some(v3_1::Operation {
            responses: Some(responses),
            ..Default::default()
        }),
        ..Default::default()
    };
    doc.paths = Some([("/pets".to_string(), item)].into_iter().collect());
    doc
}

fn response_schema(doc: &v3_1::OpenApi, status: &str) -> Value {
    doc.to_value().unwrap()["paths"]["/pets"]["get"]["responses"][status]["content"]
        ["application/json"]["schema"]
        .clone()
}

#[test]
fn test_duplicate_placeholders_share_one_entry() {
    let mut compiler = SchemarsCompiler::new();
    let pet = compiler.register::<Pet>();
    let doc = doc_with_placeholders(&[pet.clone(), pet]);

    let result = synthesize::<V31>(&doc, &compiler, &SynthesisOptions::default()).unwrap();

    assert_eq!(response_schema(&result, "200"), json!({"$ref": "#/components/schemas/Pet"}));
    assert_eq!(response_schema(&result, "200"), response_schema(&result, "201"));
    let names: Vec<_> = result.schemas().unwrap().keys().cloned().collect();
    assert_eq!(names, vec!["Pet"]);
}

#[test]
fn test_generic_names_are_sanitized() {
    let compiler = RecordingCompiler::default();
    let generic = TypeDescriptor::new("app.models", "Generic[Inner]");
    let doc = doc_with_placeholders(&[generic]);

    let result = synthesize::<V31>(&doc, &compiler, &SynthesisOptions::default()).unwrap();

    assert_eq!(
        response_schema(&result, "200"),
        json!({"$ref": "#/components/schemas/Generic_Inner_"})
    );
    assert!(result.schemas().unwrap().contains_key("Generic_Inner_"));
}

#[test]
fn test_openapi_3_0_nullable_field() {
    let mut compiler = SchemarsCompiler::new();
    let pet = compiler.register::<Pet>();
    let doc = v3_0::OpenApi::new(v3_0::Info::new("Pets", "1.0.0"));

    let options = SynthesisOptions::new().with_extra_types([pet]);
    let result = synthesize::<V30>(&doc, &compiler, &options).unwrap();

    let pet = result.schemas().unwrap()["Pet"].to_owned();
    let pet = serde_json::to_value(&pet).unwrap();
    assert_eq!(
        pet["properties"]["tag"]["type"],
        json!("string"),
        "got {pet:#}"
    );
    assert_eq!(pet["properties"]["tag"]["nullable"], json!(true));
    assert_eq!(pet["properties"]["name"]["type"], json!("string"));
}

#[test]
fn test_openapi_3_0_single_literal() {
    let mut compiler = SchemarsCompiler::new();
    let ballot = compiler.register::<Ballot>();
    let doc = v3_0::OpenApi::new(v3_0::Info::new("Votes", "1.0.0"));

    let options = SynthesisOptions::new().with_extra_types([ballot]);
    let result = synthesize::<V30>(&doc, &compiler, &options).unwrap();

    let choice = serde_json::to_value(&result.schemas().unwrap()["Choice"]).unwrap();
    assert_eq!(choice["enum"], json!(["only_choice"]), "got {choice:#}");
    assert_eq!(choice["type"], json!("string"));
    assert!(choice.get("const").is_none());
}

#[test]
fn test_openapi_3_1_keeps_null_type() {
    let mut compiler = SchemarsCompiler::new();
    let pet = compiler.register::<Pet>();
    let doc = v3_1::OpenApi::new(v3_1::Info::new("Pets", "1.0.0"));

    let options = SynthesisOptions::new().with_extra_types([pet]);
    let result = synthesize::<V31>(&doc, &compiler, &options).unwrap();

    let pet = serde_json::to_value(&result.schemas().unwrap()["Pet"]).unwrap();
    assert_eq!(pet["properties"]["tag"]["type"], json!(["string", "null"]));
}

#[test]
fn test_existing_entry_is_overwritten() {
    let mut compiler = SchemarsCompiler::new();
    let pet = compiler.register::<Pet>();

    let mut doc = v3_1::OpenApi::new(v3_1::Info::new("Pets", "1.0.0"));
    doc.schemas_mut().insert(
        "Pet".to_string(),
        SchemaOrRef::schema(v3_1::Schema::of_type(v3_1::DataType::String)),
    );
    doc.schemas_mut().insert(
        "Other".to_string(),
        SchemaOrRef::schema(v3_1::Schema::of_type(v3_1::DataType::Integer)),
    );

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let options = SynthesisOptions::new().with_extra_types([pet]);
    let result = tracing::subscriber::with_default(subscriber, || {
        synthesize::<V31>(&doc, &compiler, &options)
    })
    .unwrap();

    let logs = logs.contents();
    assert!(logs.contains("WARN"), "got {logs}");
    assert!(logs.contains(
        "\"Pet\" already exists in #/components/schemas/. \
         The value of \"#/components/schemas/Pet\" will be overwritten."
    ));
    assert!(!logs.contains("\"Other\""));

    let schemas = result.schemas().unwrap();
    let names: Vec<_> = schemas.keys().cloned().collect();
    assert_eq!(names, vec!["Pet", "Other"]);
    let pet = schemas["Pet"].as_schema().unwrap();
    assert!(pet.properties.as_ref().unwrap().contains_key("name"));

    // the caller's document is untouched
    assert_eq!(
        doc.schemas().unwrap()["Pet"],
        SchemaOrRef::schema(v3_1::Schema::of_type(v3_1::DataType::String))
    );
}

#[test]
fn test_extra_types_match_scanned_placeholders() {
    let mut compiler = SchemarsCompiler::new();
    let pet = compiler.register::<Pet>();

    let scanned_doc = doc_with_placeholders(&[pet.clone()]);
    let scanned =
        synthesize::<V31>(&scanned_doc, &compiler, &SynthesisOptions::default()).unwrap();

    let mut explicit_doc = doc_with_placeholders(&[]);
    explicit_doc.paths.as_mut().unwrap()["/pets"]
        .get
        .as_mut()
        .unwrap()
        .responses = Some(
        [(
            "200".to_string(),
            response_with(SchemaOrRef::reference("#/components/schemas/Pet")),
        )]
        .into_iter()
        .collect(),
    );
    let explicit = synthesize::<V31>(
        &explicit_doc,
        &compiler,
        &SynthesisOptions::new()
            .with_scan_for_placeholders(false)
            .with_extra_types([pet]),
    )
    .unwrap();

    assert_eq!(scanned.into_owned(), explicit.into_owned());
}

#[test]
fn test_requests_are_sorted_and_modes_forwarded() {
    let compiler = RecordingCompiler::default();
    let zebra = TypeDescriptor::new("app", "Zebra");
    let apple = TypeDescriptor::new("app", "Apple").with_mode(JsonSchemaMode::Serialization);
    let doc = doc_with_placeholders(&[zebra, apple.clone()]);

    synthesize::<V31>(
        &doc,
        &compiler,
        &SynthesisOptions::new().with_extra_types([apple]),
    )
    .unwrap();

    let calls = compiler.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (requests, by_alias) = &calls[0];
    assert!(*by_alias);
    let seen: Vec<_> = requests
        .iter()
        .map(|r| (r.descriptor.name.as_str(), r.mode))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("Apple", JsonSchemaMode::Serialization),
            ("Zebra", JsonSchemaMode::Validation)
        ]
    );
}

#[test]
fn test_versioned_round_trip() {
    let mut compiler = SchemarsCompiler::new();
    let pet = compiler.register::<Pet>();
    let doc = parse_value(json!({
        "openapi": "3.0.3",
        "info": {"title": "Pets", "version": "1.0.0"},
        "paths": {}
    }))
    .unwrap();

    let options = SynthesisOptions::new().with_extra_types([pet]);
    let result = synthesize_versioned(&doc, &compiler, &options).unwrap();

    assert!(result.is_3_0());
    let exported = result.to_value().unwrap();
    assert_eq!(parse_value(exported).unwrap(), result.into_owned());
}
