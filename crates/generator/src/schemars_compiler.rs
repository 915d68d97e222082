//! Built-in compiler for Rust types implementing [`schemars::JsonSchema`]

use crate::compiler::{CompileRequest, SchemaCompiler};
use oas_forge_common::{sanitize_ref_name, JsonSchemaMode, ModelError, Result, TypeDescriptor, REF_PREFIX};
use schemars::generate::{Contract, SchemaSettings};
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};

/// Local definition prefixes schemars may emit
const LOCAL_DEF_PREFIXES: &[&str] = &["#/$defs/", "#/definitions/"];

const MODES: [JsonSchemaMode; 2] = [JsonSchemaMode::Validation, JsonSchemaMode::Serialization];

type SubschemaFn = fn(&mut SchemaGenerator) -> Schema;

/// The Rust type behind a descriptor, whatever name or mode it is requested under
type TypeKey = (String, String);

/// Descriptor for a Rust type
///
/// The module is taken from the type's path and the name from its
/// [`JsonSchema::schema_name`], so generic instantiations get distinct names.
pub fn descriptor_for<T: JsonSchema + ?Sized>() -> TypeDescriptor {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    let module = path.rsplit_once("::").map(|(module, _)| module).unwrap_or("");
    TypeDescriptor::new(module, T::schema_name())
}

fn subschema<T: JsonSchema + ?Sized>(generator: &mut SchemaGenerator) -> Schema {
    generator.subschema_for::<T>()
}

fn type_key(descriptor: &TypeDescriptor) -> TypeKey {
    (descriptor.module.clone(), descriptor.name.clone())
}

fn generator_for(mode: JsonSchemaMode) -> SchemaGenerator {
    let contract = match mode {
        JsonSchemaMode::Validation => Contract::Deserialize,
        JsonSchemaMode::Serialization => Contract::Serialize,
    };
    SchemaSettings::draft2020_12()
        .with(|settings| settings.contract = contract)
        .into_generator()
}

/// Suffix for a definition whose schema depends on the mode
fn mode_suffix(mode: JsonSchemaMode) -> &'static str {
    match mode {
        JsonSchemaMode::Validation => "Input",
        JsonSchemaMode::Serialization => "Output",
    }
}

fn local_target(target: &str) -> Option<&str> {
    LOCAL_DEF_PREFIXES
        .iter()
        .find_map(|prefix| target.strip_prefix(prefix))
}

/// Name of the local definition a `{"$ref": ...}` schema points at
fn local_definition(schema: &Value) -> Option<&str> {
    local_target(schema.get("$ref")?.as_str()?)
}

/// Every local definition referenced anywhere inside `value`
fn local_refs<'v>(value: &'v Value, found: &mut Vec<&'v str>) {
    match value {
        Value::Object(map) => {
            if let Some(local) = map.get("$ref").and_then(Value::as_str).and_then(local_target) {
                found.push(local);
            }
            map.values().for_each(|child| local_refs(child, found));
        }
        Value::Array(list) => list.iter().for_each(|child| local_refs(child, found)),
        _ => {}
    }
}

fn rewrite_refs(value: &mut Value, key_for: &dyn Fn(&str) -> String) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(target)) = map.get_mut("$ref") {
                if let Some(local) = local_target(target) {
                    *target = format!("{}{}", REF_PREFIX, key_for(local));
                }
            }
            map.values_mut().for_each(|child| rewrite_refs(child, key_for));
        }
        Value::Array(list) => list.iter_mut().for_each(|child| rewrite_refs(child, key_for)),
        _ => {}
    }
}

/// Where a requested type's schema ended up
enum Root {
    /// Stored as a named definition
    Defined(String),
    /// Returned inline (primitives, `Option<T>`, ...)
    Inline(Value),
}

/// Definitions of both generators and the registry key each one gets
struct Definitions<'g> {
    validation: &'g Map<String, Value>,
    serialization: &'g Map<String, Value>,
    /// Root definitions renamed to their generated names
    renames: HashMap<(JsonSchemaMode, String), String>,
    /// Definitions whose schema differs between the modes
    split: HashSet<String>,
}

impl<'g> Definitions<'g> {
    fn new(
        validation: &'g Map<String, Value>,
        serialization: &'g Map<String, Value>,
        renames: HashMap<(JsonSchemaMode, String), String>,
    ) -> Self {
        let mut split: HashSet<String> = validation
            .iter()
            .filter(|(name, schema)| {
                serialization
                    .get(name.as_str())
                    .is_some_and(|other| other != *schema)
            })
            .map(|(name, _)| name.clone())
            .collect();

        // a shared definition referring to a split one must split as well
        loop {
            let spread: Vec<String> = validation
                .iter()
                .filter(|(name, _)| !split.contains(*name) && serialization.contains_key(*name))
                .filter(|(_, schema)| {
                    let mut refs = Vec::new();
                    local_refs(schema, &mut refs);
                    refs.iter().any(|local| split.contains(*local))
                })
                .map(|(name, _)| name.clone())
                .collect();
            if spread.is_empty() {
                break;
            }
            split.extend(spread);
        }

        Self {
            validation,
            serialization,
            renames,
            split,
        }
    }

    fn of(&self, mode: JsonSchemaMode) -> &'g Map<String, Value> {
        match mode {
            JsonSchemaMode::Validation => self.validation,
            JsonSchemaMode::Serialization => self.serialization,
        }
    }

    fn key(&self, mode: JsonSchemaMode, name: &str) -> String {
        if let Some(target) = self.renames.get(&(mode, name.to_string())) {
            return target.clone();
        }
        if self.split.contains(name) {
            return format!("{}-{}", sanitize_ref_name(name), mode_suffix(mode));
        }
        MODES
            .iter()
            .find_map(|other| self.renames.get(&(*other, name.to_string())))
            .cloned()
            .unwrap_or_else(|| sanitize_ref_name(name))
    }

    fn rewritten(&self, mode: JsonSchemaMode, schema: &Value) -> Value {
        let mut schema = schema.clone();
        rewrite_refs(&mut schema, &|local| self.key(mode, local));
        schema
    }
}

/// Compiles registered Rust types with `schemars`
///
/// A dependency that looks different in validation and serialization mode
/// is emitted twice, as `<Name>-Input` and `<Name>-Output`.
///
/// # Example
/// ```
/// use oas_forge_generator::{CompileRequest, SchemaCompiler, SchemarsCompiler};
///
/// #[derive(schemars::JsonSchema)]
/// struct Pet {
///     name: String,
/// }
///
/// let mut compiler = SchemarsCompiler::new();
/// let pet = compiler.register::<Pet>();
/// let output = compiler.compile(&[CompileRequest::new(pet)], true).unwrap();
/// assert_eq!(output["$defs"]["Pet"]["type"], "object");
/// ```
#[derive(Debug, Default)]
pub struct SchemarsCompiler {
    types: HashMap<TypeKey, SubschemaFn>,
}

impl SchemarsCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `T` compilable and return its descriptor
    ///
    /// The descriptor may be given a qualified name or a mode afterwards; it
    /// still resolves to `T`.
    pub fn register<T: JsonSchema + ?Sized>(&mut self) -> TypeDescriptor {
        let descriptor = descriptor_for::<T>();
        tracing::debug!("Registered {} for schema compilation", descriptor);
        self.types.insert(type_key(&descriptor), subschema::<T>);
        descriptor
    }

    pub fn is_registered(&self, descriptor: &TypeDescriptor) -> bool {
        self.types.contains_key(&type_key(descriptor))
    }
}

impl SchemaCompiler for SchemarsCompiler {
    fn compile(&self, requests: &[CompileRequest], by_alias: bool) -> Result<Value> {
        if !by_alias {
            return Err(ModelError::Compiler(
                "schemars only knows serde wire names; by_alias = false is not supported"
                    .to_string(),
            ));
        }

        let mut validation = generator_for(JsonSchemaMode::Validation);
        let mut serialization = generator_for(JsonSchemaMode::Serialization);

        let mut roots = Vec::with_capacity(requests.len());
        let mut renames = HashMap::new();
        for request in requests {
            let subschema = self.types.get(&type_key(&request.descriptor)).ok_or_else(|| {
                ModelError::Compiler(format!(
                    "Type {} is not registered with the schema compiler",
                    request.descriptor
                ))
            })?;

            let generator = match request.mode {
                JsonSchemaMode::Validation => &mut validation,
                JsonSchemaMode::Serialization => &mut serialization,
            };
            let schema = Value::from(subschema(generator));
            let target = request.descriptor.generated_name();
            let root = match local_definition(&schema) {
                Some(name) => {
                    renames.insert((request.mode, name.to_string()), target.clone());
                    Root::Defined(name.to_string())
                }
                None => Root::Inline(schema),
            };
            roots.push((target, request.mode, root));
        }

        let definitions = Definitions::new(
            validation.definitions(),
            serialization.definitions(),
            renames,
        );

        let mut output = Map::new();
        for (target, mode, root) in roots {
            let schema = match &root {
                Root::Defined(name) => definitions.of(mode).get(name).ok_or_else(|| {
                    ModelError::Compiler(format!("schemars did not define '{}'", name))
                })?,
                Root::Inline(schema) => schema,
            };
            let schema = definitions.rewritten(mode, schema);
            output.insert(target, schema);
        }

        for mode in MODES {
            for (name, schema) in definitions.of(mode) {
                let key = definitions.key(mode, name);
                if !output.contains_key(&key) {
                    let schema = definitions.rewritten(mode, schema);
                    output.insert(key, schema);
                }
            }
        }

        Ok(json!({ "$defs": output }))
    }
}
