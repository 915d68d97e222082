//! oas-forge CLI
//!
//! Command-line interface for validating and inspecting OpenAPI 3.0/3.1 documents.

mod logging;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::*;
use oas_forge_parser::{from_json, from_yaml, Dialect, VersionedDocument, V30, V31};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "oas-forge")]
#[command(version, about = "Validate and inspect OpenAPI 3.0/3.1 documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and report its OpenAPI version
    #[command(after_help = "EXAMPLES:\n  \
        # Validate a YAML document\n  \
        oas-forge validate petstore.yaml\n\n  \
        # Force JSON decoding for an unusual extension\n  \
        oas-forge validate api.spec --format json")]
    Validate {
        /// Path to the document
        file: PathBuf,

        /// Input format (detected from the extension if not specified)
        #[arg(short, long)]
        format: Option<InputFormat>,
    },

    /// Summarize a document: title, version, paths and component schemas
    #[command(after_help = "EXAMPLES:\n  \
        # Human readable summary\n  \
        oas-forge inspect petstore.json\n\n  \
        # Machine readable summary\n  \
        oas-forge inspect petstore.yaml --json")]
    Inspect {
        /// Path to the document
        file: PathBuf,

        /// Input format (detected from the extension if not specified)
        #[arg(short, long)]
        format: Option<InputFormat>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Json,
    Yaml,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Json => write!(f, "JSON"),
            InputFormat::Yaml => write!(f, "YAML"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Validate { file, format } => validate_command(&file, format)?,
        Commands::Inspect { file, format, json } => inspect_command(&file, format, json)?,
    }

    Ok(())
}

fn validate_command(path: &Path, format: Option<InputFormat>) -> Result<()> {
    println!("{} Validating: {}", "→".cyan(), path.display());

    let document = load_document(path, format)?;

    println!(
        "{} Valid {} document (openapi {})",
        "✓".green(),
        dialect_name(&document).yellow(),
        document.version().yellow()
    );
    Ok(())
}

fn inspect_command(path: &Path, format: Option<InputFormat>, json: bool) -> Result<()> {
    let document = load_document(path, format)?;
    let summary = Summary::of(&document);

    if json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("Failed to render summary")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("{}", summary.title.bold());
    println!("  Dialect: {}", summary.dialect.yellow());
    println!("  Version: {}", summary.version);
    println!("  API version: {}", summary.api_version);
    println!("  Paths: {}", summary.paths);
    println!("  Operations: {}", summary.operations);
    if summary.schemas.is_empty() {
        println!("  Schemas: none");
    } else {
        println!("  Schemas ({}):", summary.schemas.len());
        for name in &summary.schemas {
            println!("    • {}", name.cyan());
        }
    }
    Ok(())
}

/// Input format from the file extension; anything but `.yaml`/`.yml` is JSON
fn detect_format(path: &Path) -> InputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            InputFormat::Yaml
        }
        _ => InputFormat::Json,
    }
}

fn load_document(path: &Path, format: Option<InputFormat>) -> Result<VersionedDocument> {
    let format = format.unwrap_or_else(|| detect_format(path));
    tracing::info!("Reading {} as {}", path.display(), format);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let document = match format {
        InputFormat::Json => from_json(&content),
        InputFormat::Yaml => from_yaml(&content),
    }
    .with_context(|| format!("Failed to parse OpenAPI document {}", path.display()))?;

    Ok(document)
}

fn dialect_name(document: &VersionedDocument) -> &'static str {
    match document {
        VersionedDocument::V3_0(_) => V30::NAME,
        VersionedDocument::V3_1(_) => V31::NAME,
    }
}

fn schema_names<D: Dialect>(document: &D::Document) -> Vec<String> {
    D::schemas(document)
        .map(|schemas| schemas.keys().cloned().collect())
        .unwrap_or_default()
}

/// What `inspect` reports
#[derive(Debug, PartialEq, Serialize)]
struct Summary {
    title: String,
    dialect: &'static str,
    version: String,
    api_version: String,
    paths: usize,
    operations: usize,
    schemas: Vec<String>,
}

impl Summary {
    fn of(document: &VersionedDocument) -> Self {
        let (api_version, paths, operations, schemas): (String, usize, usize, Vec<String>) =
            match document {
                VersionedDocument::V3_0(doc) => (
                    doc.info.version.clone(),
                    doc.paths.len(),
                    doc.paths.values().map(|item| item.operations().count()).sum(),
                    schema_names::<V30>(doc),
                ),
                VersionedDocument::V3_1(doc) => {
                    let paths = doc.paths.as_ref();
                    (
                        doc.info.version.clone(),
                        paths.map_or(0, |paths| paths.len()),
                        paths.map_or(0, |paths| {
                            paths.values().map(|item| item.operations().count()).sum()
                        }),
                        schema_names::<V31>(doc),
                    )
                }
            };

        Self {
            title: document.info_title().to_string(),
            dialect: dialect_name(document),
            version: document.version().to_string(),
            api_version,
            paths,
            operations,
            schemas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const PETSTORE_YAML: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 2.1.0
paths:
  /pets:
    get:
      responses:
        "200":
          description: ok
    post:
      responses:
        "201":
          description: created
  /pets/{id}:
    get:
      responses:
        "200":
          description: ok
components:
  schemas:
    Pet:
      type: object
    Error:
      type: object
"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("api.yaml")), InputFormat::Yaml);
        assert_eq!(detect_format(Path::new("api.YML")), InputFormat::Yaml);
        assert_eq!(detect_format(Path::new("api.json")), InputFormat::Json);
        assert_eq!(detect_format(Path::new("api")), InputFormat::Json);
    }

    #[test]
    fn test_summary_of_yaml_document() {
        let file = write_temp(".yaml", PETSTORE_YAML);
        let document = load_document(file.path(), None).unwrap();

        assert_eq!(
            Summary::of(&document),
            Summary {
                title: "Petstore".to_string(),
                dialect: "OpenAPI 3.0",
                version: "3.0.3".to_string(),
                api_version: "2.1.0".to_string(),
                paths: 2,
                operations: 3,
                schemas: vec!["Pet".to_string(), "Error".to_string()],
            }
        );
    }

    #[test]
    fn test_summary_of_webhook_only_document() {
        let file = write_temp(
            ".json",
            r#"{"openapi": "3.1.0", "info": {"title": "Hooks", "version": "1"}, "webhooks": {}}"#,
        );
        let summary = Summary::of(&load_document(file.path(), None).unwrap());
        assert_eq!(summary.dialect, "OpenAPI 3.1");
        assert_eq!(summary.paths, 0);
        assert!(summary.schemas.is_empty());
    }

    #[test]
    fn test_format_override() {
        let file = write_temp(".txt", PETSTORE_YAML);
        assert!(load_document(file.path(), None).is_err());
        assert!(load_document(file.path(), Some(InputFormat::Yaml)).is_ok());
    }

    #[test]
    fn test_errors_carry_context() {
        let file = write_temp(
            ".json",
            r#"{"openapi": "2.0", "info": {"title": "Old", "version": "1"}}"#,
        );
        let err = load_document(file.path(), None).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to parse OpenAPI document"));
        assert!(message.contains("Unsupported OpenAPI version '2.0'"));

        let err = load_document(Path::new("/nonexistent/api.json"), None).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["oas-forge", "-vv", "inspect", "api.yaml", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Inspect { file, format, json } => {
                assert_eq!(file, PathBuf::from("api.yaml"));
                assert_eq!(format, None);
                assert!(json);
            }
            Commands::Validate { .. } => panic!("expected inspect"),
        }

        let cli =
            Cli::try_parse_from(["oas-forge", "validate", "api.spec", "--format", "yaml"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Validate {
                format: Some(InputFormat::Yaml),
                ..
            }
        ));
    }
}
