//! Command-line driver: load a schema, validate a form-state file, report.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, OutputFormat};
use crate::schema::{Schema, SchemaRegistry};
use crate::validation::{ValidationEngine, ValidationState};

/// Outcome of one CLI validation run
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub schema: &'a str,
    pub valid: bool,
    pub errors: Vec<FieldError<'a>>,
    pub state: &'a ValidationState,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError<'a> {
    pub field: &'a str,
    pub message: &'a str,
}

impl<'a> Report<'a> {
    pub fn new(schema: &'a str, engine: &'a ValidationEngine) -> Self {
        let state = engine.validation_state();
        let errors = state
            .iter()
            .filter(|(_, status)| !status.is_valid)
            .map(|(field, status)| FieldError {
                field,
                message: status.error.as_str(),
            })
            .collect();

        Self {
            schema,
            valid: engine.is_valid(),
            errors,
            state,
        }
    }

    pub fn write_text(&self, out: &mut impl Write) -> Result<()> {
        if self.valid {
            writeln!(out, "{}: valid", self.schema)?;
        } else {
            writeln!(
                out,
                "{}: {} invalid field(s)",
                self.schema,
                self.errors.len()
            )?;
            for error in &self.errors {
                writeln!(out, "  {}: {}", error.field, error.message)?;
            }
        }
        Ok(())
    }

    pub fn write_json(&self, out: &mut impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Build the registry: embedded schemas, then each configured directory
pub fn build_registry(config: &Config) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    registry.add_embedded_schemas();

    for dir in &config.schema_dirs {
        let loaded = registry
            .load_dir(dir)
            .with_context(|| format!("Failed to read schema directory {:?}", dir))?;
        log::debug!("Loaded {} schema(s) from {:?}", loaded, dir);
    }

    Ok(registry)
}

/// Resolve `--schema` to a shared schema and its display name
pub fn resolve_schema(config: &Config, registry: &mut SchemaRegistry) -> Result<(String, Arc<Schema>)> {
    let name = if config.schema_is_path() {
        registry
            .load_file(Path::new(&config.schema))
            .with_context(|| format!("Failed to load schema file {}", config.schema))?
    } else {
        config.schema.clone()
    };

    match registry.get(&name) {
        Some(schema) => Ok((name, schema)),
        None => bail!(
            "Unknown schema '{}'. Available: {}",
            name,
            registry.list_schemas().join(", ")
        ),
    }
}

/// Parse the form state; it must be a JSON object
pub fn parse_form_state(content: &str) -> Result<Value> {
    let state: Value = serde_json::from_str(content).context("Form state is not valid JSON")?;
    if !state.is_object() {
        bail!("Form state must be a JSON object");
    }
    Ok(state)
}

fn read_form_state(config: &Config) -> Result<Value> {
    let content = if config.reads_stdin() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read form state from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&config.state_path)
            .with_context(|| format!("Failed to read form state {:?}", config.state_path))?
    };
    parse_form_state(&content)
}

/// Run one validation pass and print the report. Returns overall validity.
pub fn run(config: &Config) -> Result<bool> {
    let mut registry = build_registry(config)?;
    let (name, schema) = resolve_schema(config, &mut registry)?;
    let form_state = read_form_state(config)?;

    let mut engine = ValidationEngine::with_shared(schema);
    let valid = if config.fields.is_empty() {
        engine.validate_all(&form_state)
    } else {
        for field in &config.fields {
            if !engine.schema().contains_field(field) {
                log::warn!("Field '{}' is not part of schema '{}'", field, name);
            }
        }
        engine.validate_fields(&form_state, &config.fields)
    };
    log::info!("Schema '{}' validated: valid={}", name, valid);

    let report = Report::new(&name, &engine);
    let mut stdout = std::io::stdout().lock();
    match config.format {
        OutputFormat::Text => report.write_text(&mut stdout)?,
        OutputFormat::Json => report.write_json(&mut stdout)?,
    }

    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person_engine() -> ValidationEngine {
        let mut registry = SchemaRegistry::new();
        registry.add_embedded_schemas();
        ValidationEngine::with_shared(registry.get("person").expect("person schema"))
    }

    #[test]
    fn test_parse_form_state() {
        assert!(parse_form_state(r#"{"name": "jack"}"#).is_ok());
        assert!(parse_form_state("[1, 2]").is_err());
        assert!(parse_form_state("{not json").is_err());
    }

    #[test]
    fn test_text_report() {
        let mut engine = person_engine();
        engine.validate_all(&json!({ "name": "bob", "age": 15, "email": "bob@ross.art" }));

        let report = Report::new("person", &engine);
        let mut out = Vec::new();
        report.write_text(&mut out).expect("write report");
        let text = String::from_utf8(out).expect("utf8");

        assert_eq!(
            text,
            "person: 2 invalid field(s)\n  name: Cannot be bob.\n  age: Must be 18.\n"
        );
    }

    #[test]
    fn test_json_report() {
        let mut engine = person_engine();
        engine.validate_all(&json!({ "name": "jack", "age": 30, "email": "jack@x.io" }));

        let report = Report::new("person", &engine);
        let mut out = Vec::new();
        report.write_json(&mut out).expect("write report");
        let parsed: Value = serde_json::from_slice(&out).expect("valid json");

        assert_eq!(parsed["valid"], json!(true));
        assert_eq!(parsed["errors"], json!([]));
        assert_eq!(parsed["state"]["age"], json!({ "isValid": true, "error": "" }));
    }
}
