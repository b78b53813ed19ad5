//! Schema Registry
//!
//! Named schemas, loaded from disk or embedded in the binary.

use super::error::SchemaError;
use super::file::{NamedSchema, SchemaFile};
use super::rule::Schema;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const EMBEDDED_PERSON: &str = include_str!("../../resources/schemas/person.form.toml");

/// In-memory registry of named schemas
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
    descriptions: HashMap<String, String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema, replacing any schema already registered under the name
    pub fn add_schema(&mut self, named: NamedSchema) {
        if self.schemas.contains_key(&named.name) {
            log::debug!("Overriding schema '{}'", named.name);
        }
        match named.description {
            Some(description) => {
                self.descriptions.insert(named.name.clone(), description);
            }
            None => {
                self.descriptions.remove(&named.name);
            }
        }
        self.schemas.insert(named.name, Arc::new(named.schema));
    }

    /// Shared handle to a registered schema
    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.descriptions.get(name).map(String::as_str)
    }

    /// Registered schema names, sorted
    pub fn list_schemas(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Load and register a single schema file, returning its name
    pub fn load_file(&mut self, path: &Path) -> Result<String, SchemaError> {
        let named = SchemaFile::load(path)?.compile()?;
        let name = named.name.clone();
        log::info!("Loaded schema '{}' from {:?}", name, path);
        self.add_schema(named);
        Ok(name)
    }

    /// Load every `*.form.toml` / `*.form.json` file in a directory.
    ///
    /// Malformed files are logged and skipped. A missing directory loads
    /// nothing. Returns the number of schemas loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, SchemaError> {
        if !dir.is_dir() {
            log::debug!("Schema directory {:?} does not exist, skipping", dir);
            return Ok(0);
        }

        let entries = std::fs::read_dir(dir).map_err(|source| SchemaError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_schema_file(path))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(_) => loaded += 1,
                Err(e) => log::warn!("Skipping schema file {:?}: {}", path, e),
            }
        }

        Ok(loaded)
    }

    /// Register the schemas compiled into the binary
    pub fn add_embedded_schemas(&mut self) {
        match SchemaFile::from_toml_str(EMBEDDED_PERSON).and_then(|file| file.compile()) {
            Ok(named) => self.add_schema(named),
            Err(e) => log::warn!("Failed to parse embedded person schema: {}", e),
        }
    }
}

fn is_schema_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".form.toml") || name.ends_with(".form.json"))
}
