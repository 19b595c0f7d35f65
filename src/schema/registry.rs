//! Schema registry for loading, managing, and accessing named record schemas.
//!
//! Schema documents are JSON files holding either one record schema or an
//! array of record schemas. Records are registered under their `name`.

use super::types::DataSchema;
use crate::error::{SchemaError, SchemaResult, ValidatorError, ValidatorResult};

use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Registry of named record schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, DataSchema>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a schema document.
    pub fn from_json_str(content: &str) -> SchemaResult<Self> {
        let mut registry = Self::new();
        registry.load_schema_from_str(content)?;
        Ok(registry)
    }

    /// Create a schema registry by loading every `.json` file in a directory.
    pub fn from_schema_dir<P: AsRef<Path>>(schema_dir: P) -> SchemaResult<Self> {
        let mut registry = Self::new();
        let mut paths: Vec<_> = fs::read_dir(schema_dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();
        for path in paths {
            registry.load_schema_from_file(&path)?;
        }
        Ok(registry)
    }

    /// Load the schemas of a JSON file into the registry.
    pub fn load_schema_from_file<P: AsRef<Path>>(&mut self, path: P) -> SchemaResult<()> {
        let content = fs::read_to_string(&path)?;
        debug!("Loading schemas from {}", path.as_ref().display());
        self.load_schema_from_str(&content)
    }

    /// Load the schemas of a JSON document into the registry.
    pub fn load_schema_from_str(&mut self, content: &str) -> SchemaResult<()> {
        let document: Value = serde_json::from_str(content)?;
        let schemas: Vec<DataSchema> = match document {
            Value::Array(_) => serde_json::from_value(document)?,
            other => vec![serde_json::from_value(other)?],
        };
        for schema in schemas {
            self.add_schema(schema)?;
        }
        Ok(())
    }

    /// Add a record schema to the registry.
    pub fn add_schema(&mut self, schema: DataSchema) -> SchemaResult<()> {
        let Some(record) = schema.as_record() else {
            return Err(SchemaError::NotARecord {
                type_name: schema.type_name().to_string(),
            });
        };
        let name = record.name.clone();
        if self.schemas.contains_key(&name) {
            return Err(SchemaError::DuplicateSchema { name });
        }
        debug!("Registered record schema '{}'", name);
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Get a specific schema by name.
    pub fn get_schema(&self, name: &str) -> Option<&DataSchema> {
        self.schemas.get(name)
    }

    /// Get a schema by name, failing with a resolution error when it is unknown.
    pub fn resolve(&self, name: &str) -> ValidatorResult<&DataSchema> {
        self.get_schema(name)
            .ok_or_else(|| ValidatorError::schema_resolution(format!("no schema named '{}'", name)))
    }

    /// Get all registered schemas.
    pub fn get_schemas(&self) -> Vec<&DataSchema> {
        self.schemas.values().collect()
    }

    /// Names of all registered schemas, sorted.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
