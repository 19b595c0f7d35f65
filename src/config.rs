//! Static per-resource validation configuration.
//!
//! A resource configuration names the record schema of a resource and declares
//! its ReadOnly and CreateOnly paths, along with the base validation options:
//!
//! ```json
//! {
//!   "schema": "Photo",
//!   "readOnly": ["id", "createdAt", "albums/*/id"],
//!   "createOnly": ["owner/name"],
//!   "allowUnrecognizedFields": false,
//!   "coercion": "normal"
//! }
//! ```

use crate::error::{ValidatorError, ValidatorResult};
use crate::metadata::MutabilityMetadata;
use crate::operation::{MutabilityCategory, OperationKind};
use crate::schema::{CoercionMode, SchemaRegistry, ValidationOptions};
use crate::validator::{DataValidator, ValidatorPolicy};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Validation configuration of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceConfig {
    /// Name of the resource's record schema
    pub schema: String,
    #[serde(default)]
    pub read_only: Vec<String>,
    #[serde(default)]
    pub create_only: Vec<String>,
    #[serde(default)]
    pub allow_unrecognized_fields: bool,
    #[serde(default)]
    pub coercion: CoercionMode,
}

impl ResourceConfig {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            read_only: Vec::new(),
            create_only: Vec::new(),
            allow_unrecognized_fields: false,
            coercion: CoercionMode::default(),
        }
    }

    pub fn from_json_str(content: &str) -> ValidatorResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ValidatorResult<Self> {
        debug!("Loading resource configuration from {}", path.as_ref().display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    fn check(&self) -> ValidatorResult<()> {
        if self.schema.trim().is_empty() {
            return Err(ValidatorError::invalid_configuration(
                "schema name must not be empty",
            ));
        }
        let declared = [
            (MutabilityCategory::ReadOnly, &self.read_only),
            (MutabilityCategory::CreateOnly, &self.create_only),
        ];
        for (category, paths) in declared {
            if paths.iter().any(|path| path.trim_matches('/').is_empty()) {
                return Err(ValidatorError::invalid_configuration(format!(
                    "empty path declared as {}",
                    category
                )));
            }
        }
        Ok(())
    }

    /// The declared mutability metadata.
    pub fn metadata(&self) -> MutabilityMetadata {
        MutabilityMetadata::new()
            .with_paths(MutabilityCategory::ReadOnly, &self.read_only)
            .with_paths(MutabilityCategory::CreateOnly, &self.create_only)
    }

    /// Base options every validation pass starts from.
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions::new()
            .with_coercion_mode(self.coercion)
            .allowing_unrecognized_fields(self.allow_unrecognized_fields)
    }

    /// Compile the policy of `operation`, resolving the schema in `registry`.
    pub fn policy(
        &self,
        registry: &SchemaRegistry,
        operation: OperationKind,
    ) -> ValidatorResult<ValidatorPolicy> {
        let schema = registry.resolve(&self.schema)?.clone();
        Ok(ValidatorPolicy::new(&self.metadata(), schema, operation)
            .with_options(self.validation_options()))
    }

    /// Build the validator of `operation`.
    pub fn validator(
        &self,
        registry: &SchemaRegistry,
        operation: OperationKind,
    ) -> ValidatorResult<DataValidator> {
        self.policy(registry, operation)
            .map(DataValidator::from_policy)
    }
}
