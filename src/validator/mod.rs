//! Mutability-aware payload validation.
//!
//! A [`DataValidator`] is built once per resource schema and operation kind
//! and reused for every payload of that operation. It compiles the declared
//! [`MutabilityMetadata`] into a [`ValidatorPolicy`] and routes each payload by
//! the operation's [`ValidationStrategy`]:
//!
//! - partial updates are patch documents; the delta they describe is checked
//!   against required, ReadOnly and CreateOnly fields
//! - create and update requests carry complete input entities
//! - read responses carry complete output entities, checked against the schema
//!   and its declared rules only
//!
//! Validation never fails with an error. Every problem, including a
//! misconfigured validator, is reported in the returned [`ValidationResult`].
//!
//! # Examples
//!
//! ```rust
//! use mutability_validator::metadata::MutabilityMetadata;
//! use mutability_validator::operation::{MutabilityCategory, OperationKind};
//! use mutability_validator::patch::PatchDocument;
//! use mutability_validator::schema::{DataSchema, FieldDefinition, RecordSchema};
//! use mutability_validator::validator::{DataValidator, Payload};
//! use serde_json::json;
//!
//! let schema = DataSchema::record(
//!     RecordSchema::new("Greeting")
//!         .with_field(FieldDefinition::required("id", DataSchema::Long))
//!         .with_field(FieldDefinition::required("message", DataSchema::String)),
//! );
//! let metadata = MutabilityMetadata::new().with_paths(MutabilityCategory::ReadOnly, ["id"]);
//! let validator = DataValidator::new(&metadata, schema, OperationKind::PartialUpdate);
//!
//! let patch = PatchDocument::new(json!({"$set": {"id": 7}}));
//! let result = validator.validate(&Payload::from(patch));
//! assert!(!result.is_valid());
//! assert_eq!(
//!     result.messages()[0].to_string(),
//!     "/id :: ReadOnly field present in a partial_update request"
//! );
//! ```

mod delta;
mod entity;
mod mutability;


use crate::error::ValidatorError;
use crate::metadata::{FieldDeclaration, MutabilityMetadata};
use crate::operation::{MutabilityCategory, OperationKind, ValidationStrategy};
use crate::patch::{PatchApplier, PatchDocument, PatchEngine};
use crate::path::PathPredicate;
use crate::result::ValidationResult;
use crate::schema::{DataSchema, SchemaEngine, SchemaValidator, ValidationOptions};
use log::debug;
use serde_json::Value;

/// Compiled mutability policy for one schema and operation kind.
///
/// Only categories restricted for the operation contribute patterns; the
/// predicates of every other category match nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorPolicy {
    read_only: PathPredicate,
    create_only: PathPredicate,
    read_only_descendants: PathPredicate,
    create_only_descendants: PathPredicate,
    schema: DataSchema,
    operation: OperationKind,
    options: ValidationOptions,
}

impl ValidatorPolicy {
    pub fn new(metadata: &MutabilityMetadata, schema: DataSchema, operation: OperationKind) -> Self {
        let compile = |category: MutabilityCategory, include_descendants: bool| {
            if category.is_restricted_for(operation) {
                PathPredicate::compile_all(metadata.paths(category), include_descendants)
            } else {
                PathPredicate::never()
            }
        };
        let policy = Self {
            read_only: compile(MutabilityCategory::ReadOnly, false),
            create_only: compile(MutabilityCategory::CreateOnly, false),
            read_only_descendants: compile(MutabilityCategory::ReadOnly, true),
            create_only_descendants: compile(MutabilityCategory::CreateOnly, true),
            schema,
            operation,
            options: ValidationOptions::new(),
        };
        debug!(
            "Built {} policy for '{}': {} ReadOnly and {} CreateOnly patterns",
            operation,
            policy.schema.type_name(),
            policy.read_only.patterns().len(),
            policy.create_only.patterns().len()
        );
        policy
    }

    /// Replace the base options every validation pass starts from.
    ///
    /// The required mode is chosen per pass and is ignored here.
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Paths that are ReadOnly for this operation.
    pub fn read_only(&self) -> &PathPredicate {
        &self.read_only
    }

    /// Paths that are CreateOnly for this operation.
    pub fn create_only(&self) -> &PathPredicate {
        &self.create_only
    }

    /// ReadOnly paths and everything below them.
    pub fn read_only_descendants(&self) -> &PathPredicate {
        &self.read_only_descendants
    }

    /// CreateOnly paths and everything below them.
    pub fn create_only_descendants(&self) -> &PathPredicate {
        &self.create_only_descendants
    }

    pub fn schema(&self) -> &DataSchema {
        &self.schema
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }
}

/// A complete entity, as sent in create/update requests or read responses.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub data: Value,
    /// Schema the entity reports for itself, if any
    pub schema: Option<DataSchema>,
}

impl Entity {
    pub fn new(data: Value) -> Self {
        Self { data, schema: None }
    }

    pub fn with_schema(data: Value, schema: DataSchema) -> Self {
        Self {
            data,
            schema: Some(schema),
        }
    }
}

impl From<Value> for Entity {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

/// A payload to validate.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Entity(Entity),
    Patch(PatchDocument),
}

impl From<Entity> for Payload {
    fn from(entity: Entity) -> Self {
        Payload::Entity(entity)
    }
}

impl From<PatchDocument> for Payload {
    fn from(patch: PatchDocument) -> Self {
        Payload::Patch(patch)
    }
}

/// Validates payloads of one operation kind against a schema and its declared
/// mutability.
#[derive(Debug, Clone)]
pub struct DataValidator<S = SchemaValidator, P = PatchApplier> {
    policy: ValidatorPolicy,
    schema_engine: S,
    patch_engine: P,
}

impl DataValidator {
    pub fn new(metadata: &MutabilityMetadata, schema: DataSchema, operation: OperationKind) -> Self {
        Self::from_policy(ValidatorPolicy::new(metadata, schema, operation))
    }

    /// Build a validator from raw per-category declarations.
    pub fn from_declarations<I>(declarations: I, schema: DataSchema, operation: OperationKind) -> Self
    where
        I: IntoIterator<Item = FieldDeclaration>,
    {
        Self::new(
            &MutabilityMetadata::from_declarations(declarations),
            schema,
            operation,
        )
    }

    pub fn from_policy(policy: ValidatorPolicy) -> Self {
        Self::with_engines(policy, SchemaValidator::new(), PatchApplier)
    }
}

impl<S: SchemaEngine, P: PatchEngine> DataValidator<S, P> {
    /// Build a validator running on custom schema and patch engines.
    pub fn with_engines(policy: ValidatorPolicy, schema_engine: S, patch_engine: P) -> Self {
        Self {
            policy,
            schema_engine,
            patch_engine,
        }
    }

    pub fn policy(&self) -> &ValidatorPolicy {
        &self.policy
    }

    /// Validate one payload.
    pub fn validate(&self, payload: &Payload) -> ValidationResult {
        let operation = self.policy.operation;
        debug!("Validating {} payload", operation);
        match (operation.strategy(), payload) {
            (ValidationStrategy::PatchDelta, Payload::Patch(document)) => {
                delta::validate_patch(&self.policy, &self.schema_engine, &self.patch_engine, document)
            }
            (ValidationStrategy::Entity(direction), Payload::Entity(entity)) => {
                entity::validate_entity(&self.policy, &self.schema_engine, entity, direction)
            }
            (ValidationStrategy::PatchDelta, Payload::Entity(_)) => {
                ValidatorError::PayloadMismatch {
                    operation,
                    expected: "a patch document",
                }
                .into()
            }
            (ValidationStrategy::Entity(_), Payload::Patch(_)) => ValidatorError::PayloadMismatch {
                operation,
                expected: "an entity",
            }
            .into(),
        }
    }
}
