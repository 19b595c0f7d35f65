//! Validation of partial-update patch documents.
//!
//! A patch is judged by the delta it describes, not by a complete entity. It
//! is applied to an empty instance of the root record and the reported
//! operations are checked in three gated stages:
//!
//! 1. deletes must not target required fields or anything at or below a
//!    ReadOnly or CreateOnly path; all violations are collected
//! 2. every set value must be complete on its own; the first incomplete
//!    subtree is reported
//! 3. the patched instance is validated with required fields ignored, running
//!    the declared rules and rejecting ReadOnly and CreateOnly values
//!
//! Values inside arrays cannot be patched individually, so a required field of
//! an array element that is also ReadOnly or CreateOnly can never be both
//! present and absent: such arrays cannot be changed by a partial update.

use super::ValidatorPolicy;
use super::mutability::MutabilityRuleValidator;
use crate::error::{ValidatorError, ValidatorResult};
use crate::patch::{PatchCommand, PatchDocument, PatchEngine, PatchOperation};
use crate::result::{Message, ValidationResult};
use crate::schema::{DataElement, DataSchema, RequiredMode, SchemaEngine, field_at};
use log::{debug, trace};
use serde_json::{Map, Value};

pub(super) fn validate_patch<S: SchemaEngine, P: PatchEngine>(
    policy: &ValidatorPolicy,
    schema_engine: &S,
    patch_engine: &P,
    document: &PatchDocument,
) -> ValidationResult {
    let mut entity = match instantiate(policy.schema()) {
        Ok(entity) => entity,
        Err(error) => return error.into(),
    };
    let operations = match patch_engine.apply(document, &mut entity) {
        Ok(operations) => operations,
        Err(error) => return ValidatorError::from(error).into(),
    };
    debug!("Patch performed {} operations", operations.len());

    let violations = check_deletes(policy, &operations);
    if !violations.is_empty() {
        return ValidationResult::from_messages(violations);
    }

    if let Some(failure) = check_sets(policy, schema_engine, &entity, &operations) {
        return failure;
    }

    let options = policy
        .options()
        .clone()
        .with_required_mode(RequiredMode::Ignore);
    let validator = MutabilityRuleValidator::new(policy);
    let result = schema_engine.validate(
        DataElement::root(&entity, policy.schema()),
        &options,
        Some(&validator),
    );
    // A fixup of the patched empty instance says nothing about the patch.
    ValidationResult::from_messages(result.into_messages())
}

/// The empty instance of the root schema a patch is applied to.
fn instantiate(schema: &DataSchema) -> ValidatorResult<Value> {
    match schema {
        DataSchema::Record(_) => Ok(Value::Object(Map::new())),
        other => Err(ValidatorError::Instantiation {
            type_name: other.type_name().to_string(),
        }),
    }
}

fn check_deletes(policy: &ValidatorPolicy, operations: &[PatchOperation]) -> Vec<Message> {
    let mut messages = Vec::new();
    for operation in operations
        .iter()
        .filter(|operation| operation.command == PatchCommand::Delete)
    {
        trace!("Checking delete of {}", operation.path);
        let path = operation.path.components();
        if field_at(policy.schema(), path).is_some_and(|field| field.must_be_present()) {
            messages.push(Message::new(
                operation.path.clone(),
                "cannot delete a required field",
            ));
        }
        if policy.read_only_descendants().matches(path) {
            messages.push(Message::new(
                operation.path.clone(),
                "cannot delete a ReadOnly field or its descendants",
            ));
        } else if policy.create_only_descendants().matches(path) {
            messages.push(Message::new(
                operation.path.clone(),
                "cannot delete a CreateOnly field or its descendants",
            ));
        }
    }
    messages
}

fn check_sets<S: SchemaEngine>(
    policy: &ValidatorPolicy,
    schema_engine: &S,
    entity: &Value,
    operations: &[PatchOperation],
) -> Option<ValidationResult> {
    let root = DataElement::root(entity, policy.schema());
    let options = policy
        .options()
        .clone()
        .with_required_mode(RequiredMode::Enforce);
    for operation in operations
        .iter()
        .filter(|operation| operation.command == PatchCommand::Set)
    {
        let Some(element) = root.descend(operation.path.components()) else {
            // Unknown to the schema; the final pass reports it.
            trace!("No schema element at {}, skipping set check", operation.path);
            continue;
        };
        trace!("Checking set of {}", operation.path);
        let result = schema_engine.validate(element, &options, None);
        if !result.is_valid() {
            return Some(ValidationResult::from_messages(result.into_messages()));
        }
    }
    None
}
