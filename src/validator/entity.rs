//! Validation of complete entities.

use super::mutability::MutabilityRuleValidator;
use super::{Entity, ValidatorPolicy};
use crate::error::ValidatorError;
use crate::operation::{Direction, MutabilityCategory};
use crate::result::ValidationResult;
use crate::schema::{DataElement, RequiredMode, SchemaEngine, SchemaRuleValidator};

pub(super) fn validate_entity<S: SchemaEngine>(
    policy: &ValidatorPolicy,
    schema_engine: &S,
    entity: &Entity,
    direction: Direction,
) -> ValidationResult {
    match direction {
        Direction::Input => validate_input(policy, schema_engine, entity),
        Direction::Output => validate_output(policy, schema_engine, entity),
    }
}

/// Request bodies: required fields are enforced, except ReadOnly fields on
/// operations where the server assigns them, and ReadOnly/CreateOnly values
/// are rejected.
fn validate_input<S: SchemaEngine>(
    policy: &ValidatorPolicy,
    schema_engine: &S,
    entity: &Entity,
) -> ValidationResult {
    let schema = entity.schema.as_ref().unwrap_or(policy.schema());
    let required_mode = if MutabilityCategory::ReadOnly.is_optional_for(policy.operation()) {
        RequiredMode::TreatListedAsOptional(policy.read_only().clone())
    } else {
        RequiredMode::Enforce
    };
    let options = policy.options().clone().with_required_mode(required_mode);
    let validator = MutabilityRuleValidator::new(policy);
    schema_engine.validate(
        DataElement::root(&entity.data, schema),
        &options,
        Some(&validator),
    )
}

/// Response bodies: schema and declared rules only.
fn validate_output<S: SchemaEngine>(
    policy: &ValidatorPolicy,
    schema_engine: &S,
    entity: &Entity,
) -> ValidationResult {
    let schema = entity.schema.as_ref().unwrap_or(policy.schema());
    if !schema.is_record() {
        return ValidatorError::schema_resolution(format!(
            "root schema type '{}' is not a record",
            schema.type_name()
        ))
        .into();
    }
    let options = policy
        .options()
        .clone()
        .with_required_mode(RequiredMode::Enforce);
    schema_engine.validate(
        DataElement::root(&entity.data, schema),
        &options,
        Some(&SchemaRuleValidator),
    )
}
