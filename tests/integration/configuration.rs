//! Loading schemas and resource configurations, and parsing operation names.

use crate::common::*;
use mutability_validator::{
    Entity, MutabilityCategory, OperationKind, Payload, ResourceConfig, SchemaError,
    SchemaRegistry, ValidationResult, ValidatorError,
};
use serde_json::json;
use std::thread;

#[test]
fn test_registry_loads_fixture_directory() {
    let registry = registry();
    assert_eq!(
        registry.schema_names(),
        vec!["Album", "AlbumSummary", "Photo"]
    );
    let photo = registry.resolve("Photo").expect("Photo schema");
    let record = photo.as_record().expect("Photo is a record");
    assert_eq!(record.doc.as_deref(), Some("A photo in a user's library"));
}

#[test]
fn test_registry_errors() {
    assert!(matches!(
        SchemaRegistry::from_schema_dir(fixture_path("missing")),
        Err(SchemaError::Io(_))
    ));

    let mut registry = registry();
    assert!(matches!(
        registry.load_schema_from_file(fixture_path("schemas/Album.json")),
        Err(SchemaError::DuplicateSchema { name }) if name == "Album"
    ));
}

#[test]
fn test_photo_config() {
    let config = photo_config();
    assert_eq!(config.schema, "Photo");
    let metadata = config.metadata();
    assert_eq!(
        metadata.paths(MutabilityCategory::ReadOnly),
        ["id", "urn", "createdAt", "albums/*/id"]
    );
    assert_eq!(
        metadata.paths(MutabilityCategory::CreateOnly),
        ["owner/name", "exif/location"]
    );
}

#[test]
fn test_every_operation_builds_a_validator() {
    let config = photo_config();
    let registry = registry();
    for operation in OperationKind::ALL {
        let validator = config
            .validator(&registry, operation)
            .expect("Failed to build validator");
        assert_eq!(validator.policy().operation(), operation);
    }
}

#[test]
fn test_operation_names() {
    for operation in OperationKind::ALL {
        let parsed: OperationKind = operation.as_str().parse().expect("known operation");
        assert_eq!(parsed, operation);
    }
    for name in ["delete", "batch_delete", "action", "options", "PartialUpdate", ""] {
        let error = name
            .parse::<OperationKind>()
            .expect_err("operation without validation semantics");
        assert!(matches!(error, ValidatorError::UnsupportedOperation(_)));
        assert!(error.is_configuration_error());
    }
    let error = "delete".parse::<OperationKind>().expect_err("delete is rejected");
    assert_eq!(
        ValidationResult::from(error).to_string(),
        "/ :: Cannot perform data validation for operation 'delete'"
    );
}

#[test]
fn test_config_for_unknown_schema() {
    let config = ResourceConfig::new("Video");
    let error = config
        .validator(&registry(), OperationKind::Create)
        .expect_err("unknown schema");
    assert!(matches!(error, ValidatorError::SchemaResolution { .. }));
    assert!(error.to_string().contains("no schema named 'Video'"));
}

#[test]
fn test_validator_is_shared_across_threads() {
    let validator = photo_validator(OperationKind::Create);
    let validator = &validator;
    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|index| {
                scope.spawn(move || {
                    let payload = if index % 2 == 0 {
                        json!({"title": "Harbour", "format": "PNG"})
                    } else {
                        json!({"id": index, "title": "Harbour", "format": "PNG"})
                    };
                    validator
                        .validate(&Payload::from(Entity::new(payload)))
                        .is_valid()
                })
            })
            .collect();
        let outcomes: Vec<bool> = handles
            .into_iter()
            .map(|handle| handle.join().expect("validation thread"))
            .collect();
        assert_eq!(outcomes, vec![true, false, true, false]);
    });
}
