//! Validation of partial update patch documents.

use crate::common::*;
use mutability_validator::patch::PatchDocument;
use mutability_validator::{OperationKind, Payload, ValidationResult};
use serde_json::{Value, json};

fn validate(patch: Value) -> ValidationResult {
    validate_as(OperationKind::PartialUpdate, patch)
}

fn validate_as(operation: OperationKind, patch: Value) -> ValidationResult {
    photo_validator(operation).validate(&Payload::from(PatchDocument::new(patch)))
}

#[test]
fn test_fixture_request_body_is_valid() {
    let body = load_fixture("payloads/patch_photo.json");
    let validator = photo_validator(OperationKind::PartialUpdate);
    let document = PatchDocument::from_request(body, validator.policy().schema());
    let result = validator.validate(&Payload::from(document));
    assert!(result.is_valid(), "{}", result);
}

#[test]
fn test_empty_patch_is_valid_for_every_partial_update() {
    for operation in [OperationKind::PartialUpdate, OperationKind::BatchPartialUpdate] {
        let result = validate_as(operation, json!({}));
        assert!(result.is_valid(), "{}: {}", operation, result);
    }
}

#[test]
fn test_delete_required_read_only_field() {
    let result = validate(json!({"$delete": ["urn"]}));
    assert_eq!(
        rendered(&result),
        vec![
            "/urn :: cannot delete a required field",
            "/urn :: cannot delete a ReadOnly field or its descendants",
        ]
    );
}

#[test]
fn test_delete_fields_with_defaults_or_optional() {
    let result = validate(json!({"$delete": ["visibility", "tags", "owner"]}));
    assert!(result.is_valid(), "{}", result);
}

#[test]
fn test_delete_inside_create_only_record() {
    let result = validate(json!({"exif": {"location": {"$delete": ["lng"]}}}));
    assert_eq!(
        rendered(&result),
        vec![
            "/exif/location/lng :: cannot delete a required field",
            "/exif/location/lng :: cannot delete a CreateOnly field or its descendants",
        ]
    );

    let result = validate(json!({"exif": {"$delete": ["location"]}}));
    assert_eq!(
        rendered(&result),
        vec!["/exif/location :: cannot delete a CreateOnly field or its descendants"]
    );
}

#[test]
fn test_delete_below_read_only_pattern_without_data() {
    // Nothing exists at the path; the patterns match on path components alone.
    let result = validate(json!({"albums": {"3": {"id": {"$delete": ["value"]}}}}));
    assert_eq!(
        rendered(&result),
        vec!["/albums/3/id/value :: cannot delete a ReadOnly field or its descendants"]
    );
}

#[test]
fn test_set_values_are_checked() {
    let result = validate(json!({"$set": {"rating": 0}}));
    assert_message_at(&result, "/rating", "out of range");

    let result = validate(json!({"labels": {"$set": {"mood": 3}}}));
    assert_eq!(
        rendered(&result),
        vec!["/labels/mood :: invalid type, expected string, got integer"]
    );

    let result = validate(json!({"labels": {"$set": {"mood": "calm"}}}));
    assert!(result.is_valid(), "{}", result);
}

#[test]
fn test_set_incomplete_record() {
    let result = validate(json!({"$set": {"owner": {"email": "ana@example.com"}}}));
    assert_eq!(
        rendered(&result),
        vec!["/owner/name :: field is required but not found and has no default value"]
    );
}

#[test]
fn test_first_incomplete_set_short_circuits() {
    let result = validate(json!({"$set": {"owner": {}, "exif": {"location": {}}}}));
    assert!(!result.is_valid());
    let roots: Vec<&str> = result
        .messages()
        .iter()
        .filter_map(|message| message.path.components().first().map(String::as_str))
        .collect();
    assert!(!roots.is_empty());
    assert!(roots.iter().all(|root| *root == roots[0]), "{}", result);
}

#[test]
fn test_set_create_only_value() {
    let result = validate(json!({"exif": {"$set": {"location": {"lat": 1.0, "lng": 2.0}}}}));
    assert_eq!(
        rendered(&result),
        vec!["/exif/location :: CreateOnly field present in a partial_update request"]
    );
}

#[test]
fn test_set_read_only_value_in_batch() {
    let result = validate_as(
        OperationKind::BatchPartialUpdate,
        json!({"$set": {"createdAt": 0, "title": "Blue hour"}}),
    );
    assert_eq!(
        rendered(&result),
        vec!["/createdAt :: ReadOnly field present in a batch_partial_update request"]
    );
}

#[test]
fn test_array_of_read_only_required_fields_cannot_change() {
    let with_ids = validate(json!({"$set": {"albums": [{"id": 7, "name": "Lisbon"}]}}));
    assert_message_at(&with_ids, "/albums/0/id", "ReadOnly field present");

    let without_ids = validate(json!({"$set": {"albums": [{"name": "Lisbon"}]}}));
    assert_message_at(&without_ids, "/albums/0/id", "required");

    let cleared = validate(json!({"$delete": ["albums"]}));
    assert!(cleared.is_valid(), "{}", cleared);
}

#[test]
fn test_malformed_patches() {
    for patch in [
        json!({"$set": {"title": "a"}, "$delete": ["title"]}),
        json!({"$replace": {"title": "a"}}),
        json!({"exif": "camera"}),
        json!({"$delete": "rating"}),
    ] {
        let result = validate(patch.clone());
        assert_eq!(result.messages().len(), 1, "{}", patch);
        assert!(
            result.messages()[0]
                .text
                .starts_with("Error while applying patch: "),
            "{}",
            result
        );
    }
}

#[test]
fn test_album_patch_options() {
    let validator = album_config()
        .validator(&registry(), OperationKind::PartialUpdate)
        .expect("album patch validator");

    let result = validator.validate(&Payload::from(PatchDocument::new(
        json!({"$set": {"cover": "harbour.jpg", "name": "Lisbon"}}),
    )));
    assert!(result.is_valid(), "{}", result);

    let result = validator.validate(&Payload::from(PatchDocument::new(
        json!({"$set": {"photoCount": 3.0}}),
    )));
    assert_message_at(&result, "/photoCount", "expected int");

    let result = validator.validate(&Payload::from(PatchDocument::new(
        json!({"$delete": ["id"]}),
    )));
    assert_eq!(result.messages().len(), 2);
}
