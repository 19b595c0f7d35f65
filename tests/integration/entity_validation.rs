//! Validation of complete entities in create, update and read payloads.

use crate::common::*;
use mutability_validator::schema::DataSchema;
use mutability_validator::{Entity, OperationKind, Payload, ValidationResult};
use serde_json::{Value, json};

fn validate(operation: OperationKind, data: Value) -> ValidationResult {
    photo_validator(operation).validate(&Payload::from(Entity::new(data)))
}

#[test]
fn test_create_fixture_payload_is_valid() {
    let result = validate(
        OperationKind::Create,
        load_fixture("payloads/create_photo.json"),
    );
    assert!(result.is_valid(), "{}", result);
    assert!(!result.has_fix());
}

#[test]
fn test_create_rejects_server_assigned_fields() {
    let mut photo = load_fixture("payloads/create_photo.json");
    photo["id"] = json!(1);
    photo["urn"] = json!("urn:photo:1");
    photo["albums"] = json!([{"id": 7, "name": "Lisbon"}]);

    let result = validate(OperationKind::BatchCreate, photo);
    assert_eq!(
        rendered(&result),
        vec![
            "/id :: ReadOnly field present in a batch_create request",
            "/urn :: ReadOnly field present in a batch_create request",
            "/albums/0/id :: ReadOnly field present in a batch_create request",
        ]
    );
}

#[test]
fn test_create_reports_missing_client_fields() {
    let result = validate(OperationKind::Create, json!({"format": "PNG"}));
    assert_eq!(
        rendered(&result),
        vec!["/title :: field is required but not found and has no default value"]
    );
}

#[test]
fn test_declared_rules_apply_to_input() {
    let mut photo = load_fixture("payloads/create_photo.json");
    photo["takenAt"] = json!("yesterday evening");
    photo["thumbnail"] = json!("not base64!");
    photo["rating"] = json!(9);
    photo["visibility"] = json!("everyone");
    photo["tags"] = json!(["a", "b", "c", "d"]);

    let result = validate(OperationKind::Create, photo);
    assert_eq!(result.messages().len(), 5, "{}", result);
    assert_message_at(&result, "/takenAt", "RFC 3339");
    assert_message_at(&result, "/thumbnail", "base64");
    assert_message_at(&result, "/rating", "out of range [1, 5]");
    assert_message_at(&result, "/visibility", "allowed values");
    assert_message_at(&result, "/tags", "array length 4");
}

#[test]
fn test_update_accepts_read_only_values() {
    let result = validate(OperationKind::Update, stored_photo());
    assert!(result.is_valid(), "{}", result);

    let mut photo = stored_photo();
    photo["owner"]["name"] = json!("bea");
    photo["exif"] = json!({"location": {"lat": 1.5, "lng": 2.5}});
    let result = validate(OperationKind::BatchUpdate, photo);
    assert!(result.is_valid(), "{}", result);
}

#[test]
fn test_update_requires_server_assigned_fields() {
    let mut photo = stored_photo();
    photo.as_object_mut().expect("photo object").remove("createdAt");
    let result = validate(OperationKind::Update, photo);
    assert_message_at(&result, "/createdAt", "required");
}

#[test]
fn test_update_coerces_whole_numbers() {
    let mut photo = stored_photo();
    photo["rating"] = json!(4.0);
    let result = validate(OperationKind::Update, photo);
    assert!(result.is_valid(), "{}", result);
    let fixed = result.fixed().expect("coerced payload");
    assert_eq!(fixed["rating"], json!(4));
    assert_eq!(fixed["title"], json!("Harbour at dusk"));
}

#[test]
fn test_read_operations() {
    for operation in [OperationKind::Get, OperationKind::Find, OperationKind::GetAll] {
        let result = validate(operation, stored_photo());
        assert!(result.is_valid(), "{}: {}", operation, result);
    }

    let mut photo = stored_photo();
    photo.as_object_mut().expect("photo object").remove("urn");
    photo["color"] = json!("sepia");
    let result = validate(OperationKind::Get, photo);
    assert_eq!(
        rendered(&result),
        vec![
            "/urn :: field is required but not found and has no default value",
            "/color :: unrecognized field found but not allowed",
        ]
    );
}

#[test]
fn test_batch_get_uses_reported_schema() {
    let registry = registry();
    let summary = registry
        .get_schema("AlbumSummary")
        .expect("AlbumSummary schema")
        .clone();
    let validator = photo_validator(OperationKind::BatchGet);

    let entity = Entity::with_schema(json!({"name": "Lisbon"}), summary.clone());
    let result = validator.validate(&Payload::from(entity));
    assert!(result.is_valid(), "{}", result);

    let entity = Entity::with_schema(json!({}), summary);
    let result = validator.validate(&Payload::from(entity));
    assert_message_at(&result, "/name", "required");

    let entity = Entity::with_schema(json!(["Lisbon"]), DataSchema::array(DataSchema::String));
    let result = validator.validate(&Payload::from(entity));
    assert_message_at(&result, "/", "not a record");
}

#[test]
fn test_album_config_options() {
    let config = album_config();
    let registry = registry();

    let create = config
        .validator(&registry, OperationKind::Create)
        .expect("album create validator");
    let result = create.validate(&Payload::from(Entity::new(
        json!({"name": "Lisbon", "cover": "harbour.jpg"}),
    )));
    assert!(result.is_valid(), "{}", result);

    let update = config
        .validator(&registry, OperationKind::Update)
        .expect("album update validator");
    let result = update.validate(&Payload::from(Entity::new(
        json!({"id": 3.0, "name": "Lisbon"}),
    )));
    assert_message_at(&result, "/id", "expected long, got decimal");
    assert!(!result.has_fix());
}

#[test]
fn test_result_serializes_for_error_responses() {
    let result = validate(OperationKind::Create, json!({"id": 1, "title": "t", "format": "PNG"}));
    let body = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(
        body,
        json!({
            "isValid": false,
            "messages": [{
                "path": ["id"],
                "text": "ReadOnly field present in a create request"
            }],
            "hasFix": false
        })
    );
}
