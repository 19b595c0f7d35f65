//! Common test utilities for mutability validation testing.
//!
//! Fixtures live under `tests/fixtures/`: record schemas in `schemas/`,
//! resource configurations in `config/` and sample request bodies in
//! `payloads/`.

use mutability_validator::{
    DataPath, DataValidator, OperationKind, ResourceConfig, SchemaRegistry, ValidationResult,
};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Install a test logger; `RUST_LOG` controls verbosity.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Absolute path of a file under `tests/fixtures/`.
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// Load a JSON fixture.
pub fn load_fixture(relative: &str) -> Value {
    let path = fixture_path(relative);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse JSON fixture: {}", path.display()))
}

/// Registry holding every fixture schema.
pub fn registry() -> SchemaRegistry {
    SchemaRegistry::from_schema_dir(fixture_path("schemas"))
        .expect("Failed to load fixture schemas")
}

pub fn photo_config() -> ResourceConfig {
    ResourceConfig::from_file(fixture_path("config/photos.json"))
        .expect("Failed to load photo config")
}

pub fn album_config() -> ResourceConfig {
    ResourceConfig::from_file(fixture_path("config/albums.json"))
        .expect("Failed to load album config")
}

/// Validator for Photo payloads of one operation kind.
pub fn photo_validator(operation: OperationKind) -> DataValidator {
    init_logging();
    photo_config()
        .validator(&registry(), operation)
        .expect("Failed to build photo validator")
}

/// A Photo as returned by the server, with every required field present.
pub fn stored_photo() -> Value {
    json!({
        "id": 42,
        "urn": "urn:photo:42",
        "title": "Harbour at dusk",
        "format": "JPG",
        "createdAt": 1_717_267_320,
        "visibility": "friends",
        "owner": {"name": "ana"},
        "albums": [{"id": 7, "name": "Lisbon"}]
    })
}

/// Messages of a result rendered as `<path> :: <text>`.
pub fn rendered(result: &ValidationResult) -> Vec<String> {
    result.messages().iter().map(ToString::to_string).collect()
}

/// Assert that `result` is invalid with a message at `path` containing `text`.
pub fn assert_message_at(result: &ValidationResult, path: &str, text: &str) {
    assert!(!result.is_valid(), "expected an invalid result");
    let path = DataPath::parse(path);
    assert!(
        result.messages_at(&path).any(|message| message.text.contains(text)),
        "no message at {} containing {:?} in:\n{}",
        path,
        text,
        result
    );
}
