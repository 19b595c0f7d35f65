//! # Payload Validator
//!
//! A command-line utility for checking a request or response payload against a
//! resource's schema and declared mutability before it reaches a server.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin payload-validator <schema-file-or-dir> <resource-config.json> <operation> <payload.json>
//! ```
//!
//! `operation` is one of `create`, `batch_create`, `update`, `batch_update`,
//! `partial_update`, `batch_partial_update`, `get`, `batch_get`, `find` and
//! `get_all`. For the partial update operations the payload is a patch document
//! (optionally wrapped as `{"patch": {...}}`, unless the record has a field
//! named `patch`); for every other operation it is
//! a complete entity.
//!
//! ## Output Examples
//!
//! ```text
//! Validating partial_update payload: patch.json
//! ❌ Payload is invalid (2 messages)
//!   /id :: cannot delete a required field
//!   /id :: cannot delete a ReadOnly field or its descendants
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: The payload is valid
//! - `1`: The payload is invalid, or the validator could not be set up

use mutability_validator::operation::ValidationStrategy;
use mutability_validator::patch::PatchDocument;
use mutability_validator::{
    Entity, OperationKind, Payload, ResourceConfig, SchemaRegistry, ValidationResult,
};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 5 {
        eprintln!(
            "Usage: {} <schema-file-or-dir> <resource-config.json> <operation> <payload.json>",
            args[0]
        );
        eprintln!();
        eprintln!("Examples:");
        eprintln!(
            "  {} schemas/ config/photos.json create photo.json",
            args[0]
        );
        eprintln!(
            "  {} schemas/Photo.json config/photos.json partial_update patch.json",
            args[0]
        );
        process::exit(1);
    }

    match run(
        Path::new(&args[1]),
        Path::new(&args[2]),
        &args[3],
        Path::new(&args[4]),
    ) {
        Ok(result) if result.is_valid() => {
            println!("✓ Payload is valid!");
            if let Some(fixed) = result.fixed() {
                println!();
                println!("Coerced payload:");
                println!("{}", fixed);
            }
        }
        Ok(result) => {
            println!(
                "❌ Payload is invalid ({} messages)",
                result.messages().len()
            );
            for message in result.messages() {
                println!("  {}", message);
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Validation could not run: {}", e);
            process::exit(1);
        }
    }
}

fn run(
    schema_path: &Path,
    config_path: &Path,
    operation: &str,
    payload_path: &Path,
) -> Result<ValidationResult, Box<dyn std::error::Error>> {
    let registry = if schema_path.is_dir() {
        SchemaRegistry::from_schema_dir(schema_path)?
    } else {
        let mut registry = SchemaRegistry::new();
        registry.load_schema_from_file(schema_path)?;
        registry
    };
    let config = ResourceConfig::from_file(config_path)?;
    let operation: OperationKind = operation.parse()?;
    let validator = config.validator(&registry, operation)?;

    println!(
        "Validating {} payload: {}",
        operation,
        payload_path.display()
    );
    let content = fs::read_to_string(payload_path)?;
    let body: serde_json::Value = serde_json::from_str(&content)?;
    let payload = match operation.strategy() {
        ValidationStrategy::PatchDelta => {
            Payload::from(PatchDocument::from_request(body, validator.policy().schema()))
        }
        ValidationStrategy::Entity(_) => Payload::from(Entity::new(body)),
    };

    Ok(validator.validate(&payload))
}
