//! Field-level mutability and presence validation for API payloads.
//!
//! Validates complete entities and partial-update patch documents against a
//! record schema and operation-scoped mutability metadata: ReadOnly fields are
//! server-assigned and never accepted from clients, CreateOnly fields may only
//! be set when a resource is created.
//!
//! # Core Components
//!
//! - [`DataValidator`] - Validates payloads of one operation kind
//! - [`ValidatorPolicy`] - Mutability metadata compiled for one operation kind
//! - [`SchemaRegistry`] - Named record schemas loaded from JSON
//! - [`ResourceConfig`] - Static per-resource configuration
//!
//! # Quick Start
//!
//! ```rust
//! use mutability_validator::{OperationKind, Payload, ResourceConfig, SchemaRegistry};
//! use mutability_validator::patch::PatchDocument;
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::from_json_str(
//!     r#"{"type": "record", "name": "Note", "fields": [
//!         {"name": "id", "type": "long"},
//!         {"name": "text", "type": "string"}
//!     ]}"#,
//! )?;
//! let config = ResourceConfig::from_json_str(r#"{"schema": "Note", "readOnly": ["id"]}"#)?;
//!
//! let validator = config.validator(&registry, "partial_update".parse::<OperationKind>()?)?;
//! let patch = PatchDocument::new(json!({"$delete": ["text"]}));
//! let result = validator.validate(&Payload::from(patch));
//! assert!(!result.is_valid());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod metadata;
pub mod operation;
pub mod patch;
pub mod path;
pub mod result;
pub mod schema;
pub mod validator;

// Re-export commonly used types for convenience
pub use config::ResourceConfig;
pub use error::{PatchError, SchemaError, ValidatorError, ValidatorResult};
pub use metadata::{FieldDeclaration, MutabilityMetadata};
pub use operation::{MutabilityCategory, OperationKind};
pub use path::{DataPath, PathPattern, PathPredicate};
pub use result::{Message, ValidationResult};
pub use schema::{DataSchema, SchemaRegistry};
pub use validator::{DataValidator, Entity, Payload, ValidatorPolicy};
