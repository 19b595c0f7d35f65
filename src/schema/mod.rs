//! Schema definitions and the schema validation engine.
//!
//! This module provides the schema model payloads are validated against, a
//! registry for loading named record schemas from JSON, and the validation
//! engine that type-checks payloads and enforces required fields.
//!
//! # Key Types
//!
//! - [`DataSchema`] - Schema of any value (primitives, enums, arrays, maps, records)
//! - [`FieldDefinition`] - Record field with presence rules and custom validation rules
//! - [`SchemaRegistry`] - Registry of named record schemas
//! - [`SchemaValidator`] - Default [`SchemaEngine`] implementation
//!
//! # Examples
//!
//! ```rust
//! use mutability_validator::schema::{
//!     DataElement, DataSchema, FieldDefinition, RecordSchema, SchemaEngine, SchemaValidator,
//!     ValidationOptions,
//! };
//! use serde_json::json;
//!
//! let schema = DataSchema::record(
//!     RecordSchema::new("Tag").with_field(FieldDefinition::required("label", DataSchema::String)),
//! );
//! let value = json!({});
//! let result = SchemaValidator.validate(
//!     DataElement::root(&value, &schema),
//!     &ValidationOptions::new(),
//!     None,
//! );
//! assert!(!result.is_valid());
//! ```

pub mod element;
pub mod registry;
pub mod rules;
pub mod types;
pub mod validation;


// Re-export the main types for convenience
pub use element::{DataElement, field_at};
pub use registry::SchemaRegistry;
pub use rules::ValidationRule;
pub use types::{DataSchema, EnumSchema, FieldDefinition, RecordSchema};
pub use validation::{
    CoercionMode, ElementValidator, RequiredMode, SchemaEngine, SchemaRuleValidator,
    SchemaValidator, ValidationOptions, ValidatorContext,
};
