//! Error types for validator setup and validation failures.
//!
//! Setup-time APIs (loading schemas and configuration, parsing operation names)
//! return these errors through `Result`. During validation they never escape:
//! every [`ValidatorError`] converts into a failed
//! [`ValidationResult`](crate::result::ValidationResult) so that callers inspect
//! one uniform outcome.

use crate::operation::OperationKind;
use crate::path::DataPath;

/// Main error type for validator operations.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// The root schema type has no empty instance (it is not a record)
    #[error("Unable to instantiate an empty value of root schema type '{type_name}'")]
    Instantiation { type_name: String },

    /// No usable record schema could be resolved for a payload
    #[error("Unable to resolve a record schema: {message}")]
    SchemaResolution { message: String },

    /// The operation kind has no validation semantics
    #[error("Cannot perform data validation for operation '{0}'")]
    UnsupportedOperation(String),

    /// The payload does not have the shape the operation expects
    #[error("Expected {expected} for a {operation} request")]
    PayloadMismatch {
        operation: OperationKind,
        expected: &'static str,
    },

    /// The patch document could not be applied
    #[error("Error while applying patch: {0}")]
    PatchApplication(#[from] PatchError),

    /// Invalid resource configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Schema documents could not be loaded
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Reading a configuration or payload file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while applying a malformed patch document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// A patch (or nested patch) is not a JSON object
    #[error("patch at '{path}' must be a JSON object")]
    NotAnObject { path: DataPath },

    /// `$set` does not hold an object of field values
    #[error("'$set' at '{path}' must be a JSON object")]
    InvalidSet { path: DataPath },

    /// `$delete` does not hold an array of field names
    #[error("'$delete' at '{path}' must be an array of field names")]
    InvalidDelete { path: DataPath },

    /// A `$`-prefixed key that is not a known command
    #[error("unknown patch command '{command}' at '{path}'")]
    UnknownCommand { command: String, path: DataPath },

    /// The same field is set, deleted or patched more than once
    #[error("field '{field}' at '{path}' is the target of more than one patch command")]
    ConflictingCommands { field: String, path: DataPath },

    /// A nested patch addresses a value that is not a record
    #[error("cannot apply a nested patch at '{path}': the existing value is not a record")]
    TargetNotRecord { path: DataPath },
}

/// Errors raised while loading schema documents.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Reading a schema file failed
    #[error("Failed to read schema: {0}")]
    Io(#[from] std::io::Error),

    /// A schema document is not valid JSON or not a valid schema
    #[error("Failed to parse schema: {0}")]
    Json(#[from] serde_json::Error),

    /// Only record schemas can be registered by name
    #[error("Top-level schema of type '{type_name}' must be a record")]
    NotARecord { type_name: String },

    /// Two schemas share a name
    #[error("Duplicate schema name: {name}")]
    DuplicateSchema { name: String },
}

// Convenience methods for creating common errors
impl ValidatorError {
    /// Create a schema resolution error
    pub fn schema_resolution(message: impl Into<String>) -> Self {
        Self::SchemaResolution {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Whether this error describes a misconfigured validator rather than bad data.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::PatchApplication(_))
    }
}

// Result type aliases for convenience
pub type ValidatorResult<T> = Result<T, ValidatorError>;
pub type PatchResult<T> = Result<T, PatchError>;
pub type SchemaResult<T> = Result<T, SchemaError>;
