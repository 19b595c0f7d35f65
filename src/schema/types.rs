//! Core schema type definitions.
//!
//! This module contains the data structures that describe the shape of a
//! payload: records with named fields, enums, arrays, maps and primitives.
//! Field definitions carry the presence rules (optional flag and default
//! value) and the custom validation rules attached to them.
//!
//! Schemas are written in JSON. Primitive types are plain strings, complex
//! types are objects tagged by `"type"`:
//!
//! ```json
//! {
//!   "type": "record",
//!   "name": "Photo",
//!   "fields": [
//!     { "name": "id", "type": "long" },
//!     { "name": "tags", "type": { "type": "array", "items": "string" }, "optional": true }
//!   ]
//! }
//! ```

use super::rules::ValidationRule;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A schema for any value in a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SchemaRepr", into = "SchemaRepr")]
pub enum DataSchema {
    Boolean,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    Float,
    Double,
    String,
    /// Binary data carried as a string
    Bytes,
    Enum(EnumSchema),
    Array(Box<DataSchema>),
    /// String-keyed map
    Map(Box<DataSchema>),
    Record(Arc<RecordSchema>),
}

impl DataSchema {
    pub fn array(items: DataSchema) -> Self {
        Self::Array(Box::new(items))
    }

    pub fn map(values: DataSchema) -> Self {
        Self::Map(Box::new(values))
    }

    pub fn record(record: RecordSchema) -> Self {
        Self::Record(Arc::new(record))
    }

    /// Name of the type for diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            DataSchema::Boolean => "boolean",
            DataSchema::Int => "int",
            DataSchema::Long => "long",
            DataSchema::Float => "float",
            DataSchema::Double => "double",
            DataSchema::String => "string",
            DataSchema::Bytes => "bytes",
            DataSchema::Enum(schema) => &schema.name,
            DataSchema::Array(_) => "array",
            DataSchema::Map(_) => "map",
            DataSchema::Record(schema) => &schema.name,
        }
    }

    pub fn as_record(&self) -> Option<&RecordSchema> {
        match self {
            DataSchema::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, DataSchema::Record(_))
    }
}

/// A record schema: an object with a fixed set of named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
        }
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Definition of a record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub schema: DataSchema,
    /// Whether the field may be absent
    #[serde(default)]
    pub optional: bool,
    /// Value assumed when the field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Custom validation rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validate: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl FieldDefinition {
    /// A required field without default.
    pub fn required(name: impl Into<String>, schema: DataSchema) -> Self {
        Self {
            name: name.into(),
            schema,
            optional: false,
            default: None,
            validate: Vec::new(),
            doc: None,
        }
    }

    pub fn optional(name: impl Into<String>, schema: DataSchema) -> Self {
        Self {
            optional: true,
            ..Self::required(name, schema)
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validate.push(rule);
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Required and without a default: absence is an error.
    pub fn must_be_present(&self) -> bool {
        !self.optional && !self.has_default()
    }
}

/// An enumeration of string symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumSchema {
    pub name: String,
    pub symbols: Vec<String>,
}

impl EnumSchema {
    pub fn new<I, S>(name: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|candidate| candidate == symbol)
    }
}

/// JSON representation of [`DataSchema`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SchemaRepr {
    Primitive(PrimitiveName),
    Complex(ComplexRepr),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PrimitiveName {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    Bytes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ComplexRepr {
    Record(RecordSchema),
    Enum(EnumSchema),
    Array { items: Box<DataSchema> },
    Map { values: Box<DataSchema> },
}

impl From<SchemaRepr> for DataSchema {
    fn from(repr: SchemaRepr) -> Self {
        match repr {
            SchemaRepr::Primitive(name) => match name {
                PrimitiveName::Boolean => DataSchema::Boolean,
                PrimitiveName::Int => DataSchema::Int,
                PrimitiveName::Long => DataSchema::Long,
                PrimitiveName::Float => DataSchema::Float,
                PrimitiveName::Double => DataSchema::Double,
                PrimitiveName::String => DataSchema::String,
                PrimitiveName::Bytes => DataSchema::Bytes,
            },
            SchemaRepr::Complex(ComplexRepr::Record(record)) => DataSchema::record(record),
            SchemaRepr::Complex(ComplexRepr::Enum(schema)) => DataSchema::Enum(schema),
            SchemaRepr::Complex(ComplexRepr::Array { items }) => DataSchema::Array(items),
            SchemaRepr::Complex(ComplexRepr::Map { values }) => DataSchema::Map(values),
        }
    }
}

impl From<DataSchema> for SchemaRepr {
    fn from(schema: DataSchema) -> Self {
        match schema {
            DataSchema::Boolean => SchemaRepr::Primitive(PrimitiveName::Boolean),
            DataSchema::Int => SchemaRepr::Primitive(PrimitiveName::Int),
            DataSchema::Long => SchemaRepr::Primitive(PrimitiveName::Long),
            DataSchema::Float => SchemaRepr::Primitive(PrimitiveName::Float),
            DataSchema::Double => SchemaRepr::Primitive(PrimitiveName::Double),
            DataSchema::String => SchemaRepr::Primitive(PrimitiveName::String),
            DataSchema::Bytes => SchemaRepr::Primitive(PrimitiveName::Bytes),
            DataSchema::Enum(schema) => SchemaRepr::Complex(ComplexRepr::Enum(schema)),
            DataSchema::Array(items) => SchemaRepr::Complex(ComplexRepr::Array { items }),
            DataSchema::Map(values) => SchemaRepr::Complex(ComplexRepr::Map { values }),
            DataSchema::Record(record) => SchemaRepr::Complex(ComplexRepr::Record(
                Arc::try_unwrap(record).unwrap_or_else(|shared| (*shared).clone()),
            )),
        }
    }
}
