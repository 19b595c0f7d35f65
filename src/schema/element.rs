//! Data elements: a value paired with its schema and absolute location.

use super::types::{DataSchema, FieldDefinition};
use crate::path::DataPath;
use serde_json::Value;

/// A value inside a payload, together with the schema describing it and the
/// path from the payload root.
#[derive(Debug, Clone)]
pub struct DataElement<'a> {
    pub value: &'a Value,
    pub schema: &'a DataSchema,
    /// The record field this value is stored in, if any
    pub field: Option<&'a FieldDefinition>,
    pub path: DataPath,
}

impl<'a> DataElement<'a> {
    /// The root element of a payload.
    pub fn root(value: &'a Value, schema: &'a DataSchema) -> Self {
        Self {
            value,
            schema,
            field: None,
            path: DataPath::root(),
        }
    }

    /// Step to the child named by `component`, if both value and schema have one.
    pub fn child(&self, component: &str) -> Option<DataElement<'a>> {
        let (value, schema, field) = match (self.schema, self.value) {
            (DataSchema::Record(record), Value::Object(object)) => {
                let field = record.field(component)?;
                (object.get(component)?, &field.schema, Some(field))
            }
            (DataSchema::Map(values), Value::Object(object)) => {
                (object.get(component)?, &**values, None)
            }
            (DataSchema::Array(items), Value::Array(array)) => {
                let index: usize = component.parse().ok()?;
                (array.get(index)?, &**items, None)
            }
            _ => return None,
        };
        Some(DataElement {
            value,
            schema,
            field,
            path: self.path.child(component),
        })
    }

    /// Resolve the element at `path` below this one.
    pub fn descend<S: AsRef<str>>(&self, path: &[S]) -> Option<DataElement<'a>> {
        let mut current = self.clone();
        for component in path {
            current = current.child(component.as_ref())?;
        }
        Some(current)
    }
}

/// Resolve the definition of the record field addressed by `path`.
///
/// Array components accept any index and map components any key; only the
/// schema is consulted, so the path need not exist in any value. Returns
/// `None` when the path leaves the schema or its last component does not
/// name a record field.
pub fn field_at<'s, S: AsRef<str>>(
    schema: &'s DataSchema,
    path: &[S],
) -> Option<&'s FieldDefinition> {
    let mut current = schema;
    let mut field = None;
    for component in path {
        match current {
            DataSchema::Record(record) => {
                let found = record.field(component.as_ref())?;
                current = &found.schema;
                field = Some(found);
            }
            DataSchema::Array(items) => {
                current = &**items;
                field = None;
            }
            DataSchema::Map(values) => {
                current = &**values;
                field = None;
            }
            _ => return None,
        }
    }
    field
}
