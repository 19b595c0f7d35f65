//! Partial-update patch documents and the engine that applies them.
//!
//! A patch document describes a delta against a record. Each object level may
//! carry:
//!
//! - `$set`: an object of field names to new values
//! - `$delete`: an array of field names to remove
//! - any other key: a nested patch for the record held in that field
//!
//! ```json
//! {
//!   "$set": { "title": "Sunset" },
//!   "$delete": ["description"],
//!   "location": { "$set": { "city": "Lisbon" } }
//! }
//! ```
//!
//! Applying a patch reports every field-level set and delete it performed as a
//! [`PatchOperation`], in application order: deletes in the order listed, then
//! sets, then nested patches. Sets and nested patches are taken in field-name
//! order, since JSON objects are held as sorted maps.

use crate::error::{PatchError, PatchResult};
use crate::path::DataPath;
use crate::schema::DataSchema;
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Patch command setting fields to new values.
pub const SET_COMMAND: &str = "$set";
/// Patch command removing fields.
pub const DELETE_COMMAND: &str = "$delete";

const REQUEST_WRAPPER: &str = "patch";

/// A partial-update patch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Value);

impl PatchDocument {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// The patch that changes nothing.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Unwrap the `{"patch": {...}}` request body shape, if present.
    ///
    /// When the record described by `schema` has a field named `patch`, the
    /// body is ambiguous and is read as a nested patch of that field.
    pub fn from_request(body: Value, schema: &DataSchema) -> Self {
        let has_patch_field = schema
            .as_record()
            .is_some_and(|record| record.field(REQUEST_WRAPPER).is_some());
        match body {
            Value::Object(mut object)
                if !has_patch_field
                    && object.len() == 1
                    && object.contains_key(REQUEST_WRAPPER) =>
            {
                Self(object.remove(REQUEST_WRAPPER).unwrap_or(Value::Null))
            }
            other => Self(other),
        }
    }

    pub fn builder() -> PatchBuilder {
        PatchBuilder::default()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for PatchDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for PatchDocument {
    fn from(document: Value) -> Self {
        Self(document)
    }
}

/// Fluent builder for [`PatchDocument`]s.
#[derive(Debug, Clone, Default)]
pub struct PatchBuilder {
    sets: Map<String, Value>,
    deletes: Vec<Value>,
    nested: Map<String, Value>,
}

impl PatchBuilder {
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.sets.insert(field.into(), value);
        self
    }

    pub fn delete(mut self, field: impl Into<String>) -> Self {
        self.deletes.push(Value::String(field.into()));
        self
    }

    pub fn nested(mut self, field: impl Into<String>, patch: PatchDocument) -> Self {
        self.nested.insert(field.into(), patch.into_value());
        self
    }

    pub fn build(self) -> PatchDocument {
        let mut document = self.nested;
        if !self.sets.is_empty() {
            document.insert(SET_COMMAND.to_string(), Value::Object(self.sets));
        }
        if !self.deletes.is_empty() {
            document.insert(DELETE_COMMAND.to_string(), Value::Array(self.deletes));
        }
        PatchDocument(Value::Object(document))
    }
}

/// What a patch did to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchCommand {
    Set,
    Delete,
}

/// A field-level change performed while applying a patch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatchOperation {
    /// Full path of the affected field, ending in the field name
    pub path: DataPath,
    pub command: PatchCommand,
}

impl PatchOperation {
    pub fn set(path: DataPath) -> Self {
        Self {
            path,
            command: PatchCommand::Set,
        }
    }

    pub fn delete(path: DataPath) -> Self {
        Self {
            path,
            command: PatchCommand::Delete,
        }
    }
}

/// Applies patch documents to values.
pub trait PatchEngine {
    /// Apply `patch` to `target` in place, returning every field-level
    /// operation performed. On error `target` may be partially modified and
    /// must not be trusted.
    fn apply(&self, patch: &PatchDocument, target: &mut Value) -> PatchResult<Vec<PatchOperation>>;
}

/// The default [`PatchEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchApplier;

impl PatchEngine for PatchApplier {
    fn apply(&self, patch: &PatchDocument, target: &mut Value) -> PatchResult<Vec<PatchOperation>> {
        let mut path = DataPath::root();
        let document = patch
            .as_value()
            .as_object()
            .ok_or_else(|| PatchError::NotAnObject { path: path.clone() })?;
        let target = target
            .as_object_mut()
            .ok_or_else(|| PatchError::TargetNotRecord { path: path.clone() })?;

        let mut operations = Vec::new();
        apply_level(document, target, &mut path, &mut operations)?;
        Ok(operations)
    }
}

fn apply_level(
    document: &Map<String, Value>,
    target: &mut Map<String, Value>,
    path: &mut DataPath,
    operations: &mut Vec<PatchOperation>,
) -> PatchResult<()> {
    let sets = match document.get(SET_COMMAND) {
        None => None,
        Some(Value::Object(sets)) => Some(sets),
        Some(_) => return Err(PatchError::InvalidSet { path: path.clone() }),
    };
    let deletes = match document.get(DELETE_COMMAND) {
        None => Vec::new(),
        Some(Value::Array(fields)) => fields
            .iter()
            .map(|field| {
                field
                    .as_str()
                    .ok_or_else(|| PatchError::InvalidDelete { path: path.clone() })
            })
            .collect::<PatchResult<Vec<_>>>()?,
        Some(_) => return Err(PatchError::InvalidDelete { path: path.clone() }),
    };
    let mut nested = Vec::new();
    for (key, value) in document {
        if key.starts_with('$') {
            if key != SET_COMMAND && key != DELETE_COMMAND {
                return Err(PatchError::UnknownCommand {
                    command: key.clone(),
                    path: path.clone(),
                });
            }
        } else {
            nested.push((key, value));
        }
    }

    let mut targeted = HashSet::new();
    let fields = deletes
        .iter()
        .copied()
        .chain(sets.into_iter().flat_map(|sets| sets.keys().map(String::as_str)))
        .chain(nested.iter().map(|(key, _)| key.as_str()));
    for field in fields {
        if !targeted.insert(field) {
            return Err(PatchError::ConflictingCommands {
                field: field.to_string(),
                path: path.clone(),
            });
        }
    }

    for field in deletes {
        target.remove(field);
        trace!("patch delete {}", path.child(field));
        operations.push(PatchOperation::delete(path.child(field)));
    }
    if let Some(sets) = sets {
        for (field, value) in sets {
            target.insert(field.clone(), value.clone());
            trace!("patch set {}", path.child(field.as_str()));
            operations.push(PatchOperation::set(path.child(field.as_str())));
        }
    }
    for (field, patch) in nested {
        path.push(field.as_str());
        let patch = patch
            .as_object()
            .ok_or_else(|| PatchError::NotAnObject { path: path.clone() })?;
        let child = target
            .entry(field.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        let child = child
            .as_object_mut()
            .ok_or_else(|| PatchError::TargetNotRecord { path: path.clone() })?;
        apply_level(patch, child, path, operations)?;
        path.pop();
    }
    Ok(())
}
