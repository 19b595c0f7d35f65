//! Schema validation engine.
//!
//! [`SchemaValidator`] walks a JSON value against a [`DataSchema`], checking the
//! type of every element, enforcing required record fields according to a
//! [`RequiredMode`], and handing each visited element to an optional
//! [`ElementValidator`] hook. The hook may append messages; it never stops the
//! walk.

use super::element::DataElement;
use super::types::{DataSchema, RecordSchema};
use crate::path::{DataPath, PathPredicate};
use crate::result::{Message, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// How absent required fields are treated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequiredMode {
    /// Required fields must be present unless they declare a default.
    #[default]
    Enforce,
    /// Absent required fields are never reported.
    Ignore,
    /// As [`RequiredMode::Enforce`], except fields whose path matches the
    /// predicate may be absent.
    TreatListedAsOptional(PathPredicate),
}

/// Whether values of a compatible but different representation are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionMode {
    /// Values must have exactly the declared representation.
    Off,
    /// Whole-valued floats are accepted for `int` and `long` fields and
    /// reported as fixups.
    #[default]
    Normal,
}

/// Options for one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    pub required_mode: RequiredMode,
    pub coercion_mode: CoercionMode,
    /// Accept record fields the schema does not declare
    pub allow_unrecognized_fields: bool,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required_mode(mut self, required_mode: RequiredMode) -> Self {
        self.required_mode = required_mode;
        self
    }

    pub fn with_coercion_mode(mut self, coercion_mode: CoercionMode) -> Self {
        self.coercion_mode = coercion_mode;
        self
    }

    pub fn allowing_unrecognized_fields(mut self, allow: bool) -> Self {
        self.allow_unrecognized_fields = allow;
        self
    }

    /// Whether an absent field at `path` may stay absent.
    fn may_be_absent(&self, path: &DataPath) -> bool {
        match &self.required_mode {
            RequiredMode::Enforce => false,
            RequiredMode::Ignore => true,
            RequiredMode::TreatListedAsOptional(predicate) => {
                predicate.matches(path.components())
            }
        }
    }
}

/// Context handed to an [`ElementValidator`] for one element.
pub struct ValidatorContext<'e, 'a> {
    element: &'e DataElement<'a>,
    messages: &'e mut Vec<Message>,
}

impl<'e, 'a> ValidatorContext<'e, 'a> {
    pub fn element(&self) -> &DataElement<'a> {
        self.element
    }

    /// Report a problem located at the current element.
    pub fn add_message(&mut self, text: impl Into<String>) {
        self.messages
            .push(Message::new(self.element.path.clone(), text));
    }

    /// Report a problem located anywhere.
    pub fn add_result(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// Hook run once for every element visited by the engine.
pub trait ElementValidator {
    fn validate(&self, context: &mut ValidatorContext<'_, '_>);
}

/// Applies the [`ValidationRule`](super::ValidationRule)s declared on the field
/// holding each element.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaRuleValidator;

impl ElementValidator for SchemaRuleValidator {
    fn validate(&self, context: &mut ValidatorContext<'_, '_>) {
        let Some(field) = context.element().field else {
            return;
        };
        let value = context.element().value;
        for rule in &field.validate {
            if let Err(text) = rule.check(value) {
                context.add_message(text);
            }
        }
    }
}

/// A schema validation engine.
pub trait SchemaEngine {
    /// Validate `element` and everything below it.
    ///
    /// Messages are located by absolute path (the element's own path is the
    /// prefix). A fixed value, when present, is a fixed copy of
    /// `element.value`.
    fn validate(
        &self,
        element: DataElement<'_>,
        options: &ValidationOptions,
        validator: Option<&dyn ElementValidator>,
    ) -> ValidationResult;
}

/// The default [`SchemaEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaEngine for SchemaValidator {
    fn validate(
        &self,
        element: DataElement<'_>,
        options: &ValidationOptions,
        validator: Option<&dyn ElementValidator>,
    ) -> ValidationResult {
        let base_depth = element.path.len();
        let root_value = element.value;
        let mut walker = Walker {
            options,
            validator,
            messages: Vec::new(),
            fixes: Vec::new(),
        };
        walker.visit(&element);

        let Walker {
            messages, fixes, ..
        } = walker;
        let result = ValidationResult::from_messages(messages);
        if fixes.is_empty() {
            return result;
        }
        let mut fixed = root_value.clone();
        for (path, value) in fixes {
            if let Some(slot) = value_at_mut(&mut fixed, &path.components()[base_depth..]) {
                *slot = value;
            }
        }
        result.with_fix(fixed)
    }
}

struct Walker<'o> {
    options: &'o ValidationOptions,
    validator: Option<&'o dyn ElementValidator>,
    messages: Vec<Message>,
    fixes: Vec<(DataPath, Value)>,
}

impl Walker<'_> {
    fn visit(&mut self, element: &DataElement<'_>) {
        let type_ok = self.check_type(element);

        if let Some(validator) = self.validator {
            let mut context = ValidatorContext {
                element,
                messages: &mut self.messages,
            };
            validator.validate(&mut context);
        }

        if !type_ok {
            return;
        }

        match (element.schema, element.value) {
            (DataSchema::Record(record), Value::Object(object)) => {
                self.visit_record(element, record, object)
            }
            (DataSchema::Array(items), Value::Array(array)) => {
                for (index, item) in array.iter().enumerate() {
                    self.visit(&DataElement {
                        value: item,
                        schema: items,
                        field: None,
                        path: element.path.child(index.to_string()),
                    });
                }
            }
            (DataSchema::Map(values), Value::Object(object)) => {
                for (key, item) in object {
                    self.visit(&DataElement {
                        value: item,
                        schema: values,
                        field: None,
                        path: element.path.child(key.as_str()),
                    });
                }
            }
            _ => {}
        }
    }

    fn visit_record(
        &mut self,
        element: &DataElement<'_>,
        record: &RecordSchema,
        object: &Map<String, Value>,
    ) {
        for field in &record.fields {
            let path = element.path.child(field.name.as_str());
            match object.get(&field.name) {
                // An explicit null is a supplied value; the type check rejects it.
                Some(value) => self.visit(&DataElement {
                    value,
                    schema: &field.schema,
                    field: Some(field),
                    path,
                }),
                None => {
                    if field.must_be_present() && !self.options.may_be_absent(&path) {
                        self.messages.push(Message::new(
                            path,
                            "field is required but not found and has no default value",
                        ));
                    }
                }
            }
        }

        if self.options.allow_unrecognized_fields {
            return;
        }
        for key in object.keys() {
            if record.field(key).is_none() {
                self.messages.push(Message::new(
                    element.path.child(key.as_str()),
                    "unrecognized field found but not allowed",
                ));
            }
        }
    }

    /// Check the element's value against its schema type; returns whether the
    /// value may be descended into.
    fn check_type(&mut self, element: &DataElement<'_>) -> bool {
        let value = element.value;
        let ok = match element.schema {
            DataSchema::Boolean => value.is_boolean(),
            DataSchema::Int => self.check_integer(element, i32::MIN.into(), i32::MAX.into()),
            DataSchema::Long => self.check_integer(element, i64::MIN, i64::MAX),
            DataSchema::Float | DataSchema::Double => value.is_number(),
            DataSchema::String | DataSchema::Bytes => value.is_string(),
            DataSchema::Enum(schema) => match value.as_str() {
                Some(symbol) if schema.contains(symbol) => true,
                Some(symbol) => {
                    self.messages.push(Message::new(
                        element.path.clone(),
                        format!(
                            "\"{}\" is not one of the enum symbols {:?}",
                            symbol, schema.symbols
                        ),
                    ));
                    return false;
                }
                None => false,
            },
            DataSchema::Array(_) => value.is_array(),
            DataSchema::Map(_) | DataSchema::Record(_) => value.is_object(),
        };
        if !ok {
            self.messages.push(Message::new(
                element.path.clone(),
                format!(
                    "invalid type, expected {}, got {}",
                    element.schema.type_name(),
                    value_type(value)
                ),
            ));
        }
        ok
    }

    fn check_integer(&mut self, element: &DataElement<'_>, min: i64, max: i64) -> bool {
        let value = element.value;
        if let Some(number) = value.as_i64() {
            return (min..=max).contains(&number);
        }
        let Some(float) = value.as_f64() else {
            return false;
        };
        // i64::MAX as f64 rounds up to 2^63; -min is the exact exclusive bound.
        let whole = float.fract() == 0.0 && float >= min as f64 && float < -(min as f64);
        if !whole || self.options.coercion_mode == CoercionMode::Off {
            return false;
        }
        self.fixes.push((
            element.path.clone(),
            Value::Number(Number::from(float as i64)),
        ));
        true
    }
}

fn value_at_mut<'v>(value: &'v mut Value, path: &[String]) -> Option<&'v mut Value> {
    let mut current = value;
    for component in path {
        current = match current {
            Value::Object(object) => object.get_mut(component)?,
            Value::Array(array) => array.get_mut(component.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get the type name of a JSON value for error messages.
fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
