//! Custom validation rules attached to schema fields.
//!
//! Rules are declared in a field's `validate` array and tagged by `"rule"`:
//!
//! ```json
//! { "name": "title", "type": "string", "validate": [{ "rule": "strlen", "min": 1, "max": 100 }] }
//! ```
//!
//! A rule only inspects values of the kind it applies to. A `strlen` rule on a
//! number passes silently; reporting the wrong type is the engine's job.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A schema-declared validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum ValidationRule {
    /// String length bounds, in characters
    Strlen {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
    },
    /// Numeric bounds, inclusive
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    /// String must be one of the listed values
    OneOf { values: Vec<String> },
    /// Array length bounds
    ArrayLength {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
    },
    /// RFC 3339 date-time string
    DateTime,
    /// Standard base64 string
    Base64,
}

impl ValidationRule {
    /// Check a value against this rule, describing the violation on failure.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            ValidationRule::Strlen { min, max } => {
                let Some(text) = value.as_str() else {
                    return Ok(());
                };
                check_bounds(text.chars().count(), *min, *max, "length")
            }
            ValidationRule::Range { min, max } => {
                let Some(number) = value.as_f64() else {
                    return Ok(());
                };
                if min.is_some_and(|min| number < min) || max.is_some_and(|max| number > max) {
                    return Err(format!(
                        "{} is out of range {}",
                        number,
                        describe_range(*min, *max)
                    ));
                }
                Ok(())
            }
            ValidationRule::OneOf { values } => match value.as_str() {
                Some(text) if !values.iter().any(|allowed| allowed == text) => Err(format!(
                    "\"{}\" is not one of the allowed values {:?}",
                    text, values
                )),
                _ => Ok(()),
            },
            ValidationRule::ArrayLength { min, max } => {
                let Some(items) = value.as_array() else {
                    return Ok(());
                };
                check_bounds(items.len(), *min, *max, "array length")
            }
            ValidationRule::DateTime => match value.as_str() {
                Some(text) if DateTime::<FixedOffset>::parse_from_rfc3339(text).is_err() => {
                    Err(format!("\"{}\" is not a valid RFC 3339 date-time", text))
                }
                _ => Ok(()),
            },
            ValidationRule::Base64 => match value.as_str() {
                Some(text) if STANDARD.decode(text).is_err() => {
                    Err("value is not valid base64".to_string())
                }
                _ => Ok(()),
            },
        }
    }
}

fn check_bounds(
    actual: usize,
    min: Option<usize>,
    max: Option<usize>,
    what: &str,
) -> Result<(), String> {
    if min.is_some_and(|min| actual < min) || max.is_some_and(|max| actual > max) {
        return Err(format!(
            "{} {} is out of range {}",
            what,
            actual,
            describe_range(min, max)
        ));
    }
    Ok(())
}

fn describe_range<T: std::fmt::Display>(min: Option<T>, max: Option<T>) -> String {
    let bound = |value: Option<T>| value.map(|v| v.to_string()).unwrap_or_default();
    format!("[{}, {}]", bound(min), bound(max))
}
