//! Validation outcomes and located diagnostic messages.

use crate::error::ValidatorError;
use crate::path::DataPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A diagnostic located at a data path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub path: DataPath,
    pub text: String,
}

impl Message {
    pub fn new(path: DataPath, text: impl Into<String>) -> Self {
        Self {
            path,
            text: text.into(),
        }
    }

    /// A message about the payload as a whole.
    pub fn at_root(text: impl Into<String>) -> Self {
        Self::new(DataPath::root(), text)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.path, self.text)
    }
}

/// Outcome of validating one payload.
///
/// A result is valid exactly when it carries no messages. Results produced by
/// the schema engine may additionally carry a fixed-up copy of the payload
/// (see [`CoercionMode`](crate::schema::CoercionMode)); fixups are independent
/// of validity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    messages: Vec<Message>,
    has_fix: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixed_value: Option<Value>,
}

impl ValidationResult {
    /// A valid result without fixups.
    pub fn valid() -> Self {
        Self::from_messages(Vec::new())
    }

    /// A result holding the given messages; valid when there are none.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            is_valid: messages.is_empty(),
            messages,
            has_fix: false,
            fixed_value: None,
        }
    }

    /// A failed result with a single message at the root path.
    pub fn with_error(text: impl Into<String>) -> Self {
        Self::from_messages(vec![Message::at_root(text)])
    }

    /// Attach a fixed-up copy of the validated value.
    pub fn with_fix(mut self, fixed: Value) -> Self {
        self.has_fix = true;
        self.fixed_value = Some(fixed);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Messages located exactly at `path`.
    pub fn messages_at<'a>(&'a self, path: &'a DataPath) -> impl Iterator<Item = &'a Message> {
        self.messages.iter().filter(move |message| &message.path == path)
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.is_valid = false;
    }

    pub fn has_fix(&self) -> bool {
        self.has_fix
    }

    pub fn fixed(&self) -> Option<&Value> {
        self.fixed_value.as_ref()
    }
}

impl From<ValidatorError> for ValidationResult {
    fn from(error: ValidatorError) -> Self {
        Self::with_error(error.to_string())
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            return f.write_str("valid");
        }
        for (index, message) in self.messages.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", message)?;
        }
        Ok(())
    }
}
