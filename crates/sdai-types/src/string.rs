//! EXPRESS STRING
//!
//! Character strings with the usual indeterminate state. The canonical text
//! form is the STEP physical-file encoding: apostrophe-quoted with embedded
//! apostrophes doubled.

use crate::generic::ExpressValue;
use crate::logical::Logical;
use crate::type_system::ExpressType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// EXPRESS STRING, or indeterminate (`?`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpressString {
    value: Option<String>,
}

impl ExpressString {
    /// Get the payload, if determinate
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Length in characters; `None` when indeterminate
    pub fn len(&self) -> Option<usize> {
        self.value.as_ref().map(|s| s.chars().count())
    }

    /// Whether the payload is the empty string; `None` when indeterminate
    pub fn is_empty(&self) -> Option<bool> {
        self.value.as_ref().map(String::is_empty)
    }
}

impl From<&str> for ExpressString {
    fn from(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}

impl From<String> for ExpressString {
    fn from(value: String) -> Self {
        Self { value: Some(value) }
    }
}

impl fmt::Display for ExpressString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(s) = &self.value else {
            return write!(f, "$");
        };
        write!(f, "'")?;
        for c in s.chars() {
            if c == '\'' {
                write!(f, "''")?;
            } else {
                write!(f, "{c}")?;
            }
        }
        write!(f, "'")
    }
}

impl ExpressValue for ExpressString {
    fn express_type(&self) -> ExpressType {
        ExpressType::String
    }

    fn is_determinate(&self) -> bool {
        self.value.is_some()
    }

    fn indeterminate() -> Self {
        Self { value: None }
    }

    fn is_equal(&self, other: &Self, _by_value: bool) -> Logical {
        match (&self.value, &other.value) {
            (Some(a), Some(b)) => Logical::from(a == b),
            _ => Logical::UNKNOWN,
        }
    }
}
