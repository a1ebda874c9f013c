//! Domain primitive types used across the Stowage workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{LONG_LENGTH, SHORT_LENGTH};
use crate::error::{Result, StowageError};

/// Process-unique identity of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Wraps a raw identity value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identity value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two legal container lengths.
///
/// A `ContainerSize` can only be obtained through validation, so holding one
/// proves the length is canonical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerSize {
    /// 2.59 m; two of these share one layer.
    Short,
    /// 6.06 m; occupies a whole layer.
    #[default]
    Long,
}

impl ContainerSize {
    /// Validates a length in meters.
    ///
    /// # Errors
    ///
    /// Returns [`StowageError::InvalidSize`] unless `length` is exactly one
    /// of the canonical lengths.
    #[allow(clippy::float_cmp)]
    pub fn new(length: f64) -> Result<Self> {
        // Exact match only; 2.590001 is not a shipping container.
        if length == SHORT_LENGTH {
            Ok(Self::Short)
        } else if length == LONG_LENGTH {
            Ok(Self::Long)
        } else {
            Err(StowageError::InvalidSize { length })
        }
    }

    /// Validates a loosely typed length, as found in manifests and other
    /// JSON documents.
    ///
    /// # Errors
    ///
    /// Returns [`StowageError::TypeMismatch`] for anything that is not a JSON
    /// number (booleans included), and [`StowageError::InvalidSize`] for a
    /// number that is not canonical.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Number(number) = value else {
            return Err(StowageError::TypeMismatch {
                expected: "number",
                found: json_type_name(value),
            });
        };
        let length = number.as_f64().ok_or(StowageError::TypeMismatch {
            expected: "number",
            found: "unrepresentable number",
        })?;
        Self::new(length)
    }

    /// Resolves a loosely typed size name (`"long"` or `"short"`).
    ///
    /// # Errors
    ///
    /// Returns [`StowageError::TypeMismatch`] if the value is not a string,
    /// and [`StowageError::InvalidSizeExpression`] for an unknown name.
    pub fn from_name_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => name.parse(),
            other => Err(StowageError::TypeMismatch {
                expected: "string",
                found: json_type_name(other),
            }),
        }
    }

    /// Returns the length in meters.
    #[must_use]
    pub const fn length(self) -> f64 {
        match self {
            Self::Short => SHORT_LENGTH,
            Self::Long => LONG_LENGTH,
        }
    }

    /// Returns `true` for the short size.
    #[must_use]
    pub const fn is_short(self) -> bool {
        matches!(self, Self::Short)
    }

    /// Returns the symbolic name of this size.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

impl FromStr for ContainerSize {
    type Err = StowageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            other => Err(StowageError::InvalidSizeExpression {
                expression: other.to_string(),
            }),
        }
    }
}

impl TryFrom<f64> for ContainerSize {
    type Error = StowageError;

    fn try_from(length: f64) -> Result<Self> {
        Self::new(length)
    }
}

impl fmt::Display for ContainerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.length())
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
