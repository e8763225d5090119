// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for query construction

use serde_json::Value;
use thiserror::Error;

/// Result type alias for query construction
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for building and decoding queries
///
/// `Shape` and `Type` are raised synchronously by the builder and the
/// factories; they signal a malformed call, never a data condition.
#[derive(Error, Debug)]
pub enum Error {
    /// Argument is neither absent, a string, a number nor an array
    #[error("Shape error: cannot normalize {param} from {found}")]
    Shape { param: String, found: &'static str },

    /// Numeric-only argument received something else
    #[error("Type error: expected {param} to be {expected}, found {found}")]
    Type {
        param: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Decoded document does not describe a pipeline
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl Error {
    pub(crate) fn shape(param: &str, found: &Value) -> Self {
        Error::Shape {
            param: param.to_string(),
            found: kind_of(found),
        }
    }

    pub(crate) fn not_a_number(param: &str, found: &Value) -> Self {
        Error::Type {
            param: param.to_string(),
            expected: "a number",
            found: kind_of(found),
        }
    }
}

/// JSON kind name used in error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_error_message_names_parameter_and_kind() {
        let err = Error::shape("label", &json!({"a": 1}));
        assert_eq!(
            err.to_string(),
            "Shape error: cannot normalize label from object"
        );
    }

    #[test]
    fn test_type_error_message() {
        let err = Error::not_a_number("size", &json!("big"));
        assert_eq!(
            err.to_string(),
            "Type error: expected size to be a number, found string"
        );
    }
}
