// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Scalar-or-array normalization
//!
//! Every parameter that accepts "one id, or many ids" goes through
//! [`normalize`], so the same input produces the same sequence regardless of
//! which step or factory receives it:
//!
//! - absent (`null`, `false`, `0`, `""`) becomes `[]`
//! - a single string or number `x` becomes `[x]`
//! - an array is kept as-is, order preserved
//! - anything else is a [`Error::Shape`]

use serde_json::Value;

use crate::error::{Error, Result};

/// Normalize an id/label/key style argument into an ordered sequence
pub fn normalize(input: impl Into<Value>) -> Result<Vec<Value>> {
    normalize_param("value", input.into())
}

pub(crate) fn normalize_param(param: &str, input: Value) -> Result<Vec<Value>> {
    if is_absent(&input) {
        return Ok(Vec::new());
    }
    match input {
        Value::String(_) | Value::Number(_) => Ok(vec![input]),
        Value::Array(items) => Ok(items),
        other => {
            log::debug!("Rejecting {} for '{}'", crate::error::kind_of(&other), param);
            Err(Error::shape(param, &other))
        }
    }
}

/// Falsy values count as "not provided"
pub(crate) fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
