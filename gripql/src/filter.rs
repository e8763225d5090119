// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Filter expressions for `has` and `jump` steps
//!
//! A [`FilterExpression`] is a tree of condition leaves joined by boolean
//! combinators. Expressions are built with the free functions in this module
//! and moved into the builder:
//!
//! ```text
//! and([eq("age", 30), gt("height", 150)])
//!   => {"and": {"expressions": [
//!        {"condition": {"key": "age", "value": 30, "condition": "EQ"}},
//!        {"condition": {"key": "height", "value": 150, "condition": "GT"}}]}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Error, Result};
use crate::normalize::normalize_param;

/// Comparison applied by a condition leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionKind {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Inside,
    Outside,
    Between,
    Within,
    Without,
    Contains,
}

impl ConditionKind {
    /// Wire name, e.g. `"GTE"`
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::Eq => "EQ",
            ConditionKind::Neq => "NEQ",
            ConditionKind::Gt => "GT",
            ConditionKind::Gte => "GTE",
            ConditionKind::Lt => "LT",
            ConditionKind::Lte => "LTE",
            ConditionKind::Inside => "INSIDE",
            ConditionKind::Outside => "OUTSIDE",
            ConditionKind::Between => "BETWEEN",
            ConditionKind::Within => "WITHIN",
            ConditionKind::Without => "WITHOUT",
            ConditionKind::Contains => "CONTAINS",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConditionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "EQ" => Ok(ConditionKind::Eq),
            "NEQ" => Ok(ConditionKind::Neq),
            "GT" => Ok(ConditionKind::Gt),
            "GTE" => Ok(ConditionKind::Gte),
            "LT" => Ok(ConditionKind::Lt),
            "LTE" => Ok(ConditionKind::Lte),
            "INSIDE" => Ok(ConditionKind::Inside),
            "OUTSIDE" => Ok(ConditionKind::Outside),
            "BETWEEN" => Ok(ConditionKind::Between),
            "WITHIN" => Ok(ConditionKind::Within),
            "WITHOUT" => Ok(ConditionKind::Without),
            "CONTAINS" => Ok(ConditionKind::Contains),
            _ => Err(Error::InvalidQuery(format!(
                "Unknown condition: {}. Valid options: EQ, NEQ, GT, GTE, LT, LTE, \
                 INSIDE, OUTSIDE, BETWEEN, WITHIN, WITHOUT, CONTAINS",
                s
            ))),
        }
    }
}

/// Leaf comparison of a document key against a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub key: String,
    pub value: Value,
    pub condition: ConditionKind,
}

/// Ordered operands of an AND/OR node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionList {
    pub expressions: Vec<FilterExpression>,
}

/// Boolean filter tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterExpression {
    #[serde(rename = "and")]
    And(ExpressionList),
    #[serde(rename = "or")]
    Or(ExpressionList),
    #[serde(rename = "not")]
    Not(Box<FilterExpression>),
    #[serde(rename = "condition")]
    Condition(Condition),
}

impl FilterExpression {
    /// Number of condition leaves in the tree
    pub fn condition_count(&self) -> usize {
        match self {
            FilterExpression::And(list) | FilterExpression::Or(list) => list
                .expressions
                .iter()
                .map(FilterExpression::condition_count)
                .sum(),
            FilterExpression::Not(inner) => inner.condition_count(),
            FilterExpression::Condition(_) => 1,
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::And(list) => write_list(f, "and", &list.expressions),
            FilterExpression::Or(list) => write_list(f, "or", &list.expressions),
            FilterExpression::Not(inner) => write!(f, "not({})", inner),
            FilterExpression::Condition(c) => write!(
                f,
                "{}({:?}, {})",
                c.condition.as_str().to_lowercase(),
                c.key,
                c.value
            ),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, exprs: &[FilterExpression]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", expr)?;
    }
    write!(f, ")")
}

/// All operands must match
pub fn and(expressions: impl IntoIterator<Item = FilterExpression>) -> FilterExpression {
    FilterExpression::And(ExpressionList {
        expressions: expressions.into_iter().collect(),
    })
}

/// At least one operand must match
pub fn or(expressions: impl IntoIterator<Item = FilterExpression>) -> FilterExpression {
    FilterExpression::Or(ExpressionList {
        expressions: expressions.into_iter().collect(),
    })
}

/// Negates a single expression
pub fn not(expression: FilterExpression) -> FilterExpression {
    FilterExpression::Not(Box::new(expression))
}

fn condition(key: impl Into<String>, value: Value, kind: ConditionKind) -> FilterExpression {
    FilterExpression::Condition(Condition {
        key: key.into(),
        value,
        condition: kind,
    })
}

fn sequence_condition(
    key: impl Into<String>,
    values: impl Into<Value>,
    kind: ConditionKind,
) -> Result<FilterExpression> {
    let values = normalize_param("values", values.into())?;
    Ok(condition(key, Value::Array(values), kind))
}

pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> FilterExpression {
    condition(key, value.into(), ConditionKind::Eq)
}

pub fn neq(key: impl Into<String>, value: impl Into<Value>) -> FilterExpression {
    condition(key, value.into(), ConditionKind::Neq)
}

pub fn gt(key: impl Into<String>, value: impl Into<Value>) -> FilterExpression {
    condition(key, value.into(), ConditionKind::Gt)
}

pub fn gte(key: impl Into<String>, value: impl Into<Value>) -> FilterExpression {
    condition(key, value.into(), ConditionKind::Gte)
}

pub fn lt(key: impl Into<String>, value: impl Into<Value>) -> FilterExpression {
    condition(key, value.into(), ConditionKind::Lt)
}

pub fn lte(key: impl Into<String>, value: impl Into<Value>) -> FilterExpression {
    condition(key, value.into(), ConditionKind::Lte)
}

/// Value is a collection containing `value`
pub fn contains(key: impl Into<String>, value: impl Into<Value>) -> FilterExpression {
    condition(key, value.into(), ConditionKind::Contains)
}

/// Value lies strictly inside the given bounds
pub fn inside(key: impl Into<String>, values: impl Into<Value>) -> Result<FilterExpression> {
    sequence_condition(key, values, ConditionKind::Inside)
}

/// Value lies outside the given bounds
pub fn outside(key: impl Into<String>, values: impl Into<Value>) -> Result<FilterExpression> {
    sequence_condition(key, values, ConditionKind::Outside)
}

/// Value lies in `[lower, upper)`
pub fn between(key: impl Into<String>, values: impl Into<Value>) -> Result<FilterExpression> {
    sequence_condition(key, values, ConditionKind::Between)
}

/// Value is one of `values`
pub fn within(key: impl Into<String>, values: impl Into<Value>) -> Result<FilterExpression> {
    sequence_condition(key, values, ConditionKind::Within)
}

/// Value is none of `values`
pub fn without(key: impl Into<String>, values: impl Into<Value>) -> Result<FilterExpression> {
    sequence_condition(key, values, ConditionKind::Without)
}
