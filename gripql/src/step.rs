// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Step descriptors
//!
//! Each [`Step`] variant maps to a single-key JSON record, `{"<op>": <params>}`.
//! The set of step kinds is closed; the `Null`-suffixed traversals, `jump` and
//! `mark` are opaque to this crate and forwarded as-is.

use serde::de::{Deserializer, IgnoredAny};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::aggregation::Aggregation;
use crate::filter::FilterExpression;

/// Payload of parameterless steps, written as `""`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Empty;

impl Serialize for Empty {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str("")
    }
}

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Empty)
    }
}

/// Half-open `[start, stop)` window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeStep {
    pub start: i64,
    pub stop: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetStep {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementStep {
    pub key: String,
    /// Delta, whole or fractional
    pub value: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpStep {
    pub mark: String,
    pub expression: FilterExpression,
    pub emit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStep {
    pub aggregations: Vec<Aggregation>,
}

/// One operation of a traversal pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    #[serde(rename = "v")]
    V(Vec<Value>),
    #[serde(rename = "e")]
    E(Vec<Value>),

    #[serde(rename = "out")]
    Out(Vec<Value>),
    #[serde(rename = "outNull")]
    OutNull(Vec<Value>),
    #[serde(rename = "in")]
    In(Vec<Value>),
    #[serde(rename = "inNull")]
    InNull(Vec<Value>),
    #[serde(rename = "both")]
    Both(Vec<Value>),

    #[serde(rename = "outV")]
    OutV(Vec<Value>),
    #[serde(rename = "inV")]
    InV(Vec<Value>),
    #[serde(rename = "bothV")]
    BothV(Vec<Value>),
    #[serde(rename = "outE")]
    OutE(Vec<Value>),
    #[serde(rename = "outENull")]
    OutENull(Vec<Value>),
    #[serde(rename = "inE")]
    InE(Vec<Value>),
    #[serde(rename = "inENull")]
    InENull(Vec<Value>),
    #[serde(rename = "bothE")]
    BothE(Vec<Value>),

    #[serde(rename = "as")]
    As(String),
    #[serde(rename = "select")]
    Select(String),

    #[serde(rename = "limit")]
    Limit(u64),
    #[serde(rename = "skip")]
    Skip(u64),
    #[serde(rename = "range")]
    Range(RangeStep),
    #[serde(rename = "count")]
    Count(Empty),
    #[serde(rename = "distinct")]
    Distinct(Vec<Value>),
    #[serde(rename = "fields")]
    Fields(Vec<Value>),
    #[serde(rename = "render")]
    Render(Value),

    #[serde(rename = "has")]
    Has(FilterExpression),
    #[serde(rename = "hasLabel")]
    HasLabel(Vec<Value>),
    #[serde(rename = "hasId")]
    HasId(Vec<Value>),
    #[serde(rename = "hasKey")]
    HasKey(Vec<Value>),

    #[serde(rename = "set")]
    Set(SetStep),
    #[serde(rename = "increment")]
    Increment(IncrementStep),

    #[serde(rename = "jump")]
    Jump(JumpStep),
    #[serde(rename = "mark")]
    Mark(String),

    #[serde(rename = "aggregate")]
    Aggregate(AggregateStep),
}

/// Wire names of every step kind, in declaration order
pub const STEP_NAMES: [&str; 33] = [
    "v", "e", "out", "outNull", "in", "inNull", "both", "outV", "inV", "bothV", "outE",
    "outENull", "inE", "inENull", "bothE", "as", "select", "limit", "skip", "range", "count",
    "distinct", "fields", "render", "has", "hasLabel", "hasId", "hasKey", "set", "increment",
    "jump", "mark", "aggregate",
];

impl Step {
    /// Wire key of this step
    pub fn name(&self) -> &'static str {
        match self {
            Step::V(_) => "v",
            Step::E(_) => "e",
            Step::Out(_) => "out",
            Step::OutNull(_) => "outNull",
            Step::In(_) => "in",
            Step::InNull(_) => "inNull",
            Step::Both(_) => "both",
            Step::OutV(_) => "outV",
            Step::InV(_) => "inV",
            Step::BothV(_) => "bothV",
            Step::OutE(_) => "outE",
            Step::OutENull(_) => "outENull",
            Step::InE(_) => "inE",
            Step::InENull(_) => "inENull",
            Step::BothE(_) => "bothE",
            Step::As(_) => "as",
            Step::Select(_) => "select",
            Step::Limit(_) => "limit",
            Step::Skip(_) => "skip",
            Step::Range(_) => "range",
            Step::Count(_) => "count",
            Step::Distinct(_) => "distinct",
            Step::Fields(_) => "fields",
            Step::Render(_) => "render",
            Step::Has(_) => "has",
            Step::HasLabel(_) => "hasLabel",
            Step::HasId(_) => "hasId",
            Step::HasKey(_) => "hasKey",
            Step::Set(_) => "set",
            Step::Increment(_) => "increment",
            Step::Jump(_) => "jump",
            Step::Mark(_) => "mark",
            Step::Aggregate(_) => "aggregate",
        }
    }

    /// Builder method name, used when rendering a pipeline as a call chain
    pub fn method_name(&self) -> &'static str {
        match self {
            Step::V(_) => "V",
            Step::E(_) => "E",
            Step::In(_) => "in_",
            Step::As(_) => "as_",
            other => other.name(),
        }
    }

    /// Whether the step seeds a traversal rather than continuing one
    pub fn is_seed(&self) -> bool {
        matches!(self, Step::V(_) | Step::E(_))
    }

    /// Arguments as they appear in the rendered call chain
    pub fn arguments(&self) -> String {
        match self {
            Step::V(seq)
            | Step::E(seq)
            | Step::Out(seq)
            | Step::OutNull(seq)
            | Step::In(seq)
            | Step::InNull(seq)
            | Step::Both(seq)
            | Step::OutV(seq)
            | Step::InV(seq)
            | Step::BothV(seq)
            | Step::OutE(seq)
            | Step::OutENull(seq)
            | Step::InE(seq)
            | Step::InENull(seq)
            | Step::BothE(seq)
            | Step::Distinct(seq)
            | Step::Fields(seq)
            | Step::HasLabel(seq)
            | Step::HasId(seq)
            | Step::HasKey(seq) => sequence_arguments(seq),
            Step::As(name) | Step::Select(name) | Step::Mark(name) => format!("{:?}", name),
            Step::Limit(n) | Step::Skip(n) => n.to_string(),
            Step::Range(r) => format!("{}, {}", r.start, r.stop),
            Step::Count(_) => String::new(),
            Step::Render(template) => template.to_string(),
            Step::Has(expr) => expr.to_string(),
            Step::Set(s) => format!("{:?}, {}", s.key, s.value),
            Step::Increment(i) => format!("{:?}, {}", i.key, i.value),
            Step::Jump(j) => format!("{:?}, {}, {}", j.mark, j.expression, j.emit),
            Step::Aggregate(a) => a
                .aggregations
                .iter()
                .map(|agg| format!("{}({:?})", agg.kind.name(), agg.name))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// A singleton renders as its bare element, like the call that produced it
fn sequence_arguments(seq: &[Value]) -> String {
    match seq {
        [] => String::new(),
        [single] => single.to_string(),
        many => Value::Array(many.to_vec()).to_string(),
    }
}
