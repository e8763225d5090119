// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Fluent query builder
//!
//! Every method appends exactly one [`Step`] and hands the builder back for
//! chaining. Methods whose input goes through [`normalize`](crate::normalize)
//! return a `Result`; when they fail nothing is appended.
//!
//! ```text
//! let mut query = gripql::v(1)?;
//! query.out("knows")?.has(eq("age", 30)).limit(5);
//! ```

use serde_json::Value;
use std::fmt;

use crate::aggregation::Aggregation;
use crate::error::{Error, Result};
use crate::filter::FilterExpression;
use crate::normalize::normalize_param;
use crate::pipeline::{GraphQuery, Pipeline};
use crate::step::{
    AggregateStep, Empty, IncrementStep, JumpStep, RangeStep, SetStep, Step,
};

/// Accumulates a traversal pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    graph: Option<String>,
    pipeline: Pipeline,
}

/// Start a query at the given vertex ids
pub fn v(ids: impl Into<Value>) -> Result<QueryBuilder> {
    let mut query = QueryBuilder::new();
    query.v(ids)?;
    Ok(query)
}

/// Start a query at the given edge ids
pub fn e(ids: impl Into<Value>) -> Result<QueryBuilder> {
    let mut query = QueryBuilder::new();
    query.e(ids)?;
    Ok(query)
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty query addressed to a named graph
    pub fn for_graph(graph: impl Into<String>) -> Self {
        Self {
            graph: Some(graph.into()),
            pipeline: Pipeline::new(),
        }
    }

    pub fn graph(&self) -> Option<&str> {
        self.graph.as_deref()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn into_pipeline(self) -> Pipeline {
        self.pipeline
    }

    pub fn len(&self) -> usize {
        self.pipeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipeline.is_empty()
    }

    fn push(&mut self, step: Step) -> &mut Self {
        self.pipeline.push(step);
        self
    }

    fn push_sequence(
        &mut self,
        param: &str,
        input: Value,
        step: fn(Vec<Value>) -> Step,
    ) -> Result<&mut Self> {
        let values = normalize_param(param, input)?;
        Ok(self.push(step(values)))
    }

    // Seeds

    pub fn v(&mut self, ids: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("id", ids.into(), Step::V)
    }

    pub fn e(&mut self, ids: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("id", ids.into(), Step::E)
    }

    // Vertex-to-vertex traversal

    /// Follow outgoing edges with the given labels (all labels when empty)
    pub fn out(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::Out)
    }

    /// Like [`out`](Self::out), also emitting a null neighbor when none exists
    pub fn out_null(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::OutNull)
    }

    /// Follow incoming edges with the given labels
    pub fn in_(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::In)
    }

    pub fn in_null(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::InNull)
    }

    pub fn both(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::Both)
    }

    // Typed endpoint and edge traversal

    pub fn out_v(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::OutV)
    }

    pub fn in_v(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::InV)
    }

    pub fn both_v(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::BothV)
    }

    /// Move from a vertex to its outgoing edges
    pub fn out_e(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::OutE)
    }

    pub fn out_e_null(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::OutENull)
    }

    /// Move from a vertex to its incoming edges
    pub fn in_e(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::InE)
    }

    pub fn in_e_null(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::InENull)
    }

    pub fn both_e(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::BothE)
    }

    // Marks

    /// Bind the current position to `name` for a later `select`
    pub fn as_(&mut self, name: impl Into<String>) -> &mut Self {
        self.push(Step::As(name.into()))
    }

    /// Return to the position bound by `as_(name)`
    pub fn select(&mut self, name: impl Into<String>) -> &mut Self {
        self.push(Step::Select(name.into()))
    }

    /// Declare a named checkpoint for `jump`
    pub fn mark(&mut self, name: impl Into<String>) -> &mut Self {
        self.push(Step::Mark(name.into()))
    }

    /// Branch back to `mark` while `expression` holds; `emit` also outputs
    /// the elements that loop
    pub fn jump(
        &mut self,
        mark: impl Into<String>,
        expression: FilterExpression,
        emit: bool,
    ) -> &mut Self {
        self.push(Step::Jump(JumpStep {
            mark: mark.into(),
            expression,
            emit,
        }))
    }

    // Result shaping

    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.push(Step::Limit(n))
    }

    pub fn skip(&mut self, n: u64) -> &mut Self {
        self.push(Step::Skip(n))
    }

    /// Keep results in the half-open window `[start, stop)`; the engine
    /// validates the bounds
    pub fn range(&mut self, start: i64, stop: i64) -> &mut Self {
        self.push(Step::Range(RangeStep { start, stop }))
    }

    pub fn count(&mut self) -> &mut Self {
        self.push(Step::Count(Empty))
    }

    /// Drop results that repeat the given fields (the whole element when empty)
    pub fn distinct(&mut self, fields: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("field", fields.into(), Step::Distinct)
    }

    /// Project the given fields
    pub fn fields(&mut self, fields: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("field", fields.into(), Step::Fields)
    }

    /// Reshape each result according to `template`
    pub fn render(&mut self, template: impl Into<Value>) -> &mut Self {
        self.push(Step::Render(template.into()))
    }

    // Filters

    pub fn has(&mut self, expression: FilterExpression) -> &mut Self {
        self.push(Step::Has(expression))
    }

    pub fn has_label(&mut self, labels: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("label", labels.into(), Step::HasLabel)
    }

    pub fn has_id(&mut self, ids: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("id", ids.into(), Step::HasId)
    }

    pub fn has_key(&mut self, keys: impl Into<Value>) -> Result<&mut Self> {
        self.push_sequence("key", keys.into(), Step::HasKey)
    }

    // Mutation

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.push(Step::Set(SetStep {
            key: key.into(),
            value: value.into(),
        }))
    }

    /// Add `delta` to a numeric property; non-numeric deltas are rejected
    pub fn increment(
        &mut self,
        key: impl Into<String>,
        delta: impl Into<Value>,
    ) -> Result<&mut Self> {
        let value = match delta.into() {
            Value::Number(n) => n,
            other => {
                log::debug!("Non-numeric increment delta");
                return Err(Error::not_a_number("delta", &other));
            }
        };
        Ok(self.push(Step::Increment(IncrementStep {
            key: key.into(),
            value,
        })))
    }

    // Aggregation

    pub fn aggregate(&mut self, aggregations: impl IntoIterator<Item = Aggregation>) -> &mut Self {
        self.push(Step::Aggregate(AggregateStep {
            aggregations: aggregations.into_iter().collect(),
        }))
    }

    // Output

    pub fn to_graph_query(&self) -> GraphQuery {
        GraphQuery {
            graph: self.graph.clone(),
            query: self.pipeline.clone(),
        }
    }

    pub fn into_graph_query(self) -> GraphQuery {
        GraphQuery {
            graph: self.graph,
            query: self.pipeline,
        }
    }

    /// Query document as a JSON value, `{"graph"?, "query": [...]}`
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_graph_query())?)
    }

    pub fn to_json(&self) -> Result<String> {
        self.to_graph_query().to_json()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        self.to_graph_query().to_json_pretty()
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pipeline)
    }
}
