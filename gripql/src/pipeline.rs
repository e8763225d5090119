// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Pipelines and query documents
//!
//! A [`Pipeline`] is the ordered step list handed to the execution engine. A
//! [`GraphQuery`] wraps it with the optional target graph name:
//!
//! ```text
//! {"graph": "people", "query": [{"v": [1]}, {"out": ["knows"]}, {"limit": 5}]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::Deref;

use crate::error::{Error, Result};
use crate::step::{Step, STEP_NAMES};

/// Ordered, append-only list of steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline(Vec<Step>);

impl Pipeline {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, step: Step) {
        log::debug!("Appending '{}' step at position {}", step.name(), self.0.len());
        self.0.push(step);
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.0
    }

    /// Decode a JSON array of step records
    pub fn from_value(value: Value) -> Result<Self> {
        let records = match value {
            Value::Array(records) => records,
            other => {
                return Err(Error::InvalidQuery(format!(
                    "expected an array of steps, found {}",
                    crate::error::kind_of(&other)
                )))
            }
        };

        let mut steps: Vec<Step> = Vec::with_capacity(records.len());
        for (position, record) in records.into_iter().enumerate() {
            check_record(position, &record)?;
            steps.push(serde_json::from_value(record)?);
        }
        log::debug!("Decoded pipeline with {} steps", steps.len());
        Ok(Self(steps))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }
}

/// Every record must be a single-key object naming a known step
fn check_record(position: usize, record: &Value) -> Result<()> {
    let object = record.as_object().ok_or_else(|| {
        Error::InvalidQuery(format!(
            "step {} is {}, expected a single-key object",
            position,
            crate::error::kind_of(record)
        ))
    })?;

    if object.len() != 1 {
        return Err(Error::InvalidQuery(format!(
            "step {} has {} keys, expected exactly one",
            position,
            object.len()
        )));
    }

    if let Some(name) = object.keys().next() {
        if !STEP_NAMES.contains(&name.as_str()) {
            return Err(Error::InvalidQuery(format!(
                "step {} has unknown operation '{}'",
                position, name
            )));
        }
    }
    Ok(())
}

impl Deref for Pipeline {
    type Target = [Step];

    fn deref(&self) -> &[Step] {
        &self.0
    }
}

impl From<Vec<Step>> for Pipeline {
    fn from(steps: Vec<Step>) -> Self {
        Self(steps)
    }
}

impl IntoIterator for Pipeline {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Pipeline {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders the pipeline as a call chain, e.g. `V(1).out("knows").limit(5)`
impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}({})", step.method_name(), step.arguments())?;
        }
        Ok(())
    }
}

/// Query document submitted to the execution engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
    pub query: Pipeline,
}

impl GraphQuery {
    /// Decode either a full document or a bare step array
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut object) => {
                let graph = match object.remove("graph") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(name)) => Some(name),
                    Some(other) => {
                        return Err(Error::InvalidQuery(format!(
                            "graph name must be a string, found {}",
                            crate::error::kind_of(&other)
                        )))
                    }
                };
                let query = object
                    .remove("query")
                    .ok_or_else(|| Error::InvalidQuery("missing 'query' field".to_string()))?;
                if let Some(extra) = object.keys().next() {
                    return Err(Error::InvalidQuery(format!(
                        "unexpected field '{}' in query document",
                        extra
                    )));
                }
                Ok(Self {
                    graph,
                    query: Pipeline::from_value(query)?,
                })
            }
            other => Ok(Self {
                graph: None,
                query: Pipeline::from_value(other)?,
            }),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
