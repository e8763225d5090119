// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GripQL - fluent builder for graph traversal queries
//!
//! This crate assembles traversal queries as plain data. It executes nothing
//! and talks to no server: the finished [`Pipeline`] (or the [`GraphQuery`]
//! document wrapping it) is serialized with serde and handed to whatever
//! transport submits it to the graph engine.
//!
//! # Quick Start
//!
//! ```no_run
//! use gripql::filter::{and, eq, gt};
//! use gripql::aggregation::percentile;
//!
//! # fn main() -> gripql::Result<()> {
//! let mut query = gripql::v(())?;
//! query
//!     .has_label("Person")?
//!     .has(and([eq("age", 30), gt("height", 150)]))
//!     .out("knows")?
//!     .limit(5)
//!     .aggregate([percentile("p1", "latency", ())?]);
//!
//! println!("{}", query.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`builder`] - The chainable query builder and `v`/`e` entry points
//! - [`step`] - Step descriptors and their wire names
//! - [`pipeline`] - Pipelines, query documents and decoding
//! - [`filter`] - Filter expression factories
//! - [`aggregation`] - Aggregation descriptor factories
//! - [`normalize`] - Scalar-or-array normalization
//! - [`error`] - Error types

pub mod aggregation;
pub mod builder;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod step;

pub use aggregation::{Aggregation, AggregationKind};
pub use builder::{e, v, QueryBuilder};
pub use error::{Error, Result};
pub use filter::{Condition, ConditionKind, FilterExpression};
pub use normalize::normalize;
pub use pipeline::{GraphQuery, Pipeline};
pub use step::Step;
