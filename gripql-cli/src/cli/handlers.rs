// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for GripQL

use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;

use gripql::aggregation::{count, percentile, term};
use gripql::filter::{and, gt, within};
use gripql::{GraphQuery, QueryBuilder};

use super::commands::OutputFormat;
use super::output::QueryFormatter;

/// Handle the version command
pub fn handle_version() {
    println!("{}", format!("gripql {}", env!("CARGO_PKG_VERSION")).bold().green());
    println!("Step kinds: {}", gripql::step::STEP_NAMES.len());
}

/// Handle the inspect command
///
/// Reads a query document from `file` (or stdin), decodes it into typed steps
/// and prints it in the requested format. Decoding failures are reported as
/// errors, so a zero exit status means the document is well formed.
pub fn handle_inspect(
    file: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = match &file {
        Some(path) => {
            log::debug!("Reading query document from {:?}", path);
            std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {:?}: {}", path, e))?
        }
        None => {
            log::debug!("Reading query document from stdin");
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let doc = GraphQuery::from_json(&source)?;
    log::info!("Query document is valid ({} steps)", doc.query.len());

    println!("{}", QueryFormatter::format(&doc, format)?);
    Ok(())
}

/// Handle the example command
pub fn handle_example(
    graph: Option<String>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = example_query(graph)?;
    println!("{}", QueryFormatter::format(&doc, format)?);
    Ok(())
}

/// Sample traversal touching filters, marks and aggregations
fn example_query(graph: Option<String>) -> gripql::Result<GraphQuery> {
    let mut query = match graph {
        Some(name) => QueryBuilder::for_graph(name),
        None => QueryBuilder::new(),
    };
    query
        .v(())?
        .has_label("Person")?
        .has(and([gt("age", 30), within("city", vec!["Boston", "Chicago"])?]))
        .as_("person")
        .out("knows")?
        .distinct("_gid")?
        .limit(100)
        .aggregate([
            term("cities", "city", 10)?,
            percentile("ages", "age", ())?,
            count("total"),
        ]);
    Ok(query.into_graph_query())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gripql::Step;

    #[test]
    fn test_example_query_is_valid() {
        let doc = example_query(Some("social".to_string())).unwrap();
        assert_eq!(doc.graph.as_deref(), Some("social"));
        assert_eq!(doc.query.len(), 8);
        assert!(matches!(doc.query[0], Step::V(_)));

        let decoded = GraphQuery::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_inspect_reports_missing_file() {
        let err = handle_inspect(
            Some(PathBuf::from("/nonexistent/query.json")),
            OutputFormat::Json,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
