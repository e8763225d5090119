// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Output formatting for query documents

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use gripql::{GraphQuery, Step};

use super::commands::OutputFormat;

/// Formats a decoded query document for the terminal
pub struct QueryFormatter;

impl QueryFormatter {
    pub fn format(doc: &GraphQuery, format: OutputFormat) -> Result<String, gripql::Error> {
        match format {
            OutputFormat::Table => Ok(Self::format_table(doc)),
            OutputFormat::Json => doc.to_json_pretty(),
            OutputFormat::Text => Ok(Self::format_text(doc)),
        }
    }

    fn format_table(doc: &GraphQuery) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "Step", "Arguments"]);

        for (position, step) in doc.query.iter().enumerate() {
            table.add_row(vec![
                Cell::new(position),
                Cell::new(step.name()),
                Cell::new(step.arguments()),
            ]);
        }

        let graph = doc.graph.as_deref().unwrap_or("(unspecified)");
        let mut output = format!(
            "Graph: {}\n{}\n{} step(s), {} filter condition(s)",
            graph,
            table,
            doc.query.len(),
            Self::condition_count(doc)
        );
        if !doc.query.first().map_or(true, Step::is_seed) {
            output.push_str("\nWarning: query does not start with V() or E()");
        }
        output
    }

    /// Condition leaves across every `has` and `jump` step
    fn condition_count(doc: &GraphQuery) -> usize {
        doc.query
            .iter()
            .map(|step| match step {
                Step::Has(expr) => expr.condition_count(),
                Step::Jump(jump) => jump.expression.condition_count(),
                _ => 0,
            })
            .sum()
    }

    fn format_text(doc: &GraphQuery) -> String {
        match &doc.graph {
            Some(graph) => format!("{}.{}", graph, doc.query),
            None => doc.query.to_string(),
        }
    }
}
