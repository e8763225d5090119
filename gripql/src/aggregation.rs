// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Aggregation descriptors for the `aggregate` step

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{Error, Result};
use crate::normalize::{is_absent, normalize_param};

/// Percentiles requested when none are given
pub const DEFAULT_PERCENTS: [u64; 7] = [1, 5, 25, 50, 75, 95, 99];

/// Named aggregation, serialized as `{"name": ..., "<kind>": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub name: String,
    #[serde(flatten)]
    pub kind: AggregationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggregationKind {
    #[serde(rename = "term")]
    Term(TermAggregation),
    #[serde(rename = "percentile")]
    Percentile(PercentileAggregation),
    #[serde(rename = "histogram")]
    Histogram(HistogramAggregation),
    #[serde(rename = "count")]
    Count(CountAggregation),
    #[serde(rename = "field")]
    Field(FieldAggregation),
}

impl AggregationKind {
    pub fn name(&self) -> &'static str {
        match self {
            AggregationKind::Term(_) => "term",
            AggregationKind::Percentile(_) => "percentile",
            AggregationKind::Histogram(_) => "histogram",
            AggregationKind::Count(_) => "count",
            AggregationKind::Field(_) => "field",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermAggregation {
    pub field: String,
    /// Bucket count bound; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileAggregation {
    pub field: String,
    pub percents: Vec<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramAggregation {
    pub field: String,
    /// Bucket width; bucketing is left to the engine when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountAggregation {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAggregation {
    pub field: String,
}

/// Accepts an absent value or a number
fn optional_number(param: &str, value: Value) -> Result<Option<Number>> {
    if is_absent(&value) {
        return Ok(None);
    }
    match value {
        Value::Number(n) => Ok(Some(n)),
        other => {
            log::debug!("Non-numeric {} for aggregation", param);
            Err(Error::not_a_number(param, &other))
        }
    }
}

/// Term (bucket by distinct value) aggregation; `size` bounds the bucket count
pub fn term(
    name: impl Into<String>,
    field: impl Into<String>,
    size: impl Into<Value>,
) -> Result<Aggregation> {
    let size = optional_number("size", size.into())?;
    Ok(Aggregation {
        name: name.into(),
        kind: AggregationKind::Term(TermAggregation {
            field: field.into(),
            size,
        }),
    })
}

/// Percentile aggregation over a numeric field.
///
/// Absent `percents` requests [`DEFAULT_PERCENTS`]. Otherwise the input is
/// normalized and every element must be a number.
pub fn percentile(
    name: impl Into<String>,
    field: impl Into<String>,
    percents: impl Into<Value>,
) -> Result<Aggregation> {
    let percents = percents.into();
    let percents = if is_absent(&percents) {
        DEFAULT_PERCENTS.iter().map(|&p| Number::from(p)).collect()
    } else {
        normalize_param("percents", percents)?
            .into_iter()
            .map(|p| match p {
                Value::Number(n) => Ok(n),
                other => Err(Error::not_a_number("percents", &other)),
            })
            .collect::<Result<Vec<_>>>()?
    };
    Ok(Aggregation {
        name: name.into(),
        kind: AggregationKind::Percentile(PercentileAggregation {
            field: field.into(),
            percents,
        }),
    })
}

/// Histogram aggregation with an optional bucket interval
pub fn histogram(
    name: impl Into<String>,
    field: impl Into<String>,
    interval: impl Into<Value>,
) -> Result<Aggregation> {
    // Only a missing interval is omitted; numeric zero is still sent
    let interval = match interval.into() {
        Value::Number(n) => Some(n),
        other => optional_number("interval", other)?,
    };
    Ok(Aggregation {
        name: name.into(),
        kind: AggregationKind::Histogram(HistogramAggregation {
            field: field.into(),
            interval,
        }),
    })
}

pub fn count(name: impl Into<String>) -> Aggregation {
    Aggregation {
        name: name.into(),
        kind: AggregationKind::Count(CountAggregation {}),
    }
}

/// Projects a single field
pub fn field(name: impl Into<String>, field: impl Into<String>) -> Aggregation {
    Aggregation {
        name: name.into(),
        kind: AggregationKind::Field(FieldAggregation {
            field: field.into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_without_size() {
        let agg = term("t1", "country", Value::Null).unwrap();
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"name": "t1", "term": {"field": "country"}})
        );
    }

    #[test]
    fn test_term_with_size() {
        let agg = term("t1", "country", 10).unwrap();
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"name": "t1", "term": {"field": "country", "size": 10}})
        );
    }

    #[test]
    fn test_term_rejects_non_numeric_size() {
        match term("t1", "country", "big") {
            Err(Error::Type { param, found, .. }) => {
                assert_eq!(param, "size");
                assert_eq!(found, "string");
            }
            other => panic!("Expected type error, got {:?}", other),
        }
    }

    #[test]
    fn test_percentile_defaults() {
        let agg = percentile("p1", "latency", None::<Vec<f64>>).unwrap();
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"name": "p1", "percentile": {
                "field": "latency",
                "percents": [1, 5, 25, 50, 75, 95, 99]
            }})
        );
    }

    #[test]
    fn test_percentile_normalizes_scalar() {
        let agg = percentile("p1", "latency", 99.9).unwrap();
        match agg.kind {
            AggregationKind::Percentile(p) => {
                assert_eq!(p.percents.len(), 1);
                assert_eq!(p.percents[0].as_f64(), Some(99.9));
            }
            _ => panic!("Expected percentile aggregation"),
        }
    }

    #[test]
    fn test_percentile_rejects_non_numeric_elements() {
        assert!(matches!(
            percentile("p1", "latency", json!(["a", 5])),
            Err(Error::Type { .. })
        ));
        assert!(matches!(
            percentile("p1", "latency", json!({"p": 5})),
            Err(Error::Shape { .. })
        ));
    }

    #[test]
    fn test_histogram_interval() {
        let agg = histogram("h1", "age", 5).unwrap();
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"name": "h1", "histogram": {"field": "age", "interval": 5}})
        );

        let agg = histogram("h1", "age", ()).unwrap();
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"name": "h1", "histogram": {"field": "age"}})
        );

        assert!(histogram("h1", "age", "wide").is_err());
    }

    #[test]
    fn test_histogram_keeps_zero_interval() {
        let agg = histogram("h", "age", 0).unwrap();
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"name": "h", "histogram": {"field": "age", "interval": 0}})
        );

        // Other falsy values still count as not provided
        let agg = histogram("h", "age", false).unwrap();
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"name": "h", "histogram": {"field": "age"}})
        );
    }

    #[test]
    fn test_term_drops_zero_size() {
        let agg = term("t", "country", 0).unwrap();
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"name": "t", "term": {"field": "country"}})
        );
    }

    #[test]
    fn test_count_and_field() {
        assert_eq!(
            serde_json::to_value(count("c")).unwrap(),
            json!({"name": "c", "count": {}})
        );
        assert_eq!(
            serde_json::to_value(field("f", "gender")).unwrap(),
            json!({"name": "f", "field": {"field": "gender"}})
        );
    }

    #[test]
    fn test_decode_from_wire() {
        let agg: Aggregation = serde_json::from_value(json!(
            {"name": "t", "term": {"field": "country", "size": 3}}
        ))
        .unwrap();
        assert_eq!(agg, term("t", "country", 3).unwrap());
        assert_eq!(agg.kind.name(), "term");
    }
}
