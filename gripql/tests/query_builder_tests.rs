//! End-to-end tests for query construction
//!
//! Builds queries through the public API and checks the JSON documents that
//! would be submitted to the graph engine.

use gripql::aggregation::{count, field, histogram, percentile, term};
use gripql::filter::{and, between, eq, gt, inside, not, or, outside, within, without};
use gripql::{normalize, Error, GraphQuery, QueryBuilder, Step};
use serde_json::{json, Value};

/// Every "one or many" parameter must normalize the same way
#[test]
fn test_normalization_is_uniform_across_the_surface() {
    let inputs: Vec<(Value, Value)> = vec![
        (Value::Null, json!([])),
        (json!("a"), json!(["a"])),
        (json!(7), json!([7])),
        (json!(["a", 7, "b"]), json!(["a", 7, "b"])),
    ];

    type Method = fn(&mut QueryBuilder, Value) -> gripql::Result<&mut QueryBuilder>;
    let methods: [(&str, Method); 20] = [
        ("v", |q, x| q.v(x)),
        ("e", |q, x| q.e(x)),
        ("out", |q, x| q.out(x)),
        ("outNull", |q, x| q.out_null(x)),
        ("in", |q, x| q.in_(x)),
        ("inNull", |q, x| q.in_null(x)),
        ("both", |q, x| q.both(x)),
        ("outV", |q, x| q.out_v(x)),
        ("inV", |q, x| q.in_v(x)),
        ("bothV", |q, x| q.both_v(x)),
        ("outE", |q, x| q.out_e(x)),
        ("outENull", |q, x| q.out_e_null(x)),
        ("inE", |q, x| q.in_e(x)),
        ("inENull", |q, x| q.in_e_null(x)),
        ("bothE", |q, x| q.both_e(x)),
        ("distinct", |q, x| q.distinct(x)),
        ("fields", |q, x| q.fields(x)),
        ("hasLabel", |q, x| q.has_label(x)),
        ("hasId", |q, x| q.has_id(x)),
        ("hasKey", |q, x| q.has_key(x)),
    ];

    for (input, expected) in &inputs {
        assert_eq!(
            Value::Array(normalize(input.clone()).unwrap()),
            *expected
        );

        for (name, method) in &methods {
            let mut query = QueryBuilder::new();
            method(&mut query, input.clone()).unwrap();
            let mut record = serde_json::Map::new();
            record.insert(name.to_string(), expected.clone());
            let encoded = serde_json::to_value(query.pipeline()).unwrap();
            assert_eq!(encoded, json!([record]), "step {}", name);
        }

        type Factory = fn(&str, Value) -> gripql::Result<gripql::FilterExpression>;
        let factories: [(&str, Factory); 5] = [
            ("INSIDE", |k, x| inside(k, x)),
            ("OUTSIDE", |k, x| outside(k, x)),
            ("BETWEEN", |k, x| between(k, x)),
            ("WITHIN", |k, x| within(k, x)),
            ("WITHOUT", |k, x| without(k, x)),
        ];
        for (kind, factory) in &factories {
            let expr = factory("k", input.clone()).unwrap();
            assert_eq!(
                serde_json::to_value(expr).unwrap(),
                json!({"condition": {"key": "k", "value": expected.clone(), "condition": kind}})
            );
        }
    }

    for (name, method) in &methods {
        let mut query = QueryBuilder::new();
        let err = method(&mut query, json!({"not": "a sequence"})).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }), "step {}", name);
        assert!(query.is_empty(), "step {} must not append on failure", name);
    }
}

#[test]
fn test_v_out_limit_document() {
    let mut query = gripql::v(1).unwrap();
    query.out("knows").unwrap().limit(5);
    assert_eq!(
        serde_json::to_value(query.pipeline()).unwrap(),
        json!([{"v": [1]}, {"out": ["knows"]}, {"limit": 5}])
    );
}

#[test]
fn test_and_of_conditions_document() {
    assert_eq!(
        serde_json::to_value(and([eq("age", 30), gt("height", 150)])).unwrap(),
        json!({"and": {"expressions": [
            {"condition": {"key": "age", "value": 30, "condition": "EQ"}},
            {"condition": {"key": "height", "value": 150, "condition": "GT"}}
        ]}})
    );
}

#[test]
fn test_aggregation_fail_fast() {
    let default = percentile("p1", "latency", ()).unwrap();
    assert_eq!(
        serde_json::to_value(default).unwrap()["percentile"]["percents"],
        json!([1, 5, 25, 50, 75, 95, 99])
    );

    assert!(matches!(
        percentile("p1", "latency", json!(["a", 5])),
        Err(Error::Type { .. })
    ));
    assert!(matches!(
        term("t1", "country", "big"),
        Err(Error::Type { .. })
    ));
    assert!(matches!(
        histogram("h1", "age", json!([5])),
        Err(Error::Type { .. })
    ));
}

#[test]
fn test_range_document() {
    let mut query = QueryBuilder::new();
    query.range(10, 20);
    assert_eq!(
        serde_json::to_value(&query.pipeline()[0]).unwrap(),
        json!({"range": {"start": 10, "stop": 20}})
    );
}

#[test]
fn test_full_query_survives_decoding() {
    let mut query = QueryBuilder::for_graph("social");
    query
        .v(vec!["alice", "bob"]).unwrap()
        .as_("start")
        .has(or([
            not(eq("status", "inactive")),
            within("role", vec!["admin", "owner"]).unwrap(),
        ]))
        .out_e("knows").unwrap()
        .has(between("since", vec![2010, 2020]).unwrap())
        .in_v(()).unwrap()
        .mark("hop")
        .jump("hop", gt("depth", 2), true)
        .select("start")
        .aggregate(vec![
            term("by_country", "country", 10).unwrap(),
            histogram("ages", "age", 5).unwrap(),
            count("total"),
            field("names", "name"),
        ]);

    let json = query.to_json().unwrap();
    let decoded = GraphQuery::from_json(&json).unwrap();

    assert_eq!(decoded, query.to_graph_query());
    assert_eq!(decoded.graph.as_deref(), Some("social"));
    assert!(decoded.query[0].is_seed());
    assert!(matches!(decoded.query.last(), Some(Step::Aggregate(_))));
}

#[test]
fn test_independent_builders_do_not_share_state() {
    let base = gripql::v("a").unwrap();
    let mut left = base.clone();
    let mut right = base.clone();
    left.out("x").unwrap();
    right.in_("y").unwrap().count();

    assert_eq!(base.len(), 1);
    assert_eq!(left.len(), 2);
    assert_eq!(right.len(), 3);
}
