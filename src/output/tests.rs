//! Tests for output module

use super::*;
use crate::pagination::FetchLimit;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn guids(n: std::ops::RangeInclusive<u32>) -> Vec<Value> {
    n.map(|i| json!({ "guid": i.to_string() })).collect()
}

#[test]
fn test_aggregate_keeps_page_order() {
    let mut aggregate = Aggregate::new();
    aggregate.extend(guids(1..=2));
    aggregate.extend(guids(3..=4));

    assert_eq!(aggregate.len(), 4);
    assert_eq!(aggregate.as_slice(), guids(1..=4).as_slice());
}

#[test]
fn test_aggregate_truncate_drops_tail() {
    let mut aggregate = Aggregate::new();
    aggregate.extend(guids(1..=2));
    aggregate.extend(guids(3..=4));

    let resources = aggregate.finish(FetchLimit::new(3));
    assert_eq!(resources, guids(1..=3));
}

#[test]
fn test_aggregate_unbounded_keeps_everything() {
    let mut aggregate = Aggregate::new();
    aggregate.extend(guids(1..=5));

    assert_eq!(aggregate.finish(FetchLimit::UNBOUNDED), guids(1..=5));
}

#[test]
fn test_aggregate_limit_above_count() {
    let mut aggregate = Aggregate::new();
    aggregate.extend(guids(1..=2));

    assert_eq!(aggregate.finish(FetchLimit::new(10)), guids(1..=2));
}

#[test]
fn test_encode_resources() {
    let bytes = encode_resources(&guids(1..=2)).unwrap();
    let decoded: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded, json!([{"guid": "1"}, {"guid": "2"}]));
}

#[test]
fn test_encode_empty_is_array() {
    assert_eq!(encode_resources(&[]).unwrap().as_ref(), b"[]");
    assert_eq!(Aggregate::new().to_json_bytes().unwrap().as_ref(), b"[]");
}
