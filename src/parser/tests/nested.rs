use pretty_assertions::assert_eq;
use serde_json::json;

use crate::ast::*;
use crate::error::{PathError, SyntaxError};
use crate::parser::{normalize, parse};

fn from_json(value: serde_json::Value) -> NestedCondition {
    NestedCondition::try_from(value).unwrap()
}

#[test]
fn test_nested_matches_flat_path() {
    let nested = from_json(json!({ "address": { "country": "Belgium" } }));
    let conditions = normalize("jsonAttribute", &nested).unwrap();
    assert_eq!(conditions.len(), 1);
    assert_eq!(conditions[0].path, parse("jsonAttribute.address.country").unwrap());
    assert_eq!(conditions[0].op, Operator::Eq);
    assert_eq!(conditions[0].value, ComparisonValue::from("Belgium"));
}

#[test]
fn test_one_condition_per_leaf_in_order() {
    let nested = from_json(json!({
        "name": "Alice",
        "address": { "city": "Ghent", "zip": 9000 },
        "tags": { "[0]": "admin" }
    }));
    let conditions = normalize("data", &nested).unwrap();
    let paths: Vec<String> = conditions.iter().map(|c| c.path.to_string()).collect();
    assert_eq!(
        paths,
        vec!["data.name", "data.address.city", "data.address.zip", "data.tags[0]"]
    );
}

#[test]
fn test_bracket_key_is_index_step() {
    let nested = from_json(json!({ "[0]": { "name": "first" } }));
    let conditions = normalize("items", &nested).unwrap();
    assert_eq!(conditions[0].path, AttributePath::new("items").index(0).property("name"));

    // "0" without brackets stays a property
    let nested = from_json(json!({ "0": "x" }));
    let conditions = normalize("items", &nested).unwrap();
    assert_eq!(conditions[0].path, AttributePath::new("items").property("0"));
}

#[test]
fn test_multi_segment_keys() {
    let nested = from_json(json!({ "address.country": "Belgium", "\"a.b\"": 1 }));
    let conditions = normalize("data", &nested).unwrap();
    assert_eq!(conditions[0].path, parse("data.address.country").unwrap());
    assert_eq!(conditions[1].path, AttributePath::new("data").property("a.b"));
}

#[test]
fn test_modifier_keys_on_leaves() {
    let nested = from_json(json!({
        "age::integer": { "$gt": 18 },
        "country:unquote": "Belgium"
    }));
    let conditions = normalize("data", &nested).unwrap();
    assert_eq!(conditions[0].path, AttributePath::new("data").property("age").cast("integer"));
    assert_eq!(conditions[0].op, Operator::Gt);
    assert_eq!(conditions[0].value, ComparisonValue::from(18));
    assert_eq!(conditions[1].path, AttributePath::new("data").property("country").unquote());
}

#[test]
fn test_modifier_key_cannot_nest() {
    let nested = from_json(json!({ "a:unquote": { "b": 1 } }));
    assert_eq!(
        normalize("data", &nested),
        Err(PathError::NestedKey {
            key: "a:unquote".into(),
            source: SyntaxError::ModifierNotTrailing { position: 9 },
        })
    );
}

#[test]
fn test_base_with_modifier_cannot_extend() {
    let nested = from_json(json!({ "b": 1 }));
    assert!(matches!(
        normalize("data:unquote", &nested),
        Err(PathError::NestedKey { source: SyntaxError::ModifierNotTrailing { .. }, .. })
    ));
}

#[test]
fn test_base_may_be_a_path() {
    let nested = from_json(json!({ "c": true }));
    let conditions = normalize("data.a.b", &nested).unwrap();
    assert_eq!(conditions[0].path, parse("data.a.b.c").unwrap());
}

#[test]
fn test_invalid_key_reports_key() {
    let nested = from_json(json!({ "a..b": 1 }));
    assert_eq!(
        normalize("data", &nested),
        Err(PathError::NestedKey {
            key: "a..b".into(),
            source: SyntaxError::EmptySegment { position: 1 },
        })
    );
}

#[test]
fn test_null_kinds_from_json() {
    let nested = from_json(json!({
        "a": null,
        "b": { "$sqlNull": true },
        "c": { "$ne": { "$sqlNull": true } }
    }));
    let conditions = normalize("data", &nested).unwrap();
    assert_eq!(conditions[0].value, ComparisonValue::JsonNull);
    assert_eq!(conditions[1].value, ComparisonValue::SqlNull);
    assert_eq!(conditions[2].op, Operator::Ne);
    assert_eq!(conditions[2].value, ComparisonValue::SqlNull);
}

#[test]
fn test_sql_null_marker_must_be_true() {
    for flag in [json!(false), json!(1), json!("yes"), json!(null)] {
        let expected = Err(PathError::InvalidSqlNull {
            found: flag.to_string(),
        });

        let direct = json!({ "name": { "$sqlNull": flag.clone() } });
        assert_eq!(NestedCondition::try_from(direct), expected);

        let operand = json!({ "name": { "$ne": { "$sqlNull": flag } } });
        assert_eq!(NestedCondition::try_from(operand), expected);
    }
}

#[test]
fn test_operator_object_emits_one_condition_per_operator() {
    let nested = from_json(json!({ "age": { "$gte": 18, "$lt": 65 } }));
    let conditions = normalize("data", &nested).unwrap();
    let ops: Vec<Operator> = conditions.iter().map(|c| c.op).collect();
    assert_eq!(ops, vec![Operator::Gte, Operator::Lt]);
}

#[test]
fn test_unknown_operator() {
    let err = NestedCondition::try_from(json!({ "age": { "$gtee": 1 } })).unwrap_err();
    assert_eq!(
        err,
        PathError::UnknownOperator { key: "$gtee".into(), suggestion: Some("$gte".into()) }
    );
}

#[test]
fn test_mixed_operator_keys() {
    let err = NestedCondition::try_from(json!({ "$gt": 1, "b": 2 })).unwrap_err();
    assert!(matches!(err, PathError::MixedOperatorKeys { .. }));
}

#[test]
fn test_empty_object_contributes_nothing() {
    let conditions = normalize("data", &from_json(json!({ "a": {} }))).unwrap();
    assert!(conditions.is_empty());
}

#[test]
fn test_terminal_at_root() {
    let conditions = normalize("data.a", &NestedCondition::value(5)).unwrap();
    assert_eq!(conditions, vec![JsonCondition::eq(parse("data.a").unwrap(), 5)]);
}

#[test]
fn test_builder_form_matches_json_form() {
    let built = NestedCondition::nested([(
        "address",
        NestedCondition::nested([("country", NestedCondition::value("Belgium"))]),
    )]);
    let parsed = from_json(json!({ "address": { "country": "Belgium" } }));
    assert_eq!(built, parsed);
}
