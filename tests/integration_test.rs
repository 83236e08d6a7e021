use pretty_assertions::assert_eq;
use serde_json::json;

use qail_jsonpath::prelude::*;

#[test]
fn test_nested_property_with_json_string() {
    let path = compile_attribute_path("jsonAttribute.address.country").unwrap();
    assert_eq!(
        path,
        AttributePath::new("jsonAttribute").property("address").property("country")
    );

    let coerced = coerce_comparison_value(
        &path,
        Operator::Eq,
        &ComparisonValue::from("Belgium"),
        Dialect::Postgres,
    );
    assert_eq!(coerced.literal, Some(Value::Json(r#""Belgium""#.to_string())));

    let result = compile_condition(
        "jsonAttribute.address.country",
        Operator::Eq,
        "Belgium",
        Dialect::Postgres,
    )
    .unwrap();
    assert_eq!(
        result.sql,
        r#""jsonAttribute" #> '{address,country}' = $1::jsonb"#
    );
    assert_eq!(result.params, vec![Value::Json(r#""Belgium""#.to_string())]);
}

#[test]
fn test_array_index() {
    let path = compile_attribute_path("gameData.passwords[0]").unwrap();
    assert_eq!(
        path.segments,
        vec![PathSegment::Property("passwords".into()), PathSegment::Index(0)]
    );

    let result = compile_condition("gameData.passwords[0]", Operator::Eq, "0451", Dialect::MySql)
        .unwrap();
    assert_eq!(
        result.sql,
        "JSON_EXTRACT(`gameData`, '$.passwords[0]') = CAST(? AS JSON)"
    );
    assert_eq!(result.params, vec![Value::Json(r#""0451""#.to_string())]);
}

#[test]
fn test_cast_before_numeric_comparison() {
    let path = compile_attribute_path("jsonAttribute.age::integer").unwrap();
    assert_eq!(path.cast.as_deref(), Some("integer"));
    assert!(!path.unquote);

    let result =
        compile_condition("jsonAttribute.age::integer", Operator::Gt, 18i64, Dialect::Postgres)
            .unwrap();
    assert_eq!(result.sql, r#"("jsonAttribute"->'age')::integer > $1"#);
    assert_eq!(result.params, vec![Value::Int(18)]);

    let result =
        compile_condition("jsonAttribute.age::integer", Operator::Gt, 18i64, Dialect::Sqlite)
            .unwrap();
    assert_eq!(result.sql, r#"CAST("jsonAttribute"->'$.age' AS integer) > ?"#);
}

#[test]
fn test_unquote_compares_plain_string() {
    let path = compile_attribute_path("jsonAddress.country:unquote").unwrap();
    assert!(path.unquote);

    for dialect in Dialect::ALL {
        let result =
            compile_condition("jsonAddress.country:unquote", Operator::Eq, "Belgium", dialect)
                .unwrap();
        assert_eq!(result.params, vec![Value::String("Belgium".to_string())], "{}", dialect);
    }
}

#[test]
fn test_escaped_quote_in_segment() {
    let path = compile_attribute_path(r#"jsonAttribute.address."\"country""#).unwrap();
    assert_eq!(
        path.segments,
        vec![
            PathSegment::Property("address".into()),
            PathSegment::Property("\"country".into()),
        ]
    );
    assert_eq!(
        emit_sql(&path, Dialect::Postgres).sql,
        r#""jsonAttribute" #> '{address,"\"country"}'"#
    );
    assert_eq!(
        emit_sql(&path, Dialect::MySql).sql,
        r#"JSON_EXTRACT(`jsonAttribute`, '$.address."\\"country"')"#
    );

    let result = compile_condition(
        r#"jsonAttribute.address."\"country":unquote"#,
        Operator::Eq,
        "BE",
        Dialect::Sqlite,
    )
    .unwrap();
    assert_eq!(
        result.sql,
        r#"(SELECT value FROM json_each("jsonAttribute"->'$.address') WHERE key = '"country') = ?"#
    );
    let json_form = emit_sql(&path, Dialect::Sqlite).sql;
    let lookup = r#"FROM json_each("jsonAttribute"->'$.address') WHERE key = '"country'"#;
    assert!(json_form.contains(lookup), "{}", json_form);
}

#[test]
fn test_json_null_and_sql_null_differ() {
    for dialect in Dialect::ALL {
        let compile = |value: ComparisonValue| {
            compile_condition("jsonAttribute.name", Operator::Eq, value, dialect)
        };
        let json_null = compile(ComparisonValue::JsonNull).unwrap();
        let sql_null = compile(ComparisonValue::SqlNull).unwrap();
        assert_ne!(json_null.sql, sql_null.sql, "{}", dialect);
        assert!(!json_null.sql.contains("IS NULL"), "{}", json_null.sql);
        let expected = match dialect {
            Dialect::MsSql => Vec::new(),
            _ => vec![Value::Json("null".to_string())],
        };
        assert_eq!(json_null.params, expected, "{}", dialect);
        assert!(sql_null.sql.ends_with(" IS NULL"), "{}", sql_null.sql);
        assert!(sql_null.params.is_empty());
    }
}

#[test]
fn test_nested_json_through_compiler() {
    let nested = NestedCondition::try_from(json!({
        "address": { "country": "Belgium", "zip": { "$gte": 1000, "$lt": 2000 } },
        "deletedAt": { "$sqlNull": true },
        "tags": { "[0]:unquote": "admin" }
    }))
    .unwrap();

    let compiler = PathCompiler::new();
    let conditions = compiler.compile_nested_paths("meta", &nested).unwrap();
    let paths: Vec<String> = conditions.iter().map(|c| c.path.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "meta.address.country",
            "meta.address.zip",
            "meta.address.zip",
            "meta.deletedAt",
            "meta.tags[0]:unquote",
        ]
    );

    let result = compiler
        .compile_nested_conditions("meta", &nested, Dialect::Postgres)
        .unwrap();
    assert_eq!(
        result.sql,
        concat!(
            r#""meta" #> '{address,country}' = $1::jsonb"#,
            r#" AND "meta" #> '{address,zip}' >= $2::jsonb"#,
            r#" AND "meta" #> '{address,zip}' < $3::jsonb"#,
            r#" AND "meta"->'deletedAt' IS NULL"#,
            r#" AND "meta" #>> '{tags,0}' = $4"#,
        )
    );
    assert_eq!(
        result.params,
        vec![
            Value::Json(r#""Belgium""#.to_string()),
            Value::Json("1000".to_string()),
            Value::Json("2000".to_string()),
            Value::String("admin".to_string()),
        ]
    );
}

#[test]
fn test_nested_and_flat_forms_agree() {
    let nested = NestedCondition::try_from(json!({ "a": { "[2]": { "b c": 1 } } })).unwrap();
    let conditions = compile_nested_paths("doc", &nested).unwrap();
    assert_eq!(
        conditions[0].path,
        compile_attribute_path(r#"doc.a[2]."b c""#).unwrap()
    );
}

#[test]
fn test_compiler_from_toml_config() {
    let config = CompilerConfig::from_toml(
        r#"
dialect = "sqlite"
parameterized = false
"#,
    )
    .unwrap();
    let compiler = PathCompiler::with_config(config);
    let dialect = compiler.config().dialect;
    let result = compiler
        .compile_condition("meta.active:unquote", Operator::Eq, true, dialect)
        .unwrap();
    assert_eq!(result.sql, r#""meta"->>'$.active' = 1"#);
    assert!(result.params.is_empty());
}

#[test]
fn test_errors_are_dialect_independent() {
    for raw in ["data..a", "data[x]", "data.\"open", "data:unquote:unquote", "data::int.a"] {
        let err = compile_attribute_path(raw).unwrap_err();
        for dialect in Dialect::ALL {
            assert_eq!(
                compile_condition(raw, Operator::Eq, 1i64, dialect).unwrap_err(),
                PathError::Syntax(err.clone())
            );
        }
    }
}

#[test]
fn test_canonical_text_round_trip() {
    for raw in [
        "data",
        "data.a[0].b",
        r#"data."a.b"."c\"d""#,
        "data.x:unquote::numeric(10, 2)",
    ] {
        let path = compile_attribute_path(raw).unwrap();
        let reparsed: AttributePath = path.to_string().parse().unwrap();
        assert_eq!(reparsed, path, "{}", raw);
    }
}
