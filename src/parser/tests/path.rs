use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::error::SyntaxError;
use crate::parser::{parse, parse_fragment};

#[test]
fn test_parse_nested_properties() {
    let path = parse("jsonAttribute.address.country").unwrap();
    assert_eq!(
        path,
        AttributePath {
            base: "jsonAttribute".into(),
            segments: vec![
                PathSegment::Property("address".into()),
                PathSegment::Property("country".into()),
            ],
            cast: None,
            unquote: false,
        }
    );
}

#[test]
fn test_parse_array_index() {
    let path = parse("gameData.passwords[0]").unwrap();
    assert_eq!(path, AttributePath::new("gameData").property("passwords").index(0));
}

#[test]
fn test_parse_consecutive_indices() {
    let path = parse("matrix[1][2]").unwrap();
    assert_eq!(path, AttributePath::new("matrix").index(1).index(2));
}

#[test]
fn test_parse_cast() {
    let path = parse("jsonAttribute.age::integer").unwrap();
    assert_eq!(path.cast.as_deref(), Some("integer"));
    assert!(!path.unquote);
}

#[test]
fn test_parse_unquote() {
    let path = parse("jsonAddress.country:unquote").unwrap();
    assert!(path.unquote);
    assert_eq!(path.segments, vec![PathSegment::Property("country".into())]);
}

#[test]
fn test_parse_modifiers_on_bare_column() {
    let path = parse("data:unquote::text").unwrap();
    assert_eq!(path, AttributePath::new("data").unquote().cast("text"));
}

#[test]
fn test_quoted_segment_is_one_property() {
    let quoted = parse(r#"jsonAttribute."address.country""#).unwrap();
    let dotted = parse("jsonAttribute.address.country").unwrap();
    assert_eq!(quoted.segments, vec![PathSegment::Property("address.country".into())]);
    assert_ne!(quoted, dotted);
}

#[test]
fn test_escaped_quote_is_preserved() {
    let path = parse(r#"jsonAttribute.address."\"country""#).unwrap();
    assert_eq!(
        path.segments,
        vec![
            PathSegment::Property("address".into()),
            PathSegment::Property("\"country".into()),
        ]
    );
}

#[test]
fn test_numeric_property_is_not_an_index() {
    let path = parse("data.0").unwrap();
    assert_eq!(path.segments, vec![PathSegment::Property("0".into())]);
}

#[test]
fn test_empty_segments() {
    assert_eq!(parse("a..b"), Err(SyntaxError::EmptySegment { position: 1 }));
    assert_eq!(parse("a.b."), Err(SyntaxError::EmptySegment { position: 3 }));
    assert_eq!(parse("a.[0]"), Err(SyntaxError::EmptySegment { position: 1 }));
    assert_eq!(parse("a.:unquote"), Err(SyntaxError::EmptySegment { position: 1 }));
}

#[test]
fn test_missing_base_attribute() {
    assert_eq!(parse(""), Err(SyntaxError::MissingBaseAttribute));
    assert_eq!(parse(".a"), Err(SyntaxError::MissingBaseAttribute));
    assert_eq!(parse("[0]"), Err(SyntaxError::MissingBaseAttribute));
    assert_eq!(parse(r#""quoted".a"#), Err(SyntaxError::MissingBaseAttribute));
}

#[test]
fn test_missing_separator() {
    assert_eq!(parse(r#"a"b""#), Err(SyntaxError::MissingSeparator { position: 1 }));
    assert_eq!(parse("a[0]b"), Err(SyntaxError::MissingSeparator { position: 4 }));
}

#[test]
fn test_errors_never_partially_apply() {
    // Valid prefix, invalid tail: the whole call fails
    assert!(parse("a.b.c[x]").is_err());
}

#[test]
fn test_canonical_text_round_trip() {
    for raw in [
        "a",
        "a.b.c",
        "a[0][1].b",
        r#"a."x.y"."say \"hi\"""#,
        r#"a."""#,
        "a.b:unquote",
        "a.b::integer",
        "a.b:unquote::varchar(255)",
    ] {
        let path = parse(raw).unwrap();
        let reparsed = parse(&path.to_string()).unwrap();
        assert_eq!(path, reparsed, "round trip of {}", raw);
    }
}

#[test]
fn test_canonical_text_normalizes_modifier_order() {
    let path = parse("a.b::integer:unquote").unwrap();
    assert_eq!(path.to_string(), "a.b:unquote::integer");
}

#[test]
fn test_from_str() {
    let path: AttributePath = "data.tags[2]".parse().unwrap();
    assert_eq!(path, AttributePath::new("data").property("tags").index(2));
}

#[test]
fn test_parse_fragment_forms() {
    assert_eq!(
        parse_fragment("address").unwrap().segments,
        vec![PathSegment::Property("address".into())]
    );
    assert_eq!(
        parse_fragment(r#""a.b""#).unwrap().segments,
        vec![PathSegment::Property("a.b".into())]
    );
    let index = parse_fragment("[0]").unwrap();
    assert!(index.starts_with_index());
    assert_eq!(index.segments, vec![PathSegment::Index(0)]);

    let modifiers_only = parse_fragment(":unquote").unwrap();
    assert!(modifiers_only.segments.is_empty());
    assert!(modifiers_only.unquote);
}

#[test]
fn test_parse_fragment_rejects_empty_and_leading_dot() {
    assert_eq!(parse_fragment(""), Err(SyntaxError::EmptySegment { position: 0 }));
    assert_eq!(parse_fragment(".a"), Err(SyntaxError::EmptySegment { position: 0 }));
}
