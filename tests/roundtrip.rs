use assert_json_diff::assert_json_eq;
use cql2_syntax::BooleanExpression;
use rstest::rstest;
use std::path::{Path, PathBuf};

/// Parses a string (either encoding) and checks that both renderings
/// re-parse to the same expression.
fn validate_str(s: &str) -> BooleanExpression {
    let expr: BooleanExpression = s.trim().parse().unwrap();

    let text = expr.to_text().unwrap();
    let expr_from_text = cql2_syntax::parse_text(&text).unwrap();
    assert_eq!(expr, expr_from_text, "text round-trip of {text:?}");

    let value = expr.to_value().unwrap();
    let expr_from_json = cql2_syntax::from_json_value(&value).unwrap();
    assert_eq!(expr, expr_from_json, "json round-trip of {value}");
    assert_json_eq!(value, expr_from_json.to_value().unwrap());

    expr
}

#[rstest]
fn validate_text_fixtures(#[files("tests/fixtures/text/*.txt")] path: PathBuf) {
    validate_str(&std::fs::read_to_string(path).unwrap());
}

#[rstest]
fn validate_json_fixtures(#[files("tests/fixtures/json/*.json")] path: PathBuf) {
    validate_str(&std::fs::read_to_string(path).unwrap());
}

#[test]
fn renders_canonical_text() {
    let expr = cql2_syntax::parse_json(
        r#"{"op":">","args":[{"property":"vehicle_height"},
            {"op":"-","args":[{"property":"bridge_clearance"},1]}]}"#,
    )
    .unwrap();
    assert_eq!(
        expr.to_text().unwrap(),
        "\"vehicle_height\" > (\"bridge_clearance\" - 1)"
    );

    let expr = cql2_syntax::parse_json(
        r#"{"op":"like","args":[{"property":"name"},"Smith%"]}"#,
    )
    .unwrap();
    assert_eq!(expr.to_text().unwrap(), "\"name\" LIKE 'Smith%'");

    let expr = cql2_syntax::parse_json(
        r#"{"op":"t_before","args":[{"property":"t"},{"timestamp":"2020-01-01T00:00:00Z"}]}"#,
    )
    .unwrap();
    assert_eq!(
        expr.to_text().unwrap(),
        "T_BEFORE(\"t\", TIMESTAMP('2020-01-01T00:00:00.000000Z'))"
    );
}

#[test]
fn character_literal_escape_round_trip() {
    let expr = cql2_syntax::parse_text("note = 'a''b''''c'").unwrap();
    assert_eq!(
        expr.to_json().unwrap(),
        r#"{"op":"=","args":[{"property":"note"},"a'b''c"]}"#
    );
    assert_eq!(expr.to_text().unwrap(), "\"note\" = 'a''b''''c'");
    assert_eq!(expr, cql2_syntax::parse_text(&expr.to_text().unwrap()).unwrap());
}

/// The two encodings of the same expression parse to the same AST.
#[rstest]
fn encodings_are_equivalent(#[files("tests/fixtures/json/*.json")] path: PathBuf) {
    let json = std::fs::read_to_string(&path).unwrap();
    let text_path = Path::new("tests/fixtures/text")
        .join(path.file_stem().unwrap())
        .with_extension("txt");
    let text = std::fs::read_to_string(text_path).unwrap();

    let from_json = cql2_syntax::parse_json(&json).unwrap();
    let from_text = cql2_syntax::parse_text(text.trim()).unwrap();
    assert_eq!(from_json, from_text);
}
