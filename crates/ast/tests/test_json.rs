//! Tests for reading syntax trees from the parser's JSON output

use ember_ast::build::*;
use ember_ast::{AstError, Node, from_json, from_reader};

#[test]
fn test_reads_assignment_program() {
    let text = r#"{
        "name": "N_PROGRAM",
        "statements": [{
            "name": "N_EXPRESSION_STATEMENT",
            "expression": {
                "name": "N_EXPRESSION",
                "left": {"name": "N_VARIABLE", "variable": "a"},
                "right": [{"operator": "=", "operand": {"name": "N_INTEGER", "number": 4}}]
            }
        }]
    }"#;

    let expected = program(vec![expr_stmt(assign(var("a"), int(4)))]);
    assert_eq!(from_json(text).unwrap(), expected);
}

#[test]
fn test_reads_camel_case_fields() {
    let text = r#"{
        "name": "N_IF_STATEMENT",
        "condition": {"name": "N_BOOLEAN", "bool": true},
        "consequentStatements": [{"name": "N_INLINE_HTML_STATEMENT", "html": "<p>"}]
    }"#;

    let node = from_json(text).unwrap();
    match node {
        Node::IfStatement {
            consequent_statements,
            alternate_statements,
            ..
        } => {
            assert_eq!(consequent_statements, vec![inline_html("<p>")]);
            assert!(alternate_statements.is_empty());
        }
        other => panic!("expected if statement, got {}", other.kind()),
    }
}

#[test]
fn test_reads_reference_marker() {
    let text = r#"{"name": "N_VARIABLE", "variable": "b", "reference": true}"#;
    assert_eq!(from_json(text).unwrap(), ref_var("b"));
}

#[test]
fn test_reads_append_index() {
    let text = r#"{
        "name": "N_ARRAY_INDEX",
        "array": {"name": "N_VARIABLE", "variable": "a"},
        "indices": [{}]
    }"#;
    assert_eq!(from_json(text).unwrap(), index(var("a"), vec![None]));
}

#[test]
fn test_reads_class_with_members() {
    let text = r#"{
        "name": "N_CLASS_STATEMENT",
        "className": {"name": "N_STRING", "string": "Point"},
        "members": [
            {"name": "N_PROPERTY_DEFINITION", "variable": {"name": "N_VARIABLE", "variable": "x"}},
            {"name": "N_METHOD_DEFINITION", "func": {"name": "N_STRING", "string": "getX"}, "statements": []}
        ]
    }"#;

    let expected = class(
        "Point",
        vec![property("x", None), method("getX", &[], vec![])],
    );
    assert_eq!(from_json(text).unwrap(), expected);
}

#[test]
fn test_reads_void() {
    assert_eq!(from_json(r#"{"name": "N_VOID"}"#).unwrap(), void());
}

#[test]
fn test_from_reader() {
    let bytes = br#"{"name": "N_PROGRAM", "statements": []}"#;
    assert_eq!(from_reader(&bytes[..]).unwrap(), program(vec![]));
}

#[test]
fn test_unknown_kind_is_rejected() {
    let result = from_json(r#"{"name": "N_GOTO_STATEMENT", "label": "x"}"#);
    assert!(matches!(result, Err(AstError::Json(_))));
}

#[test]
fn test_missing_field_is_rejected() {
    let result = from_json(r#"{"name": "N_INTEGER"}"#);
    assert!(result.is_err());
}
