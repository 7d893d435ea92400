//! Compilation Tests
//!
//! End-to-end checks of the AST to IR pass, through both the builder API and
//! the parser's JSON form:
//! - Local variable collection
//! - Declaration hoisting
//! - Value and reference assignment selection
//! - Implied arrays on write paths
//! - Foreach slot allocation
//! - Rejection of unsupported constructs

use ember_ast::build::*;
use ember_ast::from_json;
use ember_codegen::ir::{Base, Expr, Place, Source, Stmt};
use ember_codegen::{CompileError, Fix, Position, compile};

#[test]
fn test_assign_and_echo_listing() {
    let tree = program(vec![expr_stmt(assign(var("a"), int(1))), echo(var("a"))]);
    let compiled = compile(&tree).unwrap();

    assert_eq!(compiled.local_variable_names, vec!["a"]);
    assert_eq!(
        compiled.to_string(),
        "scope.defineVariables([\"a\"]);\n\
         $a.setValue(1);\n\
         stdout.write($a.getValue().coerceToString());\n"
    );
}

#[test]
fn test_reference_assignment_from_json() {
    let tree = from_json(
        r#"{
            "name": "N_PROGRAM",
            "statements": [{
                "name": "N_EXPRESSION_STATEMENT",
                "expression": {
                    "name": "N_EXPRESSION",
                    "left": {"name": "N_VARIABLE", "variable": "b"},
                    "right": [{
                        "operator": "=",
                        "operand": {"name": "N_VARIABLE", "variable": "a", "reference": true}
                    }]
                }
            }]
        }"#,
    )
    .unwrap();
    let compiled = compile(&tree).unwrap();

    assert_eq!(compiled.local_variable_names, vec!["b", "a"]);
    assert_eq!(
        compiled.body,
        vec![Stmt::Expression(Expr::Assign {
            target: Box::new(Place::Variable("b".to_string())),
            source: Box::new(Source::Reference(Place::Variable("a".to_string()))),
        })]
    );
}

#[test]
fn test_nested_assignment_binds_by_value() {
    let tree = program(vec![expr_stmt(assign(var("a"), assign(var("b"), int(1))))]);
    let compiled = compile(&tree).unwrap();

    assert_eq!(compiled.body[0].to_string(), "$a.setValue($b.setValue(1));\n");
}

#[test]
fn test_flat_assignment_chain_is_rejected() {
    let tree = program(vec![expr_stmt(chain(var("a"), vec![("=", var("b")), ("=", int(1))]))]);
    assert!(matches!(
        compile(&tree),
        Err(CompileError::InvalidAssignmentTarget { .. })
    ));
}

#[test]
fn test_function_declarations_are_hoisted() {
    let tree = program(vec![
        echo(call("f", vec![])),
        function("f", &[], vec![ret(Some(int(1)))]),
    ]);
    let compiled = compile(&tree).unwrap();

    assert!(compiled.local_variable_names.is_empty());
    assert_eq!(
        compiled.to_string(),
        "namespace.defineFunction(\"f\", function () {\n\
         \x20   try {\n\
         \x20       scopeChain.push(new Scope());\n\
         \x20       return 1;\n\
         \x20   } finally {\n\
         \x20       scopeChain.pop();\n\
         \x20   }\n\
         });\n\
         stdout.write(namespace.getFunction(\"f\")().coerceToString());\n"
    );
}

#[test]
fn test_class_declarations_are_hoisted_after_functions_in_order() {
    let tree = program(vec![
        echo(int(1)),
        class("A", vec![]),
        function("f", &[], vec![]),
    ]);
    let compiled = compile(&tree).unwrap();

    assert!(matches!(compiled.body[0], Stmt::DefineClass(_)));
    assert!(matches!(compiled.body[1], Stmt::DefineFunction(_)));
    assert!(matches!(compiled.body[2], Stmt::Echo(_)));
}

#[test]
fn test_append_to_nested_index_implies_arrays() {
    let tree = program(vec![expr_stmt(assign(
        index(var("a"), vec![Some(string_literal("x")), None]),
        int(1),
    ))]);
    let compiled = compile(&tree).unwrap();

    assert_eq!(
        compiled.body[0].to_string(),
        "implyArray(implyArray($a).getElementByKey(\"x\")).pushElement().setValue(1);\n"
    );
}

#[test]
fn test_property_write_implies_container() {
    let tree = program(vec![expr_stmt(assign(prop(var("this"), &["count"]), int(0)))]);
    let compiled = compile(&tree).unwrap();

    let Stmt::Expression(Expr::Assign { target, .. }) = &compiled.body[0] else {
        panic!("expected assignment");
    };
    assert_eq!(
        **target,
        Place::element(
            Base::Implied(Place::Variable("this".to_string())),
            Some(Expr::String("count".to_string()))
        )
    );
}

#[test]
fn test_foreach_slots_restart_per_function() {
    let tree = program(vec![
        foreach(var("xs"), None, var("x"), vec![]),
        function(
            "f",
            &["ys"],
            vec![foreach(var("ys"), None, var("y"), vec![])],
        ),
    ]);
    let compiled = compile(&tree).unwrap();
    assert_eq!(compiled.loop_slots, 1);

    let Stmt::DefineFunction(function) = &compiled.body[0] else {
        panic!("expected function first");
    };
    assert_eq!(function.loop_slots, 1);
    let Stmt::Scoped(body) = &function.body[0] else {
        panic!("expected scoped body");
    };
    let Some(Stmt::Foreach(inner)) = body.last() else {
        panic!("expected foreach");
    };
    assert_eq!(inner.slot, 0);

    let Stmt::Foreach(outer) = &compiled.body[1] else {
        panic!("expected foreach");
    };
    assert_eq!(outer.slot, 0);
    assert_eq!(compiled.local_variable_names, vec!["x"]);
}

#[test]
fn test_foreach_listing() {
    let tree = program(vec![foreach(
        var("xs"),
        Some(var("k")),
        ref_var("v"),
        vec![echo(var("v"))],
    )]);
    let compiled = compile(&tree).unwrap();

    assert_eq!(
        compiled.body[0].to_string(),
        "array_0 = $xs.getValue().reset();\n\
         length_0 = array_0.getLength();\n\
         pointer_0 = 0;\n\
         while (pointer_0 < length_0) {\n\
         \x20   $k.setValue(array_0.getKeyByIndex(pointer_0));\n\
         \x20   $v.setReference(array_0.getElementByIndex(pointer_0).getReference());\n\
         \x20   pointer_0++;\n\
         \x20   stdout.write($v.getValue().coerceToString());\n\
         }\n"
    );
}

#[test]
fn test_list_destructuring_target() {
    let tree = program(vec![expr_stmt(assign(
        list(vec![var("a"), void(), var("c")]),
        var("row"),
    ))]);
    let compiled = compile(&tree).unwrap();

    assert_eq!(compiled.local_variable_names, vec!["a", "c"]);
    assert_eq!(
        compiled.body[0].to_string(),
        "list($a, nullReference, $c).setValue($row.getValue());\n"
    );
}

#[test]
fn test_new_and_method_call_listing() {
    let tree = program(vec![echo(method_call(
        new_("Counter", vec![int(5)]),
        "next",
        vec![],
    ))]);
    let compiled = compile(&tree).unwrap();

    assert_eq!(
        compiled.body[0].to_string(),
        "stdout.write(createInstance(\"Counter\", [5]).callMethod(\"next\", []).coerceToString());\n"
    );
}

#[test]
fn test_array_literal_with_pairs() {
    let tree = program(vec![echo(array(vec![
        int(1),
        pair(string_literal("k"), boolean(true)),
    ]))]);
    let compiled = compile(&tree).unwrap();

    assert_eq!(
        compiled.body[0].to_string(),
        "stdout.write([1, \"k\" => true].coerceToString());\n"
    );
}

#[test]
fn test_unsupported_operator() {
    let tree = program(vec![echo(binary(int(2), "**", int(3)))]);
    match compile(&tree) {
        Err(CompileError::UnsupportedOperator { operator, fix }) => {
            assert_eq!(operator, "**");
            assert_eq!(fix, Fix::Binary);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_key_value_pair_outside_array_is_rejected() {
    let tree = program(vec![echo(pair(int(1), int(2)))]);
    assert!(matches!(
        compile(&tree),
        Err(CompileError::UnsupportedConstruct {
            kind: "N_KEY_VALUE_PAIR",
            position: Position::Expression
        })
    ));
}

#[test]
fn test_error_messages() {
    let err = compile(&echo(int(1))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported construct: N_ECHO_STATEMENT in program root position"
    );

    let err = compile(&program(vec![echo(suffix("!", var("a")))])).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported suffix operator: '!'");
}

#[test]
fn test_nested_block_variables_are_declared_once() {
    let tree = program(vec![
        if_(
            int(1),
            vec![if_(
                int(1),
                vec![expr_stmt(assign(var("x"), int(1)))],
                vec![expr_stmt(assign(var("y"), int(2)))],
            )],
            vec![],
        ),
        foreach(
            array(vec![int(1)]),
            None,
            var("v"),
            vec![
                expr_stmt(assign(var("x"), var("v"))),
                expr_stmt(assign(var("z"), int(3))),
            ],
        ),
        echo(var("x")),
        function(
            "f",
            &["n"],
            vec![
                if_(
                    var("n"),
                    vec![foreach(
                        var("n"),
                        None,
                        var("item"),
                        vec![expr_stmt(assign(var("total"), var("item")))],
                    )],
                    vec![expr_stmt(assign(var("total"), int(0)))],
                ),
                ret(Some(var("total"))),
            ],
        ),
    ]);
    let compiled = compile(&tree).unwrap();

    let names = |names: &[&str]| names.iter().map(|name| name.to_string()).collect::<Vec<_>>();
    let statements = compiled.statements();
    assert_eq!(statements[0], Stmt::DefineVariables(names(&["x", "y", "v", "z"])));
    assert_eq!(
        statements
            .iter()
            .filter(|stmt| matches!(stmt, Stmt::DefineVariables(_)))
            .count(),
        1
    );

    let Stmt::DefineFunction(function) = &statements[1] else {
        panic!("expected the hoisted function");
    };
    let Stmt::Scoped(body) = &function.body[0] else {
        panic!("expected a scoped body");
    };
    assert_eq!(body[0], Stmt::DefineVariables(names(&["n", "item", "total"])));
}
