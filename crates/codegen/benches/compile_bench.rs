use criterion::{Criterion, criterion_group, criterion_main};
use ember_ast::Node;
use ember_ast::build::*;
use ember_codegen::compile;
use std::hint::black_box;

fn fibonacci_program() -> Node {
    program(vec![
        function(
            "fib",
            &["n"],
            vec![
                if_(
                    binary(var("n"), "<=", int(1)),
                    vec![ret(Some(var("n")))],
                    vec![],
                ),
                ret(Some(binary(
                    call("fib", vec![binary(var("n"), "-", int(1))]),
                    "+",
                    call("fib", vec![binary(var("n"), "-", int(2))]),
                ))),
            ],
        ),
        echo(call("fib", vec![int(10)])),
    ])
}

fn class_program() -> Node {
    program(vec![
        class(
            "Counter",
            vec![
                property("count", Some(int(0))),
                method(
                    "increment",
                    &[],
                    vec![expr_stmt(prefix("++", prop(var("this"), &["count"])))],
                ),
            ],
        ),
        expr_stmt(assign(var("c"), new_("Counter", vec![]))),
        expr_stmt(method_call(var("c"), "increment", vec![])),
    ])
}

fn nested_loops_program(depth: usize) -> Node {
    let mut body = vec![expr_stmt(assign(
        index(var("out"), vec![None]),
        var(&format!("v{}", depth)),
    ))];
    for level in (0..depth).rev() {
        body = vec![foreach(
            var(&format!("xs{}", level)),
            Some(var(&format!("k{}", level))),
            var(&format!("v{}", level + 1)),
            body,
        )];
    }
    program(body)
}

fn bench_compile_function(c: &mut Criterion) {
    let tree = fibonacci_program();

    c.bench_function("compile_recursive_function", |b| {
        b.iter(|| {
            let _ = black_box(compile(black_box(&tree)));
        });
    });
}

fn bench_compile_class(c: &mut Criterion) {
    let tree = class_program();

    c.bench_function("compile_class_def", |b| {
        b.iter(|| {
            let _ = black_box(compile(black_box(&tree)));
        });
    });
}

fn bench_compile_nested_loops(c: &mut Criterion) {
    let tree = nested_loops_program(8);

    c.bench_function("compile_nested_foreach", |b| {
        b.iter(|| {
            let _ = black_box(compile(black_box(&tree)));
        });
    });
}

criterion_group!(
    benches,
    bench_compile_function,
    bench_compile_class,
    bench_compile_nested_loops
);
criterion_main!(benches);
