//! Function and method compilation

use crate::compiler::context::{CompilationContext, LoopKind};
use crate::compiler::expr::variable_name;
use crate::compiler::stmt::StmtCompiler;
use crate::error::{CompileError, CompileResult, Position};
use crate::ir::{FunctionDefinition, Stmt};
use ember_ast::Node;
use tracing::debug;

pub struct FunctionCompiler;

impl FunctionCompiler {
    pub fn compile_function(
        name: &str,
        params: &[Node],
        statements: &[Node],
    ) -> CompileResult<FunctionDefinition> {
        Self::compile(name, params, statements, false)
    }

    /// Like a function, with `$this` bound before the parameters.
    pub fn compile_method(
        name: &str,
        params: &[Node],
        statements: &[Node],
    ) -> CompileResult<FunctionDefinition> {
        Self::compile(name, params, statements, true)
    }

    fn compile(
        name: &str,
        params: &[Node],
        statements: &[Node],
        is_method: bool,
    ) -> CompileResult<FunctionDefinition> {
        let parameters = params
            .iter()
            .map(parameter_name)
            .collect::<CompileResult<Vec<_>>>()?;

        // Each body gets its own locals and loop slots.
        let mut func_ctx = CompilationContext::with_locals(parameters.iter().cloned());
        let statements = StmtCompiler::compile_block(&mut func_ctx, statements)?;

        let mut body = Vec::with_capacity(statements.len() + parameters.len() + 2);
        if !func_ctx.local_variable_names.is_empty() {
            body.push(Stmt::DefineVariables(func_ctx.local_names()));
        }
        if is_method {
            body.push(Stmt::BindThis);
        }
        body.extend(
            parameters
                .iter()
                .enumerate()
                .map(|(index, name)| Stmt::BindArgument {
                    name: name.clone(),
                    index,
                }),
        );
        body.extend(statements);

        let loop_slots = func_ctx.loop_slots(LoopKind::Foreach);
        debug!(
            function = name,
            parameters = parameters.len(),
            locals = func_ctx.local_variable_names.len(),
            loop_slots,
            "compiled function"
        );

        Ok(FunctionDefinition {
            name: name.to_string(),
            parameters,
            body: vec![Stmt::Scoped(body)],
            loop_slots,
        })
    }
}

fn parameter_name(node: &Node) -> CompileResult<String> {
    match node {
        Node::Variable { variable, .. } => Ok(variable_name(variable).to_string()),
        other => Err(CompileError::unsupported(other.kind(), Position::Parameter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Expr, Place, Source};
    use ember_ast::build::*;

    #[test]
    fn test_prologue_order() {
        let function = FunctionCompiler::compile_function(
            "add",
            &[var("a"), var("b")],
            &[
                expr_stmt(assign(var("sum"), binary(var("a"), "+", var("b")))),
                ret(Some(var("sum"))),
            ],
        )
        .unwrap();

        let [Stmt::Scoped(body)] = function.body.as_slice() else {
            panic!("expected a scoped body");
        };
        assert_eq!(
            body[0],
            Stmt::DefineVariables(vec!["a".to_string(), "b".to_string(), "sum".to_string()])
        );
        assert_eq!(
            body[1],
            Stmt::BindArgument {
                name: "a".to_string(),
                index: 0
            }
        );
        assert_eq!(
            body[2],
            Stmt::BindArgument {
                name: "b".to_string(),
                index: 1
            }
        );
        assert_eq!(function.parameters, vec!["a", "b"]);
    }

    #[test]
    fn test_method_binds_this_first() {
        let method = FunctionCompiler::compile_method("get", &[], &[ret(Some(var("this")))]).unwrap();
        let [Stmt::Scoped(body)] = method.body.as_slice() else {
            panic!("expected a scoped body");
        };
        assert_eq!(body[0], Stmt::BindThis);
        assert_eq!(
            body[1],
            Stmt::Return(Some(Expr::load(Place::Variable("this".to_string()))))
        );
    }

    #[test]
    fn test_function_locals_do_not_leak() {
        let function = FunctionCompiler::compile_function(
            "f",
            &[],
            &[expr_stmt(assign(var("inner"), int(1)))],
        )
        .unwrap();
        let [Stmt::Scoped(body)] = function.body.as_slice() else {
            panic!("expected a scoped body");
        };
        assert_eq!(body[0], Stmt::DefineVariables(vec!["inner".to_string()]));
        assert!(matches!(
            &body[1],
            Stmt::Expression(Expr::Assign { source, .. }) if matches!(**source, Source::Value(Expr::Integer(1)))
        ));
    }

    #[test]
    fn test_empty_function_has_no_declarations() {
        let function = FunctionCompiler::compile_function("noop", &[], &[]).unwrap();
        assert_eq!(function.body, vec![Stmt::Scoped(vec![])]);
        assert_eq!(function.loop_slots, 0);
    }

    #[test]
    fn test_non_variable_parameter_is_rejected() {
        let result = FunctionCompiler::compile_function("f", &[int(1)], &[]);
        assert!(matches!(
            result,
            Err(CompileError::UnsupportedConstruct {
                position: Position::Parameter,
                ..
            })
        ));
    }
}
