//! Statement compilation

use crate::compiler::class::ClassCompiler;
use crate::compiler::context::{CompilationContext, LoopKind, NodeContext};
use crate::compiler::expr::ExprCompiler;
use crate::compiler::function::FunctionCompiler;
use crate::error::{CompileError, CompileResult, Position};
use crate::hoist::hoist_declarations;
use crate::ir::{Block, Foreach, Stmt};
use ember_ast::Node;
use std::rc::Rc;

pub struct StmtCompiler;

impl StmtCompiler {
    /// Compiles a statement list with its declarations hoisted to the front.
    pub fn compile_block(ctx: &mut CompilationContext, statements: &[Node]) -> CompileResult<Block> {
        hoist_declarations(statements)
            .into_iter()
            .map(|statement| Self::compile(ctx, statement))
            .collect()
    }

    pub fn compile(ctx: &mut CompilationContext, node: &Node) -> CompileResult<Stmt> {
        match node {
            Node::EchoStatement { expression } => {
                Ok(Stmt::Echo(ExprCompiler::compile_value(ctx, expression)?))
            }
            Node::ExpressionStatement { expression } => {
                Ok(Stmt::Expression(ExprCompiler::compile_value(ctx, expression)?))
            }
            Node::InlineHtmlStatement { html } => Ok(Stmt::InlineHtml(html.clone())),
            Node::ReturnStatement { expression } => {
                let expression = expression
                    .as_deref()
                    .map(|expression| ExprCompiler::compile_value(ctx, expression))
                    .transpose()?;
                Ok(Stmt::Return(expression))
            }
            Node::IfStatement {
                condition,
                consequent_statements,
                alternate_statements,
            } => Ok(Stmt::If {
                condition: ExprCompiler::compile_value(ctx, condition)?,
                consequent: Self::compile_block(ctx, consequent_statements)?,
                alternate: Self::compile_block(ctx, alternate_statements)?,
            }),
            Node::ForeachStatement {
                array,
                key,
                value,
                statements,
            } => Self::foreach(ctx, array, key.as_deref(), value, statements),
            Node::FunctionStatement {
                func,
                args,
                statements,
            } => {
                let function = FunctionCompiler::compile_function(func, args, statements)?;
                Ok(Stmt::DefineFunction(Rc::new(function)))
            }
            Node::ClassStatement {
                class_name,
                members,
            } => {
                let class = ClassCompiler::compile(ctx, class_name, members)?;
                Ok(Stmt::DefineClass(Rc::new(class)))
            }
            other => Err(CompileError::unsupported(other.kind(), Position::Statement)),
        }
    }

    fn foreach(
        ctx: &mut CompilationContext,
        array: &Node,
        key: Option<&Node>,
        value: &Node,
        statements: &[Node],
    ) -> CompileResult<Stmt> {
        let array = ExprCompiler::compile_value(ctx, array)?;
        let key = key
            .map(|key| ExprCompiler::compile_place(ctx, key, NodeContext::TARGET))
            .transpose()?;
        let by_reference = value.is_reference();
        let value = ExprCompiler::compile_place(ctx, value, NodeContext::TARGET)?;

        // Nested loops allocate after their parent, so slots never collide.
        let slot = ctx.next_loop_slot(LoopKind::Foreach);
        let body = Self::compile_block(ctx, statements)?;

        Ok(Stmt::Foreach(Box::new(Foreach {
            slot,
            array,
            key,
            value,
            by_reference,
            body,
        })))
    }
}
