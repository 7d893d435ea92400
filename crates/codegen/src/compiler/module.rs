//! Program compilation

use crate::compiler::context::{CompilationContext, LoopKind};
use crate::compiler::stmt::StmtCompiler;
use crate::error::{CompileError, CompileResult, Position};
use crate::ir::{Block, Listing, Stmt};
use ember_ast::Node;
use std::fmt;
use tracing::trace;

/// A compiled top-level program.
///
/// The body does not declare its own locals: whoever runs it defines
/// `local_variable_names` in the module scope first.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProgram {
    pub body: Block,
    pub local_variable_names: Vec<String>,
    pub loop_slots: usize,
}

impl CompiledProgram {
    /// The body preceded by the local declarations.
    pub fn statements(&self) -> Block {
        let mut statements = Vec::with_capacity(self.body.len() + 1);
        if !self.local_variable_names.is_empty() {
            statements.push(Stmt::DefineVariables(self.local_variable_names.clone()));
        }
        statements.extend(self.body.iter().cloned());
        statements
    }
}

impl fmt::Display for CompiledProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Listing(&self.statements()))
    }
}

pub struct ModuleCompiler;

impl ModuleCompiler {
    pub fn compile(root: &Node) -> CompileResult<CompiledProgram> {
        let Node::Program { statements } = root else {
            return Err(CompileError::unsupported(root.kind(), Position::Root));
        };

        let mut ctx = CompilationContext::new();
        let body = StmtCompiler::compile_block(&mut ctx, statements)?;

        trace!(
            statements = body.len(),
            locals = ctx.local_variable_names.len(),
            "compiled program"
        );

        Ok(CompiledProgram {
            body,
            local_variable_names: ctx.local_names(),
            loop_slots: ctx.loop_slots(LoopKind::Foreach),
        })
    }
}
