//! # Ember Code Generation
//!
//! Compiles a PHP-dialect syntax tree into an executable IR.
//!
//! ## Architecture
//!
//! The pipeline:
//! 1. **Input**: an [`ember_ast::Node`] tree rooted at `N_PROGRAM`
//! 2. **Hoisting**: function and class declarations move to the front of
//!    every block
//! 3. **Compilation**: one rule per node kind, producing [`ir::Stmt`],
//!    [`ir::Expr`] and [`ir::Place`] nodes that call into the runtime's value
//!    and location methods
//! 4. **Output**: a [`CompiledProgram`] plus the names of its locals, ready
//!    for the evaluator
//!
//! ## Usage
//!
//! ```rust
//! use ember_ast::build::*;
//! use ember_codegen::compile;
//!
//! let tree = program(vec![echo(binary(int(1), "+", int(2)))]);
//! let compiled = compile(&tree).unwrap();
//! assert_eq!(compiled.to_string(), "stdout.write(1.add(2).coerceToString());\n");
//! ```

pub mod compiler;
pub mod error;
pub mod hoist;
pub mod ir;
pub mod operators;

pub use compiler::module::{CompiledProgram, ModuleCompiler};
pub use error::{CompileError, CompileResult, Fix, Position};
pub use ir::{Block, Expr, Listing, Place, Stmt};

/// Compile a program tree to IR.
pub fn compile(program: &ember_ast::Node) -> CompileResult<CompiledProgram> {
    ModuleCompiler::compile(program)
}
