//! Compiler orchestration
//!
//! One syntax-directed pass from the AST to the IR. Each node kind has one
//! rule; rules receive the node's [`context::NodeContext`] flags and the
//! [`context::CompilationContext`] of the enclosing function body.

pub mod class;
pub mod context;
pub mod expr;
pub mod function;
pub mod module;
pub mod stmt;
