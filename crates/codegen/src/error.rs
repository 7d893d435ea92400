//! Codegen error types

use std::fmt;
use thiserror::Error;

/// Where in the tree a node was found, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Root,
    Statement,
    Expression,
    ClassMember,
    Parameter,
    MethodName,
    IndexRead,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Position::Root => "program root",
            Position::Statement => "statement",
            Position::Expression => "expression",
            Position::ClassMember => "class member",
            Position::Parameter => "parameter",
            Position::MethodName => "method name",
            Position::IndexRead => "index read",
        };
        f.write_str(text)
    }
}

/// Whether an operator was found in prefix, suffix or binary position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fix {
    Prefix,
    Suffix,
    Binary,
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Fix::Prefix => "prefix",
            Fix::Suffix => "suffix",
            Fix::Binary => "binary",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Unsupported construct: {kind} in {position} position")]
    UnsupportedConstruct {
        kind: &'static str,
        position: Position,
    },

    #[error("Unsupported {fix} operator: '{operator}'")]
    UnsupportedOperator { operator: String, fix: Fix },

    #[error("Cannot assign to {kind}")]
    InvalidAssignmentTarget { kind: &'static str },
}

impl CompileError {
    pub fn unsupported(kind: &'static str, position: Position) -> Self {
        CompileError::UnsupportedConstruct { kind, position }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;
