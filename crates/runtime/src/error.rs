//! Runtime error types

use thiserror::Error;

/// Errors raised by the script itself, reported to the script's stderr.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Call to undefined function {0}()")]
    UndefinedFunction(String),

    #[error("Class '{0}' not found")]
    UndefinedClass(String),

    #[error("Call to undefined method {class}::{method}()")]
    UndefinedMethod { class: String, method: String },

    #[error("Call to a member function {0}() on a non-object")]
    NonObjectMethodCall(String),

    #[error("Cannot use a scalar value as an array")]
    ScalarAsArray,

    #[error("Illegal offset type")]
    IllegalOffset,

    #[error("Cannot use [] for reading")]
    EmptyIndexRead,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Modulo by zero")]
    ModuloByZero,

    #[error("Unsupported operand types: {left} {operator} {right}")]
    UnsupportedOperands {
        left: String,
        operator: &'static str,
        right: String,
    },

    #[error("Bit shift by negative number")]
    NegativeShift,

    #[error("Cannot use list() outside of an assignment")]
    InvalidListUsage,

    #[error("Maximum function nesting level of '{0}' reached, aborting!")]
    NestingLevel(usize),

    #[error("{function}() expects {expected}")]
    InvalidArgument {
        function: String,
        expected: String,
    },
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No scope is active")]
    EmptyScopeChain,
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

impl RuntimeError {
    /// Whether the error was raised by the script rather than the host.
    pub fn is_script_error(&self) -> bool {
        matches!(self, RuntimeError::Script(_))
    }
}
