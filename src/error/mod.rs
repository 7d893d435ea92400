use ember_ast::AstError;
use ember_codegen::CompileError;
use ember_runtime::RuntimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
  #[error(transparent)]
  Ast(#[from] AstError),

  #[error(transparent)]
  Compile(#[from] CompileError),

  #[error(transparent)]
  Runtime(#[from] RuntimeError),

  #[error("Expected an N_PROGRAM root, found {0}")]
  NotAProgram(&'static str),
}

impl EvalError {
  /// Short label for the stage that failed.
  pub fn stage(&self) -> &'static str {
    match self {
      EvalError::Ast(_) => "Load",
      EvalError::Compile(_) | EvalError::NotAProgram(_) => "Compile",
      EvalError::Runtime(_) => "Runtime",
    }
  }
}

pub type EvalResult<T> = Result<T, EvalError>;
