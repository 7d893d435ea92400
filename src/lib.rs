//! # Ember
//!
//! Runs PHP-dialect programs handed over as syntax trees. A tree is compiled
//! by [`ember_codegen`] into IR, then executed here against the
//! [`ember_runtime`] object model with the [`ember_stdlib`] builtins
//! installed.
//!
//! ```rust
//! use ember::{Config, Environment, State};
//! use ember_ast::build::*;
//! use ember_runtime::{BufferStream, Streams};
//! use std::rc::Rc;
//!
//! let stdout = Rc::new(BufferStream::new());
//! let streams = Streams::new(Rc::new(BufferStream::new()), stdout.clone(), Rc::new(BufferStream::new()));
//! let env = Environment::new(State::new(Config::default()), streams);
//!
//! let result = env
//!   .evaluate(&program(vec![echo(string_literal("hi\\n")), ret(Some(int(5)))]))
//!   .unwrap();
//!
//! assert_eq!(stdout.contents(), "hi\n");
//! assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"type":"int","value":5}"#);
//! ```

pub mod config;
pub mod error;
pub mod evaluator;

pub use config::Config;
pub use error::{EvalError, EvalResult};
pub use evaluator::{Environment, ModuleResult, State, evaluate_module};

/// Evaluates `program` against the process's standard streams with the
/// default configuration.
pub fn evaluate(program: &ember_ast::Node) -> EvalResult<ModuleResult> {
  Environment::with_stdio(Config::default()).evaluate(program)
}
