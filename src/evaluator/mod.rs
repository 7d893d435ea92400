pub mod environment;
pub mod exec;
pub mod function;

pub use environment::{Environment, State};
pub use exec::{Executor, Flow, Frame};
pub use function::UserFunction;

use ember_codegen::CompiledProgram;
use ember_codegen::ir::{Expr, Stmt};
use ember_runtime::{Host, Native, RuntimeResult, Streams, TypeTag, Value};
use serde::Serialize;
use tracing::{debug, trace, warn};

/// The final value of a program, as `{"type": ..., "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleResult {
  #[serde(rename = "type")]
  pub type_tag: TypeTag,
  pub value: Native,
}

impl ModuleResult {
  pub fn new(value: &Value) -> Self {
    Self {
      type_tag: value.type_tag(),
      value: value.native(),
    }
  }
}

/// Runs a compiled program in the global scope of `state`.
///
/// Builtins are installed into the root namespace by the first program run
/// against `state`. Script errors are reported on the program's stderr
/// before being returned; other faults are returned as they are.
pub fn evaluate_module(
  state: &State,
  compiled: &CompiledProgram,
  streams: &Streams,
) -> RuntimeResult<ModuleResult> {
  state.install_builtins(streams);
  let namespace = state.root_namespace();

  let mut body = compiled.statements();
  body.push(Stmt::Return(Some(Expr::Null)));

  let host = Host::new(namespace, streams.clone()).with_max_call_depth(state.config().max_call_depth);
  let _global = host.scope_chain().push(state.global_scope().clone());
  let mut frame = Frame::new(compiled.loop_slots, Vec::new(), None);

  trace!(
    statements = body.len(),
    locals = compiled.local_variable_names.len(),
    "evaluating module"
  );

  let value = match Executor::new(&host).exec_block(&body, &mut frame) {
    Ok(Flow::Return(value)) => value,
    Ok(Flow::Normal) => Value::Null,
    Err(err) if err.is_script_error() => {
      debug!(error = %err, "script error");
      if let Err(io) = streams.stderr.write(&format!("{}\n", err)) {
        warn!(error = %io, "could not report script error");
      }
      return Err(err);
    }
    Err(err) => return Err(err),
  };

  Ok(ModuleResult::new(&value))
}
