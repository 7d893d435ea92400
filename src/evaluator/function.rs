use super::exec::{Executor, Flow, Frame};
use ember_codegen::ir::FunctionDefinition;
use ember_runtime::{Callable, Host, RuntimeResult, Value};
use std::fmt;
use std::rc::Rc;

/// A function or method declared by the program.
pub struct UserFunction {
  definition: Rc<FunctionDefinition>,
}

impl UserFunction {
  pub fn new(definition: Rc<FunctionDefinition>) -> Self {
    Self { definition }
  }

  pub fn definition(&self) -> &FunctionDefinition {
    &self.definition
  }
}

impl Callable for UserFunction {
  fn name(&self) -> &str {
    &self.definition.name
  }

  fn call(&self, host: &Host, this: Option<Value>, args: Vec<Value>) -> RuntimeResult<Value> {
    let _call = host.enter_call()?;
    let mut frame = Frame::new(self.definition.loop_slots, args, this);

    match Executor::new(host).exec_block(&self.definition.body, &mut frame)? {
      Flow::Return(value) => Ok(value),
      Flow::Normal => Ok(Value::Null),
    }
  }
}

impl fmt::Debug for UserFunction {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("UserFunction")
      .field("name", &self.definition.name)
      .field("parameters", &self.definition.parameters)
      .finish()
  }
}
