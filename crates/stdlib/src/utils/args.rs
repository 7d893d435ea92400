//! Argument access for native callables

use super::errors::invalid_argument;
use ember_runtime::{ArrayValue, NativeFunction, ObjectValue, RuntimeResult, ScriptError, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// The argument at `index`; missing arguments read as null.
pub fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

pub fn array_arg(
    function: &str,
    args: &[Value],
    index: usize,
) -> RuntimeResult<Rc<RefCell<ArrayValue>>> {
    match arg(args, index) {
        Value::Array(array) => Ok(array),
        other => Err(invalid_argument(function, index, "array", &other)),
    }
}

/// The receiving object of a native method.
pub fn this_object(method: &str, this: Option<Value>) -> RuntimeResult<Rc<RefCell<ObjectValue>>> {
    match this {
        Some(Value::Object(object)) => Ok(object),
        _ => Err(ScriptError::NonObjectMethodCall(method.to_string()).into()),
    }
}

/// Wraps a plain builtin that only looks at its arguments.
pub fn native(name: &'static str, body: fn(&[Value]) -> RuntimeResult<Value>) -> NativeFunction {
    NativeFunction::new(name, move |_, _, args| body(&args))
}
