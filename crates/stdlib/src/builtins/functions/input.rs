use crate::builtins::registry::Internals;
use crate::utils::arg;
use ember_runtime::{NativeFunction, RuntimeResult, Stream, Value};
use std::rc::Rc;

/// `readline($prompt = "")`: the next input line, or false at end of input.
pub fn readline(stdin: &dyn Stream, stdout: &dyn Stream, args: &[Value]) -> RuntimeResult<Value> {
    let prompt = arg(args, 0).coerce_to_string();
    if !prompt.is_empty() {
        stdout.write(&prompt)?;
    }
    Ok(match stdin.read_line()? {
        Some(line) => Value::String(line),
        None => Value::Boolean(false),
    })
}

pub fn functions(internals: &Internals) -> Vec<NativeFunction> {
    let stdin = Rc::clone(&internals.stdin);
    let stdout = Rc::clone(&internals.stdout);
    vec![NativeFunction::new("readline", move |_, _, args| {
        readline(stdin.as_ref(), stdout.as_ref(), &args)
    })]
}
