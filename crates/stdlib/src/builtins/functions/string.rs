use crate::builtins::registry::Internals;
use crate::utils::{arg, invalid_argument, native};
use ember_runtime::{NativeFunction, RuntimeResult, Value};

pub fn strlen(args: &[Value]) -> RuntimeResult<Value> {
    let text = arg(args, 0).coerce_to_string();
    Ok(Value::Integer(text.len() as i64))
}

pub fn strtoupper(args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::String(arg(args, 0).coerce_to_string().to_ascii_uppercase()))
}

pub fn strtolower(args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::String(arg(args, 0).coerce_to_string().to_ascii_lowercase()))
}

pub fn str_repeat(args: &[Value]) -> RuntimeResult<Value> {
    let text = arg(args, 0).coerce_to_string();
    let times = arg(args, 1);
    let count = times.coerce_to_integer();
    if count < 0 {
        return Err(invalid_argument(
            "str_repeat",
            1,
            "greater than or equal to 0",
            &times,
        ));
    }
    Ok(Value::String(text.repeat(count as usize)))
}

pub fn strrev(args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::String(
        arg(args, 0).coerce_to_string().chars().rev().collect(),
    ))
}

pub fn functions(_: &Internals) -> Vec<NativeFunction> {
    vec![
        native("strlen", strlen),
        native("strtoupper", strtoupper),
        native("strtolower", strtolower),
        native("str_repeat", str_repeat),
        native("strrev", strrev),
    ]
}
