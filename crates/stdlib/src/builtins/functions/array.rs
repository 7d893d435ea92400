use crate::builtins::registry::Internals;
use crate::utils::{arg, array_arg, native};
use ember_runtime::{ArrayValue, NativeFunction, RuntimeResult, Value};

/// Elements of an array; 0 for null; 1 for any other scalar or object.
pub fn count(args: &[Value]) -> RuntimeResult<Value> {
    let size = match arg(args, 0) {
        Value::Array(array) => array.borrow().len() as i64,
        Value::Null => 0,
        _ => 1,
    };
    Ok(Value::Integer(size))
}

pub fn array_keys(args: &[Value]) -> RuntimeResult<Value> {
    let array = array_arg("array_keys", args, 0)?;
    let keys = array.borrow().keys().map(|key| key.to_value()).collect::<Vec<_>>();
    Ok(Value::new_array(ArrayValue::from_values(keys)))
}

pub fn array_values(args: &[Value]) -> RuntimeResult<Value> {
    let array = array_arg("array_values", args, 0)?;
    let values = array.borrow().values();
    Ok(Value::new_array(ArrayValue::from_values(values)))
}

/// `in_array($needle, $haystack, $strict = false)`
pub fn in_array(args: &[Value]) -> RuntimeResult<Value> {
    let needle = arg(args, 0);
    let haystack = array_arg("in_array", args, 1)?;
    let strict = arg(args, 2).coerce_to_boolean();

    let found = haystack.borrow().values().iter().any(|candidate| {
        if strict {
            candidate.is_identical_to(&needle)
        } else {
            candidate.loosely_equals(&needle)
        }
    });
    Ok(Value::Boolean(found))
}

/// `implode($glue, $pieces)`; the pieces may also come first, or alone.
pub fn implode(args: &[Value]) -> RuntimeResult<Value> {
    let (glue, pieces) = match (arg(args, 0), arg(args, 1)) {
        (Value::Array(pieces), Value::Null) => (String::new(), pieces),
        (Value::Array(pieces), glue) => (glue.coerce_to_string(), pieces),
        (glue, _) => (glue.coerce_to_string(), array_arg("implode", args, 1)?),
    };

    let joined = pieces
        .borrow()
        .values()
        .iter()
        .map(Value::coerce_to_string)
        .collect::<Vec<_>>()
        .join(&glue);
    Ok(Value::String(joined))
}

pub fn functions(_: &Internals) -> Vec<NativeFunction> {
    vec![
        native("count", count),
        native("array_keys", array_keys),
        native("array_values", array_values),
        native("in_array", in_array),
        native("implode", implode),
    ]
}
