use crate::builtins::registry::Internals;
use crate::utils::conversions::{to_int, to_string, type_name};
use crate::utils::{arg, native};
use ember_runtime::{NativeFunction, RuntimeResult, Value};

pub fn gettype(args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::string(type_name(&arg(args, 0))))
}

pub fn is_array(args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::Boolean(matches!(arg(args, 0), Value::Array(_))))
}

pub fn is_int(args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::Boolean(matches!(arg(args, 0), Value::Integer(_))))
}

pub fn is_string(args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::Boolean(matches!(arg(args, 0), Value::String(_))))
}

pub fn is_null(args: &[Value]) -> RuntimeResult<Value> {
    Ok(Value::Boolean(arg(args, 0).is_null()))
}

pub fn intval(args: &[Value]) -> RuntimeResult<Value> {
    Ok(to_int(&arg(args, 0)))
}

pub fn strval(args: &[Value]) -> RuntimeResult<Value> {
    Ok(to_string(&arg(args, 0)))
}

pub fn functions(_: &Internals) -> Vec<NativeFunction> {
    vec![
        native("gettype", gettype),
        native("is_array", is_array),
        native("is_int", is_int),
        native("is_string", is_string),
        native("is_null", is_null),
        native("intval", intval),
        native("strval", strval),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_runtime::ArrayValue;

    #[test]
    fn test_gettype() {
        assert_eq!(gettype(&[Value::Integer(1)]).unwrap(), Value::string("integer"));
        assert_eq!(gettype(&[]).unwrap(), Value::string("NULL"));
        assert_eq!(
            gettype(&[Value::new_array(ArrayValue::new())]).unwrap(),
            Value::string("array")
        );
    }

    #[test]
    fn test_predicates() {
        assert_eq!(is_int(&[Value::Integer(1)]).unwrap(), Value::Boolean(true));
        assert_eq!(is_int(&[Value::string("1")]).unwrap(), Value::Boolean(false));
        assert_eq!(is_string(&[Value::string("1")]).unwrap(), Value::Boolean(true));
        assert_eq!(is_null(&[]).unwrap(), Value::Boolean(true));
        assert_eq!(
            is_array(&[Value::new_array(ArrayValue::new())]).unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(intval(&[Value::Float(3.9)]).unwrap(), Value::Integer(3));
        assert_eq!(strval(&[Value::Float(0.5)]).unwrap(), Value::string("0.5"));
        assert_eq!(strval(&[Value::Null]).unwrap(), Value::string(""));
    }
}
