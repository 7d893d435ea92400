use ember_runtime::Value;

/// The type name reported by `gettype()`.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NULL",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::Float(_) => "double",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn to_int(value: &Value) -> Value {
    Value::Integer(value.coerce_to_integer())
}

pub fn to_string(value: &Value) -> Value {
    Value::String(value.coerce_to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&Value::Null), "NULL");
        assert_eq!(type_name(&Value::Float(1.5)), "double");
        assert_eq!(type_name(&Value::Integer(1)), "integer");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(to_int(&Value::string("42abc")), Value::Integer(42));
        assert_eq!(to_string(&Value::Boolean(true)), Value::string("1"));
    }
}
