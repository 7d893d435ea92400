use crate::builtins::registry::Internals;
use crate::utils::{arg, this_object};
use ember_runtime::{Class, NativeFunction, RuntimeResult, Value};

const MESSAGE: &str = "message";

/// `__construct($message = "")`
pub fn construct(this: Option<Value>, args: &[Value]) -> RuntimeResult<Value> {
    let object = this_object("__construct", this)?;
    let message = arg(args, 0).coerce_to_string();
    object.borrow_mut().set_property(MESSAGE, Value::String(message));
    Ok(Value::Null)
}

pub fn get_message(this: Option<Value>) -> RuntimeResult<Value> {
    let object = this_object("getMessage", this)?;
    let message = object.borrow().property(MESSAGE).unwrap_or_default();
    Ok(message)
}

pub fn class(_: &Internals) -> Class {
    Class::new("Exception")
        .with_property(MESSAGE, Value::string(""))
        .with_method(
            "__construct",
            NativeFunction::new("__construct", |_, this, args| construct(this, &args))
                .into_callable(),
        )
        .with_method(
            "getMessage",
            NativeFunction::new("getMessage", |_, this, _| get_message(this)).into_callable(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::registry::Internals;
    use ember_runtime::{BufferStream, ObjectValue};
    use std::rc::Rc;

    fn internals() -> Internals {
        let buffer = Rc::new(BufferStream::new());
        Internals {
            stdin: buffer.clone(),
            stdout: buffer,
        }
    }

    #[test]
    fn test_message_round_trip() {
        let class = Rc::new(class(&internals()));
        let object = Value::new_object(ObjectValue::new(class));

        assert_eq!(get_message(Some(object.clone())).unwrap(), Value::string(""));
        construct(Some(object.clone()), &[Value::string("boom")]).unwrap();
        assert_eq!(get_message(Some(object)).unwrap(), Value::string("boom"));
    }

    #[test]
    fn test_requires_receiver() {
        assert!(get_message(None).is_err());
    }
}
