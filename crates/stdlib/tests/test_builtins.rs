//! Builtin Tests
//!
//! Builtins called through an installed namespace, the way compiled programs
//! reach them.

use ember_runtime::namespace::ROOT_NAMESPACE;
use ember_runtime::{ArrayValue, BufferStream, Host, Namespace, RuntimeError, ScriptError, Streams, Value};
use ember_stdlib::{BuiltinRegistry, Internals};
use std::rc::Rc;

struct Fixture {
    host: Host,
    stdout: Rc<BufferStream>,
}

fn fixture(input: &[&str]) -> Fixture {
    let stdin = Rc::new(BufferStream::with_input(input.iter().copied()));
    let stdout = Rc::new(BufferStream::new());
    let stderr = Rc::new(BufferStream::new());
    let streams = Streams::new(stdin, stdout.clone(), stderr);

    let namespace = Rc::new(Namespace::new(ROOT_NAMESPACE));
    BuiltinRegistry::new().install(&namespace, &Internals::from_streams(&streams));

    Fixture {
        host: Host::new(namespace, streams),
        stdout,
    }
}

#[test]
fn test_calls_are_case_insensitive() {
    let fixture = fixture(&[]);
    let result = fixture
        .host
        .call_function("StrToUpper", vec![Value::string("ember")])
        .unwrap();
    assert_eq!(result, Value::string("EMBER"));
}

#[test]
fn test_output_goes_to_program_stdout() {
    let fixture = fixture(&[]);
    let array = Value::new_array(ArrayValue::from_values([Value::Integer(7)]));
    fixture
        .host
        .call_function("var_dump", vec![array])
        .unwrap();
    fixture
        .host
        .call_function("print", vec![Value::string("done")])
        .unwrap();
    assert_eq!(
        fixture.stdout.contents(),
        "array(1) {\n  [0]=>\n  int(7)\n}\ndone"
    );
}

#[test]
fn test_readline_uses_program_stdin() {
    let fixture = fixture(&["alice"]);
    let name = fixture.host.call_function("readline", vec![]).unwrap();
    assert_eq!(name, Value::string("alice"));
}

#[test]
fn test_exception_class_via_host() {
    let fixture = fixture(&[]);
    let exception = fixture
        .host
        .instantiate("exception", vec![Value::string("bad input")])
        .unwrap();
    let message = fixture
        .host
        .call_method(&exception, "GETMESSAGE", vec![])
        .unwrap();
    assert_eq!(message, Value::string("bad input"));
}

#[test]
fn test_std_class_has_no_methods() {
    let fixture = fixture(&[]);
    let object = fixture.host.instantiate("stdClass", vec![]).unwrap();
    assert!(matches!(
        fixture.host.call_method(&object, "anything", vec![]),
        Err(RuntimeError::Script(ScriptError::UndefinedMethod { .. }))
    ));
}

#[test]
fn test_type_errors_are_script_errors() {
    let fixture = fixture(&[]);
    let err = fixture
        .host
        .call_function("array_keys", vec![Value::Integer(1)])
        .unwrap_err();
    assert!(err.is_script_error());
    assert_eq!(
        err.to_string(),
        "array_keys() expects parameter 1 to be array, int given"
    );
}
