//! `print` and `var_dump`, bound to the program's stdout

use crate::builtins::registry::Internals;
use crate::utils::arg;
use ember_runtime::value::format_float;
use ember_runtime::{Key, NativeFunction, RuntimeResult, Stream, Value};
use std::fmt::Write;
use std::rc::Rc;

const MAX_DUMP_DEPTH: usize = 64;

pub fn print(stdout: &dyn Stream, args: &[Value]) -> RuntimeResult<Value> {
    stdout.write(&arg(args, 0).coerce_to_string())?;
    Ok(Value::Integer(1))
}

pub fn var_dump(stdout: &dyn Stream, args: &[Value]) -> RuntimeResult<Value> {
    let mut text = String::new();
    for value in args {
        dump(&mut text, value, 0);
    }
    stdout.write(&text)?;
    Ok(Value::Null)
}

/// Appends the `var_dump` rendering of `value`, indented by `depth` levels.
pub fn dump(out: &mut String, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    // Writing to a String cannot fail.
    let _ = match value {
        Value::Null => writeln!(out, "{indent}NULL"),
        Value::Boolean(b) => writeln!(out, "{indent}bool({b})"),
        Value::Integer(n) => writeln!(out, "{indent}int({n})"),
        Value::Float(f) => writeln!(out, "{indent}float({})", format_float(*f)),
        Value::String(s) => writeln!(out, "{indent}string({}) \"{s}\"", s.len()),
        Value::Array(array) => {
            let array = array.borrow();
            let _ = writeln!(out, "{indent}array({}) {{", array.len());
            for (key, element) in array.iter() {
                dump_entry(out, key, &element.get(), depth);
            }
            writeln!(out, "{indent}}}")
        }
        Value::Object(object) => {
            let object = object.borrow();
            let _ = writeln!(
                out,
                "{indent}object({}) ({}) {{",
                object.class_name(),
                object.property_count()
            );
            for (name, property) in object.properties() {
                dump_entry(out, &Key::String(name.clone()), &property.get(), depth);
            }
            writeln!(out, "{indent}}}")
        }
    };
}

fn dump_entry(out: &mut String, key: &Key, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    let _ = match key {
        Key::Integer(n) => writeln!(out, "{indent}[{n}]=>"),
        Key::String(s) => writeln!(out, "{indent}[\"{s}\"]=>"),
    };
    if depth + 1 >= MAX_DUMP_DEPTH {
        let _ = writeln!(out, "{indent}*RECURSION*");
    } else {
        dump(out, value, depth + 1);
    }
}

pub fn functions(internals: &Internals) -> Vec<NativeFunction> {
    let stdout = Rc::clone(&internals.stdout);
    let print_fn = NativeFunction::new("print", move |_, _, args| print(stdout.as_ref(), &args));

    let stdout = Rc::clone(&internals.stdout);
    let var_dump_fn =
        NativeFunction::new("var_dump", move |_, _, args| var_dump(stdout.as_ref(), &args));

    vec![print_fn, var_dump_fn]
}
