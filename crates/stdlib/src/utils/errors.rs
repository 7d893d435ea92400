use ember_runtime::{RuntimeError, ScriptError, Value};

/// A script-level error for a builtin called with an argument of the wrong
/// type, e.g. `count() expects parameter 1 to be array, string given`.
pub fn invalid_argument(function: &str, position: usize, expected: &str, got: &Value) -> RuntimeError {
    ScriptError::InvalidArgument {
        function: function.to_string(),
        expected: format!(
            "parameter {} to be {}, {} given",
            position + 1,
            expected,
            got.type_tag()
        ),
    }
    .into()
}
