use crate::builtins::registry::Internals;
use ember_runtime::Class;

/// The generic empty class, `new stdClass()`.
pub fn class(_: &Internals) -> Class {
    Class::new("stdClass")
}
