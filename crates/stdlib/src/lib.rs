//! # Ember Standard Library
//!
//! Builtin function groups and classes. A [`BuiltinRegistry`] maps group and
//! class names to factories; the evaluator installs every entry into the
//! root namespace before a program runs, handing each factory the
//! [`Internals`] (streams) it may capture.

pub mod builtins;
pub mod utils;

pub use builtins::{BuiltinRegistry, ClassFactory, FunctionGroupFactory, Internals};

pub mod prelude {
    pub use crate::builtins::BuiltinRegistry;
    pub use crate::builtins::Internals;
    pub use crate::builtins::classes::*;
    pub use crate::builtins::functions::*;
}
