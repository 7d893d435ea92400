//! # Ember Runtime
//!
//! The object model compiled Ember programs execute against:
//!
//! - [`Value`]: null, booleans, integers, floats, strings, arrays (value
//!   semantics, copied on assignment) and objects (handle semantics)
//! - [`Reference`], [`Variable`] and [`Location`]: the assignable places a
//!   program reads from and writes to
//! - [`Scope`] and [`ScopeChain`]: variable lookup for the current call frame
//! - [`Namespace`] and [`NamespaceCollection`]: case-insensitive function and
//!   class registries
//! - [`Host`]: everything a callable needs while it runs

pub mod array;
pub mod callable;
pub mod error;
pub mod host;
pub mod namespace;
pub mod object;
pub mod operators;
pub mod reference;
pub mod scope;
pub mod stream;
pub mod value;

pub use array::{ArrayElement, ArrayValue, Key, KeyValuePair};
pub use callable::{Callable, NativeFunction};
pub use error::{RuntimeError, RuntimeResult, ScriptError};
pub use host::{CallGuard, Host};
pub use namespace::{Namespace, NamespaceCollection};
pub use object::{Class, ObjectValue};
pub use operators::{AssignMethod, BinaryMethod, UnaryMethod};
pub use reference::{Element, List, Location, Reference, Variable};
pub use scope::{Scope, ScopeChain, ScopeGuard};
pub use stream::{BufferStream, StderrStream, StdinStream, StdoutStream, Stream, Streams};
pub use value::{Native, TypeTag, Value};
