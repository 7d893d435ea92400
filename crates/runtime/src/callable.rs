//! The calling convention shared by user functions, methods and builtins

use crate::error::RuntimeResult;
use crate::host::Host;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Anything that can be registered in a namespace or attached to a class.
///
/// `this` is the receiving object for method calls. Arguments arrive as
/// values; callables copy them in as needed.
pub trait Callable {
    fn name(&self) -> &str;

    fn call(&self, host: &Host, this: Option<Value>, args: Vec<Value>) -> RuntimeResult<Value>;
}

type NativeBody = dyn Fn(&Host, Option<Value>, Vec<Value>) -> RuntimeResult<Value>;

/// A callable implemented in Rust.
pub struct NativeFunction {
    name: String,
    body: Box<NativeBody>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&Host, Option<Value>, Vec<Value>) -> RuntimeResult<Value> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn into_callable(self) -> Rc<dyn Callable> {
        Rc::new(self)
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, host: &Host, this: Option<Value>, args: Vec<Value>) -> RuntimeResult<Value> {
        (self.body)(host, this, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
