//! Execution host: the namespace, scope chain and streams of a running program

use crate::error::{RuntimeResult, ScriptError};
use crate::namespace::Namespace;
use crate::object::ObjectValue;
use crate::scope::{Scope, ScopeChain};
use crate::stream::Streams;
use crate::value::Value;
use std::cell::Cell;
use std::rc::Rc;

pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

pub struct Host {
    namespace: Rc<Namespace>,
    scope_chain: ScopeChain,
    streams: Streams,
    call_depth: Cell<usize>,
    max_call_depth: usize,
}

impl Host {
    pub fn new(namespace: Rc<Namespace>, streams: Streams) -> Self {
        Self {
            namespace,
            scope_chain: ScopeChain::new(),
            streams,
            call_depth: Cell::new(0),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn namespace(&self) -> &Rc<Namespace> {
        &self.namespace
    }

    pub fn scope_chain(&self) -> &ScopeChain {
        &self.scope_chain
    }

    pub fn current_scope(&self) -> RuntimeResult<Rc<Scope>> {
        self.scope_chain.current()
    }

    pub fn streams(&self) -> &Streams {
        &self.streams
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth.get()
    }

    /// Enters a user-level call, failing once the nesting limit is reached.
    pub fn enter_call(&self) -> RuntimeResult<CallGuard<'_>> {
        let depth = self.call_depth.get();
        if depth >= self.max_call_depth {
            return Err(ScriptError::NestingLevel(self.max_call_depth).into());
        }
        self.call_depth.set(depth + 1);
        Ok(CallGuard { host: self })
    }

    pub fn call_function(&self, name: &str, args: Vec<Value>) -> RuntimeResult<Value> {
        let function = self.namespace.get_function(name)?;
        function.call(self, None, args)
    }

    pub fn call_method(&self, object: &Value, name: &str, args: Vec<Value>) -> RuntimeResult<Value> {
        let Value::Object(instance) = object else {
            return Err(ScriptError::NonObjectMethodCall(name.to_string()).into());
        };
        let class = instance.borrow().class().clone();
        let method = class
            .method(name)
            .ok_or_else(|| ScriptError::UndefinedMethod {
                class: class.name().to_string(),
                method: name.to_string(),
            })?;
        method.call(self, Some(object.clone()), args)
    }

    /// Creates an instance of `class_name`, running `__construct` when the
    /// class defines one.
    pub fn instantiate(&self, class_name: &str, args: Vec<Value>) -> RuntimeResult<Value> {
        let class = self.namespace.get_class(class_name)?;
        let constructor = class.method("__construct");
        let object = Value::new_object(ObjectValue::new(class));
        if let Some(constructor) = constructor {
            constructor.call(self, Some(object.clone()), args)?;
        }
        Ok(object)
    }
}

/// Leaves the call entered by [`Host::enter_call`] when dropped.
#[must_use = "the call is left as soon as the guard is dropped"]
pub struct CallGuard<'a> {
    host: &'a Host,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.host
            .call_depth
            .set(self.host.call_depth.get().saturating_sub(1));
    }
}
