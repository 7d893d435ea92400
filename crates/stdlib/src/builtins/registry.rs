use crate::builtins::{classes, functions};
use ember_runtime::{Callable, Class, Namespace, NativeFunction, Stream, Streams};
use indexmap::IndexMap;
use std::rc::Rc;
use tracing::debug;

/// What builtins may capture at registration time.
pub struct Internals {
    pub stdin: Rc<dyn Stream>,
    pub stdout: Rc<dyn Stream>,
}

impl Internals {
    pub fn from_streams(streams: &Streams) -> Self {
        Self {
            stdin: Rc::clone(&streams.stdin),
            stdout: Rc::clone(&streams.stdout),
        }
    }
}

pub type FunctionGroupFactory = fn(&Internals) -> Vec<NativeFunction>;
pub type ClassFactory = fn(&Internals) -> Class;

pub struct BuiltinRegistry {
    pub function_groups: IndexMap<&'static str, FunctionGroupFactory>,
    pub classes: IndexMap<&'static str, ClassFactory>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_all();
        registry
    }

    /// A registry with no builtins at all.
    pub fn empty() -> Self {
        Self {
            function_groups: IndexMap::new(),
            classes: IndexMap::new(),
        }
    }

    fn register_all(&mut self) {
        self.register_function_groups();
        self.register_classes();
    }

    fn register_function_groups(&mut self) {
        self.add_function_group("string", functions::string::functions);
        self.add_function_group("array", functions::array::functions);
        self.add_function_group("variable", functions::variable::functions);
        self.add_function_group("output", functions::output::functions);
        self.add_function_group("input", functions::input::functions);
    }

    fn register_classes(&mut self) {
        self.add_class("stdClass", classes::std_class::class);
        self.add_class("Exception", classes::exception::class);
    }

    pub fn add_function_group(&mut self, name: &'static str, factory: FunctionGroupFactory) {
        self.function_groups.insert(name, factory);
    }

    pub fn add_class(&mut self, name: &'static str, factory: ClassFactory) {
        self.classes.insert(name, factory);
    }

    /// Defines every builtin function and class in `namespace`.
    pub fn install(&self, namespace: &Namespace, internals: &Internals) {
        for (group, factory) in &self.function_groups {
            let functions = factory(internals);
            debug!(group = *group, count = functions.len(), "registering builtin functions");
            for function in functions {
                let function: Rc<dyn Callable> = Rc::new(function);
                namespace.define_function(function.name(), Rc::clone(&function));
            }
        }

        for (name, factory) in &self.classes {
            debug!(class = *name, "registering builtin class");
            namespace.define_class(factory(internals));
        }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}
