//! Function and class registries

use crate::callable::Callable;
use crate::error::{RuntimeResult, ScriptError};
use crate::object::Class;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

pub const ROOT_NAMESPACE: &str = "\\";

/// Functions and classes are looked up case-insensitively, with or without a
/// leading `\`.
fn normalise(name: &str) -> String {
    name.trim_start_matches('\\').to_lowercase()
}

pub struct Namespace {
    name: String,
    functions: RefCell<IndexMap<String, Rc<dyn Callable>>>,
    classes: RefCell<IndexMap<String, Rc<Class>>>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: RefCell::new(IndexMap::new()),
            classes: RefCell::new(IndexMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn define_function(&self, name: &str, function: Rc<dyn Callable>) {
        tracing::trace!(namespace = %self.name, function = %name, "define function");
        self.functions.borrow_mut().insert(normalise(name), function);
    }

    pub fn get_function(&self, name: &str) -> RuntimeResult<Rc<dyn Callable>> {
        self.functions
            .borrow()
            .get(&normalise(name))
            .cloned()
            .ok_or_else(|| ScriptError::UndefinedFunction(name.to_string()).into())
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.borrow().contains_key(&normalise(name))
    }

    pub fn define_class(&self, class: Class) -> Rc<Class> {
        tracing::trace!(namespace = %self.name, class = %class.name(), "define class");
        let class = Rc::new(class);
        self.classes
            .borrow_mut()
            .insert(normalise(class.name()), class.clone());
        class
    }

    pub fn get_class(&self, name: &str) -> RuntimeResult<Rc<Class>> {
        self.classes
            .borrow()
            .get(&normalise(name))
            .cloned()
            .ok_or_else(|| ScriptError::UndefinedClass(name.to_string()).into())
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.borrow().contains_key(&normalise(name))
    }
}

/// All namespaces of a program, created on first use.
#[derive(Default)]
pub struct NamespaceCollection {
    namespaces: RefCell<IndexMap<String, Rc<Namespace>>>,
}

impl NamespaceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Rc<Namespace> {
        let key = match path.trim_matches('\\') {
            "" => ROOT_NAMESPACE.to_string(),
            inner => inner.to_lowercase(),
        };
        self.namespaces
            .borrow_mut()
            .entry(key)
            .or_insert_with(|| Rc::new(Namespace::new(path)))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::NativeFunction;
    use crate::value::Value;

    #[test]
    fn test_functions_are_case_insensitive() {
        let namespace = Namespace::new(ROOT_NAMESPACE);
        namespace.define_function(
            "myFunc",
            NativeFunction::new("myFunc", |_, _, _| Ok(Value::Null)).into_callable(),
        );
        assert!(namespace.get_function("MYFUNC").is_ok());
        assert!(namespace.get_function("\\myfunc").is_ok());
        assert!(matches!(
            namespace.get_function("other"),
            Err(crate::RuntimeError::Script(ScriptError::UndefinedFunction(_)))
        ));
    }

    #[test]
    fn test_classes_are_case_insensitive() {
        let namespace = Namespace::new(ROOT_NAMESPACE);
        namespace.define_class(Class::new("Point"));
        assert_eq!(namespace.get_class("point").unwrap().name(), "Point");
        assert!(namespace.get_class("Line").is_err());
    }

    #[test]
    fn test_collection_returns_same_namespace() {
        let collection = NamespaceCollection::new();
        let root = collection.get("\\");
        let again = collection.get("");
        assert!(Rc::ptr_eq(&root, &again));
        assert!(!Rc::ptr_eq(&root, &collection.get("\\App")));
    }
}
