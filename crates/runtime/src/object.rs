//! Classes and object instances

use crate::callable::Callable;
use crate::reference::Reference;
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// A class descriptor: property defaults and methods. Method names are
/// case-insensitive; property names are not.
pub struct Class {
    name: String,
    properties: IndexMap<String, Value>,
    methods: IndexMap<String, Rc<dyn Callable>>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, default: Value) -> Self {
        self.define_property(name, default);
        self
    }

    pub fn with_method(mut self, name: &str, method: Rc<dyn Callable>) -> Self {
        self.define_method(name, method);
        self
    }

    pub fn define_property(&mut self, name: impl Into<String>, default: Value) {
        self.properties.insert(name.into(), default);
    }

    pub fn define_method(&mut self, name: &str, method: Rc<dyn Callable>) {
        self.methods.insert(name.to_lowercase(), method);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    pub fn method(&self, name: &str) -> Option<Rc<dyn Callable>> {
        self.methods.get(&name.to_lowercase()).cloned()
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(&name.to_lowercase())
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.values().map(|method| method.name())
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// An instance. Objects are handles: copying a value holding one shares it.
#[derive(Debug)]
pub struct ObjectValue {
    class: Rc<Class>,
    properties: IndexMap<String, Reference>,
}

impl ObjectValue {
    /// A new instance with its own copy of each property default.
    pub fn new(class: Rc<Class>) -> Self {
        let properties = class
            .properties()
            .iter()
            .map(|(name, default)| (name.clone(), Reference::new(default.copied())))
            .collect();
        Self { class, properties }
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    pub fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).map(Reference::get)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn properties(&self) -> impl Iterator<Item = (&String, &Reference)> {
        self.properties.iter()
    }

    pub fn property_or_create(&mut self, name: &str) -> Reference {
        self.properties.entry(name.to_string()).or_default().clone()
    }

    pub fn set_property(&mut self, name: &str, value: Value) {
        match self.properties.get(name) {
            Some(reference) => reference.set(value),
            None => {
                self.properties
                    .insert(name.to_string(), Reference::new(value));
            }
        }
    }

    pub fn set_property_reference(&mut self, name: &str, reference: Reference) {
        self.properties.insert(name.to_string(), reference);
    }
}
