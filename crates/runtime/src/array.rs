//! Ordered arrays with integer and string keys

use crate::error::{RuntimeResult, ScriptError};
use crate::reference::Reference;
use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// An array key. Strings holding a canonical decimal integer are stored as
/// integers, so `"5"` and `5` address the same element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Key {
    Integer(i64),
    String(String),
}

impl Key {
    pub fn from_value(value: &Value) -> RuntimeResult<Key> {
        match value {
            Value::Null => Ok(Key::String(String::new())),
            Value::Boolean(b) => Ok(Key::Integer(i64::from(*b))),
            Value::Integer(n) => Ok(Key::Integer(*n)),
            Value::Float(f) => Ok(Key::Integer(f.trunc() as i64)),
            Value::String(s) => Ok(Key::from_string(s)),
            Value::Array(_) | Value::Object(_) => Err(ScriptError::IllegalOffset.into()),
        }
    }

    pub fn from_string(text: &str) -> Key {
        match text.parse::<i64>() {
            Ok(n) if n.to_string() == text => Key::Integer(n),
            _ => Key::String(text.to_string()),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Key::Integer(n) => Value::Integer(*n),
            Key::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Integer(n)
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Key::from_string(text)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Integer(n) => write!(f, "{}", n),
            Key::String(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyValuePair {
    pub key: Value,
    pub value: Value,
}

impl KeyValuePair {
    pub fn new(key: Value, value: Value) -> Self {
        Self { key, value }
    }
}

/// One entry of an array literal.
#[derive(Debug, Clone)]
pub enum ArrayElement {
    Value(Value),
    Pair(KeyValuePair),
}

/// Array storage. Each element lives behind its own [`Reference`] so it can be
/// bound by reference; the internal pointer is what `foreach` resets.
#[derive(Debug, Default)]
pub struct ArrayValue {
    elements: IndexMap<Key, Reference>,
    next_index: i64,
    pointer: usize,
}

impl ArrayValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an array from literal entries. Values are copied in.
    pub fn from_elements(elements: Vec<ArrayElement>) -> RuntimeResult<Self> {
        let mut array = Self::new();
        for element in elements {
            match element {
                ArrayElement::Value(value) => {
                    array.push(value.copied());
                }
                ArrayElement::Pair(pair) => {
                    let key = Key::from_value(&pair.key)?;
                    array.insert(key, pair.value.copied());
                }
            }
        }
        Ok(array)
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut array = Self::new();
        for value in values {
            array.push(value);
        }
        array
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.elements.contains_key(key)
    }

    pub fn get(&self, key: &Key) -> Option<Reference> {
        self.elements.get(key).cloned()
    }

    pub fn get_value(&self, key: &Key) -> Option<Value> {
        self.elements.get(key).map(Reference::get)
    }

    /// The element's reference, creating a null element when absent.
    pub fn get_or_create(&mut self, key: Key) -> Reference {
        self.track_key(&key);
        self.elements.entry(key).or_default().clone()
    }

    /// Stores `value` as given; writes through an existing element reference.
    pub fn insert(&mut self, key: Key, value: Value) {
        match self.elements.get(&key) {
            Some(reference) => reference.set(value),
            None => {
                self.track_key(&key);
                self.elements.insert(key, Reference::new(value));
            }
        }
    }

    pub fn insert_reference(&mut self, key: Key, reference: Reference) {
        self.track_key(&key);
        self.elements.insert(key, reference);
    }

    /// Appends at the next integer index and returns the key used.
    pub fn push(&mut self, value: Value) -> Key {
        self.push_reference(Reference::new(value))
    }

    pub fn push_reference(&mut self, reference: Reference) -> Key {
        let key = Key::Integer(self.next_index);
        self.insert_reference(key.clone(), reference);
        key
    }

    pub fn reset(&mut self) {
        self.pointer = 0;
    }

    /// Moves the internal pointer one element forward, stopping past the end.
    pub fn advance(&mut self) {
        if self.pointer < self.elements.len() {
            self.pointer += 1;
        }
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn key_at(&self, position: usize) -> Option<Key> {
        self.elements.get_index(position).map(|(key, _)| key.clone())
    }

    pub fn element_at(&self, position: usize) -> Option<Reference> {
        self.elements
            .get_index(position)
            .map(|(_, reference)| reference.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Reference)> {
        self.elements.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.elements.keys()
    }

    /// Element values in order, copied out.
    pub fn values(&self) -> Vec<Value> {
        self.elements
            .values()
            .map(|reference| reference.get().copied())
            .collect()
    }

    /// A deep copy with fresh element references. Elements bound by
    /// reference stay shared between the copy and the original.
    pub fn copied(&self) -> ArrayValue {
        ArrayValue {
            elements: self
                .elements
                .iter()
                .map(|(key, reference)| {
                    let element = if reference.is_shared() {
                        reference.clone()
                    } else {
                        Reference::new(reference.get().copied())
                    };
                    (key.clone(), element)
                })
                .collect(),
            next_index: self.next_index,
            pointer: self.pointer,
        }
    }

    fn track_key(&mut self, key: &Key) {
        if let Key::Integer(n) = key
            && *n >= self.next_index
        {
            self.next_index = n.saturating_add(1);
        }
    }
}
