//! References, variables and the locations compiled code assigns through

use crate::array::{ArrayValue, Key};
use crate::error::{RuntimeResult, ScriptError};
use crate::operators::UnaryMethod;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// A shared slot holding a value. Two variables bound by reference hold the
/// same `Reference`.
#[derive(Debug, Clone, Default)]
pub struct Reference(Rc<RefCell<Value>>);

impl Reference {
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn null() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Value {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: Value) {
        *self.0.borrow_mut() = value;
    }

    pub fn ptr_eq(&self, other: &Reference) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Whether something besides its container holds this slot, i.e. it was
    /// bound by reference.
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.0) > 1
    }
}

/// A named variable in a scope.
#[derive(Debug)]
pub struct Variable {
    name: String,
    reference: RefCell<Reference>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: RefCell::new(Reference::null()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_value(&self) -> Value {
        self.reference.borrow().get()
    }

    pub fn set_value(&self, value: Value) -> Value {
        let value = value.copied();
        self.reference.borrow().set(value.clone());
        value
    }

    pub fn get_reference(&self) -> Reference {
        self.reference.borrow().clone()
    }

    /// Rebinds the variable to `reference`.
    pub fn set_reference(&self, reference: Reference) -> Value {
        let value = reference.get();
        *self.reference.borrow_mut() = reference;
        value
    }

    pub fn imply_array(&self) -> Value {
        imply_in(&self.get_reference())
    }
}

/// Replaces a null held by `reference` with a fresh empty array.
fn imply_in(reference: &Reference) -> Value {
    let current = reference.get();
    if current.is_null() {
        let array = Value::new_array(ArrayValue::new());
        reference.set(array.clone());
        array
    } else {
        current
    }
}

/// An element of an array, or a property of an object. A `None` key is the
/// append form `$a[]`.
#[derive(Debug, Clone)]
pub struct Element {
    container: Value,
    key: Option<Key>,
}

impl Element {
    pub fn new(container: Value, key: Option<Key>) -> Self {
        Self { container, key }
    }

    pub fn container(&self) -> &Value {
        &self.container
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    fn require_key(&self) -> RuntimeResult<&Key> {
        self.key
            .as_ref()
            .ok_or_else(|| ScriptError::EmptyIndexRead.into())
    }

    pub fn get_value(&self) -> RuntimeResult<Value> {
        let key = self.require_key()?;
        match &self.container {
            Value::Array(array) => match array.borrow().get_value(key) {
                Some(value) => Ok(value),
                None => {
                    tracing::warn!(index = %key, "Undefined index");
                    Ok(Value::Null)
                }
            },
            Value::Object(object) => {
                let object = object.borrow();
                match object.property(&key.to_string()) {
                    Some(value) => Ok(value),
                    None => {
                        tracing::warn!(
                            class = %object.class_name(),
                            property = %key,
                            "Undefined property"
                        );
                        Ok(Value::Null)
                    }
                }
            }
            Value::String(text) => string_offset(text, key),
            Value::Null => Ok(Value::Null),
            other => {
                tracing::warn!(
                    value_type = %other.type_tag(),
                    "Trying to access array offset on a scalar value"
                );
                Ok(Value::Null)
            }
        }
    }

    fn peek(&self) -> Option<Value> {
        let key = self.key.as_ref()?;
        match &self.container {
            Value::Array(array) => array.borrow().get_value(key),
            Value::Object(object) => object.borrow().property(&key.to_string()),
            _ => None,
        }
    }

    pub fn set_value(&self, value: Value) -> RuntimeResult<Value> {
        let value = value.copied();
        match (&self.container, &self.key) {
            (Value::Array(array), Some(key)) => {
                array.borrow_mut().insert(key.clone(), value.clone());
            }
            (Value::Array(array), None) => {
                array.borrow_mut().push(value.clone());
            }
            (Value::Object(object), Some(key)) => {
                object
                    .borrow_mut()
                    .set_property(&key.to_string(), value.clone());
            }
            (Value::Object(_), None) => return Err(ScriptError::IllegalOffset.into()),
            _ => return Err(ScriptError::ScalarAsArray.into()),
        }
        Ok(value)
    }

    /// The element's reference, creating the element when absent.
    pub fn get_reference(&self) -> RuntimeResult<Reference> {
        match (&self.container, &self.key) {
            (Value::Array(array), Some(key)) => Ok(array.borrow_mut().get_or_create(key.clone())),
            (Value::Array(array), None) => {
                let reference = Reference::null();
                array.borrow_mut().push_reference(reference.clone());
                Ok(reference)
            }
            (Value::Object(object), Some(key)) => {
                Ok(object.borrow_mut().property_or_create(&key.to_string()))
            }
            (Value::Object(_), None) => Err(ScriptError::IllegalOffset.into()),
            _ => Err(ScriptError::ScalarAsArray.into()),
        }
    }

    pub fn set_reference(&self, reference: Reference) -> RuntimeResult<Value> {
        let value = reference.get();
        match (&self.container, &self.key) {
            (Value::Array(array), Some(key)) => {
                array.borrow_mut().insert_reference(key.clone(), reference);
            }
            (Value::Array(array), None) => {
                array.borrow_mut().push_reference(reference);
            }
            (Value::Object(object), Some(key)) => {
                object
                    .borrow_mut()
                    .set_property_reference(&key.to_string(), reference);
            }
            (Value::Object(_), None) => return Err(ScriptError::IllegalOffset.into()),
            _ => return Err(ScriptError::ScalarAsArray.into()),
        }
        Ok(value)
    }

    pub fn imply_array(&self) -> RuntimeResult<Value> {
        match self.peek() {
            Some(value) if !value.is_null() => Ok(value),
            _ => Ok(imply_in(&self.get_reference()?)),
        }
    }
}

fn string_offset(text: &str, key: &Key) -> RuntimeResult<Value> {
    let Key::Integer(offset) = key else {
        return Err(ScriptError::IllegalOffset.into());
    };
    let bytes = text.as_bytes();
    let position = if *offset < 0 {
        bytes.len() as i64 + offset
    } else {
        *offset
    };

    match usize::try_from(position).ok().and_then(|p| bytes.get(p)) {
        Some(byte) => Ok(Value::String(
            String::from_utf8_lossy(std::slice::from_ref(byte)).into_owned(),
        )),
        None => {
            tracing::warn!(offset = *offset, "Uninitialized string offset");
            Ok(Value::string(""))
        }
    }
}

/// A `list(...)` destructuring target.
#[derive(Debug, Clone)]
pub struct List {
    elements: Vec<Location>,
}

impl List {
    pub fn new(elements: Vec<Location>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Location] {
        &self.elements
    }

    /// Assigns the array's positional elements to the list's locations. A
    /// non-array source assigns null throughout.
    pub fn set_value(&self, value: Value) -> RuntimeResult<Value> {
        for (position, element) in self.elements.iter().enumerate() {
            let item = match &value {
                Value::Array(array) => array
                    .borrow()
                    .get_value(&Key::Integer(position as i64))
                    .unwrap_or_default(),
                _ => Value::Null,
            };
            element.set_value(item)?;
        }
        Ok(value)
    }
}

/// Anything a compiled program can read from or assign to.
#[derive(Debug, Clone)]
pub enum Location {
    Variable(Rc<Variable>),
    Element(Element),
    /// A detached reference, e.g. the hole in `list(, $b)`.
    Reference(Reference),
    List(List),
}

impl Location {
    pub fn null_reference() -> Self {
        Location::Reference(Reference::null())
    }

    pub fn get_value(&self) -> RuntimeResult<Value> {
        match self {
            Location::Variable(variable) => Ok(variable.get_value()),
            Location::Element(element) => element.get_value(),
            Location::Reference(reference) => Ok(reference.get()),
            Location::List(_) => Err(ScriptError::InvalidListUsage.into()),
        }
    }

    pub fn set_value(&self, value: Value) -> RuntimeResult<Value> {
        match self {
            Location::Variable(variable) => Ok(variable.set_value(value)),
            Location::Element(element) => element.set_value(value),
            Location::Reference(reference) => {
                let value = value.copied();
                reference.set(value.clone());
                Ok(value)
            }
            Location::List(list) => list.set_value(value),
        }
    }

    pub fn get_reference(&self) -> RuntimeResult<Reference> {
        match self {
            Location::Variable(variable) => Ok(variable.get_reference()),
            Location::Element(element) => element.get_reference(),
            Location::Reference(reference) => Ok(reference.clone()),
            Location::List(_) => Err(ScriptError::InvalidListUsage.into()),
        }
    }

    pub fn set_reference(&self, reference: Reference) -> RuntimeResult<Value> {
        match self {
            Location::Variable(variable) => Ok(variable.set_reference(reference)),
            Location::Element(element) => element.set_reference(reference),
            // A detached slot has nothing to rebind.
            Location::Reference(_) => Ok(reference.get()),
            Location::List(_) => Err(ScriptError::InvalidListUsage.into()),
        }
    }

    /// The current value, first replacing null with an empty array.
    pub fn imply_array(&self) -> RuntimeResult<Value> {
        match self {
            Location::Variable(variable) => Ok(variable.imply_array()),
            Location::Element(element) => element.imply_array(),
            Location::Reference(reference) => Ok(imply_in(reference)),
            Location::List(_) => Err(ScriptError::InvalidListUsage.into()),
        }
    }

    /// Applies `method`, writing back for increments and decrements. Prefix
    /// forms yield the new value, suffix forms the old one.
    pub fn apply_unary(&self, method: UnaryMethod) -> RuntimeResult<Value> {
        let old = self.get_value()?;
        let new = match method {
            UnaryMethod::PreIncrement | UnaryMethod::PostIncrement => old.increment(),
            UnaryMethod::PreDecrement | UnaryMethod::PostDecrement => old.decrement(),
            other => return old.apply_unary(other),
        };
        self.set_value(new.clone())?;

        match method {
            UnaryMethod::PostIncrement | UnaryMethod::PostDecrement => Ok(old),
            _ => Ok(new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array_of(values: &[i64]) -> Value {
        Value::new_array(ArrayValue::from_values(
            values.iter().map(|n| Value::Integer(*n)),
        ))
    }

    #[test]
    fn test_set_value_copies_arrays() {
        let source = array_of(&[1, 2]);
        let variable = Variable::new("a");
        variable.set_value(source.clone());

        let element = Element::new(variable.get_value(), Some(Key::Integer(0)));
        element.set_value(Value::Integer(9)).unwrap();

        assert_eq!(source, array_of(&[1, 2]));
        assert_eq!(variable.get_value(), array_of(&[9, 2]));
    }

    #[test]
    fn test_reference_binding_shares_slot() {
        let a = Variable::new("a");
        let b = Variable::new("b");
        b.set_value(Value::Integer(1));
        a.set_reference(b.get_reference());
        b.set_value(Value::Integer(2));
        assert_eq!(a.get_value(), Value::Integer(2));
    }

    #[test]
    fn test_imply_array_replaces_null_only() {
        let variable = Variable::new("a");
        assert!(matches!(variable.imply_array(), Value::Array(_)));

        let scalar = Variable::new("b");
        scalar.set_value(Value::Integer(3));
        assert_eq!(scalar.imply_array(), Value::Integer(3));
    }

    #[test]
    fn test_nested_imply_vivifies_each_level() {
        let variable = Rc::new(Variable::new("a"));
        let outer = Location::Variable(variable.clone()).imply_array().unwrap();
        let inner = Element::new(outer, Some(Key::from("x")))
            .imply_array()
            .unwrap();
        Element::new(inner, Some(Key::from("y")))
            .set_value(Value::Integer(1))
            .unwrap();

        let Value::Array(array) = variable.get_value() else {
            panic!("expected array");
        };
        let Some(Value::Array(nested)) = array.borrow().get_value(&Key::from("x")) else {
            panic!("expected nested array");
        };
        assert_eq!(
            nested.borrow().get_value(&Key::from("y")),
            Some(Value::Integer(1))
        );
    }

    #[test]
    fn test_append_and_missing_read() {
        let array = array_of(&[]);
        Element::new(array.clone(), None)
            .set_value(Value::Integer(5))
            .unwrap();
        let read = Element::new(array.clone(), Some(Key::Integer(0)));
        assert_eq!(read.get_value().unwrap(), Value::Integer(5));

        let missing = Element::new(array, Some(Key::Integer(3)));
        assert_eq!(missing.get_value().unwrap(), Value::Null);
    }

    #[test]
    fn test_empty_index_read_fails() {
        let element = Element::new(array_of(&[1]), None);
        assert!(matches!(
            element.get_value(),
            Err(crate::RuntimeError::Script(ScriptError::EmptyIndexRead))
        ));
    }

    #[test]
    fn test_scalar_as_array_fails_on_write() {
        let element = Element::new(Value::Integer(1), Some(Key::Integer(0)));
        assert!(element.set_value(Value::Integer(2)).is_err());
    }

    #[test]
    fn test_string_offsets() {
        let text = Value::string("abc");
        let first = Element::new(text.clone(), Some(Key::Integer(0)));
        let last = Element::new(text.clone(), Some(Key::Integer(-1)));
        let beyond = Element::new(text, Some(Key::Integer(10)));
        assert_eq!(first.get_value().unwrap(), Value::string("a"));
        assert_eq!(last.get_value().unwrap(), Value::string("c"));
        assert_eq!(beyond.get_value().unwrap(), Value::string(""));
    }

    #[test]
    fn test_list_destructures_by_position() {
        let a = Rc::new(Variable::new("a"));
        let b = Rc::new(Variable::new("b"));
        let list = List::new(vec![
            Location::Variable(a.clone()),
            Location::null_reference(),
            Location::Variable(b.clone()),
        ]);
        list.set_value(array_of(&[1, 2, 3])).unwrap();
        assert_eq!(a.get_value(), Value::Integer(1));
        assert_eq!(b.get_value(), Value::Integer(3));
    }

    #[test]
    fn test_increments_write_back() {
        let variable = Rc::new(Variable::new("i"));
        let location = Location::Variable(variable.clone());
        assert_eq!(
            location.apply_unary(UnaryMethod::PostIncrement).unwrap(),
            Value::Null
        );
        assert_eq!(
            location.apply_unary(UnaryMethod::PreIncrement).unwrap(),
            Value::Integer(2)
        );
        assert_eq!(variable.get_value(), Value::Integer(2));
    }

    #[test]
    fn test_element_reference_vivifies() {
        let array = array_of(&[]);
        let reference = Element::new(array.clone(), Some(Key::from("k")))
            .get_reference()
            .unwrap();
        reference.set(Value::Integer(4));
        let read = Element::new(array, Some(Key::from("k")));
        assert_eq!(read.get_value().unwrap(), Value::Integer(4));
    }
}
