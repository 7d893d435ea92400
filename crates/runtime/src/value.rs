//! Script values and the operations applied to them

use crate::array::{ArrayValue, Key};
use crate::error::{RuntimeResult, ScriptError};
use crate::object::ObjectValue;
use crate::operators::{BinaryMethod, UnaryMethod};
use indexmap::IndexMap;
use serde::Serialize;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

const MAX_NATIVE_DEPTH: usize = 64;

/// Significant digits used when printing floats.
const FLOAT_PRECISION: i32 = 14;

#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Rc<RefCell<ArrayValue>>),
    Object(Rc<RefCell<ObjectValue>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Null,
    Boolean,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl TypeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host-side snapshot of a value, detached from the runtime's storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Native {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(IndexMap<Key, Native>),
    Object {
        class: String,
        properties: IndexMap<String, Native>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Integer(n) => n == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Number::Integer(n) => Value::Integer(n),
            Number::Float(f) => Value::Float(f),
        }
    }

    fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl Value {
    pub fn string(text: impl Into<String>) -> Value {
        Value::String(text.into())
    }

    pub fn new_array(array: ArrayValue) -> Value {
        Value::Array(Rc::new(RefCell::new(array)))
    }

    pub fn new_object(object: ObjectValue) -> Value {
        Value::Object(Rc::new(RefCell::new(object)))
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Integer(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::String(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Object(_) => TypeTag::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The value as stored by a by-value assignment: arrays are duplicated,
    /// everything else (including object handles) is shared.
    pub fn copied(&self) -> Value {
        match self {
            Value::Array(array) => Value::new_array(array.borrow().copied()),
            other => other.clone(),
        }
    }

    pub fn native(&self) -> Native {
        self.native_at(0)
    }

    fn native_at(&self, depth: usize) -> Native {
        if depth > MAX_NATIVE_DEPTH {
            return Native::Null;
        }

        match self {
            Value::Null => Native::Null,
            Value::Boolean(b) => Native::Boolean(*b),
            Value::Integer(n) => Native::Integer(*n),
            Value::Float(f) => Native::Float(*f),
            Value::String(s) => Native::String(s.clone()),
            Value::Array(array) => Native::Array(
                array
                    .borrow()
                    .iter()
                    .map(|(key, reference)| (key.clone(), reference.get().native_at(depth + 1)))
                    .collect(),
            ),
            Value::Object(object) => {
                let object = object.borrow();
                Native::Object {
                    class: object.class_name().to_string(),
                    properties: object
                        .properties()
                        .map(|(name, reference)| {
                            (name.clone(), reference.get().native_at(depth + 1))
                        })
                        .collect(),
                }
            }
        }
    }

    pub fn coerce_to_boolean(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::Array(array) => !array.borrow().is_empty(),
            Value::Object(_) => true,
        }
    }

    pub fn coerce_to_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(true) => "1".to_string(),
            Value::Boolean(false) => String::new(),
            Value::Integer(n) => n.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
            Value::Array(_) => {
                tracing::warn!("Array to string conversion");
                "Array".to_string()
            }
            Value::Object(object) => {
                let class = object.borrow().class_name().to_string();
                tracing::warn!(class = %class, "Object converted to string");
                class
            }
        }
    }

    pub fn coerce_to_integer(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Boolean(b) => i64::from(*b),
            Value::Integer(n) => *n,
            Value::Float(f) => float_to_integer(*f),
            Value::String(s) => match parse_numeric_prefix(s) {
                Some((Number::Integer(n), _)) => n,
                Some((Number::Float(f), _)) => float_to_integer(f),
                None => 0,
            },
            Value::Array(array) => i64::from(!array.borrow().is_empty()),
            Value::Object(_) => 1,
        }
    }

    pub fn coerce_to_float(&self) -> f64 {
        match self {
            Value::Float(f) => *f,
            Value::String(s) => parse_numeric_prefix(s).map_or(0.0, |(n, _)| n.as_f64()),
            other => other.coerce_to_integer() as f64,
        }
    }

    fn to_number(&self) -> Number {
        match self {
            Value::Integer(n) => Number::Integer(*n),
            Value::Float(f) => Number::Float(*f),
            Value::String(s) => match parse_numeric_prefix(s) {
                Some((number, complete)) => {
                    if !complete {
                        tracing::warn!(value = %s, "A non-well formed numeric value encountered");
                    }
                    number
                }
                None => {
                    tracing::warn!(value = %s, "A non-numeric value encountered");
                    Number::Integer(0)
                }
            },
            other => Number::Integer(other.coerce_to_integer()),
        }
    }

    pub fn apply_binary(&self, method: BinaryMethod, right: &Value) -> RuntimeResult<Value> {
        match method {
            BinaryMethod::Add
            | BinaryMethod::Subtract
            | BinaryMethod::Multiply
            | BinaryMethod::Divide => self.arithmetic(method, right),
            BinaryMethod::Modulo => {
                self.check_operands(method, right)?;
                let divisor = right.coerce_to_integer();
                if divisor == 0 {
                    return Err(ScriptError::ModuloByZero.into());
                }
                Ok(Value::Integer(self.coerce_to_integer().wrapping_rem(divisor)))
            }
            BinaryMethod::Concat => Ok(Value::String(
                self.coerce_to_string() + &right.coerce_to_string(),
            )),
            BinaryMethod::ShiftLeftBy | BinaryMethod::ShiftRightBy => self.shift(method, right),
            BinaryMethod::IsEqualTo => Ok(Value::Boolean(self.loosely_equals(right))),
            BinaryMethod::IsNotEqualTo => Ok(Value::Boolean(!self.loosely_equals(right))),
            BinaryMethod::IsIdenticalTo => Ok(Value::Boolean(self.is_identical_to(right))),
            BinaryMethod::IsNotIdenticalTo => Ok(Value::Boolean(!self.is_identical_to(right))),
            BinaryMethod::IsLessThan => Ok(Value::Boolean(matches!(
                self.loose_compare(right),
                Some(Ordering::Less)
            ))),
            BinaryMethod::IsLessThanOrEqual => Ok(Value::Boolean(matches!(
                self.loose_compare(right),
                Some(Ordering::Less | Ordering::Equal)
            ))),
            BinaryMethod::IsGreaterThan => Ok(Value::Boolean(matches!(
                self.loose_compare(right),
                Some(Ordering::Greater)
            ))),
            BinaryMethod::IsGreaterThanOrEqual => Ok(Value::Boolean(matches!(
                self.loose_compare(right),
                Some(Ordering::Greater | Ordering::Equal)
            ))),
        }
    }

    /// Unary operations that do not write back. Increments and decrements
    /// go through [`Value::increment`] / [`Value::decrement`] on a location.
    pub fn apply_unary(&self, method: UnaryMethod) -> RuntimeResult<Value> {
        match method {
            UnaryMethod::ToPositive => self.arithmetic(BinaryMethod::Multiply, &Value::Integer(1)),
            UnaryMethod::ToNegative => {
                self.arithmetic(BinaryMethod::Multiply, &Value::Integer(-1))
            }
            UnaryMethod::OnesComplement => match self {
                Value::Integer(n) => Ok(Value::Integer(!n)),
                Value::Float(f) => Ok(Value::Integer(!float_to_integer(*f))),
                other => Err(ScriptError::UnsupportedOperands {
                    left: String::new(),
                    operator: "~",
                    right: other.type_tag().to_string(),
                }
                .into()),
            },
            UnaryMethod::LogicalNot => Ok(Value::Boolean(!self.coerce_to_boolean())),
            UnaryMethod::PreIncrement | UnaryMethod::PostIncrement => Ok(self.increment()),
            UnaryMethod::PreDecrement | UnaryMethod::PostDecrement => Ok(self.decrement()),
        }
    }

    pub fn increment(&self) -> Value {
        match self {
            Value::Null => Value::Integer(1),
            Value::Integer(n) => n
                .checked_add(1)
                .map_or(Value::Float(*n as f64 + 1.0), Value::Integer),
            Value::Float(f) => Value::Float(f + 1.0),
            Value::String(s) if s.is_empty() => Value::string("1"),
            Value::String(s) => match numeric(s) {
                Some(number) => Value::Integer(1)
                    .arithmetic(BinaryMethod::Add, &number.into_value())
                    .unwrap_or(Value::Null),
                None => Value::String(increment_string(s)),
            },
            other => other.clone(),
        }
    }

    pub fn decrement(&self) -> Value {
        match self {
            Value::Integer(n) => n
                .checked_sub(1)
                .map_or(Value::Float(*n as f64 - 1.0), Value::Integer),
            Value::Float(f) => Value::Float(f - 1.0),
            Value::String(s) if s.is_empty() => Value::Integer(-1),
            Value::String(s) => match numeric(s) {
                Some(number) => number
                    .into_value()
                    .arithmetic(BinaryMethod::Subtract, &Value::Integer(1))
                    .unwrap_or(Value::Null),
                None => self.clone(),
            },
            other => other.clone(),
        }
    }

    fn check_operands(&self, method: BinaryMethod, right: &Value) -> RuntimeResult<()> {
        let is_compound = |value: &Value| matches!(value, Value::Array(_) | Value::Object(_));
        if is_compound(self) || is_compound(right) {
            return Err(ScriptError::UnsupportedOperands {
                left: self.type_tag().to_string(),
                operator: method.symbol(),
                right: right.type_tag().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn arithmetic(&self, method: BinaryMethod, right: &Value) -> RuntimeResult<Value> {
        if let (BinaryMethod::Add, Value::Array(left), Value::Array(right)) = (method, self, right)
        {
            let mut union = left.borrow().copied();
            for (key, reference) in right.borrow().iter() {
                if !union.contains_key(key) {
                    union.insert(key.clone(), reference.get().copied());
                }
            }
            return Ok(Value::new_array(union));
        }

        self.check_operands(method, right)?;
        let (a, b) = (self.to_number(), right.to_number());

        let result = match (method, a, b) {
            (BinaryMethod::Add, Number::Integer(x), Number::Integer(y)) => x
                .checked_add(y)
                .map_or(Number::Float(x as f64 + y as f64), Number::Integer),
            (BinaryMethod::Subtract, Number::Integer(x), Number::Integer(y)) => x
                .checked_sub(y)
                .map_or(Number::Float(x as f64 - y as f64), Number::Integer),
            (BinaryMethod::Multiply, Number::Integer(x), Number::Integer(y)) => x
                .checked_mul(y)
                .map_or(Number::Float(x as f64 * y as f64), Number::Integer),
            (BinaryMethod::Divide, _, divisor) if divisor.is_zero() => {
                return Err(ScriptError::DivisionByZero.into());
            }
            (BinaryMethod::Divide, Number::Integer(x), Number::Integer(y))
                if x.checked_rem(y) == Some(0) =>
            {
                Number::Integer(x / y)
            }
            (BinaryMethod::Add, x, y) => Number::Float(x.as_f64() + y.as_f64()),
            (BinaryMethod::Subtract, x, y) => Number::Float(x.as_f64() - y.as_f64()),
            (BinaryMethod::Multiply, x, y) => Number::Float(x.as_f64() * y.as_f64()),
            (_, x, y) => Number::Float(x.as_f64() / y.as_f64()),
        };

        Ok(result.into_value())
    }

    fn shift(&self, method: BinaryMethod, right: &Value) -> RuntimeResult<Value> {
        self.check_operands(method, right)?;
        let (value, amount) = (self.coerce_to_integer(), right.coerce_to_integer());
        if amount < 0 {
            return Err(ScriptError::NegativeShift.into());
        }

        let shifted = match method {
            BinaryMethod::ShiftLeftBy if amount >= 64 => 0,
            BinaryMethod::ShiftLeftBy => value.wrapping_shl(amount as u32),
            _ if amount >= 64 => {
                if value < 0 {
                    -1
                } else {
                    0
                }
            }
            _ => value >> amount,
        };
        Ok(Value::Integer(shifted))
    }

    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), _) => *a == other.coerce_to_boolean(),
            (_, Value::Boolean(b)) => self.coerce_to_boolean() == *b,
            (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
            (Value::Null, _) => !other.coerce_to_boolean(),
            (_, Value::Null) => !self.coerce_to_boolean(),
            (Value::Array(a), Value::Array(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().all(|(key, reference)| {
                        b.get_value(key)
                            .is_some_and(|value| reference.get().loosely_equals(&value))
                    })
            }
            (Value::Object(a), Value::Object(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.class_name() == b.class_name()
                    && a.property_count() == b.property_count()
                    && a.properties().all(|(name, reference)| {
                        b.property(name)
                            .is_some_and(|value| reference.get().loosely_equals(&value))
                    })
            }
            _ => self.loose_compare(other) == Some(Ordering::Equal),
        }
    }

    pub fn is_identical_to(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|((ka, ra), (kb, rb))| {
                        ka == kb && ra.get().is_identical_to(&rb.get())
                    })
            }
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Ordering used by `<`, `<=`, `>`, `>=`; `None` when the operands are
    /// not comparable.
    pub fn loose_compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => match (numeric(a), numeric(b)) {
                (Some(x), Some(y)) => x.compare(y),
                _ => Some(a.cmp(b)),
            },
            (Value::Null, Value::String(s)) => Some(String::new().cmp(s)),
            (Value::String(s), Value::Null) => Some(s.as_str().cmp("")),
            (Value::Null | Value::Boolean(_), _) | (_, Value::Null | Value::Boolean(_)) => {
                Some(self.coerce_to_boolean().cmp(&other.coerce_to_boolean()))
            }
            (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                self.to_number().compare(other.to_number())
            }
            (Value::Integer(_) | Value::Float(_), Value::String(s)) => match numeric(s) {
                Some(number) => self.to_number().compare(number),
                None => Some(self.coerce_to_string().cmp(s)),
            },
            (Value::String(s), Value::Integer(_) | Value::Float(_)) => match numeric(s) {
                Some(number) => number.compare(other.to_number()),
                None => Some(s.cmp(&other.coerce_to_string())),
            },
            (Value::Array(a), Value::Array(b)) => {
                let (len_a, len_b) = (a.borrow().len(), b.borrow().len());
                if len_a != len_b {
                    Some(len_a.cmp(&len_b))
                } else if self.loosely_equals(other) {
                    Some(Ordering::Equal)
                } else {
                    None
                }
            }
            (Value::Object(_), Value::Object(_)) if self.loosely_equals(other) => {
                Some(Ordering::Equal)
            }
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.is_identical_to(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coerce_to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

fn float_to_integer(f: f64) -> i64 {
    if f.is_finite() { f.trunc() as i64 } else { 0 }
}

pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if f == f.trunc() && f.abs() < 1e15 {
        return format!("{}", f as i64);
    }

    let exponent = f.abs().log10().floor() as i32;
    let decimals = (FLOAT_PRECISION - 1 - exponent).clamp(0, 20) as usize;
    let text = format!("{:.*}", decimals, f);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// A leading number in `text` and whether it spans the whole string
/// (surrounding whitespace aside).
fn parse_numeric_prefix(text: &str) -> Option<(Number, bool)> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - digits_start;
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        if digits > 0 || fraction_end > fraction_start {
            digits += fraction_end - fraction_start;
            end = fraction_end;
            is_float = true;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while bytes.get(exponent_end).is_some_and(u8::is_ascii_digit) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
            is_float = true;
        }
    }

    let literal = &trimmed[..end];
    let number = if is_float {
        Number::Float(literal.parse().ok()?)
    } else {
        match literal.parse::<i64>() {
            Ok(n) => Number::Integer(n),
            Err(_) => Number::Float(literal.parse().ok()?),
        }
    };
    let complete = trimmed[end..].trim_end().is_empty();
    Some((number, complete))
}

fn numeric(text: &str) -> Option<Number> {
    match parse_numeric_prefix(text) {
        Some((number, true)) => Some(number),
        _ => None,
    }
}

/// Alphanumeric increment: `"a"` -> `"b"`, `"Az"` -> `"Ba"`, `"zz"` -> `"aaa"`.
fn increment_string(text: &str) -> String {
    let mut bytes = text.as_bytes().to_vec();
    let mut position = bytes.len();

    loop {
        if position == 0 {
            let prefix = match bytes.first() {
                Some(b'0') => b'1',
                Some(b'a') => b'a',
                Some(b'A') => b'A',
                _ => break,
            };
            bytes.insert(0, prefix);
            break;
        }
        position -= 1;
        match bytes[position] {
            b'z' => bytes[position] = b'a',
            b'Z' => bytes[position] = b'A',
            b'9' => bytes[position] = b'0',
            c if c.is_ascii_alphanumeric() => {
                bytes[position] = c + 1;
                break;
            }
            _ => break,
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(left: impl Into<Value>, method: BinaryMethod, right: impl Into<Value>) -> Value {
        left.into().apply_binary(method, &right.into()).unwrap()
    }

    #[test]
    fn test_integer_arithmetic_stays_integer() {
        assert_eq!(binary(2, BinaryMethod::Add, 3), Value::Integer(5));
        assert_eq!(binary(7, BinaryMethod::Subtract, 10), Value::Integer(-3));
        assert_eq!(binary(6, BinaryMethod::Divide, 3), Value::Integer(2));
        assert_eq!(binary(7, BinaryMethod::Divide, 2), Value::Float(3.5));
        assert_eq!(binary(7, BinaryMethod::Modulo, 3), Value::Integer(1));
    }

    #[test]
    fn test_overflow_promotes_to_float() {
        let result = binary(i64::MAX, BinaryMethod::Add, 1);
        assert!(matches!(result, Value::Float(_)));
    }

    #[test]
    fn test_numeric_strings_coerce() {
        assert_eq!(binary("4", BinaryMethod::Multiply, 2), Value::Integer(8));
        assert_eq!(binary("1.5", BinaryMethod::Add, 1), Value::Float(2.5));
        assert_eq!(binary("12abc", BinaryMethod::Add, 1), Value::Integer(13));
    }

    #[test]
    fn test_division_by_zero_is_script_error() {
        let result = Value::Integer(1).apply_binary(BinaryMethod::Divide, &Value::Integer(0));
        assert!(matches!(
            result,
            Err(crate::RuntimeError::Script(ScriptError::DivisionByZero))
        ));
        let result = Value::Integer(1).apply_binary(BinaryMethod::Modulo, &Value::Integer(0));
        assert!(matches!(
            result,
            Err(crate::RuntimeError::Script(ScriptError::ModuloByZero))
        ));
    }

    #[test]
    fn test_concat_coerces_to_string() {
        assert_eq!(
            binary("a", BinaryMethod::Concat, 1.5),
            Value::string("a1.5")
        );
        assert_eq!(binary(true, BinaryMethod::Concat, Value::Null), Value::string("1"));
    }

    #[test]
    fn test_shifts() {
        assert_eq!(binary(1, BinaryMethod::ShiftLeftBy, 4), Value::Integer(16));
        assert_eq!(binary(-16, BinaryMethod::ShiftRightBy, 2), Value::Integer(-4));
        assert!(
            Value::Integer(1)
                .apply_binary(BinaryMethod::ShiftLeftBy, &Value::Integer(-1))
                .is_err()
        );
    }

    #[test]
    fn test_loose_and_strict_equality() {
        assert_eq!(binary(1, BinaryMethod::IsEqualTo, "1"), Value::Boolean(true));
        assert_eq!(binary(1, BinaryMethod::IsIdenticalTo, "1"), Value::Boolean(false));
        assert_eq!(binary("abc", BinaryMethod::IsEqualTo, 0), Value::Boolean(false));
        assert_eq!(binary(Value::Null, BinaryMethod::IsEqualTo, false), Value::Boolean(true));
        assert_eq!(binary("1e1", BinaryMethod::IsEqualTo, "10"), Value::Boolean(true));
        assert_eq!(binary(2, BinaryMethod::IsNotIdenticalTo, 2), Value::Boolean(false));
    }

    #[test]
    fn test_ordering() {
        assert_eq!(binary(1, BinaryMethod::IsLessThan, 2), Value::Boolean(true));
        assert_eq!(binary("10", BinaryMethod::IsGreaterThan, "9"), Value::Boolean(true));
        assert_eq!(binary("b", BinaryMethod::IsGreaterThan, "a"), Value::Boolean(true));
        assert_eq!(binary(2.5, BinaryMethod::IsLessThanOrEqual, 2.5), Value::Boolean(true));
    }

    #[test]
    fn test_array_union() {
        let left = Value::new_array(ArrayValue::from_values([Value::Integer(1)]));
        let right = Value::new_array(ArrayValue::from_values([
            Value::Integer(9),
            Value::Integer(2),
        ]));
        let union = left.apply_binary(BinaryMethod::Add, &right).unwrap();
        let mut expected = IndexMap::new();
        expected.insert(Key::Integer(0), Native::Integer(1));
        expected.insert(Key::Integer(1), Native::Integer(2));
        assert_eq!(union.native(), Native::Array(expected));
    }

    #[test]
    fn test_arithmetic_on_array_is_rejected() {
        let array = Value::new_array(ArrayValue::new());
        assert!(array.apply_binary(BinaryMethod::Multiply, &Value::Integer(2)).is_err());
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::string("0").coerce_to_boolean());
        assert!(!Value::string("").coerce_to_boolean());
        assert!(Value::string("0.0").coerce_to_boolean());
        assert!(!Value::Float(0.0).coerce_to_boolean());
        assert!(!Value::new_array(ArrayValue::new()).coerce_to_boolean());
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(format_float(2.0), "2");
        assert_eq!(format_float(0.1 + 0.2), "0.3");
        assert_eq!(format_float(-1.25), "-1.25");
        assert_eq!(format_float(f64::INFINITY), "INF");
    }

    #[test]
    fn test_increment_and_decrement() {
        assert_eq!(Value::Null.increment(), Value::Integer(1));
        assert_eq!(Value::Null.decrement(), Value::Null);
        assert_eq!(Value::string("5").increment(), Value::Integer(6));
        assert_eq!(Value::string("a").increment(), Value::string("b"));
        assert_eq!(Value::string("Az").increment(), Value::string("Ba"));
        assert_eq!(Value::string("zz").increment(), Value::string("aaa"));
        assert_eq!(Value::string("a9").increment(), Value::string("b0"));
        assert_eq!(Value::Float(1.5).decrement(), Value::Float(0.5));
    }

    #[test]
    fn test_unary_methods() {
        assert_eq!(
            Value::Integer(5).apply_unary(UnaryMethod::ToNegative).unwrap(),
            Value::Integer(-5)
        );
        assert_eq!(
            Value::string("3").apply_unary(UnaryMethod::ToPositive).unwrap(),
            Value::Integer(3)
        );
        assert_eq!(
            Value::Integer(0).apply_unary(UnaryMethod::OnesComplement).unwrap(),
            Value::Integer(-1)
        );
        assert_eq!(
            Value::Integer(0).apply_unary(UnaryMethod::LogicalNot).unwrap(),
            Value::Boolean(true)
        );
    }

    #[test]
    fn test_copied_array_is_detached() {
        let original = Value::new_array(ArrayValue::from_values([Value::Integer(1)]));
        let copy = original.copied();
        if let Value::Array(array) = &original {
            array.borrow_mut().push(Value::Integer(2));
        }
        if let Value::Array(array) = &copy {
            assert_eq!(array.borrow().len(), 1);
        }
    }

    #[test]
    fn test_native_serialises_plainly() {
        let array = ArrayValue::from_values([Value::Integer(1), Value::string("x")]);
        let json = serde_json::to_string(&Value::new_array(array).native()).unwrap();
        assert_eq!(json, r#"{"0":1,"1":"x"}"#);
        assert_eq!(serde_json::to_string(&Value::Null.native()).unwrap(), "null");
    }
}
