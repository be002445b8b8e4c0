//! The universal JSON value model.
//!
//! A [Value] holds exactly one JSON value: null, a boolean, a number (as its
//! validated literal text), a string, an [Object] or an [Array]. Numbers
//! parsed from JSON text keep their source literal verbatim and are only
//! converted to machine types lazily, by the strict getters.
//!
//! Lookups come in three tiers:
//! - the `Index` operators, [Value::front] and [Value::back] never fail and
//!   return the shared [Value::NULL] sentinel when nothing applies, so
//!   lookups can be chained without intermediate checks;
//! - [Value::locate] returns an `Option`, distinguishing a missing key from
//!   a key that is present with a null value;
//! - [Value::at] / [Value::at_index] return a [Result] and report *why* the
//!   lookup failed.

use std::fmt::{Display, Formatter};
use std::ops::{Index, Range};

use crate::errors::{AccessError, AccessResult, ParseResult};
use crate::lexer::{Lexer, Token};
use crate::{parser, writer};

/// Value kinds. Every kind sets a different bit so that bitmasks can be
/// used with [Value::is].
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null = 1 << 0,
    False = 1 << 1,
    True = 1 << 2,
    Obj = 1 << 3,
    Arr = 1 << 4,
    Num = 1 << 5,
    Str = 1 << 6,
}

/// Kind bitmask shorthand for `False | True`
pub const BOOL_MASK: u32 = Kind::False as u32 | Kind::True as u32;

impl Kind {
    /// The human-readable name of the JSON value kind
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::False => "false",
            Kind::True => "true",
            Kind::Obj => "object",
            Kind::Arr => "array",
            Kind::Num => "number",
            Kind::Str => "string",
        }
    }
}

/// Render a kind bitmask as a `/`-separated list of kind names
pub fn kind_mask_name(mask: u32) -> String {
    const ALL: [Kind; 7] = [
        Kind::Null,
        Kind::False,
        Kind::True,
        Kind::Obj,
        Kind::Arr,
        Kind::Num,
        Kind::Str,
    ];
    let mut result = String::new();
    for kind in ALL {
        if mask & kind as u32 != 0 {
            if !result.is_empty() {
                result.push('/');
            }
            result.push_str(kind.name());
        }
    }
    result
}

/// An ordered sequence of key/value pairs.
///
/// Insertion order is preserved and duplicate keys are permitted; key lookup
/// scans from the front and returns the first match. This is optimized for
/// fast append and parse-time construction, not query throughput.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Object::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Object {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    /// Append a key/value pair. The pair is appended regardless of whether
    /// the key already exists; use [Object::locate_mut] first to update an
    /// existing entry instead.
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.entries.push((key.into(), value));
    }

    /// A reference to the first value associated with the key, or `None` if
    /// the key does not exist. Linear in the number of entries.
    pub fn locate(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }

    pub fn locate_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }

    /// The first value associated with the key, or
    /// [AccessError::KeyNotFound].
    pub fn at(&self, key: &str) -> AccessResult<&Value> {
        self.locate(key).ok_or_else(|| AccessError::KeyNotFound {
            key: key.to_owned(),
        })
    }

    pub fn at_mut(&mut self, key: &str) -> AccessResult<&mut Value> {
        match self.locate_mut(key) {
            Some(value) => Ok(value),
            None => Err(AccessError::KeyNotFound {
                key: key.to_owned(),
            }),
        }
    }

    /// The value at the numeric index (regardless of key), or
    /// [AccessError::IndexOutOfBounds].
    pub fn at_index(&self, index: usize) -> AccessResult<&Value> {
        self.entries
            .get(index)
            .map(|(_, value)| value)
            .ok_or(AccessError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            })
    }

    /// The first value (regardless of key), or the null sentinel if empty
    pub fn front(&self) -> &Value {
        self.entries
            .first()
            .map(|(_, value)| value)
            .unwrap_or(Value::NULL)
    }

    /// The last value (regardless of key), or the null sentinel if empty
    pub fn back(&self) -> &Value {
        self.entries
            .last()
            .map(|(_, value)| value)
            .unwrap_or(Value::NULL)
    }

    /// Remove the entries in `range`. Panics if the range is out of bounds,
    /// like the equivalent `Vec` operation.
    pub fn erase(&mut self, range: Range<usize>) {
        self.entries.drain(range);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, Value)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, (String, Value)> {
        self.entries.iter_mut()
    }

    pub(crate) fn last_value_mut(&mut self) -> Option<&mut Value> {
        self.entries.last_mut().map(|(_, value)| value)
    }
}

impl Index<&str> for Object {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.locate(key).unwrap_or(Value::NULL)
    }
}

impl Index<usize> for Object {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.entries
            .get(index)
            .map(|(_, value)| value)
            .unwrap_or(Value::NULL)
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Object {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// An ordered sequence of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    values: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Array::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Array {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// The value at the index, or [AccessError::IndexOutOfBounds]
    pub fn at(&self, index: usize) -> AccessResult<&Value> {
        self.values.get(index).ok_or(AccessError::IndexOutOfBounds {
            index,
            len: self.values.len(),
        })
    }

    pub fn at_mut(&mut self, index: usize) -> AccessResult<&mut Value> {
        let len = self.values.len();
        self.values
            .get_mut(index)
            .ok_or(AccessError::IndexOutOfBounds { index, len })
    }

    /// The first value, or the null sentinel if empty
    pub fn front(&self) -> &Value {
        self.values.first().unwrap_or(Value::NULL)
    }

    /// The last value, or the null sentinel if empty
    pub fn back(&self) -> &Value {
        self.values.last().unwrap_or(Value::NULL)
    }

    /// Remove the values in `range`. Panics if the range is out of bounds,
    /// like the equivalent `Vec` operation.
    pub fn erase(&mut self, range: Range<usize>) {
        self.values.drain(range);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.values.iter_mut()
    }
}

impl Index<usize> for Array {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.values.get(index).unwrap_or(Value::NULL)
    }
}

impl Extend<Value> for Array {
    fn extend<T: IntoIterator<Item = Value>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        Array { values }
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Array {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// The universal JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    False,
    True,
    /// A number, stored as its validated literal text
    Num(String),
    Str(String),
    Obj(Object),
    Arr(Array),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    /// The shared null sentinel returned by the lenient lookups
    pub const NULL: &'static Value = &Value::Null;

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::False => Kind::False,
            Value::True => Kind::True,
            Value::Num(_) => Kind::Num,
            Value::Str(_) => Kind::Str,
            Value::Obj(_) => Kind::Obj,
            Value::Arr(_) => Kind::Arr,
        }
    }

    /// Whether the value's kind is any of the kinds in the bitmask
    pub fn is(&self, mask: u32) -> bool {
        self.kind() as u32 & mask != 0
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Value::False)
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Value::True)
    }

    pub fn is_bool(&self) -> bool {
        self.is(BOOL_MASK)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Obj(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Arr(_))
    }

    pub fn is_num(&self) -> bool {
        matches!(self, Value::Num(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// The literal text for numbers and strings, `""` for everything else.
    /// Never fails.
    pub fn get_val_str(&self) -> &str {
        match self {
            Value::Num(text) | Value::Str(text) => text,
            _ => "",
        }
    }

    /// The entry count for containers, zero for everything else
    pub fn len(&self) -> usize {
        match self {
            Value::Obj(object) => object.len(),
            Value::Arr(array) => array.len(),
            _ => 0,
        }
    }

    /// Whether a container is empty; `true` for non-containers
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the value out, leaving `Null` behind. Constant time.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Reset the value to `Null`, dropping any contents
    pub fn clear(&mut self) {
        *self = Value::Null;
    }

    /// Reserve capacity in the underlying storage, where there is any
    pub fn reserve(&mut self, additional: usize) {
        match self {
            Value::Num(text) | Value::Str(text) => text.reserve(additional),
            Value::Obj(object) => object.reserve(additional),
            Value::Arr(array) => array.reserve(additional),
            _ => {}
        }
    }

    pub fn set_null(&mut self) {
        *self = Value::Null;
    }

    /// Replace the value with an empty object and return a reference to it
    pub fn set_object(&mut self) -> &mut Object {
        *self = Value::Obj(Object::new());
        match self {
            Value::Obj(object) => object,
            _ => unreachable!(),
        }
    }

    /// Replace the value with an empty array and return a reference to it
    pub fn set_array(&mut self) -> &mut Array {
        *self = Value::Arr(Array::new());
        match self {
            Value::Arr(array) => array,
            _ => unreachable!(),
        }
    }

    /// Validate `text` as exactly one JSON number literal (surrounding JSON
    /// whitespace is stripped) and store it verbatim. Any validation failure
    /// sets the value to `Null`.
    pub fn set_num_str(&mut self, text: &str) {
        *self = match validate_num_str(text) {
            Some(literal) => Value::Num(literal),
            None => Value::Null,
        };
    }

    fn type_mismatch(&self, expected: &'static str) -> AccessError {
        AccessError::TypeMismatch {
            expected,
            actual: self.kind(),
        }
    }

    fn num_literal(&self, expected: &'static str) -> AccessResult<&str> {
        match self {
            Value::Num(literal) => Ok(literal),
            _ => Err(self.type_mismatch(expected)),
        }
    }

    pub fn get_bool(&self) -> AccessResult<bool> {
        match self {
            Value::True => Ok(true),
            Value::False => Ok(false),
            _ => Err(self.type_mismatch("a boolean")),
        }
    }

    pub fn get_int(&self) -> AccessResult<i32> {
        let literal = self.num_literal("an integer")?;
        crate::numeric::parse_i32(literal).ok_or_else(|| AccessError::OutOfRange {
            literal: literal.to_owned(),
            target: "i32",
        })
    }

    pub fn get_int64(&self) -> AccessResult<i64> {
        let literal = self.num_literal("an integer")?;
        crate::numeric::parse_i64(literal).ok_or_else(|| AccessError::OutOfRange {
            literal: literal.to_owned(),
            target: "i64",
        })
    }

    pub fn get_uint(&self) -> AccessResult<u32> {
        let literal = self.num_literal("an unsigned integer")?;
        crate::numeric::parse_u32(literal).ok_or_else(|| AccessError::OutOfRange {
            literal: literal.to_owned(),
            target: "u32",
        })
    }

    pub fn get_uint64(&self) -> AccessResult<u64> {
        let literal = self.num_literal("an unsigned integer")?;
        crate::numeric::parse_u64(literal).ok_or_else(|| AccessError::OutOfRange {
            literal: literal.to_owned(),
            target: "u64",
        })
    }

    pub fn get_real(&self) -> AccessResult<f64> {
        let literal = self.num_literal("a number")?;
        crate::numeric::parse_f64(literal).ok_or_else(|| AccessError::OutOfRange {
            literal: literal.to_owned(),
            target: "f64",
        })
    }

    pub fn get_str(&self) -> AccessResult<&str> {
        match self {
            Value::Str(text) => Ok(text),
            _ => Err(self.type_mismatch("a string")),
        }
    }

    pub fn get_obj(&self) -> AccessResult<&Object> {
        match self {
            Value::Obj(object) => Ok(object),
            _ => Err(self.type_mismatch("an object")),
        }
    }

    pub fn get_obj_mut(&mut self) -> AccessResult<&mut Object> {
        match self {
            Value::Obj(object) => Ok(object),
            _ => Err(self.type_mismatch("an object")),
        }
    }

    pub fn get_array(&self) -> AccessResult<&Array> {
        match self {
            Value::Arr(array) => Ok(array),
            _ => Err(self.type_mismatch("an array")),
        }
    }

    pub fn get_array_mut(&mut self) -> AccessResult<&mut Array> {
        match self {
            Value::Arr(array) => Ok(array),
            _ => Err(self.type_mismatch("an array")),
        }
    }

    /// A pointer to the first value associated with the key, or `None` if
    /// this is not an object or the key does not exist. Distinguishes a
    /// missing key from a present-but-null value, unlike the `Index`
    /// operator.
    pub fn locate(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Obj(object) => object.locate(key),
            _ => None,
        }
    }

    pub fn locate_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Obj(object) => object.locate_mut(key),
            _ => None,
        }
    }

    /// The first value associated with the key, or an error telling whether
    /// the key was absent or this is not an object
    pub fn at(&self, key: &str) -> AccessResult<&Value> {
        match self {
            Value::Obj(object) => object.at(key),
            _ => Err(AccessError::WrongContainerKind {
                actual: self.kind(),
            }),
        }
    }

    /// The value at the numeric index: for objects the value of the nth
    /// entry regardless of key, for arrays the nth element
    pub fn at_index(&self, index: usize) -> AccessResult<&Value> {
        match self {
            Value::Obj(object) => object.at_index(index),
            Value::Arr(array) => array.at(index),
            _ => Err(AccessError::WrongContainerKind {
                actual: self.kind(),
            }),
        }
    }

    /// The first value of a container, or the null sentinel
    pub fn front(&self) -> &Value {
        match self {
            Value::Obj(object) => object.front(),
            Value::Arr(array) => array.front(),
            _ => Value::NULL,
        }
    }

    /// The last value of a container, or the null sentinel
    pub fn back(&self) -> &Value {
        match self {
            Value::Obj(object) => object.back(),
            Value::Arr(array) => array.back(),
            _ => Value::NULL,
        }
    }

    /// Parse `raw` as a complete JSON document, replacing this value.
    ///
    /// On failure the error carries the byte offset of the failure and this
    /// value is left in a valid but unspecified state.
    pub fn read(&mut self, raw: &str) -> ParseResult<()> {
        self.read_bytes(raw.as_bytes())
    }

    /// As [Value::read], over raw bytes. String contents are validated by
    /// the UTF-8 filter during lexing, so the input need not be checked
    /// beforehand.
    pub fn read_bytes(&mut self, raw: &[u8]) -> ParseResult<()> {
        parser::read_document(self, raw)
    }

    /// Parse `raw` into a fresh value
    pub fn parse(raw: &str) -> ParseResult<Value> {
        let mut value = Value::Null;
        value.read(raw)?;
        Ok(value)
    }

    /// Render as JSON text; `pretty_indent` of 0 produces the compact form
    pub fn stringify(&self, pretty_indent: u32) -> String {
        writer::stringify(self, pretty_indent)
    }
}

/// Validate that `text` is exactly one JSON number token with nothing but
/// JSON whitespace around it, returning the stripped literal.
fn validate_num_str(text: &str) -> Option<String> {
    let mut lexer = Lexer::new(text.as_bytes());
    let literal = match lexer.consume() {
        Ok((Token::Num(literal), _)) => literal,
        _ => return None,
    };
    match lexer.consume() {
        Ok((Token::End, _)) => Some(literal),
        _ => None,
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// The first value associated with the key, or the null sentinel if the
    /// key does not exist or this is not an object
    fn index(&self, key: &str) -> &Value {
        self.locate(key).unwrap_or(Value::NULL)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// The value at the index, or the null sentinel if out of range or this
    /// is not a container
    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Obj(object) => &object[index],
            Value::Arr(array) => &array[index],
            _ => Value::NULL,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.stringify(0))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value {
            Value::True
        } else {
            Value::False
        }
    }
}

fn from_i64(value: i64) -> Value {
    let mut buffer = itoa::Buffer::new();
    Value::Num(buffer.format(value).to_owned())
}

fn from_u64(value: u64) -> Value {
    let mut buffer = itoa::Buffer::new();
    Value::Num(buffer.format(value).to_owned())
}

macro_rules! value_from_signed {
    ($($int:ty),*) => {
        $(impl From<$int> for Value {
            fn from(value: $int) -> Self {
                from_i64(i64::from(value))
            }
        })*
    };
}

macro_rules! value_from_unsigned {
    ($($int:ty),*) => {
        $(impl From<$int> for Value {
            fn from(value: $int) -> Self {
                from_u64(u64::from(value))
            }
        })*
    };
}

value_from_signed!(i8, i16, i32, i64);
value_from_unsigned!(u8, u16, u32, u64);

impl From<f64> for Value {
    /// Finite doubles become numbers with a minimal locale-independent
    /// literal; NaN and the infinities are not representable in JSON and
    /// become `Null`.
    fn from(value: f64) -> Self {
        if value.is_finite() {
            let mut buffer = ryu::Buffer::new();
            Value::Num(buffer.format_finite(value).to_owned())
        } else {
            Value::Null
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        if value.is_finite() {
            let mut buffer = ryu::Buffer::new();
            Value::Num(buffer.format_finite(value).to_owned())
        } else {
            Value::Null
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Obj(object)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Arr(array)
    }
}
