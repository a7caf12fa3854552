//! Dynamic value representation for plain documents.
//!
//! [`Value`] holds a document whose shape is not known at compile time. It
//! encodes like any typed record (map keys act as tags) and decodes without a
//! schema, so every leaf it reads back is [`Scalar::Text`].
//!
//! ## Usage Patterns
//!
//! ### Building and encoding
//!
//! ```rust
//! use plainkv::{to_string, Value, ValueMap};
//!
//! let mut sub = ValueMap::new();
//! sub.insert("name".to_string(), Value::from("test2"));
//!
//! let mut root = ValueMap::new();
//! root.insert("name".to_string(), Value::from("test"));
//! root.insert("sub".to_string(), Value::Record(sub));
//!
//! assert_eq!(to_string(&Value::Record(root)).unwrap(), "name: test\nsub.name: test2");
//! ```
//!
//! ### Decoding without a schema
//!
//! ```rust
//! use plainkv::{from_str, Value};
//!
//! let value: Value = from_str("name: test\nsub.age: 36\ntags: [a, b]").unwrap();
//! assert_eq!(value.get("name").and_then(Value::as_str), Some("test"));
//! assert_eq!(
//!     value.get("sub").and_then(|sub| sub.get("age")).and_then(Value::as_str),
//!     Some("36")
//! );
//! assert_eq!(value.get("tags").and_then(Value::as_sequence).map(Vec::len), Some(2));
//! ```
//!
//! ### From serde types
//!
//! ```rust
//! use plainkv::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 10, y: 20 }).unwrap();
//! assert!(value.is_record());
//! ```

use crate::node::{Decode, Encode, FieldRef, Node, Slot, Unmarshal};
use crate::scalar::Scalar;
use crate::tag::Tag;
use crate::{Result, ValueMap};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// A dynamically-typed plain value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// An absent reference; encoding it fails with a nil reference error.
    #[default]
    Nil,
    Scalar(Scalar),
    Record(ValueMap),
    Sequence(Vec<Value>),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// If the value is a text scalar, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plainkv::Value;
    ///
    /// assert_eq!(Value::from("hi").as_str(), Some("hi"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(scalar) => scalar.as_str(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&ValueMap> {
        match self {
            Value::Record(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a field of a record value. Returns `None` for non-records.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|map| map.get(key))
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::Text(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(Scalar::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::Float(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Scalar(Scalar::Timestamp(value))
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl Encode for Value {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(match self {
            Value::Nil => Node::Nil,
            Value::Scalar(scalar) => Node::Scalar(scalar.clone()),
            Value::Record(map) => Node::Record(
                map.iter()
                    .map(|(key, value)| FieldRef::new(Tag::parse(key.as_str()), value))
                    .collect(),
            ),
            Value::Sequence(items) => Node::sequence(items),
        })
    }
}

impl Decode for Value {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Custom(self)
    }
}

impl Unmarshal for Value {
    /// Reads `text` without a schema, replacing the current contents.
    fn unmarshal_plain(&mut self, text: &str) -> Result<()> {
        *self = crate::de::parse_untyped(text)?;
        Ok(())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Scalar(scalar) => scalar.serialize(serializer),
            Value::Record(map) => {
                use serde::ser::SerializeMap;
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Value::Sequence(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Text(text) => serializer.serialize_str(text),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::UInt(u) => serializer.serialize_u64(*u),
            Scalar::BigInt(big) => big.serialize(serializer),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Float32(f) => serializer.serialize_f32(*f),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Timestamp(ts) => ts.serialize(serializer),
        }
    }
}
