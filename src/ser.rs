//! Plain encoding.
//!
//! This module provides the [`Encoder`] that turns any [`Encode`] value into
//! flat `path: value` lines, and [`ValueSerializer`], which bridges serde types
//! into a dynamic [`Value`] first.
//!
//! ## Overview
//!
//! - **Records** emit one line per included field, in declaration order, keyed by
//!   the dot-joined path of tags: `sub.name: test2`
//! - **Sequences** nested in a field emit one bracketed line: `names: [a, b]`
//! - **Top-level sequences** emit one block per element, separated by a blank line
//! - **Overrides** emit their own output verbatim after the key (bare at the root)
//!
//! ## Usage
//!
//! ```rust
//! use plainkv::{plain_record, to_string};
//!
//! #[derive(Default)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! plain_record!(User { name => "name", age => "age" });
//!
//! let users = vec![
//!     User { name: "test1".to_string(), age: 35 },
//!     User { name: "test2".to_string(), age: 36 },
//! ];
//! assert_eq!(
//!     to_string(&users).unwrap(),
//!     "name: test1\nage: 35\n\nname: test2\nage: 36"
//! );
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use plainkv::{EncodeOptions, Encoder};
//!
//! let mut encoder = Encoder::new(EncodeOptions::new());
//! encoder.encode_document(&vec![1, 2, 3]).unwrap();
//! assert_eq!(encoder.into_inner(), "1\n\n2\n\n3");
//! ```

use crate::node::{Encode, FieldRef, Node};
use crate::tag::Path;
use crate::{EncodeOptions, Error, Result, Scalar, Value, ValueMap};
use num_bigint::BigInt;
use serde::{ser, Serialize};
use tracing::trace;

const LIST_SEPARATOR: &str = ", ";

/// The plain encoder.
///
/// Writes lines into an internal buffer; [`Encoder::into_inner`] returns the
/// text with trailing newlines stripped.
pub struct Encoder {
    output: String,
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Encoder {
            output: String::with_capacity(128),
            options,
        }
    }

    /// Encodes a whole document.
    ///
    /// A sequence at the top becomes one block per element; anything else,
    /// including a sequence type with its own override, is encoded once at the
    /// root path.
    pub fn encode_document<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Encode,
    {
        match value.encode_node()? {
            Node::Sequence(items) => {
                trace!(blocks = items.len(), "encoding block sequence");
                for item in items {
                    self.encode_node(item.encode_node()?, &Path::root())?;
                    self.output.push('\n');
                }
                Ok(())
            }
            node => self.encode_node(node, &Path::root()),
        }
    }

    /// Consumes the encoder, returning the encoded text.
    pub fn into_inner(self) -> String {
        let mut output = self.output;
        let trimmed = output.trim_end_matches('\n').len();
        output.truncate(trimmed);
        output
    }

    fn encode_node(&mut self, node: Node<'_>, path: &Path) -> Result<()> {
        match node {
            Node::Custom(out) => {
                self.write_row(path.as_str(), &out);
                Ok(())
            }
            Node::Nil => Err(Error::nil_reference(path)),
            Node::Record(fields) => self.encode_record(fields, path),
            Node::Sequence(items) => self.encode_sequence(items, path),
            Node::Scalar(scalar) => {
                let text = scalar.render(&self.options);
                self.write_row(path.as_str(), &text);
                Ok(())
            }
        }
    }

    fn encode_record(&mut self, fields: Vec<FieldRef<'_>>, path: &Path) -> Result<()> {
        for field in fields {
            let Some(tag) = field.tag.name() else {
                continue;
            };
            let child = path.child(tag);
            match field.value.encode_node()? {
                // Field-level overrides are keyed by the bare tag, not the full path.
                Node::Custom(out) => self.write_row(tag, &out),
                node => self.encode_node(node, &child)?,
            }
        }
        Ok(())
    }

    fn encode_sequence(&mut self, items: Vec<&dyn Encode>, path: &Path) -> Result<()> {
        let mut rendered = Vec::with_capacity(items.len());
        for item in items {
            match item.encode_node()? {
                Node::Scalar(scalar) => rendered.push(scalar.render(&self.options)),
                node => {
                    let mut nested = Encoder::new(self.options.clone());
                    nested.encode_node(node, &Path::root())?;
                    rendered.push(nested.into_inner());
                }
            }
        }

        let list = format!("[{}]", rendered.join(LIST_SEPARATOR));
        self.write_row(path.as_str(), &list);
        Ok(())
    }

    fn write_row(&mut self, key: &str, value: &str) {
        if !key.is_empty() {
            self.output.push_str(key);
            self.output.push_str(": ");
        }
        self.output.push_str(value);
        self.output.push('\n');
    }
}

/// A serde serializer producing [`Value`] trees.
///
/// Struct field names become tags, so `#[serde(skip)]` and
/// `#[serde(rename = "-")]` both keep a field out of the encoded text.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: ValueMap,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Int(i64::from(v))))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Int(i64::from(v))))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Int(i64::from(v))))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Int(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Scalar(Scalar::BigInt(BigInt::from(v))))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Scalar(Scalar::UInt(u64::from(v))))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Scalar(Scalar::UInt(u64::from(v))))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Scalar(Scalar::UInt(u64::from(v))))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Scalar(Scalar::UInt(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::Scalar(Scalar::BigInt(BigInt::from(v))))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Float32(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Text(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Text(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v
            .iter()
            .map(|&b| Value::Scalar(Scalar::UInt(u64::from(b))))
            .collect();
        Ok(Value::Sequence(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Nil)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Nil)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Nil)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Text(variant.to_string())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn with_capacity(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: ValueMap::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Value::Scalar(scalar) => {
                self.current_key = Some(scalar.to_string());
                Ok(())
            }
            _ => Err(Error::unsupported_type("map keys must be scalars")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.map))
    }
}
