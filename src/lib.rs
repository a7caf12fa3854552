//! # plainkv
//!
//! A codec between in-memory records and a minimal, line-oriented `path: value`
//! text format.
//!
//! ## What does it look like?
//!
//! Each datum renders as `path: value` on its own line. Nested fields use
//! dot-joined paths, sequences inside a field render as one bracketed line, and
//! a sequence at the top of a document renders as blank-line separated blocks:
//!
//! ```text
//! name: test1
//! sub.name: inner
//! names: [a, b]
//!
//! name: test2
//! sub.name: other
//! names: []
//! ```
//!
//! There is no quoting or escaping. Values containing `:`, `.`, `,`, `[`, `]` or
//! newlines are written as-is and may not survive a round trip.
//!
//! ## Key Features
//!
//! - **Explicit field tables**: types list their tagged fields once with
//!   [`plain_record!`]; a `"-"` or missing tag keeps a field out of the text
//! - **Tolerant decoding**: lines without `:` and keys without a field are
//!   skipped, so documents survive schema drift
//! - **Overrides**: any type can take over its own text through [`Marshal`] and
//!   [`Unmarshal`]
//! - **Dynamic values**: [`Value`] decodes without a schema and bridges serde types
//!
//! ## Quick Start
//!
//! ```rust
//! use plainkv::{from_str, plain_record, to_string};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! plain_record!(User { name => "name", age => "age" });
//!
//! let user = User { name: "test".to_string(), age: 35 };
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "name: test\nage: 35");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(back, user);
//! ```
//!
//! ### Sequences
//!
//! ```rust
//! use plainkv::{from_str, plain_record, to_string};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Group {
//!     names: Vec<String>,
//! }
//!
//! plain_record!(Group { names => "names" });
//!
//! let group = Group { names: vec!["test1".into(), "test2".into()] };
//! assert_eq!(to_string(&group).unwrap(), "names: [test1, test2]");
//!
//! let groups: Vec<Group> = from_str("names: [a]\n\nnames: [b, c]").unwrap();
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[1].names, vec!["b", "c"]);
//! ```
//!
//! ### Dynamic Values with the plain! Macro
//!
//! ```rust
//! use plainkv::{plain, Value};
//!
//! let data = plain!({
//!     "name": "Alice",
//!     "tags": ["rust", "plain"]
//! });
//!
//! if let Value::Record(record) = &data {
//!     assert_eq!(record.get("name").and_then(Value::as_str), Some("Alice"));
//! }
//! ```
//!
//! ## Diagnostics
//!
//! The decoder reports what it skips through [`tracing`] at `trace` and `debug`
//! level. The library never installs a subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - encoding and decoding a record and a list of records
//! - **`custom_codec.rs`** - overrides, timestamps and dynamic values
//!
//! Run any demo with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod format;
pub mod impls;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod scalar;
pub mod ser;
pub mod tag;
pub mod value;

pub use de::Decoder;
pub use error::{Error, Result};
pub use map::ValueMap;
pub use node::{
    Decode, Encode, FieldDef, FieldRef, Marshal, Node, Record, RecordSlot, ScalarSlot,
    SequenceSlot, Slot, Unmarshal,
};
pub use options::{DecodeOptions, EncodeOptions, TimestampFormat};
pub use scalar::{Scalar, ScalarKind};
pub use ser::{Encoder, ValueSerializer};
pub use tag::{Path, Tag};
pub use value::Value;

use serde::Serialize;
use std::io;

/// Encodes any `T: Encode` to a plain string.
///
/// # Examples
///
/// ```rust
/// use plainkv::to_string;
///
/// assert_eq!(to_string(&42).unwrap(), "42");
/// assert_eq!(to_string(&vec!["a", "b"]).unwrap(), "a\n\nb");
/// ```
///
/// # Errors
///
/// Returns an error if an absent reference is reached or an override fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Encode,
{
    to_string_with_options(value, EncodeOptions::default())
}

/// Encodes any `T: Encode` to a plain string with custom options.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use plainkv::{to_string_with_options, EncodeOptions, TimestampFormat};
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 3, 1, 4, 0).unwrap();
/// let options = EncodeOptions::new().with_timestamp_format(TimestampFormat::Rfc3339);
/// assert_eq!(to_string_with_options(&at, options).unwrap(), "2024-05-03T01:04:00Z");
/// ```
///
/// # Errors
///
/// Returns an error if an absent reference is reached or an override fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: EncodeOptions) -> Result<String>
where
    T: ?Sized + Encode,
{
    let mut encoder = Encoder::new(options);
    encoder.encode_document(value)?;
    Ok(encoder.into_inner())
}

/// Encodes any `T: Encode` to plain bytes.
///
/// # Errors
///
/// Returns an error if an absent reference is reached or an override fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Encode,
{
    to_string(value).map(String::into_bytes)
}

/// Encodes any `T: Encode` into a writer.
///
/// # Examples
///
/// ```rust
/// use plainkv::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &true).unwrap();
/// assert_eq!(buffer, b"true");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Encode,
{
    to_writer_with_options(writer, value, EncodeOptions::default())
}

/// Encodes any `T: Encode` into a writer with custom options.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Encode,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decodes plain text into existing storage.
///
/// Fields the text does not mention keep their values and sequences are
/// appended to.
///
/// # Examples
///
/// ```rust
/// use plainkv::{decode_into, plain_record};
///
/// #[derive(Default)]
/// struct Settings {
///     host: String,
///     port: u16,
/// }
///
/// plain_record!(Settings { host => "host", port => "port" });
///
/// let mut settings = Settings { host: "localhost".to_string(), port: 80 };
/// decode_into("port: 8080", &mut settings).unwrap();
/// assert_eq!((settings.host.as_str(), settings.port), ("localhost", 8080));
/// ```
///
/// # Errors
///
/// Returns an error if the target is not writable, a known key carries a value
/// that does not parse, or a dotted key walks through a non-record field.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_into<T>(text: &str, target: &mut T) -> Result<()>
where
    T: ?Sized + Decode,
{
    decode_into_with_options(text, target, DecodeOptions::default())
}

/// Decodes plain text into existing storage with custom options.
///
/// # Errors
///
/// As [`decode_into`], plus [`Error::UnknownKey`] when unknown keys are denied.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_into_with_options<T>(text: &str, target: &mut T, options: DecodeOptions) -> Result<()>
where
    T: ?Sized + Decode,
{
    Decoder::new(options).decode(text, target)
}

/// Decodes plain text into a freshly defaulted `T`.
///
/// # Examples
///
/// ```rust
/// use plainkv::from_str;
///
/// let numbers: Vec<i32> = from_str("[1, 2]\n\n3").unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if a known key carries a value that does not parse, or a
/// dotted key walks through a non-record field.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: Decode + Default,
{
    from_str_with_options(text, DecodeOptions::default())
}

/// Decodes plain text into a freshly defaulted `T` with custom options.
///
/// # Errors
///
/// As [`from_str`], plus [`Error::UnknownKey`] when unknown keys are denied.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(text: &str, options: DecodeOptions) -> Result<T>
where
    T: Decode + Default,
{
    let mut target = T::default();
    decode_into_with_options(text, &mut target, options)?;
    Ok(target)
}

/// Decodes an instance of type `T` from UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use plainkv::{from_slice, Value};
///
/// let value: Value = from_slice(b"x: 1\ny: 2").unwrap();
/// assert_eq!(value.get("y").and_then(Value::as_str), Some("2"));
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or decoding fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: Decode + Default,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Decodes an instance of type `T` from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use plainkv::from_reader;
/// use std::io::Cursor;
///
/// let flags: Vec<bool> = from_reader(Cursor::new(b"true\n\nF")).unwrap();
/// assert_eq!(flags, vec![true, false]);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails or decoding fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: Decode + Default,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Converts any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use plainkv::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_record());
/// ```
///
/// # Errors
///
/// Returns an error for shapes without a plain rendering, such as enum
/// variants carrying data or maps with non-scalar keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Encodes any `T: Serialize` to a plain string through [`Value`].
///
/// # Examples
///
/// ```rust
/// use plainkv::to_string_serde;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string_serde(&Point { x: 1, y: 2 }).unwrap(), "x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if the value has no plain rendering or holds a `None`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_serde<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string(&to_value(value)?)
}
