//! Plain decoding.
//!
//! This module provides the [`Decoder`] that writes flat `path: value` text back
//! into a target's storage, plus the schema-less reader behind
//! [`Value`](crate::Value).
//!
//! ## Overview
//!
//! - **Records**: one `key: value` per line, split at the first `:`. Lines
//!   without a `:` are skipped, and keys are matched against tags
//!   case-insensitively one dotted segment at a time
//! - **Sequences**: blank-line separated chunks; a bracketed chunk contributes
//!   one element per comma-separated token, any other chunk exactly one element
//! - **Scalars**: the trimmed literal is parsed according to the field's kind
//! - **Overrides**: receive the raw text and replace all of the above
//!
//! ## Usage
//!
//! ```rust
//! use plainkv::{from_str, plain_record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Sub {
//!     name: String,
//! }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Doc {
//!     name: String,
//!     sub: Sub,
//!     names: Vec<String>,
//! }
//!
//! plain_record!(Sub { name => "name" });
//! plain_record!(Doc { name => "name", sub => "sub", names => "names" });
//!
//! let doc: Doc = from_str("name: test\nSUB.Name: test2\nnames: [a, b]\nstale: 1").unwrap();
//! assert_eq!(doc.sub.name, "test2");
//! assert_eq!(doc.names, vec!["a", "b"]);
//! ```

use crate::node::{Decode, RecordSlot, SequenceSlot, Slot};
use crate::tag::Path;
use crate::{DecodeOptions, Error, Result, Scalar, Value, ValueMap};
use std::iter::Peekable;
use std::str::Split;
use tracing::{debug, trace};

const BLOCK_SEPARATOR: &str = "\n\n";
const KEY_SEPARATOR: char = ':';
const LIST_SEPARATOR: char = ',';

type Segments<'k> = Peekable<Split<'k, char>>;

/// The plain decoder.
///
/// Holds only its options; every call works on its own input and target.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Decoder { options }
    }

    /// Decodes `text` into `target`.
    ///
    /// Fields the text does not mention keep their current values; sequences
    /// are appended to.
    pub fn decode<T>(&self, text: &str, target: &mut T) -> Result<()>
    where
        T: ?Sized + Decode,
    {
        match target.slot() {
            Slot::ReadOnly => Err(Error::invalid_target("target is shared or immutable")),
            slot => self.decode_slot(slot, text),
        }
    }

    fn decode_slot(&self, slot: Slot<'_>, text: &str) -> Result<()> {
        match slot {
            Slot::Custom(target) => target.unmarshal_plain(text),
            Slot::Scalar(target) => target.assign(text.trim()),
            Slot::Sequence(target) => self.decode_sequence(target, text),
            Slot::Record(target) => self.decode_record(target, text),
            Slot::ReadOnly => Err(Error::invalid_target("sequence element is not writable")),
        }
    }

    /// Every chunk between blank lines is one element, empty chunks included.
    /// Blank text and trailing blank lines add nothing.
    fn decode_sequence(&self, sequence: &mut dyn SequenceSlot, text: &str) -> Result<()> {
        let text = text.trim_end();
        if text.trim_start().is_empty() {
            return Ok(());
        }

        for chunk in text.split(BLOCK_SEPARATOR) {
            let chunk = chunk.trim();
            let Some(interior) = bracket_interior(chunk) else {
                sequence.push_with(&mut |element: &mut dyn Decode| {
                    self.decode_slot(element.slot(), chunk)
                })?;
                continue;
            };

            if interior.trim().is_empty() {
                continue;
            }
            for token in interior.split(LIST_SEPARATOR) {
                let token = token.trim();
                sequence.push_with(&mut |element: &mut dyn Decode| {
                    self.decode_slot(element.slot(), token)
                })?;
            }
        }
        Ok(())
    }

    fn decode_record(&self, record: &mut dyn RecordSlot, text: &str) -> Result<()> {
        for line in text.split('\n') {
            let Some((key, value)) = line.split_once(KEY_SEPARATOR) else {
                if !line.trim().is_empty() {
                    trace!(line, "skipping line without key separator");
                }
                continue;
            };

            let key = key.trim();
            let value = value.trim();
            self.descend(record, key, Path::segments(key).peekable(), value)?;
        }
        Ok(())
    }

    /// Follows `segments` down to the addressed field and assigns `value`.
    ///
    /// Returns whether anything was written.
    fn descend(
        &self,
        record: &mut dyn RecordSlot,
        key: &str,
        mut segments: Segments<'_>,
        value: &str,
    ) -> Result<bool> {
        let Some(segment) = segments.next() else {
            return Ok(false);
        };
        let Some(field) = record.field_mut(segment) else {
            return self.unknown_key(key).map(|()| false);
        };

        if segments.peek().is_none() {
            return self.assign_field(field, key, value).map(|()| true);
        }

        let vacant = field.is_vacant();
        let written = match field.slot() {
            Slot::Record(inner) => self.descend(inner, key, segments, value)?,
            _ => return Err(Error::invalid_path(key, segment)),
        };
        if vacant && !written {
            field.vacate();
        }
        Ok(written)
    }

    fn assign_field(&self, field: &mut dyn Decode, key: &str, value: &str) -> Result<()> {
        match field.slot() {
            Slot::Scalar(slot) => slot.assign(value).map_err(|err| err.at_key(key)),
            Slot::Sequence(slot) => self
                .decode_sequence(slot, value)
                .map_err(|err| err.at_key(key)),
            Slot::Custom(slot) => slot.unmarshal_plain(value),
            Slot::Record(_) | Slot::ReadOnly => Err(Error::unsettable_field(key)),
        }
    }

    fn unknown_key(&self, key: &str) -> Result<()> {
        if self.options.deny_unknown_keys {
            return Err(Error::unknown_key(key));
        }
        debug!(key, "no field matches key, skipping line");
        Ok(())
    }
}

fn bracket_interior(chunk: &str) -> Option<&str> {
    chunk.strip_prefix('[')?.strip_suffix(']')
}

/// Reads text without a target type. Every leaf comes back as text.
pub(crate) fn parse_untyped(text: &str) -> Result<Value> {
    let blocks: Vec<&str> = text
        .split(BLOCK_SEPARATOR)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();

    match blocks.as_slice() {
        [] => Ok(Value::Record(ValueMap::new())),
        [block] => parse_block(block),
        _ => blocks
            .iter()
            .map(|block| parse_block(block))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
    }
}

fn parse_block(block: &str) -> Result<Value> {
    if let Some(interior) = bracket_interior(block) {
        return Ok(text_list(interior));
    }
    if !block.contains(KEY_SEPARATOR) {
        return Ok(Value::Scalar(Scalar::Text(block.to_string())));
    }

    let mut root = ValueMap::new();
    for line in block.split('\n') {
        let Some((key, value)) = line.split_once(KEY_SEPARATOR) else {
            if !line.trim().is_empty() {
                trace!(line, "skipping line without key separator");
            }
            continue;
        };

        let key = key.trim();
        let value = value.trim();
        let leaf = match bracket_interior(value) {
            Some(interior) => text_list(interior),
            None => Value::from(value),
        };
        insert_path(&mut root, key, Path::segments(key).peekable(), leaf)?;
    }
    Ok(Value::Record(root))
}

fn text_list(interior: &str) -> Value {
    if interior.trim().is_empty() {
        return Value::Sequence(Vec::new());
    }
    Value::Sequence(
        interior
            .split(LIST_SEPARATOR)
            .map(|token| Value::from(token.trim()))
            .collect(),
    )
}

fn insert_path(map: &mut ValueMap, key: &str, mut segments: Segments<'_>, leaf: Value) -> Result<()> {
    let Some(segment) = segments.next() else {
        return Ok(());
    };

    if segments.peek().is_none() {
        map.insert(segment.to_string(), leaf);
        return Ok(());
    }

    let child = map
        .entry(segment.to_string())
        .or_insert_with(|| Value::Record(ValueMap::new()));
    match child {
        Value::Record(inner) => insert_path(inner, key, segments, leaf),
        _ => Err(Error::invalid_path(key, segment)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Unmarshal;
    use crate::{plain_custom, plain_record};

    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        name: String,
        count: u8,
    }

    plain_record!(Inner {
        name => "name",
        count => "count",
    });

    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        id: i64,
        inner: Inner,
        tags: Vec<String>,
        hidden: String,
    }

    plain_record!(Outer {
        id => "id",
        inner => "inner",
        tags => "tags",
        hidden => "-",
    });

    fn decode<T: Decode + Default>(text: &str) -> Result<T> {
        let mut target = T::default();
        Decoder::default().decode(text, &mut target)?;
        Ok(target)
    }

    #[test]
    fn test_nested_keys_and_lists() {
        let outer: Outer = decode("id: 4\ninner.name: x\ninner.count: 9\ntags: [a, b ,c]").unwrap();
        assert_eq!(
            outer,
            Outer {
                id: 4,
                inner: Inner {
                    name: "x".to_string(),
                    count: 9,
                },
                tags: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                hidden: String::new(),
            }
        );
    }

    #[test]
    fn test_value_split_at_first_colon() {
        let inner: Inner = decode("name: http://host:80").unwrap();
        assert_eq!(inner.name, "http://host:80");
    }

    #[test]
    fn test_lines_without_separator_are_skipped() {
        let inner: Inner = decode("garbage\n\nname: ok\n   \n").unwrap();
        assert_eq!(inner.name, "ok");
    }

    #[test]
    fn test_skipped_field_is_never_written() {
        let outer: Outer = decode("-: leaked\nhidden: leaked").unwrap();
        assert!(outer.hidden.is_empty());
    }

    #[test]
    fn test_parse_error_names_key() {
        let err = decode::<Outer>("inner.count: 300").unwrap_err();
        match err {
            Error::Parse { key, literal, .. } => {
                assert_eq!(key.as_str(), "inner.count");
                assert_eq!(literal, "300");
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_descending_through_scalar_is_invalid_path() {
        let err = decode::<Outer>("id.value: 1").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPath { ref key, ref segment } if key == "id.value" && segment == "id"
        ));
    }

    #[test]
    fn test_record_as_leaf_is_unsettable() {
        let err = decode::<Outer>("inner: whole").unwrap_err();
        assert!(matches!(err, Error::UnsettableField { ref key } if key == "inner"));
    }

    #[test]
    fn test_unknown_keys_denied_on_request() {
        let decoder = Decoder::new(DecodeOptions::strict());
        let mut inner = Inner::default();
        let err = decoder.decode("name: a\nnope.deeper: 1", &mut inner).unwrap_err();
        assert!(matches!(err, Error::UnknownKey { ref key } if key == "nope.deeper"));
    }

    #[test]
    fn test_sequence_grammar() {
        let numbers: Vec<i32> = decode("[1, 2]\n\n3\n\n[]\n\n").unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_every_chunk_is_one_element() {
        let words: Vec<String> = decode("\n\na\n\n\n\nb\n\n").unwrap();
        assert_eq!(words, vec!["", "a", "", "b"]);

        let none: Vec<String> = decode(" \n\n \n").unwrap();
        assert!(none.is_empty());
    }

    #[derive(Debug, Default, PartialEq)]
    struct Holder {
        extra: Option<Inner>,
    }

    plain_record!(Holder { extra => "extra" });

    #[test]
    fn test_unknown_key_under_absent_record_leaves_it_absent() {
        let holder: Holder = decode("extra.stale: 1").unwrap();
        assert_eq!(holder.extra, None);

        let holder: Holder = decode("extra.stale: 1\nextra.name: n").unwrap();
        assert_eq!(holder.extra.map(|inner| inner.name), Some("n".to_string()));
    }

    #[test]
    fn test_sequence_appends_to_existing() {
        let mut numbers = vec![7];
        Decoder::default().decode("8\n\n9", &mut numbers).unwrap();
        assert_eq!(numbers, vec![7, 8, 9]);
    }

    #[derive(Debug, Default, PartialEq)]
    struct Csv(Vec<String>);

    impl Unmarshal for Csv {
        fn unmarshal_plain(&mut self, text: &str) -> Result<()> {
            self.0 = text.split(';').map(str::to_string).collect();
            Ok(())
        }
    }

    plain_custom!(decode Csv);

    #[test]
    fn test_root_override_receives_raw_text() {
        let csv: Csv = decode("a;b\n\nc").unwrap();
        assert_eq!(csv.0, vec!["a", "b\n\nc"]);
    }

    #[test]
    fn test_parse_untyped_shapes() {
        assert_eq!(parse_untyped("").unwrap(), Value::Record(ValueMap::new()));
        assert_eq!(parse_untyped("just text").unwrap(), Value::from("just text"));
        assert_eq!(parse_untyped("[x, y]").unwrap(), Value::from(vec!["x", "y"]));

        let blocks = parse_untyped("a: 1\n\na: 2").unwrap();
        assert_eq!(blocks.as_sequence().map(Vec::len), Some(2));
    }

    #[test]
    fn test_parse_untyped_rejects_path_through_leaf() {
        let err = parse_untyped("a: 1\na.b: 2").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { ref segment, .. } if segment == "a"));
    }
}
