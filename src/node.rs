//! The shared data model walked by both the encoder and the decoder.
//!
//! Types describe themselves explicitly instead of being inspected at runtime:
//!
//! - [`Encode`] hands the encoder a read-only [`Node`] view of a value
//! - [`Decode`] hands the decoder a mutable [`Slot`] view of a target
//! - [`Record`] lists a record's fields as a static table of [`FieldDef`]
//!   entries, normally generated by [`plain_record!`](crate::plain_record). A
//!   field may carry only a getter or only a setter, so encode-only and
//!   decode-only types can still be fields
//! - [`Marshal`] / [`Unmarshal`] are the override capability: a value that
//!   reports [`Node::Custom`] or [`Slot::Custom`] is never traversed
//!
//! Both views are resolved once per node, so an override always takes
//! precedence over any fields the type may also describe.

use crate::scalar::Scalar;
use crate::tag::Tag;
use crate::Result;

/// Read-only view of one value, as seen by the encoder.
pub enum Node<'a> {
    Scalar(Scalar),
    /// Fields in declaration order, including skipped and untagged ones.
    Record(Vec<FieldRef<'a>>),
    Sequence(Vec<&'a dyn Encode>),
    /// Output of an override; the value's internals stay invisible.
    Custom(String),
    /// An absent reference.
    Nil,
}

impl<'a> Node<'a> {
    /// Builds the record view of `record` from its field table.
    pub fn record<R: Record>(record: &'a R) -> Self {
        Node::Record(
            R::fields()
                .iter()
                .filter_map(|def| {
                    let get = def.get?;
                    Some(FieldRef {
                        tag: def.tag,
                        value: get(record),
                    })
                })
                .collect(),
        )
    }

    /// Builds a sequence view over any iterator of encodable elements.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: Encode + 'a,
    {
        Node::Sequence(items.into_iter().map(|item| item as &dyn Encode).collect())
    }
}

/// One field of a [`Node::Record`].
pub struct FieldRef<'a> {
    pub tag: Tag<'a>,
    pub value: &'a dyn Encode,
}

impl<'a> FieldRef<'a> {
    pub fn new(tag: Tag<'a>, value: &'a dyn Encode) -> Self {
        FieldRef { tag, value }
    }
}

/// Mutable view of one decode target.
pub enum Slot<'a> {
    Scalar(&'a mut dyn ScalarSlot),
    Record(&'a mut dyn RecordSlot),
    Sequence(&'a mut dyn SequenceSlot),
    /// The target decodes itself from the raw text.
    Custom(&'a mut dyn Unmarshal),
    /// The target exists but cannot be written through this handle.
    ReadOnly,
}

/// A value the encoder can walk.
pub trait Encode {
    fn encode_node(&self) -> Result<Node<'_>>;
}

/// A target the decoder can write.
pub trait Decode {
    fn slot(&mut self) -> Slot<'_>;

    /// Whether [`Decode::slot`] would have to create storage first.
    fn is_vacant(&self) -> bool {
        false
    }

    /// Drops storage created by [`Decode::slot`] on a descent that wrote nothing.
    fn vacate(&mut self) {}
}

/// Scalar storage that parses a trimmed literal into itself.
pub trait ScalarSlot {
    fn assign(&mut self, literal: &str) -> Result<()>;
}

/// Record storage addressed by tag.
pub trait RecordSlot {
    /// Returns the first included field whose tag matches `segment`
    /// case-insensitively, in declaration order.
    fn field_mut(&mut self, segment: &str) -> Option<&mut dyn Decode>;
}

/// Growable sequence storage.
pub trait SequenceSlot {
    /// Creates a fresh element, lets `fill` decode into it, then appends it.
    ///
    /// Nothing is appended when `fill` fails.
    fn push_with(&mut self, fill: &mut dyn FnMut(&mut dyn Decode) -> Result<()>) -> Result<()>;
}

/// Custom encode routine replacing default traversal.
pub trait Marshal {
    fn marshal_plain(&self) -> Result<String>;
}

/// Custom decode routine replacing default traversal.
///
/// Receives the text exactly as it reached this value: the whole document at the
/// root, or the trimmed value of the matched line for a field.
pub trait Unmarshal {
    fn unmarshal_plain(&mut self, text: &str) -> Result<()>;
}

/// A record's field table.
///
/// Implemented through [`plain_record!`](crate::plain_record) or
/// [`plain_fields!`](crate::plain_fields); hand-written tables are usually a
/// `static` built from [`FieldDef::new`], [`FieldDef::encode_only`] and
/// [`FieldDef::decode_only`].
pub trait Record: Sized + 'static {
    fn fields() -> &'static [FieldDef<Self>];
}

/// Tag, getter and setter for one field of `R`.
///
/// A field without a getter is invisible to the encoder; one without a setter
/// is invisible to the decoder.
pub struct FieldDef<R> {
    pub tag: Tag<'static>,
    pub get: Option<fn(&R) -> &dyn Encode>,
    pub get_mut: Option<fn(&mut R) -> &mut dyn Decode>,
}

impl<R> FieldDef<R> {
    pub const fn new(
        tag: Tag<'static>,
        get: fn(&R) -> &dyn Encode,
        get_mut: fn(&mut R) -> &mut dyn Decode,
    ) -> Self {
        FieldDef {
            tag,
            get: Some(get),
            get_mut: Some(get_mut),
        }
    }

    pub const fn encode_only(tag: Tag<'static>, get: fn(&R) -> &dyn Encode) -> Self {
        FieldDef {
            tag,
            get: Some(get),
            get_mut: None,
        }
    }

    pub const fn decode_only(tag: Tag<'static>, get_mut: fn(&mut R) -> &mut dyn Decode) -> Self {
        FieldDef {
            tag,
            get: None,
            get_mut: Some(get_mut),
        }
    }
}

impl<R: Record> RecordSlot for R {
    fn field_mut(&mut self, segment: &str) -> Option<&mut dyn Decode> {
        let get_mut = R::fields()
            .iter()
            .filter(|def| def.tag.matches(segment))
            .find_map(|def| def.get_mut)?;
        Some(get_mut(self))
    }
}
