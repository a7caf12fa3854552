//! [`Encode`] and [`Decode`] for standard library and ecosystem types.

use crate::node::{Decode, Encode, Node, ScalarSlot, SequenceSlot, Slot};
use crate::scalar::{parse_bool, parse_number, parse_timestamp, Scalar, ScalarKind};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

macro_rules! scalar_decode {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Scalar(self)
                }
            }
        )*
    };
}

macro_rules! signed_impls {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn encode_node(&self) -> Result<Node<'_>> {
                    Ok(Node::Scalar(Scalar::Int(*self as i64)))
                }
            }

            impl ScalarSlot for $ty {
                fn assign(&mut self, literal: &str) -> Result<()> {
                    *self = parse_number(ScalarKind::Integer, literal)?;
                    Ok(())
                }
            }
        )*
        scalar_decode!($($ty),*);
    };
}

macro_rules! unsigned_impls {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn encode_node(&self) -> Result<Node<'_>> {
                    Ok(Node::Scalar(Scalar::UInt(*self as u64)))
                }
            }

            impl ScalarSlot for $ty {
                fn assign(&mut self, literal: &str) -> Result<()> {
                    *self = parse_number(ScalarKind::Integer, literal)?;
                    Ok(())
                }
            }
        )*
        scalar_decode!($($ty),*);
    };
}

signed_impls!(i8, i16, i32, i64, isize);
unsigned_impls!(u8, u16, u32, u64, usize);

impl Encode for f64 {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::Scalar(Scalar::Float(*self)))
    }
}

impl ScalarSlot for f64 {
    fn assign(&mut self, literal: &str) -> Result<()> {
        *self = parse_number(ScalarKind::Float, literal)?;
        Ok(())
    }
}

impl Encode for f32 {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::Scalar(Scalar::Float32(*self)))
    }
}

impl ScalarSlot for f32 {
    fn assign(&mut self, literal: &str) -> Result<()> {
        *self = parse_number(ScalarKind::Float, literal)?;
        Ok(())
    }
}

impl Encode for bool {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::Scalar(Scalar::Bool(*self)))
    }
}

impl ScalarSlot for bool {
    fn assign(&mut self, literal: &str) -> Result<()> {
        *self = parse_bool(literal)?;
        Ok(())
    }
}

impl Encode for str {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::Scalar(Scalar::Text(self.to_string())))
    }
}

impl Encode for String {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::Scalar(Scalar::Text(self.clone())))
    }
}

impl ScalarSlot for String {
    fn assign(&mut self, literal: &str) -> Result<()> {
        literal.clone_into(self);
        Ok(())
    }
}

impl Encode for char {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::Scalar(Scalar::Text(self.to_string())))
    }
}

impl ScalarSlot for char {
    fn assign(&mut self, literal: &str) -> Result<()> {
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                *self = ch;
                Ok(())
            }
            _ => Err(Error::parse(
                ScalarKind::Text,
                literal,
                "expected exactly one character",
            )),
        }
    }
}

impl Encode for DateTime<Utc> {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::Scalar(Scalar::Timestamp(*self)))
    }
}

impl ScalarSlot for DateTime<Utc> {
    fn assign(&mut self, literal: &str) -> Result<()> {
        *self = parse_timestamp(literal)?;
        Ok(())
    }
}

impl Encode for BigInt {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::Scalar(Scalar::BigInt(self.clone())))
    }
}

impl ScalarSlot for BigInt {
    fn assign(&mut self, literal: &str) -> Result<()> {
        *self = parse_number(ScalarKind::Integer, literal)?;
        Ok(())
    }
}

scalar_decode!(f32, f64, bool, String, char, DateTime<Utc>, BigInt);

impl<T: Encode> Encode for [T] {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::sequence(self))
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::sequence(self))
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::sequence(self))
    }
}

impl<T: Decode + Default> Decode for Vec<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}

impl<T: Decode + Default> SequenceSlot for Vec<T> {
    fn push_with(&mut self, fill: &mut dyn FnMut(&mut dyn Decode) -> Result<()>) -> Result<()> {
        let mut element = T::default();
        fill(&mut element)?;
        self.push(element);
        Ok(())
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode_node(&self) -> Result<Node<'_>> {
        Ok(Node::sequence(self))
    }
}

impl<T: Decode + Default> Decode for VecDeque<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}

impl<T: Decode + Default> SequenceSlot for VecDeque<T> {
    fn push_with(&mut self, fill: &mut dyn FnMut(&mut dyn Decode) -> Result<()>) -> Result<()> {
        let mut element = T::default();
        fill(&mut element)?;
        self.push_back(element);
        Ok(())
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode_node(&self) -> Result<Node<'_>> {
        (**self).encode_node()
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    fn encode_node(&self) -> Result<Node<'_>> {
        (**self).encode_node()
    }
}

impl<T: Decode + ?Sized> Decode for &mut T {
    fn slot(&mut self) -> Slot<'_> {
        (**self).slot()
    }

    fn is_vacant(&self) -> bool {
        (**self).is_vacant()
    }

    fn vacate(&mut self) {
        (**self).vacate();
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode_node(&self) -> Result<Node<'_>> {
        (**self).encode_node()
    }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        (**self).slot()
    }

    fn is_vacant(&self) -> bool {
        (**self).is_vacant()
    }

    fn vacate(&mut self) {
        (**self).vacate();
    }
}

impl<T: Encode + ?Sized> Encode for Rc<T> {
    fn encode_node(&self) -> Result<Node<'_>> {
        (**self).encode_node()
    }
}

impl<T: Decode + ?Sized> Decode for Rc<T> {
    fn slot(&mut self) -> Slot<'_> {
        match Rc::get_mut(self) {
            Some(inner) => inner.slot(),
            None => Slot::ReadOnly,
        }
    }

    fn is_vacant(&self) -> bool {
        (**self).is_vacant()
    }

    fn vacate(&mut self) {
        if let Some(inner) = Rc::get_mut(self) {
            inner.vacate();
        }
    }
}

impl<T: Encode + ?Sized> Encode for Arc<T> {
    fn encode_node(&self) -> Result<Node<'_>> {
        (**self).encode_node()
    }
}

impl<T: Decode + ?Sized> Decode for Arc<T> {
    fn slot(&mut self) -> Slot<'_> {
        match Arc::get_mut(self) {
            Some(inner) => inner.slot(),
            None => Slot::ReadOnly,
        }
    }

    fn is_vacant(&self) -> bool {
        (**self).is_vacant()
    }

    fn vacate(&mut self) {
        if let Some(inner) = Arc::get_mut(self) {
            inner.vacate();
        }
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode_node(&self) -> Result<Node<'_>> {
        match self {
            Some(inner) => inner.encode_node(),
            None => Ok(Node::Nil),
        }
    }
}

/// `None` is filled with `T::default()` before decoding into it. A record path
/// that ends up writing nothing puts it back to `None`.
impl<T: Decode + Default> Decode for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        self.get_or_insert_with(T::default).slot()
    }

    fn is_vacant(&self) -> bool {
        self.is_none()
    }

    fn vacate(&mut self) {
        *self = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_slots_reject_out_of_range() {
        let mut small = 0u8;
        assert!(small.assign("255").is_ok());
        assert_eq!(small, 255);
        assert!(small.assign("256").is_err());
        assert!(small.assign("-1").is_err());
    }

    #[test]
    fn test_char_slot() {
        let mut ch = 'a';
        ch.assign("z").unwrap();
        assert_eq!(ch, 'z');
        assert!(ch.assign("zz").is_err());
        assert!(ch.assign("").is_err());
    }

    #[test]
    fn test_bigint_slot() {
        let mut big = BigInt::default();
        big.assign("123456789012345678901234567890").unwrap();
        assert_eq!(big.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_option_encodes_nil_when_absent() {
        let absent: Option<i32> = None;
        assert!(matches!(absent.encode_node(), Ok(Node::Nil)));
        let present = Some(3);
        assert!(matches!(present.encode_node(), Ok(Node::Scalar(Scalar::Int(3)))));
    }

    #[test]
    fn test_option_vacancy() {
        let mut absent: Option<i32> = None;
        assert!(absent.is_vacant());
        assert!(matches!(absent.slot(), Slot::Scalar(_)));
        assert_eq!(absent, Some(0));
        absent.vacate();
        assert_eq!(absent, None);

        let boxed = Box::new(Some(1u8));
        assert!(!boxed.is_vacant());
    }

    #[test]
    fn test_shared_rc_is_read_only() {
        let mut shared = Rc::new(5i64);
        let _other = Rc::clone(&shared);
        assert!(matches!(shared.slot(), Slot::ReadOnly));
    }

    #[test]
    fn test_vec_push_with_discards_failed_elements() {
        let mut numbers: Vec<i32> = Vec::new();
        let result = numbers.push_with(&mut |elem| match elem.slot() {
            Slot::Scalar(slot) => slot.assign("nope"),
            _ => Ok(()),
        });
        assert!(result.is_err());
        assert!(numbers.is_empty());
    }
}
