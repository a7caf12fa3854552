/// Builds a [`Value`](crate::Value) from a literal description.
///
/// ```rust
/// use plainkv::{plain, to_string};
///
/// let doc = plain!({
///     "name": "test",
///     "sub": { "name": "test2" },
///     "tags": ["a", "b"]
/// });
/// assert_eq!(to_string(&doc).unwrap(), "name: test\nsub.name: test2\ntags: [a, b]");
/// ```
#[macro_export]
macro_rules! plain {
    (nil) => {
        $crate::Value::Nil
    };

    ([]) => {
        $crate::Value::Sequence(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(::std::vec![$($crate::plain!($elem)),*])
    };

    ({}) => {
        $crate::Value::Record($crate::ValueMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut record = $crate::ValueMap::new();
        $(
            record.insert($key.to_string(), $crate::plain!($value));
        )*
        $crate::Value::Record(record)
    }};

    ($scalar:expr) => {
        $crate::Value::from($scalar)
    };
}

/// Implements [`Record`](crate::Record) from a list of `field => "tag"` pairs.
///
/// A field listed without a tag is untagged and, like a `"-"` field, invisible
/// to the codec. `field => form "tag"` takes the tag from the `form`
/// namespace, and `field => "tag" form "other"` uses `"other"` only when
/// `"tag"` is empty. Use this directly when the type also supplies its own
/// [`Encode`](crate::Encode) or [`Decode`](crate::Decode), for instance through
/// [`plain_custom!`](crate::plain_custom); otherwise reach for
/// [`plain_record!`](crate::plain_record).
///
/// Prefix the type with `encode` or `decode` to build a one-way table whose
/// fields only need [`Encode`](crate::Encode) or [`Decode`](crate::Decode).
///
/// ```rust
/// use plainkv::{plain_fields, Record, Tag};
///
/// struct Point {
///     x: i32,
///     y: i32,
///     scratch: i32,
/// }
///
/// plain_fields!(Point { x => "x", y => form "y", scratch });
///
/// let tags: Vec<Tag> = Point::fields().iter().map(|def| def.tag).collect();
/// assert_eq!(tags, vec![Tag::Name("x"), Tag::Name("y"), Tag::Absent]);
///
/// struct Label {
///     text: &'static str,
/// }
///
/// plain_fields!(encode Label { text => "text" });
/// assert!(Label::fields()[0].get_mut.is_none());
/// ```
#[macro_export]
macro_rules! plain_fields {
    (encode $ty:ty { $($body:tt)* }) => {
        $crate::plain_fields!(@table encode $ty { $($body)* });
    };

    (decode $ty:ty { $($body:tt)* }) => {
        $crate::plain_fields!(@table decode $ty { $($body)* });
    };

    (@table $mode:ident $ty:ty {
        $($field:ident $(=> $($tag:literal)? $(form $form:literal)?)?),* $(,)?
    }) => {
        impl $crate::Record for $ty {
            fn fields() -> &'static [$crate::FieldDef<Self>] {
                static FIELDS: &[$crate::FieldDef<$ty>] = &[
                    $(
                        $crate::__plain_def!(
                            $mode $ty,
                            $field,
                            $crate::__plain_tag!($($($tag)? $(form $form)?)?)
                        ),
                    )*
                ];
                FIELDS
            }
        }
    };

    ($ty:ty { $($body:tt)* }) => {
        $crate::plain_fields!(@table both $ty { $($body)* });
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __plain_def {
    (both $ty:ty, $field:ident, $tag:expr) => {
        $crate::FieldDef::<$ty>::new(
            $tag,
            |record| &record.$field,
            |record| &mut record.$field,
        )
    };
    (encode $ty:ty, $field:ident, $tag:expr) => {
        $crate::FieldDef::<$ty>::encode_only($tag, |record| &record.$field)
    };
    (decode $ty:ty, $field:ident, $tag:expr) => {
        $crate::FieldDef::<$ty>::decode_only($tag, |record| &mut record.$field)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __plain_tag {
    () => {
        $crate::Tag::Absent
    };
    (form $form:literal) => {
        $crate::Tag::resolve("", $form)
    };
    ($tag:literal form $form:literal) => {
        $crate::Tag::resolve($tag, $form)
    };
    ($tag:literal) => {
        $crate::Tag::parse($tag)
    };
}

/// Describes a struct as a plain record: [`Record`](crate::Record),
/// [`Encode`](crate::Encode) and [`Decode`](crate::Decode) in one go.
///
/// `plain_record!(encode T { .. })` and `plain_record!(decode T { .. })`
/// describe a record that only goes one way, so its fields may be encode-only
/// or decode-only types.
///
/// ```rust
/// use plainkv::{from_str, plain_record, to_string};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct User {
///     name: String,
///     age: i64,
///     password: String,
/// }
///
/// plain_record!(User {
///     name => "name",
///     age => "age",
///     password => "-",
/// });
///
/// let user = User { name: "test".into(), age: 35, password: "hunter2".into() };
/// let text = to_string(&user).unwrap();
/// assert_eq!(text, "name: test\nage: 35");
///
/// let back: User = from_str(&text).unwrap();
/// assert_eq!(back, User { password: String::new(), ..user });
///
/// struct Banner {
///     title: &'static str,
///     sizes: [u8; 2],
/// }
///
/// plain_record!(encode Banner { title => "title", sizes => "sizes" });
///
/// let banner = Banner { title: "hello", sizes: [1, 2] };
/// assert_eq!(to_string(&banner).unwrap(), "title: hello\nsizes: [1, 2]");
/// ```
#[macro_export]
macro_rules! plain_record {
    (encode $ty:ty { $($body:tt)* }) => {
        $crate::plain_fields!(encode $ty { $($body)* });

        impl $crate::Encode for $ty {
            fn encode_node(&self) -> $crate::Result<$crate::Node<'_>> {
                ::std::result::Result::Ok($crate::Node::record(self))
            }
        }
    };

    (decode $ty:ty { $($body:tt)* }) => {
        $crate::plain_fields!(decode $ty { $($body)* });

        impl $crate::Decode for $ty {
            fn slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::Record(self)
            }
        }
    };

    ($ty:ty { $($body:tt)* }) => {
        $crate::plain_fields!($ty { $($body)* });

        impl $crate::Encode for $ty {
            fn encode_node(&self) -> $crate::Result<$crate::Node<'_>> {
                ::std::result::Result::Ok($crate::Node::record(self))
            }
        }

        impl $crate::Decode for $ty {
            fn slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::Record(self)
            }
        }
    };
}

/// Routes a type through its [`Marshal`](crate::Marshal) and/or
/// [`Unmarshal`](crate::Unmarshal) implementation.
///
/// - `plain_custom!(encode T)` implements [`Encode`](crate::Encode) only
/// - `plain_custom!(decode T)` implements [`Decode`](crate::Decode) only
/// - `plain_custom!(T)` implements both
///
/// ```rust
/// use plainkv::{plain_custom, plain_record, to_string, Marshal, Result, Unmarshal};
///
/// #[derive(Default)]
/// struct Celsius(f64);
///
/// impl Marshal for Celsius {
///     fn marshal_plain(&self) -> Result<String> {
///         Ok(format!("{}C", self.0))
///     }
/// }
///
/// impl Unmarshal for Celsius {
///     fn unmarshal_plain(&mut self, text: &str) -> Result<()> {
///         let number = text.trim_end_matches('C');
///         self.0 = number.parse().map_err(plainkv::Error::custom)?;
///         Ok(())
///     }
/// }
///
/// plain_custom!(Celsius);
///
/// #[derive(Default)]
/// struct Reading {
///     temp: Celsius,
/// }
///
/// plain_record!(Reading { temp => "temp" });
///
/// assert_eq!(to_string(&Reading { temp: Celsius(21.5) }).unwrap(), "temp: 21.5C");
/// ```
#[macro_export]
macro_rules! plain_custom {
    (encode $ty:ty) => {
        impl $crate::Encode for $ty {
            fn encode_node(&self) -> $crate::Result<$crate::Node<'_>> {
                ::std::result::Result::Ok($crate::Node::Custom(
                    $crate::Marshal::marshal_plain(self)?,
                ))
            }
        }
    };

    (decode $ty:ty) => {
        impl $crate::Decode for $ty {
            fn slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::Custom(self)
            }
        }
    };

    ($ty:ty) => {
        $crate::plain_custom!(encode $ty);
        $crate::plain_custom!(decode $ty);
    };
}
