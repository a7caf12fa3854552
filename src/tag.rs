//! Field tags and dotted paths.
//!
//! A [`Tag`] decides whether a field takes part in encoding and decoding, and
//! under which name. A [`Path`] is the dot-joined chain of tags leading to a
//! field from the document root.
//!
//! ```rust
//! use plainkv::{Path, Tag};
//!
//! assert_eq!(Tag::parse("name"), Tag::Name("name"));
//! assert_eq!(Tag::parse("-"), Tag::Skip);
//! assert_eq!(Tag::parse(""), Tag::Absent);
//!
//! let path = Path::root().child("sub").child("name");
//! assert_eq!(path.as_str(), "sub.name");
//! ```

use std::fmt;

/// Marker excluding a field from the codec.
pub const SKIP_MARKER: &str = "-";

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// The externally supplied name of a field.
///
/// Only [`Tag::Name`] fields exist from the codec's point of view. An absent tag is
/// never defaulted to the field's identifier: emitted keys stay explicit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag<'a> {
    Name(&'a str),
    Skip,
    Absent,
}

impl<'a> Tag<'a> {
    /// Interprets a raw tag string.
    #[must_use]
    pub const fn parse(raw: &'a str) -> Self {
        match raw.as_bytes() {
            [] => Tag::Absent,
            [b'-'] => Tag::Skip,
            _ => Tag::Name(raw),
        }
    }

    /// Interprets a `plain` tag, falling back to the `form` tag when the
    /// `plain` one is empty.
    ///
    /// ```rust
    /// use plainkv::Tag;
    ///
    /// assert_eq!(Tag::resolve("", "name"), Tag::Name("name"));
    /// assert_eq!(Tag::resolve("-", "name"), Tag::Skip);
    /// assert_eq!(Tag::resolve("", ""), Tag::Absent);
    /// ```
    #[must_use]
    pub const fn resolve(plain: &'a str, form: &'a str) -> Self {
        if plain.is_empty() {
            Tag::parse(form)
        } else {
            Tag::parse(plain)
        }
    }

    /// Returns the field name if the field is included.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> Option<&'a str> {
        match self {
            Tag::Name(name) => Some(name),
            Tag::Skip | Tag::Absent => None,
        }
    }

    /// Case-insensitive match against one decoded path segment.
    ///
    /// Skipped and absent tags never match.
    ///
    /// ```rust
    /// use plainkv::Tag;
    ///
    /// assert!(Tag::Name("Name").matches("nAME"));
    /// assert!(!Tag::Skip.matches("-"));
    /// ```
    #[must_use]
    pub fn matches(&self, segment: &str) -> bool {
        match self {
            Tag::Name(name) => name
                .chars()
                .flat_map(char::to_lowercase)
                .eq(segment.chars().flat_map(char::to_lowercase)),
            Tag::Skip | Tag::Absent => false,
        }
    }
}

/// A dot-joined sequence of tag segments. The empty path is the document root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(String);

impl Path {
    #[must_use]
    pub const fn root() -> Self {
        Path(String::new())
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a segment: `""` + `tag` is `tag`, anything else gets a `.` between.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        if self.is_root() {
            return Path(segment.to_string());
        }
        let mut joined = String::with_capacity(self.0.len() + 1 + segment.len());
        joined.push_str(&self.0);
        joined.push(PATH_SEPARATOR);
        joined.push_str(segment);
        Path(joined)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits a decoded key into its segments.
    pub fn segments(key: &str) -> std::str::Split<'_, char> {
        key.split(PATH_SEPARATOR)
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Path(value.to_string())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parse() {
        assert_eq!(Tag::parse("age"), Tag::Name("age"));
        assert_eq!(Tag::parse("-"), Tag::Skip);
        assert_eq!(Tag::parse(""), Tag::Absent);
        assert_eq!(Tag::parse("--"), Tag::Name("--"));
    }

    #[test]
    fn test_tag_resolve_prefers_plain() {
        const TAG: Tag<'static> = Tag::resolve("plain_name", "form_name");
        assert_eq!(TAG, Tag::Name("plain_name"));
        assert_eq!(Tag::resolve("", "form_name"), Tag::Name("form_name"));
        assert_eq!(Tag::resolve("", "-"), Tag::Skip);
    }

    #[test]
    fn test_tag_matching_ignores_case() {
        assert!(Tag::Name("time_utc").matches("TIME_UTC"));
        assert!(Tag::Name("Ärger").matches("äRGER"));
        assert!(!Tag::Name("name").matches("names"));
        assert!(!Tag::Absent.matches(""));
    }

    #[test]
    fn test_path_child() {
        let root = Path::root();
        assert!(root.is_root());
        assert_eq!(root.child("a").as_str(), "a");
        assert_eq!(root.child("a").child("b").child("c").as_str(), "a.b.c");
    }

    #[test]
    fn test_path_segments() {
        let segments: Vec<_> = Path::segments("sub.inner.name").collect();
        assert_eq!(segments, vec!["sub", "inner", "name"]);
        let single: Vec<_> = Path::segments("name").collect();
        assert_eq!(single, vec!["name"]);
    }
}
