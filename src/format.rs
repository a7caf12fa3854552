//! The plain text format.
//!
//! # Overview
//!
//! A document is either a single block or several blocks separated by one blank
//! line. Trailing blank lines are trimmed from encoded output.
//!
//! # Blocks
//!
//! A record block holds one `path: value` line per included field, in
//! declaration order:
//!
//! ```text
//! name: test
//! age: 35
//! ```
//!
//! A scalar block is just the value at the root, or `path: value` below it.
//!
//! # Paths
//!
//! Nested records contribute their tag as a prefix, joined with `.`:
//!
//! ```text
//! name: test
//! sub.name: test2
//! sub.age: 36
//! ```
//!
//! When decoding, each segment is matched case-insensitively against the tags of
//! the record at that level. Order has no meaning on decode.
//!
//! ```rust
//! use plainkv::{from_str, plain_record};
//!
//! #[derive(Default)]
//! struct Sub { name: String }
//! #[derive(Default)]
//! struct Top { sub: Sub }
//!
//! plain_record!(Sub { name => "name" });
//! plain_record!(Top { sub => "sub" });
//!
//! let top: Top = from_str("Sub.NAME: test2").unwrap();
//! assert_eq!(top.sub.name, "test2");
//! ```
//!
//! # Sequences
//!
//! There are two forms, and they are not interchangeable:
//!
//! - inside a field, a sequence is one bracketed line: `names: [test1, test2]`
//! - at the document root, a sequence is one block per element
//!
//! ```text
//! name: test1
//! age: 35
//!
//! name: test2
//! age: 36
//! ```
//!
//! The decoder accepts both at the root: a bracketed chunk adds one element per
//! comma-separated token, any other chunk adds exactly one element. An empty
//! chunk is an empty element; only blank text and trailing blank lines add
//! nothing.
//!
//! ```rust
//! use plainkv::from_str;
//!
//! let numbers: Vec<u8> = from_str("[1, 2]\n\n3").unwrap();
//! assert_eq!(numbers, vec![1, 2, 3]);
//!
//! let words: Vec<String> = from_str("\n\na\n\n").unwrap();
//! assert_eq!(words, vec!["", "a"]);
//! ```
//!
//! # Tags
//!
//! | Tag | Effect |
//! |-----|--------|
//! | `"name"` | field is written and read as `name` |
//! | `"-"` | field is never written or read |
//! | absent | same as `"-"` |
//! | `form "name"` | used when the plain tag is empty |
//!
//! # Scalars
//!
//! See [`crate::scalar`] for the literal forms of each kind.
//!
//! # Tolerance
//!
//! - lines without a `:` are skipped
//! - keys matching no field are skipped, at any depth
//! - a value that does not parse on a key that *does* match aborts the decode
//!
//! # Limits
//!
//! Nothing is quoted or escaped. A text value containing `\n`, or a sequence
//! element containing `,`, `[` or `]`, will not read back as written. Sequences
//! of sequences flatten on decode.
