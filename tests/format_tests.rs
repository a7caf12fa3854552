//! Wire format conformance: paths, both sequence grammars, scalar literals and
//! the decoder's tolerance rules.

use chrono::{DateTime, TimeZone, Utc};
use plainkv::{
    decode_into, from_str, from_str_with_options, plain_custom, plain_record, to_string,
    to_string_with_options, DecodeOptions, EncodeOptions, Error, Marshal, Result,
    TimestampFormat, Unmarshal, Value,
};

#[derive(Debug, Default, PartialEq)]
struct Leaf {
    name: String,
    tags: Vec<String>,
}

plain_record!(Leaf { name => "name", tags => "tags" });

#[derive(Debug, Default, PartialEq)]
struct Branch {
    label: String,
    leaf: Leaf,
}

plain_record!(Branch { label => "label", leaf => "leaf" });

#[derive(Debug, Default, PartialEq)]
struct Tree {
    root: Branch,
    weight: f32,
}

plain_record!(Tree { root => "root", weight => "weight" });

fn sample_tree() -> Tree {
    Tree {
        root: Branch {
            label: "top".to_string(),
            leaf: Leaf {
                name: "deep".to_string(),
                tags: vec!["x".to_string(), "y".to_string()],
            },
        },
        weight: 0.5,
    }
}

#[test]
fn test_paths_join_every_level() {
    assert_eq!(
        to_string(&sample_tree()).unwrap(),
        "root.label: top\nroot.leaf.name: deep\nroot.leaf.tags: [x, y]\nweight: 0.5"
    );
}

#[test]
fn test_three_level_round_trip() {
    let text = to_string(&sample_tree()).unwrap();
    let back: Tree = from_str(&text).unwrap();
    assert_eq!(back, sample_tree());
}

#[test]
fn test_key_order_is_irrelevant_on_decode() {
    let back: Tree =
        from_str("weight: 0.5\nroot.leaf.tags: [x, y]\nroot.leaf.name: deep\nroot.label: top")
            .unwrap();
    assert_eq!(back, sample_tree());
}

#[test]
fn test_keys_match_case_insensitively() {
    let back: Tree = from_str("ROOT.Label: top\nRoot.LEAF.name: deep").unwrap();
    assert_eq!(back.root.label, "top");
    assert_eq!(back.root.leaf.name, "deep");
}

#[test]
fn test_whitespace_around_keys_and_values_is_trimmed() {
    let leaf: Leaf = from_str("   name   :   spaced out   \n tags :[ a ,b ]").unwrap();
    assert_eq!(leaf.name, "spaced out");
    assert_eq!(leaf.tags, vec!["a", "b"]);
}

#[test]
fn test_empty_bracket_list() {
    let leaf = Leaf {
        name: "bare".to_string(),
        tags: Vec::new(),
    };
    let text = to_string(&leaf).unwrap();
    assert_eq!(text, "name: bare\ntags: []");

    let back: Leaf = from_str(&text).unwrap();
    assert_eq!(back, leaf);
}

#[test]
fn test_blank_line_blocks_round_trip() {
    let leaves = vec![
        Leaf {
            name: "one".to_string(),
            tags: vec!["a".to_string()],
        },
        Leaf {
            name: "two".to_string(),
            tags: vec![],
        },
        Leaf {
            name: "three".to_string(),
            tags: vec!["b".to_string(), "c".to_string()],
        },
    ];
    let text = to_string(&leaves).unwrap();
    assert_eq!(
        text,
        "name: one\ntags: [a]\n\nname: two\ntags: []\n\nname: three\ntags: [b, c]"
    );

    let back: Vec<Leaf> = from_str(&text).unwrap();
    assert_eq!(back, leaves);
}

#[test]
fn test_empty_chunks_between_blocks_are_elements() {
    let back: Vec<Leaf> = from_str("\n\nname: a\n\n\n\nname: b\n\n").unwrap();
    let names: Vec<_> = back.iter().map(|leaf| leaf.name.as_str()).collect();
    assert_eq!(names, vec!["", "a", "", "b"]);
}

#[test]
fn test_leading_empty_text_element_round_trip() {
    let words = vec![String::new(), "a".to_string()];
    let text = to_string(&words).unwrap();
    assert_eq!(text, "\n\na");

    let back: Vec<String> = from_str(&text).unwrap();
    assert_eq!(back, words);
}

#[test]
fn test_scalar_sequence_forms() {
    assert_eq!(to_string(&vec![1, 2, 3]).unwrap(), "1\n\n2\n\n3");
    assert_eq!(to_string(&Vec::<i32>::new()).unwrap(), "");

    let mixed: Vec<u16> = from_str("[1, 2]\n\n3").unwrap();
    assert_eq!(mixed, vec![1, 2, 3]);
}

#[test]
fn test_top_level_empty_input() {
    let numbers: Vec<i32> = from_str("").unwrap();
    assert!(numbers.is_empty());

    let leaf: Leaf = from_str("").unwrap();
    assert_eq!(leaf, Leaf::default());
}

#[test]
fn test_lines_without_colon_are_ignored() {
    let leaf: Leaf = from_str("# comment\nname: kept\nno separator here").unwrap();
    assert_eq!(leaf.name, "kept");
}

#[test]
fn test_value_keeps_everything_after_first_colon() {
    let leaf: Leaf = from_str("name: 12:30:00").unwrap();
    assert_eq!(leaf.name, "12:30:00");
}

#[test]
fn test_boolean_literal_forms() {
    for literal in ["1", "t", "T", "TRUE", "true", "True"] {
        assert!(from_str::<bool>(literal).unwrap(), "{literal}");
    }
    for literal in ["0", "f", "F", "FALSE", "false", "False"] {
        assert!(!from_str::<bool>(literal).unwrap(), "{literal}");
    }
    assert!(matches!(from_str::<bool>("yes"), Err(Error::Parse { .. })));
}

#[test]
fn test_numeric_edges() {
    assert_eq!(from_str::<i64>("-9223372036854775808").unwrap(), i64::MIN);
    assert_eq!(from_str::<u64>("18446744073709551615").unwrap(), u64::MAX);
    assert!(from_str::<u64>("-1").is_err());
    assert!(from_str::<i32>("1.5").is_err());
    assert_eq!(to_string(&-0.25f64).unwrap(), "-0.25");
}

#[derive(Debug, Default, PartialEq)]
struct Event {
    at: DateTime<Utc>,
}

plain_record!(Event { at => "at" });

#[test]
fn test_timestamp_forms() {
    let event = Event {
        at: Utc.with_ymd_and_hms(2024, 5, 3, 1, 4, 0).unwrap(),
    };

    let plain = to_string(&event).unwrap();
    assert_eq!(plain, "at: 2024-05-03 01:04:00 +0000 UTC");

    let rfc = to_string_with_options(
        &event,
        EncodeOptions::new().with_timestamp_format(TimestampFormat::Rfc3339),
    )
    .unwrap();
    assert_eq!(rfc, "at: 2024-05-03T01:04:00Z");

    for text in [plain.as_str(), rfc.as_str(), "at: 2024-05-03 01:04:00 UTC"] {
        let back: Event = from_str(text).unwrap();
        assert_eq!(back, event, "{text}");
    }
}

#[test]
fn test_timestamp_fraction_round_trip() {
    let event = Event {
        at: Utc.timestamp_opt(1672530248, 250_000_000).unwrap(),
    };
    let text = to_string(&event).unwrap();
    assert_eq!(text, "at: 2022-12-31 23:44:08.250 +0000 UTC");
    assert_eq!(from_str::<Event>(&text).unwrap(), event);
}

#[derive(Default)]
struct Upper(String);

impl Marshal for Upper {
    fn marshal_plain(&self) -> Result<String> {
        Ok(self.0.to_uppercase())
    }
}

impl Unmarshal for Upper {
    fn unmarshal_plain(&mut self, text: &str) -> Result<()> {
        self.0 = text.to_lowercase();
        Ok(())
    }
}

plain_custom!(Upper);

#[derive(Default)]
struct Shouty {
    word: Upper,
}

plain_record!(Shouty { word => "word" });

#[derive(Default)]
struct Outer {
    inner: Shouty,
    count: u8,
}

plain_record!(Outer { inner => "inner", count => "count" });

#[test]
fn test_field_override_is_keyed_by_bare_tag() {
    let outer = Outer {
        inner: Shouty {
            word: Upper("hey".to_string()),
        },
        count: 2,
    };
    assert_eq!(to_string(&outer).unwrap(), "word: HEY\ncount: 2");
}

#[test]
fn test_field_override_decodes_from_line_value() {
    let outer: Outer = from_str("inner.word: LOUD\ncount: 1").unwrap();
    assert_eq!(outer.inner.word.0, "loud");
    assert_eq!(outer.count, 1);
}

#[test]
fn test_sequence_of_records_inside_field_encodes_sub_blocks() {
    #[derive(Default)]
    struct Shelf {
        leaves: Vec<Leaf>,
    }
    plain_record!(Shelf { leaves => "leaves" });

    let shelf = Shelf {
        leaves: vec![
            Leaf {
                name: "a".to_string(),
                tags: vec![],
            },
            Leaf {
                name: "b".to_string(),
                tags: vec!["t".to_string()],
            },
        ],
    };
    assert_eq!(
        to_string(&shelf).unwrap(),
        "leaves: [name: a\ntags: [], name: b\ntags: [t]]"
    );
}

#[test]
fn test_deny_unknown_keys_is_opt_in() {
    let text = "name: a\nlegacy_field: 1";
    assert!(from_str::<Leaf>(text).is_ok());

    let err = from_str_with_options::<Leaf>(text, DecodeOptions::strict()).unwrap_err();
    assert!(matches!(err, Error::UnknownKey { ref key } if key == "legacy_field"));

    let lenient = DecodeOptions::strict().with_deny_unknown_keys(false);
    assert!(from_str_with_options::<Leaf>(text, lenient).is_ok());
}

#[test]
fn test_existing_values_survive_partial_decode() {
    let mut tree = sample_tree();
    decode_into("root.leaf.tags: [z]\nweight: 2", &mut tree).unwrap();
    assert_eq!(tree.root.label, "top");
    assert_eq!(tree.root.leaf.tags, vec!["x", "y", "z"]);
    assert_eq!(tree.weight, 2.0);
}

#[test]
fn test_untyped_decode() {
    let value: Value = from_str("name: test\nsub.name: test2\nsub.age: 36\nnames: [a, b]").unwrap();
    assert_eq!(value.get("name").and_then(Value::as_str), Some("test"));

    let sub = value.get("sub").unwrap();
    assert!(sub.is_record());
    assert_eq!(sub.get("age").and_then(Value::as_str), Some("36"));

    let names = value.get("names").and_then(Value::as_sequence).unwrap();
    assert_eq!(names, &vec![Value::from("a"), Value::from("b")]);

    assert_eq!(
        to_string(&value).unwrap(),
        "name: test\nsub.name: test2\nsub.age: 36\nnames: [a, b]"
    );
}

#[test]
fn test_untyped_decode_of_blocks() {
    let value: Value = from_str("name: one\n\nname: two").unwrap();
    let blocks = value.as_sequence().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1].get("name").and_then(Value::as_str), Some("two"));
    assert_eq!(to_string(&value).unwrap(), "name: one\n\nname: two");
}
