use plainkv::{
    from_str, plain, plain_custom, plain_fields, plain_record, to_string, Encode, Error, Marshal,
    Node, Record, Result, Scalar, Tag, Unmarshal, Value, ValueMap,
};

#[test]
fn test_plain_macro_nil() {
    assert_eq!(plain!(nil), Value::Nil);
}

#[test]
fn test_plain_macro_scalars() {
    assert_eq!(plain!(true), Value::Scalar(Scalar::Bool(true)));
    assert_eq!(plain!(42), Value::Scalar(Scalar::Int(42)));
    assert_eq!(plain!(-123), Value::Scalar(Scalar::Int(-123)));
    assert_eq!(plain!(3.5), Value::Scalar(Scalar::Float(3.5)));
    assert_eq!(plain!("hello world"), Value::Scalar(Scalar::Text("hello world".to_string())));
    assert_eq!(plain!(""), Value::Scalar(Scalar::Text(String::new())));
}

#[test]
fn test_plain_macro_sequences() {
    assert_eq!(plain!([]), Value::Sequence(vec![]));
    assert_eq!(
        plain!(["a", "b"]),
        Value::Sequence(vec![Value::from("a"), Value::from("b")])
    );
}

#[test]
fn test_plain_macro_nested() {
    let value = plain!({
        "name": "test",
        "sub": {
            "name": "test2",
            "age": 36
        }
    });

    let mut sub = ValueMap::new();
    sub.insert("name".to_string(), Value::from("test2"));
    sub.insert("age".to_string(), Value::from(36));
    let mut root = ValueMap::new();
    root.insert("name".to_string(), Value::from("test"));
    root.insert("sub".to_string(), Value::Record(sub));

    assert_eq!(value, Value::Record(root));
    assert_eq!(to_string(&value).unwrap(), "name: test\nsub.name: test2\nsub.age: 36");
}

#[test]
fn test_plain_macro_trailing_commas() {
    let value = plain!({ "a": [1, 2,], });
    assert_eq!(to_string(&value).unwrap(), "a: [1, 2]");
}

#[derive(Debug, Default, PartialEq)]
struct Config {
    host: String,
    port: u16,
    debug: bool,
    token: String,
    scratch: Vec<u8>,
}

plain_record!(Config {
    host => "host",
    port => "port",
    debug => "Debug",
    token => "-",
    scratch,
});

#[test]
fn test_plain_record_field_table() {
    let tags: Vec<Tag> = Config::fields().iter().map(|def| def.tag).collect();
    assert_eq!(
        tags,
        vec![
            Tag::Name("host"),
            Tag::Name("port"),
            Tag::Name("Debug"),
            Tag::Skip,
            Tag::Absent,
        ]
    );
}

#[test]
fn test_plain_record_encodes_tags_as_written() {
    let config = Config {
        host: "example.org".to_string(),
        port: 8080,
        debug: true,
        token: "secret".to_string(),
        scratch: vec![1, 2],
    };
    assert_eq!(
        to_string(&config).unwrap(),
        "host: example.org\nport: 8080\nDebug: true"
    );
}

#[test]
fn test_plain_record_ignores_excluded_keys_on_decode() {
    let config: Config = from_str("host: h\nDEBUG: 1\ntoken: leaked\nscratch: [9]").unwrap();
    assert_eq!(
        config,
        Config {
            host: "h".to_string(),
            debug: true,
            ..Config::default()
        }
    );
}

#[derive(Default)]
struct Hex(u32);

impl Marshal for Hex {
    fn marshal_plain(&self) -> Result<String> {
        Ok(format!("{:#x}", self.0))
    }
}

impl Unmarshal for Hex {
    fn unmarshal_plain(&mut self, text: &str) -> Result<()> {
        let digits = text.trim_start_matches("0x");
        self.0 = u32::from_str_radix(digits, 16).map_err(Error::custom)?;
        Ok(())
    }
}

plain_custom!(Hex);

struct Color {
    rgb: Hex,
    alpha: u8,
}

plain_fields!(Color { rgb => "rgb", alpha => "alpha" });

impl Encode for Color {
    fn encode_node(&self) -> Result<Node<'_>> {
        if self.alpha == u8::MAX {
            return Ok(Node::Custom(self.rgb.marshal_plain()?));
        }
        Ok(Node::record(self))
    }
}

#[test]
fn test_hand_written_encode_over_field_table() {
    let opaque = Color {
        rgb: Hex(0xff8800),
        alpha: 255,
    };
    assert_eq!(to_string(&opaque).unwrap(), "0xff8800");

    let translucent = Color {
        rgb: Hex(0x10),
        alpha: 7,
    };
    assert_eq!(to_string(&translucent).unwrap(), "rgb: 0x10\nalpha: 7");
}

#[test]
fn test_plain_custom_decodes_inside_record() {
    #[derive(Default)]
    struct Swatch {
        rgb: Hex,
    }
    plain_record!(Swatch { rgb => "rgb" });

    let swatch: Swatch = from_str("rgb: 0xff").unwrap();
    assert_eq!(swatch.rgb.0, 255);
}

#[derive(Debug, Default, PartialEq)]
struct Legacy {
    name: String,
    age: u32,
    email: String,
    note: String,
}

plain_record!(Legacy {
    name => form "name",
    age => "years" form "age",
    email => "" form "email",
    note => "-" form "note",
});

#[test]
fn test_form_tags_fill_in_for_empty_plain_tags() {
    let tags: Vec<Tag> = Legacy::fields().iter().map(|def| def.tag).collect();
    assert_eq!(
        tags,
        vec![
            Tag::Name("name"),
            Tag::Name("years"),
            Tag::Name("email"),
            Tag::Skip,
        ]
    );

    let legacy: Legacy = from_str("name: a\nyears: 3\nemail: e@x\nnote: dropped").unwrap();
    assert_eq!(legacy.age, 3);
    assert_eq!(legacy.email, "e@x");
    assert!(legacy.note.is_empty());
}

struct Stamp(u32);

impl Marshal for Stamp {
    fn marshal_plain(&self) -> Result<String> {
        Ok(format!("#{}", self.0))
    }
}

plain_custom!(encode Stamp);

struct Entry {
    stamp: Stamp,
    title: &'static str,
}

plain_record!(encode Entry { stamp => "stamp", title => "title" });

#[test]
fn test_encode_only_record_table_has_no_setters() {
    assert!(Entry::fields()
        .iter()
        .all(|def| def.get.is_some() && def.get_mut.is_none()));

    let entry = Entry {
        stamp: Stamp(7),
        title: "first",
    };
    assert_eq!(to_string(&entry).unwrap(), "stamp: #7\ntitle: first");
}

#[test]
fn test_decode_only_record_table_has_no_getters() {
    #[derive(Default)]
    struct Gauge {
        level: Hex,
    }
    plain_fields!(decode Gauge { level => "level" });

    assert!(Gauge::fields()[0].get.is_none());
    assert!(Gauge::fields()[0].get_mut.is_some());
}
