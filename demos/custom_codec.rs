//! Overrides, timestamp formats and dynamic values.
//!
//! Run with: cargo run --example custom_codec

use chrono::{TimeZone, Utc};
use plainkv::{
    from_str, plain, plain_custom, plain_record, to_string, to_string_serde,
    to_string_with_options, EncodeOptions, Error, Marshal, Result, TimestampFormat, Unmarshal,
    Value,
};
use serde::Serialize;

/// A semantic version that reads and writes itself as `MAJOR.MINOR.PATCH`.
#[derive(Debug, Default, PartialEq)]
struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

impl Marshal for Version {
    fn marshal_plain(&self) -> Result<String> {
        Ok(format!("{}.{}.{}", self.major, self.minor, self.patch))
    }
}

impl Unmarshal for Version {
    fn unmarshal_plain(&mut self, text: &str) -> Result<()> {
        let mut parts = text.trim().splitn(3, '.').map(str::parse::<u32>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch))) => {
                *self = Version {
                    major,
                    minor,
                    patch,
                };
                Ok(())
            }
            _ => Err(Error::custom(format!("`{}` is not MAJOR.MINOR.PATCH", text))),
        }
    }
}

plain_custom!(Version);

#[derive(Debug, Default, PartialEq)]
struct Release {
    name: String,
    version: Version,
    published: chrono::DateTime<Utc>,
}

plain_record!(Release {
    name => "name",
    version => "version",
    published => "published",
});

#[derive(Serialize)]
struct Build {
    target: String,
    #[serde(rename = "-")]
    cache_dir: String,
    jobs: u8,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let release = Release {
        name: "plainkv".to_string(),
        version: Version {
            major: 0,
            minor: 1,
            patch: 0,
        },
        published: Utc
            .with_ymd_and_hms(2024, 5, 3, 1, 4, 0)
            .single()
            .ok_or("invalid publish date")?,
    };

    // The version field is written by its own Marshal impl
    let text = to_string(&release)?;
    println!("Default timestamps:\n{}\n", text);

    let rfc = EncodeOptions::new().with_timestamp_format(TimestampFormat::Rfc3339);
    println!("RFC 3339 timestamps:\n{}\n", to_string_with_options(&release, rfc)?);

    let back: Release = from_str(&text)?;
    assert_eq!(back, release);
    println!("✓ Round-trip successful\n");

    match from_str::<Release>("version: one.two") {
        Err(err) => println!("Override error passed through: {}\n", err),
        Ok(_) => println!("Unexpectedly accepted a bad version\n"),
    }

    // Dynamic values need no schema
    let value: Value = from_str("name: demo\nlimits.cpu: 2\nlimits.memory: 512M\nzones: [a, b]")?;
    println!("Untyped decode: {:?}\n", value);

    let built = plain!({
        "service": "api",
        "limits": { "cpu": 4 },
        "zones": ["eu", "us"]
    });
    println!("Built with plain!:\n{}\n", to_string(&built)?);

    // Any Serialize type can go through the serde bridge
    let build = Build {
        target: "x86_64-unknown-linux-gnu".to_string(),
        cache_dir: "/tmp/cache".to_string(),
        jobs: 8,
    };
    println!("Serde bridge:\n{}", to_string_serde(&build)?);

    Ok(())
}
