//! Scalar values and their textual forms.
//!
//! Every leaf of an encoded document is a [`Scalar`]. Encoding renders it with
//! its default string form; decoding parses a trimmed literal back according to
//! the kind of the field it lands in.
//!
//! | Kind | Rendered as | Accepted on decode |
//! |------|-------------|--------------------|
//! | text | verbatim | verbatim |
//! | integer | base-10 | base-10, optional sign |
//! | float | shortest round-tripping decimal | base-10, `inf`, `NaN` |
//! | boolean | `true` / `false` | `1 t T TRUE true True 0 f F FALSE false False` |
//! | timestamp | see [`TimestampFormat`] | plain, RFC 3339, `YYYY-MM-DD HH:MM:SS UTC` |

use crate::options::{EncodeOptions, TimestampFormat};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use num_bigint::BigInt;
use std::fmt;
use std::str::FromStr;

const PLAIN_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.f %z UTC";
const NAIVE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.f";

/// The declared kind of a scalar field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Text,
    Integer,
    Float,
    Boolean,
    Timestamp,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Text => "text",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// A leaf value.
///
/// # Examples
///
/// ```rust
/// use plainkv::Scalar;
///
/// assert_eq!(Scalar::from(35).to_string(), "35");
/// assert_eq!(Scalar::from(35.5).to_string(), "35.5");
/// assert_eq!(Scalar::from("test").to_string(), "test");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    BigInt(BigInt),
    Float(f64),
    Float32(f32),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Text(_) => ScalarKind::Text,
            Scalar::Int(_) | Scalar::UInt(_) | Scalar::BigInt(_) => ScalarKind::Integer,
            Scalar::Float(_) | Scalar::Float32(_) => ScalarKind::Float,
            Scalar::Bool(_) => ScalarKind::Boolean,
            Scalar::Timestamp(_) => ScalarKind::Timestamp,
        }
    }

    /// Renders the default string form of this scalar.
    #[must_use]
    pub fn render(&self, options: &EncodeOptions) -> String {
        match self {
            Scalar::Text(text) => text.clone(),
            Scalar::Int(i) => i.to_string(),
            Scalar::UInt(u) => u.to_string(),
            Scalar::BigInt(big) => big.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Float32(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Timestamp(ts) => render_timestamp(ts, options.timestamp_format),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&EncodeOptions::default()))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::UInt(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::Timestamp(value)
    }
}

impl From<BigInt> for Scalar {
    fn from(value: BigInt) -> Self {
        Scalar::BigInt(value)
    }
}

fn render_timestamp(ts: &DateTime<Utc>, format: TimestampFormat) -> String {
    match format {
        TimestampFormat::Plain => ts.format(PLAIN_TIMESTAMP).to_string(),
        TimestampFormat::Rfc3339 => ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    }
}

/// Parses a boolean literal.
///
/// # Examples
///
/// ```rust
/// use plainkv::scalar::parse_bool;
///
/// assert_eq!(parse_bool("True").unwrap(), true);
/// assert_eq!(parse_bool("0").unwrap(), false);
/// assert!(parse_bool("yes").is_err());
/// ```
pub fn parse_bool(literal: &str) -> Result<bool> {
    match literal {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(Error::parse(
            ScalarKind::Boolean,
            literal,
            "invalid boolean literal",
        )),
    }
}

/// Parses a timestamp in any of the accepted forms.
///
/// # Examples
///
/// ```rust
/// use plainkv::scalar::parse_timestamp;
///
/// let plain = parse_timestamp("2024-05-03 01:04:00 +0000 UTC").unwrap();
/// let rfc = parse_timestamp("2024-05-03T01:04:00Z").unwrap();
/// assert_eq!(plain, rfc);
/// ```
pub fn parse_timestamp(literal: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(literal) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(literal, PLAIN_TIMESTAMP) {
        return Ok(ts.with_timezone(&Utc));
    }
    let naive = literal.strip_suffix(" UTC").unwrap_or(literal);
    NaiveDateTime::parse_from_str(naive, NAIVE_TIMESTAMP)
        .map(|ts| Utc.from_utc_datetime(&ts))
        .map_err(|e| Error::parse(ScalarKind::Timestamp, literal, e))
}

/// Parses a base-10 number of any primitive width.
pub(crate) fn parse_number<T>(kind: ScalarKind, literal: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    literal
        .parse::<T>()
        .map_err(|e| Error::parse(kind, literal, e))
}
