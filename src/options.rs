//! Configuration options for plain encoding and decoding.
//!
//! - [`EncodeOptions`]: output formatting, currently the timestamp rendering
//! - [`TimestampFormat`]: the fixed textual form used for timestamp scalars
//! - [`DecodeOptions`]: how tolerant the decoder is towards unknown keys
//!
//! ## Examples
//!
//! ```rust
//! use plainkv::{DecodeOptions, EncodeOptions, TimestampFormat};
//!
//! let options = EncodeOptions::new().with_timestamp_format(TimestampFormat::Rfc3339);
//! assert_eq!(options.timestamp_format, TimestampFormat::Rfc3339);
//!
//! let strict = DecodeOptions::strict();
//! assert!(strict.deny_unknown_keys);
//! ```

/// Textual form of timestamp scalars.
///
/// The decoder accepts every form regardless of which one was used to encode.
///
/// # Examples
///
/// ```rust
/// use plainkv::TimestampFormat;
///
/// assert_eq!(TimestampFormat::default(), TimestampFormat::Plain);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    /// `2024-05-03 01:04:00 +0000 UTC`, fractional seconds only when non-zero.
    #[default]
    Plain,
    /// `2024-05-03T01:04:00Z`
    Rfc3339,
}

/// Configuration options for encoding.
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    pub timestamp_format: TimestampFormat,
}

impl EncodeOptions {
    /// Creates default options (plain timestamps).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how timestamp scalars are rendered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plainkv::{EncodeOptions, TimestampFormat};
    ///
    /// let options = EncodeOptions::new().with_timestamp_format(TimestampFormat::Rfc3339);
    /// assert_eq!(options.timestamp_format, TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

/// Configuration options for decoding.
///
/// By default keys with no matching field are skipped so that documents written
/// by an older or newer schema still decode.
#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
    pub deny_unknown_keys: bool,
}

impl DecodeOptions {
    /// Creates default (lenient) options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject keys without a matching field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plainkv::DecodeOptions;
    ///
    /// assert!(DecodeOptions::strict().deny_unknown_keys);
    /// assert!(!DecodeOptions::new().deny_unknown_keys);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        DecodeOptions {
            deny_unknown_keys: true,
        }
    }

    #[must_use]
    pub fn with_deny_unknown_keys(mut self, deny: bool) -> Self {
        self.deny_unknown_keys = deny;
        self
    }
}
