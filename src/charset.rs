//! Charset lookup for the text-line and datagram codecs.
//!
//! A codec stores only the immutable charset identity (`&'static Encoding`)
//! and performs a fresh stateless conversion per call, so one codec instance
//! can serve concurrent sessions without shared encoder state.

use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};

/// The charset used when no `encoding` parameter is supplied.
#[must_use]
pub fn default_charset() -> &'static Encoding {
    UTF_8
}

/// Whether `label` names a supported charset.
#[must_use]
pub fn is_supported(label: &str) -> bool {
    Encoding::for_label(label.as_bytes()).is_some()
}

/// Resolve a charset by label.
///
/// Labels are matched per the WHATWG encoding registry, so common aliases
/// such as `latin1` or `UTF8` resolve too. Decode-only encodings (UTF-16,
/// replacement) are mapped to their output encoding, so the charset handed
/// to a codec always encodes and decodes the same wire bytes.
pub fn for_name(label: &str) -> Result<&'static Encoding> {
    let encoding =
        Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::InvalidParameter {
            key: "encoding".to_string(),
            value: label.to_string(),
        })?;
    Ok(encoding.output_encoding())
}
