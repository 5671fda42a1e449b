//! Endpoint parameter parsing and validation.
//!
//! Parameters arrive as a flat string-to-string mapping (as they would from a
//! URI query string). Recognized keys are validated eagerly at endpoint
//! construction time; unknown keys are ignored.

use std::collections::HashMap;
use std::time::Duration;

use encoding_rs::Encoding;

use crate::charset;
use crate::error::{Error, Result};

/// Flat string-keyed endpoint parameters.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: HashMap<String, String>,
}

impl Params {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Boolean flag: absent or anything but `true` reads as `false`.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Response timeout in milliseconds. Absent means zero (no limit).
    pub fn timeout(&self) -> Result<Duration> {
        match self.get("timeout") {
            None => Ok(Duration::ZERO),
            Some(value) => {
                let millis = value.parse::<u64>().map_err(|_| Error::InvalidParameter {
                    key: "timeout".to_string(),
                    value: value.to_string(),
                })?;
                Ok(Duration::from_millis(millis))
            }
        }
    }

    /// Charset for the text-line and datagram codecs.
    ///
    /// Absent falls back to the default charset; a label naming no supported
    /// charset fails validation.
    pub fn encoding(&self) -> Result<&'static Encoding> {
        match self.get("encoding") {
            None => Ok(charset::default_charset()),
            Some(label) => charset::for_name(label),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
