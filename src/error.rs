//! netpoint error types

use thiserror::Error;

/// Errors raised while building an endpoint or running its codec.
///
/// Everything here is surfaced to the caller; an endpoint configuration is
/// either fully valid or not produced at all.
#[derive(Error, Debug)]
pub enum Error {
    /// URI scheme names no supported transport
    #[error("unsupported transport scheme `{scheme}` for endpoint uri: {uri}")]
    UnsupportedTransport {
        /// The offending scheme
        scheme: String,
        /// The original URI, for diagnostics
        uri: String,
    },

    /// Endpoint URI could not be parsed
    #[error("invalid endpoint uri `{uri}`: {reason}")]
    InvalidUri {
        /// The original URI
        uri: String,
        /// What was wrong with it
        reason: String,
    },

    /// A recognized parameter failed to type-validate
    #[error("invalid value `{value}` for parameter `{key}`")]
    InvalidParameter {
        /// Parameter key
        key: String,
        /// Raw value as supplied by the caller
        value: String,
    },

    /// The `codec` parameter names nothing in the registry
    #[error("no codec registered under name `{0}`")]
    UnknownCodec(String),

    /// A payload could not be converted to bytes in the configured charset
    #[error("payload not encodable as {charset}")]
    Encoding {
        /// Name of the charset that rejected the payload
        charset: String,
    },

    /// A serialized frame exceeds the configured maximum
    #[error("serialized frame too large: {size} bytes (max {max})")]
    FrameTooLarge {
        /// Declared or actual frame size
        size: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Object serialization or deserialization failed
    #[error("object serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
