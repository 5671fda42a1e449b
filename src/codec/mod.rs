//! Wire-framing codecs and codec resolution.
//!
//! Exactly one codec is attached per endpoint, chosen once at construction
//! time and never changed afterwards. A registered custom codec always wins;
//! otherwise the transport family picks the built-in default.

mod datagram;
pub mod registry;
mod serialization;
mod textline;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::endpoint::TransportKind;
use crate::error::{Error, Result};
use crate::params::Params;
use registry::CodecRegistry;

pub use datagram::RawDatagramCodec;
pub use serialization::SerializationCodec;
pub use textline::TextLineCodec;

/// Maximum serialized frame size accepted by the object codec (16 MB)
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Length prefix size of serialized frames, in bytes
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// A logical message crossing a codec boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Raw bytes, passed through untouched
    Bytes(Bytes),
    /// Text, converted with the endpoint charset where one applies
    Text(String),
    /// Structured data, framed opaquely by the serialization codec
    Object(serde_json::Value),
}

impl Payload {
    /// Textual form of the payload, used when a codec must charset-encode it.
    ///
    /// Raw bytes have no textual form and return `None`.
    #[must_use]
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Bytes(_) => None,
            Self::Text(text) => Some(Cow::Borrowed(text)),
            Self::Object(value) => Some(Cow::Owned(value.to_string())),
        }
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A paired encoder/decoder converting between wire bytes and payloads.
///
/// The I/O engine invokes one codec instance from all session-handling
/// threads of an endpoint, so implementations take `&self` and must hold no
/// per-call mutable state.
pub trait ProtocolCodec: Send + Sync {
    /// Encode one payload into `dst`.
    fn encode(&self, item: &Payload, dst: &mut BytesMut) -> Result<()>;

    /// Decode one payload from `src`, consuming the bytes it used.
    ///
    /// Returns `Ok(None)` when `src` does not yet hold a complete message.
    fn decode(&self, src: &mut BytesMut) -> Result<Option<Payload>>;

    /// Release per-session resources. Idempotent; the default does nothing.
    fn dispose(&self) {}
}

/// Codec choice for an endpoint, fixed at construction time.
#[derive(Clone)]
pub enum CodecSpec {
    /// Newline-delimited text with the given charset
    TextLine(&'static Encoding),
    /// Length-prefixed serialization of structured payloads
    ObjectSerialization,
    /// Byte passthrough for datagrams, with the given charset for text payloads
    RawDatagram(&'static Encoding),
    /// A caller-registered codec, resolved by name from the registry
    Custom {
        /// Registry name the codec was looked up under
        name: String,
        /// The registered codec instance
        codec: Arc<dyn ProtocolCodec>,
    },
}

impl CodecSpec {
    /// Instantiate the codec this choice describes.
    #[must_use]
    pub fn build(&self) -> Arc<dyn ProtocolCodec> {
        match self {
            Self::TextLine(charset) => Arc::new(TextLineCodec::new(charset)),
            Self::ObjectSerialization => Arc::new(SerializationCodec::new()),
            Self::RawDatagram(charset) => Arc::new(RawDatagramCodec::new(charset)),
            Self::Custom { codec, .. } => Arc::clone(codec),
        }
    }
}

impl fmt::Debug for CodecSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextLine(charset) => f.debug_tuple("TextLine").field(&charset.name()).finish(),
            Self::ObjectSerialization => f.write_str("ObjectSerialization"),
            Self::RawDatagram(charset) => {
                f.debug_tuple("RawDatagram").field(&charset.name()).finish()
            }
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

/// Pick the codec for an endpoint.
///
/// Resolution order is fixed: an explicit `codec` parameter always wins over
/// any default. Otherwise stream transports get text-line framing (when
/// `textline` is set) or object serialization, datagram transports get the
/// raw passthrough codec, and in-process endpoints carry no codec at all.
pub fn resolve(
    params: &Params,
    kind: TransportKind,
    registry: &dyn CodecRegistry,
) -> Result<Option<CodecSpec>> {
    if let Some(name) = params.get("codec") {
        let codec = registry
            .lookup(name)
            .ok_or_else(|| Error::UnknownCodec(name.to_string()))?;
        debug!(codec = name, "using registered custom codec");
        return Ok(Some(CodecSpec::Custom {
            name: name.to_string(),
            codec,
        }));
    }

    match kind {
        TransportKind::Stream => {
            if params.flag("textline") {
                let charset = params.encoding()?;
                debug!(charset = charset.name(), "using text-line codec");
                Ok(Some(CodecSpec::TextLine(charset)))
            } else {
                debug!("using object-serialization codec");
                Ok(Some(CodecSpec::ObjectSerialization))
            }
        }
        TransportKind::Datagram => {
            let charset = params.encoding()?;
            debug!(charset = charset.name(), "using raw datagram codec");
            Ok(Some(CodecSpec::RawDatagram(charset)))
        }
        // in-process messages pass as in-memory references, no framing
        TransportKind::InProcess => Ok(None),
    }
}
