//! Byte-passthrough codec for datagram transports.
//!
//! A datagram is delivered as one complete unit, so no framing is required.
//! The codec's job is payload conversion on the way out and safe buffer
//! hand-off on the way in.

use bytes::BytesMut;
use encoding_rs::Encoding;

use super::{Payload, ProtocolCodec};
use crate::error::{Error, Result};

/// Raw datagram codec.
///
/// Outbound: byte payloads go out as-is; anything else is rendered as text
/// and charset-encoded. Inbound: the whole buffer is handed through
/// unmodified as one payload.
#[derive(Debug, Clone, Copy)]
pub struct RawDatagramCodec {
    charset: &'static Encoding,
}

impl RawDatagramCodec {
    /// Create a codec using `charset` for text payloads.
    ///
    /// Decode-only encodings are replaced by their output encoding, so the
    /// wire bytes match what a peer decoding that charset expects.
    #[must_use]
    pub fn new(charset: &'static Encoding) -> Self {
        Self {
            charset: charset.output_encoding(),
        }
    }

    /// The charset used for text payloads.
    #[must_use]
    pub fn charset(&self) -> &'static Encoding {
        self.charset
    }

    fn unencodable(&self) -> Error {
        Error::Encoding {
            charset: self.charset.name().to_string(),
        }
    }
}

impl ProtocolCodec for RawDatagramCodec {
    fn encode(&self, item: &Payload, dst: &mut BytesMut) -> Result<()> {
        if let Payload::Bytes(bytes) = item {
            dst.extend_from_slice(bytes);
            return Ok(());
        }
        let text = item.to_text().ok_or_else(|| self.unencodable())?;
        // fresh stateless conversion per call: sessions of one endpoint are
        // serviced concurrently, so no encoder state may be shared between them
        let (encoded, _, had_errors) = self.charset.encode(&text);
        if had_errors {
            return Err(self.unencodable());
        }
        dst.extend_from_slice(&encoded);
        Ok(())
    }

    fn decode(&self, src: &mut BytesMut) -> Result<Option<Payload>> {
        // a zero-length datagram is still a deliverable message, so the
        // buffer is forwarded unconditionally. the engine recycles `src` as
        // soon as decode returns; detaching the bytes gives the payload an
        // independent lifetime
        let datagram = src.split_to(src.len()).freeze();
        Ok(Some(Payload::Bytes(datagram)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use encoding_rs::{UTF_16BE, UTF_8, WINDOWS_1252};
    use proptest::prelude::*;

    #[test]
    fn byte_payload_passes_through() {
        let codec = RawDatagramCodec::new(UTF_8);
        let mut dst = BytesMut::new();
        codec
            .encode(&Payload::Bytes(Bytes::from_static(&[1, 2, 3])), &mut dst)
            .unwrap();
        assert_eq!(&dst[..], &[1, 2, 3]);
    }

    #[test]
    fn text_payload_is_charset_encoded() {
        let codec = RawDatagramCodec::new(UTF_8);
        let mut dst = BytesMut::new();
        codec.encode(&Payload::from("héllo"), &mut dst).unwrap();
        // plain UTF-8 decode of the wire bytes recovers the original text
        assert_eq!(std::str::from_utf8(&dst).unwrap(), "héllo");
    }

    #[test]
    fn object_payload_is_encoded_as_text() {
        let codec = RawDatagramCodec::new(UTF_8);
        let mut dst = BytesMut::new();
        codec
            .encode(&Payload::Object(serde_json::json!({"k": 1})), &mut dst)
            .unwrap();
        assert_eq!(&dst[..], br#"{"k":1}"#);
    }

    #[test]
    fn encode_rejects_unmappable_text() {
        let codec = RawDatagramCodec::new(WINDOWS_1252);
        let mut dst = BytesMut::new();
        let err = codec.encode(&Payload::from("snow ☃"), &mut dst).unwrap_err();
        assert!(matches!(err, Error::Encoding { .. }));
    }

    #[test]
    fn decode_takes_ownership_of_buffer() {
        let codec = RawDatagramCodec::new(UTF_8);
        let mut engine_buffer = BytesMut::from(&b"one datagram"[..]);
        let decoded = codec.decode(&mut engine_buffer).unwrap().unwrap();

        // the engine buffer is empty and may be recycled; the payload holds
        // its own copy of the bytes
        assert!(engine_buffer.is_empty());
        engine_buffer.extend_from_slice(b"recycled for the next datagram");
        assert_eq!(decoded, Payload::Bytes(Bytes::from_static(b"one datagram")));
    }

    #[test]
    fn empty_datagram_is_still_delivered() {
        let codec = RawDatagramCodec::new(UTF_8);
        let mut src = BytesMut::new();
        let decoded = codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(decoded, Payload::Bytes(Bytes::new()));
    }

    #[test]
    fn utf16_charset_encodes_as_its_output_encoding() {
        let codec = RawDatagramCodec::new(UTF_16BE);
        assert_eq!(codec.charset(), UTF_8);

        let mut wire = BytesMut::new();
        codec.encode(&Payload::from("héllo"), &mut wire).unwrap();
        assert_eq!(std::str::from_utf8(&wire).unwrap(), "héllo");
    }

    #[test]
    fn dispose_is_a_no_op() {
        let codec = RawDatagramCodec::new(UTF_8);
        codec.dispose();
        codec.dispose();
    }

    proptest! {
        /// Any text encoded under UTF-8 decodes back to the original with a
        /// plain UTF-8 decode of the wire bytes.
        #[test]
        fn prop_utf8_text_roundtrip(text in ".*") {
            let codec = RawDatagramCodec::new(UTF_8);
            let mut wire = BytesMut::new();
            codec.encode(&Payload::from(text.as_str()), &mut wire).unwrap();
            prop_assert_eq!(std::str::from_utf8(&wire).unwrap(), text);
        }

        /// Decoding hands the exact datagram bytes through unmodified.
        #[test]
        fn prop_decode_passes_bytes_through(bytes in prop::collection::vec(any::<u8>(), 1..2048)) {
            let codec = RawDatagramCodec::new(UTF_8);
            let mut src = BytesMut::from(&bytes[..]);
            let decoded = codec.decode(&mut src).unwrap().unwrap();
            prop_assert_eq!(decoded, Payload::Bytes(Bytes::from(bytes)));
            prop_assert!(src.is_empty());
        }
    }
}
