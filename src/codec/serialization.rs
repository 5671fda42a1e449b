//! Length-prefixed serialization framing for structured payloads.

use bytes::{Buf, BufMut, BytesMut};

use super::{LENGTH_PREFIX_SIZE, MAX_FRAME_SIZE, Payload, ProtocolCodec};
use crate::error::{Error, Result};

/// Opaque framing of arbitrary structured payloads.
///
/// # Format
///
/// ```text
/// [LENGTH (4 bytes, LE)] [SERIALIZED PAYLOAD (length bytes)]
/// ```
///
/// The payload body is serialized JSON, so any [`Payload`] variant survives
/// the wire, raw bytes included.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializationCodec;

impl SerializationCodec {
    /// Create the codec.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProtocolCodec for SerializationCodec {
    fn encode(&self, item: &Payload, dst: &mut BytesMut) -> Result<()> {
        let body = serde_json::to_vec(item)?;
        if body.len() > MAX_FRAME_SIZE {
            return Err(Error::FrameTooLarge {
                size: body.len(),
                max: MAX_FRAME_SIZE,
            });
        }
        dst.reserve(LENGTH_PREFIX_SIZE + body.len());
        dst.put_u32_le(body.len() as u32);
        dst.put_slice(&body);
        Ok(())
    }

    fn decode(&self, src: &mut BytesMut) -> Result<Option<Payload>> {
        if src.len() < LENGTH_PREFIX_SIZE {
            return Ok(None);
        }
        let len = u32::from_le_bytes(src[..LENGTH_PREFIX_SIZE].try_into().unwrap()) as usize;
        if len > MAX_FRAME_SIZE {
            return Err(Error::FrameTooLarge {
                size: len,
                max: MAX_FRAME_SIZE,
            });
        }
        if src.len() < LENGTH_PREFIX_SIZE + len {
            return Ok(None);
        }
        src.advance(LENGTH_PREFIX_SIZE);
        let body = src.split_to(len);
        let payload = serde_json::from_slice(&body)?;
        Ok(Some(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn object_roundtrip() {
        let codec = SerializationCodec::new();
        let payload = Payload::Object(serde_json::json!({"order": 42, "tags": ["a", "b"]}));
        let mut wire = BytesMut::new();
        codec.encode(&payload, &mut wire).unwrap();
        let decoded = codec.decode(&mut wire).unwrap().unwrap();
        assert_eq!(decoded, payload);
        assert!(wire.is_empty());
    }

    #[test]
    fn bytes_payload_survives_framing() {
        let codec = SerializationCodec::new();
        let payload = Payload::Bytes(Bytes::from_static(&[0x00, 0xff, 0x7f]));
        let mut wire = BytesMut::new();
        codec.encode(&payload, &mut wire).unwrap();
        assert_eq!(codec.decode(&mut wire).unwrap().unwrap(), payload);
    }

    #[test]
    fn decode_incomplete_prefix() {
        let codec = SerializationCodec::new();
        let mut src = BytesMut::from(&[0x05, 0x00][..]);
        assert!(codec.decode(&mut src).unwrap().is_none());
    }

    #[test]
    fn decode_incomplete_body() {
        let codec = SerializationCodec::new();
        let mut wire = BytesMut::new();
        codec.encode(&Payload::from("hello"), &mut wire).unwrap();
        wire.truncate(wire.len() - 1);
        assert!(codec.decode(&mut wire).unwrap().is_none());
    }

    #[test]
    fn decode_rejects_oversized_frame() {
        let codec = SerializationCodec::new();
        let mut src = BytesMut::new();
        src.put_u32_le(u32::try_from(MAX_FRAME_SIZE + 1).unwrap());
        let result = codec.decode(&mut src);
        assert!(matches!(result, Err(Error::FrameTooLarge { .. })));
    }

    #[test]
    fn decode_rejects_malformed_body() {
        let codec = SerializationCodec::new();
        let mut src = BytesMut::new();
        src.put_u32_le(4);
        src.put_slice(b"!!!!");
        assert!(matches!(codec.decode(&mut src), Err(Error::Serialization(_))));
    }

    #[test]
    fn multiple_frames_decode_in_order() {
        let codec = SerializationCodec::new();
        let mut wire = BytesMut::new();
        codec.encode(&Payload::from("first"), &mut wire).unwrap();
        codec.encode(&Payload::from("second"), &mut wire).unwrap();
        assert_eq!(codec.decode(&mut wire).unwrap().unwrap(), Payload::from("first"));
        assert_eq!(codec.decode(&mut wire).unwrap().unwrap(), Payload::from("second"));
        assert!(wire.is_empty());
    }
}
