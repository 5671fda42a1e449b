//! Newline-delimited text framing for stream transports.

use bytes::BytesMut;
use encoding_rs::Encoding;

use super::{Payload, ProtocolCodec};
use crate::error::{Error, Result};

/// Line-delimited text codec.
///
/// Outbound payloads are rendered as text, charset-encoded, and terminated
/// with `\n`. Inbound bytes are split at `\n`; a trailing `\r` is stripped so
/// both `\n` and `\r\n` delimited peers work.
#[derive(Debug, Clone, Copy)]
pub struct TextLineCodec {
    charset: &'static Encoding,
}

impl TextLineCodec {
    /// Create a codec converting with `charset` in both directions.
    ///
    /// Decode-only encodings are replaced by their output encoding, so
    /// encode and decode always agree on the wire bytes.
    #[must_use]
    pub fn new(charset: &'static Encoding) -> Self {
        Self {
            charset: charset.output_encoding(),
        }
    }

    /// The charset this codec converts with.
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

impl ProtocolCodec for TextLineCodec {
    fn encode(&self, item: &Payload, dst: &mut BytesMut) -> Result<()> {
        let text = item.to_text().ok_or_else(|| self.unencodable())?;
        let (encoded, _, had_errors) = self.charset.encode(&text);
        if had_errors {
            return Err(self.unencodable());
        }
        dst.reserve(encoded.len() + 1);
        dst.extend_from_slice(&encoded);
        dst.extend_from_slice(b"\n");
        Ok(())
    }

    fn decode(&self, src: &mut BytesMut) -> Result<Option<Payload>> {
        // the stored charset is always an output encoding, and those are
        // ASCII-compatible, so a byte-level scan for the delimiter is safe
        let Some(pos) = src.iter().position(|&b| b == b'\n') else {
            return Ok(None);
        };
        let mut line = src.split_to(pos + 1);
        line.truncate(pos);
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        let (text, _, _) = self.charset.decode(&line);
        Ok(Some(Payload::Text(text.into_owned())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use encoding_rs::{UTF_16LE, UTF_8, WINDOWS_1252};

    #[test]
    fn encode_appends_newline() {
        let codec = TextLineCodec::new(UTF_8);
        let mut dst = BytesMut::new();
        codec.encode(&Payload::from("hello"), &mut dst).unwrap();
        assert_eq!(&dst[..], b"hello\n");
    }

    #[test]
    fn decode_waits_for_delimiter() {
        let codec = TextLineCodec::new(UTF_8);
        let mut src = BytesMut::from(&b"partial line"[..]);
        assert!(codec.decode(&mut src).unwrap().is_none());
        assert_eq!(&src[..], b"partial line");
    }

    #[test]
    fn decode_strips_crlf() {
        let codec = TextLineCodec::new(UTF_8);
        let mut src = BytesMut::from(&b"one\r\ntwo\n"[..]);
        assert_eq!(codec.decode(&mut src).unwrap().unwrap(), Payload::from("one"));
        assert_eq!(codec.decode(&mut src).unwrap().unwrap(), Payload::from("two"));
        assert!(src.is_empty());
    }

    #[test]
    fn roundtrip_in_legacy_charset() {
        let codec = TextLineCodec::new(WINDOWS_1252);
        let mut wire = BytesMut::new();
        codec.encode(&Payload::from("café"), &mut wire).unwrap();
        // single-byte encoding on the wire
        assert_eq!(wire.len(), 5);
        let decoded = codec.decode(&mut wire).unwrap().unwrap();
        assert_eq!(decoded, Payload::from("café"));
    }

    #[test]
    fn utf16_charset_roundtrips_as_its_output_encoding() {
        let codec = TextLineCodec::new(UTF_16LE);
        assert_eq!(codec.charset(), UTF_8);

        let mut wire = BytesMut::new();
        codec.encode(&Payload::from("hello"), &mut wire).unwrap();
        assert_eq!(&wire[..], b"hello\n");
        let decoded = codec.decode(&mut wire).unwrap().unwrap();
        assert_eq!(decoded, Payload::from("hello"));
    }

    #[test]
    fn encode_rejects_unmappable_text() {
        let codec = TextLineCodec::new(WINDOWS_1252);
        let mut dst = BytesMut::new();
        let err = codec.encode(&Payload::from("snow ☃"), &mut dst).unwrap_err();
        assert!(matches!(err, Error::Encoding { charset } if charset == "windows-1252"));
    }

    #[test]
    fn encode_rejects_raw_bytes() {
        let codec = TextLineCodec::new(UTF_8);
        let mut dst = BytesMut::new();
        let payload = Payload::Bytes(Bytes::from_static(b"\xff\xfe"));
        assert!(codec.encode(&payload, &mut dst).is_err());
    }
}
