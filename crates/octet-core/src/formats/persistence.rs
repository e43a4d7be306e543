//! # Persistence Format
//!
//! Text form of a buffer for storage and for wire payloads.
//!
//! The current form is padded standard Base64. Older stores wrote buffers as
//! space-separated decimal byte values (`"1 2 255"`); that form is still read
//! but never written.
//!
//! File I/O lives in the app layer. Everything here is a pure transformation.

use crate::buffer::check_len;
use crate::codec::base64;
use crate::primitives::MAX_BUFFER_SIZE;
use crate::{ByteBuffer, OctetError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// CURRENT FORM (BASE64)
// =============================================================================

/// Persisted form of `buffer`.
#[must_use]
pub fn buffer_to_persisted(buffer: &ByteBuffer) -> String {
    base64::encode(buffer)
}

/// Restore a buffer from its persisted form.
pub fn buffer_from_persisted(text: &str, max_len: usize) -> Result<ByteBuffer, OctetError> {
    base64::decode(text, max_len)
}

// =============================================================================
// LEGACY FORM (DECIMAL)
// =============================================================================

/// Legacy decimal form, for stores that still expect it.
#[must_use]
pub fn buffer_to_legacy_decimal(buffer: &ByteBuffer) -> String {
    buffer
        .raw_bytes()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read the legacy decimal form.
///
/// Every whitespace-separated token must be an integer in `0..=255`.
pub fn buffer_from_legacy_decimal(text: &str, max_len: usize) -> Result<ByteBuffer, OctetError> {
    let bytes = text
        .split_ascii_whitespace()
        .enumerate()
        .map(|(index, token)| {
            token.parse::<u8>().map_err(|_| {
                OctetError::SerializationError(format!(
                    "token {index} ({token:?}) is not a byte value"
                ))
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;
    check_len(bytes.len(), max_len)?;
    Ok(ByteBuffer::from(bytes))
}

/// Read either persisted form.
///
/// Base64 is tried first. Text that contains whitespace, or that fails Base64
/// but consists only of decimal digits, is read as the legacy form.
pub fn load_buffer(text: &str, max_len: usize) -> Result<ByteBuffer, OctetError> {
    let text = text.trim();
    if text.contains(|c: char| c.is_ascii_whitespace()) {
        return buffer_from_legacy_decimal(text, max_len);
    }
    match buffer_from_persisted(text, max_len) {
        Ok(buffer) => Ok(buffer),
        Err(OctetError::InvalidBase64(_)) if text.bytes().all(|b| b.is_ascii_digit()) => {
            tracing::debug!("reading buffer in legacy decimal form");
            buffer_from_legacy_decimal(text, max_len)
        }
        Err(e) => Err(e),
    }
}

// =============================================================================
// SERDE
// =============================================================================

impl Serialize for ByteBuffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&buffer_to_persisted(self))
    }
}

impl<'de> Deserialize<'de> for ByteBuffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        load_buffer(&text, MAX_BUFFER_SIZE).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_roundtrip_bit_exact() {
        let buffer = ByteBuffer::from_raw_bytes(&[0, 1, 2, 253, 254, 255]);

        let text1 = buffer_to_persisted(&buffer);
        let restored = buffer_from_persisted(&text1, MAX_BUFFER_SIZE).expect("restore");
        let text2 = buffer_to_persisted(&restored);

        assert_eq!(restored, buffer);
        assert_eq!(text1, text2, "save -> load -> save must produce identical text");
    }

    #[test]
    fn zero_length_buffer_persists() {
        let empty = ByteBuffer::zeroed(0);
        let text = buffer_to_persisted(&empty);
        assert_eq!(text, "");
        assert_eq!(load_buffer(&text, MAX_BUFFER_SIZE).expect("load"), empty);
    }

    #[test]
    fn legacy_decimal_is_read() {
        let buffer = buffer_from_legacy_decimal("1 2 255", MAX_BUFFER_SIZE).expect("legacy");
        assert_eq!(buffer.raw_bytes(), &[1, 2, 255]);
        assert_eq!(buffer_to_legacy_decimal(&buffer), "1 2 255");

        assert!(matches!(
            buffer_from_legacy_decimal("1 256", MAX_BUFFER_SIZE),
            Err(OctetError::SerializationError(_))
        ));
    }

    #[test]
    fn load_buffer_detects_form() {
        assert_eq!(
            load_buffer("QUJD", MAX_BUFFER_SIZE).expect("base64").raw_bytes(),
            b"ABC"
        );
        assert_eq!(
            load_buffer("65 66 67", MAX_BUFFER_SIZE).expect("legacy").raw_bytes(),
            b"ABC"
        );
        // Not valid Base64 (length 2) but a single decimal byte.
        assert_eq!(
            load_buffer("42", MAX_BUFFER_SIZE).expect("legacy").raw_bytes(),
            &[42]
        );
        assert!(matches!(
            load_buffer("QQ=", MAX_BUFFER_SIZE),
            Err(OctetError::InvalidBase64(_))
        ));
    }

    #[test]
    fn legacy_respects_limit() {
        assert!(matches!(
            buffer_from_legacy_decimal("1 2 3", 2),
            Err(OctetError::InvalidSize(_))
        ));
    }

    #[test]
    fn serde_uses_base64_string() {
        let buffer = ByteBuffer::from_raw_bytes(b"Hi");
        let json = serde_json::to_string(&buffer).expect("serialize");
        assert_eq!(json, "\"SGk=\"");

        let back: ByteBuffer = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, buffer);
    }
}
