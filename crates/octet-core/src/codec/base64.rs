//! # Base64 Codec
//!
//! Standard-alphabet Base64 with `=` padding.
//!
//! Decoding is strict. Text is rejected when:
//! 1. its length is not a multiple of 4,
//! 2. a `=` appears anywhere but the final one or two positions,
//! 3. any other character lies outside `A–Z a–z 0–9 + /`.
//!
//! The checks run before the `base64` engine sees the text so each failure
//! names its cause and position. Non-zero trailing bits in the last symbol are
//! tolerated (`"QR=="` decodes like `"QQ=="`).

use crate::buffer::check_len;
use crate::primitives::{BASE64_ALPHABET, BASE64_PAD};
use crate::{ByteBuffer, OctetError};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(true),
);

/// Encode bytes as padded Base64 text.
#[must_use]
pub fn encode(buffer: &ByteBuffer) -> String {
    ENGINE.encode(buffer.raw_bytes())
}

/// Decode padded Base64 text into a new buffer of at most `max_len` bytes.
pub fn decode(text: &str, max_len: usize) -> Result<ByteBuffer, OctetError> {
    let decoded_len = validate(text)?;
    check_len(decoded_len, max_len)?;

    let bytes = ENGINE
        .decode(text)
        .map_err(|e| OctetError::InvalidBase64(e.to_string()))?;
    debug_assert_eq!(bytes.len(), decoded_len);

    Ok(ByteBuffer::from(bytes))
}

/// Check the three decoding rules and return the decoded length.
fn validate(text: &str) -> Result<usize, OctetError> {
    let len = text.len();
    if len % 4 != 0 {
        return Err(OctetError::InvalidBase64(format!(
            "length {len} is not a multiple of 4"
        )));
    }

    let mut padding = 0usize;
    for (position, c) in text.char_indices() {
        if c == char::from(BASE64_PAD) {
            if position + 2 < len {
                return Err(OctetError::InvalidBase64(format!(
                    "padding at position {position} is not in the final two positions"
                )));
            }
            padding += 1;
        } else if padding > 0 {
            return Err(OctetError::InvalidBase64(format!(
                "character {c:?} at position {position} follows padding"
            )));
        } else if !c.is_ascii() || !BASE64_ALPHABET.contains(&(c as u8)) {
            return Err(OctetError::InvalidBase64(format!(
                "character {c:?} at position {position} is not in the Base64 alphabet"
            )));
        }
    }

    Ok(3 * (len / 4) - padding)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::MAX_BUFFER_SIZE;

    fn encode_bytes(bytes: &[u8]) -> String {
        encode(&ByteBuffer::from_raw_bytes(bytes))
    }

    fn decode_bytes(text: &str) -> Result<Vec<u8>, OctetError> {
        decode(text, MAX_BUFFER_SIZE).map(ByteBuffer::into_vec)
    }

    #[test]
    fn encode_pads_remainders() {
        assert_eq!(encode_bytes(b""), "");
        assert_eq!(encode_bytes(b"A"), "QQ==");
        assert_eq!(encode_bytes(b"AB"), "QUI=");
        assert_eq!(encode_bytes(b"ABC"), "QUJD");
        assert_eq!(encode_bytes(&[0xFB, 0xFF]), "+/8=");
    }

    #[test]
    fn decode_reconstructs_exact_length() {
        assert_eq!(decode_bytes("QUJD").expect("decode"), b"ABC");
        assert_eq!(decode_bytes("QUI=").expect("decode"), b"AB");
        assert_eq!(decode_bytes("QQ==").expect("decode"), b"A");
        assert_eq!(decode_bytes("").expect("decode"), b"");
    }

    #[test]
    fn decode_rejects_bad_length() {
        assert!(matches!(
            decode_bytes("QQ="),
            Err(OctetError::InvalidBase64(_))
        ));
        assert!(matches!(decode_bytes("Q"), Err(OctetError::InvalidBase64(_))));
    }

    #[test]
    fn decode_rejects_misplaced_padding() {
        assert!(decode_bytes("=AAA").is_err());
        assert!(decode_bytes("A===").is_err());
        assert!(decode_bytes("AB=C").is_err());
        assert!(decode_bytes("QQ==QUJD").is_err());
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        assert!(decode_bytes("QU-D").is_err());
        assert!(decode_bytes("QU D").is_err());
        assert!(decode_bytes("QUé=").is_err());
    }

    #[test]
    fn decode_tolerates_trailing_bits() {
        assert_eq!(decode_bytes("QR==").expect("decode"), b"A");
    }

    #[test]
    fn decode_respects_limit() {
        assert!(matches!(
            decode("QUJD", 2),
            Err(OctetError::InvalidSize(_))
        ));
    }
}
