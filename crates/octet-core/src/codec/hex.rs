//! # Hex Codec
//!
//! Bytes ⇄ hexadecimal text, two digits per byte, no separators.
//! Encoding is lowercase; decoding accepts either case.

use crate::buffer::check_len;
use crate::primitives::HEX_DIGITS;
use crate::{ByteBuffer, OctetError};

/// Encode bytes as lowercase hex.
#[must_use]
pub fn encode(buffer: &ByteBuffer) -> String {
    let mut text = String::with_capacity(buffer.len() * 2);
    for &byte in buffer.raw_bytes() {
        text.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
        text.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
    }
    text
}

/// Decode hex text into a new buffer of at most `max_len` bytes.
///
/// Fails with `InvalidHex` when the length is odd or a character is outside
/// `[0-9a-fA-F]`.
pub fn decode(text: &str, max_len: usize) -> Result<ByteBuffer, OctetError> {
    if let Some((position, c)) = text.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(OctetError::InvalidHex(format!(
            "character {c:?} at position {position} is not a hex digit"
        )));
    }
    if text.len() % 2 != 0 {
        return Err(OctetError::InvalidHex(format!(
            "length {} is odd",
            text.len()
        )));
    }
    check_len(text.len() / 2, max_len)?;

    let bytes = text
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect::<Vec<u8>>();

    Ok(ByteBuffer::from(bytes))
}

/// Value of an ASCII hex digit already known to be valid.
const fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::MAX_BUFFER_SIZE;

    #[test]
    fn encode_is_lowercase_and_zero_padded() {
        let buffer = ByteBuffer::from_raw_bytes(&[0x00, 0x0A, 0xFF, 0x7C]);
        assert_eq!(encode(&buffer), "000aff7c");
        assert_eq!(encode(&ByteBuffer::zeroed(0)), "");
    }

    #[test]
    fn decode_accepts_both_cases() {
        let buffer = decode("ff00", MAX_BUFFER_SIZE).expect("decode");
        assert_eq!(buffer.raw_bytes(), &[255, 0]);

        let buffer = decode("DeadBEEF", MAX_BUFFER_SIZE).expect("decode");
        assert_eq!(buffer.raw_bytes(), &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn decode_rejects_odd_length() {
        assert!(matches!(
            decode("1", MAX_BUFFER_SIZE),
            Err(OctetError::InvalidHex(_))
        ));
        assert!(matches!(
            decode("abc", MAX_BUFFER_SIZE),
            Err(OctetError::InvalidHex(_))
        ));
    }

    #[test]
    fn decode_rejects_non_hex_characters() {
        assert!(decode("0g", MAX_BUFFER_SIZE).is_err());
        assert!(decode("0x10", MAX_BUFFER_SIZE).is_err());
        assert!(decode("ü0", MAX_BUFFER_SIZE).is_err());
    }

    #[test]
    fn decode_empty_text() {
        assert!(decode("", MAX_BUFFER_SIZE).expect("decode").is_empty());
    }
}
