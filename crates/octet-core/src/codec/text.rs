//! # Text Codec
//!
//! UTF-8 text ⇄ bytes.
//!
//! Encoding is exact. Decoding is total: a buffer that is not valid UTF-8
//! still decodes, with U+FFFD standing in for each malformed sequence.
//!
//! ## Malformed input policy
//!
//! - A lead byte announces the sequence length (2, 3 or 4 bytes).
//! - If every announced continuation byte is present and well-formed, the
//!   whole sequence is consumed; an overlong form, a surrogate or a value
//!   above U+10FFFF becomes one U+FFFD.
//! - If a continuation byte is missing or malformed, the sequence ends just
//!   before it and becomes one U+FFFD; decoding resumes at that byte.
//! - Stray continuation bytes and `0xF8..=0xFF` become one U+FFFD each.
//!
//! ## UTF-16 input
//!
//! [`utf16_to_bytes`] is for library callers holding raw UTF-16 code units,
//! which may contain unpaired surrogates. Facade operands carry Rust strings,
//! which cannot, so `Data.StringToBytes` always goes through
//! [`string_to_bytes`].

use crate::ByteBuffer;
use crate::primitives::REPLACEMENT_CHARACTER;

/// Smallest code point that may use a sequence of the given length.
const MIN_CODE_POINT: [u32; 5] = [0, 0, 0x80, 0x800, 0x1_0000];

/// Encode text as UTF-8.
#[must_use]
pub fn string_to_bytes(text: &str) -> ByteBuffer {
    ByteBuffer::from_raw_bytes(text.as_bytes())
}

/// Encode UTF-16 code units as UTF-8.
///
/// A leading surrogate followed by its trailing surrogate is combined into a
/// single 4-byte sequence. An unpaired surrogate becomes U+FFFD (3 bytes).
#[must_use]
pub fn utf16_to_bytes(units: &[u16]) -> ByteBuffer {
    let mut text = String::with_capacity(units.len());
    let mut replaced = 0usize;

    for unit in char::decode_utf16(units.iter().copied()) {
        match unit {
            Ok(c) => text.push(c),
            Err(_) => {
                replaced += 1;
                text.push(REPLACEMENT_CHARACTER);
            }
        }
    }

    if replaced > 0 {
        tracing::debug!(replaced, "unpaired surrogates replaced while encoding text");
    }

    ByteBuffer::from(text.into_bytes())
}

/// Decode UTF-8, substituting U+FFFD for malformed sequences.
#[must_use]
pub fn bytes_to_string(buffer: &ByteBuffer) -> String {
    let bytes = buffer.raw_bytes();
    if let Ok(valid) = std::str::from_utf8(bytes) {
        return valid.to_string();
    }

    let mut text = String::with_capacity(bytes.len());
    let mut replaced = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let lead = bytes[i];
        let (width, initial) = match lead {
            0x00..=0x7F => {
                text.push(char::from(lead));
                i += 1;
                continue;
            }
            0xC0..=0xDF => (2, u32::from(lead & 0x1F)),
            0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
            0xF0..=0xF7 => (4, u32::from(lead & 0x07)),
            _ => {
                replaced += 1;
                text.push(REPLACEMENT_CHARACTER);
                i += 1;
                continue;
            }
        };

        let announced_end = (i + width).min(bytes.len());
        let tail_len = bytes[i + 1..announced_end]
            .iter()
            .take_while(|&&b| b & 0xC0 == 0x80)
            .count();

        let decoded = if tail_len == width - 1 {
            let code_point = bytes[i + 1..i + width]
                .iter()
                .fold(initial, |acc, &b| (acc << 6) | u32::from(b & 0x3F));
            if code_point >= MIN_CODE_POINT[width] {
                char::from_u32(code_point)
            } else {
                None
            }
        } else {
            None
        };

        match decoded {
            Some(c) => text.push(c),
            None => {
                replaced += 1;
                text.push(REPLACEMENT_CHARACTER);
            }
        }
        i += 1 + tail_len;
    }

    tracing::debug!(replaced, "malformed UTF-8 replaced while decoding bytes");
    text
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> String {
        bytes_to_string(&ByteBuffer::from_raw_bytes(bytes))
    }

    #[test]
    fn ascii_roundtrip() {
        let buffer = string_to_bytes("ABC");
        assert_eq!(buffer.raw_bytes(), b"ABC");
        assert_eq!(bytes_to_string(&buffer), "ABC");
    }

    #[test]
    fn multibyte_encoding_lengths() {
        assert_eq!(string_to_bytes("é").len(), 2);
        assert_eq!(string_to_bytes("€").len(), 3);
        assert_eq!(string_to_bytes("😀").raw_bytes(), &[0xF0, 0x9F, 0x98, 0x80]);
    }

    #[test]
    fn surrogate_pair_combines_into_four_bytes() {
        let units: Vec<u16> = "a😀b".encode_utf16().collect();
        assert_eq!(units.len(), 4);

        let buffer = utf16_to_bytes(&units);
        assert_eq!(buffer.raw_bytes(), &[b'a', 0xF0, 0x9F, 0x98, 0x80, b'b']);
        assert_eq!(bytes_to_string(&buffer), "a😀b");
    }

    #[test]
    fn unpaired_surrogate_becomes_replacement() {
        let buffer = utf16_to_bytes(&[0x0041, 0xD800, 0x0042]);
        assert_eq!(bytes_to_string(&buffer), "A\u{FFFD}B");
        assert_eq!(buffer.len(), 5);

        let buffer = utf16_to_bytes(&[0xDC00]);
        assert_eq!(buffer.raw_bytes(), "\u{FFFD}".as_bytes());
    }

    #[test]
    fn stray_continuation_byte_is_replaced() {
        assert_eq!(decode(&[b'a', 0x80, b'b']), "a\u{FFFD}b");
    }

    #[test]
    fn truncated_sequence_does_not_swallow_next_byte() {
        // 0xE2 announces three bytes but 'x' is not a continuation byte.
        assert_eq!(decode(&[0xE2, 0x82, b'x']), "\u{FFFD}x");
        assert_eq!(decode(&[0xF0, 0x9F]), "\u{FFFD}");
    }

    #[test]
    fn invalid_code_points_consume_whole_sequence() {
        // Overlong encoding of '/'.
        assert_eq!(decode(&[0xC0, 0xAF, b'z']), "\u{FFFD}z");
        // Encoded surrogate U+D800.
        assert_eq!(decode(&[0xED, 0xA0, 0x80, b'z']), "\u{FFFD}z");
        // Above U+10FFFF.
        assert_eq!(decode(&[0xF4, 0x90, 0x80, 0x80, b'z']), "\u{FFFD}z");
    }

    #[test]
    fn invalid_lead_bytes_advance_by_one() {
        assert_eq!(decode(&[0xFF, 0xF8, b'q']), "\u{FFFD}\u{FFFD}q");
    }

    #[test]
    fn empty_buffer_decodes_to_empty_string() {
        assert_eq!(decode(&[]), "");
    }
}
