//! # Array Codec
//!
//! Ordered sequences of 8-bit integers ⇄ bytes, one element per byte.

use crate::buffer::check_len;
use crate::numeric::Numeric;
use crate::{ByteBuffer, OctetError, Sign};

/// Store each element in one byte.
///
/// Elements must be integers within `0..=255` (unsigned) or `-128..=127`
/// (signed); anything else fails with `InvalidElement` naming its index.
pub fn array_to_bytes<N: Numeric>(
    values: &[N],
    sign: Sign,
    max_len: usize,
) -> Result<ByteBuffer, OctetError> {
    check_len(values.len(), max_len)?;

    let (min, max) = match sign {
        Sign::Unsigned => (0, i64::from(u8::MAX)),
        Sign::Signed => (i64::from(i8::MIN), i64::from(i8::MAX)),
    };

    let mut bytes = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let v = value.to_i64().ok_or_else(|| OctetError::InvalidElement {
            index,
            reason: "expression is not an integer number".to_string(),
        })?;
        if v < min || v > max {
            return Err(OctetError::InvalidElement {
                index,
                reason: format!("{v} is outside {min}..={max}"),
            });
        }
        bytes.push(v as u8);
    }

    Ok(ByteBuffer::from(bytes))
}

/// One integer per byte, interpreted under `sign`.
#[must_use]
pub fn bytes_to_array<N: Numeric>(buffer: &ByteBuffer, sign: Sign) -> Vec<N> {
    buffer
        .raw_bytes()
        .iter()
        .map(|&b| N::from_fixed_width_integer(8, sign, u64::from(b)))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
