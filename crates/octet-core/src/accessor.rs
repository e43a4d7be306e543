//! # Positional Accessor
//!
//! Bounds-checked reads and writes of fixed-width integers and IEEE-754
//! floats at a 1-based byte position.
//!
//! A slot at position `p` with width `w` bytes covers bytes `p ..= p + w - 1`
//! (1-based). It is valid when `p >= 1` and `p + w - 1 <= len`.
//!
//! ## Write semantics
//!
//! - The value's kind must match the slot's kind (integer vs float).
//! - Integers that do not fit the slot are reduced modulo `2^bits`
//!   (two's-complement wraparound). This is defined truncation, not an error.
//! - Decimals written to a 32-bit float slot are rounded from binary64 to the
//!   nearest binary32 value (ties to even). Values beyond the binary32 range
//!   become infinities.
//! - Every check runs before the first byte is written.

use crate::numeric::{NumberKind, Numeric};
use crate::{ByteBuffer, Endianness, OctetError, OperandKind, Sign};

/// A fixed-width slot: width and integer/float kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl Slot {
    pub const ALL: [Self; 6] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
    ];

    /// Width in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Int8 => 8,
            Self::Int16 => 16,
            Self::Int32 | Self::Float32 => 32,
            Self::Int64 | Self::Float64 => 64,
        }
    }

    /// Width in bytes.
    #[must_use]
    pub const fn size(self) -> usize {
        (self.bits() / 8) as usize
    }

    #[must_use]
    pub const fn kind(self) -> NumberKind {
        match self {
            Self::Float32 | Self::Float64 => NumberKind::Decimal,
            _ => NumberKind::Integer,
        }
    }

    /// Byte range of the slot at 1-based `position`, if it lies inside `len`.
    fn range(self, position: usize, len: usize) -> Option<std::ops::Range<usize>> {
        let start = position.checked_sub(1)?;
        let end = start.checked_add(self.size())?;
        (end <= len).then_some(start..end)
    }

    fn out_of_range(self, position: usize, len: usize) -> OctetError {
        OctetError::IndexOutOfRange {
            position: position.to_string(),
            width: self.size(),
            length: len,
        }
    }
}

/// Read the value in `slot` at 1-based `position`.
///
/// `sign` only applies to integer slots.
pub fn get<N: Numeric>(
    buffer: &ByteBuffer,
    position: usize,
    slot: Slot,
    sign: Sign,
    endianness: Endianness,
) -> Result<N, OctetError> {
    let range = slot
        .range(position, buffer.len())
        .ok_or_else(|| slot.out_of_range(position, buffer.len()))?;
    let pattern = read_pattern(&buffer.raw_bytes()[range], endianness);

    Ok(match slot {
        Slot::Float32 => N::from_float(f64::from(f32::from_bits(pattern as u32))),
        Slot::Float64 => N::from_float(f64::from_bits(pattern)),
        _ => N::from_fixed_width_integer(slot.bits(), sign, pattern),
    })
}

/// Write `value` into `slot` at 1-based `position`, in place.
///
/// Returns the same buffer so writes can be chained. The stored bits do not
/// depend on `sign`; it is accepted for symmetry with [`get`].
pub fn set<'a, N: Numeric>(
    buffer: &'a mut ByteBuffer,
    position: usize,
    value: &N,
    slot: Slot,
    sign: Sign,
    endianness: Endianness,
) -> Result<&'a mut ByteBuffer, OctetError> {
    let pattern = match slot.kind() {
        NumberKind::Integer => {
            let fixed = value.to_fixed_width_integer(slot.bits())?;
            if fixed.wrapped {
                tracing::trace!(
                    ?slot,
                    ?sign,
                    pattern = fixed.pattern,
                    "integer truncated to slot width"
                );
            }
            fixed.pattern
        }
        NumberKind::Decimal => {
            let float = value.to_float().ok_or(OctetError::TypeMismatch {
                operand: None,
                expected: OperandKind::Decimal,
                found: OperandKind::Integer,
            })?;
            match slot {
                Slot::Float32 => u64::from((float as f32).to_bits()),
                _ => float.to_bits(),
            }
        }
    };

    let len = buffer.len();
    let range = slot
        .range(position, len)
        .ok_or_else(|| slot.out_of_range(position, len))?;
    write_pattern(&mut buffer.raw_bytes_mut()[range], pattern, endianness);

    Ok(buffer)
}

/// Assemble up to eight bytes into the low bits of a `u64`.
fn read_pattern(bytes: &[u8], endianness: Endianness) -> u64 {
    let push_byte = |acc: u64, &b: &u8| (acc << 8) | u64::from(b);
    match endianness {
        Endianness::LittleEndian => bytes.iter().rev().fold(0, push_byte),
        Endianness::BigEndian => bytes.iter().fold(0, push_byte),
    }
}

/// Split the low `dst.len()` bytes of `pattern` into `dst`.
fn write_pattern(dst: &mut [u8], pattern: u64, endianness: Endianness) {
    let le = pattern.to_le_bytes();
    let low = &le[..dst.len()];
    match endianness {
        Endianness::LittleEndian => dst.copy_from_slice(low),
        Endianness::BigEndian => {
            for (d, s) in dst.iter_mut().zip(low.iter().rev()) {
                *d = *s;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
