//! # Numeric Values
//!
//! The bridge between buffer slots and the host's numbers.
//!
//! Octet never does arithmetic on host numbers. It only needs to turn a
//! number into a fixed-width bit pattern and back, so the host's numeric type
//! is seen through the [`Numeric`] capability trait. [`Number`] is the stock
//! implementation: an arbitrary-precision integer (`num-bigint`) or a binary64
//! decimal.

use crate::{OctetError, OperandKind, Sign};
use num_bigint::{BigInt, Sign as BigSign};
use std::fmt;
use std::str::FromStr;

/// Whether a number is integral or decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Integer,
    Decimal,
}

/// A bit pattern ready to be stored in a slot of `bits` width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth {
    /// Low `bits` bits of the value in two's complement; higher bits are zero.
    pub pattern: u64,
    /// True when the value did not fit and was reduced modulo `2^bits`.
    pub wrapped: bool,
}

/// Capabilities Octet needs from a host numeric type.
pub trait Numeric: Sized {
    fn kind(&self) -> NumberKind;

    /// Reduce an integer to a `bits`-wide two's-complement pattern.
    ///
    /// Values outside both the signed and unsigned range of the width wrap
    /// around; `wrapped` reports it. Decimals yield `TypeMismatch`.
    fn to_fixed_width_integer(&self, bits: u32) -> Result<FixedWidth, OctetError>;

    /// Build an integer from the low `bits` bits of `pattern`.
    fn from_fixed_width_integer(bits: u32, sign: Sign, pattern: u64) -> Self;

    /// The value as a binary64 float, for decimals only.
    fn to_float(&self) -> Option<f64>;

    fn from_float(value: f64) -> Self;

    /// The value as a native integer, if it is an integer that fits.
    fn to_i64(&self) -> Option<i64>;
}

// =============================================================================
// STOCK NUMBER
// =============================================================================

/// An integer of any size or a decimal number.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(BigInt),
    Decimal(f64),
}

impl Number {
    #[must_use]
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self::Integer(value.into())
    }

    #[must_use]
    pub const fn decimal(value: f64) -> Self {
        Self::Decimal(value)
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(i) => Some(i),
            Self::Decimal(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{d:?}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl FromStr for Number {
    type Err = OctetError;

    /// Decimal digits parse as an integer of any size; anything else must
    /// parse as an `f64`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(integer) = s.parse::<BigInt>() {
            return Ok(Self::Integer(integer));
        }
        s.parse::<f64>()
            .map(Self::Decimal)
            .map_err(|_| OctetError::SerializationError(format!("{s:?} is not a number")))
    }
}

/// Mask selecting the low `bits` bits of a `u64`.
pub(crate) const fn width_mask(bits: u32) -> u64 {
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}

/// Sign-extend the low `bits` bits of `pattern`.
pub(crate) const fn sign_extend(bits: u32, pattern: u64) -> i64 {
    let shift = 64 - bits;
    ((pattern << shift) as i64) >> shift
}

impl Numeric for Number {
    fn kind(&self) -> NumberKind {
        match self {
            Self::Integer(_) => NumberKind::Integer,
            Self::Decimal(_) => NumberKind::Decimal,
        }
    }

    fn to_fixed_width_integer(&self, bits: u32) -> Result<FixedWidth, OctetError> {
        let Self::Integer(value) = self else {
            return Err(OctetError::TypeMismatch {
                operand: None,
                expected: OperandKind::Integer,
                found: OperandKind::Decimal,
            });
        };

        // Low 64 bits of |value|, then negate modulo 2^64 for negatives.
        let (sign, digits) = value.to_u64_digits();
        let low = digits.first().copied().unwrap_or(0);
        let beyond_64 = digits.len() > 1;
        let full = match sign {
            BigSign::Minus => low.wrapping_neg(),
            _ => low,
        };
        let pattern = full & width_mask(bits);

        let min_signed = -(BigInt::from(1) << (bits - 1));
        let max_unsigned = (BigInt::from(1) << bits) - 1;
        let wrapped = beyond_64 || *value < min_signed || *value > max_unsigned;

        Ok(FixedWidth { pattern, wrapped })
    }

    fn from_fixed_width_integer(bits: u32, sign: Sign, pattern: u64) -> Self {
        let pattern = pattern & width_mask(bits);
        match sign {
            Sign::Unsigned => Self::Integer(pattern.into()),
            Sign::Signed => Self::Integer(sign_extend(bits, pattern).into()),
        }
    }

    fn to_float(&self) -> Option<f64> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Integer(_) => None,
        }
    }

    fn from_float(value: f64) -> Self {
        Self::Decimal(value)
    }

    fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => i64::try_from(i).ok(),
            Self::Decimal(_) => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
