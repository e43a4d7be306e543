//! # Core Type Definitions
//!
//! This module contains the small vocabulary shared by every codec:
//! - Option tags (`Sign`, `Endianness`)
//! - Operand kinds used for signature checks (`OperandKind`)
//! - Error types (`OctetError`)
//!
//! Option tags carry no data. They only select how bytes are interpreted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// SIGN OPTION
// =============================================================================

/// Signedness used when interpreting integer bytes.
///
/// Affects interpretation only: the stored bit pattern of a value is the
/// same under both options.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Values are read as `0..=2^n-1`.
    #[default]
    Unsigned,
    /// Values are read as two's complement.
    Signed,
}

impl Sign {
    /// Canonical tag name of this option.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Unsigned => "Data.Sign.Unsigned",
            Self::Signed => "Data.Sign.Signed",
        }
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Signed)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Sign {
    type Err = OctetError;

    /// Accepts the canonical tag, the bare name, or any casing of either.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("Data.Sign.").unwrap_or(s);
        match name.to_ascii_lowercase().as_str() {
            "unsigned" => Ok(Self::Unsigned),
            "signed" => Ok(Self::Signed),
            _ => Err(OctetError::InvalidOption {
                operand: None,
                expected: "a sign specification",
            }),
        }
    }
}

// =============================================================================
// ENDIANNESS OPTION
// =============================================================================

/// Byte order used when assembling or splitting multi-byte values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Endianness {
    /// Least significant byte first. The default when the option is omitted.
    #[default]
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

impl Endianness {
    /// Canonical tag name of this option.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::LittleEndian => "Data.Endianness.Little-endian",
            Self::BigEndian => "Data.Endianness.Big-endian",
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Endianness {
    type Err = OctetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("Data.Endianness.").unwrap_or(s);
        match name.to_ascii_lowercase().as_str() {
            "little-endian" | "littleendian" | "little" | "le" => Ok(Self::LittleEndian),
            "big-endian" | "bigendian" | "big" | "be" => Ok(Self::BigEndian),
            _ => Err(OctetError::InvalidOption {
                operand: None,
                expected: "an endianness specification",
            }),
        }
    }
}

// =============================================================================
// OPERAND KINDS
// =============================================================================

/// The closed set of operand shapes an operation may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Buffer,
    Text,
    List,
    Number,
    Integer,
    Decimal,
    Sign,
    Endianness,
    Symbol,
    /// Marks a missing operand in arity diagnostics.
    Nothing,
}

impl OperandKind {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Buffer => "a byte buffer",
            Self::Text => "a string",
            Self::List => "a list",
            Self::Number => "a number",
            Self::Integer => "an integer number",
            Self::Decimal => "a decimal number",
            Self::Sign => "a sign specification",
            Self::Endianness => "an endianness specification",
            Self::Symbol => "a symbol",
            Self::Nothing => "nothing",
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in an Octet operation.
///
/// - Every error is local to the single call that raised it
/// - Validation happens before mutation, so a failed call leaves no partial writes
/// - The core never panics; all errors are recoverable
#[derive(Debug, Error)]
pub enum OctetError {
    /// A requested buffer size is negative, non-integral or too large.
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// An operand has the wrong kind.
    #[error("Type mismatch{}: expected {expected}, found {found}", at(.operand))]
    TypeMismatch {
        operand: Option<usize>,
        expected: OperandKind,
        found: OperandKind,
    },

    /// An optional operand is not a recognised sign/endianness tag.
    #[error("Invalid option{}: expression is not {expected}", at(.operand))]
    InvalidOption {
        operand: Option<usize>,
        expected: &'static str,
    },

    /// The text is not valid Base64.
    #[error("Invalid Base64: {0}")]
    InvalidBase64(String),

    /// The text is not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// A list element cannot be stored in one byte.
    #[error("Invalid element at index {index}: {reason}")]
    InvalidElement { index: usize, reason: String },

    /// A positional access falls outside the buffer.
    #[error("Index out of range: position {position} with width {width} in a {length}-byte buffer")]
    IndexOutOfRange {
        position: String,
        width: usize,
        length: usize,
    },

    /// No operation with this name exists.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The operand count is outside the operation's signature.
    #[error("{operation} takes {min} to {max} operands, got {found}")]
    ArityMismatch {
        operation: &'static str,
        min: usize,
        max: usize,
        found: usize,
    },

    /// A codec failure attributed to a specific operand.
    #[error("operand {operand}: {source}")]
    AtOperand {
        operand: usize,
        #[source]
        source: Box<OctetError>,
    },

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

fn at(operand: &Option<usize>) -> String {
    operand.map(|i| format!(" at operand {i}")).unwrap_or_default()
}

impl OctetError {
    /// Attach the index of the offending operand.
    ///
    /// Errors that already name an operand keep their own index.
    #[must_use]
    pub fn at_operand(self, operand: usize) -> Self {
        match self {
            Self::TypeMismatch {
                operand: None,
                expected,
                found,
            } => Self::TypeMismatch {
                operand: Some(operand),
                expected,
                found,
            },
            Self::InvalidOption {
                operand: None,
                expected,
            } => Self::InvalidOption {
                operand: Some(operand),
                expected,
            },
            e @ (Self::TypeMismatch { .. }
            | Self::InvalidOption { .. }
            | Self::AtOperand { .. }
            | Self::UnknownOperation(_)
            | Self::ArityMismatch { .. }) => e,
            other => Self::AtOperand {
                operand,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error with any operand attribution removed.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::AtOperand { source, .. } => source.root(),
            other => other,
        }
    }

    /// Index of the offending operand, if known.
    #[must_use]
    pub fn operand(&self) -> Option<usize> {
        match self {
            Self::AtOperand { operand, .. } => Some(*operand),
            Self::TypeMismatch { operand, .. } | Self::InvalidOption { operand, .. } => *operand,
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
