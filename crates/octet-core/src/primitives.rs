//! # Primitives
//!
//! Fixed constants for the Octet codecs.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! The buffer size limit is the only one a host may override (see
//! [`crate::facade::Limits`]).

/// Standard Base64 alphabet (`A–Z a–z 0–9 + /`).
pub const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Padding character appended for 1- or 2-byte remainders.
pub const BASE64_PAD: u8 = b'=';

/// Lowercase hex digits used by the hex encoder.
pub const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Code point substituted for malformed UTF-8 or unpaired UTF-16 surrogates.
pub const REPLACEMENT_CHARACTER: char = char::REPLACEMENT_CHARACTER;

/// Prefix of every canonical operation name.
pub const OPERATION_NAMESPACE: &str = "Data.";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Default maximum length of any buffer produced by an operation (256 MiB).
///
/// `CreateByteBuffer` and the decoding codecs reject anything larger with
/// `InvalidSize` instead of attempting the allocation.
pub const MAX_BUFFER_SIZE: usize = 256 * 1024 * 1024;

/// Maximum width of a positional slot in bytes.
pub const MAX_SLOT_SIZE: usize = 8;
