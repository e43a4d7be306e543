//! # Byte Buffer
//!
//! The sole binary carrier of Octet.
//!
//! A `ByteBuffer` owns a contiguous run of bytes whose length is fixed when
//! the buffer is created. Bytes may be rewritten in place, but the buffer can
//! never grow or shrink, so every positional access is checked against the
//! same length for the buffer's whole lifetime.

use crate::numeric::Numeric;
use crate::OctetError;
use std::fmt;

/// A fixed-length, mutable, exclusively owned byte sequence.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteBuffer {
    bytes: Box<[u8]>,
}

impl ByteBuffer {
    /// Allocate `len` zero-initialized bytes.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len].into_boxed_slice(),
        }
    }

    /// Create a buffer from a host number.
    ///
    /// Fails with `InvalidSize` when `n` is not an integer, is negative, or
    /// exceeds `max_len`.
    pub fn create<N: Numeric>(n: &N, max_len: usize) -> Result<Self, OctetError> {
        let len = n
            .to_i64()
            .ok_or_else(|| OctetError::InvalidSize("size is not a 64-bit integer".to_string()))?;
        if len < 0 {
            return Err(OctetError::InvalidSize(format!("size {len} is negative")));
        }
        let len = usize::try_from(len)
            .map_err(|_| OctetError::InvalidSize(format!("size {len} is not addressable")))?;
        check_len(len, max_len)?;
        Ok(Self::zeroed(len))
    }

    /// Owning copy of `bytes`.
    #[must_use]
    pub fn from_raw_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrowed view of the bytes.
    #[must_use]
    pub fn raw_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable view of the bytes. The length stays fixed.
    pub fn raw_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.into_vec()
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} bytes>", self.len())
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByteBuffer").field(&&*self.bytes).finish()
    }
}

/// Reject lengths above the configured maximum.
pub(crate) fn check_len(len: usize, max_len: usize) -> Result<(), OctetError> {
    if len > max_len {
        return Err(OctetError::InvalidSize(format!(
            "{len} bytes exceeds maximum allowed {max_len} bytes"
        )));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
