//! # octet-core
//!
//! Typed byte buffers and the codecs that move data in and out of them.
//!
//! This crate implements the CORE of Octet: a fixed-length mutable
//! [`ByteBuffer`] plus paired codecs for UTF-8 text, Base64, hexadecimal and
//! 8-bit integer arrays, and a positional accessor for fixed-width integers and
//! IEEE-754 floats. The [`Facade`] dispatches named operations over typed
//! operands for a host.
//!
//! ## Architectural Constraints
//!
//! - Every operation is a plain synchronous function
//! - No codec keeps a reference to a buffer after it returns
//! - A failed operation leaves its buffer untouched
//! - No I/O, no async, no global state

// =============================================================================
// MODULES
// =============================================================================

pub mod accessor;
pub mod buffer;
pub mod codec;
pub mod facade;
pub mod formats;
pub mod numeric;
pub mod primitives;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Endianness, OctetError, OperandKind, Sign};

// =============================================================================
// RE-EXPORTS: Buffer and Numbers
// =============================================================================

pub use buffer::ByteBuffer;
pub use numeric::{FixedWidth, Number, NumberKind, Numeric};

// =============================================================================
// RE-EXPORTS: Codecs and Accessor
// =============================================================================

pub use accessor::Slot;
pub use codec::{array_to_bytes, bytes_to_array, bytes_to_string, string_to_bytes, utf16_to_bytes};

// =============================================================================
// RE-EXPORTS: Facade
// =============================================================================

pub use facade::{Facade, Limits, Operand, Operation, OptionSlot, Signature, Value};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{buffer_from_persisted, buffer_to_persisted, load_buffer};
