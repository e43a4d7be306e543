//! # Codecs
//!
//! Paired conversions between a [`ByteBuffer`](crate::ByteBuffer) and another
//! representation. Every codec is a set of free functions: nothing keeps a
//! reference to a buffer once the call returns.
//!
//! - [`text`]: UTF-8 text
//! - [`base64`]: padded standard Base64 text
//! - [`hex`]: lowercase hexadecimal text
//! - [`array`]: sequences of 8-bit integers

pub mod array;
pub mod base64;
pub mod hex;
pub mod text;

pub use array::{array_to_bytes, bytes_to_array};
pub use text::{bytes_to_string, string_to_bytes, utf16_to_bytes};
