//! # Formats
//!
//! Text representations a [`ByteBuffer`](crate::ByteBuffer) is persisted in.

pub mod persistence;

pub use persistence::{
    buffer_from_legacy_decimal, buffer_from_persisted, buffer_to_legacy_decimal,
    buffer_to_persisted, load_buffer,
};
