//! Shared helpers.

pub mod encoding;

pub use encoding::{decode_bytes, read_text, DecodedText};
