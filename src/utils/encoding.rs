//! Report decoding with BOM handling and encoding detection.
//!
//! Spreadsheet exports arrive as UTF-8 with or without a BOM, as UTF-16, or
//! in a legacy single-byte code page. Everything is decoded to a `String`
//! before parsing so header matching sees clean text.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::io;
use std::path::Path;

/// Text decoded from a report file, plus the label of the encoding used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub content: String,
    pub encoding: String,
}

/// Read a whole file and decode it to text.
///
/// I/O failures are returned as-is; undecodable byte sequences are replaced
/// rather than treated as errors.
pub fn read_text(path: &Path) -> io::Result<DecodedText> {
    let bytes = std::fs::read(path)?;
    Ok(decode_bytes(&bytes))
}

/// Decode raw bytes.
///
/// Strategy:
/// 1. A BOM picks the encoding and is stripped
/// 2. Strict UTF-8 (fast path)
/// 3. chardetng guess, decoded with replacement
pub fn decode_bytes(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        let label = if encoding == UTF_8 {
            "utf-8-sig".to_string()
        } else {
            encoding.name().to_lowercase()
        };
        return DecodedText { content: decoded.into_owned(), encoding: label };
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedText { content: text.to_string(), encoding: "utf-8".to_string() };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _) = encoding.decode_without_bom_handling(bytes);

    DecodedText { content: decoded.into_owned(), encoding: encoding.name().to_lowercase() }
}
