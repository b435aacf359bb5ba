//! PDF text string encoding.

use lopdf::{Object, StringFormat};

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];

/// Encodes `value` as a PDF text string.
///
/// ASCII stays a literal string; anything else is written as UTF-16BE with a
/// byte order mark.
pub(crate) fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }
    let mut bytes = UTF16_BOM.to_vec();
    bytes.extend(value.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decodes a PDF text string (UTF-16BE with BOM, otherwise byte-per-char).
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&UTF16_BOM) {
        Some(rest) => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => bytes.iter().copied().map(char::from).collect(),
    }
}

/// Name object bytes as text.
pub(crate) fn name_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
