//! WinAnsi (Windows-1252) helpers.
//!
//! The standard Helvetica pair is written as simple fonts with
//! `/WinAnsiEncoding`, so every character drawn with it must map to a single
//! byte of that code page.

use encoding_rs::WINDOWS_1252;

/// The WinAnsi byte for `ch`, if the code page has one.
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        return Some(ch as u8);
    }
    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
    match (had_errors, bytes.as_ref()) {
        (false, [b]) => Some(*b),
        _ => None,
    }
}

/// Encodes `text` for a `Tj` operand; unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}
