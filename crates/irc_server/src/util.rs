//! ASCII case folding, name validation (§4.1) and time stamping.

use std::time::{SystemTime, UNIX_EPOCH};

/// ASCII-only lower-casing. Non-ASCII bytes pass through unchanged, so
/// two strings that differ only by non-ASCII case are *not* equal under
/// fold (§9, "String case folding").
pub fn fold(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// `isValidNickname` from §4.1 / §8: length 1..9, first char letter or
/// underscore, subsequent chars letter/digit/underscore.
pub fn is_valid_nickname(s: &str) -> bool {
    if s.is_empty() || s.len() > 9 {
        return false;
    }
    let mut chars = s.chars();
    let first = chars.next().unwrap();
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Channel name validation from §4.1: starts with '#', length 2..50, no
/// space, comma, or control byte.
pub fn is_valid_channel_name(s: &str) -> bool {
    if s.len() < 2 || s.len() > 50 {
        return false;
    }
    if !s.starts_with('#') {
        return false;
    }
    s.bytes().all(|b| b != b' ' && b != b',' && b >= 0x20)
}

/// Seconds since the Unix epoch, used for channel topic timestamps.
pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
