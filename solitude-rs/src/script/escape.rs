//! Display-time escape decoding.
//!
//! Only two forms are recognised:
//!
//! | Sequence | Result                         |
//! |----------|--------------------------------|
//! | `\033`   | ESC (`0x1B`)                   |
//! | `\xHH`   | the byte `0xHH` (hex, any case) |
//!
//! Every other backslash, including `\n` and `\t`, is copied through as-is.
//! The output is bytes rather than text because `\xHH` can produce a lone
//! byte that is not valid UTF-8.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::bytes::{Captures, Regex};

fn escape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\\(?:033|x([0-9A-Fa-f]{2}))").expect("escape pattern is valid")
    })
}

/// Decode escapes in one left-to-right pass.
pub fn decode_escapes(src: &str) -> Vec<u8> {
    let bytes = src.as_bytes();
    if !bytes.contains(&b'\\') {
        return bytes.to_vec();
    }
    match escape_re().replace_all(bytes, |caps: &Captures<'_>| decode_one(caps)) {
        Cow::Borrowed(b) => b.to_vec(),
        Cow::Owned(v) => v,
    }
}

fn decode_one(caps: &Captures<'_>) -> [u8; 1] {
    match caps.get(1) {
        // Two ASCII hex digits, so both conversions succeed.
        Some(hex) => [std::str::from_utf8(hex.as_bytes())
            .ok()
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or_default()],
        None => [0x1b],
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
