#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! base64 is a strict wrapper around standard, padded base64. OpenSSH key files only ever use
//! the standard alphabet with `=` padding, so anything else is rejected up front with an
//! `InvalidEncoding` error that names the problem.

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;

use crate::{Error, Result};

/// decode converts padded base64 text into bytes. The input length must be a positive multiple
/// of 4 and every character must come from `[A-Za-z0-9+/=]`, with `=` only allowed as one or two
/// trailing padding characters.
pub fn decode(ascii: &str) -> Result<Vec<u8>> {
    if ascii.is_empty() || ascii.len() % 4 != 0 {
        return Err(Error::InvalidEncoding(format!(
            "length {} is not a positive multiple of 4",
            ascii.len()
        )));
    }
    if let Some((i, c)) = ascii
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '+' || *c == '/' || *c == '='))
    {
        return Err(Error::InvalidEncoding(format!(
            "character {:?} at offset {} is outside the base64 alphabet",
            c, i
        )));
    }

    // Padding may only appear at the very end, and at most twice.
    let body = ascii.trim_end_matches('=');
    let padding = ascii.len() - body.len();
    if padding > 2 || body.contains('=') {
        return Err(Error::InvalidEncoding("misplaced padding".to_string()));
    }

    STANDARD
        .decode(ascii)
        .map_err(|e| Error::InvalidEncoding(e.to_string()))
}

/// encode converts bytes into padded base64 text. The output length is always a multiple of 4.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
