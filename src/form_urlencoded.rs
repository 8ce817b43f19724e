//! Parser and serializer for the application/x-www-form-urlencoded format,
//! as used by HTML forms and URL query strings.
//!
//! Converts between a byte string and a sequence of (name, value) pairs.
//! Encoding is always UTF-8; the serialized form is ASCII-only.

use crate::compat::{String, Vec};
use crate::encoding::FORM_URLENCODED;
use percent_encoding::{percent_decode, percent_encode};

/// Convert a byte string in the urlencoded format into (name, value) pairs.
///
/// Pieces are split on `&` (empty pieces dropped) and on the first `=`;
/// a piece without `=` becomes a pair with an empty value. `+` decodes to
/// space in both halves before percent-decoding.
pub fn parse(input: &[u8]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for piece in input.split(|&b| b == b'&') {
        if piece.is_empty() {
            continue;
        }
        let (name, value) = match piece.iter().position(|&b| b == b'=') {
            Some(position) => (&piece[..position], &piece[position + 1..]),
            None => (piece, &[][..]),
        };
        pairs.push((decode_component(name), decode_component(value)));
    }
    pairs
}

fn decode_component(input: &[u8]) -> String {
    let unplused: Vec<u8> = input
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    let decoded: Vec<u8> = percent_decode(&unplused).collect();
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Convert (name, value) pairs into a urlencoded string.
pub fn serialize<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut output = String::new();
    for (name, value) in pairs {
        if !output.is_empty() {
            output.push('&');
        }
        byte_serialize(name, &mut output);
        output.push('=');
        byte_serialize(value, &mut output);
    }
    output
}

fn byte_serialize(input: &str, output: &mut String) {
    for byte in input.bytes() {
        if byte == b' ' {
            output.push('+');
        } else {
            for chunk in percent_encode(core::slice::from_ref(&byte), FORM_URLENCODED) {
                output.push_str(chunk);
            }
        }
    }
}
