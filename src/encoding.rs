use crate::compat::{Cow, String};
use crate::error::{ParseError, Result};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use unicode_normalization::UnicodeNormalization;

// Percent-encode sets following the WHATWG URL spec,
// https://url.spec.whatwg.org/#percent-encoded-bytes
// Each set is the previous one plus additions. `CONTROLS` covers exactly
// the C0 controls; bytes above 0x7E are always escaped by the encoder.

/// C0 control percent-encode set
pub const C0_CONTROL: &AsciiSet = CONTROLS;

/// Fragment percent-encode set: C0 control + space, ", <, >, `
pub const FRAGMENT: &AsciiSet = &C0_CONTROL
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Query percent-encode set: C0 control + space, ", #, <, >
pub const QUERY: &AsciiSet = &C0_CONTROL
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// Special-query percent-encode set: query + '
/// Used for the query of special URLs (http, https, ws, wss, ftp, file).
pub const SPECIAL_QUERY: &AsciiSet = &QUERY.add(b'\'');

/// Path percent-encode set: query + ?, ^, `, {, }
pub const PATH: &AsciiSet = &QUERY.add(b'?').add(b'^').add(b'`').add(b'{').add(b'}');

/// Userinfo percent-encode set: path + /, :, ;, =, @, [, \, ], |
pub const USERINFO: &AsciiSet = &PATH
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'|');

/// Component percent-encode set: userinfo + $, %, &, +, ,
pub const COMPONENT: &AsciiSet = &USERINFO
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',');

/// application/x-www-form-urlencoded percent-encode set:
/// component + !, ', (, ), ~
pub const FORM_URLENCODED: &AsciiSet = &COMPONENT
    .add(b'!')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'~');

/// Percent-encode a string into the buffer using the given encode set.
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    for chunk in utf8_percent_encode(input, encode_set) {
        buffer.push_str(chunk);
    }
}

/// Percent-encode a single code point into the buffer.
pub fn percent_encode_char(buffer: &mut String, c: char, encode_set: &'static AsciiSet) {
    let mut utf8 = [0u8; 4];
    percent_encode_into(buffer, c.encode_utf8(&mut utf8), encode_set);
}

/// Percent-decode a string and UTF-8 decode the result, lossily.
/// Malformed `%HH` triples pass through byte-for-byte.
pub fn percent_decode_utf8_lossy(input: &str) -> Cow<'_, str> {
    percent_decode_str(input).decode_utf8_lossy()
}

/// ASCII-only domain normalization. IDNA/Punycode processing is deliberately
/// out of scope: the domain is NFC-normalized, the ideographic full stops
/// U+3002, U+FF0E, and U+FF61 fold to '.', the result is lowercased, and
/// anything containing a C0 control, space, or '%' is rejected.
pub fn domain_to_ascii(domain: &str) -> Result<String> {
    let mapped: String = domain
        .nfc()
        .map(|c| match c {
            '\u{3002}' | '\u{FF0E}' | '\u{FF61}' => '.',
            c => c,
        })
        .collect();
    let lowered = mapped.to_lowercase();

    if lowered.bytes().any(|b| b <= 0x20 || b == b'%') {
        return Err(ParseError::InvalidDomainCharacter);
    }
    Ok(lowered)
}
