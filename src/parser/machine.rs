//! The URL state machine.
//!
//! The input is pre-decoded into a code-point vector and driven by a signed
//! pointer; a past-the-end position acts as the EOF sentinel. Each step
//! dispatches on the current state and the code point under the pointer.
//! States rewind by decrementing the pointer so the same code point is
//! re-examined under the next state; all pointer arithmetic is in code-point
//! units, including the authority rewind by buffer length.

use super::State;
use crate::checkers::parse_port_digits;
use crate::compat::{String, ToString, Vec};
use crate::encoding;
use crate::error::{ParseError, Result};
use crate::helpers;
use crate::host::Host;
use crate::record::{UrlRecord, is_normalized_windows_drive_letter, is_windows_drive_letter};

/// Parse `input` into a URL record.
///
/// `base` resolves relative inputs. `existing` is a record to continue from
/// (setter re-parses); when it is absent the input is trimmed of leading and
/// trailing C0 controls and space. `state_override` selects the start state;
/// the default is a full parse from `SchemeStart`.
///
/// Failure never leaves a partially mutated record behind: the machine owns
/// its record and callers swap it in only on success.
pub fn parse_url(
    input: &str,
    base: Option<&UrlRecord>,
    existing: Option<UrlRecord>,
    state_override: Option<State>,
) -> Result<UrlRecord> {
    let trimmed = if existing.is_some() {
        input
    } else {
        helpers::trim_c0_controls_and_space(input)
    };
    // Tabs and newlines are stripped everywhere, trimmed or not
    let cleaned = helpers::strip_tabs_and_newlines(trimmed);
    let input: Vec<char> = cleaned.chars().collect();

    let mut url = existing.unwrap_or_default();
    let mut state = state_override.unwrap_or(State::SchemeStart);
    let mut buffer = String::new();
    let mut at_sign_seen = false;
    let mut inside_brackets = false;
    let mut password_token_seen = false;

    let len = input.len() as isize;
    let mut pointer: isize = 0;

    while pointer <= len {
        let c = if (0..len).contains(&pointer) {
            Some(input[pointer as usize])
        } else {
            None
        };

        match state {
            State::SchemeStart => {
                if let Some(c) = c
                    && c.is_ascii_alphabetic()
                {
                    buffer.push(c.to_ascii_lowercase());
                    state = State::Scheme;
                } else if state_override.is_none() {
                    state = State::NoScheme;
                    pointer -= 1;
                } else {
                    return Err(ParseError::InvalidScheme);
                }
            }

            State::Scheme => {
                if let Some(c) = c
                    && (c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                {
                    buffer.push(c.to_ascii_lowercase());
                } else if c == Some(':') {
                    if state_override.is_some() {
                        let old_special = url.is_special();
                        let new_special = crate::scheme::get_scheme_type(&buffer).is_special();
                        // Switching between special and non-special is a no-op
                        if old_special != new_special {
                            return Ok(url);
                        }
                        if buffer == "file" && (url.includes_credentials() || url.port.is_some()) {
                            return Ok(url);
                        }
                        if url.scheme == "file" && url.has_empty_host() {
                            return Ok(url);
                        }
                    }
                    url.scheme = core::mem::take(&mut buffer);
                    if state_override.is_some() {
                        if url.port == url.scheme_type().default_port() {
                            url.port = None;
                        }
                        return Ok(url);
                    }
                    if url.scheme == "file" {
                        state = State::File;
                    } else if url.is_special() && base.is_some_and(|b| b.scheme == url.scheme) {
                        state = State::SpecialRelativeOrAuthority;
                    } else if url.is_special() {
                        state = State::SpecialAuthoritySlashes;
                    } else if remaining_starts_with(&input, pointer, "/") {
                        state = State::PathOrAuthority;
                        pointer += 1;
                    } else {
                        url.opaque_path = true;
                        url.path.clear();
                        url.path.push(String::new());
                        state = State::OpaquePath;
                    }
                } else if state_override.is_none() {
                    // Not a scheme after all; start over as a schemeless input
                    buffer.clear();
                    state = State::NoScheme;
                    pointer = -1;
                } else {
                    return Err(ParseError::InvalidScheme);
                }
            }

            State::NoScheme => {
                let Some(base) = base else {
                    return Err(ParseError::RelativeUrlWithoutBase);
                };
                if base.opaque_path {
                    // Only a fragment can be resolved against an opaque path
                    if c != Some('#') {
                        return Err(ParseError::RelativeUrlWithoutBase);
                    }
                    url.scheme = base.scheme.clone();
                    url.path = base.path.clone();
                    url.opaque_path = true;
                    url.query = base.query.clone();
                    url.fragment = Some(String::new());
                    state = State::Fragment;
                } else if base.scheme == "file" {
                    state = State::File;
                    pointer -= 1;
                } else {
                    state = State::Relative;
                    pointer -= 1;
                }
            }

            State::SpecialRelativeOrAuthority => {
                if c == Some('/') && remaining_starts_with(&input, pointer, "/") {
                    state = State::SpecialAuthorityIgnoreSlashes;
                    pointer += 1;
                } else {
                    state = State::Relative;
                    pointer -= 1;
                }
            }

            State::PathOrAuthority => {
                if c == Some('/') {
                    state = State::Authority;
                } else {
                    state = State::Path;
                    pointer -= 1;
                }
            }

            State::Relative => {
                let Some(base) = base else {
                    return Err(ParseError::RelativeUrlWithoutBase);
                };
                url.scheme = base.scheme.clone();
                if c == Some('/') || (url.is_special() && c == Some('\\')) {
                    state = State::RelativeSlash;
                } else {
                    url.username = base.username.clone();
                    url.password = base.password.clone();
                    url.host = base.host.clone();
                    url.port = base.port;
                    url.path = base.path.clone();
                    url.opaque_path = base.opaque_path;
                    url.query = base.query.clone();
                    if c == Some('?') {
                        url.query = Some(String::new());
                        state = State::Query;
                    } else if c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    } else if c.is_some() {
                        url.query = None;
                        url.shorten_path();
                        state = State::Path;
                        pointer -= 1;
                    }
                }
            }

            State::RelativeSlash => {
                if url.is_special() && matches!(c, Some('/') | Some('\\')) {
                    state = State::SpecialAuthorityIgnoreSlashes;
                } else if c == Some('/') {
                    state = State::Authority;
                } else {
                    let Some(base) = base else {
                        return Err(ParseError::RelativeUrlWithoutBase);
                    };
                    url.username = base.username.clone();
                    url.password = base.password.clone();
                    url.host = base.host.clone();
                    url.port = base.port;
                    state = State::Path;
                    pointer -= 1;
                }
            }

            State::SpecialAuthoritySlashes => {
                state = State::SpecialAuthorityIgnoreSlashes;
                if c == Some('/') && remaining_starts_with(&input, pointer, "/") {
                    pointer += 1;
                } else {
                    pointer -= 1;
                }
            }

            State::SpecialAuthorityIgnoreSlashes => {
                if !matches!(c, Some('/') | Some('\\')) {
                    state = State::Authority;
                    pointer -= 1;
                }
                // Extra slashes before the authority are skipped
            }

            State::Authority => {
                if c == Some('@') {
                    // Everything up to the last '@' is userinfo; a second '@'
                    // re-encodes the earlier chunk into the username
                    if at_sign_seen {
                        buffer.insert_str(0, "%40");
                    }
                    at_sign_seen = true;
                    let chunk = core::mem::take(&mut buffer);
                    for code_point in chunk.chars() {
                        if code_point == ':' && !password_token_seen {
                            password_token_seen = true;
                            continue;
                        }
                        let target = if password_token_seen {
                            &mut url.password
                        } else {
                            &mut url.username
                        };
                        encoding::percent_encode_char(target, code_point, encoding::USERINFO);
                    }
                } else if c.is_none()
                    || matches!(c, Some('/') | Some('?') | Some('#'))
                    || (url.is_special() && c == Some('\\'))
                {
                    if at_sign_seen && buffer.is_empty() {
                        return Err(ParseError::InvalidHost);
                    }
                    // Rewind past the buffered host-and-beyond and reparse it
                    pointer -= buffer.chars().count() as isize + 1;
                    buffer.clear();
                    state = State::Host;
                } else if let Some(c) = c {
                    buffer.push(c);
                }
            }

            State::Host | State::Hostname => {
                if state_override.is_some() && url.scheme == "file" {
                    pointer -= 1;
                    state = State::FileHost;
                } else if c == Some(':') && !inside_brackets {
                    if buffer.is_empty() {
                        return Err(ParseError::InvalidHost);
                    }
                    // The hostname setter refuses a port separator
                    if state_override == Some(State::Hostname) {
                        return Ok(url);
                    }
                    let host = Host::parse(&buffer, !url.is_special())?;
                    url.host = Some(host);
                    buffer.clear();
                    state = State::Port;
                } else if c.is_none()
                    || matches!(c, Some('/') | Some('?') | Some('#'))
                    || (url.is_special() && c == Some('\\'))
                {
                    pointer -= 1;
                    if url.is_special() && buffer.is_empty() {
                        return Err(ParseError::InvalidHost);
                    }
                    if state_override.is_some()
                        && buffer.is_empty()
                        && (url.includes_credentials() || url.port.is_some())
                    {
                        return Ok(url);
                    }
                    let host = Host::parse(&buffer, !url.is_special())?;
                    url.host = Some(host);
                    buffer.clear();
                    if state_override.is_some() {
                        return Ok(url);
                    }
                    state = State::PathStart;
                } else if let Some(c) = c {
                    if c == '[' {
                        inside_brackets = true;
                    }
                    if c == ']' {
                        inside_brackets = false;
                    }
                    buffer.push(c);
                }
            }

            State::Port => {
                if let Some(c) = c
                    && c.is_ascii_digit()
                {
                    buffer.push(c);
                } else if c.is_none()
                    || matches!(c, Some('/') | Some('?') | Some('#'))
                    || (url.is_special() && c == Some('\\'))
                    || state_override.is_some()
                {
                    if !buffer.is_empty() {
                        let port = parse_port_digits(&buffer)?;
                        url.port = if url.scheme_type().default_port() == Some(port) {
                            None
                        } else {
                            Some(port)
                        };
                        buffer.clear();
                    }
                    if state_override.is_some() {
                        return Ok(url);
                    }
                    state = State::PathStart;
                    pointer -= 1;
                } else {
                    return Err(ParseError::InvalidPort);
                }
            }

            State::File => {
                url.scheme = "file".to_string();
                url.host = Some(Host::Domain(String::new()));
                if matches!(c, Some('/') | Some('\\')) {
                    state = State::FileSlash;
                } else if let Some(base) = base
                    && base.scheme == "file"
                {
                    url.host = base.host.clone();
                    url.path = base.path.clone();
                    url.query = base.query.clone();
                    if c == Some('?') {
                        url.query = Some(String::new());
                        state = State::Query;
                    } else if c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    } else if c.is_some() {
                        url.query = None;
                        if starts_with_windows_drive_letter(&input, pointer) {
                            // The drive letter replaces the base path wholesale
                            url.path.clear();
                        } else {
                            url.shorten_path();
                        }
                        state = State::Path;
                        pointer -= 1;
                    }
                } else {
                    state = State::Path;
                    pointer -= 1;
                }
            }

            State::FileSlash => {
                if matches!(c, Some('/') | Some('\\')) {
                    state = State::FileHost;
                } else {
                    if let Some(base) = base
                        && base.scheme == "file"
                    {
                        url.host = base.host.clone();
                        if !starts_with_windows_drive_letter(&input, pointer)
                            && let Some(first) = base.path.first()
                            && is_normalized_windows_drive_letter(first)
                        {
                            url.path.push(first.clone());
                        }
                    }
                    state = State::Path;
                    pointer -= 1;
                }
            }

            State::FileHost => {
                if c.is_none() || matches!(c, Some('/') | Some('\\') | Some('?') | Some('#')) {
                    pointer -= 1;
                    if state_override.is_none() && is_windows_drive_letter(&buffer) {
                        // Not a host after all; the buffer becomes the first
                        // path segment
                        state = State::Path;
                    } else if buffer.is_empty() {
                        url.host = Some(Host::Domain(String::new()));
                        if state_override.is_some() {
                            return Ok(url);
                        }
                        state = State::PathStart;
                    } else {
                        let mut host = Host::parse(&buffer, !url.is_special())?;
                        if matches!(&host, Host::Domain(domain) if domain == "localhost") {
                            host = Host::Domain(String::new());
                        }
                        url.host = Some(host);
                        if state_override.is_some() {
                            return Ok(url);
                        }
                        buffer.clear();
                        state = State::PathStart;
                    }
                } else if let Some(c) = c {
                    buffer.push(c);
                }
            }

            State::PathStart => {
                if url.is_special() {
                    state = State::Path;
                    if !matches!(c, Some('/') | Some('\\')) {
                        pointer -= 1;
                    }
                } else if state_override.is_none() && c == Some('?') {
                    url.query = Some(String::new());
                    state = State::Query;
                } else if state_override.is_none() && c == Some('#') {
                    url.fragment = Some(String::new());
                    state = State::Fragment;
                } else if c.is_some() {
                    state = State::Path;
                    if c != Some('/') {
                        pointer -= 1;
                    }
                } else if state_override.is_some() && url.host.is_none() {
                    url.path.push(String::new());
                }
            }

            State::Path => {
                if c.is_none()
                    || c == Some('/')
                    || (url.is_special() && c == Some('\\'))
                    || (state_override.is_none() && matches!(c, Some('?') | Some('#')))
                {
                    let slash_terminated = c == Some('/') || (url.is_special() && c == Some('\\'));
                    let mut segment = core::mem::take(&mut buffer);
                    if is_double_dot_segment(&segment) {
                        url.shorten_path();
                        if !slash_terminated {
                            url.path.push(String::new());
                        }
                    } else if is_single_dot_segment(&segment) {
                        if !slash_terminated {
                            url.path.push(String::new());
                        }
                    } else {
                        if url.scheme == "file"
                            && url.path.is_empty()
                            && is_windows_drive_letter(&segment)
                        {
                            // file: first path segments normalize X| to X:
                            segment.replace_range(1..2, ":");
                        }
                        url.path.push(segment);
                    }
                    if c == Some('?') {
                        url.query = Some(String::new());
                        state = State::Query;
                    } else if c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    }
                } else if let Some(c) = c {
                    encoding::percent_encode_char(&mut buffer, c, encoding::PATH);
                }
            }

            State::OpaquePath => {
                if c == Some('?') {
                    url.query = Some(String::new());
                    state = State::Query;
                } else if c == Some('#') {
                    url.fragment = Some(String::new());
                    state = State::Fragment;
                } else if let Some(c) = c
                    && let Some(segment) = url.path.first_mut()
                {
                    if c == ' ' {
                        // A space directly before the query or fragment is
                        // encoded; the peek is one code point only
                        let next = input.get(pointer as usize + 1).copied();
                        if matches!(next, Some('?' | '#')) {
                            segment.push_str("%20");
                        } else {
                            segment.push(' ');
                        }
                    } else {
                        encoding::percent_encode_char(segment, c, encoding::C0_CONTROL);
                    }
                }
            }

            State::Query => {
                if c.is_none() || (state_override.is_none() && c == Some('#')) {
                    let encode_set = if url.is_special() {
                        encoding::SPECIAL_QUERY
                    } else {
                        encoding::QUERY
                    };
                    let chunk = core::mem::take(&mut buffer);
                    let query = url.query.get_or_insert_with(String::new);
                    encoding::percent_encode_into(query, &chunk, encode_set);
                    if c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    }
                } else if let Some(c) = c {
                    buffer.push(c);
                }
            }

            State::Fragment => {
                if let Some(c) = c {
                    let fragment = url.fragment.get_or_insert_with(String::new);
                    encoding::percent_encode_char(fragment, c, encoding::FRAGMENT);
                }
            }
        }

        pointer += 1;
    }

    Ok(url)
}

/// Check whether `input` after the pointer position starts with `prefix`.
/// "Remaining" excludes the code point under the pointer itself.
fn remaining_starts_with(input: &[char], pointer: isize, prefix: &str) -> bool {
    let start = (pointer + 1) as usize;
    prefix
        .chars()
        .enumerate()
        .all(|(i, p)| input.get(start + i) == Some(&p))
}

/// A Windows drive letter at the pointer: two code points forming a drive
/// letter, at end of input or followed by `/`, `\`, `?`, or `#`.
fn starts_with_windows_drive_letter(input: &[char], pointer: isize) -> bool {
    let start = (pointer.max(0) as usize).min(input.len());
    let rest = &input[start..];
    rest.len() >= 2
        && rest[0].is_ascii_alphabetic()
        && matches!(rest[1], ':' | '|')
        && (rest.len() == 2 || matches!(rest[2], '/' | '\\' | '?' | '#'))
}

fn is_single_dot_segment(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

fn is_double_dot_segment(segment: &str) -> bool {
    segment == ".."
        || segment.eq_ignore_ascii_case(".%2e")
        || segment.eq_ignore_ascii_case("%2e.")
        || segment.eq_ignore_ascii_case("%2e%2e")
}
