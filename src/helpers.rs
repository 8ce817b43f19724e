use crate::compat::Cow;

/// Check if a character is an ASCII tab or newline
pub fn is_ascii_tab_or_newline(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

/// Fast check if string contains tabs or newlines
pub fn has_tabs_or_newline(input: &str) -> bool {
    memchr::memchr3(b'\t', b'\n', b'\r', input.as_bytes()).is_some()
}

/// Trim leading and trailing C0 controls and space.
/// Applied only to full parses; setter re-parses keep the input verbatim.
pub fn trim_c0_controls_and_space(input: &str) -> &str {
    input.trim_matches(|c: char| c as u32 <= 0x20)
}

/// Remove all ASCII tabs and newlines from the input.
/// Returns a Cow to avoid allocation in the common clean case.
pub fn strip_tabs_and_newlines(input: &str) -> Cow<'_, str> {
    if has_tabs_or_newline(input) {
        Cow::Owned(
            input
                .chars()
                .filter(|&c| !is_ascii_tab_or_newline(c))
                .collect(),
        )
    } else {
        Cow::Borrowed(input)
    }
}
