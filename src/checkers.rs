use crate::error::{ParseError, Result};

/// Check whether a hostname string ends in an IPv4 number.
/// The last dot-separated label (ignoring one trailing dot) must be a valid
/// IPv4 number: all decimal digits, or `0x`/`0X` followed by hex digits.
/// Hosts that pass this check are handed to the full IPv4 parser.
pub fn ends_in_ipv4_number(input: &str) -> bool {
    let input = input.strip_suffix('.').unwrap_or(input);

    let last_label = input.rsplit('.').next().unwrap_or(input);
    if last_label.is_empty() {
        return false;
    }

    if last_label.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }

    if let Some(hex_part) = last_label
        .strip_prefix("0x")
        .or_else(|| last_label.strip_prefix("0X"))
    {
        return hex_part.bytes().all(|b| b.is_ascii_hexdigit());
    }

    false
}

/// Parse the digit buffer the port state accumulated into a port number.
/// Leading zeros are allowed; the value must fit 16 bits.
pub fn parse_port_digits(digits: &str) -> Result<u16> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidPort);
    }
    match digits.parse::<u32>() {
        Ok(value) if value <= u32::from(u16::MAX) => Ok(value as u16),
        _ => Err(ParseError::InvalidPort),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_in_ipv4_number() {
        // Decimal
        assert!(ends_in_ipv4_number("192.168.1.1"));
        assert!(ends_in_ipv4_number("127.0.0.1"));
        assert!(ends_in_ipv4_number("192.168.1.1.")); // Trailing dot
        assert!(ends_in_ipv4_number("foo.127")); // Only the last label counts

        // Hexadecimal (requires 0x prefix)
        assert!(ends_in_ipv4_number("0xC0A80101"));
        assert!(ends_in_ipv4_number("192.0x00A80001"));
        assert!(ends_in_ipv4_number("0x")); // Bare "0x" is a valid (zero) number
        assert!(ends_in_ipv4_number("foo.0X"));

        // Not IPv4
        assert!(!ends_in_ipv4_number(""));
        assert!(!ends_in_ipv4_number("."));
        assert!(!ends_in_ipv4_number("example.com"));
        assert!(!ends_in_ipv4_number("192.168.1.g"));
        assert!(!ends_in_ipv4_number("ab")); // Bare hex without 0x prefix
    }

    #[test]
    fn test_parse_port_digits() {
        assert_eq!(parse_port_digits("80"), Ok(80));
        assert_eq!(parse_port_digits("8080"), Ok(8080));
        assert_eq!(parse_port_digits("0000000080"), Ok(80)); // Leading zeros
        assert_eq!(parse_port_digits("65535"), Ok(65535));
        assert_eq!(parse_port_digits("65536"), Err(ParseError::InvalidPort));
        assert_eq!(
            parse_port_digits("99999999999999"),
            Err(ParseError::InvalidPort)
        );
        assert_eq!(parse_port_digits("8a"), Err(ParseError::InvalidPort));
        assert_eq!(parse_port_digits(""), Err(ParseError::InvalidPort));
    }
}
