use crate::checkers::ends_in_ipv4_number;
use crate::compat::String;
use crate::encoding;
use crate::error::{ParseError, Result};
use crate::ipv4::{parse_ipv4, serialize_ipv4};
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use core::fmt;

/// The host of a URL record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    /// An ASCII domain name; the empty string is the empty host.
    Domain(String),
    /// An opaque host of a non-special URL, percent-encoded.
    Opaque(String),
    /// An IPv4 address as a 32-bit integer.
    Ipv4(u32),
    /// An IPv6 address as eight 16-bit pieces, serialized inside
    /// `[...]` brackets so its colons are not port separators.
    Ipv6([u16; 8]),
}

/// Forbidden host code points: NUL, TAB, LF, CR, space, and the URL
/// delimiters that cannot appear in a domain.
fn is_forbidden_host_code_point(c: char) -> bool {
    matches!(
        c,
        '\0' | '\t'
            | '\n'
            | '\r'
            | ' '
            | '#'
            | '/'
            | ':'
            | '<'
            | '>'
            | '?'
            | '@'
            | '['
            | '\\'
            | ']'
            | '^'
            | '|'
    )
}

impl Host {
    /// Parse a host string. Dispatches between bracketed IPv6, opaque host
    /// (non-special schemes), IPv4, and domain.
    pub fn parse(input: &str, is_opaque: bool) -> Result<Self> {
        if let Some(rest) = input.strip_prefix('[') {
            let Some(inner) = rest.strip_suffix(']') else {
                return Err(ParseError::InvalidIpv6);
            };
            return parse_ipv6(inner).map(Host::Ipv6);
        }

        if is_opaque {
            return Self::parse_opaque(input);
        }

        let domain = encoding::percent_decode_utf8_lossy(input);

        if ends_in_ipv4_number(&domain) {
            return parse_ipv4(&domain).map(Host::Ipv4);
        }

        if domain.chars().any(is_forbidden_host_code_point) {
            return Err(ParseError::InvalidHost);
        }

        encoding::domain_to_ascii(&domain).map(Host::Domain)
    }

    /// Opaque hosts keep their spelling apart from C0-control encoding.
    /// Unlike domains, `:` and `%` are permitted here.
    fn parse_opaque(input: &str) -> Result<Self> {
        let forbidden = |c: char| {
            matches!(
                c,
                '\0' | '\t' | '\n' | '\r' | ' ' | '#' | '/' | '<' | '>' | '?' | '@' | '[' | '\\'
                    | ']' | '^' | '|'
            )
        };
        if input.chars().any(forbidden) {
            return Err(ParseError::InvalidHost);
        }

        let mut encoded = String::with_capacity(input.len());
        encoding::percent_encode_into(&mut encoded, input, encoding::C0_CONTROL);
        Ok(Host::Opaque(encoded))
    }

    /// The empty host serializes to the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Host::Domain(domain) => domain.is_empty(),
            Host::Opaque(host) => host.is_empty(),
            Host::Ipv4(_) | Host::Ipv6(_) => false,
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Domain(domain) => f.write_str(domain),
            Host::Opaque(host) => f.write_str(host),
            Host::Ipv4(address) => f.write_str(&serialize_ipv4(*address)),
            Host::Ipv6(pieces) => write!(f, "[{}]", serialize_ipv6(pieces)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compat::ToString;

    #[test]
    fn test_parse_domain() {
        assert_eq!(
            Host::parse("Example.COM", false).unwrap(),
            Host::Domain("example.com".to_string())
        );
        // Percent-encoded input decodes before normalization
        assert_eq!(
            Host::parse("ex%61mple.com", false).unwrap(),
            Host::Domain("example.com".to_string())
        );
    }

    #[test]
    fn test_parse_ipv4_host() {
        assert_eq!(
            Host::parse("192.168.1.1", false).unwrap(),
            Host::Ipv4(0xC0A8_0101)
        );
        assert_eq!(Host::parse("0x7f.1", false).unwrap(), Host::Ipv4(0x7F00_0001));
        // Sniffs as IPv4 but fails the full parse
        assert!(Host::parse("1.2.3.4.5", false).is_err());
        assert!(Host::parse("foo.0x", false).is_err());
        // Last label is not an IPv4 number, so this stays a domain
        assert_eq!(
            Host::parse("foo.0x4g", false).unwrap(),
            Host::Domain("foo.0x4g".to_string())
        );
    }

    #[test]
    fn test_parse_ipv6_host() {
        assert_eq!(
            Host::parse("[::1]", false).unwrap(),
            Host::Ipv6([0, 0, 0, 0, 0, 0, 0, 1])
        );
        assert!(Host::parse("[::1", false).is_err());
        assert!(Host::parse("[::1]x", false).is_err());
    }

    #[test]
    fn test_parse_opaque_host() {
        assert_eq!(
            Host::parse("ex%61mple", true).unwrap(),
            Host::Opaque("ex%61mple".to_string())
        );
        // ':' survives in opaque hosts, C0 controls are encoded
        assert_eq!(
            Host::parse("a:b", true).unwrap(),
            Host::Opaque("a:b".to_string())
        );
        assert_eq!(
            Host::parse("a\u{1}b", true).unwrap(),
            Host::Opaque("a%01b".to_string())
        );
        assert!(Host::parse("a b", true).is_err());
        assert!(Host::parse("a<b", true).is_err());
    }

    #[test]
    fn test_forbidden_in_domain() {
        assert!(Host::parse("exa mple.com", false).is_err());
        assert!(Host::parse("exam|ple", false).is_err());
        assert!(Host::parse("a\\b", false).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Host::Ipv4(0x7F00_0001).to_string(), "127.0.0.1");
        assert_eq!(
            Host::Ipv6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]).to_string(),
            "[2001:db8::1]"
        );
        assert_eq!(Host::Domain("example.com".to_string()).to_string(), "example.com");
        assert_eq!(Host::Domain(String::new()).to_string(), "");
    }

    #[test]
    fn test_is_empty() {
        assert!(Host::Domain(String::new()).is_empty());
        assert!(Host::Opaque(String::new()).is_empty());
        assert!(!Host::Domain("a".to_string()).is_empty());
        assert!(!Host::Ipv4(0).is_empty());
    }
}
