/// IPv4 address parser supporting decimal, octal, and hexadecimal notation
/// Based on WHATWG URL specification
use crate::compat::{String, Vec, format};
use crate::error::{ParseError, Result};

/// Parse an IPv4 address string into a u32.
/// Supports:
/// - Decimal: 192.168.1.1
/// - Hex: 0xC0A80101
/// - Octal: 0300.0250.01.01
/// - Mixed: 192.0x00A80001
/// - Shorthand: 192.168.257 (the last number fills the remaining octets)
pub fn parse_ipv4(input: &str) -> Result<u32> {
    if input.is_empty() {
        return Err(ParseError::InvalidIpv4);
    }

    let mut parts: Vec<&str> = input.split('.').collect();

    // A single trailing dot is tolerated and ignored
    if parts.last() == Some(&"") {
        parts.pop();
    }

    if parts.is_empty() || parts.len() > 4 {
        return Err(ParseError::InvalidIpv4);
    }

    let mut numbers: Vec<u64> = Vec::with_capacity(parts.len());
    for part in &parts {
        numbers.push(parse_ipv4_number(part)?);
    }

    // The last number is a tail filling 5 - n octets; it must fit them.
    let count = numbers.len();
    let last = numbers[count - 1];
    if last >= 256u64.pow((5 - count) as u32) {
        return Err(ParseError::InvalidIpv4);
    }

    // Earlier numbers each occupy a single octet
    if numbers[..count - 1].iter().any(|&n| n >= 256) {
        return Err(ParseError::InvalidIpv4);
    }

    let mut address = last as u32;
    for (i, &number) in numbers[..count - 1].iter().enumerate() {
        address |= (number as u32) << (8 * (3 - i));
    }

    Ok(address)
}

/// Parse a single IPv4 number: `0x`/`0X` prefix selects hex, a remaining
/// leading `0` selects octal, otherwise decimal. Digits are validated
/// against the selected radix; range checking is the caller's job.
fn parse_ipv4_number(input: &str) -> Result<u64> {
    if input.is_empty() {
        return Err(ParseError::InvalidIpv4);
    }

    let (digits, radix) = if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        (hex, 16)
    } else if input.len() >= 2 && input.starts_with('0') {
        (&input[1..], 8)
    } else {
        (input, 10)
    };

    // A bare "0x" or a lone "0" prefix counts as zero
    if digits.is_empty() {
        return Ok(0);
    }

    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseError::InvalidIpv4);
    }

    u64::from_str_radix(digits, radix).map_err(|_| ParseError::InvalidIpv4)
}

/// Serialize an IPv4 address (u32) to dotted decimal notation
pub fn serialize_ipv4(address: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (address >> 24) & 0xFF,
        (address >> 16) & 0xFF,
        (address >> 8) & 0xFF,
        address & 0xFF
    )
}
