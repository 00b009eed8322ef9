//! Dotted-quad IPv4 text codec
//!
//! Addresses are carried as a `u32` with the first octet in the most
//! significant byte, which is what the network primitives consume.

use core::fmt::Write;

use heapless::String;

use super::AddrError;

/// Longest dotted-quad text ("255.255.255.255")
pub const IPV4_TEXT_MAX: usize = 15;

/// Formatted IPv4 address
pub type Ipv4Text = String<IPV4_TEXT_MAX>;

/// Parse dotted-quad text without validation
///
/// Digits accumulate into the current group and every `.` flushes that
/// group into octet position `3 - group`. The last group is OR-ed into the
/// result unshifted at end of input, so well-formed text decodes exactly.
///
/// Malformed text (wrong group count, octets above 255, stray characters)
/// yields an unspecified value, never a panic. Callers that need to reject
/// such input use [`parse_ipv4_strict`].
pub fn parse_ipv4(text: &str) -> u32 {
    let mut ip: u32 = 0;
    let mut group: u32 = 0;
    let mut value: u32 = 0;

    for byte in text.bytes() {
        if byte == b'.' {
            // Groups past the fourth have no octet to land in
            if group < 4 {
                ip |= value << (8 * (3 - group));
            }
            value = 0;
            group = group.saturating_add(1);
        } else {
            let digit = i32::from(byte) - i32::from(b'0');
            value = value.wrapping_mul(10).wrapping_add(digit as u32);
        }
    }

    ip | value
}

/// Parse canonical dotted-quad text
///
/// Accepts exactly four decimal groups of 0-255 with no leading zeros
/// (the single digit `0` excepted).
pub fn parse_ipv4_strict(text: &str) -> Result<u32, AddrError> {
    let mut ip: u32 = 0;
    let mut groups = 0usize;

    for part in text.split('.') {
        if groups == 4 {
            return Err(AddrError::WrongGroupCount);
        }
        ip = (ip << 8) | u32::from(parse_octet(part)?);
        groups += 1;
    }

    if groups != 4 {
        return Err(AddrError::WrongGroupCount);
    }
    Ok(ip)
}

fn parse_octet(part: &str) -> Result<u8, AddrError> {
    if part.is_empty() || part.len() > 3 {
        return Err(AddrError::InvalidLength);
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddrError::InvalidCharacter);
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(AddrError::LeadingZero);
    }

    let value = part
        .bytes()
        .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
    u8::try_from(value).map_err(|_| AddrError::OctetOutOfRange)
}

/// Format an address as dotted-quad text
///
/// Octets are written most significant first in plain decimal.
pub fn format_ipv4(addr: u32) -> Ipv4Text {
    let [a, b, c, d] = addr.to_be_bytes();
    let mut text = Ipv4Text::new();
    // 15 bytes always hold four octets and three dots
    let _ = write!(text, "{}.{}.{}.{}", a, b, c, d);
    text
}
