//! Textual network address codec
//!
//! Converts between the text scripts pass around and the binary forms the
//! network primitives take: a `u32` for IPv4 and eight `u16` groups for
//! fixed-width IPv6.
//!
//! The plain `parse_*` functions never fail; malformed text produces an
//! unspecified value. The `*_strict` variants validate and return
//! [`AddrError`].

pub mod ipv4;
pub mod ipv6;

pub use ipv4::{format_ipv4, parse_ipv4, parse_ipv4_strict, Ipv4Text, IPV4_TEXT_MAX};
pub use ipv6::{
    format_ipv6, parse_ipv6, parse_ipv6_strict, Ipv6Groups, Ipv6Text, IPV6_TEXT_LEN,
};

use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Reasons strict parsing rejects address text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddrError {
    /// Text or a group has the wrong number of characters
    InvalidLength,
    /// Character not allowed at its position
    InvalidCharacter,
    /// IPv4 text without exactly four groups
    WrongGroupCount,
    /// IPv4 octet above 255
    OctetOutOfRange,
    /// IPv4 octet written with a leading zero
    LeadingZero,
    /// IPv6 `::` zero compression
    CompressedForm,
}

/// Address family of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Guess the family from the text length alone
    ///
    /// Exactly [`IPV6_TEXT_LEN`] characters means fixed-width IPv6,
    /// anything else is treated as IPv4. No other inspection is done, so
    /// a 39-character garbage string is still "IPv6".
    pub fn sniff(text: &str) -> Self {
        if text.len() == IPV6_TEXT_LEN {
            AddressFamily::V6
        } else {
            AddressFamily::V4
        }
    }
}

/// Binary address of either family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IpAddress {
    V4(u32),
    V6(Ipv6Groups),
}

impl IpAddress {
    /// Parse text of either family without validation
    pub fn parse(text: &str) -> Self {
        match AddressFamily::sniff(text) {
            AddressFamily::V4 => IpAddress::V4(parse_ipv4(text)),
            AddressFamily::V6 => IpAddress::V6(parse_ipv6(text)),
        }
    }

    /// Parse text of either family, rejecting malformed input
    ///
    /// The family is still chosen by length; a compressed IPv6 string is
    /// therefore reported against the IPv4 grammar.
    pub fn parse_strict(text: &str) -> Result<Self, AddrError> {
        match AddressFamily::sniff(text) {
            AddressFamily::V4 => parse_ipv4_strict(text).map(IpAddress::V4),
            AddressFamily::V6 => parse_ipv6_strict(text).map(IpAddress::V6),
        }
    }

    /// Family of this address
    pub fn family(&self) -> AddressFamily {
        match self {
            IpAddress::V4(_) => AddressFamily::V4,
            IpAddress::V6(_) => AddressFamily::V6,
        }
    }

    /// Format in the family's canonical text form
    pub fn format(&self) -> Ipv6Text {
        match self {
            IpAddress::V4(addr) => {
                let mut text = Ipv6Text::new();
                // IPv4 text is shorter than the IPv6 capacity
                let _ = text.push_str(&format_ipv4(*addr));
                text
            }
            IpAddress::V6(groups) => format_ipv6(groups),
        }
    }
}

impl From<IpAddress> for IpAddr {
    fn from(addr: IpAddress) -> Self {
        match addr {
            IpAddress::V4(bits) => IpAddr::V4(Ipv4Addr::from(bits)),
            IpAddress::V6(groups) => {
                let [a, b, c, d, e, f, g, h] = groups;
                IpAddr::V6(Ipv6Addr::new(a, b, c, d, e, f, g, h))
            }
        }
    }
}
