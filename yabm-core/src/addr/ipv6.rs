//! Fixed-width IPv6 text codec
//!
//! Text form is eight groups of exactly four lowercase hex digits joined
//! by `:`, e.g. `fe80:0000:0000:0000:0000:0000:0000:0001`. Zero compression
//! (`::`) is neither produced nor understood.

use core::fmt::Write;

use heapless::String;

use super::AddrError;

/// Length of the fixed-width text form
pub const IPV6_TEXT_LEN: usize = 39;

/// Number of 16-bit groups
pub const IPV6_GROUPS: usize = 8;

/// Width of one group including its trailing separator
const GROUP_STRIDE: usize = 5;

/// Binary IPv6 address, most significant group first
pub type Ipv6Groups = [u16; IPV6_GROUPS];

/// Formatted IPv6 address
pub type Ipv6Text = String<IPV6_TEXT_LEN>;

/// Parse fixed-width text without validation
///
/// Group `i` is decoded from the four characters at offset `i * 5`.
/// Characters outside `0-9`/`a-f` decode as zero, as do positions past the
/// end of short input. Use [`parse_ipv6_strict`] to reject such text.
pub fn parse_ipv6(text: &str) -> Ipv6Groups {
    let bytes = text.as_bytes();
    let mut groups = [0u16; IPV6_GROUPS];

    for (i, group) in groups.iter_mut().enumerate() {
        let offset = i * GROUP_STRIDE;
        for j in 0..4 {
            let nibble = bytes.get(offset + j).copied().and_then(hex_nibble);
            *group = (*group << 4) | nibble.unwrap_or(0);
        }
    }

    groups
}

/// Parse fixed-width text, rejecting anything but the canonical form
pub fn parse_ipv6_strict(text: &str) -> Result<Ipv6Groups, AddrError> {
    if text.contains("::") {
        return Err(AddrError::CompressedForm);
    }
    if text.len() != IPV6_TEXT_LEN {
        return Err(AddrError::InvalidLength);
    }

    for (pos, byte) in text.bytes().enumerate() {
        let ok = if pos % GROUP_STRIDE == 4 {
            byte == b':'
        } else {
            hex_nibble(byte).is_some()
        };
        if !ok {
            return Err(AddrError::InvalidCharacter);
        }
    }

    Ok(parse_ipv6(text))
}

/// Format groups as fixed-width lowercase text
pub fn format_ipv6(groups: &Ipv6Groups) -> Ipv6Text {
    let mut text = Ipv6Text::new();
    for (i, group) in groups.iter().enumerate() {
        if i != 0 {
            let _ = text.push(':');
        }
        // 8 * 4 digits + 7 separators is exactly the capacity
        let _ = write!(text, "{:04x}", group);
    }
    text
}

fn hex_nibble(byte: u8) -> Option<u16> {
    match byte {
        b'0'..=b'9' => Some(u16::from(byte - b'0')),
        b'a'..=b'f' => Some(u16::from(byte - b'a' + 10)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LINK_LOCAL: Ipv6Groups = [0xfe80, 0, 0, 0, 0, 0, 0, 1];

    #[test]
    fn test_format_link_local() {
        assert_eq!(
            format_ipv6(&LINK_LOCAL).as_str(),
            "fe80:0000:0000:0000:0000:0000:0000:0001"
        );
    }

    #[test]
    fn test_format_extremes() {
        assert_eq!(
            format_ipv6(&[0; 8]).as_str(),
            "0000:0000:0000:0000:0000:0000:0000:0000"
        );
        assert_eq!(
            format_ipv6(&[0xFFFF; 8]).as_str(),
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"
        );
        assert_eq!(format_ipv6(&[0xFFFF; 8]).len(), IPV6_TEXT_LEN);
    }

    #[test]
    fn test_parse_link_local() {
        assert_eq!(
            parse_ipv6("fe80:0000:0000:0000:0000:0000:0000:0001"),
            LINK_LOCAL
        );
    }

    #[test]
    fn test_sample_round_trips() {
        for groups in [[0u16; 8], [0xFFFF; 8], LINK_LOCAL] {
            assert_eq!(parse_ipv6(&format_ipv6(&groups)), groups);
        }
    }

    #[test]
    fn test_parse_lenient_never_panics() {
        // Uppercase is not hex here; those digits decode as zero
        assert_eq!(
            parse_ipv6("FE80:0000:0000:0000:0000:0000:0000:0001"),
            [0x0080, 0, 0, 0, 0, 0, 0, 1]
        );
        // Short input: missing positions read as zero
        assert_eq!(parse_ipv6("fe80"), [0xfe80, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(parse_ipv6(""), [0; 8]);
        // Compressed text is misread, not rejected
        assert_eq!(parse_ipv6("fe80::1"), [0xfe80, 0x0100, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(
            parse_ipv6_strict("fe80:0000:0000:0000:0000:0000:0000:0001"),
            Ok(LINK_LOCAL)
        );
        assert_eq!(parse_ipv6_strict("fe80::1"), Err(AddrError::CompressedForm));
        assert_eq!(parse_ipv6_strict("fe80:0:0"), Err(AddrError::InvalidLength));
        assert_eq!(
            parse_ipv6_strict("FE80:0000:0000:0000:0000:0000:0000:0001"),
            Err(AddrError::InvalidCharacter)
        );
        assert_eq!(
            parse_ipv6_strict("fe80-0000:0000:0000:0000:0000:0000:0001"),
            Err(AddrError::InvalidCharacter)
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip(groups in any::<[u16; 8]>()) {
            let text = format_ipv6(&groups);
            prop_assert_eq!(text.len(), IPV6_TEXT_LEN);
            prop_assert_eq!(parse_ipv6(&text), groups);
            prop_assert_eq!(parse_ipv6_strict(&text), Ok(groups));
        }
    }
}
