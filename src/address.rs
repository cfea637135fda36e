//! IP-address classification for host routability checks.
//!
//! Only literal addresses are recognized; nothing here touches the network.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::AddressError;

/// An IPv4 network in CIDR notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Cidr {
    network: Ipv4Addr,
    prefix_len: u8,
}

impl Ipv4Cidr {
    /// Creates a range from a network address and prefix length.
    ///
    /// Prefix lengths above 32 are clamped to 32.
    #[must_use]
    pub const fn new(network: Ipv4Addr, prefix_len: u8) -> Self {
        let prefix_len = if prefix_len > 32 { 32 } else { prefix_len };
        Self {
            network,
            prefix_len,
        }
    }

    /// Returns the network address.
    #[must_use]
    pub const fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// Returns the prefix length.
    #[must_use]
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Returns true if `addr` falls inside this range.
    #[must_use]
    pub const fn contains(&self, addr: Ipv4Addr) -> bool {
        let mask = self.mask();
        (self.network.to_bits() & mask) == (addr.to_bits() & mask)
    }

    const fn mask(&self) -> u32 {
        if self.prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - self.prefix_len)
        }
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// IANA special-purpose IPv4 ranges that are never publicly routable.
pub const SPECIAL_PURPOSE_RANGES: &[Ipv4Cidr] = &[
    // this network
    Ipv4Cidr::new(Ipv4Addr::new(0, 0, 0, 0), 8),
    // loopback
    Ipv4Cidr::new(Ipv4Addr::new(127, 0, 0, 0), 8),
    // link local
    Ipv4Cidr::new(Ipv4Addr::new(169, 254, 0, 0), 16),
    // private use
    Ipv4Cidr::new(Ipv4Addr::new(10, 0, 0, 0), 8),
    Ipv4Cidr::new(Ipv4Addr::new(172, 16, 0, 0), 12),
    Ipv4Cidr::new(Ipv4Addr::new(192, 168, 0, 0), 16),
    // IETF protocol assignments
    Ipv4Cidr::new(Ipv4Addr::new(192, 0, 0, 0), 24),
    // TEST-NET-1, TEST-NET-2, TEST-NET-3
    Ipv4Cidr::new(Ipv4Addr::new(192, 0, 2, 0), 24),
    Ipv4Cidr::new(Ipv4Addr::new(198, 51, 100, 0), 24),
    Ipv4Cidr::new(Ipv4Addr::new(203, 0, 113, 0), 24),
    // 6to4 relay anycast
    Ipv4Cidr::new(Ipv4Addr::new(192, 88, 99, 0), 24),
    // benchmarking
    Ipv4Cidr::new(Ipv4Addr::new(198, 18, 0, 0), 15),
    // multicast
    Ipv4Cidr::new(Ipv4Addr::new(224, 0, 0, 0), 4),
    // reserved
    Ipv4Cidr::new(Ipv4Addr::new(240, 0, 0, 0), 4),
    // limited broadcast
    Ipv4Cidr::new(Ipv4Addr::new(255, 255, 255, 255), 32),
];

/// A parsed IP address literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(IpAddr);

impl Address {
    /// Returns the underlying address.
    #[must_use]
    pub const fn ip(&self) -> IpAddr {
        self.0
    }

    /// Returns true for RFC 1918 IPv4 space and IPv6 unique-local `fc00::/7`.
    #[must_use]
    pub const fn is_private_use(&self) -> bool {
        match self.0 {
            IpAddr::V4(v4) => v4.is_private(),
            IpAddr::V6(v6) => (v6.segments()[0] & 0xfe00) == 0xfc00,
        }
    }

    /// Returns true for `127.0.0.0/8` and `::1`.
    #[must_use]
    pub const fn is_loopback(&self) -> bool {
        match self.0 {
            IpAddr::V4(v4) => v4.is_loopback(),
            IpAddr::V6(v6) => v6.is_loopback(),
        }
    }

    /// Returns true if this is an IPv4 address inside `range`.
    #[must_use]
    pub const fn matches_cidr(&self, range: &Ipv4Cidr) -> bool {
        match self.0 {
            IpAddr::V4(v4) => range.contains(v4),
            IpAddr::V6(_) => false,
        }
    }

    /// Returns true if this address is in any IANA special-purpose range.
    #[must_use]
    pub fn is_special_purpose(&self) -> bool {
        match self.0 {
            IpAddr::V4(_) => SPECIAL_PURPOSE_RANGES
                .iter()
                .any(|range| self.matches_cidr(range)),
            IpAddr::V6(v6) => v6.is_unspecified() || is_ipv6_link_local(v6) || v6.is_multicast(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses an IPv4 or IPv6 literal.
///
/// IPv6 literals may be wrapped in brackets as they appear in a URL host.
///
/// # Errors
///
/// Returns [`AddressError::NotAnAddress`] if the text is not an address literal.
///
/// # Examples
///
/// ```
/// use url_canon::parse_address;
///
/// assert!(parse_address("10.1.2.3").unwrap().is_private_use());
/// assert!(parse_address("[::1]").unwrap().is_loopback());
/// assert!(parse_address("example.com").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<Address, AddressError> {
    let unbracketed = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(text);

    if let Ok(v4) = unbracketed.parse::<Ipv4Addr>() {
        return Ok(Address(IpAddr::V4(v4)));
    }
    if let Ok(v6) = unbracketed.parse::<Ipv6Addr>() {
        return Ok(Address(IpAddr::V6(v6)));
    }

    Err(AddressError::NotAnAddress {
        input: text.to_string(),
    })
}

const fn is_ipv6_link_local(addr: Ipv6Addr) -> bool {
    (addr.segments()[0] & 0xffc0) == 0xfe80
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(text: &str) -> Address {
        parse_address(text).unwrap()
    }

    #[test]
    fn cidr_contains() {
        let range = Ipv4Cidr::new(Ipv4Addr::new(172, 16, 0, 0), 12);
        assert!(range.contains(Ipv4Addr::new(172, 31, 255, 255)));
        assert!(!range.contains(Ipv4Addr::new(172, 32, 0, 0)));
    }

    #[test]
    fn zero_prefix_matches_everything() {
        let range = Ipv4Cidr::new(Ipv4Addr::new(1, 2, 3, 4), 0);
        assert!(range.contains(Ipv4Addr::new(255, 0, 0, 1)));
    }

    #[test]
    fn oversized_prefix_is_clamped() {
        let range = Ipv4Cidr::new(Ipv4Addr::new(1, 2, 3, 4), 40);
        assert_eq!(range.prefix_len(), 32);
        assert_eq!(range.to_string(), "1.2.3.4/32");
    }

    #[test]
    fn special_purpose_table() {
        for text in [
            "0.1.2.3",
            "169.254.10.10",
            "192.0.0.8",
            "192.0.2.1",
            "198.51.100.7",
            "203.0.113.9",
            "192.88.99.1",
            "198.19.255.1",
            "239.1.1.1",
            "250.0.0.1",
            "255.255.255.255",
        ] {
            assert!(addr(text).is_special_purpose(), "{text}");
        }
        assert!(!addr("1.2.3.4").is_special_purpose());
        assert!(!addr("198.20.0.1").is_special_purpose());
    }

    #[test]
    fn private_and_loopback() {
        assert!(addr("192.168.1.1").is_private_use());
        assert!(addr("fd00::1").is_private_use());
        assert!(addr("127.0.0.2").is_loopback());
        assert!(!addr("8.8.8.8").is_private_use());
    }

    #[test]
    fn ipv6_never_matches_ipv4_ranges() {
        assert!(!addr("::ffff:10.0.0.1").matches_cidr(&SPECIAL_PURPOSE_RANGES[3]));
    }

    #[test]
    fn not_an_address() {
        assert!(matches!(
            parse_address("localhost"),
            Err(AddressError::NotAnAddress { .. })
        ));
        assert!(parse_address("[::1").is_err());
    }
}
