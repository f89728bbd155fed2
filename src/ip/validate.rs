//! Address family validators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Address family of a validated blocklist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Ipv4,
    Ipv6,
}

impl AddressKind {
    /// Largest prefix length allowed for this family
    pub fn max_prefix(self) -> u32 {
        match self {
            AddressKind::Ipv4 => 32,
            AddressKind::Ipv6 => 128,
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::Ipv4 => write!(f, "IPv4"),
            AddressKind::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Check if a string is a valid dotted-quad IPv4 address
pub fn is_valid_ipv4(token: &str) -> bool {
    token.parse::<Ipv4Addr>().is_ok()
}

/// Check if a string is a valid IPv6 address (full, compressed or mixed notation)
pub fn is_valid_ipv6(token: &str) -> bool {
    token.parse::<Ipv6Addr>().is_ok()
}

/// Determine which family, if any, accepts `token` as a bare address
///
/// IPv4 is tried first; the two families never accept the same text.
pub fn address_kind(token: &str) -> Option<AddressKind> {
    if is_valid_ipv4(token) {
        Some(AddressKind::Ipv4)
    } else if is_valid_ipv6(token) {
        Some(AddressKind::Ipv6)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
    }

    #[test]
    fn test_invalid_ipv4() {
        assert!(!is_valid_ipv4(""));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("1.2.3.4.5"));
        assert!(!is_valid_ipv4("256.0.0.1"));
        assert!(!is_valid_ipv4("1.2.3.-4"));
        assert!(!is_valid_ipv4(" 1.2.3.4"));
        assert!(!is_valid_ipv4("::1"));
        assert!(!is_valid_ipv4("invalid.ip"));
    }

    #[test]
    fn test_valid_ipv6() {
        assert!(is_valid_ipv6("::1"));
        assert!(is_valid_ipv6("::"));
        assert!(is_valid_ipv6("2001:db8::1"));
        assert!(is_valid_ipv6("2001:0db8:0000:0000:0000:0000:0000:0001"));
        assert!(is_valid_ipv6("::ffff:192.168.1.1"));
    }

    #[test]
    fn test_invalid_ipv6() {
        assert!(!is_valid_ipv6("192.168.1.1"));
        assert!(!is_valid_ipv6("2001:db8::1::2"));
        assert!(!is_valid_ipv6("2001:db8:::1"));
        assert!(!is_valid_ipv6("12345::1"));
        assert!(!is_valid_ipv6("gggg::1"));
        assert!(!is_valid_ipv6(":1"));
    }

    #[test]
    fn test_address_kind() {
        assert_eq!(address_kind("10.0.0.1"), Some(AddressKind::Ipv4));
        assert_eq!(address_kind("fe80::1"), Some(AddressKind::Ipv6));
        assert_eq!(address_kind("::ffff:10.0.0.1"), Some(AddressKind::Ipv6));
        assert_eq!(address_kind("10.0.0.0/8"), None);
        assert_eq!(address_kind("bogus"), None);
    }

    #[test]
    fn test_kind_display_and_prefix() {
        assert_eq!(AddressKind::Ipv4.to_string(), "IPv4");
        assert_eq!(AddressKind::Ipv6.to_string(), "IPv6");
        assert_eq!(AddressKind::Ipv4.max_prefix(), 32);
        assert_eq!(AddressKind::Ipv6.max_prefix(), 128);
    }
}
