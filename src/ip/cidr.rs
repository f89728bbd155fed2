//! CIDR normalization for single addresses and single CIDR blocks.

use super::validate::{address_kind, AddressKind};

/// A token accepted as a single address or a single CIDR block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Canonical text: the bare address, or `address/prefix`
    pub text: String,
    pub kind: AddressKind,
}

/// Normalize a token into a single address or CIDR block
///
/// Without a `/` the token must be a bare IPv4 or IPv6 address and is returned
/// as-is. With exactly one `/` the left side must be an address and the right
/// side an unsigned prefix within the family's bounds (0-32 or 0-128).
///
/// The address is kept verbatim even when it has bits set beyond the prefix;
/// only the prefix is re-printed from its parsed value (`/024` -> `/24`).
///
/// # Examples
/// ```
/// use peer_bouncer::ip::{normalize_cidr, AddressKind};
///
/// let n = normalize_cidr("10.0.0.0/24").unwrap();
/// assert_eq!(n.text, "10.0.0.0/24");
/// assert_eq!(n.kind, AddressKind::Ipv4);
///
/// assert!(normalize_cidr("10.0.0.0/33").is_none());
/// assert!(normalize_cidr("2001:db8::/129").is_none());
/// ```
pub fn normalize_cidr(token: &str) -> Option<Normalized> {
    let Some((address, prefix_text)) = token.split_once('/') else {
        let kind = address_kind(token)?;
        return Some(Normalized {
            text: token.to_string(),
            kind,
        });
    };

    if prefix_text.contains('/') {
        return None;
    }

    let prefix = prefix_text.parse::<u32>().ok()?;
    let kind = address_kind(address)?;
    if prefix > kind.max_prefix() {
        return None;
    }

    Some(Normalized {
        text: format!("{}/{}", address, prefix),
        kind,
    })
}
