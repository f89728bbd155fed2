//! IPv4 range to CIDR decomposition.
//!
//! Converts an inclusive `start-end` range into the minimal ordered list of
//! CIDR blocks that covers it exactly. Each step takes the largest block that
//! is aligned at the current address and still fits in what is left of the
//! range, then advances past it.

use std::fmt;
use std::net::Ipv4Addr;

/// Size of the whole IPv4 address space; the block size allowed at address 0
const IPV4_SPACE: u64 = 1 << 32;

/// One aligned IPv4 CIDR block produced by range decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Block {
    pub network: Ipv4Addr,
    pub prefix: u8,
}

impl Ipv4Block {
    /// Number of addresses in the block
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    /// First address as an integer
    pub fn first(&self) -> u32 {
        u32::from(self.network)
    }

    /// Last address as an integer
    pub fn last(&self) -> u32 {
        // size() - 1 always fits: a /0 block starts at 0
        (u64::from(self.first()) + self.size() - 1) as u32
    }
}

impl fmt::Display for Ipv4Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

/// Decompose an inclusive IPv4 range into aligned CIDR blocks
///
/// Returns `None` when `start` is numerically greater than `end`. Blocks are
/// returned in ascending address order and are pairwise disjoint.
pub fn decompose_ipv4_range(start: Ipv4Addr, end: Ipv4Addr) -> Option<Vec<Ipv4Block>> {
    // Work in u64 so that stepping past 255.255.255.255 ends the loop instead of wrapping
    let end = u64::from(u32::from(end));
    let mut current = u64::from(u32::from(start));
    if current > end {
        return None;
    }

    let mut blocks = Vec::new();
    while current <= end {
        // Lowest set bit of `current`; zero is aligned to everything
        let aligned = if current == 0 {
            IPV4_SPACE
        } else {
            current & current.wrapping_neg()
        };

        let remaining = end - current + 1;
        let mut size = aligned;
        while size > remaining {
            size >>= 1;
        }

        blocks.push(Ipv4Block {
            network: Ipv4Addr::from(current as u32),
            prefix: (32 - size.trailing_zeros()) as u8,
        });
        current += size;
    }

    Some(blocks)
}

/// Decompose a textual IPv4 range into CIDR strings
///
/// Both endpoints must be dotted-quad IPv4 addresses and `start <= end`.
///
/// # Examples
/// ```
/// use peer_bouncer::ip::ipv4_range_to_cidr;
///
/// assert_eq!(
///     ipv4_range_to_cidr("10.0.0.0", "10.0.0.255"),
///     Some(vec!["10.0.0.0/24".to_string()])
/// );
/// assert_eq!(ipv4_range_to_cidr("10.0.0.9", "10.0.0.1"), None);
/// ```
pub fn ipv4_range_to_cidr(start: &str, end: &str) -> Option<Vec<String>> {
    let start = start.parse::<Ipv4Addr>().ok()?;
    let end = end.parse::<Ipv4Addr>().ok()?;
    let blocks = decompose_ipv4_range(start, end)?;
    Some(blocks.iter().map(Ipv4Block::to_string).collect())
}
