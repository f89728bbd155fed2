//! Address validation, CIDR normalization and range decomposition.
//!
//! These are the leaf layers of the blocklist engine. Everything here is a
//! pure function of its input: no logging, no shared state, no errors beyond
//! "not valid" (`false` / `None`).

pub mod cidr;
pub mod range;
pub mod validate;

// Re-export commonly used items
pub use cidr::{normalize_cidr, Normalized};
pub use range::{decompose_ipv4_range, ipv4_range_to_cidr, Ipv4Block};
pub use validate::{address_kind, is_valid_ipv4, is_valid_ipv6, AddressKind};
