//! # Peer Bouncer - blocklist to CIDR converter
//!
//! This library turns IP blocklists, as published by humans and tools, into a
//! normalized list of networks in CIDR notation that a firewall or ACL can
//! consume directly.
//!
//! ## Input format
//!
//! One entry per line, plain text, optionally gzip-compressed:
//!
//! ```text
//! # comments and blank lines are ignored
//! 192.0.2.1
//! 198.51.100.0/24
//! 2001:db8::/32
//! Some ISP: 203.0.113.5-203.0.113.9
//! ```
//!
//! Each line is a single address, a CIDR block, or an IPv4 `start-end` range,
//! optionally preceded by a `label:`. Ranges are decomposed into the minimal
//! set of aligned CIDR blocks. Lines that match none of these are collected as
//! rejected lines rather than aborting the parse.
//!
//! ## Architecture
//!
//! - `ip`: address validators, CIDR normalizer and range decomposer
//! - `parser`: line classifier producing entries and rejected lines
//! - `source`: file / URL / stdin acquisition, gzip and UTF-8 decoding
//! - `config` / `config_loader`: YAML configuration
//! - `orchestrator`: parallel processing of several sources
//! - `report`: text, JSON and plain CIDR output
//!
//! ## Example Usage
//!
//! ```rust
//! use peer_bouncer::parser::parse_blocklist_text;
//!
//! let result = parse_blocklist_text("Some ISP: 203.0.113.5-203.0.113.9\n");
//! let cidrs: Vec<&str> = result.entries.iter().map(|e| e.normalized.as_str()).collect();
//! assert_eq!(cidrs, ["203.0.113.5/32", "203.0.113.6/31", "203.0.113.8/31"]);
//! ```
//!
//! ## Error Handling
//!
//! The parsing engine has no error path: every line is either accepted or
//! rejected. Source acquisition reports [`source::SourceError`], configuration
//! reports [`config::ValidationError`], and the application layer uses
//! `color_eyre` for context-rich errors.

pub mod config;
pub mod config_loader;
pub mod ip;
pub mod orchestrator;
pub mod parser;
pub mod report;
pub mod source;
