//! Blocklist line classifier.
//!
//! Turns the full text of a blocklist into validated [`BlockEntry`] values and
//! a list of rejected lines. The accepted line format is:
//!
//! - blank lines and lines starting with `#` are ignored
//! - an optional `label:` prefix may precede the entry (`Some ISP: 1.2.3.0-1.2.3.255`)
//! - the entry is a single address, a CIDR block, or an IPv4 `start-end` range
//!
//! A bad line never stops the parse; it simply ends up in
//! [`ParseResult::rejected`].

use serde::{Deserialize, Serialize};

use crate::ip::{ipv4_range_to_cidr, normalize_cidr, AddressKind, Normalized};

/// One validated, normalized network taken from a blocklist line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    /// Position of the entry in the parse output; display only
    pub id: usize,
    /// The source line this entry came from, as read (label included)
    pub raw: String,
    /// Address or CIDR block, re-parseable as `kind`
    pub normalized: String,
    pub kind: AddressKind,
}

/// Output of [`parse_blocklist_text`], both lists in input line order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub entries: Vec<BlockEntry>,
    pub rejected: Vec<String>,
}

impl ParseResult {
    /// Number of entries of the given family
    pub fn count_kind(&self, kind: AddressKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    fn push_entry(&mut self, raw: &str, normalized: String, kind: AddressKind) {
        let id = self.entries.len();
        self.entries.push(BlockEntry {
            id,
            raw: raw.to_string(),
            normalized,
            kind,
        });
    }
}

/// Classify a single token as address/CIDR or IPv4 range
///
/// Returns the normalized CIDR strings with their family, or `None` if the
/// token is neither. A range always yields `Ipv4` entries in ascending order.
pub fn classify_token(token: &str) -> Option<Vec<(String, AddressKind)>> {
    if let Some(Normalized { text, kind }) = normalize_cidr(token) {
        return Some(vec![(text, kind)]);
    }

    let mut parts = token.split('-');
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };

    let cidrs = ipv4_range_to_cidr(start, end)?;
    Some(cidrs.into_iter().map(|c| (c, AddressKind::Ipv4)).collect())
}

/// Line separators: `\n`, `\r` and the other Unicode line terminators
fn is_newline(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Classify one trimmed, non-comment line
fn classify_line(line: &str) -> Option<Vec<(String, AddressKind)>> {
    // Bare IPv6 literals contain ':' too, so a line that is already a valid
    // address or CIDR is never split at its first colon.
    if let Some(Normalized { text, kind }) = normalize_cidr(line) {
        return Some(vec![(text, kind)]);
    }

    let token = match line.split_once(':') {
        Some((_label, rest)) => rest.trim(),
        None => line,
    };
    classify_token(token)
}

/// Parse a whole blocklist text into entries and rejected lines
///
/// # Examples
/// ```
/// use peer_bouncer::parser::parse_blocklist_text;
///
/// let result = parse_blocklist_text("# comment\n10.0.0.0/24\nbogus-entry\nlabel: 1.2.3.4-1.2.3.5\n");
/// let cidrs: Vec<&str> = result.entries.iter().map(|e| e.normalized.as_str()).collect();
/// assert_eq!(cidrs, ["10.0.0.0/24", "1.2.3.4/31"]);
/// assert_eq!(result.rejected, ["bogus-entry"]);
/// ```
pub fn parse_blocklist_text(text: &str) -> ParseResult {
    let mut result = ParseResult::default();

    for line in text.split(is_newline).map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match classify_line(line) {
            Some(networks) => {
                for (normalized, kind) in networks {
                    result.push_entry(line, normalized, kind);
                }
            }
            None => {
                log::debug!("Rejected blocklist line: {:?}", line);
                result.rejected.push(line.to_string());
            }
        }
    }

    log::info!(
        "Parsed blocklist: {} entries ({} IPv4, {} IPv6), {} rejected lines",
        result.entries.len(),
        result.count_kind(AddressKind::Ipv4),
        result.count_kind(AddressKind::Ipv6),
        result.rejected.len()
    );

    result
}
