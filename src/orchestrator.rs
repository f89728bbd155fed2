//! Blocklist orchestrator.
//!
//! Coordinates loading and parsing of several blocklist sources. Each source
//! is fetched and parsed independently on the rayon pool; a source that fails
//! to load is recorded and the rest carry on.

use rayon::prelude::*;
use serde::Serialize;

use crate::parser::{parse_blocklist_text, ParseResult};
use crate::source::{load_text, BlocklistSource, FetchOptions};

/// A blocklist source with the name it is reported under
#[derive(Debug, Clone)]
pub struct NamedSource {
    pub name: String,
    pub source: BlocklistSource,
}

/// Result of processing one source
#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    pub name: String,
    pub origin: String,
    #[serde(flatten)]
    pub status: SourceStatus,
}

/// Parsed lists, or why the source could not be read
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Parsed(ParseResult),
    Failed(String),
}

impl SourceOutcome {
    pub fn parsed(&self) -> Option<&ParseResult> {
        match &self.status {
            SourceStatus::Parsed(result) => Some(result),
            SourceStatus::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SourceStatus::Parsed(_) => None,
            SourceStatus::Failed(message) => Some(message),
        }
    }
}

/// Load and parse a single source
pub fn process_source(named: &NamedSource, options: &FetchOptions) -> SourceOutcome {
    let origin = named.source.describe();
    let status = match load_text(&named.source, options) {
        Ok(text) => {
            log::info!("Parsing '{}' ({} bytes)", named.name, text.len());
            SourceStatus::Parsed(parse_blocklist_text(&text))
        }
        Err(e) => {
            log::warn!("Failed to load '{}': {}", named.name, e);
            SourceStatus::Failed(e.to_string())
        }
    };

    SourceOutcome {
        name: named.name.clone(),
        origin,
        status,
    }
}

/// Load and parse all sources in parallel, keeping input order
pub fn process_sources(sources: &[NamedSource], options: &FetchOptions) -> Vec<SourceOutcome> {
    log::info!("Processing {} blocklist source(s) in parallel...", sources.len());

    let outcomes: Vec<SourceOutcome> = sources
        .par_iter()
        .map(|named| process_source(named, options))
        .collect();

    let failed = outcomes.iter().filter(|o| o.error().is_some()).count();
    if failed > 0 {
        log::warn!("{} of {} source(s) could not be loaded", failed, outcomes.len());
    }

    outcomes
}
