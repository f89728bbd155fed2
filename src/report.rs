//! Report generation for parsed blocklists.
//!
//! Renders parse outcomes as a firewall-ready CIDR list, a JSON document, or a
//! human-readable text report.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::ip::AddressKind;
use crate::orchestrator::SourceOutcome;

/// Serialized form of a full run
#[derive(Debug, Serialize)]
pub struct BlocklistReport<'a> {
    pub generated_at: String,
    pub total_entries: usize,
    pub total_rejected: usize,
    pub sources: &'a [SourceOutcome],
}

impl<'a> BlocklistReport<'a> {
    pub fn new(outcomes: &'a [SourceOutcome], generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            total_entries: outcomes
                .iter()
                .filter_map(SourceOutcome::parsed)
                .map(|p| p.entries.len())
                .sum(),
            total_rejected: outcomes
                .iter()
                .filter_map(SourceOutcome::parsed)
                .map(|p| p.rejected.len())
                .sum(),
            sources: outcomes,
        }
    }
}

/// Every normalized network, one per line
pub fn render_cidr_list(outcomes: &[SourceOutcome]) -> String {
    let mut out = String::new();
    for entry in outcomes
        .iter()
        .filter_map(SourceOutcome::parsed)
        .flat_map(|p| p.entries.iter())
    {
        out.push_str(&entry.normalized);
        out.push('\n');
    }
    out
}

/// JSON report
pub fn render_json_report(outcomes: &[SourceOutcome], generated_at: DateTime<Utc>) -> Result<String> {
    let report = BlocklistReport::new(outcomes, generated_at);
    serde_json::to_string_pretty(&report).context("Failed to serialize report to JSON")
}

/// Human-readable text report
pub fn render_text_report(outcomes: &[SourceOutcome], include_rejected: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    for outcome in outcomes {
        lines.push("=".repeat(72));
        lines.push(format!("Source: {} ({})", outcome.name, outcome.origin));
        lines.push("=".repeat(72));

        let parsed = match (outcome.parsed(), outcome.error()) {
            (Some(parsed), _) => parsed,
            (None, Some(error)) => {
                lines.push(format!("Error: {}", error));
                lines.push(String::new());
                continue;
            }
            (None, None) => continue,
        };

        lines.push(format!("Valid Entries: {}", parsed.entries.len()));
        let width = parsed
            .entries
            .iter()
            .map(|e| e.normalized.len())
            .max()
            .unwrap_or(0);
        for entry in &parsed.entries {
            lines.push(format!("  {:<width$}  {}", entry.normalized, entry.kind, width = width));
        }
        lines.push(String::new());

        lines.push(format!("Invalid Lines: {}", parsed.rejected.len()));
        if include_rejected {
            for line in &parsed.rejected {
                lines.push(format!("  {}", line));
            }
        }
        lines.push(String::new());
    }

    let parsed: Vec<_> = outcomes.iter().filter_map(SourceOutcome::parsed).collect();
    let count = |kind| parsed.iter().map(|p| p.count_kind(kind)).sum::<usize>();
    lines.push(format!(
        "Total: {} IPv4, {} IPv6, {} rejected, {} of {} source(s) loaded",
        count(AddressKind::Ipv4),
        count(AddressKind::Ipv6),
        parsed.iter().map(|p| p.rejected.len()).sum::<usize>(),
        parsed.len(),
        outcomes.len()
    ));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Render outcomes in the requested format
pub fn render(outcomes: &[SourceOutcome], format: OutputFormat, include_rejected: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text_report(outcomes, include_rejected)),
        OutputFormat::Json => render_json_report(outcomes, Utc::now()),
        OutputFormat::Cidr => Ok(render_cidr_list(outcomes)),
    }
}

/// Write rendered output to a file, or stdout when no path is given
pub fn write_output(rendered: &str, output_path: Option<&Path>) -> Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            log::info!("Output written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.as_bytes())
                .context("Failed to write output to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
