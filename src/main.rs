use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

use peer_bouncer::config::{Config, OutputFormat};
use peer_bouncer::config_loader::{self, CliOverrides};
use peer_bouncer::{orchestrator, report};

/// Convert IP blocklists (addresses, CIDR blocks, ranges) into normalized CIDR notation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Blocklist files, http(s) URLs, or "-" for stdin (gzip is detected automatically)
    inputs: Vec<String>,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Download timeout (e.g. "30s", "2m")
    #[arg(long, value_parser = humantime_serde::re::humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Do not list rejected lines in the text report
    #[arg(long)]
    hide_rejected: bool,
}

/// env_logger setup with `level` as the default filter
fn logger_builder(level: &str) -> env_logger::Builder {
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to stderr so that stdout stays clean for the CIDR list
    logger_builder(&args.log_level).init();

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => Config::default(),
    };
    let overrides = CliOverrides {
        http_timeout: args.timeout,
        format: args.format,
        hide_rejected: args.hide_rejected,
    };
    config_loader::apply_overrides(&mut config, &overrides)?;

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .wrap_err("Failed to configure thread pool")?;
    }

    let sources = config_loader::collect_sources(&config, &args.inputs);
    info!("Processing {} blocklist source(s)", sources.len());

    let outcomes = orchestrator::process_sources(&sources, &config.fetch_options());
    let rendered = report::render(&outcomes, config.output.format, config.output.include_rejected)?;
    report::write_output(&rendered, args.output.as_deref())?;

    info!("Blocklist processing completed");
    Ok(())
}
