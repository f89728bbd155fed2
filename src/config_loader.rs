use crate::config::Config;
use crate::orchestrator::NamedSource;
use crate::source::BlocklistSource;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    config.validate()?;

    if config.sources.is_empty() {
        warn!("Configuration defines no sources; inputs must be given on the command line");
    } else {
        info!("Configuration defines {} source(s)", config.sources.len());
    }

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub http_timeout: Option<std::time::Duration>,
    pub format: Option<crate::config::OutputFormat>,
    pub hide_rejected: bool,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(timeout) = overrides.http_timeout {
        config.general.http_timeout = timeout;
    }
    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    if overrides.hide_rejected {
        config.output.include_rejected = false;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

/// Combine configured sources with command-line inputs
///
/// Configured sources come first, in file order. Command-line inputs are named
/// after their argument text. With nothing configured and nothing given, stdin
/// is read.
pub fn collect_sources(config: &Config, inputs: &[String]) -> Vec<NamedSource> {
    let mut sources: Vec<NamedSource> = config
        .sources
        .iter()
        .filter_map(|s| {
            s.to_source().map(|source| NamedSource {
                name: s.name.clone(),
                source,
            })
        })
        .collect();

    sources.extend(inputs.iter().map(|arg| NamedSource {
        name: arg.clone(),
        source: BlocklistSource::from_arg(arg),
    }));

    if sources.is_empty() {
        sources.push(NamedSource {
            name: "stdin".to_string(),
            source: BlocklistSource::Stdin,
        });
    }

    sources
}
