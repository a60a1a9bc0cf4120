pub mod analyze;
pub mod check_config;
pub mod serve;

use std::path::Path;

use anyhow::Context;
use clap::ArgMatches;
use senti_runtime::config::{LogFormat, LoggingConfig};
use senti_runtime::Config;

const DEFAULT_CONFIG_FILE: &str = "senti.toml";

/// Load `.env`, the config file (explicit or `./senti.toml`), then overlay
/// the process environment and validate.
pub fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let explicit = matches.get_one::<String>("config");
    let mut config = match explicit {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Config::from_file(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("failed to load {}", DEFAULT_CONFIG_FILE))?,
        None => Config::default(),
    };

    config
        .apply_env()
        .context("invalid environment configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Initialize tracing for structured logging. `RUST_LOG` takes precedence
/// over the configured level.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    if let Err(e) = result {
        eprintln!("⚠️  Failed to initialize logging: {}", e);
    }
}
