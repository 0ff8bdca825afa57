//! iTAP command-line entry point.

mod commands;

use std::io;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::generate;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use itap::cli::Cli;
use itap::{Config, ScanConfig};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "itap", &mut io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    init_logging(config.output.verbosity);

    let input = cli
        .input
        .clone()
        .context("No TAP file given")?;

    commands::run(&input, &cli, &config)
}

/// Config file values with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.header_min.is_some() || cli.block_min.is_some() {
        config.scan = ScanConfig::new(
            cli.header_min.unwrap_or(config.scan.header_min_len),
            cli.block_min.unwrap_or(config.scan.block_min_len),
        );
    }
    if let Some(style) = cli.names {
        config.output.naming_style = style;
    }
    if let Some(level) = cli.debug {
        config.output.verbosity = level;
    }

    Ok(config)
}

/// Initialize logging on stderr. `RUST_LOG` wins over the verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}
