//! Command implementations

mod config;
mod download;
mod inspect;
mod query;
mod verify;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(cli.config.as_deref(), cli.overrides())?;

    match cli.command {
        Commands::Config => config::execute(&config, cli.config.as_deref(), &output),
        Commands::Verify => verify::execute(&config, &output),
        Commands::Download(args) => download::execute(args, &config, &output),
        Commands::Inspect => inspect::execute(&config, &output),
        Commands::Query(args) => query::execute(args, &config, &output),
    }
}

/// Render epoch seconds as an RFC 3339 UTC timestamp
fn format_timestamp(seconds: f64) -> String {
    DateTime::<Utc>::from_timestamp(seconds.floor() as i64, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| seconds.to_string())
}
