use cdl_core::config::CliConfigOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CDL - Cropland Data Layer toolkit
#[derive(Parser, Debug)]
#[command(name = "cdl")]
#[command(about = "Verify, download and query the USDA Cropland Data Layer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./cdl.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root directory where the dataset can be found
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Download missing archives before building the dataset
    #[arg(long, global = true)]
    pub download: bool,

    /// Verify archive MD5 checksums (slow)
    #[arg(long, global = true)]
    pub checksum: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Overrides from global flags; unset flags leave lower layers alone
    pub fn overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            root: self.root.clone(),
            download: self.download.then_some(true),
            checksum: self.checksum.then_some(true),
            years: None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration and where each value comes from
    Config,

    /// Check the release archives
    Verify,

    /// Download and extract missing release archives
    Download(DownloadArgs),

    /// Build the index and list the indexed rasters
    Inspect,

    /// Read the labels covering a bounding volume
    Query(QueryArgs),
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Only download these years (repeatable)
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<i32>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Minimum x coordinate
    #[arg(long, allow_negative_numbers = true)]
    pub minx: f64,

    /// Maximum x coordinate
    #[arg(long, allow_negative_numbers = true)]
    pub maxx: f64,

    /// Minimum y coordinate
    #[arg(long, allow_negative_numbers = true)]
    pub miny: f64,

    /// Maximum y coordinate
    #[arg(long, allow_negative_numbers = true)]
    pub maxy: f64,

    /// Start of the time range (RFC 3339, YYYY-MM-DD or epoch seconds)
    #[arg(long)]
    pub start: String,

    /// End of the time range, defaults to the start
    #[arg(long)]
    pub end: Option<String>,

    /// Write the mask array to this JSON file
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}
