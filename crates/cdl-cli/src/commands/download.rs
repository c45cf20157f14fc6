//! Download command implementation

use crate::cli::DownloadArgs;
use crate::output::OutputWriter;
use crate::output_types::DownloadOutput;
use crate::progress::DownloadProgress;
use anyhow::Result;
use cdl_core::config::LayeredConfig;
use cdl_dataset::{download_with_progress, DatasetOptions};
use cdl_store::{HttpArchiveFetcher, Md5Verifier};

pub fn execute(args: DownloadArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut options = DatasetOptions::from(config);
    if !args.years.is_empty() {
        for year in &args.years {
            if options.catalog.checksum_for(*year).is_none() {
                output.warning(format!("{} is not a known release year", year));
            }
        }
        options.catalog = options.catalog.with_years(&args.years);
    }

    let fetcher = HttpArchiveFetcher::new()?;
    let mut progress = DownloadProgress::new(!output.is_json());
    let report = download_with_progress(&options, &Md5Verifier::new(), &fetcher, |event| {
        progress.handle(event)
    })?;
    drop(progress);

    if output.is_json() {
        output.result(DownloadOutput {
            data_dir: options.data_dir().display().to_string(),
            fetched: report.fetched,
            skipped: report.skipped,
        })?;
    } else if report.fetched.is_empty() {
        output.info("Files already downloaded and verified");
    } else {
        output.success(format!(
            "Downloaded {} release(s) into {}",
            report.fetched.len(),
            options.data_dir().display()
        ));
    }

    Ok(())
}
