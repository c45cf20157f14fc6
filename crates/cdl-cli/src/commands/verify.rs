//! Verify command implementation

use crate::output::OutputWriter;
use crate::output_types::{ArchiveStatus, VerifyOutput};
use anyhow::Result;
use cdl_core::config::LayeredConfig;
use cdl_core::error::CdlError;
use cdl_dataset::{check_integrity, DatasetOptions};
use cdl_store::Md5Verifier;
use console::style;
use tabled::Tabled;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let options = DatasetOptions::from(config);
    let report = check_integrity(&options, &Md5Verifier::new());

    if output.is_json() {
        output.result(VerifyOutput {
            data_dir: options.data_dir().display().to_string(),
            checksum: options.checksum,
            complete: report.is_complete(),
            archives: report
                .years
                .iter()
                .map(|status| ArchiveStatus {
                    year: status.year,
                    archive: status.archive.display().to_string(),
                    verified: status.verified,
                })
                .collect(),
        })?;
    } else {
        output.section("Release Archives");
        output.kv("Data directory", options.data_dir().display());
        output.kv("Checksums", if options.checksum { "MD5" } else { "presence only" });

        #[derive(Tabled)]
        struct ArchiveRow {
            #[tabled(rename = "Year")]
            year: i32,
            #[tabled(rename = "Archive")]
            archive: String,
            #[tabled(rename = "Status")]
            status: String,
        }

        let rows: Vec<ArchiveRow> = report
            .years
            .iter()
            .map(|status| ArchiveRow {
                year: status.year,
                archive: status
                    .archive
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                status: if status.verified {
                    style("✓ ok").green().to_string()
                } else {
                    style("✗ missing").red().to_string()
                },
            })
            .collect();
        output.table(rows);
    }

    if !report.is_complete() {
        return Err(CdlError::integrity(report.missing()).into());
    }

    output.success(format!("{} archives verified", report.verified_count()));
    Ok(())
}
