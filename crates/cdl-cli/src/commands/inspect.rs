//! Inspect command implementation

use super::format_timestamp;
use crate::output::OutputWriter;
use crate::output_types::{EntryInfo, InspectOutput};
use anyhow::Result;
use cdl_core::config::LayeredConfig;
use cdl_core::models::IndexEntry;
use cdl_dataset::{CdlDataset, DatasetOptions};
use tabled::Tabled;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let dataset = CdlDataset::open(DatasetOptions::from(config))?;

    let mut entries: Vec<&IndexEntry> = dataset.index().iter().collect();
    entries.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.path.cmp(&b.path)));

    if output.is_json() {
        output.result(InspectOutput {
            data_dir: dataset.data_dir().display().to_string(),
            entries: entries
                .iter()
                .map(|entry| EntryInfo {
                    year: entry.year,
                    path: entry.path.display().to_string(),
                    bounds: entry.volume.to_array(),
                })
                .collect(),
            bounds: dataset.bounds().map(|bounds| bounds.to_array()),
        })?;
        return Ok(());
    }

    output.section("Indexed Rasters");
    output.kv("Data directory", dataset.data_dir().display());

    #[derive(Tabled)]
    struct EntryRow {
        #[tabled(rename = "Year")]
        year: i32,
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "X")]
        x: String,
        #[tabled(rename = "Y")]
        y: String,
        #[tabled(rename = "Time")]
        time: String,
    }

    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|entry| {
            let volume = &entry.volume;
            EntryRow {
                year: entry.year,
                file: entry
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                x: format!("{} .. {}", volume.min_x(), volume.max_x()),
                y: format!("{} .. {}", volume.min_y(), volume.max_y()),
                time: format!(
                    "{} .. {}",
                    format_timestamp(volume.min_t()),
                    format_timestamp(volume.max_t())
                ),
            }
        })
        .collect();
    output.table(rows);

    match dataset.bounds() {
        Some(bounds) => output.kv("Bounds", bounds),
        None => output.info("No rasters found in the data directory"),
    }

    Ok(())
}
