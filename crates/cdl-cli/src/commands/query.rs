//! Query command implementation

use crate::cli::QueryArgs;
use crate::output::OutputWriter;
use crate::output_types::{ClassCount, QueryOutput};
use anyhow::{Context, Result};
use cdl_core::config::LayeredConfig;
use cdl_core::models::{BoundingVolume, QuerySample};
use cdl_dataset::{CdlDataset, DatasetOptions};
use cdl_geo::parse_timestamp;
use std::fs;
use std::path::Path;
use tabled::Tabled;

pub fn execute(args: QueryArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let start = parse_timestamp(&args.start)?;
    let end = match &args.end {
        Some(end) => parse_timestamp(end)?,
        None => start,
    };
    let volume = BoundingVolume::new(args.minx, args.maxx, args.miny, args.maxy, start, end)?;

    let dataset = CdlDataset::open(DatasetOptions::from(config))?;
    let sample = dataset.query(&volume)?;

    if let Some(path) = &args.output {
        write_masks(&sample, path)?;
    }

    let (rows, cols) = sample.shape();
    let classes: Vec<ClassCount> = sample
        .class_counts()
        .into_iter()
        .map(|(code, pixels)| ClassCount { code, pixels })
        .collect();

    if output.is_json() {
        output.result(QueryOutput {
            source: sample.source.display().to_string(),
            bbox: sample.bbox.to_array(),
            rows,
            cols,
            classes,
            masks_file: args.output.as_ref().map(|path| path.display().to_string()),
        })?;
        return Ok(());
    }

    output.section("Query Sample");
    output.kv("Source", sample.source.display());
    output.kv("Query", sample.bbox);
    output.kv("Shape", format!("{} rows x {} cols", rows, cols));

    #[derive(Tabled)]
    struct ClassRow {
        #[tabled(rename = "Code")]
        code: i32,
        #[tabled(rename = "Pixels")]
        pixels: usize,
        #[tabled(rename = "Share")]
        share: String,
    }

    let total = (rows * cols).max(1) as f64;
    let rows: Vec<ClassRow> = classes
        .iter()
        .map(|class| ClassRow {
            code: class.code,
            pixels: class.pixels,
            share: format!("{:.1}%", class.pixels as f64 * 100.0 / total),
        })
        .collect();
    output.table(rows);

    if let Some(path) = &args.output {
        output.success(format!("Masks written to {}", path.display()));
    }

    Ok(())
}

/// Write the masks as a JSON array of rows
fn write_masks(sample: &QuerySample, path: &Path) -> Result<()> {
    let rows: Vec<Vec<i32>> = sample.masks.rows().into_iter().map(|row| row.to_vec()).collect();
    let json = serde_json::to_string(&rows)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
