//! Config command implementation

use crate::config_loader::config_path;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};
use anyhow::Result;
use cdl_core::config::LayeredConfig;
use std::path::Path;
use tabled::Tabled;

const KEYS: [&str; 5] = ["root", "download", "checksum", "base_folder", "years"];

pub fn execute(config: &LayeredConfig, explicit: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let map = config.to_inspection_map();
    let values: Vec<ConfigEntry> = KEYS
        .iter()
        .filter_map(|key| {
            map.get(*key).map(|(value, source)| ConfigEntry {
                key: key.to_string(),
                value: value.clone(),
                source: format!("{:?}", source),
            })
        })
        .collect();

    let config_file = config_path(explicit).map(|path| path.display().to_string());

    if output.is_json() {
        output.result(ConfigOutput { config_file, values })?;
        return Ok(());
    }

    output.section("Configuration");
    output.kv("Config file", config_file.as_deref().unwrap_or("(none)"));

    #[derive(Tabled)]
    struct ConfigRow {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let rows: Vec<ConfigRow> = values
        .into_iter()
        .map(|entry| ConfigRow { key: entry.key, value: entry.value, source: entry.source })
        .collect();
    output.table(rows);

    Ok(())
}
