use serde::Serialize;

/// One configuration value and its source
#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub config_file: Option<String>,
    pub values: Vec<ConfigEntry>,
}

/// State of one archive
#[derive(Debug, Serialize)]
pub struct ArchiveStatus {
    pub year: i32,
    pub archive: String,
    pub verified: bool,
}

/// Output for verify command
#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    pub data_dir: String,
    pub checksum: bool,
    pub complete: bool,
    pub archives: Vec<ArchiveStatus>,
}

/// Output for download command
#[derive(Debug, Serialize)]
pub struct DownloadOutput {
    pub data_dir: String,
    pub fetched: Vec<i32>,
    pub skipped: Vec<i32>,
}

/// One indexed raster
#[derive(Debug, Serialize)]
pub struct EntryInfo {
    pub year: i32,
    pub path: String,
    /// `[minx, maxx, miny, maxy, mint, maxt]`
    pub bounds: [f64; 6],
}

/// Output for inspect command
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub data_dir: String,
    pub entries: Vec<EntryInfo>,
    pub bounds: Option<[f64; 6]>,
}

/// Pixel count of one category
#[derive(Debug, Serialize)]
pub struct ClassCount {
    pub code: i32,
    pub pixels: usize,
}

/// Output for query command
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub source: String,
    pub bbox: [f64; 6],
    pub rows: usize,
    pub cols: usize,
    pub classes: Vec<ClassCount>,
    pub masks_file: Option<String>,
}
