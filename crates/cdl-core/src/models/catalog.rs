use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Expected checksum of one year's release archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearChecksum {
    pub year: i32,
    pub md5: String,
}

impl YearChecksum {
    pub fn new(year: i32, md5: impl Into<String>) -> Self {
        Self { year, md5: md5.into() }
    }
}

/// Immutable description of the published releases: where they live
/// remotely, how they are named on disk, and what they hash to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Folder below the dataset root holding archives and rasters
    pub base_folder: String,

    /// Download URL with a `{year}` placeholder
    pub url_template: String,

    /// File name suffix of extracted rasters
    pub raster_suffix: String,

    /// File name suffix of release archives
    pub archive_suffix: String,

    /// One entry per supported year
    pub checksums: Vec<YearChecksum>,
}

const REFERENCE_CHECKSUMS: [(i32, &str); 13] = [
    (2020, "97b3b5fd62177c9ed857010bca146f36"),
    (2019, "49d8052168c15c18f8b81ee21397b0bb"),
    (2018, "c7a3061585131ef049bec8d06c6d521e"),
    (2017, "dc8c1d7b255c9258d332dd8b23546c93"),
    (2016, "bb4df1b2ee6cedcc12a7e5a4527fcf1b"),
    (2015, "d17b4bb6ee7940af2c45d6854dafec09"),
    (2014, "6e0fcc800bd9f090f543104db93bead8"),
    (2013, "38df780d8b504659d837b4c53a51b3f7"),
    (2012, "2f3b46e6e4d91c3b7e2a049ba1531abc"),
    (2011, "dac7fe435c3c5a65f05846c715315460"),
    (2010, "18c9a00f5981d5d07ace69e3e33ea105"),
    (2009, "81a20629a4713de6efba2698ccb2aa3d"),
    (2008, "e6aa3967e379b98fd30c26abe9696053"),
];

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_folder: "cdl".to_string(),
            url_template:
                "https://www.nass.usda.gov/Research_and_Science/Cropland/Release/datasets/{year}_30m_cdls.zip"
                    .to_string(),
            raster_suffix: "_30m_cdls.img".to_string(),
            archive_suffix: "_30m_cdls.zip".to_string(),
            checksums: REFERENCE_CHECKSUMS
                .iter()
                .map(|(year, md5)| YearChecksum::new(*year, *md5))
                .collect(),
        }
    }
}

impl CatalogConfig {
    /// Restrict the table to the given years, keeping the table order
    pub fn with_years(mut self, years: &[i32]) -> Self {
        self.checksums.retain(|entry| years.contains(&entry.year));
        self
    }

    /// Supported years in table order
    pub fn years(&self) -> Vec<i32> {
        self.checksums.iter().map(|entry| entry.year).collect()
    }

    pub fn checksum_for(&self, year: i32) -> Option<&str> {
        self.checksums.iter().find(|entry| entry.year == year).map(|entry| entry.md5.as_str())
    }

    pub fn url_for(&self, year: i32) -> String {
        self.url_template.replace("{year}", &year.to_string())
    }

    pub fn archive_name(&self, year: i32) -> String {
        format!("{}{}", year, self.archive_suffix)
    }

    pub fn raster_name(&self, year: i32) -> String {
        format!("{}{}", year, self.raster_suffix)
    }

    /// Directory holding the archives and rasters below `root`
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.base_folder)
    }

    pub fn archive_path(&self, root: &Path, year: i32) -> PathBuf {
        self.data_dir(root).join(self.archive_name(year))
    }
}
