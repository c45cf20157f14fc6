use cdl_core::config::LayeredConfig;
use cdl_core::models::CatalogConfig;
use std::path::{Path, PathBuf};

/// Construction parameters of a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetOptions {
    /// Root directory where the dataset can be found
    pub root: PathBuf,

    /// Download missing archives before verifying
    pub download: bool,

    /// Compare archive MD5 digests against the catalog
    pub checksum: bool,

    /// Release naming and checksum table
    pub catalog: CatalogConfig,
}

impl DatasetOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), ..Self::default() }
    }

    pub fn with_download(mut self, download: bool) -> Self {
        self.download = download;
        self
    }

    pub fn with_checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }

    /// Directory holding the archives and rasters
    pub fn data_dir(&self) -> PathBuf {
        self.catalog.data_dir(&self.root)
    }

    pub fn archive_path(&self, year: i32) -> PathBuf {
        self.catalog.archive_path(&self.root, year)
    }

    /// Checksum to verify against for `year`, `None` when verification is off
    pub fn checksum_for(&self, year: i32) -> Option<&str> {
        if self.checksum {
            self.catalog.checksum_for(year)
        } else {
            None
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            download: false,
            checksum: false,
            catalog: CatalogConfig::default(),
        }
    }
}

impl From<&LayeredConfig> for DatasetOptions {
    fn from(config: &LayeredConfig) -> Self {
        Self {
            root: config.root.value.clone(),
            download: config.download.value,
            checksum: config.checksum.value,
            catalog: config.catalog.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdl_core::config::ConfigSource;

    #[test]
    fn test_defaults() {
        let options = DatasetOptions::default();

        assert_eq!(options.root, PathBuf::from("data"));
        assert!(!options.download);
        assert!(!options.checksum);
        assert_eq!(options.data_dir(), PathBuf::from("data/cdl"));
    }

    #[test]
    fn test_checksum_only_when_enabled() {
        let options = DatasetOptions::new("/tmp/cdl");
        assert_eq!(options.checksum_for(2015), None);

        let options = options.with_checksum(true);
        assert_eq!(options.checksum_for(2015), Some("d17b4bb6ee7940af2c45d6854dafec09"));
        assert_eq!(options.checksum_for(2030), None);
    }

    #[test]
    fn test_from_layered_config() {
        let mut config = LayeredConfig::with_defaults();
        config.root.update(PathBuf::from("/srv/cdl"), ConfigSource::Cli);
        config.download.update(true, ConfigSource::Environment);

        let options = DatasetOptions::from(&config);

        assert_eq!(options.root, PathBuf::from("/srv/cdl"));
        assert!(options.download);
        assert!(!options.checksum);
        assert_eq!(options.catalog.years().len(), 13);
    }
}
