use crate::error::{CdlError, Result};
use crate::models::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the CDL dataset
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Root directory where the dataset can be found
    pub root: ConfigValue<PathBuf>,
    /// Download missing archives during construction
    pub download: ConfigValue<bool>,
    /// Verify archive MD5 checksums (slow)
    pub checksum: ConfigValue<bool>,
    /// Release naming and checksum table
    pub catalog: ConfigValue<CatalogConfig>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            root: ConfigValue::new(PathBuf::from("data"), ConfigSource::Default),
            download: ConfigValue::new(false, ConfigSource::Default),
            checksum: ConfigValue::new(false, ConfigSource::Default),
            catalog: ConfigValue::new(CatalogConfig::default(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CdlError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CdlError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(root) = file_config.root {
            self.root.update(root, ConfigSource::File);
        }

        if let Some(download) = file_config.download {
            self.download.update(download, ConfigSource::File);
        }

        if let Some(checksum) = file_config.checksum {
            self.checksum.update(checksum, ConfigSource::File);
        }

        if let Some(catalog) = file_config.catalog {
            self.catalog.update(catalog, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CDL_ROOT
        if let Ok(root) = env::var("CDL_ROOT") {
            if root.trim().is_empty() {
                tracing::warn!("Ignoring empty CDL_ROOT");
            } else {
                self.root.update(PathBuf::from(root), ConfigSource::Environment);
            }
        }

        // CDL_DOWNLOAD
        if let Ok(download_str) = env::var("CDL_DOWNLOAD") {
            match parse_bool("download", &download_str) {
                Ok(download) => self.download.update(download, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CDL_DOWNLOAD value '{}': expected true or false",
                    download_str
                ),
            }
        }

        // CDL_CHECKSUM
        if let Ok(checksum_str) = env::var("CDL_CHECKSUM") {
            match parse_bool("checksum", &checksum_str) {
                Ok(checksum) => self.checksum.update(checksum, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CDL_CHECKSUM value '{}': expected true or false",
                    checksum_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(root) = overrides.root {
            self.root.update(root, ConfigSource::Cli);
        }

        if let Some(download) = overrides.download {
            self.download.update(download, ConfigSource::Cli);
        }

        if let Some(checksum) = overrides.checksum {
            self.checksum.update(checksum, ConfigSource::Cli);
        }

        if let Some(years) = overrides.years {
            let catalog = self.catalog.value.clone().with_years(&years);
            self.catalog.update(catalog, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "root".to_string(),
            (self.root.value.display().to_string(), self.root.source),
        );

        map.insert("download".to_string(), (self.download.value.to_string(), self.download.source));

        map.insert("checksum".to_string(), (self.checksum.value.to_string(), self.checksum.source));

        map.insert(
            "base_folder".to_string(),
            (self.catalog.value.base_folder.clone(), self.catalog.source),
        );

        let years = self.catalog.value.years();
        let years = match (years.iter().min(), years.iter().max()) {
            (Some(min), Some(max)) => format!("{}-{} ({} releases)", min, max, years.len()),
            _ => "none".to_string(),
        };
        map.insert("years".to_string(), (years, self.catalog.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    root: Option<PathBuf>,
    download: Option<bool>,
    checksum: Option<bool>,
    catalog: Option<CatalogConfig>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub root: Option<PathBuf>,
    pub download: Option<bool>,
    pub checksum: Option<bool>,
    /// Restrict the catalog to these years
    pub years: Option<Vec<i32>>,
}

/// Parse a boolean flag from string
pub fn parse_bool(key: &str, s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(CdlError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}
