//! Error types for the CDL dataset

use std::path::PathBuf;
use thiserror::Error;

use crate::models::BoundingVolume;

#[derive(Debug, Error)]
pub enum CdlError {
    // Construction errors
    #[error(
        "Dataset not found or corrupted: {} archive(s) missing or failed verification. Try: {remediation}",
        .missing.len()
    )]
    Integrity {
        missing: Vec<PathBuf>,
        remediation: String,
    },

    #[error("Cannot parse year from {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    // Query errors
    #[error("Query {query} not found in index{}", bounds_suffix(.bounds))]
    NotFound {
        query: BoundingVolume,
        bounds: Option<BoundingVolume>,
    },

    #[error("Invalid bounding volume: {reason}")]
    InvalidBoundingVolume { reason: String },

    // Download and archive errors
    #[error("Download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("Checksum mismatch for {path}: expected {expected}, found {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Cannot extract archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    // Raster errors
    #[error("Raster error for {path}: {message}")]
    Raster { path: PathBuf, message: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CdlError {
    /// Integrity failure with the standard remediation hint
    pub fn integrity(missing: Vec<PathBuf>) -> Self {
        CdlError::Integrity {
            missing,
            remediation: "enable download (download = true, CDL_DOWNLOAD=true or --download)"
                .to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CdlError::NotFound { .. })
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, CdlError::Integrity { .. })
    }
}

fn bounds_suffix(bounds: &Option<BoundingVolume>) -> String {
    match bounds {
        Some(bounds) => format!(" with bounds {}", bounds),
        None => " (index is empty)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, CdlError>;
