use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::BoundingVolume;

/// Association between a bounding volume and the raster file that covers it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Spatial bounds of the raster and temporal bounds of its year
    pub volume: BoundingVolume,

    /// Path to the raster file
    pub path: PathBuf,

    /// Release year encoded in the file name
    pub year: i32,
}

impl IndexEntry {
    pub fn new(volume: BoundingVolume, path: impl Into<PathBuf>, year: i32) -> Self {
        Self { volume, path: path.into(), year }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
