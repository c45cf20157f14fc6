//! Discovery of extracted rasters below the data directory

use cdl_core::error::{CdlError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A raster file and the release year encoded in its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterFile {
    pub path: PathBuf,
    pub year: i32,
}

/// Find the rasters directly inside `dir` whose names end in `suffix`.
///
/// Results are sorted by file name. A missing directory yields no files.
/// A matching file whose name does not start with a numeric year fails
/// the whole scan.
pub fn discover_rasters(dir: &Path, suffix: &str) -> Result<Vec<RasterFile>> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "Data directory does not exist");
        return Ok(Vec::new());
    }

    let mut rasters = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| CdlError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry.file_name().to_str().is_some_and(|name| name.ends_with(suffix));
        if !matches {
            continue;
        }

        let path = entry.into_path();
        let year = parse_year(&path)?;
        tracing::debug!(path = %path.display(), year, "Discovered raster");
        rasters.push(RasterFile { path, year });
    }

    Ok(rasters)
}

/// Release year from the token before the first `_` of the file name
pub fn parse_year(path: &Path) -> Result<i32> {
    let name = path.file_name().and_then(|name| name.to_str()).ok_or_else(|| CdlError::Parse {
        path: path.to_path_buf(),
        reason: "file name is not valid UTF-8".to_string(),
    })?;

    let token = name.split('_').next().unwrap_or_default();
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(CdlError::Parse {
            path: path.to_path_buf(),
            reason: format!("'{}' is not a numeric year", token),
        });
    }

    token.parse().map_err(|e| CdlError::Parse {
        path: path.to_path_buf(),
        reason: format!("'{}' is not a valid year: {}", token, e),
    })
}
