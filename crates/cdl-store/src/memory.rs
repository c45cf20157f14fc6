//! In-memory raster source for development and testing.
//!
//! Rasters are keyed by file name, so the same grid is found whatever
//! directory the file was discovered in. The maps use `RwLock::unwrap()`
//! intentionally: lock poisoning only occurs when another thread panicked
//! while holding the lock, which is an unrecoverable state.

use cdl_core::error::{CdlError, Result};
use cdl_core::models::PixelWindow;
use cdl_core::ports::{check_window, RasterSource};
use geo::{coord, Rect};
use ndarray::{s, Array2};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// A north-up grid of category codes
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRaster {
    /// Upper-left corner `(x, y)`
    pub origin: (f64, f64),

    /// Pixel size; the grid extends right and down from the origin
    pub pixel_size: f64,

    /// Category codes, `[row, col]`
    pub data: Array2<i32>,
}

impl MemoryRaster {
    pub fn new(origin: (f64, f64), pixel_size: f64, data: Array2<i32>) -> Self {
        Self { origin, pixel_size, data }
    }

    /// Grid whose pixel coordinates double as spatial coordinates:
    /// bounds `(0, 0)`-`(cols, rows)`
    pub fn pixel_grid(data: Array2<i32>) -> Self {
        let (rows, _) = data.dim();
        Self::new((0.0, rows as f64), 1.0, data)
    }

    pub fn bounds(&self) -> Rect<f64> {
        let (rows, cols) = self.data.dim();
        let (x0, y0) = self.origin;
        Rect::new(
            coord! { x: x0, y: y0 },
            coord! { x: x0 + cols as f64 * self.pixel_size, y: y0 - rows as f64 * self.pixel_size },
        )
    }
}

/// In-memory implementation of RasterSource
#[derive(Debug, Clone, Default)]
pub struct MemoryRasterSource {
    rasters: Arc<RwLock<HashMap<String, MemoryRaster>>>,
    opens: Arc<AtomicUsize>,
}

impl MemoryRasterSource {
    /// Create a new in-memory raster source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raster under a file name such as `2015_30m_cdls.img`
    pub fn insert(&self, file_name: impl Into<String>, raster: MemoryRaster) {
        self.rasters.write().unwrap().insert(file_name.into(), raster);
    }

    pub fn with_raster(self, file_name: impl Into<String>, raster: MemoryRaster) -> Self {
        self.insert(file_name, raster);
        self
    }

    /// Number of times a raster has been opened
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    fn open(&self, path: &Path) -> Result<MemoryRaster> {
        self.opens.fetch_add(1, Ordering::SeqCst);

        let name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
        self.rasters.read().unwrap().get(name).cloned().ok_or_else(|| CdlError::Raster {
            path: path.to_path_buf(),
            message: "no such raster".to_string(),
        })
    }
}

impl RasterSource for MemoryRasterSource {
    fn bounds(&self, path: &Path) -> Result<Rect<f64>> {
        Ok(self.open(path)?.bounds())
    }

    fn read_window(&self, path: &Path, window: &PixelWindow) -> Result<Array2<i32>> {
        let raster = self.open(path)?;
        let (rows, cols) = raster.data.dim();

        if let Some(empty) = check_window(path, window, rows, cols)? {
            return Ok(empty);
        }

        let (row, col) = (window.row_off as usize, window.col_off as usize);
        match (window.row_end(), window.col_end()) {
            (Some(row_end), Some(col_end)) => Ok(raster.data.slice(s![row..row_end, col..col_end]).to_owned()),
            _ => Err(CdlError::Raster {
                path: path.to_path_buf(),
                message: format!("window {:?} overflows the pixel grid", window),
            }),
        }
    }
}
