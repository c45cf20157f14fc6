use geo::Rect;
use ndarray::Array2;
use std::path::Path;

use crate::error::{CdlError, Result};
use crate::models::PixelWindow;

/// Port for georeferenced raster access.
///
/// Every call opens its own handle and releases it before returning, on
/// success and on failure alike. Implementations must not cache handles.
pub trait RasterSource: Send + Sync {
    /// Spatial bounding box of the raster in its own coordinate system
    fn bounds(&self, path: &Path) -> Result<Rect<f64>>;

    /// Read the first band for `window`, converted to `i32`.
    ///
    /// The returned array has shape `(window.height, window.width)`.
    fn read_window(&self, path: &Path, window: &PixelWindow) -> Result<Array2<i32>>;
}

/// Check `window` against a raster of `rows` x `cols` before reading.
///
/// An empty window needs no read and yields its zero-sized array as
/// `Some`. `None` means the adapter reads the window from the raster.
pub fn check_window(
    path: &Path,
    window: &PixelWindow,
    rows: usize,
    cols: usize,
) -> Result<Option<Array2<i32>>> {
    if !window.fits_within(rows, cols) {
        return Err(CdlError::Raster {
            path: path.to_path_buf(),
            message: format!("window {:?} exceeds raster of {} rows x {} cols", window, rows, cols),
        });
    }

    if window.is_empty() {
        return Ok(Some(Array2::zeros(window.shape())));
    }

    Ok(None)
}
