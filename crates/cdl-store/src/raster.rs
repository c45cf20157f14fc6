//! GDAL-backed raster source
//!
//! Each call opens the dataset, does its work, and drops the handle before
//! returning, so no file stays open between queries.

use cdl_core::error::{CdlError, Result};
use cdl_core::models::PixelWindow;
use cdl_core::ports::{check_window, RasterSource};
use gdal::errors::GdalError;
use gdal::Dataset;
use geo::{coord, Rect};
use ndarray::Array2;
use std::path::Path;

/// Convert GDAL errors to CDL errors with context
pub fn convert_gdal_error(err: GdalError, path: &Path, context: &str) -> CdlError {
    CdlError::Raster {
        path: path.to_path_buf(),
        message: format!("{}: {}", context, err),
    }
}

/// Raster source reading files through GDAL
#[derive(Debug, Clone, Default)]
pub struct GdalRasterSource {}

impl GdalRasterSource {
    pub fn new() -> Self {
        Self {}
    }

    fn open(&self, path: &Path) -> Result<Dataset> {
        if !path.is_file() {
            return Err(CdlError::Raster {
                path: path.to_path_buf(),
                message: "file does not exist".to_string(),
            });
        }

        Dataset::open(path).map_err(|e| convert_gdal_error(e, path, "Failed to open raster"))
    }
}

impl RasterSource for GdalRasterSource {
    fn bounds(&self, path: &Path) -> Result<Rect<f64>> {
        let dataset = self.open(path)?;
        let (cols, rows) = dataset.raster_size();

        let transform = match dataset.geo_transform() {
            Ok(transform) => transform,
            Err(e) => {
                // Ungeoreferenced rasters are addressed in pixel units
                tracing::debug!(path = %path.display(), error = %e, "No geotransform, using pixel grid");
                [0.0, 1.0, 0.0, 0.0, 1.0, 0.0]
            }
        };

        if transform[2] != 0.0 || transform[4] != 0.0 {
            tracing::warn!(
                path = %path.display(),
                "Rotated geotransform; bounds ignore the rotation terms"
            );
        }

        let x0 = transform[0];
        let y0 = transform[3];
        let x1 = x0 + transform[1] * cols as f64;
        let y1 = y0 + transform[5] * rows as f64;

        Ok(Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 }))
    }

    fn read_window(&self, path: &Path, window: &PixelWindow) -> Result<Array2<i32>> {
        let dataset = self.open(path)?;
        let (cols, rows) = dataset.raster_size();

        if let Some(empty) = check_window(path, window, rows, cols)? {
            return Ok(empty);
        }

        let band = dataset
            .rasterband(1)
            .map_err(|e| convert_gdal_error(e, path, "Failed to get raster band"))?;

        let size = (window.width, window.height);
        let buffer = band
            .read_as::<i32>((window.col_off, window.row_off), size, size, None)
            .map_err(|e| convert_gdal_error(e, path, "Failed to read raster window"))?;

        let (_, data) = buffer.into_shape_and_vec();
        Array2::from_shape_vec(window.shape(), data).map_err(|e| CdlError::Raster {
            path: path.to_path_buf(),
            message: format!("Unexpected buffer size: {}", e),
        })
    }
}
