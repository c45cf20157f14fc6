use serde::{Deserialize, Serialize};

use super::BoundingVolume;

/// Rectangular sub-region of a raster's pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelWindow {
    /// Column of the window origin
    pub col_off: isize,

    /// Row of the window origin
    pub row_off: isize,

    /// Number of columns
    pub width: usize,

    /// Number of rows
    pub height: usize,
}

impl PixelWindow {
    pub fn new(col_off: isize, row_off: isize, width: usize, height: usize) -> Self {
        Self { col_off, row_off, width, height }
    }

    /// Window addressed by the spatial extent of a query volume.
    ///
    /// The volume is read in the raster's own pixel grid: the origin is
    /// `(minx, miny)` and the extent is `(maxx - minx, maxy - miny)`. No
    /// reprojection or resampling takes place.
    pub fn from_volume(volume: &BoundingVolume) -> Self {
        Self {
            col_off: volume.min_x().floor() as isize,
            row_off: volume.min_y().floor() as isize,
            width: volume.width().round() as usize,
            height: volume.height().round() as usize,
        }
    }

    /// `(rows, cols)` of the window
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One past the last column, or `None` for a negative origin or an
    /// end beyond `usize::MAX`
    pub fn col_end(&self) -> Option<usize> {
        usize::try_from(self.col_off).ok()?.checked_add(self.width)
    }

    /// One past the last row, with the same rules as [`Self::col_end`]
    pub fn row_end(&self) -> Option<usize> {
        usize::try_from(self.row_off).ok()?.checked_add(self.height)
    }

    /// Whether the window lies inside a grid of `rows` x `cols`
    pub fn fits_within(&self, rows: usize, cols: usize) -> bool {
        self.col_end().is_some_and(|end| end <= cols) && self.row_end().is_some_and(|end| end <= rows)
    }
}
