use ndarray::Array2;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::BoundingVolume;

/// Labeled data returned for a query
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySample {
    /// Land-cover category codes, addressed by `[row, col]` within the window
    pub masks: Array2<i32>,

    /// The query volume that produced this sample
    pub bbox: BoundingVolume,

    /// Raster file the pixels were read from
    pub source: PathBuf,
}

impl QuerySample {
    pub fn new(masks: Array2<i32>, bbox: BoundingVolume, source: impl Into<PathBuf>) -> Self {
        Self { masks, bbox, source: source.into() }
    }

    /// `(rows, cols)` of the mask array
    pub fn shape(&self) -> (usize, usize) {
        self.masks.dim()
    }

    /// Pixel count per category code
    pub fn class_counts(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for &code in self.masks.iter() {
            *counts.entry(code).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_class_counts() {
        let bbox = BoundingVolume::new(0.0, 3.0, 0.0, 2.0, 0.0, 0.0).unwrap();
        let sample = QuerySample::new(array![[1, 1, 5], [5, 5, 0]], bbox, "2015_30m_cdls.img");

        assert_eq!(sample.shape(), (2, 3));

        let counts = sample.class_counts();
        assert_eq!(counts.get(&0), Some(&1));
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&5), Some(&3));
    }
}
