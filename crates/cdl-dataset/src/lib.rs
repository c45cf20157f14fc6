//! CDL Dataset - Construction and querying of the Cropland Data Layer
//!
//! This crate implements the dataset accessor: it downloads and verifies the
//! yearly release archives, discovers the extracted rasters, indexes them by
//! footprint and year, and resolves query volumes into label samples.

pub mod dataset;
pub mod discovery;
pub mod integrity;
pub mod options;

pub use dataset::{CdlDataset, DatasetBuilder, SampleTransform};
pub use discovery::{discover_rasters, parse_year, RasterFile};
pub use integrity::{
    check_integrity, download, download_with_progress, DownloadEvent, DownloadReport,
    IntegrityReport, YearStatus,
};
pub use options::DatasetOptions;
