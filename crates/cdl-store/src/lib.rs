//! CDL Store - Collaborator adapters
//!
//! This crate provides adapter implementations for the ports defined in
//! `cdl-core`: GDAL-backed and in-memory raster sources, an MD5 integrity
//! verifier, and an HTTP archive fetcher that extracts ZIP releases.

pub mod fetch;
pub mod integrity;
pub mod memory;
pub mod raster;

pub use fetch::{extract_archive, HttpArchiveFetcher};
pub use integrity::{calculate_md5, Md5Verifier};
pub use memory::{MemoryRaster, MemoryRasterSource};
pub use raster::GdalRasterSource;
