//! CDL Core - Domain models, configuration, and collaborator ports
//!
//! This crate contains the core domain types and port definitions for the
//! Cropland Data Layer dataset: bounding volumes, index entries, query samples,
//! the checksum catalog, and the traits that raster, integrity, and download
//! adapters implement.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{CdlError, Result};
