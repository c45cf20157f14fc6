//! Port trait definitions
//!
//! These traits define the collaborators the dataset consumes. Adapters
//! implement them in `cdl-store`.

pub mod archive;
pub mod raster;

pub use archive::{ArchiveFetcher, IntegrityVerifier};
pub use raster::{check_window, RasterSource};
