//! CDL Geo - Spatiotemporal indexing and time axis helpers
//!
//! This crate handles the indexing side of the dataset: an R-tree over
//! `(x, y, t)` envelopes that maps query volumes to raster files, and the
//! conversion between release years, calendar dates, and epoch seconds.

pub mod index;
pub mod temporal;

pub use index::{IndexedEntry, SpatiotemporalIndex, SpatiotemporalIndexBuilder};
pub use temporal::{parse_timestamp, year_bounds, year_of};
