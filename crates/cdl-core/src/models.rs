pub mod catalog;
pub mod entry;
pub mod sample;
pub mod volume;
pub mod window;

pub use catalog::{CatalogConfig, YearChecksum};
pub use entry::IndexEntry;
pub use sample::QuerySample;
pub use volume::BoundingVolume;
pub use window::PixelWindow;
