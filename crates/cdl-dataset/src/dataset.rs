use crate::discovery::discover_rasters;
use crate::integrity::{check_integrity, download};
use crate::options::DatasetOptions;
use cdl_core::error::{CdlError, Result};
use cdl_core::models::{BoundingVolume, IndexEntry, PixelWindow, QuerySample};
use cdl_core::ports::{ArchiveFetcher, IntegrityVerifier, RasterSource};
use cdl_geo::{year_bounds, SpatiotemporalIndex};
use cdl_store::{GdalRasterSource, HttpArchiveFetcher, Md5Verifier};
use std::fmt;
use std::path::{Path, PathBuf};

/// Function applied to every sample after query resolution
pub type SampleTransform = Box<dyn Fn(QuerySample) -> QuerySample + Send + Sync>;

/// Builder running the construction sequence of a dataset
pub struct DatasetBuilder<R, V, F>
where
    R: RasterSource,
    V: IntegrityVerifier,
    F: ArchiveFetcher,
{
    options: DatasetOptions,
    raster: R,
    verifier: V,
    fetcher: F,
    transform: Option<SampleTransform>,
}

impl<R, V, F> DatasetBuilder<R, V, F>
where
    R: RasterSource,
    V: IntegrityVerifier,
    F: ArchiveFetcher,
{
    pub fn new(options: DatasetOptions, raster: R, verifier: V, fetcher: F) -> Self {
        Self { options, raster, verifier, fetcher, transform: None }
    }

    /// Set the function applied to every query sample
    pub fn transform<T>(mut self, transform: T) -> Self
    where
        T: Fn(QuerySample) -> QuerySample + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Build the dataset
    ///
    /// This performs the following steps:
    /// 1. Download archives failing their integrity check, if enabled
    /// 2. Verify every archive in the catalog
    /// 3. Discover the extracted rasters and parse their years
    /// 4. Index each raster by footprint and release year
    ///
    /// Any failure aborts construction; no partially indexed dataset is
    /// returned.
    pub fn build(self) -> Result<CdlDataset<R>> {
        let options = self.options;

        if options.download {
            let report = download(&options, &self.verifier, &self.fetcher)?;
            tracing::info!(
                fetched = report.fetched.len(),
                skipped = report.skipped.len(),
                "Download finished"
            );
        }

        let integrity = check_integrity(&options, &self.verifier);
        if !integrity.is_complete() {
            return Err(CdlError::integrity(integrity.missing()));
        }
        tracing::info!(archives = integrity.verified_count(), "Archives verified");

        let data_dir = options.data_dir();
        let rasters = discover_rasters(&data_dir, &options.catalog.raster_suffix)?;

        let mut index = SpatiotemporalIndex::new();
        for raster in rasters {
            let footprint = self.raster.bounds(&raster.path)?;
            let (mint, maxt) = year_bounds(raster.year)?;
            let volume = BoundingVolume::from_rect(footprint, mint, maxt)?;
            index.insert(IndexEntry::new(volume, raster.path, raster.year));
        }

        tracing::info!(dir = %data_dir.display(), rasters = index.len(), "Dataset indexed");

        Ok(CdlDataset { options, raster: self.raster, index, transform: self.transform })
    }
}

/// Cropland Data Layer dataset.
///
/// Holds the read-only index built at construction. Every query opens the
/// raster it needs and releases it before returning, so one dataset can
/// serve queries from several threads when `R` allows it.
pub struct CdlDataset<R> {
    options: DatasetOptions,
    raster: R,
    index: SpatiotemporalIndex,
    transform: Option<SampleTransform>,
}

impl CdlDataset<GdalRasterSource> {
    /// Construct a dataset reading rasters through GDAL, verifying archives
    /// by MD5 and downloading over HTTP
    pub fn open(options: DatasetOptions) -> Result<Self> {
        let fetcher = HttpArchiveFetcher::new()?;
        DatasetBuilder::new(options, GdalRasterSource::new(), Md5Verifier::new(), fetcher).build()
    }
}

impl<R: RasterSource> CdlDataset<R> {
    /// Resolve a query volume into a label sample.
    ///
    /// The first intersecting raster is used. The spatial extent of the
    /// volume addresses the raster's pixel grid directly.
    pub fn query(&self, volume: &BoundingVolume) -> Result<QuerySample> {
        let mut hits = self.index.query(volume);
        let entry = hits.next().ok_or_else(|| CdlError::NotFound {
            query: *volume,
            bounds: self.index.bounds(),
        })?;

        if hits.next().is_some() {
            tracing::warn!(
                query = %volume,
                path = %entry.path.display(),
                "Query intersects several rasters; using the first hit only"
            );
        }

        let window = PixelWindow::from_volume(volume);
        tracing::debug!(path = %entry.path.display(), ?window, "Reading window");
        let masks = self.raster.read_window(&entry.path, &window)?;

        let sample = QuerySample::new(masks, *volume, entry.path.clone());
        Ok(match &self.transform {
            Some(transform) => transform(sample),
            None => sample,
        })
    }

    /// Entries intersecting `volume`, lazily
    pub fn hits<'a>(&'a self, volume: &BoundingVolume) -> impl Iterator<Item = &'a IndexEntry> + 'a {
        self.index.query(volume)
    }

    pub fn index(&self) -> &SpatiotemporalIndex {
        &self.index
    }

    /// Volume enclosing every indexed raster
    pub fn bounds(&self) -> Option<BoundingVolume> {
        self.index.bounds()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Indexed release years, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.index.iter().map(|entry| entry.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn root(&self) -> &Path {
        self.options.root()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.options.data_dir()
    }

    pub fn options(&self) -> &DatasetOptions {
        &self.options
    }
}

impl<R> fmt::Debug for CdlDataset<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdlDataset")
            .field("options", &self.options)
            .field("entries", &self.index.len())
            .field("transform", &self.transform.is_some())
            .finish_non_exhaustive()
    }
}
