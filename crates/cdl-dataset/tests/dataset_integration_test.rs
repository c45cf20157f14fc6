//! End-to-end construction and querying with in-memory collaborators

use cdl_core::error::{CdlError, Result};
use cdl_core::models::{BoundingVolume, CatalogConfig, QuerySample};
use cdl_core::ports::{ArchiveFetcher, IntegrityVerifier};
use cdl_dataset::{CdlDataset, DatasetBuilder, DatasetOptions};
use cdl_geo::year_bounds;
use cdl_store::{extract_archive, MemoryRaster, MemoryRasterSource};
use ndarray::Array2;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use zip::write::SimpleFileOptions;

/// Verifier that only checks presence
struct PresenceVerifier;

impl IntegrityVerifier for PresenceVerifier {
    fn check_integrity(&self, path: &Path, _checksum: Option<&str>) -> bool {
        path.is_file()
    }
}

/// Fetcher that writes a release zip holding the year's raster and
/// extracts it, the way a real download would leave the directory
#[derive(Default)]
struct ZipFetcher {
    calls: AtomicUsize,
}

impl ArchiveFetcher for ZipFetcher {
    fn fetch_and_verify(&self, url: &str, destination: &Path, _checksum: Option<&str>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let archive_name = url.rsplit('/').next().unwrap_or_default();
        let raster_name = archive_name.replace(".zip", ".img");
        fs::create_dir_all(destination)?;

        let archive = destination.join(archive_name);
        let mut zip = zip::ZipWriter::new(File::create(&archive)?);
        zip.start_file(raster_name, SimpleFileOptions::default()).unwrap();
        zip.write_all(b"raster").unwrap();
        zip.finish().unwrap();

        extract_archive(&archive, destination)?;
        Ok(())
    }
}

struct FailingFetcher;

impl ArchiveFetcher for FailingFetcher {
    fn fetch_and_verify(&self, url: &str, _destination: &Path, _checksum: Option<&str>) -> Result<()> {
        Err(CdlError::Download { url: url.to_string(), reason: "connection refused".to_string() })
    }
}

fn options(root: &Path, years: &[i32]) -> DatasetOptions {
    DatasetOptions::new(root).with_catalog(CatalogConfig::default().with_years(years))
}

/// 100 x 100 grid in pixel coordinates; each pixel holds its row index
fn grid() -> MemoryRaster {
    MemoryRaster::pixel_grid(Array2::from_shape_fn((100, 100), |(row, _)| row as i32))
}

fn rasters(years: &[i32]) -> MemoryRasterSource {
    let source = MemoryRasterSource::new();
    for year in years {
        source.insert(format!("{}_30m_cdls.img", year), grid());
    }
    source
}

/// Place archives and rasters for `years` under the data directory
fn seed(options: &DatasetOptions, years: &[i32]) {
    fs::create_dir_all(options.data_dir()).unwrap();
    for &year in years {
        fs::write(options.archive_path(year), b"archive").unwrap();
        fs::write(options.data_dir().join(options.catalog.raster_name(year)), b"raster").unwrap();
    }
}

fn mid_year(year: i32) -> f64 {
    let (mint, maxt) = year_bounds(year).unwrap();
    (mint + maxt) / 2.0
}

fn instant(min_x: f64, max_x: f64, min_y: f64, max_y: f64, t: f64) -> BoundingVolume {
    BoundingVolume::new(min_x, max_x, min_y, max_y, t, t).unwrap()
}

fn build(options: DatasetOptions, years: &[i32]) -> Result<CdlDataset<MemoryRasterSource>> {
    DatasetBuilder::new(options, rasters(years), PresenceVerifier, ZipFetcher::default()).build()
}

#[test]
fn test_empty_root_without_download_fails_integrity() {
    let dir = tempfile::tempdir().unwrap();
    let err = build(options(dir.path(), &[2015]), &[2015]).unwrap_err();

    assert!(err.is_integrity());
    assert!(err.to_string().contains("enable download"));
}

#[test]
fn test_download_builds_one_entry_per_year() {
    let dir = tempfile::tempdir().unwrap();
    let years = [2013, 2014, 2015];
    let fetcher = ZipFetcher::default();

    let dataset = DatasetBuilder::new(
        options(dir.path(), &years).with_download(true),
        rasters(&years),
        PresenceVerifier,
        &fetcher,
    )
    .build()
    .unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.years(), vec![2013, 2014, 2015]);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    assert!(dir.path().join("cdl/2014_30m_cdls.img").is_file());
}

#[test]
fn test_download_skips_verified_archives() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), &[2015]).with_download(true);
    seed(&options, &[2015]);
    let fetcher = ZipFetcher::default();

    DatasetBuilder::new(options, rasters(&[2015]), PresenceVerifier, &fetcher).build().unwrap();

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_fetch_failure_aborts_construction() {
    let dir = tempfile::tempdir().unwrap();
    let err = DatasetBuilder::new(
        options(dir.path(), &[2015]).with_download(true),
        rasters(&[2015]),
        PresenceVerifier,
        FailingFetcher,
    )
    .build()
    .unwrap_err();

    assert!(matches!(err, CdlError::Download { .. }));
}

#[test]
fn test_query_returns_window_of_requested_shape() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), &[2015]);
    seed(&options, &[2015]);
    let dataset = build(options, &[2015]).unwrap();

    let sample = dataset.query(&instant(10.0, 60.0, 10.0, 60.0, mid_year(2015))).unwrap();

    assert_eq!(sample.shape(), (50, 50));
    assert_eq!(sample.masks[[0, 0]], 10);
    assert_eq!(sample.masks[[49, 0]], 59);
    assert!(sample.source.ends_with("2015_30m_cdls.img"));
}

#[test]
fn test_query_outside_time_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), &[2015]);
    seed(&options, &[2015]);
    let dataset = build(options, &[2015]).unwrap();

    let err = dataset.query(&instant(10.0, 60.0, 10.0, 60.0, mid_year(2017))).unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("with bounds (0, 100, 0, 100"));
}

#[test]
fn test_query_outside_space_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), &[2015]);
    seed(&options, &[2015]);
    let dataset = build(options, &[2015]).unwrap();

    let err = dataset.query(&instant(500.0, 550.0, 10.0, 60.0, mid_year(2015))).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_query_with_huge_extent_is_raster_error() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), &[2015]);
    seed(&options, &[2015]);
    let dataset = build(options, &[2015]).unwrap();

    let err = dataset.query(&instant(1.0, 3.0e19, 0.0, 10.0, mid_year(2015))).unwrap_err();
    assert!(matches!(err, CdlError::Raster { .. }));
}

#[test]
fn test_repeated_queries_hit_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let years = [2014, 2015];
    let options = options(dir.path(), &years);
    seed(&options, &years);
    let dataset = build(options, &years).unwrap();

    let (_, end_2014) = year_bounds(2014).unwrap();
    let volume = BoundingVolume::new(0.0, 10.0, 0.0, 10.0, end_2014 - 60.0, end_2014 + 60.0).unwrap();

    assert_eq!(dataset.hits(&volume).count(), 2);
    let first = dataset.query(&volume).unwrap();
    let second = dataset.query(&volume).unwrap();
    assert_eq!(first.source, second.source);
}

#[test]
fn test_unparsable_raster_name_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), &[2015]);
    seed(&options, &[2015]);
    fs::write(options.data_dir().join("abcd_30m_cdls.img"), b"raster").unwrap();

    let err = build(options, &[2015]).unwrap_err();
    assert!(matches!(err, CdlError::Parse { .. }));
}

#[test]
fn test_unreadable_raster_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), &[2015]);
    seed(&options, &[2015]);

    // No raster registered for 2015
    let err = DatasetBuilder::new(options, MemoryRasterSource::new(), PresenceVerifier, FailingFetcher)
        .build()
        .unwrap_err();
    assert!(matches!(err, CdlError::Raster { .. }));
}

#[test]
fn test_transform_applied_after_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(dir.path(), &[2015]);
    seed(&options, &[2015]);

    let dataset = DatasetBuilder::new(options, rasters(&[2015]), PresenceVerifier, FailingFetcher)
        .transform(|mut sample: QuerySample| {
            sample.masks.mapv_inplace(|code| code + 1000);
            sample
        })
        .build()
        .unwrap();

    let sample = dataset.query(&instant(0.0, 2.0, 0.0, 2.0, mid_year(2015))).unwrap();
    assert_eq!(sample.masks[[1, 1]], 1001);
}

#[test]
fn test_bounds_cover_indexed_years() {
    let dir = tempfile::tempdir().unwrap();
    let years = [2014, 2015];
    let options = options(dir.path(), &years);
    seed(&options, &years);
    let dataset = build(options, &years).unwrap();

    let bounds = dataset.bounds().unwrap();
    let (start, _) = year_bounds(2014).unwrap();
    let (_, end) = year_bounds(2015).unwrap();

    assert_eq!(bounds.to_array(), [0.0, 100.0, 0.0, 100.0, start, end]);
    assert_eq!(dataset.data_dir(), dir.path().join("cdl"));
}
