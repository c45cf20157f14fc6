//! Integrity checks and downloads of the yearly release archives

use crate::options::DatasetOptions;
use cdl_core::error::Result;
use cdl_core::ports::{ArchiveFetcher, IntegrityVerifier};
use std::path::PathBuf;

/// State of one year's archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearStatus {
    pub year: i32,
    pub archive: PathBuf,
    pub verified: bool,
}

/// Outcome of checking every archive in the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub years: Vec<YearStatus>,
}

impl IntegrityReport {
    /// Archives that are absent or fail verification
    pub fn missing(&self) -> Vec<PathBuf> {
        self.years
            .iter()
            .filter(|status| !status.verified)
            .map(|status| status.archive.clone())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.years.iter().all(|status| status.verified)
    }

    pub fn verified_count(&self) -> usize {
        self.years.iter().filter(|status| status.verified).count()
    }
}

/// Check the archive of every catalog year.
///
/// With checksums disabled only presence is checked.
pub fn check_integrity<V: IntegrityVerifier + ?Sized>(
    options: &DatasetOptions,
    verifier: &V,
) -> IntegrityReport {
    let years = options
        .catalog
        .years()
        .into_iter()
        .map(|year| {
            let archive = options.archive_path(year);
            let verified = verifier.check_integrity(&archive, options.checksum_for(year));
            tracing::debug!(year, path = %archive.display(), verified, "Checked archive");
            YearStatus { year, archive, verified }
        })
        .collect();

    IntegrityReport { years }
}

/// Years skipped and fetched by a download
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub skipped: Vec<i32>,
    pub fetched: Vec<i32>,
}

/// Progress of a download, reported per year
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// Archive already verified
    Skipped { year: i32 },
    /// Fetch started
    Fetching { year: i32, url: String },
    /// Archive fetched and extracted
    Fetched { year: i32 },
}

/// Fetch and extract the archive of every year that fails its integrity
/// check. Fails on the first fetcher error.
pub fn download<V, F>(options: &DatasetOptions, verifier: &V, fetcher: &F) -> Result<DownloadReport>
where
    V: IntegrityVerifier + ?Sized,
    F: ArchiveFetcher + ?Sized,
{
    download_with_progress(options, verifier, fetcher, |_| {})
}

/// Download with progress reporting
pub fn download_with_progress<V, F, P>(
    options: &DatasetOptions,
    verifier: &V,
    fetcher: &F,
    mut progress: P,
) -> Result<DownloadReport>
where
    V: IntegrityVerifier + ?Sized,
    F: ArchiveFetcher + ?Sized,
    P: FnMut(DownloadEvent),
{
    let integrity = check_integrity(options, verifier);
    let mut report = DownloadReport::default();

    if integrity.is_complete() {
        tracing::info!("Files already downloaded and verified");
        for status in integrity.years {
            progress(DownloadEvent::Skipped { year: status.year });
            report.skipped.push(status.year);
        }
        return Ok(report);
    }

    let destination = options.data_dir();
    for status in integrity.years {
        let year = status.year;
        if status.verified {
            progress(DownloadEvent::Skipped { year });
            report.skipped.push(year);
            continue;
        }

        let url = options.catalog.url_for(year);
        tracing::info!(year, url = %url, "Downloading release");
        progress(DownloadEvent::Fetching { year, url: url.clone() });

        fetcher.fetch_and_verify(&url, &destination, options.checksum_for(year))?;

        progress(DownloadEvent::Fetched { year });
        report.fetched.push(year);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdl_core::error::CdlError;
    use cdl_core::models::CatalogConfig;
    use std::path::Path;
    use std::sync::Mutex;

    struct PresenceVerifier;

    impl IntegrityVerifier for PresenceVerifier {
        fn check_integrity(&self, path: &Path, _checksum: Option<&str>) -> bool {
            path.is_file()
        }
    }

    #[derive(Default)]
    struct RecordingFetcher {
        urls: Mutex<Vec<String>>,
    }

    impl ArchiveFetcher for RecordingFetcher {
        fn fetch_and_verify(&self, url: &str, destination: &Path, _checksum: Option<&str>) -> Result<()> {
            self.urls.lock().unwrap().push(url.to_string());
            let name = url.rsplit('/').next().unwrap_or_default();
            std::fs::create_dir_all(destination)?;
            std::fs::write(destination.join(name), b"archive")?;
            Ok(())
        }
    }

    struct FailingFetcher;

    impl ArchiveFetcher for FailingFetcher {
        fn fetch_and_verify(&self, url: &str, _destination: &Path, _checksum: Option<&str>) -> Result<()> {
            Err(CdlError::Download { url: url.to_string(), reason: "HTTP 503".to_string() })
        }
    }

    fn options(root: &Path) -> DatasetOptions {
        DatasetOptions::new(root).with_catalog(CatalogConfig::default().with_years(&[2014, 2015]))
    }

    #[test]
    fn test_check_integrity_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let report = check_integrity(&options(dir.path()), &PresenceVerifier);

        assert!(!report.is_complete());
        assert_eq!(report.missing().len(), 2);
        assert_eq!(report.verified_count(), 0);
    }

    #[test]
    fn test_download_fetches_only_missing_years() {
        let dir = tempfile::tempdir().unwrap();
        let options = options(dir.path());
        std::fs::create_dir_all(options.data_dir()).unwrap();
        std::fs::write(options.archive_path(2014), b"archive").unwrap();

        let fetcher = RecordingFetcher::default();
        let report = download(&options, &PresenceVerifier, &fetcher).unwrap();

        assert_eq!(report.skipped, vec![2014]);
        assert_eq!(report.fetched, vec![2015]);
        assert_eq!(fetcher.urls.lock().unwrap().len(), 1);
        assert!(fetcher.urls.lock().unwrap()[0].ends_with("/2015_30m_cdls.zip"));
        assert!(check_integrity(&options, &PresenceVerifier).is_complete());
    }

    #[test]
    fn test_download_is_noop_when_verified() {
        let dir = tempfile::tempdir().unwrap();
        let options = options(dir.path());
        let fetcher = RecordingFetcher::default();
        download(&options, &PresenceVerifier, &fetcher).unwrap();

        let report = download(&options, &PresenceVerifier, &fetcher).unwrap();

        assert!(report.fetched.is_empty());
        assert_eq!(report.skipped, vec![2015, 2014]);
        assert_eq!(fetcher.urls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_download_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        let options = options(dir.path());
        std::fs::create_dir_all(options.data_dir()).unwrap();
        std::fs::write(options.archive_path(2015), b"archive").unwrap();

        let mut events = Vec::new();
        download_with_progress(&options, &PresenceVerifier, &RecordingFetcher::default(), |event| {
            events.push(event)
        })
        .unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0], DownloadEvent::Skipped { year: 2015 });
        assert!(matches!(&events[1], DownloadEvent::Fetching { year: 2014, url } if url.ends_with("2014_30m_cdls.zip")));
        assert_eq!(events[2], DownloadEvent::Fetched { year: 2014 });
    }

    #[test]
    fn test_download_propagates_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = download(&options(dir.path()), &PresenceVerifier, &FailingFetcher).unwrap_err();

        assert!(matches!(err, CdlError::Download { .. }));
    }
}
