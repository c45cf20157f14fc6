//! HTTP download and ZIP extraction of release archives

use crate::integrity::{calculate_md5, Md5Verifier};
use cdl_core::error::{CdlError, Result};
use cdl_core::ports::{ArchiveFetcher, IntegrityVerifier};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Releases run to several gigabytes
const DEFAULT_TIMEOUT_SECS: u64 = 3600;

const USER_AGENT: &str = concat!("cdl/", env!("CARGO_PKG_VERSION"));

/// Archive fetcher downloading over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpArchiveFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpArchiveFetcher {
    /// Create a fetcher with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a fetcher with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CdlError::Download {
                url: String::new(),
                reason: format!("cannot create HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    fn download(&self, url: &str, archive: &Path) -> Result<()> {
        let download_error = |reason: String| CdlError::Download { url: url.to_string(), reason };

        let mut response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                download_error(format!("timed out after {}s", self.timeout.as_secs()))
            } else {
                download_error(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(download_error(format!("HTTP {}", response.status())));
        }

        let bytes = write_file(&mut response, archive).map_err(|e| {
            let _ = fs::remove_file(archive);
            download_error(e.to_string())
        })?;

        tracing::info!(url, path = %archive.display(), bytes, "Downloaded archive");
        Ok(())
    }
}

/// Stream `reader` into a new file at `path`.
///
/// The buffer is flushed before returning so a failed final write is
/// reported instead of lost on drop.
fn write_file(reader: &mut impl Read, path: &Path) -> io::Result<u64> {
    let mut out = BufWriter::new(File::create(path)?);
    let bytes = io::copy(reader, &mut out)?;
    out.flush()?;
    Ok(bytes)
}

/// File name of the archive behind `url`
fn archive_name(url: &str) -> Option<&str> {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
}

impl ArchiveFetcher for HttpArchiveFetcher {
    fn fetch_and_verify(
        &self,
        url: &str,
        destination: &Path,
        checksum: Option<&str>,
    ) -> Result<()> {
        let name = archive_name(url).ok_or_else(|| CdlError::Download {
            url: url.to_string(),
            reason: "URL has no file name".to_string(),
        })?;
        fs::create_dir_all(destination)?;
        let archive = destination.join(name);

        if Md5Verifier.check_integrity(&archive, checksum) {
            tracing::debug!(path = %archive.display(), "Archive already present");
        } else {
            self.download(url, &archive)?;

            if let Some(expected) = checksum {
                let actual = calculate_md5(&archive)?;
                if !actual.eq_ignore_ascii_case(expected) {
                    let _ = fs::remove_file(&archive);
                    return Err(CdlError::ChecksumMismatch {
                        path: archive,
                        expected: expected.to_string(),
                        actual,
                    });
                }
            }
        }

        let extracted = extract_archive(&archive, destination)?;
        tracing::info!(path = %archive.display(), files = extracted.len(), "Extracted archive");
        Ok(())
    }
}

/// Extract every entry of a ZIP archive below `destination`.
///
/// Entries whose names would escape `destination` are rejected.
pub fn extract_archive(archive: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    let archive_error = |reason: String| CdlError::Archive { path: archive.to_path_buf(), reason };

    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| archive_error(e.to_string()))?;

    let mut extracted = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| archive_error(e.to_string()))?;

        let relative = entry
            .enclosed_name()
            .ok_or_else(|| archive_error(format!("unsafe entry name '{}'", entry.name())))?;
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        write_file(&mut entry, &target)?;
        extracted.push(target);
    }

    Ok(extracted)
}
