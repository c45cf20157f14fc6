use std::path::Path;

use crate::error::Result;

/// Port for checking that a file is present and, optionally, matches a checksum
pub trait IntegrityVerifier: Send + Sync {
    /// False when the file is absent or the checksum does not match.
    /// A `None` checksum only checks presence.
    fn check_integrity(&self, path: &Path, checksum: Option<&str>) -> bool;
}

/// Port for downloading and extracting a release archive
pub trait ArchiveFetcher: Send + Sync {
    /// Download `url` into `destination`, verify it when a checksum is
    /// given, and extract it in place
    fn fetch_and_verify(&self, url: &str, destination: &Path, checksum: Option<&str>)
        -> Result<()>;
}

impl<T: IntegrityVerifier + ?Sized> IntegrityVerifier for &T {
    fn check_integrity(&self, path: &Path, checksum: Option<&str>) -> bool {
        (**self).check_integrity(path, checksum)
    }
}

impl<T: ArchiveFetcher + ?Sized> ArchiveFetcher for &T {
    fn fetch_and_verify(&self, url: &str, destination: &Path, checksum: Option<&str>)
        -> Result<()> {
        (**self).fetch_and_verify(url, destination, checksum)
    }
}
