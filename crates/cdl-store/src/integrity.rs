//! MD5 integrity verification of release archives

use cdl_core::error::Result;
use cdl_core::ports::IntegrityVerifier;
use md5::{Digest, Md5};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 64 * 1024;

/// Calculate the MD5 hash of a file as lowercase hex
pub fn calculate_md5(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hash = hasher.finalize();
    Ok(hash.iter().map(|byte| format!("{:02x}", byte)).collect())
}

/// Verifier checking presence and, when asked, the MD5 digest of a file
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Verifier;

impl Md5Verifier {
    pub fn new() -> Self {
        Self
    }
}

impl IntegrityVerifier for Md5Verifier {
    fn check_integrity(&self, path: &Path, checksum: Option<&str>) -> bool {
        if !path.is_file() {
            return false;
        }

        let Some(expected) = checksum else {
            return true;
        };

        match calculate_md5(path) {
            Ok(actual) if actual.eq_ignore_ascii_case(expected) => true,
            Ok(actual) => {
                tracing::warn!(
                    path = %path.display(),
                    expected,
                    actual = %actual,
                    "Checksum mismatch"
                );
                false
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot hash file");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_calculate_md5_known_vectors() {
        let empty = file_with(b"");
        let hello = file_with(b"hello world");

        assert_eq!(calculate_md5(empty.path()).unwrap(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(calculate_md5(hello.path()).unwrap(), "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn test_calculate_md5_spans_buffers() {
        let large = file_with(&vec![7u8; BUFFER_SIZE * 2 + 17]);
        let hash = calculate_md5(large.path()).unwrap();

        assert_eq!(hash.len(), 32);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_verifier() {
        let file = file_with(b"hello world");
        let verifier = Md5Verifier::new();

        assert!(verifier.check_integrity(file.path(), None));
        assert!(verifier.check_integrity(file.path(), Some("5eb63bbbe01eeed093cb22bb8f5acdc3")));
        assert!(verifier.check_integrity(file.path(), Some("5EB63BBBE01EEED093CB22BB8F5ACDC3")));
        assert!(!verifier.check_integrity(file.path(), Some("d41d8cd98f00b204e9800998ecf8427e")));
    }

    #[test]
    fn test_verifier_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = Md5Verifier::new();

        assert!(!verifier.check_integrity(&dir.path().join("2015_30m_cdls.zip"), None));
        assert!(!verifier.check_integrity(dir.path(), None));
    }
}
