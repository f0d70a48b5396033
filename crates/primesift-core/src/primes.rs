//! Candidate prime discovery and loading.
//!
//! A prime directory holds binary files, each a flat array of 8-byte
//! little-endian `u64` records. File contents are trusted (primality is the
//! generator's job, not ours); a trailing partial record is ignored with a
//! warning.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::Error;

/// List the prime files in `dir`, sorted by file name so sweep order is
/// reproducible across filesystems. Subdirectories are skipped.
pub fn list_prime_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every prime from one file.
pub fn load_primes(path: &Path) -> Result<Vec<u64>, Error> {
    let bytes = fs::read(path)?;
    let tail = bytes.len() % 8;
    if tail != 0 {
        warn!(
            "{}: {tail} trailing bytes are not a full u64 record; ignoring them",
            path.display()
        );
    }

    let primes = bytes
        .chunks_exact(8)
        .map(|c| u64::from_le_bytes(c.try_into().expect("chunks_exact yields 8-byte chunks")))
        .collect();
    Ok(primes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_primes_little_endian() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("primes.bin");
        let mut f = fs::File::create(&path).unwrap();
        for p in [2u64, 3, 5, 0xff51afd7ed558ccd] {
            f.write_all(&p.to_le_bytes()).unwrap();
        }
        drop(f);

        let primes = load_primes(&path).unwrap();
        assert_eq!(primes, vec![2, 3, 5, 0xff51afd7ed558ccd]);
    }

    #[test]
    fn test_load_primes_ignores_trailing_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("primes.bin");
        let mut data = 7u64.to_le_bytes().to_vec();
        data.extend_from_slice(&[1, 2, 3]); // partial record
        fs::write(&path, data).unwrap();

        assert_eq!(load_primes(&path).unwrap(), vec![7]);
    }

    #[test]
    fn test_list_prime_files_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.bin"), []).unwrap();
        fs::write(tmp.path().join("a.bin"), []).unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let files = list_prime_files(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.bin", "b.bin"]);
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        assert!(matches!(
            list_prime_files(Path::new("/nonexistent/primes")),
            Err(Error::Io(_))
        ));
    }
}
