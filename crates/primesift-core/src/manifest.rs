//! Run manifest written alongside the binary data file.
//!
//! The record stream itself carries no header, so each run writes a
//! `<output>.meta.json` describing what produced it: run id, timing, the
//! configuration in effect, and totals. The manifest is advisory; readers
//! of the data file never need it.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Metadata for one sweep run, serialized as pretty JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub version: u32,
    pub id: String,
    pub started_at: String,
    pub ended_at: String,
    pub duration_ms: u64,
    /// Path of the data file this manifest describes.
    pub output: String,
    /// Prime files swept, in order.
    pub prime_files: Vec<String>,
    pub primes_total: u64,
    pub records_written: u64,
    pub max_keys: usize,
    pub threads: usize,
    /// True when the run was stopped by SIGINT; the data file still ends
    /// on a record boundary.
    pub interrupted: bool,
    pub primesift_version: String,
}

impl RunManifest {
    /// A fresh manifest with a random run id; timing fields are filled by
    /// the caller as the run progresses.
    pub fn new(output: &str, max_keys: usize, threads: usize) -> Self {
        Self {
            version: 1,
            id: Uuid::new_v4().to_string(),
            started_at: String::new(),
            ended_at: String::new(),
            duration_ms: 0,
            output: output.to_string(),
            prime_files: Vec::new(),
            primes_total: 0,
            records_written: 0,
            max_keys,
            threads,
            interrupted: false,
            primesift_version: crate::VERSION.to_string(),
        }
    }

    /// Manifest path for a given data file: `<output>.meta.json`.
    pub fn path_for(output: &Path) -> std::path::PathBuf {
        let mut name = output.as_os_str().to_os_string();
        name.push(".meta.json");
        std::path::PathBuf::from(name)
    }

    /// Write the manifest next to its data file.
    pub fn write(&self, output: &Path) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;
        std::fs::write(Self::path_for(output), json)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Timestamp helpers
// ---------------------------------------------------------------------------

/// Format a duration-since-epoch as an ISO-8601 UTC timestamp.
/// Example: `2026-02-15T01:30:00Z`
pub fn format_iso8601(since_epoch: Duration) -> String {
    let secs = since_epoch.as_secs();
    let (year, month, day, hour, min, sec) = secs_to_utc(secs);
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{min:02}:{sec:02}Z")
}

/// Convert seconds since Unix epoch to (year, month, day, hour, minute,
/// second) UTC. Gregorian civil-from-days over 400-year eras; no leap
/// second handling.
fn secs_to_utc(secs: u64) -> (u64, u64, u64, u64, u64, u64) {
    let sec = secs % 60;
    let min = (secs / 60) % 60;
    let hour = (secs / 3600) % 24;

    // shift so day 0 is 0000-03-01: eras then align on leap-cycle
    // boundaries and leap days land at the end of the March-based year
    let z = secs / 86400 + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097; // day of era
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // March-based day of year
    let mp = (5 * doy + 2) / 153; // March-based month
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = era * 400 + yoe + u64::from(month <= 2);

    (year, month, day, hour, min, sec)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_iso8601_epoch() {
        assert_eq!(format_iso8601(Duration::from_secs(0)), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_secs_to_utc_known_date() {
        // 2000-01-01 00:00:00 UTC
        assert_eq!(secs_to_utc(946684800), (2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_secs_to_utc_leap_day() {
        // 2024-02-29 00:00:00 UTC
        assert_eq!(secs_to_utc(1709164800), (2024, 2, 29, 0, 0, 0));
        // and the day after
        assert_eq!(secs_to_utc(1709164800 + 86400), (2024, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_secs_to_utc_century_non_leap() {
        // 2100 is not a leap year: 2100-02-28 23:59:59 rolls to 03-01
        // 2100-03-01 00:00:00 UTC = 4107542400
        assert_eq!(secs_to_utc(4107542400), (2100, 3, 1, 0, 0, 0));
        assert_eq!(secs_to_utc(4107542400 - 1), (2100, 2, 28, 23, 59, 59));
    }

    #[test]
    fn test_format_iso8601_time_of_day() {
        // 2026-02-15 01:30:00 UTC
        assert_eq!(
            format_iso8601(Duration::from_secs(1771119000)),
            "2026-02-15T01:30:00Z"
        );
    }

    #[test]
    fn test_manifest_path_for() {
        let p = RunManifest::path_for(Path::new("out/sift.data"));
        assert_eq!(p, Path::new("out/sift.data.meta.json"));
    }

    #[test]
    fn test_manifest_write_and_parse() {
        let tmp = tempfile::tempdir().unwrap();
        let data_path = tmp.path().join("sift.data");

        let mut m = RunManifest::new("sift.data", 10_000, 4);
        m.started_at = format_iso8601(Duration::from_secs(0));
        m.ended_at = format_iso8601(Duration::from_secs(60));
        m.duration_ms = 60_000;
        m.primes_total = 4096;
        m.records_written = 4096;
        m.write(&data_path).unwrap();

        let json = std::fs::read_to_string(RunManifest::path_for(&data_path)).unwrap();
        let back: RunManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.version, 1);
        assert_eq!(back.records_written, 4096);
        assert_eq!(back.id, m.id);
        assert!(!back.interrupted);
    }
}
