//! Record stream storage: batch append writer and read-only record file.
//!
//! The data file is a flat array of fixed-size records (`file_len /
//! RECORD_BYTES` of them) with no header or framing. The writer buffers
//! encoded records and appends them in batches; unlike the historical tool
//! it also flushes a final partial batch, so no records are lost at end of
//! input. The reader loads the file into an owned buffer and hands out
//! bounds-checked record slices.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::codec::{RECORD_BYTES, decode_record, encode_into};
use crate::error::Error;
use crate::record::PrimeRecord;

/// Default number of records buffered per append.
pub const DEFAULT_BATCH_LEN: usize = 4096;

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Appends encoded [`PrimeRecord`]s to a data file in fixed-size batches.
pub struct RecordWriter {
    file: File,
    path: PathBuf,
    batch: Vec<u8>,
    batch_len: usize,
    pending: usize,
    written: u64,
}

impl RecordWriter {
    /// Open `path` for appending (created if absent). `batch_len` is the
    /// number of records buffered before each write.
    pub fn create(path: &Path, batch_len: usize) -> Result<Self, Error> {
        let file = File::options().append(true).create(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            batch: Vec::with_capacity(batch_len.max(1) * RECORD_BYTES),
            batch_len: batch_len.max(1),
            pending: 0,
            written: 0,
        })
    }

    /// Buffer one record, appending the batch to disk when full.
    pub fn append(&mut self, rec: &PrimeRecord) -> Result<(), Error> {
        encode_into(rec, &mut self.batch);
        self.pending += 1;
        if self.pending == self.batch_len {
            self.flush_batch()?;
        }
        Ok(())
    }

    fn flush_batch(&mut self) -> Result<(), Error> {
        if self.pending == 0 {
            return Ok(());
        }
        self.file.write_all(&self.batch)?;
        self.file.flush()?;
        debug!(
            "{}: appended {} records ({} bytes)",
            self.path.display(),
            self.pending,
            self.batch.len()
        );
        self.written += self.pending as u64;
        self.pending = 0;
        self.batch.clear();
        Ok(())
    }

    /// Records written to disk so far (excludes the pending batch).
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush any partial batch and return the total record count.
    pub fn finish(mut self) -> Result<u64, Error> {
        self.flush_batch()?;
        Ok(self.written)
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// A loaded record file: an owned buffer viewed as an array of fixed-size
/// records.
pub struct RecordFile {
    data: Vec<u8>,
    count: usize,
}

impl RecordFile {
    /// Read `path` fully into memory. A trailing partial record is ignored
    /// with a warning.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let data = fs::read(path)?;
        let tail = data.len() % RECORD_BYTES;
        if tail != 0 {
            warn!(
                "{}: {tail} trailing bytes are not a full record; ignoring them",
                path.display()
            );
        }
        let count = data.len() / RECORD_BYTES;
        Ok(Self { data, count })
    }

    /// Number of complete records in the file.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Total bytes loaded (including any ignored tail).
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// The raw bytes of record `idx`.
    pub fn record_bytes(&self, idx: usize) -> Option<&[u8]> {
        if idx >= self.count {
            return None;
        }
        let start = idx * RECORD_BYTES;
        self.data.get(start..start + RECORD_BYTES)
    }

    /// Decode record `idx`.
    pub fn record(&self, idx: usize) -> Option<PrimeRecord> {
        let bytes = self.record_bytes(idx)?;
        decode_record(bytes).ok()
    }

    /// Iterate over all decoded records.
    pub fn records(&self) -> impl Iterator<Item = PrimeRecord> + '_ {
        (0..self.count).filter_map(|i| self.record(i))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn finalized_record(prime: u64) -> PrimeRecord {
        let mut rec = PrimeRecord::new(prime);
        for len in 1..=8usize {
            for k in 0u8..4 {
                rec.ingest(&vec![k; len]).unwrap();
            }
        }
        rec.finalize().unwrap();
        rec
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("records.data");

        let recs: Vec<_> = [11u64, 13, 17].iter().map(|&p| finalized_record(p)).collect();
        let mut w = RecordWriter::create(&path, 2).unwrap();
        for rec in &recs {
            w.append(rec).unwrap();
        }
        let written = w.finish().unwrap();
        assert_eq!(written, 3);

        let f = RecordFile::open(&path).unwrap();
        assert_eq!(f.count(), 3);
        assert_eq!(f.byte_len(), 3 * RECORD_BYTES);
        for (i, rec) in recs.iter().enumerate() {
            assert_eq!(&f.record(i).unwrap(), rec);
        }
        assert!(f.record(3).is_none());
    }

    #[test]
    fn test_partial_batch_is_flushed_on_finish() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("records.data");

        // batch_len 100, only 1 record: the tail must still land on disk
        let mut w = RecordWriter::create(&path, 100).unwrap();
        w.append(&finalized_record(31)).unwrap();
        assert_eq!(w.written(), 0); // still buffered
        assert_eq!(w.finish().unwrap(), 1);

        let f = RecordFile::open(&path).unwrap();
        assert_eq!(f.count(), 1);
        assert_eq!(f.record(0).unwrap().prime, 31);
    }

    #[test]
    fn test_append_mode_extends_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("records.data");

        let mut w = RecordWriter::create(&path, 1).unwrap();
        w.append(&finalized_record(3)).unwrap();
        w.finish().unwrap();

        let mut w = RecordWriter::create(&path, 1).unwrap();
        w.append(&finalized_record(5)).unwrap();
        w.finish().unwrap();

        let f = RecordFile::open(&path).unwrap();
        assert_eq!(f.count(), 2);
        assert_eq!(f.record(0).unwrap().prime, 3);
        assert_eq!(f.record(1).unwrap().prime, 5);
    }

    #[test]
    fn test_reader_ignores_trailing_garbage() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("records.data");

        let mut w = RecordWriter::create(&path, 1).unwrap();
        w.append(&finalized_record(7)).unwrap();
        w.finish().unwrap();

        // simulate a torn final write
        let mut data = fs::read(&path).unwrap();
        data.extend_from_slice(&[0u8; 100]);
        fs::write(&path, data).unwrap();

        let f = RecordFile::open(&path).unwrap();
        assert_eq!(f.count(), 1);
        assert_eq!(f.records().count(), 1);
    }
}
