//! Error type shared by the statistics core and its I/O collaborators.

use std::fmt;
use std::io;

/// Errors produced by primesift-core.
///
/// The statistics core itself is pure; `InvalidKeyLength` and `EmptyTally`
/// are contract violations by the caller, while `Io` and `BadRecordLength`
/// surface collaborator failures (missing files, short reads, corrupt data
/// files) that are unrecoverable setup errors for a run.
#[derive(Debug)]
pub enum Error {
    /// A key was ingested with a byte length outside 1..=8.
    InvalidKeyLength { len: usize },
    /// A summary was requested for a tally with zero observations.
    EmptyTally,
    /// A record slice did not have the fixed record size.
    BadRecordLength { len: usize },
    /// Underlying I/O failure from a collaborator.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { len } => {
                write!(f, "invalid key length {len} (expected 1..=8 bytes)")
            }
            Error::EmptyTally => {
                write!(f, "cannot summarize a tally with zero observations")
            }
            Error::BadRecordLength { len } => {
                write!(
                    f,
                    "record slice is {len} bytes (expected {})",
                    crate::codec::RECORD_BYTES
                )
            }
            Error::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_key_length() {
        let e = Error::InvalidKeyLength { len: 9 };
        assert!(e.to_string().contains("9"));
        assert!(e.to_string().contains("1..=8"));
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;
        let e = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(e.source().is_some());
        assert!(Error::EmptyTally.source().is_none());
    }
}
