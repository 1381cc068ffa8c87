//! Error types for cutpoint.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a [`ChunkError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Size bounds were invalid or out of order.
    Configuration,
    /// The byte source could not be opened or a read failed.
    SourceRead,
    /// The output directory or a chunk file could not be written.
    OutputWrite,
    /// The background task running the pass did not complete.
    Task,
}

/// Errors that can occur during chunking operations.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// An I/O error occurred while reading input data.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The input file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The chunk store directory or a chunk file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        /// Directory or file that was being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A size option lies outside its accepted range.
    #[error("invalid value {value} for {name}, must be between {min} and {max}")]
    OutOfRange {
        /// Option name (`min_size`, `avg_size` or `max_size`).
        name: &'static str,
        /// Rejected value.
        value: usize,
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },

    /// The background task running a chunking pass failed.
    #[error("chunking task failed: {message}")]
    Task {
        /// Description reported by the runtime.
        message: String,
    },
}

impl ChunkError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChunkError::Io(_) | ChunkError::Open { .. } => ErrorKind::SourceRead,
            ChunkError::OutputWrite { .. } => ErrorKind::OutputWrite,
            ChunkError::InvalidConfig { .. } | ChunkError::OutOfRange { .. } => {
                ErrorKind::Configuration
            }
            ChunkError::Task { .. } => ErrorKind::Task,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChunkError::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "test");
        let err: ChunkError = io_err.into();
        assert!(matches!(err, ChunkError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::SourceRead);
    }

    #[test]
    fn test_kinds() {
        let open = ChunkError::Open {
            path: PathBuf::from("missing.bin"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(open.kind(), ErrorKind::SourceRead);

        let write = ChunkError::output("store", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(write.kind(), ErrorKind::OutputWrite);

        let cfg = ChunkError::InvalidConfig {
            message: "min_size cannot be greater than avg_size",
        };
        assert_eq!(cfg.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_display() {
        let err = ChunkError::OutOfRange {
            name: "avg_size",
            value: 100,
            min: 256,
            max: 268_435_456,
        };
        assert_eq!(
            err.to_string(),
            "invalid value 100 for avg_size, must be between 256 and 268435456"
        );

        let err = ChunkError::Open {
            path: PathBuf::from("data.bin"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("failed to open data.bin"));
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;

        let err = ChunkError::output("store/abc", io::Error::other("disk full"));
        let source = err.source().expect("output errors carry their cause");
        assert_eq!(source.to_string(), "disk full");
    }
}
