//! Error types for the WAV writer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for WAV operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that can occur while writing or reading WAV streams.
#[derive(Debug, Error)]
pub enum WavError {
    /// The destination could not be opened for read-write.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Seeking the sink to an absolute offset failed.
    #[error("failed to seek to offset {offset}: {source}")]
    Seek {
        /// Target offset from the start of the sink.
        offset: u64,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing bytes to the sink failed.
    #[error("failed to write to sink: {0}")]
    Write(#[source] io::Error),

    /// Reading bytes back from a source failed.
    #[error("failed to read from source: {0}")]
    Read(#[source] io::Error),

    /// Flushing and releasing the sink failed.
    #[error("failed to close sink: {0}")]
    Close(#[source] io::Error),

    /// No destination is bound to the writer.
    #[error("no destination bound; call set_file or set_sink first")]
    NotBound,

    /// A destination is already bound and has not been finalized.
    #[error("a destination is already bound and not finalized")]
    AlreadyBound,

    /// The payload would no longer fit in the 32-bit size fields.
    #[error("payload too large: {current} bytes written, {requested} more requested")]
    DataTooLarge {
        /// Bytes already written.
        current: u32,
        /// Bytes in the rejected write.
        requested: usize,
    },

    /// Invalid format parameter.
    #[error("invalid format parameter '{field}': {message}")]
    InvalidFormat {
        /// Parameter name.
        field: &'static str,
        /// Error message.
        message: String,
    },

    /// Bytes do not form a canonical 44-byte PCM header.
    #[error("malformed header at offset {offset}: {message}")]
    MalformedHeader {
        /// Byte offset of the offending field.
        offset: usize,
        /// Error message.
        message: String,
    },

    /// Format configuration could not be parsed or serialized.
    #[error("format config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl WavError {
    /// Creates an invalid format error.
    pub fn invalid_format(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            message: message.into(),
        }
    }

    /// Creates a malformed header error.
    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            offset,
            message: message.into(),
        }
    }

    /// Returns the stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::Open { .. } => "WAV_001",
            WavError::Seek { .. } => "WAV_002",
            WavError::Write(_) => "WAV_003",
            WavError::Close(_) => "WAV_004",
            WavError::NotBound => "WAV_005",
            WavError::AlreadyBound => "WAV_006",
            WavError::DataTooLarge { .. } => "WAV_007",
            WavError::InvalidFormat { .. } => "WAV_008",
            WavError::MalformedHeader { .. } => "WAV_009",
            WavError::Config(_) => "WAV_010",
            WavError::Read(_) => "WAV_011",
        }
    }

    /// Returns the error category used for grouping.
    pub fn category(&self) -> &'static str {
        "wav"
    }

    /// Returns the kind of the underlying I/O error, if this is an I/O failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            WavError::Open { source, .. } | WavError::Seek { source, .. } => Some(source.kind()),
            WavError::Write(source) | WavError::Read(source) | WavError::Close(source) => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}
