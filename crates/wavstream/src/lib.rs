//! wavstream
//!
//! A streaming writer for uncompressed PCM audio in a canonical RIFF/WAVE
//! container.
//!
//! # Overview
//!
//! The header of a WAV file records the payload length, which a streaming
//! producer does not know up front. [`WavWriter`] reserves the 44-byte header
//! region when a destination is bound, appends sample bytes as they arrive,
//! and writes the real header on [`WavWriter::finalize`]. Sample data always
//! starts at byte 44, so nothing is buffered in memory.
//!
//! # Example
//!
//! ```no_run
//! use wavstream::{WavFormat, WavWriter};
//!
//! let mut writer = WavWriter::create("out.wav", WavFormat::default())?;
//! for chunk in [[0u8; 4]; 16] {
//!     writer.write_samples(&chunk)?;
//! }
//! writer.finalize()?;
//! # Ok::<(), wavstream::WavError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`WavWriter`] - Streaming writer over any `Write + Seek` sink
//! - [`WavHeader`] - Canonical header encoding and parsing
//! - [`WavFormat`] - Sample rate, channel count and bit depth
//! - [`error`] - Error type with stable codes

pub mod error;
pub mod wav;

pub use error::{WavError, WavResult};
pub use wav::{
    WavFormat, WavHeader, WavWriter, DATA_OFFSET, DEFAULT_BITS_PER_SAMPLE, DEFAULT_CHANNELS,
    DEFAULT_SAMPLE_RATE, HEADER_SIZE, MAX_DATA_SIZE,
};
