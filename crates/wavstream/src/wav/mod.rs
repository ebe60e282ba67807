//! Streaming PCM WAV writer.
//!
//! The stream layout is fixed: a canonical 44-byte header followed directly
//! by interleaved little-endian sample data. The header is written last, once
//! the payload length is known.

mod format;
mod header;
mod writer;


// Re-export public API
pub use format::{WavFormat, DEFAULT_BITS_PER_SAMPLE, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
pub use header::{WavHeader, DATA_OFFSET, HEADER_SIZE, MAX_DATA_SIZE};
pub use writer::WavWriter;
