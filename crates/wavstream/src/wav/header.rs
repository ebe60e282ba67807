//! Canonical 44-byte PCM header encoding and decoding.

use std::io::{self, Read, Write};

use crate::error::{WavError, WavResult};

use super::format::WavFormat;

/// Size of the canonical PCM header in bytes.
pub const HEADER_SIZE: usize = 44;

/// Offset of the first sample byte.
pub const DATA_OFFSET: u64 = HEADER_SIZE as u64;

/// Header bytes counted by the RIFF chunk size (everything after "RIFF" and the size itself).
const RIFF_OVERHEAD: u32 = (HEADER_SIZE - 8) as u32;

/// Largest payload whose RIFF chunk size still fits in 32 bits.
pub const MAX_DATA_SIZE: u32 = u32::MAX - RIFF_OVERHEAD;

const FMT_CHUNK_SIZE: u32 = 16;
const PCM_FORMAT_TAG: u16 = 1;

/// A canonical PCM WAV header: format parameters plus payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Format parameters.
    pub format: WavFormat,
    /// Payload length in bytes (Subchunk2Size).
    pub data_size: u32,
}

impl WavHeader {
    /// Creates a header for `data_size` payload bytes.
    pub fn new(format: WavFormat, data_size: u32) -> Self {
        Self { format, data_size }
    }

    /// RIFF chunk size: total file size minus the leading 8 bytes.
    pub fn chunk_size(&self) -> u32 {
        self.data_size.wrapping_add(RIFF_OVERHEAD)
    }

    /// Total file size described by this header.
    pub fn file_size(&self) -> u64 {
        DATA_OFFSET + self.data_size as u64
    }

    /// Serializes the header. All multi-byte fields are little-endian.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let format = &self.format;
        let mut bytes = [0u8; HEADER_SIZE];

        // RIFF header
        bytes[0..4].copy_from_slice(b"RIFF");
        bytes[4..8].copy_from_slice(&self.chunk_size().to_le_bytes());
        bytes[8..12].copy_from_slice(b"WAVE");

        // fmt chunk
        bytes[12..16].copy_from_slice(b"fmt ");
        bytes[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        bytes[20..22].copy_from_slice(&PCM_FORMAT_TAG.to_le_bytes());
        bytes[22..24].copy_from_slice(&format.channels.to_le_bytes());
        bytes[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
        bytes[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
        bytes[32..34].copy_from_slice(&format.block_align().to_le_bytes());
        bytes[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

        // data chunk
        bytes[36..40].copy_from_slice(b"data");
        bytes[40..44].copy_from_slice(&self.data_size.to_le_bytes());

        bytes
    }

    /// Writes the header in a single `write_all`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    /// Parses a canonical header from the first 44 bytes of `data`.
    ///
    /// Only the exact layout produced by [`WavHeader::to_bytes`] is accepted:
    /// extended fmt chunks, non-PCM tags, and extra chunks before "data" are
    /// rejected.
    pub fn parse(data: &[u8]) -> WavResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(WavError::malformed(
                data.len(),
                format!("need {} bytes, got {}", HEADER_SIZE, data.len()),
            ));
        }

        expect_tag(data, 0, b"RIFF")?;
        expect_tag(data, 8, b"WAVE")?;
        expect_tag(data, 12, b"fmt ")?;

        let fmt_size = read_u32(data, 16);
        if fmt_size != FMT_CHUNK_SIZE {
            return Err(WavError::malformed(
                16,
                format!("fmt chunk size {} (expected {})", fmt_size, FMT_CHUNK_SIZE),
            ));
        }

        let format_tag = read_u16(data, 20);
        if format_tag != PCM_FORMAT_TAG {
            return Err(WavError::malformed(
                20,
                format!("audio format {} is not PCM", format_tag),
            ));
        }

        let format = WavFormat {
            channels: read_u16(data, 22),
            sample_rate: read_u32(data, 24),
            bits_per_sample: read_u16(data, 34),
        };

        let byte_rate = read_u32(data, 28);
        if byte_rate != format.byte_rate() {
            return Err(WavError::malformed(
                28,
                format!("byte rate {} (expected {})", byte_rate, format.byte_rate()),
            ));
        }
        let block_align = read_u16(data, 32);
        if block_align != format.block_align() {
            return Err(WavError::malformed(
                32,
                format!(
                    "block align {} (expected {})",
                    block_align,
                    format.block_align()
                ),
            ));
        }

        expect_tag(data, 36, b"data")?;
        let header = Self::new(format, read_u32(data, 40));

        let chunk_size = read_u32(data, 4);
        if chunk_size != header.chunk_size() {
            return Err(WavError::malformed(
                4,
                format!(
                    "RIFF size {} disagrees with data size {}",
                    chunk_size, header.data_size
                ),
            ));
        }

        Ok(header)
    }

    /// Reads and parses a header from the start of a stream.
    pub fn read_from<R: Read>(reader: &mut R) -> WavResult<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader.read_exact(&mut bytes).map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                WavError::malformed(0, "stream ends inside the header")
            } else {
                WavError::Read(err)
            }
        })?;
        Self::parse(&bytes)
    }
}

fn expect_tag(data: &[u8], offset: usize, tag: &[u8; 4]) -> WavResult<()> {
    let found = &data[offset..offset + 4];
    if found != tag {
        return Err(WavError::malformed(
            offset,
            format!(
                "expected '{}', got {:?}",
                String::from_utf8_lossy(tag),
                found
            ),
        ));
    }
    Ok(())
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
