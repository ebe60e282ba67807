//! Independent WAV container validator.
//!
//! Walks the RIFF chunk list without using the library's own header codec,
//! so tests check written files against a second reading of the format.

use std::fmt;

/// Error type for format validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// Description of what went wrong.
    pub message: String,
    /// Byte offset where the error occurred, if applicable.
    pub offset: Option<usize>,
}

impl FormatError {
    /// Create a new format error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
        }
    }

    /// Create a format error with a byte offset.
    pub fn at_offset(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset: Some(offset),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(offset) = self.offset {
            write!(f, "WAV error at offset {}: {}", offset, self.message)
        } else {
            write!(f, "WAV error: {}", self.message)
        }
    }
}

impl std::error::Error for FormatError {}

/// Information extracted from a WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    /// Value of the RIFF chunk size field.
    pub riff_size: u32,
    /// Audio format code (1 = PCM).
    pub audio_format: u16,
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Byte rate field.
    pub byte_rate: u32,
    /// Block alignment field.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Offset of the first payload byte.
    pub data_offset: usize,
    /// Value of the data chunk size field.
    pub data_size: u32,
}

impl WavInfo {
    /// Number of complete frames in the payload.
    pub fn num_frames(&self) -> usize {
        match self.block_align {
            0 => 0,
            align => self.data_size as usize / align as usize,
        }
    }
}

/// Validate WAV file structure and extract header information.
///
/// Checks:
/// - RIFF and WAVE identifiers
/// - RIFF size equals the file length minus 8
/// - fmt chunk precedes the data chunk
/// - data chunk fits inside the file
pub fn validate_wav(data: &[u8]) -> Result<WavInfo, FormatError> {
    const MIN_HEADER_SIZE: usize = 44;

    if data.len() < MIN_HEADER_SIZE {
        return Err(FormatError::new(format!(
            "File too short: {} bytes (minimum {} required)",
            data.len(),
            MIN_HEADER_SIZE
        )));
    }
    if &data[0..4] != b"RIFF" {
        return Err(FormatError::at_offset("Invalid RIFF header", 0));
    }
    if &data[8..12] != b"WAVE" {
        return Err(FormatError::at_offset("Invalid WAVE format", 8));
    }

    let riff_size = le_u32(data, 4);
    if riff_size as usize != data.len() - 8 {
        return Err(FormatError::at_offset(
            format!(
                "RIFF size {} does not match file length {} - 8",
                riff_size,
                data.len()
            ),
            4,
        ));
    }

    let mut offset = 12;
    let mut fmt: Option<[u8; 16]> = None;

    while offset + 8 <= data.len() {
        let chunk_id = &data[offset..offset + 4];
        let chunk_size = le_u32(data, offset + 4);
        let body = offset + 8;

        if chunk_id == b"fmt " {
            if chunk_size < 16 || body + 16 > data.len() {
                return Err(FormatError::at_offset("Truncated fmt chunk", offset));
            }
            let mut fields = [0u8; 16];
            fields.copy_from_slice(&data[body..body + 16]);
            fmt = Some(fields);
        }

        if chunk_id == b"data" {
            let Some(fields) = fmt else {
                return Err(FormatError::at_offset(
                    "data chunk found before fmt chunk",
                    offset,
                ));
            };
            if body + chunk_size as usize > data.len() {
                return Err(FormatError::at_offset("data chunk overruns file", offset));
            }
            return Ok(WavInfo {
                riff_size,
                audio_format: le_u16(&fields, 0),
                channels: le_u16(&fields, 2),
                sample_rate: le_u32(&fields, 4),
                byte_rate: le_u32(&fields, 8),
                block_align: le_u16(&fields, 12),
                bits_per_sample: le_u16(&fields, 14),
                data_offset: body,
                data_size: chunk_size,
            });
        }

        // Chunks are word-aligned
        let padded_size = (chunk_size as usize + 1) & !1;
        offset = body + padded_size;
    }

    if fmt.is_none() {
        return Err(FormatError::new("Missing fmt chunk"));
    }
    Err(FormatError::new("Missing data chunk"))
}

/// Returns the payload bytes of a valid WAV file.
pub fn pcm_payload(data: &[u8]) -> Result<&[u8], FormatError> {
    let info = validate_wav(data)?;
    Ok(&data[info.data_offset..info.data_offset + info.data_size as usize])
}

fn le_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn le_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
