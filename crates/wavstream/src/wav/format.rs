//! WAV file format parameters.

use serde::{Deserialize, Serialize};

use crate::error::{WavError, WavResult};

/// Sample rate used when none is given (CD quality).
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Channel count used when none is given.
pub const DEFAULT_CHANNELS: u16 = 2;
/// Bit depth used when none is given.
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

/// WAV file format parameters.
///
/// Missing fields fall back to the CD-quality defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WavFormat {
    /// Sample rate in Hz, per channel.
    pub sample_rate: u32,
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Bits per sample, per channel.
    pub bits_per_sample: u16,
}

impl Default for WavFormat {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
        }
    }
}

impl WavFormat {
    /// Creates a format from explicit parameters.
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        Self {
            sample_rate,
            channels,
            bits_per_sample,
        }
    }

    /// Creates a 16-bit mono format.
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(sample_rate, 1, 16)
    }

    /// Creates a 16-bit stereo format.
    pub fn stereo(sample_rate: u32) -> Self {
        Self::new(sample_rate, 2, 16)
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per sample frame. Wraps like the 16-bit header field it fills.
    pub fn block_align(&self) -> u16 {
        self.channels.wrapping_mul(self.bytes_per_sample())
    }

    /// Bytes per second. Multiplied at full 32-bit width, not from the
    /// 16-bit block align, and wraps like the header field it fills.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate
            .wrapping_mul(self.channels as u32)
            .wrapping_mul(self.bytes_per_sample() as u32)
    }

    /// Returns true if `len` bytes hold a whole number of frames.
    pub fn is_frame_aligned(&self, len: usize) -> bool {
        match self.block_align() {
            0 => len == 0,
            align => len % align as usize == 0,
        }
    }

    /// Checks that the parameters describe a usable PCM stream.
    ///
    /// The writer itself never calls this; it is applied when loading a
    /// format from configuration.
    pub fn validate(&self) -> WavResult<()> {
        if self.sample_rate == 0 {
            return Err(WavError::invalid_format("sample_rate", "must be non-zero"));
        }
        if self.channels == 0 {
            return Err(WavError::invalid_format("channels", "must be at least 1"));
        }
        if self.bits_per_sample == 0 || self.bits_per_sample % 8 != 0 {
            return Err(WavError::invalid_format(
                "bits_per_sample",
                format!("{} is not a non-zero multiple of 8", self.bits_per_sample),
            ));
        }
        if self.channels.checked_mul(self.bytes_per_sample()).is_none() {
            return Err(WavError::invalid_format(
                "channels",
                "frame size does not fit in 16 bits",
            ));
        }
        Ok(())
    }

    /// Parses and validates a format from JSON.
    ///
    /// ```
    /// use wavstream::WavFormat;
    ///
    /// let format = WavFormat::from_json(r#"{ "sample_rate": 8000, "channels": 1 }"#).unwrap();
    /// assert_eq!(format, WavFormat::new(8000, 1, 16));
    /// ```
    pub fn from_json(json: &str) -> WavResult<Self> {
        let format: WavFormat = serde_json::from_str(json)?;
        format.validate()?;
        Ok(format)
    }

    /// Serializes the format to pretty-printed JSON.
    pub fn to_json(&self) -> WavResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
