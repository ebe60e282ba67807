//! Streaming WAV writer with a deferred header.
//!
//! The writer reserves the 44-byte header region when a sink is bound, streams
//! sample bytes straight after it, and fills in the header once the payload
//! length is known.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, error, trace, warn};

use crate::error::{WavError, WavResult};

use super::format::WavFormat;
use super::header::{WavHeader, DATA_OFFSET, MAX_DATA_SIZE};

/// Streaming writer for canonical PCM WAV files.
///
/// While a sink is bound and the stream is not finalized, the sink's cursor
/// sits at `44 + data_size`. Dropping an unfinalized writer finalizes it and
/// panics if that fails, so call [`WavWriter::finalize`] explicitly to handle
/// the error.
///
/// ```no_run
/// use wavstream::{WavFormat, WavWriter};
///
/// let mut writer = WavWriter::create("tone.wav", WavFormat::mono(8000))?;
/// writer.write_samples(&[0x80; 8000])?;
/// writer.finalize()?;
/// # Ok::<(), wavstream::WavError>(())
/// ```
pub struct WavWriter<W: Write + Seek = File> {
    sink: Option<W>,
    format: WavFormat,
    data_size: u32,
    finalized: bool,
}

impl<W: Write + Seek> WavWriter<W> {
    /// Creates a writer with no destination bound.
    pub fn new(format: WavFormat) -> Self {
        Self {
            sink: None,
            format,
            data_size: 0,
            finalized: false,
        }
    }

    /// Creates a writer bound to `sink`.
    pub fn with_sink(sink: W, format: WavFormat) -> WavResult<Self> {
        let mut writer = Self::new(format);
        writer.set_sink(sink)?;
        Ok(writer)
    }

    /// Binds a new sink and positions it just past the header region.
    ///
    /// The header bytes are not written until [`WavWriter::finalize`].
    /// Fails with [`WavError::AlreadyBound`] if the current sink has not been
    /// finalized yet.
    pub fn set_sink(&mut self, mut sink: W) -> WavResult<()> {
        if self.sink.is_some() {
            return Err(WavError::AlreadyBound);
        }

        sink.seek(SeekFrom::Start(DATA_OFFSET))
            .map_err(|source| WavError::Seek {
                offset: DATA_OFFSET,
                source,
            })?;

        self.sink = Some(sink);
        self.finalized = false;
        debug!(
            "bound WAV sink ({} Hz, {} ch, {} bit)",
            self.format.sample_rate, self.format.channels, self.format.bits_per_sample
        );
        Ok(())
    }

    /// Appends raw interleaved sample bytes.
    ///
    /// Returns the number of bytes the sink accepted. This is less than
    /// `samples.len()` only if the sink stopped accepting data. Frame
    /// alignment is not checked.
    pub fn write_samples(&mut self, samples: &[u8]) -> WavResult<usize> {
        let sink = self.sink.as_mut().ok_or(WavError::NotBound)?;

        if samples.len() > (MAX_DATA_SIZE - self.data_size) as usize {
            return Err(WavError::DataTooLarge {
                current: self.data_size,
                requested: samples.len(),
            });
        }

        let mut written = 0;
        let result = loop {
            if written == samples.len() {
                break Ok(());
            }
            match sink.write(&samples[written..]) {
                Ok(0) => {
                    warn!(
                        "WAV sink accepted {} of {} bytes",
                        written,
                        samples.len()
                    );
                    break Ok(());
                }
                Ok(n) => written += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => break Err(WavError::Write(err)),
            }
        };

        // Count what reached the sink even on failure so the cursor invariant holds.
        self.data_size += written as u32;
        trace!("wrote {} sample bytes ({} total)", written, self.data_size);
        result.map(|()| written)
    }

    /// Writes the final header and releases the sink.
    ///
    /// Returns the released sink, or `None` if no sink was bound. The writer
    /// counts as finalized and `data_size` is reset even if an I/O step
    /// fails; the sink is then dropped with its header still unwritten.
    ///
    /// "Close" here is `flush` plus giving up ownership: the sink is only
    /// dropped once the caller drops the returned value. `File::flush` is a
    /// no-op, so late write-back errors on files are not observed here; use
    /// [`WavWriter::finalize_and_sync`] to surface them.
    ///
    /// # Panics
    ///
    /// Panics if the writer was already finalized.
    pub fn finalize(&mut self) -> WavResult<Option<W>> {
        assert!(!self.finalized, "WavWriter finalized twice");
        self.finalized = true;

        let data_size = std::mem::take(&mut self.data_size);
        let Some(mut sink) = self.sink.take() else {
            return Ok(None);
        };

        let header = WavHeader::new(self.format, data_size);
        sink.seek(SeekFrom::Start(0))
            .map_err(|source| WavError::Seek { offset: 0, source })?;
        header.write_to(&mut sink).map_err(WavError::Write)?;
        sink.flush().map_err(WavError::Close)?;

        debug!("finalized WAV stream with {} data bytes", data_size);
        Ok(Some(sink))
    }

    /// Returns the format parameters the header will be written with.
    pub fn format(&self) -> WavFormat {
        self.format
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    /// Number of channels.
    pub fn num_channels(&self) -> u16 {
        self.format.channels
    }

    /// Bits per sample.
    pub fn bits_per_sample(&self) -> u16 {
        self.format.bits_per_sample
    }

    /// Replaces all format parameters.
    pub fn set_format(&mut self, format: WavFormat) {
        self.warn_if_streaming("format");
        self.format = format;
    }

    /// Sets the sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.warn_if_streaming("sample rate");
        self.format.sample_rate = sample_rate;
    }

    /// Sets the channel count.
    pub fn set_num_channels(&mut self, channels: u16) {
        self.warn_if_streaming("channel count");
        self.format.channels = channels;
    }

    /// Sets the bit depth.
    pub fn set_bits_per_sample(&mut self, bits_per_sample: u16) {
        self.warn_if_streaming("bit depth");
        self.format.bits_per_sample = bits_per_sample;
    }

    /// Payload bytes written since the sink was bound.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Returns true if a sink is bound and awaiting finalization.
    pub fn is_bound(&self) -> bool {
        self.sink.is_some()
    }

    /// Returns true once the current session has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Returns the bound sink, if any.
    pub fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    fn warn_if_streaming(&self, what: &str) {
        if self.data_size > 0 {
            warn!(
                "changing {} after {} sample bytes were written",
                what, self.data_size
            );
        }
    }
}

impl WavWriter<File> {
    /// Creates (or truncates) `path` and binds it.
    pub fn create(path: impl AsRef<Path>, format: WavFormat) -> WavResult<Self> {
        let mut writer = Self::new(format);
        writer.set_file(path)?;
        Ok(writer)
    }

    /// Opens `path` for read-write, creating or truncating it, and binds it.
    ///
    /// The file is not touched if another sink is still bound.
    pub fn set_file(&mut self, path: impl AsRef<Path>) -> WavResult<()> {
        if self.sink.is_some() {
            return Err(WavError::AlreadyBound);
        }

        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|source| WavError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("opened WAV destination {}", path.display());
        self.set_sink(file)
    }

    /// Finalizes, syncs the file to storage, and closes it.
    ///
    /// Unlike [`WavWriter::finalize`], the file handle is released before
    /// returning and write-back failures are reported as [`WavError::Close`].
    pub fn finalize_and_sync(&mut self) -> WavResult<()> {
        if let Some(file) = self.finalize()? {
            file.sync_all().map_err(WavError::Close)?;
        }
        Ok(())
    }
}

impl<W: Write + Seek> Default for WavWriter<W> {
    fn default() -> Self {
        Self::new(WavFormat::default())
    }
}

impl<W: Write + Seek> fmt::Debug for WavWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WavWriter")
            .field("format", &self.format)
            .field("data_size", &self.data_size)
            .field("bound", &self.sink.is_some())
            .field("finalized", &self.finalized)
            .finish()
    }
}

impl<W: Write + Seek> Drop for WavWriter<W> {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        if let Err(err) = self.finalize() {
            // A second panic while unwinding would abort the process.
            if std::thread::panicking() {
                error!("failed to finalize WAV stream during unwind: {}", err);
            } else {
                panic!("failed to finalize WAV stream on drop: {}", err);
            }
        }
    }
}
