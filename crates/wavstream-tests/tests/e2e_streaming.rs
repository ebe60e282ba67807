//! End-to-end tests for streaming WAV files to disk.
//!
//! Each test writes through `WavWriter` onto a real file and checks the
//! result with the independent validator in `wavstream_tests`.

use pretty_assertions::assert_eq;

use wavstream::{WavError, WavFormat, WavHeader, WavWriter, HEADER_SIZE};
use wavstream_tests::{pcm_payload, ramp_payload, validate_wav, WavFixture};

// ============================================================================
// Header layout
// ============================================================================

#[test]
fn test_mono_8bit_ten_bytes() {
    let fixture = WavFixture::new();
    let mut writer =
        WavWriter::create(fixture.destination("mono8"), WavFormat::new(8000, 1, 8)).unwrap();
    writer.write_samples(&ramp_payload(10)).unwrap();
    writer.finalize().unwrap();

    let wav = fixture.read("mono8");
    assert_eq!(wav.len(), 54);
    assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 46);
    assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 10);

    let info = validate_wav(&wav).unwrap();
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_rate, 8000);
    assert_eq!(info.byte_rate, 8000);
    assert_eq!(info.block_align, 1);
    assert_eq!(info.bits_per_sample, 8);
    assert_eq!(info.num_frames(), 10);
}

#[test]
fn test_default_format_empty_file() {
    let fixture = WavFixture::new();
    let mut writer: WavWriter = WavWriter::default();
    writer.set_file(fixture.destination("empty")).unwrap();
    writer.finalize().unwrap();

    let wav = fixture.read("empty");
    assert_eq!(wav.len(), HEADER_SIZE);
    assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);

    let info = validate_wav(&wav).unwrap();
    assert_eq!(info.riff_size, 36);
    assert_eq!(info.data_size, 0);
    assert_eq!(info.sample_rate, 44100);
    assert_eq!(info.channels, 2);
}

#[test]
fn test_payload_is_stored_untouched() {
    let fixture = WavFixture::new();
    let payload = ramp_payload(4096);

    let mut writer =
        WavWriter::create(fixture.destination("ramp"), WavFormat::stereo(48000)).unwrap();
    for chunk in payload.chunks(300) {
        assert_eq!(writer.write_samples(chunk).unwrap(), chunk.len());
    }
    writer.finalize().unwrap();

    let wav = fixture.read("ramp");
    assert_eq!(wav.len(), HEADER_SIZE + payload.len());
    assert_eq!(pcm_payload(&wav).unwrap(), payload.as_slice());
}

#[test]
fn test_header_round_trips_through_parser() {
    let fixture = WavFixture::new();
    let format = WavFormat::new(96000, 6, 24);

    let mut writer = WavWriter::create(fixture.destination("surround"), format).unwrap();
    writer.write_samples(&ramp_payload(18 * 4)).unwrap();
    writer.finalize().unwrap();

    let header = WavHeader::parse(&fixture.read("surround")).unwrap();
    assert_eq!(header.format, format);
    assert_eq!(header.data_size, 72);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_drop_finalizes_unfinished_stream() {
    let fixture = WavFixture::new();
    {
        let mut writer =
            WavWriter::create(fixture.destination("scoped"), WavFormat::mono(22050)).unwrap();
        writer.write_samples(&ramp_payload(64)).unwrap();
    }

    let info = validate_wav(&fixture.read("scoped")).unwrap();
    assert_eq!(info.data_size, 64);
    assert_eq!(info.sample_rate, 22050);
}

#[test]
fn test_early_return_still_finalizes() {
    fn produce(path: &std::path::Path) -> Result<(), WavError> {
        let mut writer = WavWriter::create(path, WavFormat::mono(8000))?;
        writer.write_samples(&[1, 2, 3, 4])?;
        // Producer bails out before finalizing.
        Err(WavError::NotBound)
    }

    let fixture = WavFixture::new();
    let path = fixture.destination("bailed");
    assert!(produce(&path).is_err());

    let info = validate_wav(&fixture.read("bailed")).unwrap();
    assert_eq!(info.data_size, 4);
}

#[test]
fn test_one_writer_many_files() {
    let fixture = WavFixture::new();
    let mut writer: WavWriter = WavWriter::new(WavFormat::mono(16000));

    for (i, len) in [0usize, 10, 200].into_iter().enumerate() {
        let name = format!("take{}", i);
        writer.set_file(fixture.destination(&name)).unwrap();
        assert_eq!(writer.data_size(), 0);
        writer.write_samples(&ramp_payload(len)).unwrap();
        writer.finalize().unwrap();

        let info = validate_wav(&fixture.read(&name)).unwrap();
        assert_eq!(info.data_size as usize, len);
    }
}

#[test]
fn test_rebinding_open_stream_is_an_error() {
    let fixture = WavFixture::new();
    let mut writer = WavWriter::create(fixture.destination("first"), WavFormat::default()).unwrap();
    writer.write_samples(&[0; 4]).unwrap();

    let err = writer.set_file(fixture.destination("second")).unwrap_err();
    assert!(matches!(err, WavError::AlreadyBound));
    assert!(!fixture.destination("second").exists());

    writer.finalize().unwrap();
    assert_eq!(validate_wav(&fixture.read("first")).unwrap().data_size, 4);
}

#[test]
fn test_write_without_destination_fails() {
    let mut writer: WavWriter = WavWriter::new(WavFormat::default());
    let err = writer.write_samples(&[0; 4]).unwrap_err();
    assert_eq!(err.code(), "WAV_005");
    assert_eq!(writer.data_size(), 0);
}

#[test]
fn test_unopenable_destination_fails() {
    let fixture = WavFixture::new();
    // A directory cannot be opened as a writable file.
    let err = WavWriter::create(fixture.path(), WavFormat::default()).unwrap_err();
    assert!(matches!(err, WavError::Open { .. }));
    assert!(err.io_kind().is_some());
}

#[test]
fn test_format_from_config_drives_header() {
    let fixture = WavFixture::new();
    let format = WavFormat::from_json(
        r#"{ "sample_rate": 32000, "channels": 1, "bits_per_sample": 32 }"#,
    )
    .unwrap();

    let mut writer = WavWriter::create(fixture.destination("config"), format).unwrap();
    writer.write_samples(&ramp_payload(8)).unwrap();
    writer.finalize().unwrap();

    let info = validate_wav(&fixture.read("config")).unwrap();
    assert_eq!(info.byte_rate, 128000);
    assert_eq!(info.block_align, 4);
    assert_eq!(info.num_frames(), 2);
}
