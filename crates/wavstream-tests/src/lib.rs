//! wavstream End-to-End Test Infrastructure
//!
//! This crate checks files produced by the streaming writer against an
//! independent container validator:
//!
//! - **Layout**: 44-byte header followed by the untouched payload
//! - **Sizes**: RIFF and data sizes agree with what was written
//! - **Lifecycle**: bind, rebind, finalize, and drop behavior on real files
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wavstream-tests
//! ```

pub mod fixtures;
pub mod format_validators;

// Re-export commonly used items
pub use fixtures::{ramp_payload, WavFixture};
pub use format_validators::{pcm_payload, validate_wav, FormatError, WavInfo};
