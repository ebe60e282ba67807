//! Test fixtures for file-backed WAV destinations.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory that hands out WAV destination paths.
pub struct WavFixture {
    pub root: TempDir,
}

impl WavFixture {
    /// Create a new empty fixture directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    /// Get the fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path for a destination named `name` (not created).
    pub fn destination(&self, name: &str) -> PathBuf {
        self.root.path().join(format!("{}.wav", name))
    }

    /// Read a destination back as bytes.
    pub fn read(&self, name: &str) -> Vec<u8> {
        fs::read(self.destination(name)).expect("Failed to read WAV destination")
    }
}

impl Default for WavFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic sample payload of `len` bytes.
pub fn ramp_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}
