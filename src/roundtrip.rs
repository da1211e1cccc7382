//! File round-trip verification harness.
//!
//! [`run`] performs the classic manual codec check, minus the manual part:
//! compress a file, keep the compressed bytes on disk for inspection,
//! decompress them, keep that too, and then actually verify that the
//! reconstruction equals the original instead of hoping it does.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::{compress, decompress};

/// Failures of [`run`].
#[derive(Error, Debug)]
pub enum RoundTripError {
    /// The input file could not be read. Nothing has been written yet.
    #[error("failed to read input {path:?}")]
    ReadInput { path: PathBuf, source: io::Error },

    /// One of the two output files could not be written.
    #[error("failed to write {path:?}")]
    WriteOutput { path: PathBuf, source: io::Error },

    /// The compressor produced a stream its own decompressor rejects.
    #[error("compressed stream failed to decode")]
    Decode(#[from] crate::Error),

    /// The reconstruction differs from the original input.
    #[error("reconstruction diverges from the input at byte {offset}")]
    Mismatch { offset: usize },
}

/// Sizes observed during a verified round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Bytes read from the input file.
    pub input_len: usize,
    /// Bytes written to the compressed output file.
    pub compressed_len: usize,
}

impl Report {
    /// Compressed size relative to the input, e.g. `0.42` for 42%.
    /// An empty input reports a ratio of `1.0`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 1.0;
        }
        self.compressed_len as f64 / self.input_len as f64
    }
}

/// Runs a verified compress/decompress round trip over `input`.
///
/// Reads `input` whole, writes its LZNT1 stream to `compressed_out`, writes
/// the decoded reconstruction to `decompressed_out` (both are overwritten
/// if present), and fails unless the reconstruction matches the input byte
/// for byte. The input is read before either output is touched, so a
/// missing or unreadable input leaves the filesystem unchanged.
pub fn run(
    input: impl AsRef<Path>,
    compressed_out: impl AsRef<Path>,
    decompressed_out: impl AsRef<Path>,
) -> Result<Report, RoundTripError> {
    let input = input.as_ref();
    let compressed_out = compressed_out.as_ref();
    let decompressed_out = decompressed_out.as_ref();

    let original = fs::read(input).map_err(|source| RoundTripError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", original.len(), input.display());

    let mut compressed = Vec::new();
    compress(&original, &mut compressed);
    write_file(compressed_out, &compressed)?;
    debug!(
        "wrote {} compressed bytes to {}",
        compressed.len(),
        compressed_out.display()
    );

    let mut restored = Vec::with_capacity(original.len());
    decompress(&compressed, &mut restored)?;
    write_file(decompressed_out, &restored)?;
    debug!(
        "wrote {} reconstructed bytes to {}",
        restored.len(),
        decompressed_out.display()
    );

    verify(&original, &restored)?;

    let report = Report {
        input_len: original.len(),
        compressed_len: compressed.len(),
    };
    info!(
        "round trip verified: {} -> {} bytes ({:.1}% of input)",
        report.input_len,
        report.compressed_len,
        report.ratio() * 100.0
    );
    Ok(report)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), RoundTripError> {
    fs::write(path, bytes).map_err(|source| RoundTripError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Byte-compares the reconstruction against the original, reporting the
/// first divergent offset on failure. A pure length difference reports the
/// end of the shorter buffer.
fn verify(original: &[u8], restored: &[u8]) -> Result<(), RoundTripError> {
    if original == restored {
        return Ok(());
    }
    let offset = original
        .iter()
        .zip(restored)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| original.len().min(restored.len()));
    Err(RoundTripError::Mismatch { offset })
}

#[cfg(test)]
mod tests {
    use super::verify;

    #[test]
    fn verify_reports_first_divergence() {
        assert!(verify(b"abcdef", b"abcdef").is_ok());

        let err = verify(b"abcdef", b"abcXef").unwrap_err();
        assert!(matches!(
            err,
            super::RoundTripError::Mismatch { offset: 3 }
        ));
    }

    #[test]
    fn verify_reports_length_mismatch_at_shorter_end() {
        let err = verify(b"abcdef", b"abc").unwrap_err();
        assert!(matches!(
            err,
            super::RoundTripError::Mismatch { offset: 3 }
        ));
    }
}
