//! Byte sources for the parser
//!
//! Plain and gzip-compressed exports are both accepted. Progress is always
//! measured on the bytes pulled from disk, so for `.gz` input it tracks the
//! compressed size.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::Result;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Byte-level progress of one parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseProgress {
    pub bytes_read: u64,
    pub total_bytes: u64,
}

impl ParseProgress {
    /// Fraction of input consumed, in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            return 1.0;
        }
        (self.bytes_read as f64 / self.total_bytes as f64).min(1.0)
    }

    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0).floor() as u8
    }
}

/// Reader adapter that counts consumed bytes
///
/// The callback fires only when the whole-percent value changes, plus once
/// when the inner reader reports end of input.
pub struct ProgressReader<R, F> {
    inner: R,
    bytes_read: u64,
    total_bytes: u64,
    last_percent: Option<u8>,
    on_progress: F,
}

impl<R, F> ProgressReader<R, F>
where
    R: Read,
    F: FnMut(ParseProgress),
{
    pub fn new(inner: R, total_bytes: u64, on_progress: F) -> Self {
        Self {
            inner,
            bytes_read: 0,
            total_bytes,
            last_percent: None,
            on_progress,
        }
    }
}

impl<R, F> Read for ProgressReader<R, F>
where
    R: Read,
    F: FnMut(ParseProgress),
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;

        let progress = ParseProgress {
            bytes_read: self.bytes_read,
            total_bytes: self.total_bytes,
        };
        let percent = progress.percent();
        if self.last_percent != Some(percent) || (n == 0 && !buf.is_empty()) {
            self.last_percent = Some(percent);
            (self.on_progress)(progress);
        }

        Ok(n)
    }
}

/// Whether a path names a gzip-compressed export
pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Open an export for parsing, reporting byte progress on the raw file
pub fn open_export<'a, F>(path: &Path, on_progress: F) -> Result<Box<dyn BufRead + 'a>>
where
    F: FnMut(ParseProgress) + 'a,
{
    let file = File::open(path)?;
    let total_bytes = file.metadata()?.len();
    let counted = ProgressReader::new(file, total_bytes, on_progress);

    if is_gzip(path) {
        tracing::debug!(path = %path.display(), "Reading gzip-compressed export");
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, GzDecoder::new(counted))))
    } else {
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, counted)))
    }
}
