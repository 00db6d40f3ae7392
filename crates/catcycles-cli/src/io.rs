/// Input opening with size enforcement, and read-error mapping.
///
/// This module is the single entry point for input I/O in the `catcycles`
/// binary. `catcycles-core` only sees a [`BufRead`]; opening files, applying
/// `--max-file-size` and translating failures into [`CliError`] happen here.
///
/// Key behaviours:
/// - Disk files: size checked via `std::fs::metadata` before opening.
/// - Stdin: wrapped in a [`CappedReader`] so an oversized stream fails while
///   it is being parsed instead of being buffered whole.
/// - All read failures map to [`CliError`] variants with exit code 2.
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use catcycles_core::ReadError;

use crate::PathOrStdin;
use crate::error::CliError;

const READ_BUFFER: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Opens `source` for buffered, size-capped reading.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for:
/// - file not found
/// - permission denied
/// - file exceeds `max_size`
/// - any other I/O error while opening
pub fn open_input(source: &PathOrStdin, max_size: u64) -> Result<Box<dyn BufRead>, CliError> {
    match source {
        PathOrStdin::Path(path) => open_file(path, max_size),
        PathOrStdin::Stdin => Ok(Box::new(BufReader::with_capacity(
            READ_BUFFER,
            CappedReader::new(std::io::stdin(), max_size),
        ))),
    }
}

/// Maps a [`ReadError`] raised while parsing `source` to a [`CliError`].
///
/// `limit` is the `--max-file-size` value, reported when the size cap is
/// what interrupted the read.
pub fn read_error_to_cli(e: ReadError, source: &PathOrStdin, limit: u64) -> CliError {
    match e {
        ReadError::TruncatedInput { pairs_read } => CliError::TruncatedInput {
            source: source.label(),
            pairs_read,
        },
        ReadError::MalformedToken {
            token,
            line,
            expected,
        } => CliError::MalformedToken {
            source: source.label(),
            token,
            line,
            expected: expected.to_string(),
        },
        ReadError::Io(io) if io.kind() == ErrorKind::FileTooLarge => CliError::FileTooLarge {
            source: source.label(),
            limit,
            actual: None,
        },
        ReadError::Io(io) => match source {
            PathOrStdin::Stdin => CliError::StdinReadError {
                detail: io.to_string(),
            },
            PathOrStdin::Path(path) => io_error_to_cli(&io, path),
        },
    }
}

// ---------------------------------------------------------------------------
// Disk files
// ---------------------------------------------------------------------------

fn open_file(path: &Path, max_size: u64) -> Result<Box<dyn BufRead>, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| io_error_to_cli(&e, path))?;
    // The file may still grow after the metadata check.
    Ok(Box::new(BufReader::with_capacity(
        READ_BUFFER,
        CappedReader::new(file, max_size),
    )))
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    let kind = e.kind();
    if kind == ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if kind == ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// CappedReader
// ---------------------------------------------------------------------------

/// A reader that fails with [`ErrorKind::FileTooLarge`] once more than
/// `limit` bytes have been produced.
///
/// A stream of exactly `limit` bytes is accepted: after the budget is spent
/// one probe byte is read to tell "at the limit" from "over the limit".
#[derive(Debug)]
pub struct CappedReader<R> {
    inner: R,
    remaining: u64,
    limit: u64,
}

impl<R: Read> CappedReader<R> {
    /// Wraps `inner`, allowing at most `limit` bytes through.
    pub fn new(inner: R, limit: u64) -> Self {
        Self {
            inner,
            remaining: limit,
            limit,
        }
    }
}

impl<R: Read> Read for CappedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.remaining == 0 {
            let mut probe = [0u8; 1];
            return match self.inner.read(&mut probe)? {
                0 => Ok(0),
                _ => Err(std::io::Error::new(
                    ErrorKind::FileTooLarge,
                    format!("input exceeds {} bytes", self.limit),
                )),
            };
        }
        let budget = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        let max = buf.len().min(budget);
        let n = self.inner.read(&mut buf[..max])?;
        self.remaining -= n as u64;
        Ok(n)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
