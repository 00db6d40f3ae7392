/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `catcycles` binary. Every
/// variant maps to a stable exit code via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The link dump could not be opened, was
///   too large, or did not follow the `child parent … -1` protocol. Nothing
///   is written to stdout.
/// - Exit code **1**: output failure. Results could not be written to stdout.
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `catcycles` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only).
        actual: Option<u64>,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input ended before the `-1` sentinel.
    TruncatedInput {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// Number of complete pairs read before the input ran out.
        pairs_read: usize,
    },

    /// A token in the input is not an integer.
    MalformedToken {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The offending token.
        token: String,
        /// 1-based line number of the token.
        line: usize,
        /// `"child"` or `"parent"`.
        expected: String,
    },

    // --- Exit code 1: output failures ---
    /// Writing results to stdout failed.
    OutputError {
        /// The underlying I/O error message.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2`: input failure (file not found, truncated dump, bad token, …).
    /// - `1`: output failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::TruncatedInput { .. }
            | Self::MalformedToken { .. } => 2,

            Self::OutputError { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::TruncatedInput { source, pairs_read } => {
                format!(
                    "error: truncated input in {source}: stream ended before the -1 sentinel \
                     ({pairs_read} complete pairs read)"
                )
            }
            Self::MalformedToken {
                source,
                token,
                line,
                expected,
            } => {
                format!(
                    "error: malformed input in {source} at line {line}: expected an integer \
                     {expected} id, found {token:?}"
                )
            }
            Self::OutputError { detail } => {
                format!("error: failed to write output: {detail}")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    /// Write-side I/O failures; read-side errors are mapped in [`crate::io`].
    fn from(e: std::io::Error) -> Self {
        CliError::OutputError {
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
