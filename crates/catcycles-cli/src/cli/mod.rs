//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl PathOrStdin {
    /// Label used in messages: `"-"` for stdin, otherwise the path.
    pub fn label(&self) -> String {
        match self {
            PathOrStdin::Stdin => "-".to_owned(),
            PathOrStdin::Path(path) => path.display().to_string(),
        }
    }
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for results written to stdout.
///
/// `Json` is the wire format: a single array of integer arrays. `Human`
/// prints one cycle per line with ids joined by arrows.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// A single JSON array of cycles (default).
    Json,
    /// One cycle per line, for reading in a terminal.
    Human,
}

/// All top-level subcommands exposed by the `catcycles` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Find cycles in a category link dump and print them.
    Find {
        /// Path to a link dump, or `-` for stdin.
        #[arg(value_name = "FILE", default_value = "-")]
        file: PathOrStdin,
        /// Discard the two-token column header at the top of the dump.
        #[arg(long)]
        skip_header: bool,
        /// Use call recursion for the depth-first pass instead of an explicit
        /// work stack. Very deep graphs can overflow the stack.
        #[arg(long)]
        recursive: bool,
        /// Buffer all cycles and print the shortest first (stable on ties).
        #[arg(long)]
        sort_by_length: bool,
        /// Print each cycle starting from the ancestor category instead of
        /// the category that closes it.
        #[arg(long)]
        parent_first: bool,
    },

    /// Print summary statistics for a link dump and its cycles.
    Inspect {
        /// Path to a link dump, or `-` for stdin.
        #[arg(value_name = "FILE", default_value = "-")]
        file: PathOrStdin,
        /// Discard the two-token column header at the top of the dump.
        #[arg(long)]
        skip_header: bool,
    },
}

/// Root CLI struct for the `catcycles` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "catcycles",
    version,
    about = "Category cycle finder",
    long_about = "Finds directed cycles in a category/subcategory link dump.\n\
                  Input is a stream of `child parent` integer pairs terminated by -1;\n\
                  output is a JSON array of cycles."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: json (default) or human.
    #[arg(long, short = 'f', default_value = "json", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase stderr verbosity: timing and graph size
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input size in bytes.
    ///
    /// Can also be set via the `CATCYCLES_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 1073741824 (1 GiB).
    #[arg(
        long,
        global = true,
        env = "CATCYCLES_MAX_FILE_SIZE",
        default_value = "1073741824"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes on stderr.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,
}
