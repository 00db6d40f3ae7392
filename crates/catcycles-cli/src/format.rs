/// Stderr reporting: errors, run summaries, and verbose timing.
///
/// Results go to stdout; everything in this module writes to the stderr
/// handle it is given. Output is controlled by [`FormatterConfig`]:
///
/// - **colors**: the `error:` line is red. Disabled when `--no-color` is set,
///   the `NO_COLOR` environment variable is present (per
///   <https://no-color.org>), or stderr is not a TTY.
/// - **quiet**: only errors are written.
/// - **verbose**: graph size and per-phase timing are added.
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use catcycles_core::{CategoryGraph, EmitSummary};

use crate::error::CliError;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for stderr reporting, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit timing and graph size to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Writes `err` as a single line. Errors are written even in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_error<W: Write>(
    writer: &mut W,
    err: &CliError,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.colors {
        writeln!(writer, "{ANSI_RED}{}{ANSI_RESET}", err.message())
    } else {
        writeln!(writer, "{}", err.message())
    }
}

/// Writes the line describing the graph that was read.
///
/// Format: `read 12 links across 9 categories (11 distinct links)`
///
/// Only written in verbose mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_graph_summary<W: Write>(
    writer: &mut W,
    links_read: usize,
    graph: &CategoryGraph,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(
        writer,
        "read {links_read} {} across {} {} ({} distinct {})",
        pluralize(links_read, "link", "links"),
        graph.category_count(),
        pluralize(graph.category_count(), "category", "categories"),
        graph.link_count(),
        pluralize(graph.link_count(), "link", "links"),
    )
}

/// Writes the end-of-run summary.
///
/// Format: `found 2 cycles involving 5 categories (average length 2.5)`
///
/// Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_find_summary<W: Write>(
    writer: &mut W,
    summary: &EmitSummary,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    match summary.average_length() {
        None => writeln!(writer, "found 0 cycles"),
        Some(average) => writeln!(
            writer,
            "found {} {} involving {} {} (average length {average:.1})",
            summary.cycles,
            pluralize(summary.cycles, "cycle", "cycles"),
            summary.categories_involved(),
            pluralize(summary.categories_involved(), "category", "categories"),
        ),
    }
}

/// Writes timing information in verbose mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

fn pluralize<'a>(n: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if n == 1 { singular } else { plural }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
