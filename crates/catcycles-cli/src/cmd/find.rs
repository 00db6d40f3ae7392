//! Implementation of `catcycles find [FILE]`.
//!
//! Reads a link dump, builds the category graph, and writes every cycle the
//! depth-first pass reports to stdout.
//!
//! Flags:
//! - `--skip-header`: discard the two-token column header.
//! - `--recursive`: use the call-recursion traversal.
//! - `--sort-by-length`: buffer all cycles and emit the shortest first.
//! - `--parent-first`: reverse each cycle so it starts at the ancestor.
//!
//! Output (JSON mode): `[[c1,c2,...],...]`, streamed as cycles are found
//! unless `--sort-by-length` forces buffering.
//! Output (human mode): one cycle per line, parent-first, joined by ` → `.
//!
//! Exit codes: 0 = success, 1 = stdout write failure, 2 = input failure.
use std::io::Write;
use std::time::Instant;

use catcycles_core::{
    CategoryGraph, Cycle, CycleWriter, DfsStrategy, EmitSummary, ReadOptions, detect_cycles,
    read_edges,
};

use crate::error::CliError;
use crate::format::{FormatterConfig, write_find_summary, write_graph_summary, write_timing};
use crate::io::{open_input, read_error_to_cli};
use crate::{OutputFormat, PathOrStdin};

/// Flags specific to `find`.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Discard the column header.
    pub skip_header: bool,
    /// Use [`DfsStrategy::Recursive`].
    pub recursive: bool,
    /// Emit cycles shortest first.
    pub sort_by_length: bool,
    /// Reverse each cycle before printing.
    pub parent_first: bool,
}

impl FindOptions {
    fn strategy(&self) -> DfsStrategy {
        if self.recursive {
            DfsStrategy::Recursive
        } else {
            DfsStrategy::Iterative
        }
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `find` command.
///
/// The whole dump is read and validated before the first byte goes to
/// stdout, so input failures never leave a partial array behind.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if the input cannot be opened or parsed.
/// - [`CliError::OutputError`] (exit code 1) if writing stdout or stderr fails.
pub fn run(
    file: &PathOrStdin,
    options: &FindOptions,
    format: OutputFormat,
    max_file_size: u64,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let read_start = Instant::now();
    let reader = open_input(file, max_file_size)?;
    let read_options = ReadOptions {
        skip_header: options.skip_header,
    };
    let edges = read_edges(reader, &read_options)
        .map_err(|e| read_error_to_cli(e, file, max_file_size))?;
    let graph = CategoryGraph::from_edges(&edges);
    let read_elapsed = read_start.elapsed();

    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();
    write_graph_summary(&mut err_out, edges.len(), &graph, config)?;
    write_timing(&mut err_out, "read input", read_elapsed, config)?;

    // Human lines always read from the ancestor down.
    let options = FindOptions {
        parent_first: options.parent_first || matches!(format, OutputFormat::Human),
        ..options.clone()
    };

    let detect_start = Instant::now();
    let stdout = std::io::stdout();
    let sink = CycleSink::new(format, std::io::BufWriter::new(stdout.lock()));
    let summary = write_cycles(&graph, &options, sink)?;
    let detect_elapsed = detect_start.elapsed();

    write_find_summary(&mut err_out, &summary, config)?;
    write_timing(&mut err_out, "detected cycles", detect_elapsed, config)?;
    Ok(())
}

/// Drives one traversal of `graph` into `sink` and returns the totals.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
fn write_cycles<W: Write>(
    graph: &CategoryGraph,
    options: &FindOptions,
    mut sink: CycleSink<W>,
) -> std::io::Result<EmitSummary> {
    let orient = |cycle: Cycle| {
        if options.parent_first {
            cycle.parent_first()
        } else {
            cycle
        }
    };

    sink.begin()?;
    if options.sort_by_length {
        let mut buffered = Vec::new();
        detect_cycles(graph, options.strategy(), |cycle| {
            buffered.push(orient(cycle));
            Ok::<(), std::io::Error>(())
        })?;
        buffered.sort_by_key(Cycle::len);
        for cycle in &buffered {
            sink.write_cycle(cycle)?;
        }
    } else {
        detect_cycles(graph, options.strategy(), |cycle| {
            sink.write_cycle(&orient(cycle))
        })?;
    }
    sink.finish()
}

// ---------------------------------------------------------------------------
// CycleSink
// ---------------------------------------------------------------------------

/// Destination for cycles in the selected output format.
enum CycleSink<W: Write> {
    Json(CycleWriter<W>),
    Human { out: W, summary: EmitSummary },
}

impl<W: Write> CycleSink<W> {
    fn new(format: OutputFormat, out: W) -> Self {
        match format {
            OutputFormat::Json => CycleSink::Json(CycleWriter::new(out)),
            OutputFormat::Human => CycleSink::Human {
                out,
                summary: EmitSummary::default(),
            },
        }
    }

    fn begin(&mut self) -> std::io::Result<()> {
        match self {
            CycleSink::Json(writer) => writer.begin(),
            CycleSink::Human { .. } => Ok(()),
        }
    }

    fn write_cycle(&mut self, cycle: &Cycle) -> std::io::Result<()> {
        match self {
            CycleSink::Json(writer) => writer.write_cycle(cycle),
            CycleSink::Human { out, summary } => {
                summary.record(cycle);
                write_human_line(out, cycle)
            }
        }
    }

    fn finish(self) -> std::io::Result<EmitSummary> {
        match self {
            CycleSink::Json(writer) => writer.finish(),
            CycleSink::Human { mut out, summary } => {
                out.flush()?;
                Ok(summary)
            }
        }
    }
}

fn write_human_line<W: Write>(out: &mut W, cycle: &Cycle) -> std::io::Result<()> {
    let line = cycle
        .categories()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ");
    writeln!(out, "{line}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
