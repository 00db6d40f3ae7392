//! Implementation of `catcycles inspect [FILE]`.
//!
//! Reads a link dump and prints summary statistics to stdout:
//! - links read and distinct links
//! - category count, parent categories, self-loops
//! - cycle count, categories involved, longest and average cycle length
//!
//! In `--format json` mode a single JSON object is emitted to stdout.
//! In human mode, aligned key/value lines are printed.
//!
//! Exit codes: 0 = success, 1 = stdout write failure, 2 = input failure.
use std::time::Instant;

use catcycles_core::{CategoryGraph, EdgeList, EmitSummary, ReadOptions, find_cycles, read_edges};

use crate::error::CliError;
use crate::format::{FormatterConfig, write_graph_summary, write_timing};
use crate::io::{open_input, read_error_to_cli};
use crate::{OutputFormat, PathOrStdin};

/// Statistics gathered from a link dump and its graph.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectStats {
    /// Pairs read from the input, duplicates included.
    pub links_read: usize,
    /// Distinct parent → child links in the graph.
    pub distinct_links: usize,
    /// Distinct category ids.
    pub categories: usize,
    /// Categories with at least one subcategory.
    pub parent_categories: usize,
    /// Categories listed as their own subcategory.
    pub self_loops: usize,
    /// Cycles reported by the depth-first pass.
    pub cycles: usize,
    /// Distinct categories appearing in at least one cycle.
    pub categories_in_cycles: usize,
    /// Length of the longest cycle, 0 if there are none.
    pub longest_cycle: usize,
    /// Mean cycle length, `None` if there are no cycles.
    pub average_cycle_length: Option<f64>,
}

impl InspectStats {
    /// Computes statistics from the parsed edges and the graph built from them.
    pub fn compute(edges: &EdgeList, graph: &CategoryGraph) -> Self {
        let mut summary = EmitSummary::default();
        for cycle in find_cycles(graph) {
            summary.record(&cycle);
        }

        Self {
            links_read: edges.len(),
            distinct_links: graph.link_count(),
            categories: graph.category_count(),
            parent_categories: graph.parents().count(),
            self_loops: graph.self_loop_count(),
            cycles: summary.cycles,
            categories_in_cycles: summary.categories_involved(),
            longest_cycle: summary.longest,
            average_cycle_length: summary.average_length(),
        }
    }
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if the input cannot be opened or parsed.
/// - [`CliError::OutputError`] (exit code 1) if writing stdout or stderr fails.
pub fn run(
    file: &PathOrStdin,
    skip_header: bool,
    format: OutputFormat,
    max_file_size: u64,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let start = Instant::now();
    let reader = open_input(file, max_file_size)?;
    let edges = read_edges(reader, &ReadOptions { skip_header })
        .map_err(|e| read_error_to_cli(e, file, max_file_size))?;
    let graph = CategoryGraph::from_edges(&edges);
    let stats = InspectStats::compute(&edges, &graph);
    let elapsed = start.elapsed();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => print_human(&mut out, &stats),
        OutputFormat::Json => print_json(&mut out, &stats),
    }?;

    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();
    write_graph_summary(&mut err_out, edges.len(), &graph, config)?;
    write_timing(&mut err_out, "inspected", elapsed, config)?;
    Ok(())
}

/// Writes inspect statistics in human-readable aligned format.
fn print_human<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "links read:            {}", stats.links_read)?;
    writeln!(w, "distinct links:        {}", stats.distinct_links)?;
    writeln!(w, "categories:            {}", stats.categories)?;
    writeln!(w, "parent categories:     {}", stats.parent_categories)?;
    writeln!(w, "self-loops:            {}", stats.self_loops)?;
    writeln!(w, "cycles:                {}", stats.cycles)?;
    writeln!(w, "categories in cycles:  {}", stats.categories_in_cycles)?;
    writeln!(w, "longest cycle:         {}", stats.longest_cycle)?;
    match stats.average_cycle_length {
        Some(avg) => writeln!(w, "average cycle length:  {avg:.2}"),
        None => writeln!(w, "average cycle length:  -"),
    }
}

/// Writes inspect statistics as a single JSON object.
fn print_json<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    let obj = serde_json::json!({
        "links_read": stats.links_read,
        "distinct_links": stats.distinct_links,
        "categories": stats.categories,
        "parent_categories": stats.parent_categories,
        "self_loops": stats.self_loops,
        "cycles": stats.cycles,
        "categories_in_cycles": stats.categories_in_cycles,
        "longest_cycle": stats.longest_cycle,
        "average_cycle_length": stats.average_cycle_length,
    });
    serde_json::to_writer_pretty(&mut *w, &obj).map_err(std::io::Error::from)?;
    writeln!(w)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use catcycles_core::Edge;

    use super::*;

    fn stats_for(pairs: &[(i64, i64)]) -> InspectStats {
        let edges: EdgeList = pairs.iter().map(|&(c, p)| Edge::new(c, p)).collect();
        let graph = CategoryGraph::from_edges(&edges);
        InspectStats::compute(&edges, &graph)
    }

    #[test]
    fn empty_dump_has_zero_everything() {
        let stats = stats_for(&[]);
        assert_eq!(stats.links_read, 0);
        assert_eq!(stats.categories, 0);
        assert_eq!(stats.cycles, 0);
        assert_eq!(stats.average_cycle_length, None);
    }

    #[test]
    fn duplicates_count_as_read_but_not_distinct() {
        let stats = stats_for(&[(2, 1), (2, 1), (3, 1)]);
        assert_eq!(stats.links_read, 3);
        assert_eq!(stats.distinct_links, 2);
        assert_eq!(stats.categories, 3);
        assert_eq!(stats.parent_categories, 1);
    }

    #[test]
    fn cycles_and_self_loops_are_counted() {
        // 1 → 2 → 1, plus 3 → 3
        let stats = stats_for(&[(2, 1), (1, 2), (3, 3)]);
        assert_eq!(stats.self_loops, 1);
        assert_eq!(stats.cycles, 2);
        assert_eq!(stats.categories_in_cycles, 3);
        assert_eq!(stats.longest_cycle, 2);
        assert_eq!(stats.average_cycle_length, Some(1.5));
    }

    #[test]
    fn human_output_is_aligned() {
        let mut buf = Vec::new();
        print_human(&mut buf, &stats_for(&[(2, 1), (1, 2)])).expect("write");
        let text = String::from_utf8(buf).expect("utf-8");
        assert!(text.contains("cycles:                1\n"), "output: {text}");
        assert!(
            text.contains("average cycle length:  2.00\n"),
            "output: {text}"
        );
        let columns: Vec<usize> = text
            .lines()
            .map(|l| l.len() - l.split(':').nth(1).expect("value").trim_start().len())
            .collect();
        assert!(columns.windows(2).all(|w| w[0] == w[1]), "output: {text}");
    }

    #[test]
    fn json_output_is_one_object() {
        let mut buf = Vec::new();
        print_json(&mut buf, &stats_for(&[(2, 1)])).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid JSON");
        assert_eq!(value["links_read"], 1);
        assert_eq!(value["cycles"], 0);
        assert!(value["average_cycle_length"].is_null());
    }
}
