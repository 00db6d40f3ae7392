/// Streaming JSON output of detected cycles.
///
/// The output is a single JSON array of integer arrays, written one cycle at
/// a time as the detector finds it:
///
/// ```text
/// [[3,2,1],[5,4]]
/// ```
///
/// Zero cycles produce exactly `[]`. No trailing newline is written.
use std::collections::HashSet;
use std::io::Write;

use crate::cycles::Cycle;
use crate::graph::CategoryId;

// ---------------------------------------------------------------------------
// EmitSummary
// ---------------------------------------------------------------------------

/// Running totals over the cycles seen by a [`CycleWriter`].
#[derive(Debug, Clone, Default)]
pub struct EmitSummary {
    /// Number of cycles.
    pub cycles: usize,
    /// Sum of all cycle lengths.
    pub total_length: usize,
    /// Length of the longest cycle, or 0 if there were none.
    pub longest: usize,
    involved: HashSet<CategoryId>,
}

impl EmitSummary {
    /// Adds `cycle` to the totals.
    pub fn record(&mut self, cycle: &Cycle) {
        self.cycles += 1;
        self.total_length += cycle.len();
        self.longest = self.longest.max(cycle.len());
        self.involved.extend(cycle.categories().iter().copied());
    }

    /// Number of distinct categories that appear in at least one cycle.
    pub fn categories_involved(&self) -> usize {
        self.involved.len()
    }

    /// Mean cycle length, or `None` when no cycles were recorded.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_length(&self) -> Option<f64> {
        if self.cycles == 0 {
            None
        } else {
            Some(self.total_length as f64 / self.cycles as f64)
        }
    }
}

// ---------------------------------------------------------------------------
// CycleWriter
// ---------------------------------------------------------------------------

/// Writes the outer array and its cycles incrementally to `W`.
///
/// Call [`CycleWriter::begin`] once, [`CycleWriter::write_cycle`] per cycle,
/// then [`CycleWriter::finish`].
#[derive(Debug)]
pub struct CycleWriter<W: Write> {
    out: W,
    summary: EmitSummary,
}

impl<W: Write> CycleWriter<W> {
    /// Wraps `out`. Nothing is written until [`CycleWriter::begin`].
    pub fn new(out: W) -> Self {
        Self {
            out,
            summary: EmitSummary::default(),
        }
    }

    /// Writes the opening `[` of the outer array.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the underlying writer fails.
    pub fn begin(&mut self) -> std::io::Result<()> {
        self.out.write_all(b"[")
    }

    /// Writes one cycle as `[a,b,c]`, preceded by a separator for every cycle
    /// after the first.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the underlying writer fails.
    pub fn write_cycle(&mut self, cycle: &Cycle) -> std::io::Result<()> {
        if self.summary.cycles > 0 {
            self.out.write_all(b",")?;
        }
        serde_json::to_writer(&mut self.out, cycle).map_err(std::io::Error::from)?;
        self.summary.record(cycle);
        Ok(())
    }

    /// Writes the closing `]`, flushes, and returns the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to or flushing the underlying writer fails.
    pub fn finish(mut self) -> std::io::Result<EmitSummary> {
        self.out.write_all(b"]")?;
        self.out.flush()?;
        Ok(self.summary)
    }

    /// Totals for the cycles written so far.
    pub fn summary(&self) -> &EmitSummary {
        &self.summary
    }
}

/// Writes every cycle from `cycles` to `out` as one JSON array.
///
/// Cycles are pulled and written one at a time, so a lazy source such as
/// [`crate::find_cycles`] never has to be collected.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn emit_cycles<I, W>(cycles: I, out: W) -> std::io::Result<EmitSummary>
where
    I: IntoIterator<Item = Cycle>,
    W: Write,
{
    let mut writer = CycleWriter::new(out);
    writer.begin()?;
    for cycle in cycles {
        writer.write_cycle(&cycle)?;
    }
    writer.finish()
}
