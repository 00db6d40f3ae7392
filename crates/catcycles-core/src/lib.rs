//! Cycle detection for category/subcategory link dumps.
//!
//! [`read_edges`] parses a `child parent … -1` stream, [`CategoryGraph`]
//! folds the pairs into a parent → child graph, [`find_cycles`] walks it
//! depth-first and yields one [`Cycle`] per back edge, and [`emit_cycles`]
//! streams the result as a JSON array of arrays.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod cycles;
pub mod emit;
pub mod graph;
pub mod reader;

pub use cycles::{
    Cycle, Cycles, DfsStrategy, TraversalContext, detect_cycles, find_cycles,
    visit_cycles_recursive,
};
pub use emit::{CycleWriter, EmitSummary, emit_cycles};
pub use graph::{CategoryGraph, CategoryId};
pub use reader::{Edge, EdgeList, ReadError, ReadOptions, SENTINEL, Slot, read_edges};
