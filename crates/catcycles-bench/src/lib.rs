//! Category graph generator and benchmark utilities for catcycles.
//!
//! This crate provides deterministic generation of category link dumps for
//! benchmarking and invariant testing of `catcycles-core`.

use std::path::PathBuf;

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, generate_links, render_edge_stream};

/// Returns the path where the huge-tier edge dump is stored on disk.
///
/// The file lives under `target/bench-fixtures/huge.edges` so it is
/// gitignored and shared between the generator binary and the benchmarks.
pub fn huge_fixture_path() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .join("..")
        .join("..")
        .join("target")
        .join("bench-fixtures")
        .join("huge.edges")
}
