//! Generates the huge-tier edge dump to disk.
//!
//! Writes `target/bench-fixtures/huge.edges`, which is loaded by
//! `benches/graph_construction.rs` when present.

use std::error::Error;
use std::fs;
use std::io::{BufWriter, Write as _};

use catcycles_bench::{SizeTier, generate_links, huge_fixture_path, render_edge_stream};

fn main() -> Result<(), Box<dyn Error>> {
    let path = huge_fixture_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    eprintln!("Generating Huge tier...");
    let links = generate_links(&SizeTier::Huge.config(42));
    eprintln!("Generated {} links", links.len());

    eprintln!("Writing dump to {}...", path.display());
    let mut out = BufWriter::new(fs::File::create(&path)?);
    out.write_all(render_edge_stream(&links, true).as_bytes())?;
    out.flush()?;

    let meta = fs::metadata(&path)?;
    #[allow(clippy::cast_precision_loss)]
    let megabytes = meta.len() as f64 / (1024.0 * 1024.0);
    eprintln!("Dump: {megabytes:.1} MB");

    Ok(())
}
