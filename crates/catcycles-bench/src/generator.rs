//! Category link generator.
//!
//! Builds a random category forest (every category except the roots is
//! filed under one lower-numbered parent), then layers extra links on top:
//!
//! - **cross links** also point from a lower to a higher id, so they keep
//!   the graph acyclic;
//! - **back links** point from a higher to a lower id and usually close a
//!   cycle;
//! - **self-loops** file a category under itself.
//!
//! With `back_link_ratio == 0.0` and `self_loops == 0` the output is always
//! acyclic.

use catcycles_core::{CategoryId, Edge, SENTINEL};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for the link generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of categories.
    pub num_categories: usize,
    /// Number of categories without a parent in the base forest.
    pub num_roots: usize,
    /// Extra acyclic links per category (0.0-1.0).
    pub cross_link_ratio: f64,
    /// Upward links per category (0.0-0.1).
    pub back_link_ratio: f64,
    /// Number of self-loops.
    pub self_loops: usize,
    /// Offset added to every generated id, mimicking page ids.
    pub id_base: CategoryId,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~1K categories, ~1.3K links
    Small,
    /// ~20K categories, ~26K links
    Medium,
    /// ~200K categories, ~260K links
    Large,
    /// ~2M categories, ~2.6M links; written to disk by `gen-edges`
    Huge,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let (num_categories, num_roots, self_loops) = match self {
            SizeTier::Small => (1_000, 5, 2),
            SizeTier::Medium => (20_000, 20, 10),
            SizeTier::Large => (200_000, 50, 40),
            SizeTier::Huge => (2_000_000, 100, 200),
        };
        GeneratorConfig {
            seed,
            num_categories,
            num_roots,
            cross_link_ratio: 0.25,
            back_link_ratio: 0.01,
            self_loops,
            id_base: 1_000,
        }
    }
}

/// Generates `(child, parent)` links from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`. Duplicate
/// links may occur, as they do in real dumps.
pub fn generate_links(config: &GeneratorConfig) -> Vec<Edge> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.num_categories;
    let roots = config.num_roots.clamp(1, n.max(1));
    let id = |index: usize| config.id_base + index as CategoryId;

    let mut links = Vec::with_capacity(n + extra_links(n, config.cross_link_ratio));

    for child in roots..n {
        let parent = rng.gen_range(0..child);
        links.push(Edge::new(id(child), id(parent)));
    }

    if n >= 2 {
        for _ in 0..extra_links(n, config.cross_link_ratio) {
            let child = rng.gen_range(1..n);
            let parent = rng.gen_range(0..child);
            links.push(Edge::new(id(child), id(parent)));
        }
        for _ in 0..extra_links(n, config.back_link_ratio) {
            let child = rng.gen_range(0..n - 1);
            let parent = rng.gen_range(child + 1..n);
            links.push(Edge::new(id(child), id(parent)));
        }
    }

    if n >= 1 {
        for _ in 0..config.self_loops {
            let category = id(rng.gen_range(0..n));
            links.push(Edge::new(category, category));
        }
    }

    links
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn extra_links(n: usize, ratio: f64) -> usize {
    (n as f64 * ratio.max(0.0)).round() as usize
}

/// Renders links in the dump format read by `catcycles`: one
/// tab-separated `child parent` pair per line, terminated by the sentinel.
pub fn render_edge_stream(links: &[Edge], with_header: bool) -> String {
    let mut out = String::with_capacity(links.len() * 16 + 32);
    if with_header {
        out.push_str("subcat\tparentcat\n");
    }
    for link in links {
        out.push_str(&format!("{}\t{}\n", link.child, link.parent));
    }
    out.push_str(&format!("{SENTINEL}\n"));
    out
}
