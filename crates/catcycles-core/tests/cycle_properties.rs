//! Property-based tests for back-edge cycle detection.
//!
//! Generates small random category graphs (ids drawn from a narrow range so
//! that cycles, self-loops and duplicate links are common) and checks the
//! structural guarantees of the detector.
#![allow(clippy::expect_used)]

use std::collections::HashSet;
use std::convert::Infallible;

use catcycles_core::{CategoryGraph, CategoryId, Cycle, Edge, find_cycles, visit_cycles_recursive};
use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use proptest::prelude::*;

fn edges_strategy() -> impl Strategy<Value = Vec<(CategoryId, CategoryId)>> {
    prop::collection::vec((0i64..12, 0i64..12), 0..40)
}

fn build(pairs: &[(CategoryId, CategoryId)]) -> CategoryGraph {
    pairs
        .iter()
        .map(|&(child, parent)| Edge::new(child, parent))
        .collect()
}

fn recursive(g: &CategoryGraph) -> Vec<Cycle> {
    let mut out = Vec::new();
    visit_cycles_recursive(g, |c| {
        out.push(c);
        Ok::<(), Infallible>(())
    })
    .expect("infallible");
    out
}

proptest! {
    /// Both traversal strategies report the same cycles in the same order.
    #[test]
    fn strategies_agree(pairs in edges_strategy()) {
        let g = build(&pairs);
        let a: Vec<Cycle> = find_cycles(&g).collect();
        prop_assert_eq!(a, recursive(&g));
    }

    /// Every reported cycle is a closed walk: consecutive entries are linked
    /// child-to-parent and the first entry links back to the last.
    #[test]
    fn cycles_are_closed_walks(pairs in edges_strategy()) {
        let g = build(&pairs);
        for cycle in find_cycles(&g) {
            let c = cycle.categories();
            prop_assert!(!c.is_empty());
            for w in c.windows(2) {
                prop_assert!(g.contains_link(w[1], w[0]), "missing link {} -> {}", w[1], w[0]);
            }
            let first = c[0];
            let last = c[c.len() - 1];
            prop_assert!(g.contains_link(first, last), "missing back edge {} -> {}", first, last);
        }
    }

    /// Cycle entries are distinct: each cycle is a tree path plus one back edge.
    #[test]
    fn cycles_have_no_repeated_categories(pairs in edges_strategy()) {
        let g = build(&pairs);
        for cycle in find_cycles(&g) {
            let distinct: HashSet<_> = cycle.categories().iter().collect();
            prop_assert_eq!(distinct.len(), cycle.len());
        }
    }

    /// At least one cycle is reported exactly when the graph is cyclic.
    #[test]
    fn reports_iff_cyclic(pairs in edges_strategy()) {
        let g = build(&pairs);
        let reference: DiGraphMap<CategoryId, ()> =
            DiGraphMap::from_edges(pairs.iter().map(|&(child, parent)| (parent, child)));
        let found = find_cycles(&g).next().is_some();
        prop_assert_eq!(found, is_cyclic_directed(&reference));
    }

    /// There is at most one report per distinct link.
    #[test]
    fn reports_bounded_by_links(pairs in edges_strategy()) {
        let g = build(&pairs);
        prop_assert!(find_cycles(&g).count() <= g.link_count());
    }

    /// Repeating every input pair changes nothing.
    #[test]
    fn duplicated_input_is_idempotent(pairs in edges_strategy()) {
        let doubled: Vec<_> = pairs.iter().chain(pairs.iter()).copied().collect();
        let a: Vec<Cycle> = find_cycles(&build(&pairs)).collect();
        let b: Vec<Cycle> = find_cycles(&build(&doubled)).collect();
        prop_assert_eq!(a, b);
    }
}
