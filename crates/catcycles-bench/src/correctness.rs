//! Invariant checkers for generated graphs and detected cycles.

use std::collections::HashSet;

use catcycles_core::{CategoryGraph, Cycle, Edge};

/// Verifies that every input link is present in `graph` and that the graph
/// holds no links beyond the distinct input pairs.
pub fn check_graph_invariants(links: &[Edge], graph: &CategoryGraph) -> Result<(), String> {
    let distinct: HashSet<&Edge> = links.iter().collect();
    if graph.link_count() != distinct.len() {
        return Err(format!(
            "link count mismatch: graph={}, distinct input pairs={}",
            graph.link_count(),
            distinct.len()
        ));
    }
    for link in links {
        if !graph.contains_link(link.parent, link.child) {
            return Err(format!(
                "link {} -> {} missing from graph",
                link.parent, link.child
            ));
        }
    }
    Ok(())
}

/// Verifies a detected cycle:
/// - it is non-empty
/// - each consecutive pair is a real child-to-parent link
/// - the first category links back to the last
/// - no category repeats
pub fn check_cycle(graph: &CategoryGraph, cycle: &Cycle) -> Result<(), String> {
    let c = cycle.categories();
    let (Some(&first), Some(&last)) = (c.first(), c.last()) else {
        return Err("cycle is empty".to_owned());
    };
    for pair in c.windows(2) {
        if let [child, parent] = *pair {
            if !graph.contains_link(parent, child) {
                return Err(format!("cycle step {parent} -> {child} is not a link"));
            }
        }
    }
    if !graph.contains_link(first, last) {
        return Err(format!("closing link {first} -> {last} is missing"));
    }
    let distinct: HashSet<_> = c.iter().collect();
    if distinct.len() != c.len() {
        return Err(format!("cycle {c:?} repeats a category"));
    }
    Ok(())
}
