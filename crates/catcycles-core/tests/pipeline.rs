//! End-to-end tests: edge stream in, JSON cycle array out.
#![allow(clippy::expect_used)]

use catcycles_core::{
    CategoryGraph, ReadError, ReadOptions, emit_cycles, find_cycles, read_edges,
};

fn run(input: &str) -> Result<String, ReadError> {
    let edges = read_edges(input.as_bytes(), &ReadOptions::default())?;
    let graph = CategoryGraph::from_edges(&edges);
    let mut out = Vec::new();
    emit_cycles(find_cycles(&graph), &mut out).expect("write to Vec");
    Ok(String::from_utf8(out).expect("utf-8"))
}

#[test]
fn sentinel_only_prints_empty_array() {
    assert_eq!(run("-1").expect("ok"), "[]");
}

#[test]
fn self_loop_prints_single_node_cycle() {
    assert_eq!(run("42 42\n-1\n").expect("ok"), "[[42]]");
}

#[test]
fn simple_cycle_over_k_nodes() {
    // 1 -> 2 -> 3 -> 4 -> 1
    let out = run("2 1\n3 2\n4 3\n1 4\n-1\n").expect("ok");
    assert_eq!(out, "[[4,3,2,1]]");
}

#[test]
fn acyclic_graph_prints_empty_array() {
    assert_eq!(run("2 1\n3 2\n-1\n").expect("ok"), "[]");
}

#[test]
fn two_disjoint_cycles() {
    let out = run("2 1\n1 2\n4 3\n3 4\n-1\n").expect("ok");
    let parsed: Vec<Vec<i64>> = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(parsed.len(), 2);
    let mut first = parsed[0].clone();
    let mut second = parsed[1].clone();
    first.sort_unstable();
    second.sort_unstable();
    assert_eq!(first, vec![1, 2]);
    assert_eq!(second, vec![3, 4]);
}

#[test]
fn parallel_edges_do_not_duplicate_reports() {
    let once = run("2 1\n1 2\n-1\n").expect("ok");
    let twice = run("2 1\n2 1\n1 2\n1 2\n-1\n").expect("ok");
    assert_eq!(once, twice);
}

#[test]
fn header_mode_matches_plain_mode() {
    let edges = read_edges(
        "subcat parentcat\n2 1\n1 2\n-1\n".as_bytes(),
        &ReadOptions { skip_header: true },
    )
    .expect("ok");
    let graph = CategoryGraph::from_edges(&edges);
    let mut out = Vec::new();
    emit_cycles(find_cycles(&graph), &mut out).expect("write");
    assert_eq!(out, b"[[2,1]]");
}

#[test]
fn missing_sentinel_is_an_error_not_empty_output() {
    let err = run("2 1\n1 2\n").expect_err("should fail");
    assert!(matches!(err, ReadError::TruncatedInput { pairs_read: 2 }));
}
