/// Back-edge cycle detection over a [`CategoryGraph`].
///
/// One depth-first pass visits every category that has subcategories. Each
/// time the pass meets a link `v → i` whose target `i` is still on the active
/// DFS path, the link closes a cycle; the cycle is rebuilt by walking parent
/// pointers from `v` up to `i`.
///
/// # Algorithm
///
/// For every root in [`CategoryGraph::parents`] that has not been visited:
///
/// 1. Mark `v` visited and on-stack.
/// 2. For each successor `i` of `v`:
///    - `i` unvisited: tree edge. Record `edge_to[i] = v` and descend.
///    - `i` on-stack: back edge. Emit `v, edge_to[v], …, i`.
///    - otherwise: cross or forward edge into a finished subtree; ignored.
/// 3. Take `v` off the stack. It stays visited.
///
/// This is back-edge enumeration, not simple-cycle enumeration: exactly one
/// cycle is reported per back edge met, cycles are not deduplicated, and a
/// category can appear in several cycles. A self-loop `v → v` is reported as
/// the one-node cycle `[v]`.
///
/// # Strategies
///
/// [`find_cycles`] drives the pass from an explicit heap-allocated stack of
/// frames and yields cycles lazily, so graph depth is bounded only by memory.
/// [`visit_cycles_recursive`] runs the same pass on the call stack. Both
/// produce the same cycles in the same order.
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::graph::{CategoryGraph, CategoryId};

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// The categories of one cycle, listed from the back-edge source up to the
/// back-edge target.
///
/// For a cycle `c`, each `c[k + 1] → c[k]` is a link in the graph and
/// `c[0] → c[last]` is the closing back edge. Serializes as a plain JSON
/// array of ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle(Vec<CategoryId>);

impl Cycle {
    /// Returns the categories in discovery order (descendant first).
    pub fn categories(&self) -> &[CategoryId] {
        &self.0
    }

    /// Returns the number of categories in the cycle.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the cycle holds no categories. Cycles produced by
    /// the detector always hold at least one.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the cycle with its categories reversed, so that it reads from
    /// the ancestor down to the back-edge source.
    pub fn parent_first(&self) -> Cycle {
        Cycle(self.0.iter().rev().copied().collect())
    }

    /// Consumes the cycle and returns its categories.
    pub fn into_vec(self) -> Vec<CategoryId> {
        self.0
    }
}

impl From<Vec<CategoryId>> for Cycle {
    fn from(categories: Vec<CategoryId>) -> Self {
        Cycle(categories)
    }
}

// ---------------------------------------------------------------------------
// Traversal state
// ---------------------------------------------------------------------------

/// Per-pass DFS bookkeeping.
///
/// Owned by exactly one traversal; nothing is shared between passes.
/// `on_stack` is always a subset of `visited`, and `edge_to` only ever holds
/// entries for categories reached through a tree edge.
#[derive(Debug, Default)]
pub struct TraversalContext {
    visited: HashSet<CategoryId>,
    on_stack: HashSet<CategoryId>,
    edge_to: HashMap<CategoryId, CategoryId>,
}

impl TraversalContext {
    /// Returns `true` if processing of `id` has started.
    pub fn is_visited(&self, id: CategoryId) -> bool {
        self.visited.contains(&id)
    }

    /// Returns `true` if `id` is on the active DFS path.
    pub fn is_on_stack(&self, id: CategoryId) -> bool {
        self.on_stack.contains(&id)
    }

    /// Returns the number of categories the pass has reached so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    fn enter(&mut self, id: CategoryId) {
        self.visited.insert(id);
        self.on_stack.insert(id);
    }

    fn leave(&mut self, id: CategoryId) {
        self.on_stack.remove(&id);
    }

    fn tree_edge(&mut self, from: CategoryId, to: CategoryId) {
        self.edge_to.insert(to, from);
    }

    /// Rebuilds the cycle closed by the back edge `source → target`.
    ///
    /// `target` is on the stack, so it is a tree ancestor of `source` and the
    /// parent-pointer walk reaches it.
    fn trace(&self, source: CategoryId, target: CategoryId) -> Cycle {
        let mut categories = Vec::new();
        let mut x = source;
        while x != target {
            categories.push(x);
            match self.edge_to.get(&x) {
                Some(&parent) => x = parent,
                None => break,
            }
        }
        categories.push(target);
        Cycle(categories)
    }
}

// ---------------------------------------------------------------------------
// Iterative traversal
// ---------------------------------------------------------------------------

/// A node on the explicit DFS stack together with its successor cursor.
#[derive(Debug)]
struct Frame {
    category: CategoryId,
    successors: Vec<CategoryId>,
    next: usize,
}

/// Lazy iterator over the cycles found by one DFS pass.
///
/// Created by [`find_cycles`]. Each call to [`Iterator::next`] advances the
/// traversal until the next back edge.
#[derive(Debug)]
pub struct Cycles<'g> {
    graph: &'g CategoryGraph,
    roots: Vec<CategoryId>,
    next_root: usize,
    stack: Vec<Frame>,
    ctx: TraversalContext,
}

/// Starts a DFS pass over `graph` and returns its cycles as a lazy iterator.
///
/// Uses an explicit work stack, so arbitrarily deep graphs cannot overflow
/// the call stack.
pub fn find_cycles(graph: &CategoryGraph) -> Cycles<'_> {
    Cycles {
        graph,
        roots: graph.parents().collect(),
        next_root: 0,
        stack: Vec::new(),
        ctx: TraversalContext::default(),
    }
}

impl Cycles<'_> {
    /// Returns the traversal state accumulated so far.
    pub fn context(&self) -> &TraversalContext {
        &self.ctx
    }

    fn next_unvisited_root(&mut self) -> Option<CategoryId> {
        while let Some(&root) = self.roots.get(self.next_root) {
            self.next_root += 1;
            if !self.ctx.is_visited(root) {
                return Some(root);
            }
        }
        None
    }

    fn push(&mut self, category: CategoryId) {
        self.ctx.enter(category);
        self.stack.push(Frame {
            category,
            successors: self.graph.successors(category).collect(),
            next: 0,
        });
    }
}

impl Iterator for Cycles<'_> {
    type Item = Cycle;

    fn next(&mut self) -> Option<Cycle> {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                let root = self.next_unvisited_root()?;
                self.push(root);
                continue;
            };

            let v = frame.category;
            match frame.successors.get(frame.next).copied() {
                None => {
                    self.stack.pop();
                    self.ctx.leave(v);
                }
                Some(i) => {
                    frame.next += 1;
                    if !self.ctx.is_visited(i) {
                        self.ctx.tree_edge(v, i);
                        self.push(i);
                    } else if self.ctx.is_on_stack(i) {
                        return Some(self.ctx.trace(v, i));
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Recursive traversal
// ---------------------------------------------------------------------------

/// Runs the DFS pass using call recursion, handing each cycle to `on_cycle`
/// as soon as it is found.
///
/// Recursion depth equals the longest tree path explored; prefer
/// [`find_cycles`] for graphs of unknown depth.
///
/// # Errors
///
/// Stops at and returns the first error produced by `on_cycle`.
pub fn visit_cycles_recursive<E, F>(graph: &CategoryGraph, mut on_cycle: F) -> Result<(), E>
where
    F: FnMut(Cycle) -> Result<(), E>,
{
    let mut ctx = TraversalContext::default();
    for root in graph.parents() {
        if !ctx.is_visited(root) {
            dfs(graph, root, &mut ctx, &mut on_cycle)?;
        }
    }
    Ok(())
}

fn dfs<E, F>(
    graph: &CategoryGraph,
    v: CategoryId,
    ctx: &mut TraversalContext,
    on_cycle: &mut F,
) -> Result<(), E>
where
    F: FnMut(Cycle) -> Result<(), E>,
{
    ctx.enter(v);
    for i in graph.successors(v) {
        if !ctx.is_visited(i) {
            ctx.tree_edge(v, i);
            dfs(graph, i, ctx, on_cycle)?;
        } else if ctx.is_on_stack(i) {
            on_cycle(ctx.trace(v, i))?;
        }
    }
    ctx.leave(v);
    Ok(())
}

// ---------------------------------------------------------------------------
// Strategy selection
// ---------------------------------------------------------------------------

/// How the DFS pass keeps track of its path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DfsStrategy {
    /// Explicit heap-allocated frame stack.
    #[default]
    Iterative,
    /// Native call recursion.
    Recursive,
}

/// Runs one DFS pass with the chosen strategy, handing each cycle to
/// `on_cycle` in discovery order.
///
/// # Errors
///
/// Stops at and returns the first error produced by `on_cycle`.
pub fn detect_cycles<E, F>(
    graph: &CategoryGraph,
    strategy: DfsStrategy,
    mut on_cycle: F,
) -> Result<(), E>
where
    F: FnMut(Cycle) -> Result<(), E>,
{
    match strategy {
        DfsStrategy::Iterative => find_cycles(graph).try_for_each(on_cycle),
        DfsStrategy::Recursive => visit_cycles_recursive(graph, &mut on_cycle),
    }
}
