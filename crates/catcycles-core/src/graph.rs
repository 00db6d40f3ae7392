/// Adjacency structure for the category graph.
///
/// Wraps a `petgraph` [`DiGraphMap`] keyed directly by category id. Each
/// [`Edge`] `(child, parent)` becomes the directed link `parent → child`.
///
/// # Ordering
///
/// `GraphMap` is backed by insertion-ordered maps, so [`CategoryGraph::parents`]
/// yields categories in order of first appearance and
/// [`CategoryGraph::successors`] yields subcategories in the order their links
/// were first inserted. Cycle detection inherits this order, which makes its
/// output reproducible across runs and platforms.
///
/// # Duplicates and self-loops
///
/// Inserting the same link twice is a no-op. A category listed as its own
/// subcategory is stored as a self-loop and later reported as a one-node
/// cycle.
use petgraph::graphmap::DiGraphMap;

use crate::reader::Edge;

/// Identifier of a category node.
pub type CategoryId = i64;

/// Directed graph of category → subcategory links.
///
/// Construct with [`CategoryGraph::from_edges`] or by collecting an iterator
/// of [`Edge`] values.
#[derive(Debug, Clone, Default)]
pub struct CategoryGraph {
    graph: DiGraphMap<CategoryId, ()>,
}

impl CategoryGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(child, parent)` pairs.
    ///
    /// Construction is O(E). Repeated pairs collapse into a single link.
    pub fn from_edges(edges: &[Edge]) -> Self {
        edges.iter().copied().collect()
    }

    /// Inserts the link `edge.parent → edge.child`.
    ///
    /// Returns `true` if the link was not already present.
    pub fn insert(&mut self, edge: Edge) -> bool {
        self.graph.add_edge(edge.parent, edge.child, ()).is_none()
    }

    /// Returns the number of distinct categories, including those that only
    /// ever appear as subcategories.
    pub fn category_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of distinct links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph has no categories.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns `true` if `id` appears anywhere in the graph.
    pub fn contains_category(&self, id: CategoryId) -> bool {
        self.graph.contains_node(id)
    }

    /// Returns `true` if `child` is filed directly under `parent`.
    pub fn contains_link(&self, parent: CategoryId, child: CategoryId) -> bool {
        self.graph.contains_edge(parent, child)
    }

    /// Returns the direct subcategories of `id` in insertion order.
    ///
    /// Unknown ids have no successors.
    pub fn successors(&self, id: CategoryId) -> impl Iterator<Item = CategoryId> + '_ {
        self.graph.neighbors(id)
    }

    /// Returns every category with at least one subcategory, in order of
    /// first appearance. These are the candidate roots for traversal.
    pub fn parents(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.graph
            .nodes()
            .filter(|&id| self.graph.neighbors(id).next().is_some())
    }

    /// Returns the number of categories listed as their own subcategory.
    pub fn self_loop_count(&self) -> usize {
        self.graph
            .nodes()
            .filter(|&id| self.graph.contains_edge(id, id))
            .count()
    }
}

impl FromIterator<Edge> for CategoryGraph {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut graph = CategoryGraph::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Edge> for CategoryGraph {
    fn extend<I: IntoIterator<Item = Edge>>(&mut self, iter: I) {
        for edge in iter {
            self.insert(edge);
        }
    }
}
