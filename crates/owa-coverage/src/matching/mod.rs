//! Maximum-cardinality matching.
//!
//! Two algorithms that must agree on every bipartite input:
//!
//! - [`blossom`]: Edmonds' blossom algorithm on an arbitrary undirected graph
//! - [`hopcroft_karp`]: Hopcroft-Karp, bipartite graphs only, `O(E √V)`

pub mod blossom;
pub mod hopcroft_karp;

pub use blossom::maximum_matching;
pub use hopcroft_karp::maximum_bipartite_matching;

/// Marker for an unmatched vertex
pub(crate) const NIL: usize = usize::MAX;

/// Undirected graph as adjacency lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adj: Vec<Vec<usize>>,
}

impl Graph {
    /// Graph with `n` isolated vertices
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
        }
    }

    /// Add the undirected edge `{a, b}`; self-loops are ignored
    pub fn add_edge(&mut self, a: usize, b: usize) {
        if a != b {
            self.adj[a].push(b);
            self.adj[b].push(a);
        }
    }

    /// Number of vertices
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Neighbours of `v`
    #[must_use]
    pub fn neighbours(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }
}

/// Bipartite graph with edges from the left to the right partition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BipartiteGraph {
    left: Vec<Vec<usize>>,
    right_count: usize,
}

impl BipartiteGraph {
    /// Graph with the given partition sizes and no edges
    #[must_use]
    pub fn new(left_count: usize, right_count: usize) -> Self {
        Self {
            left: vec![Vec::new(); left_count],
            right_count,
        }
    }

    /// Add the edge `left -> right`
    pub fn add_edge(&mut self, left: usize, right: usize) {
        debug_assert!(right < self.right_count);
        self.left[left].push(right);
    }

    /// Size of the left partition
    #[must_use]
    pub fn left_count(&self) -> usize {
        self.left.len()
    }

    /// Size of the right partition
    #[must_use]
    pub fn right_count(&self) -> usize {
        self.right_count
    }

    /// Total number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.left.iter().map(Vec::len).sum()
    }

    /// Right neighbours of a left vertex
    #[must_use]
    pub fn neighbours(&self, left: usize) -> &[usize] {
        &self.left[left]
    }

    /// The same graph with right vertices numbered after the left ones
    #[must_use]
    pub fn to_general(&self) -> Graph {
        let offset = self.left.len();
        let mut graph = Graph::new(offset + self.right_count);
        for (l, rights) in self.left.iter().enumerate() {
            for &r in rights {
                graph.add_edge(l, offset + r);
            }
        }
        graph
    }
}
