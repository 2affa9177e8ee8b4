//! Hopcroft-Karp maximum bipartite matching.
//!
//! Each phase runs a BFS from all free left vertices to layer the graph,
//! then augments along a maximal set of vertex-disjoint shortest paths with
//! DFS. At most `O(√V)` phases.

use super::{BipartiteGraph, NIL};
use std::collections::VecDeque;

const INF: usize = usize::MAX;

/// Size of a maximum matching in the bipartite `graph`
#[must_use]
pub fn maximum_bipartite_matching(graph: &BipartiteGraph) -> usize {
    let mut hk = HopcroftKarp::new(graph);
    let mut matched = 0;
    while hk.layer() {
        for u in 0..graph.left_count() {
            if hk.match_left[u] == NIL && hk.augment(u) {
                matched += 1;
            }
        }
    }
    matched
}

struct HopcroftKarp<'a> {
    graph: &'a BipartiteGraph,
    match_left: Vec<usize>,
    match_right: Vec<usize>,
    dist: Vec<usize>,
    /// Next neighbour to try per left vertex in the current phase
    cursor: Vec<usize>,
}

impl<'a> HopcroftKarp<'a> {
    fn new(graph: &'a BipartiteGraph) -> Self {
        Self {
            graph,
            match_left: vec![NIL; graph.left_count()],
            match_right: vec![NIL; graph.right_count()],
            dist: vec![INF; graph.left_count()],
            cursor: vec![0; graph.left_count()],
        }
    }

    /// BFS layering; true if some free right vertex is reachable
    fn layer(&mut self) -> bool {
        let mut queue = VecDeque::new();
        for u in 0..self.match_left.len() {
            if self.match_left[u] == NIL {
                self.dist[u] = 0;
                queue.push_back(u);
            } else {
                self.dist[u] = INF;
            }
        }
        self.cursor.iter_mut().for_each(|c| *c = 0);

        let mut found = false;
        while let Some(u) = queue.pop_front() {
            for &r in self.graph.neighbours(u) {
                let next = self.match_right[r];
                if next == NIL {
                    found = true;
                } else if self.dist[next] == INF {
                    self.dist[next] = self.dist[u] + 1;
                    queue.push_back(next);
                }
            }
        }
        found
    }

    /// DFS along the layered graph from left vertex `root`.
    ///
    /// Iterative: augmenting paths can be as long as the left partition.
    /// `path[i]` is the left vertex at depth `i` and `via[i]` the right
    /// vertex leading from it to `path[i + 1]`.
    fn augment(&mut self, root: usize) -> bool {
        let graph = self.graph;
        let mut path = vec![root];
        let mut via: Vec<usize> = Vec::new();

        while let Some(&u) = path.last() {
            let neighbours = graph.neighbours(u);
            if self.cursor[u] == neighbours.len() {
                // dead end for the rest of this phase
                self.dist[u] = INF;
                path.pop();
                via.pop();
                continue;
            }
            let r = neighbours[self.cursor[u]];
            self.cursor[u] += 1;
            let next = self.match_right[r];
            if next == NIL {
                via.push(r);
                for (&l, &r) in path.iter().zip(&via) {
                    self.match_left[l] = r;
                    self.match_right[r] = l;
                }
                return true;
            }
            if self.dist[next] == self.dist[u].saturating_add(1) {
                via.push(r);
                path.push(next);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_edges() {
        assert_eq!(maximum_bipartite_matching(&BipartiteGraph::new(3, 3)), 0);
    }

    #[test]
    fn test_empty_partitions() {
        assert_eq!(maximum_bipartite_matching(&BipartiteGraph::new(0, 0)), 0);
        assert_eq!(maximum_bipartite_matching(&BipartiteGraph::new(0, 4)), 0);
    }

    #[test]
    fn test_perfect_matching_on_cycle() {
        // left i -> right i and right (i+1) mod 4
        let mut g = BipartiteGraph::new(4, 4);
        for i in 0..4 {
            g.add_edge(i, i);
            g.add_edge(i, (i + 1) % 4);
        }
        assert_eq!(maximum_bipartite_matching(&g), 4);
    }

    #[test]
    fn test_long_augmenting_path() {
        // l0:{r0}, l1:{r0,r1}, l2:{r1,r2}, l3:{r2,r3}; greedy from l3 down could block
        let mut g = BipartiteGraph::new(4, 4);
        g.add_edge(3, 2);
        g.add_edge(3, 3);
        g.add_edge(2, 1);
        g.add_edge(2, 2);
        g.add_edge(1, 0);
        g.add_edge(1, 1);
        g.add_edge(0, 0);
        assert_eq!(maximum_bipartite_matching(&g), 4);
    }

    /// One augmenting path through every vertex of a 200 000-vertex chain
    #[test]
    fn test_chain_longer_than_any_call_stack() {
        let n = 200_000;
        let mut g = BipartiteGraph::new(n, n);
        for i in 0..n - 1 {
            g.add_edge(i, i + 1);
            g.add_edge(i, i);
        }
        g.add_edge(n - 1, n - 1);
        assert_eq!(maximum_bipartite_matching(&g), n);
    }

    #[test]
    fn test_more_left_than_right() {
        let mut g = BipartiteGraph::new(5, 2);
        for l in 0..5 {
            g.add_edge(l, l % 2);
        }
        assert_eq!(maximum_bipartite_matching(&g), 2);
    }
}
