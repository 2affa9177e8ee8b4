//! Edmonds' blossom algorithm for maximum-cardinality matching on general graphs.
//!
//! Grows an alternating BFS tree from every exposed vertex. An edge between two
//! even vertices of the same tree closes an odd cycle, which is contracted by
//! pointing every vertex of the cycle at the cycle's base. `O(V^3)`.

use super::{Graph, NIL};
use std::collections::VecDeque;

/// Size of a maximum matching in `graph`
#[must_use]
pub fn maximum_matching(graph: &Graph) -> usize {
    let mut state = Blossom::new(graph);
    state.greedy_init();
    for root in 0..graph.vertex_count() {
        if state.mate[root] == NIL {
            if let Some(end) = state.find_augmenting_path(root) {
                state.augment(end);
            }
        }
    }
    state.mate.iter().filter(|&&m| m != NIL).count() / 2
}

struct Blossom<'a> {
    graph: &'a Graph,
    mate: Vec<usize>,
    parent: Vec<usize>,
    base: Vec<usize>,
    in_tree: Vec<bool>,
    in_blossom: Vec<bool>,
    queue: VecDeque<usize>,
}

impl<'a> Blossom<'a> {
    fn new(graph: &'a Graph) -> Self {
        let n = graph.vertex_count();
        Self {
            graph,
            mate: vec![NIL; n],
            parent: vec![NIL; n],
            base: (0..n).collect(),
            in_tree: vec![false; n],
            in_blossom: vec![false; n],
            queue: VecDeque::new(),
        }
    }

    /// Seed with a maximal matching so fewer searches start from scratch
    fn greedy_init(&mut self) {
        for v in 0..self.graph.vertex_count() {
            if self.mate[v] != NIL {
                continue;
            }
            if let Some(&u) = self
                .graph
                .neighbours(v)
                .iter()
                .find(|&&u| self.mate[u] == NIL)
            {
                self.mate[v] = u;
                self.mate[u] = v;
            }
        }
    }

    /// Lowest common ancestor of two even vertices, in terms of blossom bases
    fn lca(&self, a: usize, b: usize) -> usize {
        let mut seen = vec![false; self.mate.len()];
        let mut a = a;
        loop {
            a = self.base[a];
            seen[a] = true;
            if self.mate[a] == NIL {
                break;
            }
            a = self.parent[self.mate[a]];
        }
        let mut b = b;
        loop {
            b = self.base[b];
            if seen[b] {
                return b;
            }
            b = self.parent[self.mate[b]];
        }
    }

    fn mark_path(&mut self, mut v: usize, blossom_base: usize, mut child: usize) {
        while self.base[v] != blossom_base {
            let m = self.mate[v];
            self.in_blossom[self.base[v]] = true;
            self.in_blossom[self.base[m]] = true;
            self.parent[v] = child;
            child = m;
            v = self.parent[m];
        }
    }

    fn find_augmenting_path(&mut self, root: usize) -> Option<usize> {
        let n = self.mate.len();
        self.in_tree.iter_mut().for_each(|x| *x = false);
        self.parent.iter_mut().for_each(|p| *p = NIL);
        for (i, b) in self.base.iter_mut().enumerate() {
            *b = i;
        }
        self.queue.clear();

        self.in_tree[root] = true;
        self.queue.push_back(root);

        let graph = self.graph;
        while let Some(v) = self.queue.pop_front() {
            for &to in graph.neighbours(v) {
                if self.base[v] == self.base[to] || self.mate[v] == to {
                    continue;
                }
                let odd_cycle =
                    to == root || (self.mate[to] != NIL && self.parent[self.mate[to]] != NIL);
                if odd_cycle {
                    let current_base = self.lca(v, to);
                    self.in_blossom.iter_mut().for_each(|x| *x = false);
                    self.mark_path(v, current_base, to);
                    self.mark_path(to, current_base, v);
                    for i in 0..n {
                        if self.in_blossom[self.base[i]] {
                            self.base[i] = current_base;
                            if !self.in_tree[i] {
                                self.in_tree[i] = true;
                                self.queue.push_back(i);
                            }
                        }
                    }
                } else if self.parent[to] == NIL {
                    self.parent[to] = v;
                    if self.mate[to] == NIL {
                        return Some(to);
                    }
                    let next = self.mate[to];
                    self.in_tree[next] = true;
                    self.queue.push_back(next);
                }
            }
        }
        None
    }

    /// Flip matched and unmatched edges along the path ending at `end`
    fn augment(&mut self, end: usize) {
        let mut v = end;
        while v != NIL {
            let pv = self.parent[v];
            let ppv = self.mate[pv];
            self.mate[v] = pv;
            self.mate[pv] = v;
            v = ppv;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new(n);
        for &(a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(maximum_matching(&Graph::new(0)), 0);
        assert_eq!(maximum_matching(&Graph::new(5)), 0);
    }

    #[test]
    fn test_single_edge() {
        assert_eq!(maximum_matching(&graph(2, &[(0, 1)])), 1);
    }

    #[test]
    fn test_triangle() {
        assert_eq!(maximum_matching(&graph(3, &[(0, 1), (1, 2), (2, 0)])), 1);
    }

    /// Odd cycle with a pendant: needs blossom contraction to find the perfect matching
    #[test]
    fn test_blossom_with_stem() {
        // 5-cycle 0-1-2-3-4-0, pendant 5 on 0, pendant 6 on 2... 7 vertices, max 3
        let g = graph(
            7,
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 5), (2, 6)],
        );
        assert_eq!(maximum_matching(&g), 3);
    }

    #[test]
    fn test_petersen_graph_is_perfect() {
        let outer: Vec<(usize, usize)> = (0..5).map(|i| (i, (i + 1) % 5)).collect();
        let spokes: Vec<(usize, usize)> = (0..5).map(|i| (i, i + 5)).collect();
        let inner: Vec<(usize, usize)> = (0..5).map(|i| (5 + i, 5 + (i + 2) % 5)).collect();
        let edges: Vec<_> = outer.into_iter().chain(spokes).chain(inner).collect();
        assert_eq!(maximum_matching(&graph(10, &edges)), 5);
    }

    #[test]
    fn test_path_graph() {
        let edges: Vec<(usize, usize)> = (0..6).map(|i| (i, i + 1)).collect();
        assert_eq!(maximum_matching(&graph(7, &edges)), 3);
    }
}
