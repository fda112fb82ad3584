//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of the graph topology for algorithm execution.

use std::collections::HashMap;
use std::hash::Hash;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Vertex keys of any hashable type are mapped to dense indices (0..N) so
/// iterative algorithms can work on flat vectors instead of hash maps.
#[derive(Debug, Clone)]
pub struct GraphView<K> {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to the vertex key
    pub index_to_node: Vec<K>,
    /// Mapping from vertex key to dense index
    pub node_to_index: HashMap<K, usize>,

    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Edges dropped because an endpoint is not a known vertex
    pub dangling_edges: usize,
}

impl<K: Clone + Eq + Hash> GraphView<K> {
    /// Build a view from a vertex key sequence and a `(src, dst)` edge sequence.
    ///
    /// Repeated vertex keys keep their first index. Edges whose source or
    /// destination is unknown are skipped and counted in `dangling_edges`.
    /// Neighbour lists preserve edge input order.
    pub fn from_edges<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = K>,
        E: IntoIterator<Item = (K, K)>,
    {
        let mut index_to_node = Vec::new();
        let mut node_to_index = HashMap::new();
        for key in nodes {
            if node_to_index.contains_key(&key) {
                continue;
            }
            node_to_index.insert(key.clone(), index_to_node.len());
            index_to_node.push(key);
        }
        let node_count = index_to_node.len();

        let mut pairs = Vec::new();
        let mut dangling_edges = 0;
        for (src, dst) in edges {
            match (node_to_index.get(&src), node_to_index.get(&dst)) {
                (Some(&u), Some(&v)) => pairs.push((u, v)),
                _ => dangling_edges += 1,
            }
        }

        let (out_offsets, out_targets) = compress(node_count, pairs.iter().copied());
        let (in_offsets, in_sources) = compress(node_count, pairs.iter().map(|&(u, v)| (v, u)));

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            dangling_edges,
        }
    }

    /// Dense index of a vertex key
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.node_to_index.get(key).copied()
    }
}

impl<K> GraphView<K> {
    /// Number of edges with both endpoints in the view
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out_targets[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.in_sources[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }
}

/// Counting-sort `(row, col)` pairs into CSR offsets and a flat column array.
/// Pairs sharing a row keep their input order.
fn compress<I>(node_count: usize, pairs: I) -> (Vec<usize>, Vec<usize>)
where
    I: Iterator<Item = (usize, usize)> + Clone,
{
    let mut offsets = vec![0usize; node_count + 1];
    for (row, _) in pairs.clone() {
        offsets[row + 1] += 1;
    }
    for i in 0..node_count {
        offsets[i + 1] += offsets[i];
    }

    let mut cursor = offsets.clone();
    let mut targets = vec![0usize; offsets[node_count]];
    for (row, col) in pairs {
        targets[cursor[row]] = col;
        cursor[row] += 1;
    }

    (offsets, targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_view_projection() {
        // 1 -> 2 -> 3, 1 -> 3
        let view = GraphView::from_edges(vec![1u64, 2, 3], vec![(1, 2), (2, 3), (1, 3)]);

        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);

        let n1 = view.index_of(&1).unwrap();
        let n2 = view.index_of(&2).unwrap();
        let n3 = view.index_of(&3).unwrap();

        assert_eq!(view.successors(n1), &[n2, n3]);
        assert_eq!(view.predecessors(n3), &[n2, n1]);
        assert_eq!(view.out_degree(n1), 2);
        assert_eq!(view.in_degree(n2), 1);
        assert_eq!(view.out_degree(n3), 0);
    }

    #[test]
    fn test_dangling_edges_are_skipped() {
        let view = GraphView::from_edges(vec!["a", "b"], vec![("a", "b"), ("a", "z"), ("y", "b")]);

        assert_eq!(view.edge_count(), 1);
        assert_eq!(view.dangling_edges, 2);
    }

    #[test]
    fn test_repeated_keys_keep_first_index() {
        let view = GraphView::from_edges(vec![7u64, 8, 7], Vec::new());

        assert_eq!(view.node_count, 2);
        assert_eq!(view.index_of(&7), Some(0));
        assert_eq!(view.index_of(&8), Some(1));
    }

    #[test]
    fn test_empty_view() {
        let view: GraphView<u64> = GraphView::from_edges(Vec::new(), Vec::new());
        assert_eq!(view.node_count, 0);
        assert_eq!(view.out_offsets, vec![0]);
    }
}
