use super::definition::FormEdge;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::VecDeque;

/// Reverse adjacency of an edge list: node id -> ids of the nodes feeding it.
///
/// Sources are kept in edge-list order with parallel edges collapsed, so the
/// traversal results are deterministic for a given edge list.
pub struct UpstreamIndex<'a> {
    parents: AHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> UpstreamIndex<'a> {
    pub fn new(edges: &'a [FormEdge]) -> Self {
        let mut parents: AHashMap<&'a str, Vec<&'a str>> = AHashMap::new();
        for edge in edges {
            let entry = parents.entry(edge.target.as_str()).or_default();
            if !entry.contains(&edge.source.as_str()) {
                entry.push(edge.source.as_str());
            }
        }
        Self { parents }
    }

    /// Nodes with an edge directly into `node_id`.
    pub fn direct(&self, node_id: &str) -> &[&'a str] {
        self.parents.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every node with a path into `node_id`, in breadth-first discovery order.
    ///
    /// The visited set makes the walk terminate on cyclic edge sets; every
    /// member of a cycle through `node_id` ends up in the result exactly once,
    /// `node_id` included.
    pub fn transitive(&self, node_id: &str) -> Vec<&'a str> {
        let mut visited: AHashSet<&'a str> = AHashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<&'a str> = VecDeque::new();

        for &parent in self.direct(node_id) {
            if visited.insert(parent) {
                order.push(parent);
                queue.push_back(parent);
            }
        }

        while let Some(current) = queue.pop_front() {
            for &parent in self.direct(current) {
                if visited.insert(parent) {
                    order.push(parent);
                    queue.push_back(parent);
                }
            }
        }
        order
    }
}

/// Ids of all nodes with a direct edge into `node_id`. O(E).
pub fn upstream_of<'a>(node_id: &str, edges: &'a [FormEdge]) -> Vec<&'a str> {
    edges
        .iter()
        .filter(|e| e.target == node_id)
        .map(|e| e.source.as_str())
        .unique()
        .collect()
}

/// Ids of all nodes with a path into `node_id`. O(N + E).
pub fn transitive_upstream_of<'a>(node_id: &str, edges: &'a [FormEdge]) -> Vec<&'a str> {
    UpstreamIndex::new(edges).transitive(node_id)
}
