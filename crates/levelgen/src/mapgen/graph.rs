//! Undirected node graph over lattice and anchor coordinates.
//!
//! Nodes live in an arena keyed by `NodeId`; neighbor lists hold ids, and a
//! coordinate lookup maps positions back to ids. Every mutation keeps the
//! adjacency symmetric.

use std::collections::{BTreeMap, HashSet, VecDeque};

use slotmap::{SlotMap, new_key_type};

use crate::types::Pos;

new_key_type! {
    pub(crate) struct NodeId;
}

#[derive(Clone, Debug)]
struct GraphNode {
    pos: Pos,
    neighbors: Vec<NodeId>,
    pinned: bool,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct LayoutGraph {
    nodes: SlotMap<NodeId, GraphNode>,
    lookup: BTreeMap<Pos, NodeId>,
}

impl LayoutGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node_at(&self, pos: Pos) -> Option<NodeId> {
        self.lookup.get(&pos).copied()
    }

    pub(crate) fn contains(&self, pos: Pos) -> bool {
        self.lookup.contains_key(&pos)
    }

    /// Returns the node at `pos`, creating an isolated one if needed.
    pub(crate) fn ensure_node(&mut self, pos: Pos) -> NodeId {
        if let Some(id) = self.node_at(pos) {
            return id;
        }
        let id = self.nodes.insert(GraphNode { pos, neighbors: Vec::with_capacity(4), pinned: false });
        self.lookup.insert(pos, id);
        id
    }

    pub(crate) fn pos(&self, id: NodeId) -> Pos {
        self.nodes[id].pos
    }

    pub(crate) fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].neighbors
    }

    pub(crate) fn connect(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(a, b, "self loops are not allowed");
        if self.nodes[a].neighbors.contains(&b) {
            return;
        }
        self.nodes[a].neighbors.push(b);
        self.nodes[b].neighbors.push(a);
    }

    /// Pinned nodes are never offered to the pruning pass.
    pub(crate) fn pin(&mut self, id: NodeId) {
        self.nodes[id].pinned = true;
    }

    pub(crate) fn is_pinned(&self, id: NodeId) -> bool {
        self.nodes[id].pinned
    }

    /// Ids in arena order, which only depends on the sequence of mutations.
    pub(crate) fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().collect()
    }

    pub(crate) fn positions(&self) -> Vec<Pos> {
        self.nodes.values().map(|node| node.pos).collect()
    }

    pub(crate) fn remove_node(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        for neighbor in node.neighbors {
            self.unlink(neighbor, id);
        }
        self.lookup.remove(&node.pos);
    }

    /// Detaches the `neighbor_index`-th edge of `id` from both endpoints and
    /// returns its endpoint positions.
    pub(crate) fn take_edge(&mut self, id: NodeId, neighbor_index: usize) -> (Pos, Pos) {
        let neighbor = self.nodes[id].neighbors.swap_remove(neighbor_index);
        self.unlink(neighbor, id);
        (self.nodes[id].pos, self.nodes[neighbor].pos)
    }

    fn unlink(&mut self, from: NodeId, target: NodeId) {
        let neighbors = &mut self.nodes[from].neighbors;
        if let Some(position) = neighbors.iter().position(|&other| other == target) {
            neighbors.swap_remove(position);
        }
    }

    /// Whether every other node stays reachable once `removed` is gone.
    /// A node without neighbors is treated as safe to drop.
    pub(crate) fn is_connected_without(&self, removed: NodeId) -> bool {
        let Some(&start) = self.nodes.get(removed).and_then(|node| node.neighbors.first()) else {
            return true;
        };
        self.reachable_from(start, &[removed]) == self.nodes.len() - 1
    }

    /// Whether the nodes left after dropping every id in `removed` still form
    /// one component. `removed` holds distinct live ids.
    pub(crate) fn is_connected_without_all(&self, removed: &[NodeId]) -> bool {
        let Some(start) = self.nodes.keys().find(|id| !removed.contains(id)) else {
            return true;
        };
        self.reachable_from(start, removed) == self.nodes.len() - removed.len()
    }

    pub(crate) fn is_connected(&self) -> bool {
        match self.nodes.keys().next() {
            None => true,
            Some(start) => self.reachable_from(start, &[]) == self.nodes.len(),
        }
    }

    fn reachable_from(&self, start: NodeId, skipped: &[NodeId]) -> usize {
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for &next in &self.nodes[current].neighbors {
                if !skipped.contains(&next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.neighbors.len()).sum::<usize>() / 2
    }

    #[cfg(test)]
    pub(crate) fn is_symmetric(&self) -> bool {
        self.nodes.iter().all(|(id, node)| {
            node.neighbors.iter().all(|&neighbor| {
                self.nodes.get(neighbor).is_some_and(|other| other.neighbors.contains(&id))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph(length: i32) -> (LayoutGraph, Vec<NodeId>) {
        let mut graph = LayoutGraph::new();
        let ids: Vec<NodeId> = (0..length).map(|x| graph.ensure_node(Pos { y: 0, x })).collect();
        for pair in ids.windows(2) {
            graph.connect(pair[0], pair[1]);
        }
        (graph, ids)
    }

    #[test]
    fn connect_is_symmetric_and_deduplicated() {
        let (mut graph, ids) = path_graph(3);
        graph.connect(ids[1], ids[0]);
        assert_eq!(graph.neighbors(ids[0]), &[ids[1]]);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn removing_a_node_drops_incident_edges() {
        let (mut graph, ids) = path_graph(3);
        graph.remove_node(ids[1]);
        assert_eq!(graph.len(), 2);
        assert!(graph.neighbors(ids[0]).is_empty());
        assert!(graph.neighbors(ids[2]).is_empty());
        assert!(!graph.contains(Pos { y: 0, x: 1 }));
        assert!(graph.is_symmetric());
    }

    #[test]
    fn taking_an_edge_detaches_both_endpoints() {
        let (mut graph, ids) = path_graph(2);
        let (a, b) = graph.take_edge(ids[0], 0);
        assert_eq!((a, b), (Pos { y: 0, x: 0 }, Pos { y: 0, x: 1 }));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn cut_vertex_is_detected() {
        let (graph, ids) = path_graph(4);
        assert!(!graph.is_connected_without(ids[1]));
        assert!(graph.is_connected_without(ids[0]));
        assert!(graph.is_connected_without(ids[3]));
    }

    #[test]
    fn isolated_node_counts_as_removable() {
        let (mut graph, _) = path_graph(3);
        let lonely = graph.ensure_node(Pos { y: 10, x: 10 });
        assert!(!graph.is_connected());
        assert!(graph.is_connected_without(lonely));
    }

    #[test]
    fn removing_a_set_reports_the_split() {
        let (mut graph, ids) = path_graph(5);
        graph.connect(ids[4], ids[0]);
        assert!(graph.is_connected_without_all(&[ids[1]]));
        assert!(!graph.is_connected_without_all(&[ids[1], ids[3]]));
        assert!(graph.is_connected_without_all(&[ids[1], ids[2]]));
        assert!(graph.is_connected_without_all(&ids));
    }

    #[test]
    fn cycle_survives_any_single_removal() {
        let (mut graph, ids) = path_graph(4);
        graph.connect(ids[3], ids[0]);
        assert!(ids.iter().all(|&id| graph.is_connected_without(id)));
    }
}
