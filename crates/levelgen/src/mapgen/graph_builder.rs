//! Connectivity graph construction: inner lattice, perimeter room groups,
//! halls, connectivity-preserving pruning and randomized edge extraction.

use crate::config::GenerationConfig;
use crate::random::RandomSource;
use crate::types::{CARDINALS, Edge, Pos, Rect};

use super::graph::{LayoutGraph, NodeId};
use super::model::GenerationStats;

/// Each extra hall entrance makes the next one less likely by this factor.
const ENTRANCE_DECAY: f32 = 0.75;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GraphPlan {
    pub(crate) edges: Vec<Edge>,
    pub(crate) room_centers: Vec<Pos>,
    pub(crate) hall_centers: Vec<Pos>,
}

pub(crate) struct GraphBuilder<'a> {
    config: &'a GenerationConfig,
    inner_zone: Rect,
    graph: LayoutGraph,
    room_centers: Vec<Pos>,
    hall_centers: Vec<Pos>,
}

impl<'a> GraphBuilder<'a> {
    pub(crate) fn new(config: &'a GenerationConfig, inner_zone: Rect) -> Self {
        Self {
            config,
            inner_zone,
            graph: LayoutGraph::new(),
            room_centers: Vec::with_capacity(config.rooms_count),
            hall_centers: Vec::with_capacity(config.halls_count),
        }
    }

    pub(crate) fn build(
        mut self,
        rng: &mut impl RandomSource,
        stats: &mut GenerationStats,
    ) -> GraphPlan {
        self.build_lattice();
        self.place_side_rooms(rng);
        stats.rooms_placed = self.room_centers.len();

        stats.halls_abandoned = self.place_halls(rng);
        stats.halls_placed = self.hall_centers.len();

        let (target, pruned) = self.prune(rng);
        stats.prune_target = target;
        stats.nodes_pruned = pruned;
        log::debug!(
            "layout graph: {} nodes, {} edges after pruning {pruned}/{target}",
            self.graph.len(),
            self.graph.edge_count()
        );

        let edges = self.extract_edges(rng);
        stats.edges_extracted = edges.len();

        GraphPlan { edges, room_centers: self.room_centers, hall_centers: self.hall_centers }
    }

    /// Grid graph on the `cell_size` lattice, visited in raster order. Each
    /// node links back to the left and lower neighbors already created.
    fn build_lattice(&mut self) {
        let cell = self.config.cell_size;
        let zone = self.inner_zone;
        let step = cell as usize;
        for y in (zone.from.y..=zone.to.y).step_by(step) {
            for x in (zone.from.x..=zone.to.x).step_by(step) {
                let pos = Pos { y, x };
                let id = self.graph.ensure_node(pos);
                for back in [Pos { y, x: x - cell }, Pos { y: y - cell, x }] {
                    if let Some(previous) = self.graph.node_at(back) {
                        self.graph.connect(id, previous);
                    }
                }
            }
        }
    }

    /// Spreads room slots over the four sides; the remainder goes to the
    /// sides visited first, starting from a random direction.
    fn place_side_rooms(&mut self, rng: &mut impl RandomSource) {
        let rooms_per_side = self.config.rooms_count / CARDINALS.len();
        let mut remainder = self.config.rooms_count % CARDINALS.len();
        let start = rng.index(CARDINALS.len());

        for step in 0..CARDINALS.len() {
            let mut count = rooms_per_side;
            if remainder > 0 {
                count += 1;
                remainder -= 1;
            }
            let direction = CARDINALS[(start + step) % CARDINALS.len()];
            self.place_side_row(direction, count, rng);
        }
    }

    fn place_side_row(&mut self, direction: Pos, count: usize, rng: &mut impl RandomSource) {
        let cell = self.config.cell_size;
        let stride = cell * self.config.cells_per_room;
        let zone = self.inner_zone;
        let (along_from, along_to) =
            if direction.x == 0 { (zone.from.x, zone.to.x) } else { (zone.from.y, zone.to.y) };

        let mut along = along_from;
        let mut placed = 0;
        while along <= along_to && placed < count {
            let jitter = rng.range_i32(1, self.config.cells_per_room - 1);
            let shifted = along + jitter * cell;
            let anchor = if direction.x == 0 {
                let y = if direction.y > 0 { zone.to.y + cell } else { zone.from.y - cell };
                Pos { y, x: shifted }
            } else {
                let x = if direction.x > 0 { zone.to.x + cell } else { zone.from.x - cell };
                Pos { y: shifted, x }
            };
            self.add_side_group(direction, anchor);
            placed += 1;
            along += stride;
        }
    }

    /// Connector just outside the inner zone, wired to the lattice node one
    /// step inward and to the room node further out.
    fn add_side_group(&mut self, direction: Pos, anchor: Pos) {
        let gap = self.config.side_rooms_gap;
        let corridor_pos = anchor - direction * self.config.cell_size;
        let room_pos = anchor + Pos { y: direction.y * gap / 2, x: direction.x * gap / 2 };

        let connector = self.graph.ensure_node(anchor);
        let corridor = self.graph.ensure_node(corridor_pos);
        let room = self.graph.ensure_node(room_pos);
        self.graph.connect(connector, corridor);
        self.graph.connect(connector, room);
        self.graph.pin(connector);
        self.graph.pin(room);
        self.room_centers.push(room_pos);
    }

    /// Returns how many halls were carved out but could not be connected.
    fn place_halls(&mut self, rng: &mut impl RandomSource) -> usize {
        if self.config.halls_count == 0 {
            return 0;
        }

        let zone = self.inner_zone.shrunk(2 * self.config.cell_size);
        let mut candidates: Vec<Pos> =
            self.graph.positions().into_iter().filter(|&pos| zone.contains(pos)).collect();
        let mut abandoned = 0;

        while !candidates.is_empty() && self.hall_centers.len() < self.config.halls_count {
            let index = rng.index(candidates.len());
            let center = candidates.swap_remove(index);
            let Some(block) = self.free_block(center) else {
                continue;
            };

            let cleared: Vec<Pos> = block.iter().map(|&id| self.graph.pos(id)).collect();
            for id in block {
                self.graph.remove_node(id);
            }
            candidates.retain(|pos| !cleared.contains(pos));

            if !self.connect_hall(center, rng) {
                abandoned += 1;
            }
        }

        abandoned
    }

    /// The 3x3 lattice block around `center`. Rejected when a node is
    /// missing or pinned, or when clearing it would split the graph; pinned
    /// nodes include the entrances of halls placed earlier.
    fn free_block(&self, center: Pos) -> Option<Vec<NodeId>> {
        let cell = self.config.cell_size;
        let mut block = Vec::with_capacity(9);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let id = self.graph.node_at(center + Pos { y: dy * cell, x: dx * cell })?;
                if self.graph.is_pinned(id) {
                    return None;
                }
                block.push(id);
            }
        }
        self.graph.is_connected_without_all(&block).then_some(block)
    }

    fn connect_hall(&mut self, center: Pos, rng: &mut impl RandomSource) -> bool {
        let hall = self.graph.ensure_node(center);
        let reach = 2 * self.config.cell_size;
        let start = rng.index(CARDINALS.len());
        let mut entrance_chance = self.config.hall_entrance_probability();
        let mut connected = false;

        for step in 0..CARDINALS.len() {
            let direction = CARDINALS[(start + step) % CARDINALS.len()];
            let Some(neighbor) = self.graph.node_at(center + direction * reach) else {
                continue;
            };

            self.graph.connect(hall, neighbor);
            self.graph.pin(hall);
            self.graph.pin(neighbor);
            connected = true;

            if rng.next_f32() < entrance_chance {
                entrance_chance *= ENTRANCE_DECAY;
                continue;
            }
            break;
        }

        if !connected {
            self.graph.remove_node(hall);
            log::warn!("cannot connect hall at ({}, {}) to the layout graph", center.x, center.y);
            return false;
        }
        self.hall_centers.push(center);
        true
    }

    /// Removes up to the configured share of nodes without disconnecting the
    /// graph. Returns `(target, removed)`.
    fn prune(&mut self, rng: &mut impl RandomSource) -> (usize, usize) {
        let removable = self
            .graph
            .len()
            .saturating_sub(self.room_centers.len() + self.hall_centers.len());
        let target = (removable as f64 * f64::from(self.config.node_removal_fraction())) as usize;

        let mut remaining = target;
        while remaining > 0 {
            let removed = self.prune_pass(remaining, rng);
            if removed == 0 {
                log::debug!("pruning stopped with {remaining} of {target} nodes left to remove");
                break;
            }
            remaining -= removed;
        }
        (target, target - remaining)
    }

    fn prune_pass(&mut self, target: usize, rng: &mut impl RandomSource) -> usize {
        let mut candidates: Vec<NodeId> =
            self.graph.node_ids().into_iter().filter(|&id| !self.graph.is_pinned(id)).collect();

        let mut removed = 0;
        while removed < target && !candidates.is_empty() {
            let index = rng.index(candidates.len());
            let id = candidates.swap_remove(index);
            if self.graph.is_connected_without(id) {
                self.graph.remove_node(id);
                removed += 1;
            }
        }
        removed
    }

    /// Drains the graph into an edge list in random order. Every edge comes
    /// out exactly once; nodes leave the graph once they have no edges left.
    fn extract_edges(&mut self, rng: &mut impl RandomSource) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.graph.edge_count());
        let mut pending = self.graph.node_ids();

        while !pending.is_empty() {
            let index = rng.index(pending.len());
            let id = pending[index];
            let degree = self.graph.neighbors(id).len();
            if degree > 0 {
                let neighbor_index = rng.index(degree);
                let (a, b) = self.graph.take_edge(id, neighbor_index);
                edges.push(Edge::new(a, b));
            } else {
                pending.swap_remove(index);
                self.graph.remove_node(id);
            }
        }

        debug_assert!(self.graph.is_empty());
        edges
    }
}
