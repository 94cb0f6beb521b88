//! Spanning-forest corridor selection over the extracted edge list, plus
//! rasterizing a single corridor strip into the grid.

use std::collections::BTreeMap;

use crate::config::GenerationConfig;
use crate::random::RandomSource;
use crate::types::{Edge, Pos, RoomElement, RoomType};

use super::dsu::DisjointSet;
use super::grid::TileGrid;
use super::model::GenerationStats;

/// Walks the edges in order. An edge that joins two components is always
/// carved; one that closes a cycle is carved with the extra-connection
/// probability.
pub(super) fn carve_corridors(
    grid: &mut TileGrid,
    edges: &[Edge],
    config: &GenerationConfig,
    rng: &mut impl RandomSource,
    stats: &mut GenerationStats,
) {
    let indices = dense_indices(edges);
    let mut components = DisjointSet::new(indices.len());
    let extra_probability = config.extra_connection_probability();

    for edge in edges {
        let a = indices[&edge.a];
        let b = indices[&edge.b];
        if components.union(a, b) {
            stats.spanning_corridors += 1;
        } else if rng.next_f32() < extra_probability {
            stats.extra_corridors += 1;
        } else {
            continue;
        }
        let width = rng.range_i32(config.corridor_width.min, config.corridor_width.max);
        carve_corridor(grid, *edge, width);
    }
}

/// Numbers endpoints in order of first appearance.
fn dense_indices(edges: &[Edge]) -> BTreeMap<Pos, usize> {
    let mut indices = BTreeMap::new();
    for edge in edges {
        for pos in [edge.a, edge.b] {
            let next = indices.len();
            indices.entry(pos).or_insert(next);
        }
    }
    indices
}

/// Paints an axis-aligned strip from `edge.a` to `edge.b`, extended by
/// `width / 2` past both ends so it overlaps whatever sits at the endpoints.
pub(super) fn carve_corridor(grid: &mut TileGrid, edge: Edge, width: i32) {
    let Edge { a, b } = edge;
    let mut direction = Pos { y: 1, x: 1 };
    if a.x == b.x {
        direction.x = 0;
    } else {
        direction.y = 0;
    }
    if a.y > b.y {
        direction.y = -direction.y;
    }
    if a.x > b.x {
        direction.x = -direction.x;
    }
    let across = Pos { y: direction.x, x: -direction.y };

    let span = if direction.x == 0 { a.y.abs_diff(b.y) } else { a.x.abs_diff(b.x) };
    let length = span as i32 + width;
    let half = width / 2;
    let start = a - direction * half;

    for step in 0..length {
        let center = start + direction * step;
        for offset in -half..=half {
            let pos = center + across * offset;
            grid.paint(pos, RoomElement::FLOOR, RoomType::Corridor, pos == a || pos == b);
        }
    }
}
