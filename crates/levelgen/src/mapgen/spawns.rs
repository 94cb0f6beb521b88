//! Spawn point selection over graph-node tiles.

use crate::types::RoomTypeMask;

use super::grid::TileGrid;

pub(super) fn mark_spawn_points(grid: &mut TileGrid, allowed: RoomTypeMask) -> usize {
    let mut marked = 0;
    for tile in grid.tiles_mut() {
        if tile.is_graph_node && tile.room_type.mask().intersects(allowed) {
            tile.is_spawn_point = true;
            marked += 1;
        }
    }
    marked
}
