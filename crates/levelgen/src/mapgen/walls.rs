//! Wall flags on open space bordering floor.

use crate::types::{CARDINALS, Pos, RoomElement};

use super::grid::TileGrid;

/// Derives walls against a snapshot of the grid as it was before the pass.
pub(super) fn derive_walls(grid: &mut TileGrid) -> usize {
    let snapshot = grid.clone();
    apply_walls_from(&snapshot, grid)
}

/// Every space cell of `snapshot` gains one wall bit per floor neighbor and
/// takes that neighbor's room type; the last matching direction wins the
/// type. Returns the number of wall cells written.
pub(super) fn apply_walls_from(snapshot: &TileGrid, target: &mut TileGrid) -> usize {
    let bounds = snapshot.bounds();
    let mut walls = 0;

    for (before, tile) in snapshot.tiles().iter().zip(target.tiles_mut()) {
        if !before.element.is_space() {
            continue;
        }
        let mut touched = false;
        for direction in CARDINALS {
            let neighbor_pos = before.pos + direction;
            if !bounds.contains(neighbor_pos) {
                continue;
            }
            let neighbor = snapshot.tile(neighbor_pos);
            if !neighbor.element.is_floor() {
                continue;
            }
            tile.element |= wall_facing(direction);
            tile.room_type = neighbor.room_type;
            touched = true;
        }
        if touched {
            walls += 1;
        }
    }

    walls
}

/// Wall bit for a space cell whose floor neighbor lies in `direction`.
fn wall_facing(direction: Pos) -> RoomElement {
    match (direction.x, direction.y) {
        (1, 0) => RoomElement::LEFT_WALL,
        (-1, 0) => RoomElement::RIGHT_WALL,
        (0, 1) => RoomElement::BOTTOM_WALL,
        _ => RoomElement::TOP_WALL,
    }
}
