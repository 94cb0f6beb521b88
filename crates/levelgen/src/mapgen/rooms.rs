//! Stamps room templates and randomly sized halls over the corridor layer.

use crate::random::RandomSource;
use crate::template::RoomTemplate;
use crate::types::{Pos, RoomElement, RoomType};

use super::grid::TileGrid;

/// Copies every template tile verbatim, anchored so the template center lands
/// on the room node.
pub(super) fn stamp_rooms(grid: &mut TileGrid, template: &RoomTemplate, room_centers: &[Pos]) {
    let anchor_offset = template.anchor_offset();
    for &center in room_centers {
        let origin = center + anchor_offset;
        for tile in template.tiles() {
            let pos = origin + tile.offset;
            grid.paint(pos, tile.element, tile.room_type, pos == center);
        }
    }
}

/// Each hall gets its own footprint in `2c-1..3c-1` per axis, width drawn
/// first.
pub(super) fn stamp_halls(
    grid: &mut TileGrid,
    hall_centers: &[Pos],
    cell_size: i32,
    rng: &mut impl RandomSource,
) {
    for &center in hall_centers {
        let width = rng.range_i32(2 * cell_size - 1, 3 * cell_size - 1);
        let height = rng.range_i32(2 * cell_size - 1, 3 * cell_size - 1);
        let origin = center - Pos { y: height / 2, x: width / 2 };
        for dy in 0..height {
            for dx in 0..width {
                let pos = origin + Pos { y: dy, x: dx };
                grid.paint(pos, RoomElement::FLOOR, RoomType::Hall, pos == center);
            }
        }
    }
}
