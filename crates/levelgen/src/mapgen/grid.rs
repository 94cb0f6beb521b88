//! Flat row-major tile storage shared by every stamping pass.

use crate::types::{Pos, Rect, RoomElement, RoomType, Tile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Every cell starts as open space with both markers cleared.
    pub(crate) fn empty(width: usize, height: usize) -> Self {
        let tiles = (0..width * height)
            .map(|index| Tile::space(Pos { y: (index / width) as i32, x: (index % width) as i32 }))
            .collect();
        Self { width, height, tiles }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn bounds(&self) -> Rect {
        Rect::new(Pos::ZERO, Pos { y: self.height as i32 - 1, x: self.width as i32 - 1 })
    }

    pub(crate) fn contains(&self, pos: Pos) -> bool {
        self.bounds().contains(pos)
    }

    pub(crate) fn index_of(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "({}, {}) is outside the level", pos.x, pos.y);
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    pub(crate) fn tile(&self, pos: Pos) -> &Tile {
        &self.tiles[self.index_of(pos)]
    }

    pub(crate) fn tile_mut(&mut self, pos: Pos) -> &mut Tile {
        let index = self.index_of(pos);
        &mut self.tiles[index]
    }

    /// Overwrites geometry and type. The graph-node marker is sticky: once a
    /// stage flags a cell it stays flagged.
    pub(crate) fn paint(&mut self, pos: Pos, element: RoomElement, room_type: RoomType, node: bool) {
        let tile = self.tile_mut(pos);
        tile.element = element;
        tile.room_type = room_type;
        tile.is_graph_node |= node;
    }

    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub(crate) fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }
}
