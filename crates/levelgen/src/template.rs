//! Room footprint stamped at every surviving room node.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::types::{Pos, RoomElement, RoomType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTile {
    pub offset: Pos,
    pub element: RoomElement,
    pub room_type: RoomType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTemplate {
    width: i32,
    height: i32,
    tiles: Vec<TemplateTile>,
}

impl RoomTemplate {
    pub fn new(width: i32, height: i32, tiles: Vec<TemplateTile>) -> Result<Self, GenerationError> {
        let template = Self { width, height, tiles };
        template.validate()?;
        Ok(template)
    }

    /// All-floor rectangle of room tiles.
    pub fn solid(width: i32, height: i32) -> Self {
        let mut tiles = Vec::with_capacity((width.max(0) * height.max(0)) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(TemplateTile {
                    offset: Pos { y, x },
                    element: RoomElement::FLOOR,
                    room_type: RoomType::Room,
                });
            }
        }
        Self { width, height, tiles }
    }

    /// Checks a template that came from outside, e.g. deserialized from disk.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.width < 1 || self.height < 1 {
            return Err(GenerationError::EmptyTemplate { width: self.width, height: self.height });
        }
        for tile in &self.tiles {
            let offset = tile.offset;
            if offset.x < 0 || offset.y < 0 || offset.x >= self.width || offset.y >= self.height {
                return Err(GenerationError::TemplateTileOutOfBounds {
                    offset,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tiles(&self) -> &[TemplateTile] {
        &self.tiles
    }

    /// Offset from a room node to the template's local origin.
    pub(crate) fn anchor_offset(&self) -> Pos {
        Pos { y: -(self.height / 2), x: -(self.width / 2) }
    }
}

impl Default for RoomTemplate {
    fn default() -> Self {
        Self::solid(7, 7)
    }
}
