use thiserror::Error;

use crate::types::Pos;

/// Parameter or template problems detected before a run starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),

    #[error("a room slot needs at least two cells, got {0}")]
    InvalidCellsPerRoom(i32),

    #[error("side rooms gap must be at least 2, got {0}")]
    SideRoomsGapTooSmall(i32),

    #[error("corridor width range {min}..{max} is invalid")]
    InvalidCorridorWidth { min: i32, max: i32 },

    #[error("room template size {width}x{height} must be positive")]
    EmptyTemplate { width: i32, height: i32 },

    #[error("template tile at ({}, {}) lies outside the {width}x{height} template", .offset.x, .offset.y)]
    TemplateTileOutOfBounds { offset: Pos, width: i32, height: i32 },

    #[error("room template {width}x{height} does not fit between the room anchor and the level edge")]
    TemplateOutsideLevel { width: i32, height: i32 },

    #[error("corridors up to {width} tiles wide would reach outside the level")]
    CorridorOutsideLevel { width: i32 },
}
