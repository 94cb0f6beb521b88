//! Generation parameters supplied once per run.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::types::RoomTypeMask;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorWidth {
    pub min: i32,
    /// Exclusive unless equal to `min`.
    pub max: i32,
}

impl CorridorWidth {
    /// Widest corridor a run can actually draw.
    pub fn widest(self) -> i32 {
        if self.max > self.min { self.max - 1 } else { self.min }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub cell_size: i32,
    pub cells_per_room: i32,
    pub side_rooms_gap: i32,
    /// Carried through to the renderer, never used by the pipeline.
    pub level_scale: f32,
    pub rooms_count: usize,
    pub halls_count: usize,
    pub additional_hall_entrance_percent: f32,
    pub corridor_width: CorridorWidth,
    pub extra_connection_percent: f32,
    pub nodes_percent_to_remove: f32,
    pub allowed_spawn_types: RoomTypeMask,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            cell_size: 4,
            cells_per_room: 3,
            side_rooms_gap: 8,
            level_scale: 1.0,
            rooms_count: 8,
            halls_count: 1,
            additional_hall_entrance_percent: 30.0,
            corridor_width: CorridorWidth { min: 3, max: 5 },
            extra_connection_percent: 10.0,
            nodes_percent_to_remove: 40.0,
            allowed_spawn_types: RoomTypeMask::ROOM | RoomTypeMask::HALL,
        }
    }
}

impl GenerationConfig {
    pub fn hall_entrance_probability(&self) -> f32 {
        percent_to_unit(self.additional_hall_entrance_percent)
    }

    pub fn extra_connection_probability(&self) -> f32 {
        percent_to_unit(self.extra_connection_percent)
    }

    pub fn node_removal_fraction(&self) -> f32 {
        percent_to_unit(self.nodes_percent_to_remove)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.cell_size < 1 {
            return Err(GenerationError::InvalidCellSize(self.cell_size));
        }
        if self.cells_per_room < 2 {
            return Err(GenerationError::InvalidCellsPerRoom(self.cells_per_room));
        }
        if self.side_rooms_gap < 2 {
            return Err(GenerationError::SideRoomsGapTooSmall(self.side_rooms_gap));
        }
        let width = self.corridor_width;
        if width.min < 1 || width.min > width.max {
            return Err(GenerationError::InvalidCorridorWidth { min: width.min, max: width.max });
        }
        Ok(())
    }
}

fn percent_to_unit(percent: f32) -> f32 {
    if percent.is_nan() {
        return 0.0;
    }
    (percent / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_are_clamped_into_unit_range() {
        let config = GenerationConfig {
            additional_hall_entrance_percent: 250.0,
            extra_connection_percent: -10.0,
            nodes_percent_to_remove: f32::NAN,
            ..GenerationConfig::default()
        };
        assert_eq!(config.hall_entrance_probability(), 1.0);
        assert_eq!(config.extra_connection_probability(), 0.0);
        assert_eq!(config.node_removal_fraction(), 0.0);
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GenerationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let zero_cell = GenerationConfig { cell_size: 0, ..GenerationConfig::default() };
        assert_eq!(zero_cell.validate(), Err(GenerationError::InvalidCellSize(0)));

        let single_cell_rooms = GenerationConfig { cells_per_room: 1, ..GenerationConfig::default() };
        assert_eq!(single_cell_rooms.validate(), Err(GenerationError::InvalidCellsPerRoom(1)));

        let touching = GenerationConfig { side_rooms_gap: 1, ..GenerationConfig::default() };
        assert_eq!(touching.validate(), Err(GenerationError::SideRoomsGapTooSmall(1)));

        let inverted = GenerationConfig {
            corridor_width: CorridorWidth { min: 4, max: 2 },
            ..GenerationConfig::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(GenerationError::InvalidCorridorWidth { min: 4, max: 2 })
        );
    }

    #[test]
    fn widest_corridor_respects_exclusive_upper_bound() {
        assert_eq!(CorridorWidth { min: 3, max: 5 }.widest(), 4);
        assert_eq!(CorridorWidth { min: 3, max: 3 }.widest(), 3);
    }

    #[test]
    fn partial_documents_fall_back_to_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "rooms_count": 4, "halls_count": 0 }"#).expect("parse");
        assert_eq!(config.rooms_count, 4);
        assert_eq!(config.halls_count, 0);
        assert_eq!(config.cell_size, GenerationConfig::default().cell_size);
    }
}
