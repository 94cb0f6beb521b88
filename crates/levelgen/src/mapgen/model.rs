//! Public data models for generated levels and the sinks that consume them.

use std::convert::Infallible;

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Pos, Rect, RoomType, Tile};

/// Per-run counters collected while the pipeline runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub rooms_placed: usize,
    pub halls_placed: usize,
    pub halls_abandoned: usize,
    pub prune_target: usize,
    pub nodes_pruned: usize,
    pub edges_extracted: usize,
    pub spanning_corridors: usize,
    pub extra_corridors: usize,
    pub spawn_points: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneratedLevel {
    pub width: usize,
    pub height: usize,
    pub level: Rect,
    pub inner_zone: Rect,
    pub level_scale: f32,
    /// Row-major, `tiles[y * width + x]`.
    pub tiles: Vec<Tile>,
    pub room_centers: Vec<Pos>,
    pub hall_centers: Vec<Pos>,
    pub stats: GenerationStats,
}

impl GeneratedLevel {
    pub fn tile_at(&self, pos: Pos) -> Option<&Tile> {
        if !self.level.contains(pos) {
            return None;
        }
        self.tiles.get((pos.y as usize) * self.width + (pos.x as usize))
    }

    pub fn spawn_points(&self) -> impl Iterator<Item = Pos> + '_ {
        self.tiles.iter().filter(|tile| tile.is_spawn_point).map(|tile| tile.pos)
    }

    pub fn count_room_type(&self, room_type: RoomType) -> usize {
        self.tiles.iter().filter(|tile| tile.room_type == room_type).count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len() * 3);
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(tile.element.bits());
            bytes.push(match tile.room_type {
                RoomType::Space => 0,
                RoomType::Room => 1,
                RoomType::Corridor => 2,
                RoomType::Hall => 3,
            });
            bytes.push(u8::from(tile.is_graph_node) | (u8::from(tile.is_spawn_point) << 1));
        }

        for centers in [&self.room_centers, &self.hall_centers] {
            bytes.extend((centers.len() as u32).to_le_bytes());
            for center in centers {
                bytes.extend(center.y.to_le_bytes());
                bytes.extend(center.x.to_le_bytes());
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

/// Consumer of finished levels, e.g. a renderer or an exporter.
pub trait LevelSink {
    type Error;

    fn accept(&mut self, level: &GeneratedLevel) -> Result<(), Self::Error>;
}

impl LevelSink for Vec<GeneratedLevel> {
    type Error = Infallible;

    fn accept(&mut self, level: &GeneratedLevel) -> Result<(), Self::Error> {
        self.push(level.clone());
        Ok(())
    }
}
