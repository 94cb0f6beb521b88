//! Procedural level generation split into one submodule per pipeline stage.

pub mod model;

mod corridors;
mod dsu;
mod generator;
mod graph;
mod graph_builder;
mod grid;
mod layout;
mod rooms;
mod spawns;
mod walls;

pub use generator::LevelGenerator;
pub use model::{GeneratedLevel, GenerationStats, LevelSink};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::template::RoomTemplate;

pub fn generate_level(
    config: GenerationConfig,
    template: RoomTemplate,
    seed: u64,
) -> Result<GeneratedLevel, GenerationError> {
    Ok(LevelGenerator::new(config, template)?.generate_seeded(seed))
}
