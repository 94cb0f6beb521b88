pub mod config;
pub mod error;
pub mod mapgen;
pub mod random;
pub mod template;
pub mod types;

pub use config::{CorridorWidth, GenerationConfig};
pub use error::GenerationError;
pub use mapgen::{GeneratedLevel, GenerationStats, LevelGenerator, LevelSink, generate_level};
pub use random::{RandomSource, seeded_rng};
pub use template::{RoomTemplate, TemplateTile};
pub use types::*;
