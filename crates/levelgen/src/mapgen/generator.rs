//! Level generation orchestration: layout, graph, corridors, stamping, walls
//! and spawn points, all drawing from one random stream.

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::random::{RandomSource, seeded_rng};
use crate::template::RoomTemplate;
use crate::types::Rect;

use super::corridors::carve_corridors;
use super::graph_builder::GraphBuilder;
use super::layout::{LevelLayout, plan_layout};
use super::model::{GeneratedLevel, GenerationStats, LevelSink};
use super::rooms::{stamp_halls, stamp_rooms};
use super::spawns::mark_spawn_points;
use super::walls::derive_walls;

#[derive(Clone, Debug)]
pub struct LevelGenerator {
    config: GenerationConfig,
    template: RoomTemplate,
    layout: LevelLayout,
}

impl LevelGenerator {
    /// Validates the parameters once; every later run is infallible.
    pub fn new(config: GenerationConfig, template: RoomTemplate) -> Result<Self, GenerationError> {
        config.validate()?;
        template.validate()?;
        let layout = plan_layout(&config);
        layout.check_fit(&config, &template)?;
        Ok(Self { config, template, layout })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn template(&self) -> &RoomTemplate {
        &self.template
    }

    pub fn level_rect(&self) -> Rect {
        self.layout.level
    }

    pub fn inner_zone(&self) -> Rect {
        self.layout.inner_zone
    }

    pub fn generate_seeded(&self, seed: u64) -> GeneratedLevel {
        self.generate(&mut seeded_rng(seed))
    }

    pub fn generate(&self, rng: &mut impl RandomSource) -> GeneratedLevel {
        let config = &self.config;
        let mut stats = GenerationStats::default();
        log::info!(
            "generating {side}x{side} level with {} rooms and {} halls",
            config.rooms_count,
            config.halls_count,
            side = self.layout.side
        );

        let mut grid = self.layout.allocate_grid();
        let plan = GraphBuilder::new(config, self.layout.inner_zone).build(rng, &mut stats);
        log::debug!(
            "graph: {} rooms, {} halls ({} abandoned), {} edges",
            stats.rooms_placed,
            stats.halls_placed,
            stats.halls_abandoned,
            stats.edges_extracted
        );

        carve_corridors(&mut grid, &plan.edges, config, rng, &mut stats);
        log::debug!(
            "corridors: {} spanning, {} extra",
            stats.spanning_corridors,
            stats.extra_corridors
        );

        stamp_rooms(&mut grid, &self.template, &plan.room_centers);
        stamp_halls(&mut grid, &plan.hall_centers, config.cell_size, rng);

        let walls = derive_walls(&mut grid);
        log::debug!("walls: {walls} tiles");

        stats.spawn_points = mark_spawn_points(&mut grid, config.allowed_spawn_types);

        let level = GeneratedLevel {
            width: grid.width(),
            height: grid.height(),
            level: self.layout.level,
            inner_zone: self.layout.inner_zone,
            level_scale: config.level_scale,
            tiles: grid.into_tiles(),
            room_centers: plan.room_centers,
            hall_centers: plan.hall_centers,
            stats,
        };
        log::info!(
            "level ready: {} spawn points, fingerprint {:016x}",
            stats.spawn_points,
            level.fingerprint()
        );
        level
    }

    /// Runs the pipeline and hands the result to `sink`.
    pub fn generate_into<S: LevelSink>(
        &self,
        rng: &mut impl RandomSource,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        let level = self.generate(rng);
        sink.accept(&level)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use proptest::prelude::*;

    use super::*;
    use crate::config::CorridorWidth;
    use crate::types::{CARDINALS, Pos, RoomElement, RoomType, RoomTypeMask, Tile};

    fn generator(config: GenerationConfig) -> LevelGenerator {
        LevelGenerator::new(config, RoomTemplate::default()).expect("valid parameters")
    }

    fn floor_is_connected(level: &GeneratedLevel) -> bool {
        let floors: Vec<Pos> =
            level.tiles.iter().filter(|tile| tile.element.is_floor()).map(|tile| tile.pos).collect();
        let Some(&start) = floors.first() else {
            return true;
        };

        let mut open = VecDeque::from([start]);
        let mut seen = BTreeSet::from([start]);
        while let Some(pos) = open.pop_front() {
            for direction in CARDINALS {
                let next = pos + direction;
                if seen.contains(&next) {
                    continue;
                }
                if !level.tile_at(next).is_some_and(|tile| tile.element.is_floor()) {
                    continue;
                }
                seen.insert(next);
                open.push_back(next);
            }
        }
        seen.len() == floors.len()
    }

    #[test]
    fn invalid_parameters_are_rejected_up_front() {
        let config = GenerationConfig { cell_size: 0, ..GenerationConfig::default() };
        assert_eq!(
            LevelGenerator::new(config, RoomTemplate::default()).err(),
            Some(GenerationError::InvalidCellSize(0))
        );

        let tight = GenerationConfig { side_rooms_gap: 2, ..GenerationConfig::default() };
        assert!(matches!(
            LevelGenerator::new(tight, RoomTemplate::solid(9, 9)),
            Err(GenerationError::TemplateOutsideLevel { .. })
        ));
    }

    #[test]
    fn same_seed_produces_byte_identical_levels() {
        let generator = generator(GenerationConfig::default());
        let a = generator.generate_seeded(123_456);
        let b = generator.generate_seeded(123_456);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_produce_different_levels() {
        let generator = generator(GenerationConfig::default());
        let first = generator.generate_seeded(1);
        let second = generator.generate_seeded(2);
        assert_ne!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn grid_matches_the_level_rectangle() {
        let generator = generator(GenerationConfig::default());
        let level = generator.generate_seeded(7);
        assert_eq!(level.level, generator.level_rect());
        assert_eq!(level.inner_zone, generator.inner_zone());
        assert_eq!(level.width, level.level.width() as usize);
        assert_eq!(level.tiles.len(), level.width * level.height);
        for (index, tile) in level.tiles.iter().enumerate() {
            assert_eq!(tile.pos, Pos { y: (index / level.width) as i32, x: (index % level.width) as i32 });
        }
    }

    #[test]
    fn four_rooms_without_halls_form_one_connected_floor() {
        let config = GenerationConfig {
            rooms_count: 4,
            halls_count: 0,
            nodes_percent_to_remove: 0.0,
            ..GenerationConfig::default()
        };
        for seed in [3_u64, 17, 2_024, 77_777] {
            let level = generator(config.clone()).generate_seeded(seed);
            assert_eq!(level.room_centers.len(), 4);
            assert_eq!(level.stats.rooms_placed, 4);
            assert!(level.hall_centers.is_empty());
            assert_eq!(level.count_room_type(RoomType::Hall), 0);
            assert!(floor_is_connected(&level), "seed {seed} left disconnected floor");
            for &center in &level.room_centers {
                let tile = level.tile_at(center).expect("room center inside level");
                assert_eq!(tile.room_type, RoomType::Room);
                assert!(tile.is_graph_node);
            }
        }
    }

    #[test]
    fn masked_out_halls_never_spawn() {
        let config = GenerationConfig {
            allowed_spawn_types: RoomTypeMask::ROOM,
            ..GenerationConfig::default()
        };
        let level = generator(config).generate_seeded(99);
        assert_eq!(level.hall_centers.len(), 1);

        let hall = level.tile_at(level.hall_centers[0]).expect("hall center inside level");
        assert_eq!(hall.room_type, RoomType::Hall);
        assert!(hall.is_graph_node);
        assert!(!hall.is_spawn_point);
        let hall_spawn = |tile: &&Tile| tile.is_spawn_point && tile.room_type == RoomType::Hall;
        assert_eq!(level.tiles.iter().filter(hall_spawn).count(), 0);
        assert_eq!(level.spawn_points().count(), level.stats.spawn_points);
        assert!(level.stats.spawn_points >= level.room_centers.len());
    }

    #[test]
    fn generate_into_delivers_the_same_level() {
        let generator = generator(GenerationConfig::default());
        let mut sink: Vec<GeneratedLevel> = Vec::new();
        generator.generate_into(&mut seeded_rng(5), &mut sink).expect("vec sink cannot fail");
        assert_eq!(sink, vec![generator.generate_seeded(5)]);
    }

    #[test]
    fn level_scale_is_passed_through() {
        let config = GenerationConfig { level_scale: 2.5, ..GenerationConfig::default() };
        assert_eq!(generator(config).generate_seeded(1).level_scale, 2.5);
    }

    fn config_strategy() -> impl Strategy<Value = GenerationConfig> {
        (
            (3_i32..=6, 2_i32..=4, 6_i32..=12),
            (0_usize..=12, 0_usize..=6),
            (0.0_f32..=100.0, 0.0_f32..=100.0, 0.0_f32..=100.0),
            (1_i32..=3, 0_i32..=2),
        )
            .prop_map(|(geometry, counts, percents, widths)| {
                let (cell_size, cells_per_room, side_rooms_gap) = geometry;
                let (rooms_count, halls_count) = counts;
                let (entrance, extra, prune) = percents;
                let (min_width, extra_width) = widths;
                GenerationConfig {
                    cell_size,
                    cells_per_room,
                    side_rooms_gap,
                    rooms_count,
                    halls_count,
                    additional_hall_entrance_percent: entrance,
                    extra_connection_percent: extra,
                    nodes_percent_to_remove: prune,
                    corridor_width: CorridorWidth { min: min_width, max: min_width + extra_width },
                    ..GenerationConfig::default()
                }
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn generated_levels_keep_structural_invariants(
            config in config_strategy(),
            seed in any::<u64>(),
        ) {
            let allowed = config.allowed_spawn_types;
            let halls_count = config.halls_count;
            let level = generator(config).generate_seeded(seed);

            prop_assert_eq!(level.tiles.len(), level.width * level.height);
            prop_assert!(level.hall_centers.len() <= halls_count);
            prop_assert!(floor_is_connected(&level), "seed={} left disconnected floor", seed);

            for tile in &level.tiles {
                let expected_spawn =
                    tile.is_graph_node && tile.room_type.mask().intersects(allowed);
                prop_assert_eq!(tile.is_spawn_point, expected_spawn);
                if !tile.element.is_space() && !tile.element.contains(RoomElement::FLOOR) {
                    prop_assert!(tile.room_type != RoomType::Space, "wall at {:?} has no type", tile.pos);
                }
            }
            for &center in &level.hall_centers {
                let tile = level.tile_at(center).expect("hall center inside level");
                prop_assert_eq!(tile.room_type, RoomType::Hall);
            }
        }

        #[test]
        fn same_config_and_seed_are_deterministic(
            config in config_strategy(),
            seed in any::<u64>(),
        ) {
            let generator = generator(config);
            prop_assert_eq!(generator.generate_seeded(seed), generator.generate_seeded(seed));
        }
    }
}
