use std::collections::{BTreeSet, VecDeque};

use anyhow::{Result, ensure};
use clap::Parser;
use env_logger::{Builder, Env};
use levelgen::{
    CARDINALS, CorridorWidth, GeneratedLevel, GenerationConfig, LevelGenerator, RoomTemplate,
    RoomTypeMask,
};
use levelgen_tools::seed::mix_seed;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_config(rng: &mut ChaCha8Rng) -> GenerationConfig {
    let min_width = choose(rng, &[1, 2, 3]);
    GenerationConfig {
        cell_size: choose(rng, &[3, 4, 5, 6]),
        cells_per_room: choose(rng, &[2, 3, 4]),
        side_rooms_gap: choose(rng, &[6, 8, 10, 12]),
        rooms_count: choose(rng, &[0, 1, 4, 7, 8, 12, 16]),
        halls_count: choose(rng, &[0, 1, 2, 3, 5, 8]),
        additional_hall_entrance_percent: choose(rng, &[0.0, 30.0, 100.0]),
        extra_connection_percent: choose(rng, &[0.0, 10.0, 50.0, 100.0]),
        nodes_percent_to_remove: choose(rng, &[0.0, 40.0, 80.0, 100.0]),
        corridor_width: CorridorWidth { min: min_width, max: min_width + choose(rng, &[0, 1, 2]) },
        allowed_spawn_types: choose(
            rng,
            &[RoomTypeMask::ROOM, RoomTypeMask::ROOM | RoomTypeMask::HALL, RoomTypeMask::all()],
        ),
        ..GenerationConfig::default()
    }
}

fn floor_is_connected(level: &GeneratedLevel) -> bool {
    let floors = level.tiles.iter().filter(|tile| tile.element.is_floor()).count();
    let Some(start) = level.tiles.iter().find(|tile| tile.element.is_floor()).map(|tile| tile.pos)
    else {
        return true;
    };

    let mut open = VecDeque::from([start]);
    let mut seen = BTreeSet::from([start]);
    while let Some(pos) = open.pop_front() {
        for direction in CARDINALS {
            let next = pos + direction;
            if !seen.contains(&next)
                && level.tile_at(next).is_some_and(|tile| tile.element.is_floor())
            {
                seen.insert(next);
                open.push_back(next);
            }
        }
    }
    seen.len() == floors
}

fn check_level(level: &GeneratedLevel, config: &GenerationConfig) -> Result<()> {
    ensure!(level.tiles.len() == level.width * level.height, "Invariant failed: grid size");
    for (index, tile) in level.tiles.iter().enumerate() {
        ensure!(
            tile.pos.x as usize == index % level.width && tile.pos.y as usize == index / level.width,
            "Invariant failed: tile {index} stores {:?}",
            tile.pos
        );
        let expected_spawn =
            tile.is_graph_node && tile.room_type.mask().intersects(config.allowed_spawn_types);
        ensure!(tile.is_spawn_point == expected_spawn, "Invariant failed: spawn at {:?}", tile.pos);
    }
    ensure!(level.hall_centers.len() <= config.halls_count, "Invariant failed: too many halls");
    ensure!(floor_is_connected(level), "Invariant failed: floor is split into several regions");
    Ok(())
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    println!("Starting level fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut rejected = 0;
    for run in 0..args.runs {
        let config = random_config(&mut rng);
        let run_seed = mix_seed(args.seed ^ u64::from(run));
        let generator = match LevelGenerator::new(config.clone(), RoomTemplate::default()) {
            Ok(generator) => generator,
            Err(err) => {
                log::debug!("run {run}: settings rejected: {err}");
                rejected += 1;
                continue;
            }
        };

        let level = generator.generate_seeded(run_seed);
        check_level(&level, &config)
            .map_err(|err| err.context(format!("run {run}, seed {run_seed}, {config:?}")))?;
    }

    println!("Fuzzing completed successfully ({rejected} configurations rejected up front).");
    Ok(())
}
