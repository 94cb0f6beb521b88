//! Level sinks used by the CLI: an ASCII map, a JSON dump and a one-line
//! summary.

use std::io::{self, Write};

use levelgen::{GeneratedLevel, LevelSink, Pos, RoomType, Tile};

pub fn tile_glyph(tile: &Tile) -> char {
    if tile.is_spawn_point {
        return 'S';
    }
    if tile.element.is_space() {
        return ' ';
    }
    if tile.element.is_floor() {
        if tile.is_graph_node {
            return '+';
        }
        return match tile.room_type {
            RoomType::Room => '.',
            RoomType::Corridor => ',',
            RoomType::Hall => ':',
            RoomType::Space => '?',
        };
    }
    if tile.element.is_column() { 'O' } else { '#' }
}

/// Rows are written top to bottom, so larger `y` comes first.
pub struct AsciiSink<W: Write> {
    out: W,
}

impl<W: Write> AsciiSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LevelSink for AsciiSink<W> {
    type Error = io::Error;

    fn accept(&mut self, level: &GeneratedLevel) -> io::Result<()> {
        let mut line = String::with_capacity(level.width);
        for y in (0..level.height as i32).rev() {
            line.clear();
            for x in 0..level.width as i32 {
                line.push(level.tile_at(Pos { y, x }).map_or(' ', tile_glyph));
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }
        self.out.flush()
    }
}

pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> LevelSink for JsonSink<W> {
    type Error = io::Error;

    fn accept(&mut self, level: &GeneratedLevel) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, level).map_err(io::Error::other)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

pub struct SummarySink<W: Write> {
    out: W,
}

impl<W: Write> SummarySink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> LevelSink for SummarySink<W> {
    type Error = io::Error;

    fn accept(&mut self, level: &GeneratedLevel) -> io::Result<()> {
        let stats = &level.stats;
        writeln!(self.out, "Level: {}x{}", level.width, level.height)?;
        writeln!(self.out, "Rooms: {}", stats.rooms_placed)?;
        writeln!(self.out, "Halls: {} ({} abandoned)", stats.halls_placed, stats.halls_abandoned)?;
        writeln!(self.out, "Pruned nodes: {}/{}", stats.nodes_pruned, stats.prune_target)?;
        writeln!(
            self.out,
            "Corridors: {} spanning, {} extra",
            stats.spanning_corridors, stats.extra_corridors
        )?;
        writeln!(self.out, "Spawn points: {}", stats.spawn_points)?;
        writeln!(self.out, "Fingerprint: {:016x}", level.fingerprint())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use levelgen::{GenerationConfig, LevelGenerator, RoomElement, RoomTemplate};

    use super::*;

    fn level(seed: u64) -> GeneratedLevel {
        LevelGenerator::new(GenerationConfig::default(), RoomTemplate::default())
            .expect("default parameters are valid")
            .generate_seeded(seed)
    }

    #[test]
    fn glyphs_distinguish_tile_kinds() {
        let mut tile = Tile::space(Pos::ZERO);
        assert_eq!(tile_glyph(&tile), ' ');

        tile.element = RoomElement::TOP_WALL;
        assert_eq!(tile_glyph(&tile), '#');
        tile.element = RoomElement::COLUMN;
        assert_eq!(tile_glyph(&tile), 'O');

        tile.element = RoomElement::FLOOR;
        tile.room_type = RoomType::Hall;
        assert_eq!(tile_glyph(&tile), ':');
        tile.is_graph_node = true;
        assert_eq!(tile_glyph(&tile), '+');
        tile.is_spawn_point = true;
        assert_eq!(tile_glyph(&tile), 'S');
    }

    #[test]
    fn ascii_map_has_one_line_per_row() {
        let level = level(11);
        let mut sink = AsciiSink::new(Vec::new());
        sink.accept(&level).expect("write to memory");
        let text = String::from_utf8(sink.into_inner()).expect("utf8");

        assert_eq!(text.lines().count(), level.height);
        assert!(text.lines().all(|line| line.chars().count() <= level.width));
        assert_eq!(text.matches('S').count(), level.stats.spawn_points);
    }

    #[test]
    fn json_dump_carries_tiles_and_stats() {
        let level = level(12);
        let mut out = Vec::new();
        JsonSink::new(&mut out).accept(&level).expect("write to memory");

        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value["tiles"].as_array().map(Vec::len), Some(level.tiles.len()));
        assert_eq!(value["stats"]["spawn_points"], level.stats.spawn_points);
    }

    #[test]
    fn summary_reports_the_fingerprint() {
        let level = level(13);
        let mut out = Vec::new();
        SummarySink::new(&mut out).accept(&level).expect("write to memory");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains(&format!("{:016x}", level.fingerprint())));
    }
}
