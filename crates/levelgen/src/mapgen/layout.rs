//! Level and inner-zone rectangles derived from the configuration alone.

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::template::RoomTemplate;
use crate::types::{Pos, Rect};

use super::grid::TileGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LevelLayout {
    pub(crate) level: Rect,
    pub(crate) inner_zone: Rect,
    pub(crate) side: i32,
}

impl LevelLayout {
    pub(crate) fn allocate_grid(&self) -> TileGrid {
        TileGrid::empty(self.side as usize, self.side as usize)
    }

    /// Distance from the inner zone edge to the outermost room anchor.
    fn room_anchor_reach(cell_size: i32, side_rooms_gap: i32) -> i32 {
        cell_size + side_rooms_gap / 2
    }

    /// Rejects templates or corridor widths that would stamp outside the level.
    pub(crate) fn check_fit(
        &self,
        config: &GenerationConfig,
        template: &RoomTemplate,
    ) -> Result<(), GenerationError> {
        let reach = Self::room_anchor_reach(config.cell_size, config.side_rooms_gap);
        let low_anchor = self.inner_zone.from.x - reach;
        let high_anchor = self.inner_zone.to.x + reach;

        let offset = template.anchor_offset();
        let template_fits = |anchor: i32, local_offset: i32, extent: i32| {
            let start = anchor + local_offset;
            start >= self.level.from.x && start + extent - 1 <= self.level.to.x
        };
        let fits = [low_anchor, high_anchor].iter().all(|&anchor| {
            template_fits(anchor, offset.x, template.width())
                && template_fits(anchor, offset.y, template.height())
        });
        if !fits {
            return Err(GenerationError::TemplateOutsideLevel {
                width: template.width(),
                height: template.height(),
            });
        }

        let widest = config.corridor_width.widest();
        let half = widest / 2;
        if low_anchor - half < self.level.from.x || high_anchor + half > self.level.to.x {
            return Err(GenerationError::CorridorOutsideLevel { width: widest });
        }
        Ok(())
    }
}

pub(crate) fn plan_layout(config: &GenerationConfig) -> LevelLayout {
    let cell_size = config.cell_size;
    let rooms_per_side = config.rooms_count.div_ceil(4) as i32;
    let rooms_side_size = rooms_per_side * config.cells_per_room * cell_size;
    let hall_side_size = config.halls_count as i32 * 2 * cell_size + 2 * cell_size;
    let inner_zone_size = rooms_side_size.max(hall_side_size);

    let from = config.side_rooms_gap + cell_size + cell_size / 2 + cell_size % 2;
    let to = from + inner_zone_size - cell_size;
    let side = inner_zone_size + (config.side_rooms_gap + cell_size) * 2;

    LevelLayout {
        level: Rect::new(Pos::ZERO, Pos { y: side - 1, x: side - 1 }),
        inner_zone: Rect::new(Pos { y: from, x: from }, Pos { y: to, x: to }),
        side,
    }
}
