use std::ops::{Add, Mul, Neg, Sub};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const ZERO: Self = Self { y: 0, x: 0 };

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add for Pos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { y: self.y + rhs.y, x: self.x + rhs.x }
    }
}

impl Sub for Pos {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { y: self.y - rhs.y, x: self.x - rhs.x }
    }
}

impl Mul<i32> for Pos {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self { y: self.y * rhs, x: self.x * rhs }
    }
}

impl Neg for Pos {
    type Output = Self;

    fn neg(self) -> Self {
        Self { y: -self.y, x: -self.x }
    }
}

/// Up, right, down, left. Stages that start from a random direction index
/// walk this table cyclically.
pub const CARDINALS: [Pos; 4] =
    [Pos { y: 1, x: 0 }, Pos { y: 0, x: 1 }, Pos { y: -1, x: 0 }, Pos { y: 0, x: -1 }];

/// Inclusive axis-aligned bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub from: Pos,
    pub to: Pos,
}

impl Rect {
    pub const fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.from.x && pos.x <= self.to.x && pos.y >= self.from.y && pos.y <= self.to.y
    }

    pub fn width(self) -> i32 {
        self.to.x - self.from.x + 1
    }

    pub fn height(self) -> i32 {
        self.to.y - self.from.y + 1
    }

    pub fn shrunk(self, margin: i32) -> Self {
        Self {
            from: Pos { y: self.from.y + margin, x: self.from.x + margin },
            to: Pos { y: self.to.y - margin, x: self.to.x - margin },
        }
    }
}

bitflags! {
    /// Geometry of a single tile. The empty set is open space.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RoomElement: u8 {
        const FLOOR = 1 << 0;
        const LEFT_WALL = 1 << 1;
        const RIGHT_WALL = 1 << 2;
        const TOP_WALL = 1 << 3;
        const BOTTOM_WALL = 1 << 4;
        const TOP_LEFT_WALL = Self::LEFT_WALL.bits() | Self::TOP_WALL.bits();
        const TOP_RIGHT_WALL = Self::RIGHT_WALL.bits() | Self::TOP_WALL.bits();
        const BOTTOM_LEFT_WALL = Self::LEFT_WALL.bits() | Self::BOTTOM_WALL.bits();
        const BOTTOM_RIGHT_WALL = Self::RIGHT_WALL.bits() | Self::BOTTOM_WALL.bits();
        const COLUMN = Self::LEFT_WALL.bits()
            | Self::RIGHT_WALL.bits()
            | Self::TOP_WALL.bits()
            | Self::BOTTOM_WALL.bits();
    }
}

impl RoomElement {
    pub const SPACE: Self = Self::empty();

    pub fn is_space(self) -> bool {
        self.is_empty()
    }

    pub fn is_floor(self) -> bool {
        self == Self::FLOOR
    }

    pub fn wall_count(self) -> u32 {
        self.intersection(Self::COLUMN).bits().count_ones()
    }

    pub fn is_column(self) -> bool {
        self.wall_count() >= 3
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomType {
    #[default]
    Space,
    Room,
    Corridor,
    Hall,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RoomTypeMask: u8 {
        const ROOM = 1 << 0;
        const CORRIDOR = 1 << 1;
        const HALL = 1 << 2;
    }
}

impl RoomType {
    pub fn mask(self) -> RoomTypeMask {
        match self {
            Self::Space => RoomTypeMask::empty(),
            Self::Room => RoomTypeMask::ROOM,
            Self::Corridor => RoomTypeMask::CORRIDOR,
            Self::Hall => RoomTypeMask::HALL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: Pos,
    pub element: RoomElement,
    pub room_type: RoomType,
    pub is_graph_node: bool,
    pub is_spawn_point: bool,
}

impl Tile {
    pub fn space(pos: Pos) -> Self {
        Self {
            pos,
            element: RoomElement::SPACE,
            room_type: RoomType::Space,
            is_graph_node: false,
            is_spawn_point: false,
        }
    }
}

/// Undirected link between two graph node positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub a: Pos,
    pub b: Pos,
}

impl Edge {
    pub fn new(a: Pos, b: Pos) -> Self {
        Self { a, b }
    }

    /// Endpoint pair with the smaller position first.
    pub fn normalized(self) -> (Pos, Pos) {
        if self.a <= self.b { (self.a, self.b) } else { (self.b, self.a) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_union_is_idempotent_and_order_independent() {
        let walls = [
            RoomElement::LEFT_WALL,
            RoomElement::TOP_WALL,
            RoomElement::RIGHT_WALL,
            RoomElement::TOP_WALL,
        ];
        let forward = walls.iter().fold(RoomElement::SPACE, |acc, &wall| acc | wall);
        let backward = walls.iter().rev().fold(RoomElement::SPACE, |acc, &wall| acc | wall);

        assert_eq!(forward, backward);
        assert_eq!(forward | RoomElement::TOP_WALL, forward);
        assert_eq!(forward.wall_count(), 3);
        assert!(forward.is_column());
    }

    #[test]
    fn corner_flags_are_unions_of_two_walls() {
        assert_eq!(RoomElement::LEFT_WALL | RoomElement::TOP_WALL, RoomElement::TOP_LEFT_WALL);
        assert_eq!(
            RoomElement::RIGHT_WALL | RoomElement::BOTTOM_WALL,
            RoomElement::BOTTOM_RIGHT_WALL
        );
        assert!(!RoomElement::TOP_LEFT_WALL.is_column());
        assert_eq!(RoomElement::COLUMN.wall_count(), 4);
    }

    #[test]
    fn floor_check_is_exact() {
        assert!(RoomElement::FLOOR.is_floor());
        assert!(!(RoomElement::FLOOR | RoomElement::LEFT_WALL).is_floor());
        assert!(RoomElement::SPACE.is_space());
    }

    #[test]
    fn rect_contains_is_inclusive() {
        let rect = Rect::new(Pos { y: 3, x: 2 }, Pos { y: 7, x: 5 });
        assert!(rect.contains(Pos { y: 3, x: 2 }));
        assert!(rect.contains(Pos { y: 7, x: 5 }));
        assert!(!rect.contains(Pos { y: 7, x: 6 }));
        assert!(!rect.contains(Pos { y: 2, x: 2 }));
        assert_eq!(rect.width(), 4);
        assert_eq!(rect.height(), 5);
        assert_eq!(rect.shrunk(1), Rect::new(Pos { y: 4, x: 3 }, Pos { y: 6, x: 4 }));
    }

    #[test]
    fn space_type_has_no_mask_bit() {
        assert!(RoomType::Space.mask().is_empty());
        assert_eq!(RoomType::Hall.mask(), RoomTypeMask::HALL);
    }
}
