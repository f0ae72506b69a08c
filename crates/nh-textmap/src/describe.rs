//! Room descriptions
//!
//! Turns one labeled room into a [`RoomDescription`]: how well it has been
//! explored, how far away and in which direction it lies, how many exits it
//! has, which features it holds and whether it is a shop.

use std::fmt;

use strum::{Display, IntoEnumIterator};

use crate::features::{FeatureKind, TerrainFeatureMemory};
use crate::grid::{Connectivity, Label, Mask, Position};
use crate::level::LevelState;
use crate::region::RegionLabeling;
use crate::shop::ShopRecord;

/// How much of a room the player has explored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ExplorationState {
    #[strum(serialize = "Unexplored")]
    Unexplored,
    #[strum(serialize = "Partially explored")]
    PartiallyExplored,
    #[strum(serialize = "Explored")]
    Explored,
}

/// Distance bucket of a Manhattan distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DistanceBucket {
    Here,
    Immediate,
    Short,
    Medium,
    Far,
    VeryFar,
}

impl DistanceBucket {
    pub const fn from_distance(distance: usize) -> Self {
        match distance {
            32.. => DistanceBucket::VeryFar,
            16.. => DistanceBucket::Far,
            8.. => DistanceBucket::Medium,
            4.. => DistanceBucket::Short,
            1.. => DistanceBucket::Immediate,
            0 => DistanceBucket::Here,
        }
    }

    /// Phrase placed before the direction
    pub const fn phrase(self) -> &'static str {
        match self {
            DistanceBucket::VeryFar => "very far to the",
            DistanceBucket::Far => "far to the",
            DistanceBucket::Medium => "to the",
            DistanceBucket::Short => "a short distance to the",
            DistanceBucket::Immediate => "immediately",
            DistanceBucket::Here => "",
        }
    }
}

/// Compass direction from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    #[strum(serialize = "here")]
    Here,
    #[strum(serialize = "north")]
    North,
    #[strum(serialize = "north east")]
    NorthEast,
    #[strum(serialize = "east")]
    East,
    #[strum(serialize = "south east")]
    SouthEast,
    #[strum(serialize = "south")]
    South,
    #[strum(serialize = "south west")]
    SouthWest,
    #[strum(serialize = "west")]
    West,
    #[strum(serialize = "north west")]
    NorthWest,
}

impl Direction {
    /// Direction of `to` as seen from `from` (north is up, lower `y`)
    pub fn between(from: Position, to: Position) -> Self {
        use std::cmp::Ordering::*;
        match (to.y.cmp(&from.y), to.x.cmp(&from.x)) {
            (Equal, Equal) => Direction::Here,
            (Less, Equal) => Direction::North,
            (Less, Greater) => Direction::NorthEast,
            (Equal, Greater) => Direction::East,
            (Greater, Greater) => Direction::SouthEast,
            (Greater, Equal) => Direction::South,
            (Greater, Less) => Direction::SouthWest,
            (Equal, Less) => Direction::West,
            (Less, Less) => Direction::NorthWest,
        }
    }
}

/// Description of one room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDescription {
    pub room_id: Label,
    pub exploration: ExplorationState,
    pub distance: DistanceBucket,
    pub direction: Direction,
    /// Corridor, door and bar exits together
    pub num_exits: usize,
    pub num_closed_doors: usize,
    pub num_bars: usize,
    /// Feature phrases ("a fountain", "2 traps")
    pub features: Vec<String>,
    /// Shop type name if the room is a known shop
    pub shop_name: Option<&'static str>,
}

impl RoomDescription {
    /// Player stands in this room
    pub fn is_here(&self) -> bool {
        self.direction == Direction::Here
    }

    /// Text lines: the room line and, if the room has features, an
    /// indented objects line
    pub fn lines(&self) -> Vec<String> {
        let mut line = format!("{} {}", self.exploration, self.shop_name.unwrap_or("room"));

        if self.num_exits > 0 {
            let noun = if self.num_exits == 1 { "exit" } else { "exits" };
            line.push_str(&format!(" with {} {noun}", self.num_exits));

            let mut blocked = Vec::new();
            if self.num_closed_doors > 0 {
                blocked.push(format!("{} closed doors", self.num_closed_doors));
            }
            if self.num_bars > 0 {
                blocked.push(format!("{} iron bars", self.num_bars));
            }
            if !blocked.is_empty() {
                line.push_str(&format!(" ({})", blocked.join(" and ")));
            }
        }

        let has_features = !self.features.is_empty();
        if self.is_here() {
            if has_features {
                line.push(':');
            }
            line.push_str(" <- You are here.");
        } else {
            line.push_str(&format!(" {} {}", self.distance.phrase(), self.direction));
            line.push(if has_features { ':' } else { '.' });
        }

        let mut lines = vec![line];
        if has_features {
            lines.push(format!("    Objects: {}.", self.features.join(", ")));
        }
        lines
    }
}

impl fmt::Display for RoomDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Walkable room tiles that border unseen space and were never stood on
///
/// Standing on one of these would likely reveal more of the map. Tiles
/// beyond the map border do not count as unseen.
pub fn revelable_positions(level: &LevelState, regions: &RegionLabeling) -> Mask {
    let unseen_edge = level.seen().inverted().dilate(Connectivity::Eight);
    unseen_edge
        .and(level.seen())
        .and(level.walkable())
        .and_not(level.visited())
        .and(&regions.rooms_mask())
}

fn in_mask(mask: &Mask, pos: Position) -> bool {
    mask.get(pos).copied().unwrap_or(false)
}

/// Everything needed to describe the rooms of the current level
///
/// The masks are shared by all rooms of a turn; exit masks are dilated with
/// 4-connectivity so only orthogonal contact counts as an exit.
#[derive(Debug, Clone, Copy)]
pub struct RoomDescriber<'a> {
    pub level: &'a LevelState,
    pub player: Position,
    pub dilated_corridors: &'a Mask,
    pub dilated_closed_doors: &'a Mask,
    pub dilated_bars: &'a Mask,
    pub revelable: &'a Mask,
    pub terrain: Option<&'a TerrainFeatureMemory>,
    pub shops: &'a [ShopRecord],
}

impl RoomDescriber<'_> {
    /// Describe the room covering `room` (must be non-empty)
    pub fn describe(&self, room_id: Label, room: &Mask) -> RoomDescription {
        let exploration = if room.intersects(self.revelable) {
            if room.intersects(self.level.visited()) {
                ExplorationState::PartiallyExplored
            } else {
                ExplorationState::Unexplored
            }
        } else {
            ExplorationState::Explored
        };

        let corridor_exits = room.overlap(self.dilated_corridors);
        let num_closed_doors = room.overlap(self.dilated_closed_doors);
        let num_bars = room.overlap(self.dilated_bars);

        let features = self
            .terrain
            .map(|terrain| {
                FeatureKind::iter()
                    .filter_map(|kind| {
                        let count = terrain.positions(kind).filter(|&p| in_mask(room, p)).count();
                        kind.phrase(count)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let shop_name = self
            .shops
            .iter()
            .find(|shop| in_mask(room, shop.shopkeeper_position))
            .map(|shop| shop.name);

        // First closest tile in row-major order
        let (distance, nearest) = room
            .set_positions()
            .map(|p| (p.manhattan(self.player), p))
            .min_by_key(|&(d, _)| d)
            .unwrap_or((0, self.player));

        RoomDescription {
            room_id,
            exploration,
            distance: DistanceBucket::from_distance(distance),
            direction: Direction::between(self.player, nearest),
            num_exits: corridor_exits + num_closed_doors + num_bars,
            num_closed_doors,
            num_bars,
            features,
            shop_name,
        }
    }
}
