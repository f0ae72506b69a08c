//! Room and corridor detection
//!
//! Splits the remembered walkable space of a level into connected rooms and
//! corridors. Floor type is read from the level's terrain memory; tiles
//! whose floor was never visible (something always stood on them) take the
//! type their neighbors agree on.

use tracing::trace;

use crate::glyph::{GlyphClass, GlyphClassifier};
use crate::grid::{Connectivity, Grid, Label, Mask, label_components};
use crate::level::LevelState;

/// Room and corridor labels of one level
///
/// Label 0 is unclassified. Rooms use `1..=num_rooms`, corridors
/// `num_rooms + 1..=num_rooms + num_corridors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLabeling {
    labels: Grid<Label>,
    num_rooms: Label,
    num_corridors: Label,
}

impl RegionLabeling {
    pub fn labels(&self) -> &Grid<Label> {
        &self.labels
    }

    pub const fn num_rooms(&self) -> Label {
        self.num_rooms
    }

    pub const fn num_corridors(&self) -> Label {
        self.num_corridors
    }

    pub const fn is_room(&self, label: Label) -> bool {
        label != 0 && label <= self.num_rooms
    }

    pub const fn is_corridor(&self, label: Label) -> bool {
        label > self.num_rooms && label <= self.num_rooms + self.num_corridors
    }

    /// Room labels in ascending order
    pub fn room_ids(&self) -> impl Iterator<Item = Label> + use<> {
        1..=self.num_rooms
    }

    /// Tiles of one room
    pub fn room_mask(&self, id: Label) -> Mask {
        debug_assert!(self.is_room(id));
        self.labels.map(|&l| l == id)
    }

    /// Tiles belonging to any room
    pub fn rooms_mask(&self) -> Mask {
        self.labels.map(|&l| self.is_room(l))
    }

    /// Tiles belonging to any corridor (doors included)
    pub fn corridor_mask(&self) -> Mask {
        self.labels.map(|&l| self.is_corridor(l))
    }

    /// Label grid with corridors cleared, room labels unchanged
    pub fn room_labels(&self) -> Grid<Label> {
        self.labels.map(|&l| if self.is_room(l) { l } else { 0 })
    }

    /// Label grid with rooms cleared and corridors renumbered from 1
    pub fn corridor_labels(&self) -> Grid<Label> {
        self.labels
            .map(|&l| if self.is_corridor(l) { l - self.num_rooms } else { 0 })
    }

    fn from_masks(rooms: &Mask, corridors: &Mask) -> Self {
        let (room_labels, num_rooms) = label_components(rooms);
        let (corridor_labels, num_corridors) = label_components(corridors);

        let mut labels = room_labels;
        for (pos, &corridor) in corridor_labels.iter() {
            if corridor != 0 {
                labels[pos] = corridor + num_rooms;
            }
        }

        Self {
            labels,
            num_rooms,
            num_corridors,
        }
    }
}

/// Label the rooms and corridors of `level`
///
/// Rooms are 4-connected room-floor tiles, corridors 4-connected corridor
/// tiles. Open doors and doorways always belong to corridors. A walkable
/// tile with unknown floor type joins the rooms when every labeled tile
/// around it is a room, and the corridors when any of them is a corridor;
/// with no labeled neighbor it stays unclassified.
pub fn classify<C: GlyphClassifier + ?Sized>(level: &LevelState, classifier: &C) -> RegionLabeling {
    let doors = level.object_mask(classifier, GlyphClass::OPEN_PASSAGE);
    let mut rooms = level
        .object_mask(classifier, GlyphClass::ROOM_FLOOR)
        .and_not(&doors);
    let mut corridors = level
        .object_mask(classifier, GlyphClass::CORRIDOR)
        .or(&doors);

    let first = RegionLabeling::from_masks(&rooms, &corridors);

    // Neighborhood consensus for tiles whose floor is hidden
    for pos in level.walkable().set_positions() {
        if first.labels[pos] != 0 {
            continue;
        }

        let mut labeled = first
            .labels
            .neighbors(pos, Connectivity::Eight)
            .map(|n| first.labels[n])
            .filter(|&l| l != 0)
            .peekable();
        if labeled.peek().is_none() {
            continue;
        }

        if labeled.all(|l| first.is_room(l)) {
            trace!(%pos, "hidden floor resolved as room");
            rooms[pos] = true;
        } else {
            trace!(%pos, "hidden floor resolved as corridor");
            corridors[pos] = true;
        }
    }

    // A door may have been pulled into a room above
    let corridors = corridors.or(&doors);
    let rooms = rooms.and_not(&doors);

    RegionLabeling::from_masks(&rooms, &corridors)
}
