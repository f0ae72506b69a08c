//! Per-level map memory
//!
//! A [`LevelState`] remembers what the player has learned about one dungeon
//! level: which tiles were seen, which are walkable, the last terrain glyph
//! observed on each tile, doors, traps and features. It is folded forward
//! one observation at a time and never forgets a tile once seen.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::glyph::{Glyph, GlyphClass, GlyphClassifier};
use crate::grid::{Grid, Mask, Position};

/// Identifies one persistent dungeon level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct LevelKey {
    /// Dungeon number (which branch)
    pub dungeon_number: i32,
    /// Level number within the dungeon
    pub level_number: i32,
}

impl LevelKey {
    pub const fn new(dungeon_number: i32, level_number: i32) -> Self {
        Self {
            dungeon_number,
            level_number,
        }
    }
}

impl core::fmt::Display for LevelKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Dungeon {} Dlvl:{}", self.dungeon_number, self.level_number)
    }
}

/// What the player knows about one level
///
/// Invariant: a walkable tile has always been seen.
#[derive(Debug, Clone)]
pub struct LevelState {
    key: LevelKey,
    walkable: Mask,
    seen: Mask,
    /// Last terrain glyph observed on each tile
    objects: Grid<Option<Glyph>>,
    /// Tiles that ever showed a door. Never cleared, even if the door is
    /// later destroyed.
    doors: Mask,
    visited: Mask,
    known_traps: Grid<Option<Glyph>>,
    features: Grid<Option<Glyph>>,
    last_turn: Option<u64>,
}

impl LevelState {
    /// Fresh, entirely unseen level
    pub fn new(key: LevelKey, width: usize, height: usize) -> Self {
        Self {
            key,
            walkable: Mask::empty(width, height),
            seen: Mask::empty(width, height),
            objects: Grid::filled(width, height, None),
            doors: Mask::empty(width, height),
            visited: Mask::empty(width, height),
            known_traps: Grid::filled(width, height, None),
            features: Grid::filled(width, height, None),
            last_turn: None,
        }
    }

    pub const fn key(&self) -> LevelKey {
        self.key
    }

    /// (width, height)
    pub const fn dims(&self) -> (usize, usize) {
        self.seen.dims()
    }

    pub fn walkable(&self) -> &Mask {
        &self.walkable
    }

    pub fn seen(&self) -> &Mask {
        &self.seen
    }

    pub fn objects(&self) -> &Grid<Option<Glyph>> {
        &self.objects
    }

    pub fn doors(&self) -> &Mask {
        &self.doors
    }

    pub fn visited(&self) -> &Mask {
        &self.visited
    }

    pub fn known_traps(&self) -> &Grid<Option<Glyph>> {
        &self.known_traps
    }

    pub fn features(&self) -> &Grid<Option<Glyph>> {
        &self.features
    }

    /// Turn of the last applied observation
    pub const fn last_turn(&self) -> Option<u64> {
        self.last_turn
    }

    /// Positions whose remembered terrain belongs to `class`
    pub fn object_positions<C: GlyphClassifier + ?Sized>(
        &self,
        classifier: &C,
        class: GlyphClass,
    ) -> Vec<Position> {
        self.objects
            .iter()
            .filter(|(_, glyph)| glyph.is_some_and(|g| classifier.is(g, class)))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Mask of tiles whose remembered terrain belongs to `class`
    pub fn object_mask<C: GlyphClassifier + ?Sized>(&self, classifier: &C, class: GlyphClass) -> Mask {
        self.objects
            .map(|glyph| glyph.is_some_and(|g| classifier.is(g, class)))
    }

    /// Fold one observation into the level
    ///
    /// `glyphs` must have the level's dimensions. Returns `true` when a
    /// feature tile (stairs, altar, fountain, throne, sink, grave, trap)
    /// appeared or changed, meaning terrain feature memory is stale.
    ///
    /// Nothing is recorded while the player is engulfed.
    ///
    /// # Panics
    ///
    /// Panics if `glyphs` does not have the level's dimensions.
    /// [`DungeonMap::update`](crate::DungeonMap::update) checks the shape
    /// first and returns [`MapError::GridShape`](crate::MapError::GridShape)
    /// instead.
    pub fn update<C: GlyphClassifier + ?Sized>(
        &mut self,
        glyphs: &Grid<Glyph>,
        player: Position,
        turn: u64,
        classifier: &C,
    ) -> bool {
        assert_eq!(glyphs.dims(), self.dims(), "glyph grid does not match level dimensions");

        if glyphs.iter().any(|(_, &g)| classifier.is(g, GlyphClass::SWALLOW)) {
            debug!(level = %self.key, turn, "player engulfed, observation skipped");
            return false;
        }

        let mut dirty = false;
        for (pos, &glyph) in glyphs.iter() {
            let class = classifier.classify(glyph);

            if class.intersects(GlyphClass::PASSABLE) {
                self.walkable[pos] = true;
                self.seen[pos] = true;
                self.objects[pos] = Some(glyph);
            }

            if class.intersects(GlyphClass::OCCUPANT) {
                self.seen[pos] = true;
                self.walkable[pos] = true;
                // Nothing stands inside a closed door, so it must be open now
                if let Some(stored) = self.objects[pos] {
                    if classifier.is(stored, GlyphClass::DOOR_CLOSED) {
                        if let Some(opened) = classifier.opened_door(stored) {
                            trace!(%pos, "occupied closed door remembered as open");
                            self.objects[pos] = Some(opened);
                        }
                    }
                }
            }

            if class.intersects(GlyphClass::IMPASSABLE) {
                self.seen[pos] = true;
                self.objects[pos] = Some(glyph);
                self.walkable[pos] = false;
            }

            if class.intersects(GlyphClass::DOORS) {
                self.doors[pos] = true;
            }

            if class.intersects(GlyphClass::TRAP) {
                self.known_traps[pos] = Some(glyph);
            }

            if class.intersects(GlyphClass::FEATURE) && self.features[pos] != Some(glyph) {
                self.features[pos] = Some(glyph);
                dirty = true;
            }
        }

        if let Some(visited) = self.visited.get_mut(player) {
            *visited = true;
        }
        self.last_turn = Some(turn);

        if dirty {
            debug!(level = %self.key, turn, "terrain features changed");
        }
        dirty
    }
}
