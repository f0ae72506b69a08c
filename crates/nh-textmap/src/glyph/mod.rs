//! Glyph categories
//!
//! The game reports every map tile as a glyph code. The map only needs to
//! know which categories a glyph belongs to; a [`GlyphClassifier`] answers
//! that. [`NetHackGlyphs`] implements it for the NLE glyph layout.

mod nethack;

pub use nethack::*;

use bitflags::bitflags;

use crate::grid::{Grid, Mask};

/// Glyph code as reported by the game
pub type Glyph = u16;

bitflags! {
    /// Categories a glyph can belong to
    ///
    /// A glyph may carry several flags (a boulder is both an object and a
    /// boulder). The empty set means "unclassified".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GlyphClass: u32 {
        const ROOM_FLOOR = 1 << 0;
        const CORRIDOR = 1 << 1;
        /// Doorless doorway or broken door
        const DOORWAY = 1 << 2;
        const DOOR_OPEN = 1 << 3;
        const DOOR_CLOSED = 1 << 4;
        const WALL = 1 << 5;
        const BARS = 1 << 6;
        const BOULDER = 1 << 7;
        /// Lava or water
        const LIQUID = 1 << 8;
        const STAIRS_UP = 1 << 9;
        const STAIRS_DOWN = 1 << 10;
        const ALTAR = 1 << 11;
        const FOUNTAIN = 1 << 12;
        const THRONE = 1 << 13;
        const SINK = 1 << 14;
        const GRAVE = 1 << 15;
        const TRAP = 1 << 16;
        const MONSTER = 1 << 17;
        const PET = 1 << 18;
        const CORPSE = 1 << 19;
        const OBJECT = 1 << 20;
        const STATUE = 1 << 21;
        /// Player is engulfed
        const SWALLOW = 1 << 22;

        const FLOOR = Self::ROOM_FLOOR.bits() | Self::CORRIDOR.bits() | Self::DOORWAY.bits();
        const OPEN_PASSAGE = Self::DOORWAY.bits() | Self::DOOR_OPEN.bits();
        const DOORS = Self::OPEN_PASSAGE.bits() | Self::DOOR_CLOSED.bits();
        const FEATURE = Self::STAIRS_UP.bits()
            | Self::STAIRS_DOWN.bits()
            | Self::ALTAR.bits()
            | Self::FOUNTAIN.bits()
            | Self::THRONE.bits()
            | Self::SINK.bits()
            | Self::GRAVE.bits()
            | Self::TRAP.bits();
        /// Terrain that can be walked on
        const PASSABLE = Self::FLOOR.bits() | Self::DOOR_OPEN.bits() | Self::FEATURE.bits();
        /// Things standing on a tile and hiding its floor
        const OCCUPANT = Self::MONSTER.bits()
            | Self::PET.bits()
            | Self::CORPSE.bits()
            | Self::OBJECT.bits()
            | Self::STATUE.bits();
        const IMPASSABLE = Self::WALL.bits()
            | Self::DOOR_CLOSED.bits()
            | Self::BARS.bits()
            | Self::BOULDER.bits()
            | Self::LIQUID.bits();
    }
}

/// Category oracle for glyph codes
///
/// Implementations must be total: glyphs they do not know map to
/// [`GlyphClass::empty()`].
pub trait GlyphClassifier {
    /// Categories `glyph` belongs to
    fn classify(&self, glyph: Glyph) -> GlyphClass;

    /// Opened variant of a closed-door glyph
    fn opened_door(&self, closed: Glyph) -> Option<Glyph>;

    /// Does `glyph` belong to any category in `class`?
    fn is(&self, glyph: Glyph, class: GlyphClass) -> bool {
        self.classify(glyph).intersects(class)
    }

    /// Mask of the tiles whose glyph belongs to any category in `class`
    fn mask(&self, glyphs: &Grid<Glyph>, class: GlyphClass) -> Mask {
        glyphs.map(|&g| self.is(g, class))
    }
}
