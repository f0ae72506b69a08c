//! NetHack 3.6 glyph layout (display.h), as exported by NLE
//!
//! Glyphs are laid out in consecutive ranges: monsters, pets, the invisible
//! marker, detected monsters, corpses, ridden monsters, objects, map
//! symbols (cmap), explosions, zaps, swallow borders, warnings and statues.

use super::{Glyph, GlyphClass, GlyphClassifier};

/// Number of monster types (monst.c)
pub const NUMMONS: Glyph = 381;
/// Number of object types (objects.c)
pub const NUM_OBJECTS: Glyph = 453;
/// Number of cmap symbols (defsym.h)
pub const MAXPCHARS: Glyph = 96;
const MAXEXPCHARS: Glyph = 9;
const EXPL_MAX: Glyph = 7;
const NUM_ZAP: Glyph = 8;
const WARNCOUNT: Glyph = 6;

pub const GLYPH_MON_OFF: Glyph = 0;
pub const GLYPH_PET_OFF: Glyph = NUMMONS + GLYPH_MON_OFF;
pub const GLYPH_INVIS_OFF: Glyph = NUMMONS + GLYPH_PET_OFF;
pub const GLYPH_DETECT_OFF: Glyph = 1 + GLYPH_INVIS_OFF;
pub const GLYPH_BODY_OFF: Glyph = NUMMONS + GLYPH_DETECT_OFF;
pub const GLYPH_RIDDEN_OFF: Glyph = NUMMONS + GLYPH_BODY_OFF;
pub const GLYPH_OBJ_OFF: Glyph = NUMMONS + GLYPH_RIDDEN_OFF;
pub const GLYPH_CMAP_OFF: Glyph = NUM_OBJECTS + GLYPH_OBJ_OFF;
pub const GLYPH_EXPLODE_OFF: Glyph = (MAXPCHARS - MAXEXPCHARS) + GLYPH_CMAP_OFF;
pub const GLYPH_ZAP_OFF: Glyph = (MAXEXPCHARS * EXPL_MAX) + GLYPH_EXPLODE_OFF;
pub const GLYPH_SWALLOW_OFF: Glyph = (NUM_ZAP * 4) + GLYPH_ZAP_OFF;
pub const GLYPH_WARNING_OFF: Glyph = (NUMMONS * 8) + GLYPH_SWALLOW_OFF;
pub const GLYPH_STATUE_OFF: Glyph = WARNCOUNT + GLYPH_WARNING_OFF;
pub const MAX_GLYPH: Glyph = NUMMONS + GLYPH_STATUE_OFF;

/// Object index of the boulder
pub const BOULDER: Glyph = 447;

// cmap symbols
pub const S_STONE: Glyph = 0;
pub const S_VWALL: Glyph = 1;
pub const S_TRWALL: Glyph = 11;
pub const S_NDOOR: Glyph = 12;
pub const S_VODOOR: Glyph = 13;
pub const S_HODOOR: Glyph = 14;
pub const S_VCDOOR: Glyph = 15;
pub const S_HCDOOR: Glyph = 16;
pub const S_BARS: Glyph = 17;
pub const S_TREE: Glyph = 18;
pub const S_ROOM: Glyph = 19;
pub const S_DARKROOM: Glyph = 20;
pub const S_CORR: Glyph = 21;
pub const S_LITCORR: Glyph = 22;
pub const S_UPSTAIR: Glyph = 23;
pub const S_DNSTAIR: Glyph = 24;
pub const S_UPLADDER: Glyph = 25;
pub const S_DNLADDER: Glyph = 26;
pub const S_ALTAR: Glyph = 27;
pub const S_GRAVE: Glyph = 28;
pub const S_THRONE: Glyph = 29;
pub const S_SINK: Glyph = 30;
pub const S_FOUNTAIN: Glyph = 31;
pub const S_POOL: Glyph = 32;
pub const S_ICE: Glyph = 33;
pub const S_LAVA: Glyph = 34;
pub const S_WATER: Glyph = 41;
pub const S_ARROW_TRAP: Glyph = 42;
pub const S_VIBRATING_SQUARE: Glyph = 64;

/// Glyph of a cmap symbol
pub const fn cmap(symbol: Glyph) -> Glyph {
    GLYPH_CMAP_OFF + symbol
}

/// Glyph of a monster
pub const fn monster(index: Glyph) -> Glyph {
    GLYPH_MON_OFF + index
}

/// Glyph of a tame monster
pub const fn pet(index: Glyph) -> Glyph {
    GLYPH_PET_OFF + index
}

/// Glyph of a corpse
pub const fn body(index: Glyph) -> Glyph {
    GLYPH_BODY_OFF + index
}

/// Glyph of an object
pub const fn object(index: Glyph) -> Glyph {
    GLYPH_OBJ_OFF + index
}

/// Glyph of a statue
pub const fn statue(index: Glyph) -> Glyph {
    GLYPH_STATUE_OFF + index
}

/// Glyph of one of the eight swallow border pieces of a monster
pub const fn swallow(index: Glyph, piece: Glyph) -> Glyph {
    GLYPH_SWALLOW_OFF + index * 8 + piece
}

/// Classifier for the NLE (NetHack 3.6.6) glyph layout
#[derive(Debug, Clone, Copy, Default)]
pub struct NetHackGlyphs;

impl NetHackGlyphs {
    fn classify_cmap(symbol: Glyph) -> GlyphClass {
        match symbol {
            S_VWALL..=S_TRWALL | S_TREE => GlyphClass::WALL,
            S_NDOOR => GlyphClass::DOORWAY,
            S_VODOOR | S_HODOOR => GlyphClass::DOOR_OPEN,
            S_VCDOOR | S_HCDOOR => GlyphClass::DOOR_CLOSED,
            S_BARS => GlyphClass::BARS,
            S_ROOM | S_DARKROOM => GlyphClass::ROOM_FLOOR,
            S_CORR | S_LITCORR => GlyphClass::CORRIDOR,
            S_UPSTAIR | S_UPLADDER => GlyphClass::STAIRS_UP,
            S_DNSTAIR | S_DNLADDER => GlyphClass::STAIRS_DOWN,
            S_ALTAR => GlyphClass::ALTAR,
            S_GRAVE => GlyphClass::GRAVE,
            S_THRONE => GlyphClass::THRONE,
            S_SINK => GlyphClass::SINK,
            S_FOUNTAIN => GlyphClass::FOUNTAIN,
            S_POOL | S_LAVA | S_WATER => GlyphClass::LIQUID,
            S_ARROW_TRAP..=S_VIBRATING_SQUARE => GlyphClass::TRAP,
            _ => GlyphClass::empty(),
        }
    }
}

impl GlyphClassifier for NetHackGlyphs {
    fn classify(&self, glyph: Glyph) -> GlyphClass {
        match glyph {
            g if g < GLYPH_PET_OFF => GlyphClass::MONSTER,
            g if g < GLYPH_INVIS_OFF => GlyphClass::PET,
            // Invisible marker and detected monsters
            g if g < GLYPH_BODY_OFF => GlyphClass::MONSTER,
            g if g < GLYPH_RIDDEN_OFF => GlyphClass::CORPSE,
            g if g < GLYPH_OBJ_OFF => GlyphClass::MONSTER,
            g if g < GLYPH_CMAP_OFF => {
                if g - GLYPH_OBJ_OFF == BOULDER {
                    GlyphClass::OBJECT | GlyphClass::BOULDER
                } else {
                    GlyphClass::OBJECT
                }
            }
            g if g < GLYPH_EXPLODE_OFF => Self::classify_cmap(g - GLYPH_CMAP_OFF),
            g if g < GLYPH_SWALLOW_OFF => GlyphClass::empty(),
            g if g < GLYPH_WARNING_OFF => GlyphClass::SWALLOW,
            g if g < GLYPH_STATUE_OFF => GlyphClass::MONSTER,
            g if g < MAX_GLYPH => GlyphClass::STATUE,
            _ => GlyphClass::empty(),
        }
    }

    fn opened_door(&self, closed: Glyph) -> Option<Glyph> {
        match closed.checked_sub(GLYPH_CMAP_OFF)? {
            S_VCDOOR => Some(cmap(S_VODOOR)),
            S_HCDOOR => Some(cmap(S_HODOOR)),
            _ => None,
        }
    }
}
