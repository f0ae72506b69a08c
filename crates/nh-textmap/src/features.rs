//! Terrain feature memory (stairs, altars, fountains, ...)
//!
//! Tracks where special terrain was last seen on each level. Stairs are
//! remembered for good once seen, since they are how the player leaves the
//! level; every other kind reflects the latest observation only.

use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::glyph::{Glyph, GlyphClass, GlyphClassifier};
use crate::grid::{Grid, Position};
use crate::level::LevelKey;

/// Kind of remembered terrain feature, in description order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum FeatureKind {
    #[strum(serialize = "stairs down")]
    StairsDown,
    #[strum(serialize = "stairs up")]
    StairsUp,
    #[strum(serialize = "altar")]
    Altar,
    #[strum(serialize = "fountain")]
    Fountain,
    #[strum(serialize = "throne")]
    Throne,
    #[strum(serialize = "sink")]
    Sink,
    #[strum(serialize = "trap")]
    Trap,
    #[strum(serialize = "grave")]
    Grave,
}

impl FeatureKind {
    /// Glyph category that shows this feature
    pub const fn class(self) -> GlyphClass {
        match self {
            FeatureKind::StairsDown => GlyphClass::STAIRS_DOWN,
            FeatureKind::StairsUp => GlyphClass::STAIRS_UP,
            FeatureKind::Altar => GlyphClass::ALTAR,
            FeatureKind::Fountain => GlyphClass::FOUNTAIN,
            FeatureKind::Throne => GlyphClass::THRONE,
            FeatureKind::Sink => GlyphClass::SINK,
            FeatureKind::Trap => GlyphClass::TRAP,
            FeatureKind::Grave => GlyphClass::GRAVE,
        }
    }

    pub const fn is_stairs(self) -> bool {
        matches!(self, FeatureKind::StairsDown | FeatureKind::StairsUp)
    }

    /// Phrase for a single feature ("a fountain")
    pub const fn singular(self) -> &'static str {
        match self {
            FeatureKind::StairsDown => "stairs down",
            FeatureKind::StairsUp => "stairs up",
            FeatureKind::Altar => "an altar",
            FeatureKind::Fountain => "a fountain",
            FeatureKind::Throne => "a throne",
            FeatureKind::Sink => "a sink",
            FeatureKind::Trap => "a trap",
            FeatureKind::Grave => "a grave",
        }
    }

    /// Noun for several features ("fountains")
    pub const fn plural(self) -> &'static str {
        match self {
            FeatureKind::StairsDown => "stairs down",
            FeatureKind::StairsUp => "stairs up",
            FeatureKind::Altar => "altars",
            FeatureKind::Fountain => "fountains",
            FeatureKind::Throne => "thrones",
            FeatureKind::Sink => "sinks",
            FeatureKind::Trap => "traps",
            FeatureKind::Grave => "graves",
        }
    }

    /// "a fountain", "3 fountains", or `None` for zero
    pub fn phrase(self, count: usize) -> Option<String> {
        match count {
            0 => None,
            1 => Some(self.singular().to_string()),
            n => Some(format!("{n} {}", self.plural())),
        }
    }
}

/// Remembered feature positions of one level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainFeatureMemory {
    positions: BTreeMap<FeatureKind, BTreeSet<Position>>,
    last_recall: u64,
}

impl TerrainFeatureMemory {
    /// Remembered positions of `kind` (empty if none)
    pub fn positions(&self, kind: FeatureKind) -> impl Iterator<Item = Position> + '_ {
        self.positions.get(&kind).into_iter().flatten().copied()
    }

    /// Kinds with at least one remembered position, in description order
    pub fn kinds(&self) -> impl Iterator<Item = FeatureKind> + '_ {
        self.positions.keys().copied()
    }

    pub fn contains(&self, kind: FeatureKind, pos: Position) -> bool {
        self.positions.get(&kind).is_some_and(|set| set.contains(&pos))
    }

    /// Game time of the last forced refresh (0 before the first)
    pub const fn last_recall(&self) -> u64 {
        self.last_recall
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Feature memory for every level of the episode
#[derive(Debug, Clone, Default)]
pub struct TerrainFeatureTracker {
    memories: HashMap<LevelKey, TerrainFeatureMemory>,
}

impl TerrainFeatureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feature memory of a level, if it was ever refreshed
    pub fn memory(&self, key: LevelKey) -> Option<&TerrainFeatureMemory> {
        self.memories.get(&key)
    }

    /// Game time of the last forced refresh of a level (0 if never)
    pub fn last_recall(&self, key: LevelKey) -> u64 {
        self.memory(key).map_or(0, TerrainFeatureMemory::last_recall)
    }

    /// Forget every level
    pub fn clear(&mut self) {
        self.memories.clear();
    }

    /// Fold the features visible in `glyphs` into the memory of `key`
    ///
    /// Stairs are merged with what was remembered; other kinds are replaced
    /// by what is visible now. A forced refresh follows a full terrain
    /// recall and also stamps the memory with `turn`.
    pub fn refresh<C: GlyphClassifier + ?Sized>(
        &mut self,
        glyphs: &Grid<Glyph>,
        key: LevelKey,
        turn: u64,
        force: bool,
        classifier: &C,
    ) {
        let current = extract(glyphs, classifier);
        let memory = self.memories.entry(key).or_default();

        let mut merged = current;
        for kind in FeatureKind::iter().filter(|k| k.is_stairs()) {
            if let Some(past) = memory.positions.remove(&kind) {
                merged.entry(kind).or_default().extend(past);
            }
        }
        memory.positions = merged;

        if force {
            debug!(level = %key, turn, "terrain features recalled");
            memory.last_recall = turn;
        }
    }
}

/// Feature positions visible in `glyphs`
fn extract<C: GlyphClassifier + ?Sized>(
    glyphs: &Grid<Glyph>,
    classifier: &C,
) -> BTreeMap<FeatureKind, BTreeSet<Position>> {
    let mut found: BTreeMap<FeatureKind, BTreeSet<Position>> = BTreeMap::new();
    for (pos, &glyph) in glyphs.iter() {
        let class = classifier.classify(glyph);
        if !class.intersects(GlyphClass::FEATURE) {
            continue;
        }
        for kind in FeatureKind::iter().filter(|k| class.intersects(k.class())) {
            found.entry(kind).or_default().insert(pos);
        }
    }
    found
}
