//! Dungeon map: per-episode owner of all level memory
//!
//! [`DungeonMap`] is fed one [`Observation`] per game turn. It keeps a
//! [`LevelState`] for every level visited in the episode, remembers terrain
//! features and shops, and regenerates the text description of the current
//! level after each update.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::MapConfig;
use crate::describe::{RoomDescriber, revelable_positions};
use crate::error::MapError;
use crate::features::TerrainFeatureTracker;
use crate::glyph::{Glyph, GlyphClass, GlyphClassifier};
use crate::grid::{Connectivity, Grid, Position};
use crate::level::{LevelKey, LevelState};
use crate::region;
use crate::shop::{Entity, ShopTracker};

/// Player status line (bottom-line stats) relevant to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub position: Position,
    pub dungeon_number: i32,
    pub level_number: i32,
    /// Absolute depth, used to tell when the dungeon overview changes
    pub depth: i32,
    /// Elapsed game time
    pub time: u64,
}

impl PlayerStatus {
    pub const fn level_key(&self) -> LevelKey {
        LevelKey::new(self.dungeon_number, self.level_number)
    }
}

/// Everything the map consumes for one turn
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub glyphs: &'a Grid<Glyph>,
    pub status: PlayerStatus,
    /// Message line of the turn
    pub message: &'a str,
    /// Creatures visible this turn
    pub entities: &'a [Entity],
}

/// Cached dungeon overview text and where it was taken
#[derive(Debug, Clone, PartialEq, Eq)]
struct Overview {
    text: String,
    dungeon_number: i32,
    depth: i32,
}

/// Map memory of one episode
#[derive(Debug, Clone)]
pub struct DungeonMap<C> {
    classifier: C,
    config: MapConfig,
    levels: HashMap<LevelKey, LevelState>,
    terrain: TerrainFeatureTracker,
    shops: ShopTracker,
    current: Option<LevelKey>,
    overview: Option<Overview>,
    description: String,
}

impl<C: GlyphClassifier> DungeonMap<C> {
    pub fn new(classifier: C, config: MapConfig) -> Self {
        Self {
            classifier,
            config,
            levels: HashMap::new(),
            terrain: TerrainFeatureTracker::new(),
            shops: ShopTracker::new(),
            current: None,
            overview: None,
            description: String::new(),
        }
    }

    /// Forget everything; call at the start of every episode
    pub fn reset(&mut self) {
        debug!(levels = self.levels.len(), "map reset");
        self.levels.clear();
        self.terrain.clear();
        self.shops.clear();
        self.current = None;
        self.overview = None;
        self.description.clear();
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Description produced by the last update
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Level the player was on at the last update
    pub const fn current_key(&self) -> Option<LevelKey> {
        self.current
    }

    pub fn level(&self, key: LevelKey) -> Option<&LevelState> {
        self.levels.get(&key)
    }

    /// Number of levels visited this episode
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn terrain(&self) -> &TerrainFeatureTracker {
        &self.terrain
    }

    pub fn shops(&self) -> &ShopTracker {
        &self.shops
    }

    /// Fold one turn into the map and regenerate the description
    ///
    /// Fails if the glyph grid does not match the configured dimensions, or
    /// if the message is a shop greeting the entity list cannot back up.
    pub fn update(&mut self, obs: &Observation<'_>) -> Result<&str, MapError> {
        self.check_shape(obs.glyphs)?;

        let status = obs.status;
        let key = status.level_key();
        let (width, height) = self.config.dims();

        let level = self.levels.entry(key).or_insert_with(|| {
            debug!(level = %key, "new level");
            LevelState::new(key, width, height)
        });
        level.update(obs.glyphs, status.position, status.time, &self.classifier);
        self.current = Some(key);

        self.terrain
            .refresh(obs.glyphs, key, status.time, false, &self.classifier);
        self.shops
            .observe(obs.message, key, status.position, obs.entities)?;

        self.description = self.describe(obs.glyphs, key, status.position);
        Ok(&self.description)
    }

    /// Apply the result of a full terrain recall
    ///
    /// The surrounding loop performs the recall in game and passes the grid
    /// it showed; all features on it are remembered and the level's recall
    /// time is reset.
    pub fn recall(&mut self, glyphs: &Grid<Glyph>, status: &PlayerStatus) -> Result<(), MapError> {
        self.check_shape(glyphs)?;
        self.terrain
            .refresh(glyphs, status.level_key(), status.time, true, &self.classifier);
        Ok(())
    }

    /// Has more than the recall interval passed since the level's last
    /// full terrain recall?
    pub fn recall_due(&self, status: &PlayerStatus) -> bool {
        let last = self.terrain.last_recall(status.level_key());
        status.time.saturating_sub(last) > self.config.recall_interval
    }

    /// Is the cached dungeon overview missing or from another dungeon or
    /// depth?
    pub fn overview_due(&self, status: &PlayerStatus) -> bool {
        self.overview.as_ref().is_none_or(|o| {
            (o.dungeon_number, o.depth) != (status.dungeon_number, status.depth)
        })
    }

    /// Cache the dungeon overview text shown at `status`
    pub fn record_overview(&mut self, text: impl Into<String>, status: &PlayerStatus) {
        trace!(dungeon = status.dungeon_number, depth = status.depth, "overview cached");
        self.overview = Some(Overview {
            text: text.into(),
            dungeon_number: status.dungeon_number,
            depth: status.depth,
        });
    }

    /// Cached dungeon overview text (empty if none)
    pub fn overview(&self) -> &str {
        self.overview.as_ref().map_or("", |o| o.text.as_str())
    }

    fn check_shape(&self, glyphs: &Grid<Glyph>) -> Result<(), MapError> {
        if glyphs.dims() != self.config.dims() {
            return Err(MapError::GridShape {
                expected: self.config.dims(),
                found: glyphs.dims(),
            });
        }
        Ok(())
    }

    fn describe(&self, glyphs: &Grid<Glyph>, key: LevelKey, player: Position) -> String {
        let Some(level) = self.levels.get(&key) else {
            return String::new();
        };

        let regions = region::classify(level, &self.classifier);
        let revelable = revelable_positions(level, &regions);
        let dilated_corridors = regions.corridor_mask().dilate(Connectivity::Four);
        let dilated_closed_doors = self
            .classifier
            .mask(glyphs, GlyphClass::DOOR_CLOSED)
            .dilate(Connectivity::Four);
        let dilated_bars = self
            .classifier
            .mask(glyphs, GlyphClass::BARS)
            .dilate(Connectivity::Four);

        let describer = RoomDescriber {
            level,
            player,
            dilated_corridors: &dilated_corridors,
            dilated_closed_doors: &dilated_closed_doors,
            dilated_bars: &dilated_bars,
            revelable: &revelable,
            terrain: self.terrain.memory(key),
            shops: self.shops.records(key),
        };

        trace!(
            level = %key,
            rooms = regions.num_rooms(),
            corridors = regions.num_corridors(),
            "regions classified"
        );

        regions
            .room_ids()
            .flat_map(|id| describer.describe(id, &regions.room_mask(id)).lines())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
