//! nh-textmap: Dungeon map memory and text description for NetHack observations
//!
//! Turns the per-turn glyph grid reported by the game into a persistent
//! belief about each dungeon level, splits its walkable space into rooms
//! and corridors, and renders a short description of every known room.
//!
//! The crate does no I/O. Glyph categories come from a [`GlyphClassifier`],
//! with [`NetHackGlyphs`] covering the NLE glyph layout.

pub mod config;
pub mod describe;
pub mod error;
pub mod features;
pub mod glyph;
pub mod grid;
pub mod level;
pub mod map;
pub mod region;
pub mod shop;

mod consts;

pub use config::MapConfig;
pub use consts::*;
pub use describe::{Direction, DistanceBucket, ExplorationState, RoomDescriber, RoomDescription};
pub use error::MapError;
pub use features::{FeatureKind, TerrainFeatureMemory, TerrainFeatureTracker};
pub use glyph::{Glyph, GlyphClass, GlyphClassifier, NetHackGlyphs};
pub use grid::{Connectivity, Grid, Label, Mask, Position};
pub use level::{LevelKey, LevelState};
pub use map::{DungeonMap, Observation, PlayerStatus};
pub use region::RegionLabeling;
pub use shop::{Entity, ShopKind, ShopRecord, ShopTracker};
