//! Map configuration

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::{COLNO, RECALL_INTERVAL, ROWNO};

/// Tunables for a [`DungeonMap`](crate::DungeonMap)
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use nh_textmap::MapConfig;
///
/// let config = MapConfig::from_json(r#"{ "recall_interval": 100 }"#).unwrap();
/// assert_eq!(config.recall_interval, 100);
/// assert_eq!(config.width, nh_textmap::COLNO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Number of map columns
    pub width: usize,
    /// Number of map rows
    pub height: usize,
    /// Game time that may elapse before a full terrain recall is due
    pub recall_interval: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: COLNO,
            height: ROWNO,
            recall_interval: RECALL_INTERVAL,
        }
    }
}

impl MapConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Map dimensions as (width, height)
    pub const fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
