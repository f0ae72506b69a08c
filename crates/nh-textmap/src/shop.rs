//! Shop registry (shknam.c shop types)
//!
//! Shops are noticed through the shopkeeper's greeting
//! ("Welcome to Asidonhopo's general store!"). The shop is pinned to the
//! position of the greeting shopkeeper so later descriptions can name the
//! room it stands in.

use std::sync::LazyLock;

use hashbrown::HashMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::SHOPKEEPER_NAME;
use crate::error::MapError;
use crate::grid::Position;
use crate::level::LevelKey;

/// Shop types, numbered like NetHack's room types (SHOPBASE = 14)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum ShopKind {
    #[strum(serialize = "general store")]
    General = 14,
    #[strum(serialize = "used armor dealership")]
    Armor = 15,
    #[strum(serialize = "second-hand bookstore")]
    Scroll = 16,
    #[strum(serialize = "liquor emporium")]
    Potion = 17,
    #[strum(serialize = "antique weapons outlet")]
    Weapon = 18,
    #[strum(serialize = "delicatessen")]
    Food = 19,
    #[strum(serialize = "jewelers")]
    Ring = 20,
    #[strum(serialize = "quality apparel and accessories")]
    Wand = 21,
    #[strum(serialize = "hardware store")]
    Tool = 22,
    #[strum(serialize = "rare books")]
    Book = 23,
    #[strum(serialize = "health food store")]
    HealthFood = 24,
    #[strum(serialize = "lighting store")]
    Candle = 25,
}

impl ShopKind {
    /// Room type id
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Name used in greetings and descriptions
    pub const fn name(self) -> &'static str {
        match self {
            ShopKind::General => "general store",
            ShopKind::Armor => "used armor dealership",
            ShopKind::Scroll => "second-hand bookstore",
            ShopKind::Potion => "liquor emporium",
            ShopKind::Weapon => "antique weapons outlet",
            ShopKind::Food => "delicatessen",
            ShopKind::Ring => "jewelers",
            ShopKind::Wand => "quality apparel and accessories",
            ShopKind::Tool => "hardware store",
            ShopKind::Book => "rare books",
            ShopKind::HealthFood => "health food store",
            ShopKind::Candle => "lighting store",
        }
    }

    /// Look up a shop type by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

static WELCOME: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<String> = ShopKind::iter().map(|k| regex::escape(k.name())).collect();
    let pattern = format!(r"(?i)Welcome( again)? to [a-zA-Z' ]*({})!", names.join("|"));
    Regex::new(&pattern).expect("shop greeting pattern is built from literal names")
});

/// A creature visible this turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Position,
    pub name: String,
}

impl Entity {
    pub fn new(position: Position, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
        }
    }
}

/// A shop noticed on a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopRecord {
    /// Shop type name, e.g. "general store"
    pub name: &'static str,
    pub kind: ShopKind,
    /// Where the greeting shopkeeper stood
    pub shopkeeper_position: Position,
}

/// Shops noticed on every level of the episode
///
/// Records are appended on every greeting; visiting the same shop twice
/// yields two records.
#[derive(Debug, Clone, Default)]
pub struct ShopTracker {
    shops: HashMap<LevelKey, Vec<ShopRecord>>,
}

impl ShopTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shops recorded on a level, in the order they were noticed
    pub fn records(&self, key: LevelKey) -> &[ShopRecord] {
        self.shops.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Forget every level
    pub fn clear(&mut self) {
        self.shops.clear();
    }

    /// Record a shop if `message` is a shopkeeper greeting
    ///
    /// The shop is placed at the shopkeeper closest to the player. A
    /// greeting with no shopkeeper in view, or naming an unknown shop type,
    /// means the observation pipeline is broken and is reported as an
    /// error.
    pub fn observe(
        &mut self,
        message: &str,
        key: LevelKey,
        player: Position,
        entities: &[Entity],
    ) -> Result<Option<&ShopRecord>, MapError> {
        let Some(captures) = WELCOME.captures(message) else {
            return Ok(None);
        };
        let shop_name = captures.get(2).map_or("", |m| m.as_str());
        let kind = ShopKind::from_name(shop_name).ok_or_else(|| MapError::UnknownShopType {
            name: shop_name.to_string(),
        })?;

        let shopkeeper = entities
            .iter()
            .filter(|e| e.name == SHOPKEEPER_NAME)
            .min_by_key(|e| e.position.distance_sq(player))
            .ok_or_else(|| MapError::MissingShopkeeper {
                message: message.to_string(),
            })?;

        debug!(level = %key, shop = kind.name(), position = %shopkeeper.position, "shop recorded");
        let records = self.shops.entry(key).or_default();
        records.push(ShopRecord {
            name: kind.name(),
            kind,
            shopkeeper_position: shopkeeper.position,
        });
        Ok(records.last())
    }
}
