//! Errors raised while folding observations into the map

use thiserror::Error;

/// Contract violations between the observation pipeline and the map
#[derive(Error, Debug)]
pub enum MapError {
    #[error("Shop greeting without a visible shopkeeper: '{message}'")]
    MissingShopkeeper { message: String },

    /// Greeting matched a shop name the [`ShopKind`](crate::ShopKind) table
    /// cannot resolve. The greeting pattern is built from that table, so
    /// this only fires if the two drift apart.
    #[error("Unknown shop type '{name}'")]
    UnknownShopType { name: String },

    #[error("Glyph grid is {found:?} (width, height), expected {expected:?}")]
    GridShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Invalid map configuration: {0}")]
    Config(#[from] serde_json::Error),
}
