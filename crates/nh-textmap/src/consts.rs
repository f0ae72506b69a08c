//! Map constants
//!
//! Derived from include/config.h and the NLE observation layout.

/// Map dimensions
pub const COLNO: usize = 80;
pub const ROWNO: usize = 21;

/// Game time between two full terrain recalls
pub const RECALL_INTERVAL: u64 = 50;

/// Name the game gives every shopkeeper entity
pub const SHOPKEEPER_NAME: &str = "shopkeeper";
