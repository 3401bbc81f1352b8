use std::fmt;

use serde::{Deserialize, Serialize};

/// A fungible item category tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Currency awarded along most paths.
    Gold,
    /// Opens a treasure when paired with one.
    Key,
    /// Consumed together with a key.
    Treasure,
}

impl AssetKind {
    /// All asset kinds, in ledger column order.
    pub const ALL: [AssetKind; 3] = [AssetKind::Gold, AssetKind::Key, AssetKind::Treasure];

    /// The ledger column index for this kind.
    pub(crate) fn index(self) -> usize {
        match self {
            AssetKind::Gold => 0,
            AssetKind::Key => 1,
            AssetKind::Treasure => 2,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Gold => write!(f, "gold"),
            AssetKind::Key => write!(f, "key"),
            AssetKind::Treasure => write!(f, "treasure"),
        }
    }
}

/// A gold/key/treasure amount triple.
///
/// Used for node rewards and for the treasure-opening payout. Amounts may
/// be zero; [`ItemBundle::NONE`] is the empty bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBundle {
    /// Gold amount.
    pub gold: u64,
    /// Key amount.
    pub key: u64,
    /// Treasure amount.
    pub treasure: u64,
}

impl ItemBundle {
    /// The empty bundle.
    pub const NONE: ItemBundle = ItemBundle {
        gold: 0,
        key: 0,
        treasure: 0,
    };

    /// Create a bundle from explicit amounts.
    pub const fn new(gold: u64, key: u64, treasure: u64) -> Self {
        Self {
            gold,
            key,
            treasure,
        }
    }

    /// The amount of a single asset kind in this bundle.
    pub fn amount(&self, kind: AssetKind) -> u64 {
        match kind {
            AssetKind::Gold => self.gold,
            AssetKind::Key => self.key,
            AssetKind::Treasure => self.treasure,
        }
    }

    /// True if every amount is zero.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for ItemBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} gold, {} key, {} treasure",
            self.gold, self.key, self.treasure
        )
    }
}
