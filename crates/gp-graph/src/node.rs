use std::fmt;

use serde::{Deserialize, Serialize};

use gp_ledger::ItemBundle;

/// Stable small-integer identifier of a path node, the graph's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u8);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rational probability of dying on arrival at a node via a choice.
///
/// A numerator or denominator of zero means the node can never kill,
/// regardless of any draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathChance {
    /// Number of fatal outcomes out of `denominator`.
    pub numerator: u32,
    /// Size of the outcome space; zero disables the check entirely.
    pub denominator: u32,
}

impl DeathChance {
    /// A node that never kills.
    pub const NONE: DeathChance = DeathChance {
        numerator: 0,
        denominator: 0,
    };

    /// A chance of `numerator` in `denominator`.
    pub const fn of(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// True if this chance can never produce a death.
    pub fn is_harmless(&self) -> bool {
        self.numerator == 0 || self.denominator == 0
    }
}

impl fmt::Display for DeathChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_harmless() {
            write!(f, "none")
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// One location in the adventure world.
///
/// Display text is opaque to the engine; only the id, edges, death chance,
/// reward, and winning flag drive behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    /// The node's identifier.
    pub id: NodeId,
    /// Short display name.
    pub name: String,
    /// Description shown on arrival.
    pub description: String,
    /// Description shown when the player dies here.
    pub death_description: String,
    /// Outgoing edges in choice order, 0 to 3 entries. Empty means terminal.
    pub next: Vec<NodeId>,
    /// True for the single winning ending.
    pub is_winning: bool,
    /// Probability of dying on arrival via a choice.
    pub death_chance: DeathChance,
    /// Items minted to the player on a surviving arrival.
    pub reward: ItemBundle,
}

impl PathNode {
    /// Create a node with no edges, no reward, and no death chance.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            death_description: String::new(),
            next: Vec::new(),
            is_winning: false,
            death_chance: DeathChance::NONE,
            reward: ItemBundle::NONE,
        }
    }

    /// Set the arrival description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Set the death description.
    pub fn death_text(mut self, text: impl Into<String>) -> Self {
        self.death_description = text.into();
        self
    }

    /// Set the outgoing edges.
    pub fn leads_to(mut self, ids: impl IntoIterator<Item = u8>) -> Self {
        self.next = ids.into_iter().map(NodeId).collect();
        self
    }

    /// Set the death chance.
    pub fn deadly(mut self, numerator: u32, denominator: u32) -> Self {
        self.death_chance = DeathChance::of(numerator, denominator);
        self
    }

    /// Set the arrival reward.
    pub fn rewards(mut self, gold: u64, key: u64, treasure: u64) -> Self {
        self.reward = ItemBundle::new(gold, key, treasure);
        self
    }

    /// Mark this node as the winning ending.
    pub fn winning(mut self) -> Self {
        self.is_winning = true;
        self
    }

    /// True if the node has no outgoing edges.
    pub fn is_terminal(&self) -> bool {
        self.next.is_empty()
    }
}
