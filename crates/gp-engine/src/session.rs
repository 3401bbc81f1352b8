//! Per-player session state.
//!
//! A session is lazily created on a player's first `start_game` and is only
//! ever written by the engine. Its history is an append-only log of visit
//! records, oldest first, reset on each new game.

use std::fmt;

use serde::{Deserialize, Serialize};

use gp_graph::NodeId;
use gp_ledger::ItemBundle;

/// Where a player stands in the adventure state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// No game has ever been started.
    #[default]
    NotStarted,
    /// A run is underway; `choose_path` is valid.
    InProgress,
    /// The last choice was fatal. Only `start_game` is valid.
    Dead,
    /// The player reached the winning node. Only `start_game` is valid.
    Won,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NotStarted => write!(f, "not started"),
            Status::InProgress => write!(f, "in progress"),
            Status::Dead => write!(f, "dead"),
            Status::Won => write!(f, "won"),
        }
    }
}

/// One arrival at a node, recorded at the moment of that transition and
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// The node arrived at.
    pub node: NodeId,
    /// Gold minted on this arrival.
    pub gold: u64,
    /// Keys minted on this arrival.
    pub key: u64,
    /// Treasures minted on this arrival.
    pub treasure: u64,
    /// True if this arrival killed the player (no rewards minted).
    pub died: bool,
}

impl VisitRecord {
    /// A surviving arrival with the given minted bundle.
    pub fn survived(node: NodeId, reward: ItemBundle) -> Self {
        Self {
            node,
            gold: reward.gold,
            key: reward.key,
            treasure: reward.treasure,
            died: false,
        }
    }

    /// A fatal arrival. Nothing is minted.
    pub fn fatal(node: NodeId) -> Self {
        Self {
            node,
            gold: 0,
            key: 0,
            treasure: 0,
            died: true,
        }
    }
}

/// A player's mutable progress: status, current node, and visit history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    status: Status,
    current: Option<NodeId>,
    history: Vec<VisitRecord>,
}

impl Session {
    /// The player's status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The current node. `None` exactly when the status is
    /// [`Status::NotStarted`].
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// The visit history, oldest first.
    pub fn history(&self) -> &[VisitRecord] {
        &self.history
    }

    /// Begin a fresh run at `initial`. Valid from any status; an in-flight
    /// run is simply abandoned. History is cleared and no record is
    /// appended for the initial node.
    pub fn restart(&mut self, initial: NodeId) {
        self.status = Status::InProgress;
        self.current = Some(initial);
        self.history.clear();
    }

    /// Record a surviving arrival, moving to [`Status::Won`] if the node
    /// was the winning one.
    pub fn advance(&mut self, record: VisitRecord, winning: bool) {
        self.current = Some(record.node);
        self.history.push(record);
        self.status = if winning {
            Status::Won
        } else {
            Status::InProgress
        };
    }

    /// Record a fatal arrival.
    pub fn kill(&mut self, record: VisitRecord) {
        self.current = Some(record.node);
        self.history.push(record);
        self.status = Status::Dead;
    }
}
