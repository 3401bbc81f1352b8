//! The Grimpath adventure engine.
//!
//! `GameEngine` orchestrates per-player [`Session`] state against the fixed
//! [`gp_graph::PathGraph`], resolving each choice with an injected
//! [`Entropy`] source and settling rewards and penalties on the
//! [`gp_ledger::ItemLedger`] it controls. Every command is all-or-nothing:
//! a failed command leaves no observable state change.

/// The game engine: commands, queries, and outcome resolution.
pub mod engine;
/// Injected randomness for death rolls.
pub mod entropy;
/// Error types for engine commands and queries.
pub mod error;
/// Per-player session state and visit history.
pub mod session;
/// Durable snapshots of sessions and the ledger.
pub mod snapshot;

pub use engine::GameEngine;
pub use entropy::{Entropy, OsEntropy, SeededEntropy, SequenceEntropy};
pub use error::{EngineError, EngineResult};
pub use session::{Session, Status, VisitRecord};
pub use snapshot::Snapshot;
