//! The static adventure path graph for Grimpath.
//!
//! A fixed directed graph of 14 node types describing the adventure world:
//! display text, a rational death chance, item rewards, and up to three
//! outgoing edges per node. The graph is validated at construction and
//! read-only afterwards; the engine walks it but never changes it. Cycles
//! are legal — players can and do revisit nodes.

/// Error types for graph construction and lookup.
pub mod error;
/// The validated graph and the built-in standard world.
pub mod graph;
/// Node types: identifiers, death chances, and the nodes themselves.
pub mod node;

pub use error::{GraphError, GraphResult};
pub use graph::PathGraph;
pub use node::{DeathChance, NodeId, PathNode};
