use gp_graph::GraphError;
use gp_ledger::LedgerError;

use crate::session::Status;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by engine commands and queries.
///
/// Every error is terminal for the triggering command: no partial state
/// change is ever observable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The command is not valid for the player's current status.
    #[error("command not valid while {status}")]
    InvalidState {
        /// The player's status at the time of the call.
        status: Status,
    },

    /// The choice index is out of range for the current node.
    #[error("invalid choice {index}: current path offers {available} choices")]
    InvalidChoice {
        /// The index the player supplied.
        index: usize,
        /// How many choices the current node actually offers.
        available: usize,
    },

    /// Opening a treasure requires at least one key and one treasure.
    #[error("opening a treasure requires at least 1 key and 1 treasure")]
    InsufficientItems,

    /// A graph lookup failed. Should not occur with a well-formed graph,
    /// but is checked rather than assumed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
