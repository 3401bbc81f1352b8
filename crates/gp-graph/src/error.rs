use crate::node::NodeId;

/// Alias for `Result<T, GraphError>`.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur when building or querying a path graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The requested node ID is not defined in the graph.
    #[error("path node not found: {0}")]
    NodeNotFound(NodeId),

    /// The node set failed well-formedness validation.
    #[error("malformed path graph: {0}")]
    Malformed(String),
}
