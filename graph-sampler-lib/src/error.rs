use crate::multigraph::{EdgeKey, NodeId};
use thiserror::Error;

/// Errors raised by the library.
///
/// All operations are deterministic computations over in-memory state,
/// so none of these are worth retrying with unchanged input.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("edge ({src}, {dst}, {key}) already exists")]
    DuplicateEdge {
        src: NodeId,
        dst: NodeId,
        key: EdgeKey,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}
