//! Structural graph errors.
//!
//! Raised synchronously while building a graph or compiling it into a plan;
//! a rejected call leaves the graph unchanged.

use thiserror::Error;

/// Error when building or compiling a strategy graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node with the same name is already registered.
    #[error("node `{name}` already exists in graph `{graph_id}`")]
    DuplicateNode { graph_id: String, name: String },

    /// The graph already has a root node.
    #[error("graph `{graph_id}` already has a root node")]
    DuplicateRoot { graph_id: String },

    /// The graph already has a final node.
    #[error("graph `{graph_id}` already has a final node")]
    DuplicateFinal { graph_id: String },

    /// An edge endpoint names a node that was never registered.
    #[error("no node named `{name}` in graph `{graph_id}`")]
    UnknownNode { graph_id: String, name: String },

    /// The exact edge is already present.
    #[error("edge `{from}->{to}` already exists in graph `{graph_id}`")]
    DuplicateEdge {
        graph_id: String,
        from: String,
        to: String,
    },

    /// The root node may not have incoming edges.
    #[error("edge `{from}->{to}` may not terminate at the root node")]
    EdgeIntoRoot { from: String, to: String },

    /// The final node is a pure sink and may not have outgoing edges.
    #[error("edge `{from}->{to}` may not originate at the final node")]
    EdgeOutOfFinal { from: String, to: String },

    /// The graph is missing a root, a final, or enough nodes to execute.
    #[error("graph `{graph_id}` is not whole: it needs a root node, a final node and at least two nodes")]
    NotWhole { graph_id: String },
}
