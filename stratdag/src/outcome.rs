//! Outcome: the tagged success/failure value produced by every node.
//!
//! Built only through `Outcome::success`, `Outcome::failure` and
//! `Outcome::abort`. The outcome carries no node identity of its own; the
//! execution context attaches the producing node's name.

use thiserror::Error;

/// Why a node (or a whole run) did not produce a usable result.
///
/// The scheduler treats every kind the same way: the branch it occurred on
/// stops producing candidates. The kinds only differ in how they are
/// observed: [`NodeFailure::Abort`] is a quiet, intentional branch
/// termination, everything else is unexpected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeFailure {
    /// The node opted out of this execution on purpose.
    #[error("branch aborted")]
    Abort,

    /// Node logic completed but yielded no value.
    #[error("node `{0}` produced no result")]
    Missing(String),

    /// No branch produced a candidate result for the run.
    #[error("no result")]
    NoResult,

    /// Opaque error raised by node logic.
    #[error("{0}")]
    Failed(String),
}

impl NodeFailure {
    /// Wraps an arbitrary error message as an opaque node failure.
    pub fn failed(message: impl Into<String>) -> Self {
        NodeFailure::Failed(message.into())
    }

    /// True for the intentional branch-pruning kind.
    pub fn is_abort(&self) -> bool {
        matches!(self, NodeFailure::Abort)
    }
}

/// Immutable result wrapper flowing between nodes.
///
/// Generic over the graph's payload type `T`; one payload type per graph,
/// no downcasting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The node produced a usable value for downstream nodes.
    Success(T),
    /// The branch stops here; see [`NodeFailure`] for why.
    Failure(NodeFailure),
}

impl<T> Outcome<T> {
    /// Wraps a payload as a successful outcome.
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Wraps a failure kind as a failed outcome.
    pub fn failure(failure: NodeFailure) -> Self {
        Outcome::Failure(failure)
    }

    /// A failed outcome carrying the abort sentinel.
    pub fn abort() -> Self {
        Outcome::Failure(NodeFailure::Abort)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The payload, when successful.
    pub fn payload(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The failure kind, when failed.
    pub fn error(&self) -> Option<&NodeFailure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }
}
