//! Node contract: one `run` operation per node, with every failure mode
//! (error, absent value, abort, panic) folded into a single [`Outcome`] by
//! the engine-side wrapper.

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{error, trace};

use crate::outcome::{NodeFailure, Outcome};

/// Role of a node inside the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Entry node; exactly one per graph, no incoming edges.
    Root,
    /// Business logic node.
    Logic,
    /// Sink node; exactly one per graph, no outgoing edges.
    Final,
}

/// What node logic hands back to the engine.
///
/// `Ok(Some(value))` continues downstream, `Ok(None)` is treated as a
/// failure ("produced no result"), `Err` stops the branch with the given
/// kind. Aborting via [`DagNode::abort`] is the recommended way to prune a
/// branch: it keeps "did not apply" distinguishable from "broke".
pub type NodeResult<T> = Result<Option<T>, NodeFailure>;

/// A named unit of graph logic.
///
/// Implementations supply a unique, stable name, a kind, and the `run`
/// operation. Nodes are immutable once added to a graph and must be safe to
/// call from many concurrent executions.
#[async_trait]
pub trait DagNode<T>: Send + Sync {
    /// Unique name inside the graph.
    fn name(&self) -> &str;

    fn kind(&self) -> NodeKind {
        NodeKind::Logic
    }

    /// Business logic. The input is the upstream node's outcome, which the
    /// scheduler guarantees to be a success.
    async fn run(&self, input: Outcome<T>) -> NodeResult<T>;

    /// Prunes this branch intentionally: `return self.abort();`.
    fn abort(&self) -> NodeResult<T> {
        Err(NodeFailure::Abort)
    }
}

/// Built-in pass-through entry node, named "root".
#[derive(Debug, Default)]
pub struct RootNode;

#[async_trait]
impl<T> DagNode<T> for RootNode
where
    T: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "root"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Root
    }

    async fn run(&self, input: Outcome<T>) -> NodeResult<T> {
        Ok(input.payload().cloned())
    }
}

/// Built-in pass-through sink node, named "final".
#[derive(Debug, Default)]
pub struct FinalNode;

#[async_trait]
impl<T> DagNode<T> for FinalNode
where
    T: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "final"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Final
    }

    async fn run(&self, input: Outcome<T>) -> NodeResult<T> {
        Ok(input.payload().cloned())
    }
}

/// Engine-side execution wrapper around [`DagNode::run`].
///
/// Always terminal: node errors, absent values and panics all come back as
/// a failed [`Outcome`], never as an escaping panic. The outcome is
/// classified here for observability only; the scheduler treats every
/// failure kind the same.
pub(crate) async fn process<T>(node: &dyn DagNode<T>, input: Outcome<T>) -> Outcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    let name = node.name();
    let outcome = match AssertUnwindSafe(node.run(input)).catch_unwind().await {
        Ok(Ok(Some(value))) => Outcome::Success(value),
        Ok(Ok(None)) => Outcome::Failure(NodeFailure::Missing(name.to_owned())),
        Ok(Err(failure)) => Outcome::Failure(failure),
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic".to_owned());
            Outcome::Failure(NodeFailure::failed(format!(
                "node `{name}` panicked: {message}"
            )))
        }
    };

    match &outcome {
        Outcome::Failure(failure) if failure.is_abort() => {
            trace!(node = name, "branch aborted");
        }
        Outcome::Failure(failure) => {
            error!(node = name, %failure, "node failed");
        }
        Outcome::Success(_) => {
            trace!(node = name, "node succeeded");
        }
    }
    outcome
}
