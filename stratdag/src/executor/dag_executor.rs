//! Executor facade: the timeout-bounded entry point over a compiled plan.

use std::time::Duration;

use tracing::{debug, warn};

use crate::executor::context::HistoryEntry;
use crate::executor::error::ExecuteError;
use crate::executor::plan::ExecutionPlan;
use crate::graph::{GraphError, StrategyGraph};
use crate::outcome::Outcome;

/// What one execution hands back to the caller: the winning outcome, the
/// name of the node that produced it, and the ordered trace of the winning
/// path (oldest first, terminal node last).
#[derive(Debug, Clone)]
pub struct ExecuteResult<T> {
    pub outcome: Outcome<T>,
    pub node: String,
    pub history: Vec<HistoryEntry<T>>,
}

/// Timeout-bounded executor over one compiled plan.
///
/// Compiled once at construction; safe to share and call concurrently,
/// every call runs with its own isolated context.
pub struct DagExecutor<T> {
    plan: ExecutionPlan<T>,
}

impl<T> DagExecutor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Compiles `graph` and wraps it. Fails iff the graph is not whole.
    pub fn new(graph: StrategyGraph<T>) -> Result<Self, GraphError> {
        Ok(Self {
            plan: graph.compile()?,
        })
    }

    /// Wraps an already compiled plan.
    pub fn from_plan(plan: ExecutionPlan<T>) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &ExecutionPlan<T> {
        &self.plan
    }

    /// Runs the plan with `input`, waiting up to `timeout`.
    ///
    /// A failed input never runs any node. On timeout the in-flight run is
    /// not cancelled; it finishes in the background and its result is
    /// dropped. A completed run always yields a well-formed result; when
    /// no branch produced a candidate the outcome is the "no result"
    /// failure kind and the history shows the last path attempted.
    pub async fn execute(
        &self,
        input: Outcome<T>,
        timeout: Duration,
    ) -> Result<ExecuteResult<T>, ExecuteError> {
        if !input.is_success() {
            return Err(ExecuteError::InputNotSuccess);
        }

        debug!(graph = %self.plan.graph_id(), "executing plan");
        let run = tokio::spawn(self.plan.invoke(input));
        match tokio::time::timeout(timeout, run).await {
            Ok(Ok(ctx)) => {
                let (outcome, node, history) = ctx.into_parts();
                debug!(
                    graph = %self.plan.graph_id(),
                    node = %node,
                    succeeded = outcome.is_success(),
                    "execution finished"
                );
                Ok(ExecuteResult {
                    outcome,
                    node,
                    history,
                })
            }
            Ok(Err(join_error)) => Err(ExecuteError::Runtime(join_error.to_string())),
            Err(_elapsed) => {
                warn!(graph = %self.plan.graph_id(), ?timeout, "execution timed out");
                Err(ExecuteError::Timeout(timeout))
            }
        }
    }
}
