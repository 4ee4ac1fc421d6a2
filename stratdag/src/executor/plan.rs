//! Compiled execution plan: the concurrent schedule derived once from a
//! graph and reused by arbitrarily many simultaneous calls.
//!
//! The plan walks the graph depth-first from the root. A linear stretch of
//! nodes runs as one sequential chain; a node with several dependents fans
//! out into one spawned task per child, each seeded with a clone of the
//! current context. Fan-in waits for every arm to finish (a fast failure
//! must not pre-empt a slower sibling's eventual success) and then picks
//! the first arm, in edge registration order, whose outcome is a success.
//! A node failure stops only its own path: downstream nodes are skipped,
//! not executed, and sibling branches keep racing.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::future::{join_all, BoxFuture};
use tokio::task::JoinHandle;
use tracing::{debug, error, trace};

use crate::executor::context::ExecutionContext;
use crate::graph::{process, DagNode, GraphError, StrategyGraph};
use crate::outcome::Outcome;

/// Reusable concurrent execution plan for one graph.
///
/// Cheap to clone; immutable and stateless with respect to any individual
/// call. All mutable state lives in the per-call [`ExecutionContext`], so a
/// single plan is safe to invoke from many callers at once.
pub struct ExecutionPlan<T> {
    inner: Arc<PlanInner<T>>,
}

impl<T> Clone for ExecutionPlan<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for ExecutionPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionPlan")
            .field("graph_id", &self.inner.graph_id)
            .field("nodes", &self.inner.nodes.len())
            .finish()
    }
}

struct PlanInner<T> {
    graph_id: String,
    nodes: HashMap<String, Arc<dyn DagNode<T>>>,
    children: HashMap<String, Vec<String>>,
    root: String,
}

impl<T> ExecutionPlan<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Freezes `graph` into a plan. Fails with [`GraphError::NotWhole`] iff
    /// the graph is not whole.
    pub fn compile(graph: StrategyGraph<T>) -> Result<Self, GraphError> {
        if !graph.is_whole() {
            return Err(GraphError::NotWhole {
                graph_id: graph.graph_id().to_owned(),
            });
        }
        let (graph_id, nodes, children, root) = graph.into_parts();
        let Some(root) = root else {
            return Err(GraphError::NotWhole { graph_id });
        };
        debug!(graph = %graph_id, nodes = nodes.len(), "compiled execution plan");
        Ok(Self {
            inner: Arc::new(PlanInner {
                graph_id,
                nodes,
                children,
                root,
            }),
        })
    }

    pub fn graph_id(&self) -> &str {
        &self.inner.graph_id
    }

    /// Starts one isolated run through the plan. The returned future owns
    /// everything it needs, so the caller may spawn it and let it outlive
    /// the plan handle.
    pub(crate) fn invoke(&self, input: Outcome<T>) -> BoxFuture<'static, ExecutionContext<T>> {
        let inner = Arc::clone(&self.inner);
        let root = inner.root.clone();
        inner.run_from(root, ExecutionContext::seed(input))
    }
}

impl<T> PlanInner<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Runs the chain starting at `start` to a path terminus and returns
    /// the sealed context. Boxed to support recursion through fan-out.
    fn run_from(
        self: Arc<Self>,
        start: String,
        mut ctx: ExecutionContext<T>,
    ) -> BoxFuture<'static, ExecutionContext<T>> {
        Box::pin(async move {
            let mut current = start;
            loop {
                let node = Arc::clone(
                    self.nodes
                        .get(&current)
                        .expect("compiled plan has all nodes"),
                );
                let outcome = process(node.as_ref(), ctx.outcome().clone()).await;
                ctx.advance(outcome, &current);

                // A failed node halts this path; downstream nodes are
                // skipped, not executed.
                if !ctx.outcome().is_success() {
                    ctx.seal();
                    return ctx;
                }

                let children = self.children.get(&current).map(Vec::as_slice).unwrap_or(&[]);
                match children {
                    [] => {
                        ctx.seal();
                        return ctx;
                    }
                    [only] => current = only.clone(),
                    _ => {
                        let arms = children.to_vec();
                        return self.race(arms, ctx).await;
                    }
                }
            }
        })
    }

    /// Fan-out/fan-in: one spawned task per arm, all awaited, first
    /// success in registration order wins. When no arm succeeds the last
    /// arm's context is returned with the no-candidate outcome, keeping
    /// the last attempted path in history.
    async fn race(
        self: Arc<Self>,
        arms: Vec<String>,
        ctx: ExecutionContext<T>,
    ) -> ExecutionContext<T> {
        let parent = ctx.node().to_owned();
        trace!(node = %parent, arms = arms.len(), "fanning out");

        let handles: Vec<JoinHandle<ExecutionContext<T>>> = arms
            .iter()
            .map(|arm| tokio::spawn(Arc::clone(&self).run_from(arm.clone(), ctx.clone())))
            .collect();

        let mut candidates: Vec<ExecutionContext<T>> = Vec::with_capacity(arms.len());
        for (result, arm) in join_all(handles).await.into_iter().zip(&arms) {
            match result {
                Ok(candidate) => candidates.push(candidate),
                Err(join_error) => {
                    error!(node = %arm, error = %join_error, "branch task failed");
                }
            }
        }

        if let Some(winner) = candidates.iter().position(|c| c.outcome().is_success()) {
            trace!(node = %parent, winner = candidates[winner].node(), "arbitration picked a winner");
            return candidates.swap_remove(winner);
        }

        trace!(node = %parent, "no branch produced a candidate");
        match candidates.pop() {
            Some(mut last) => {
                last.mark_no_result();
                last
            }
            None => {
                let mut ctx = ctx;
                ctx.mark_no_result();
                ctx.seal();
                ctx
            }
        }
    }
}
