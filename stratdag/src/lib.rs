//! # stratdag
//!
//! A decision DAG engine: execute a business decision as a directed acyclic
//! graph of small logic nodes, where exactly one root-to-sink path is
//! expected to produce the final answer and other paths prune themselves by
//! aborting. The caller gets the winning [`Outcome`] plus the ordered trace
//! of the winning path, bounded by a wall-clock timeout.
//!
//! ## Design Principles
//!
//! - **One payload type per graph**: every node consumes and produces
//!   `Outcome<T>` for the graph's `T`; no downcasting.
//! - **Compile once, run many**: a [`StrategyGraph`] is built by a single
//!   owner, frozen into an [`ExecutionPlan`], and invoked concurrently from
//!   arbitrarily many callers. Per-call state lives in a private context
//!   that is cloned, never shared, at every fork.
//! - **Branches race, first registered success wins**: a node with several
//!   dependents fans out into concurrent arms; fan-in waits for all of them
//!   and picks the first success in edge registration order, so arbitration
//!   is deterministic even though completion order is not.
//! - **Aborting is first-class**: a node prunes its branch with the quiet
//!   [`NodeFailure::Abort`] kind, keeping "did not apply" distinguishable
//!   from "broke" in the trace.
//!
//! ## Main Modules
//!
//! - [`graph`]: [`DagNode`], [`NodeKind`], [`StrategyGraph`] — declare nodes
//!   and wire the graph.
//! - [`executor`]: [`ExecutionPlan`], [`DagExecutor`], [`ExecuteResult`] —
//!   compile and run.
//! - [`outcome`]: [`Outcome`], [`NodeFailure`] — the value flowing through.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use async_trait::async_trait;
//! use stratdag::{
//!     DagExecutor, DagNode, FinalNode, NodeResult, Outcome, RootNode, StrategyGraph,
//! };
//!
//! struct Double;
//!
//! #[async_trait]
//! impl DagNode<i64> for Double {
//!     fn name(&self) -> &str {
//!         "double"
//!     }
//!
//!     async fn run(&self, input: Outcome<i64>) -> NodeResult<i64> {
//!         Ok(input.payload().map(|v| v * 2))
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = StrategyGraph::new("quickstart");
//! graph.add_node(Arc::new(RootNode))?;
//! graph.add_node(Arc::new(FinalNode))?;
//! graph.add_node(Arc::new(Double))?;
//! graph.add_edge_from_root("double")?;
//! graph.add_edge_to_final("double")?;
//!
//! let executor = DagExecutor::new(graph)?;
//! let result = executor
//!     .execute(Outcome::success(21), Duration::from_millis(100))
//!     .await?;
//! assert_eq!(result.outcome.payload(), Some(&42));
//! # Ok(())
//! # }
//! ```

pub mod executor;
pub mod graph;
pub mod outcome;

pub use executor::{DagExecutor, ExecuteError, ExecuteResult, ExecutionPlan, HistoryEntry};
pub use graph::{AdjacencyMatrix, DagNode, FinalNode, GraphError, NodeKind, NodeResult, RootNode, StrategyGraph};
pub use outcome::{NodeFailure, Outcome};
