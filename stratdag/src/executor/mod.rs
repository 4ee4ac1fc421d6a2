//! Execution: per-call context and history, the compiled plan, and the
//! timeout-bounded facade.

mod context;
mod dag_executor;
mod error;
mod plan;

pub use context::HistoryEntry;
pub use dag_executor::{DagExecutor, ExecuteResult};
pub use error::ExecuteError;
pub use plan::ExecutionPlan;
