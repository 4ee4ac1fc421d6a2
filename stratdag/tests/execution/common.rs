//! Shared test node: appends its own name to a string payload, with
//! switches for the failure modes under test.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stratdag::{DagNode, HistoryEntry, NodeFailure, NodeResult, Outcome};

#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    Abort,
    Fail,
    Empty,
}

/// Logic node for tests: on success it turns payload `p` into `p+<name>`.
pub struct AppendNode {
    name: String,
    behavior: Behavior,
    delay: Option<Duration>,
    visits: Arc<AtomicUsize>,
}

impl AppendNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behavior: Behavior::Succeed,
            delay: None,
            visits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Prunes its branch via the abort helper.
    pub fn aborting(mut self) -> Self {
        self.behavior = Behavior::Abort;
        self
    }

    /// Fails with an opaque error.
    pub fn failing(mut self) -> Self {
        self.behavior = Behavior::Fail;
        self
    }

    /// Completes without producing a value.
    pub fn empty(mut self) -> Self {
        self.behavior = Behavior::Empty;
        self
    }

    /// Sleeps before acting, to skew branch completion order.
    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Some(Duration::from_millis(millis));
        self
    }

    /// Handle onto this node's visit counter; grab it before `Arc::new`.
    pub fn visits(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.visits)
    }
}

#[async_trait]
impl DagNode<String> for AppendNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, input: Outcome<String>) -> NodeResult<String> {
        self.visits.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.behavior {
            Behavior::Abort => self.abort(),
            Behavior::Fail => Err(NodeFailure::failed(format!("{} exploded", self.name))),
            Behavior::Empty => Ok(None),
            Behavior::Succeed => Ok(input
                .payload()
                .map(|payload| format!("{payload}+{}", self.name))),
        }
    }
}

/// Node names of a history trace, oldest first.
pub fn names(history: &[HistoryEntry<String>]) -> Vec<&str> {
    history.iter().map(|entry| entry.node.as_str()).collect()
}
