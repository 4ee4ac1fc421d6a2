//! Per-invocation execution context: the current outcome, the node that
//! produced it, and the append-only history of the path so far.
//!
//! A context is created fresh for every call and cloned, never shared,
//! whenever a path forks, so concurrent branches cannot contaminate each
//! other's trace.

use crate::outcome::{NodeFailure, Outcome};

/// Pseudo node name seeding a fresh context; never recorded in history.
pub(crate) const INPUT_NODE: &str = "input";

/// One step of the winning path: a node and the outcome it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry<T> {
    pub outcome: Outcome<T>,
    pub node: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ExecutionContext<T> {
    outcome: Outcome<T>,
    node: String,
    history: Vec<HistoryEntry<T>>,
}

impl<T> ExecutionContext<T>
where
    T: Clone,
{
    pub(crate) fn seed(input: Outcome<T>) -> Self {
        Self {
            outcome: input,
            node: INPUT_NODE.to_owned(),
            history: Vec::new(),
        }
    }

    pub(crate) fn outcome(&self) -> &Outcome<T> {
        &self.outcome
    }

    pub(crate) fn node(&self) -> &str {
        &self.node
    }

    /// Moves to the next node's outcome, folding the previous (outcome,
    /// node) pair into history. The input sentinel is not recorded.
    pub(crate) fn advance(&mut self, outcome: Outcome<T>, node: &str) {
        let previous = std::mem::replace(&mut self.outcome, outcome);
        let previous_node = std::mem::replace(&mut self.node, node.to_owned());
        if previous_node != INPUT_NODE {
            self.history.push(HistoryEntry {
                outcome: previous,
                node: previous_node,
            });
        }
    }

    /// Folds the current (outcome, node) pair into history as the trace's
    /// last entry. Called once per path terminus.
    pub(crate) fn seal(&mut self) {
        self.history.push(HistoryEntry {
            outcome: self.outcome.clone(),
            node: self.node.clone(),
        });
    }

    /// Replaces the outcome with the no-candidate kind, keeping the history
    /// so the last attempted path stays inspectable.
    pub(crate) fn mark_no_result(&mut self) {
        self.outcome = Outcome::Failure(NodeFailure::NoResult);
    }

    pub(crate) fn into_parts(self) -> (Outcome<T>, String, Vec<HistoryEntry<T>>) {
        (self.outcome, self.node, self.history)
    }
}
