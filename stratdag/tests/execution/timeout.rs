//! Deadline behavior: the facade's wait is bounded, the in-flight run is
//! not cancelled.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use stratdag::{DagExecutor, ExecuteError, FinalNode, Outcome, RootNode, StrategyGraph};

use crate::common::AppendNode;

fn slow_graph(slow: AppendNode, tail: AppendNode) -> StrategyGraph<String> {
    let mut graph = StrategyGraph::new("slow");
    graph.add_node(Arc::new(RootNode)).unwrap();
    graph.add_node(Arc::new(FinalNode)).unwrap();
    graph.add_node(Arc::new(slow)).unwrap();
    graph.add_node(Arc::new(tail)).unwrap();
    graph.add_edge_from_root("slow").unwrap();
    graph.add_edge("tail", "slow").unwrap();
    graph.add_edge_to_final("tail").unwrap();
    graph
}

/// **Scenario**: a node sleeping past the deadline makes execute return
/// Timeout at or after the deadline, never before.
#[tokio::test]
async fn slow_node_times_out_at_the_deadline() {
    let executor = DagExecutor::new(slow_graph(
        AppendNode::new("slow").delayed(300),
        AppendNode::new("tail"),
    ))
    .unwrap();

    let deadline = Duration::from_millis(50);
    let started = Instant::now();
    let err = executor
        .execute(Outcome::success("in".to_owned()), deadline)
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, ExecuteError::Timeout(t) if t == deadline), "{err}");
    assert!(elapsed >= deadline, "returned before the deadline: {elapsed:?}");
}

/// **Scenario**: the same graph completes normally under a generous
/// deadline.
#[tokio::test]
async fn slow_node_completes_within_a_generous_deadline() {
    let executor = DagExecutor::new(slow_graph(
        AppendNode::new("slow").delayed(20),
        AppendNode::new("tail"),
    ))
    .unwrap();

    let result = executor
        .execute(Outcome::success("in".to_owned()), Duration::from_secs(2))
        .await
        .unwrap();
    assert_eq!(
        result.outcome.payload().map(String::as_str),
        Some("in+slow+tail")
    );
}

/// **Scenario**: a timed-out run keeps executing in the background; the
/// node downstream of the slow one still runs after the caller has given
/// up.
#[tokio::test]
async fn timed_out_run_continues_in_the_background() {
    let slow = AppendNode::new("slow").delayed(100);
    let tail = AppendNode::new("tail");
    let visits_tail = tail.visits();

    let executor = DagExecutor::new(slow_graph(slow, tail)).unwrap();
    let err = executor
        .execute(Outcome::success("in".to_owned()), Duration::from_millis(20))
        .await
        .unwrap_err();
    assert!(matches!(err, ExecuteError::Timeout(_)), "{err}");
    assert_eq!(visits_tail.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(visits_tail.load(Ordering::SeqCst), 1);
}
