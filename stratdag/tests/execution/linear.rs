//! Sequential chain execution: order, visit counts, history shape.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use stratdag::{DagExecutor, DagNode, FinalNode, Outcome, RootNode, StrategyGraph};

use crate::common::{names, AppendNode};

const TIMEOUT: Duration = Duration::from_secs(1);

fn chain_graph(links: Vec<AppendNode>) -> StrategyGraph<String> {
    let mut graph = StrategyGraph::new("chain");
    graph.add_node(Arc::new(RootNode)).unwrap();
    graph.add_node(Arc::new(FinalNode)).unwrap();
    let link_names: Vec<String> = links.iter().map(|l| l.name().to_owned()).collect();
    for link in links {
        graph.add_node(Arc::new(link)).unwrap();
    }
    graph.add_edge_from_root(&link_names[0]).unwrap();
    for pair in link_names.windows(2) {
        graph.add_edge(&pair[1], &pair[0]).unwrap();
    }
    graph.add_edge_to_final(link_names.last().unwrap()).unwrap();
    graph
}

/// **Scenario**: a pure linear chain visits every node exactly once, in
/// topological order, and history length equals chain length.
#[tokio::test]
async fn linear_chain_runs_in_order_with_full_history() {
    let a = AppendNode::new("a");
    let b = AppendNode::new("b");
    let (visits_a, visits_b) = (a.visits(), b.visits());

    let executor = DagExecutor::new(chain_graph(vec![a, b])).unwrap();
    let result = executor
        .execute(Outcome::success("in".to_owned()), TIMEOUT)
        .await
        .unwrap();

    assert_eq!(result.outcome.payload().map(String::as_str), Some("in+a+b"));
    assert_eq!(result.node, "final");
    assert_eq!(names(&result.history), ["root", "a", "b", "final"]);
    assert_eq!(visits_a.load(Ordering::SeqCst), 1);
    assert_eq!(visits_b.load(Ordering::SeqCst), 1);
}

/// **Scenario**: each history entry carries the outcome its node produced,
/// with the terminal node sealed as the last entry.
#[tokio::test]
async fn history_records_each_nodes_outcome() {
    let executor =
        DagExecutor::new(chain_graph(vec![AppendNode::new("a"), AppendNode::new("b")])).unwrap();
    let result = executor
        .execute(Outcome::success("in".to_owned()), TIMEOUT)
        .await
        .unwrap();

    let payloads: Vec<_> = result
        .history
        .iter()
        .map(|entry| entry.outcome.payload().map(String::as_str))
        .collect();
    assert_eq!(
        payloads,
        [Some("in"), Some("in+a"), Some("in+a+b"), Some("in+a+b")]
    );
}

/// **Scenario**: the same executor produces identical results across
/// repeated sequential calls (the plan holds no per-call state).
#[tokio::test]
async fn repeated_calls_are_independent() {
    let executor = DagExecutor::new(chain_graph(vec![AppendNode::new("a")])).unwrap();
    for round in 0..3 {
        let input = format!("run{round}");
        let result = executor
            .execute(Outcome::success(input.clone()), TIMEOUT)
            .await
            .unwrap();
        assert_eq!(
            result.outcome.payload().cloned(),
            Some(format!("{input}+a"))
        );
        assert_eq!(names(&result.history), ["root", "a", "final"]);
    }
}
