//! stratdag demo binary: builds the showcase decision graph, executes it
//! with the given input, and prints the winning outcome plus its trace.
//!
//! The graph races two strategy subtrees; the switches `s1` and `i2` are
//! disabled, so the only live path is root → i1 → s4 → s5 → s6 → final.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use stratdag::{
    DagExecutor, DagNode, FinalNode, GraphError, NodeResult, Outcome, RootNode, StrategyGraph,
};

#[derive(Parser, Debug)]
#[command(name = "stratdag")]
#[command(about = "Decision DAG demo — race strategy subtrees to a single winner")]
struct Args {
    /// Input payload (also accepted as the first positional argument)
    #[arg(short, long, value_name = "TEXT")]
    input: Option<String>,

    /// Wall-clock timeout in milliseconds
    #[arg(short, long, default_value_t = 100)]
    timeout: u64,

    /// Print every root-to-sink path before executing
    #[arg(long)]
    paths: bool,

    /// Print the adjacency matrix before executing
    #[arg(long)]
    matrix: bool,

    /// Positional payload (when -i/--input is not used)
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,
}

fn get_input(args: &Args) -> String {
    if let Some(ref input) = args.input {
        return input.clone();
    }
    if args.rest.is_empty() {
        return "Haha".to_string();
    }
    args.rest.join(" ").trim().to_string()
}

/// Demo strategy node: appends its name to the payload, or opts out of the
/// run entirely when disabled.
struct StrategyNode {
    name: &'static str,
    enabled: bool,
}

impl StrategyNode {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            enabled: true,
        }
    }

    fn disabled(name: &'static str) -> Self {
        Self {
            name,
            enabled: false,
        }
    }
}

#[async_trait]
impl DagNode<String> for StrategyNode {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, input: Outcome<String>) -> NodeResult<String> {
        if !self.enabled {
            return self.abort();
        }
        Ok(input
            .payload()
            .map(|payload| format!("{payload}+{}", self.name)))
    }
}

fn build_graph() -> Result<StrategyGraph<String>, GraphError> {
    let mut graph = StrategyGraph::new("demo");
    graph.add_node(Arc::new(RootNode))?;
    graph.add_node(Arc::new(FinalNode))?;
    for node in [
        StrategyNode::disabled("s1"),
        StrategyNode::new("s2"),
        StrategyNode::new("s3"),
        StrategyNode::new("s4"),
        StrategyNode::new("s5"),
        StrategyNode::new("s6"),
        StrategyNode::new("i1"),
        StrategyNode::disabled("i2"),
    ] {
        graph.add_node(Arc::new(node))?;
    }

    graph.add_edge("s1", "root")?;
    graph.add_edge("i1", "root")?;
    graph.add_edge("s2", "s1")?;
    graph.add_edge("s3", "s1")?;
    graph.add_edge("s4", "i1")?;
    graph.add_edge("i2", "i1")?;
    graph.add_edge("s5", "s3")?;
    graph.add_edge("s5", "s4")?;
    graph.add_edge("s6", "s2")?;
    graph.add_edge("s6", "s5")?;
    graph.add_edge("s6", "i2")?;
    graph.add_edge("final", "s6")?;
    Ok(graph)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let input = get_input(&args);

    let graph = build_graph()?;
    if args.paths {
        for path in graph.all_paths() {
            println!("path: {}", path.join(" -> "));
        }
    }
    if args.matrix {
        println!("{}", graph.adjacency_matrix());
    }

    let executor = DagExecutor::new(graph)?;
    println!("input: {input}");
    println!("---");

    let result = match executor
        .execute(Outcome::success(input), Duration::from_millis(args.timeout))
        .await
    {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    match result.outcome.payload() {
        Some(payload) => println!("[{}] {payload}", result.node),
        None => {
            let failure = result
                .outcome
                .error()
                .map(ToString::to_string)
                .unwrap_or_default();
            println!("[{}] failed: {failure}", result.node);
        }
    }
    println!("history:");
    for entry in &result.history {
        match entry.outcome.payload() {
            Some(payload) => println!("  {} -> {payload}", entry.node),
            None => {
                let failure = entry
                    .outcome
                    .error()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                println!("  {} -> ({failure})", entry.node);
            }
        }
    }

    if !result.outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
