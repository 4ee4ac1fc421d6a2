//! Strategy graph: node store plus an ordered children relation.
//!
//! Built incrementally by a single owner (`add_node` / `add_edge`), then
//! frozen by `compile` into an [`ExecutionPlan`]. Child lists keep edge
//! insertion order; that order is the total order used by fan-in
//! arbitration, so branch selection is deterministic.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::executor::ExecutionPlan;
use crate::graph::graph_error::GraphError;
use crate::graph::node::{DagNode, NodeKind};

/// Directed acyclic graph of decision nodes.
///
/// Invariants enforced on every mutation: unique node names, at most one
/// root and one final node, edges only between registered nodes, no edge
/// into the root or out of the final node, no duplicate edges. The caller
/// is responsible for supplying an acyclic edge set.
///
/// Generic over the payload type `T` flowing through the graph's nodes.
pub struct StrategyGraph<T> {
    graph_id: String,
    nodes: HashMap<String, Arc<dyn DagNode<T>>>,
    /// Node names in registration order; drives diagnostics output.
    node_order: Vec<String>,
    /// Dependent lists per node, in edge registration order.
    children: HashMap<String, Vec<String>>,
    root: Option<String>,
    final_node: Option<String>,
    edge_count: usize,
}

impl<T> StrategyGraph<T> {
    /// Creates an empty graph with the given id. The id tags every
    /// structural error raised by this graph.
    pub fn new(graph_id: impl Into<String>) -> Self {
        Self {
            graph_id: graph_id.into(),
            nodes: HashMap::new(),
            node_order: Vec::new(),
            children: HashMap::new(),
            root: None,
            final_node: None,
            edge_count: 0,
        }
    }

    pub fn graph_id(&self) -> &str {
        &self.graph_id
    }

    /// Registers a node; the node's name must be unique and only one root
    /// and one final node may exist.
    ///
    /// Returns `&mut Self` for method chaining.
    pub fn add_node(&mut self, node: Arc<dyn DagNode<T>>) -> Result<&mut Self, GraphError> {
        let name = node.name().to_owned();
        if self.nodes.contains_key(&name) {
            return Err(GraphError::DuplicateNode {
                graph_id: self.graph_id.clone(),
                name,
            });
        }
        match node.kind() {
            NodeKind::Root if self.root.is_some() => {
                return Err(GraphError::DuplicateRoot {
                    graph_id: self.graph_id.clone(),
                });
            }
            NodeKind::Final if self.final_node.is_some() => {
                return Err(GraphError::DuplicateFinal {
                    graph_id: self.graph_id.clone(),
                });
            }
            NodeKind::Root => self.root = Some(name.clone()),
            NodeKind::Final => self.final_node = Some(name.clone()),
            NodeKind::Logic => {}
        }
        self.node_order.push(name.clone());
        self.nodes.insert(name, node);
        Ok(self)
    }

    /// Adds the edge `depends_on -> node` ("`node` depends on `depends_on`").
    ///
    /// Both endpoints must already be registered; the root cannot gain an
    /// incoming edge and the final node cannot gain an outgoing one. A
    /// rejected call leaves the graph untouched.
    pub fn add_edge(&mut self, node: &str, depends_on: &str) -> Result<&mut Self, GraphError> {
        let to = self.lookup(node)?;
        let from = self.lookup(depends_on)?;
        if to.kind() == NodeKind::Root {
            return Err(GraphError::EdgeIntoRoot {
                from: depends_on.to_owned(),
                to: node.to_owned(),
            });
        }
        if from.kind() == NodeKind::Final {
            return Err(GraphError::EdgeOutOfFinal {
                from: depends_on.to_owned(),
                to: node.to_owned(),
            });
        }

        let dependents = self.children.entry(depends_on.to_owned()).or_default();
        if dependents.iter().any(|existing| existing == node) {
            return Err(GraphError::DuplicateEdge {
                graph_id: self.graph_id.clone(),
                from: depends_on.to_owned(),
                to: node.to_owned(),
            });
        }
        dependents.push(node.to_owned());
        self.edge_count += 1;
        Ok(self)
    }

    /// Adds an edge from the registered root node to `node`.
    pub fn add_edge_from_root(&mut self, node: &str) -> Result<&mut Self, GraphError> {
        let root = self.root.clone().ok_or_else(|| GraphError::NotWhole {
            graph_id: self.graph_id.clone(),
        })?;
        self.add_edge(node, &root)
    }

    /// Adds an edge from `node` to the registered final node.
    pub fn add_edge_to_final(&mut self, node: &str) -> Result<&mut Self, GraphError> {
        let final_node = self.final_node.clone().ok_or_else(|| GraphError::NotWhole {
            graph_id: self.graph_id.clone(),
        })?;
        self.add_edge(&final_node, node)
    }

    fn lookup(&self, name: &str) -> Result<&Arc<dyn DagNode<T>>, GraphError> {
        self.nodes.get(name).ok_or_else(|| GraphError::UnknownNode {
            graph_id: self.graph_id.clone(),
            name: name.to_owned(),
        })
    }

    /// Dependents of `name` in registration order; empty for sinks and
    /// unknown names.
    pub fn children(&self, name: &str) -> &[String] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node(&self, name: &str) -> Option<&Arc<dyn DagNode<T>>> {
        self.nodes.get(name)
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn final_node(&self) -> Option<&str> {
        self.final_node.as_deref()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Minimum executable structure: a root, a final node and at least two
    /// nodes in total.
    pub fn is_whole(&self) -> bool {
        self.root.is_some() && self.final_node.is_some() && self.nodes.len() >= 2
    }

    /// Every root-to-sink path, found by exhaustive depth-first traversal:
    /// push the current node, recurse into each child, record the path at a
    /// node without children, backtrack. Diagnostics only; execution never
    /// calls this.
    pub fn all_paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        if let Some(root) = &self.root {
            let mut stack = Vec::new();
            self.walk_paths(root, &mut stack, &mut paths);
        }
        paths
    }

    fn walk_paths(&self, name: &str, stack: &mut Vec<String>, paths: &mut Vec<Vec<String>>) {
        stack.push(name.to_owned());
        let children = self.children(name);
        if children.is_empty() {
            paths.push(stack.clone());
        } else {
            for child in children {
                self.walk_paths(child, stack, paths);
            }
        }
        stack.pop();
    }

    /// Snapshot of the graph as an index/0-1 matrix for visualization.
    /// Diagnostics only.
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix {
        let nodes = self.node_order.clone();
        let matrix = nodes
            .iter()
            .map(|from| {
                let dependents = self.children(from);
                nodes
                    .iter()
                    .map(|to| u8::from(dependents.iter().any(|child| child == to)))
                    .collect()
            })
            .collect();
        AdjacencyMatrix {
            graph_id: self.graph_id.clone(),
            nodes,
            matrix,
        }
    }
}

impl<T> StrategyGraph<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Freezes the graph into a reusable [`ExecutionPlan`].
    ///
    /// Fails with [`GraphError::NotWhole`] iff `is_whole()` is false.
    pub fn compile(self) -> Result<ExecutionPlan<T>, GraphError> {
        ExecutionPlan::compile(self)
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        String,
        HashMap<String, Arc<dyn DagNode<T>>>,
        HashMap<String, Vec<String>>,
        Option<String>,
    ) {
        (self.graph_id, self.nodes, self.children, self.root)
    }
}

impl<T> fmt::Debug for StrategyGraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyGraph")
            .field("graph_id", &self.graph_id)
            .field("nodes", &self.node_order)
            .field("edges", &self.edge_count)
            .finish()
    }
}

/// Index/node mapping plus 0-1 matrix, printable for debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    pub graph_id: String,
    /// Index-to-name mapping, in node registration order.
    pub nodes: Vec<String>,
    /// `matrix[i][j] == 1` iff node `j` depends on node `i`.
    pub matrix: Vec<Vec<u8>>,
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DAG GRAPH ADJACENCY MATRIX INFOS")?;
        writeln!(f, "graphId: {}", self.graph_id)?;
        writeln!(f, "nodes:")?;
        for (index, name) in self.nodes.iter().enumerate() {
            write!(f, "({index}){name}")?;
            if index < self.nodes.len() - 1 {
                write!(f, ", ")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "--------------------------------")?;
        writeln!(f, "matrix:")?;
        for (index, row) in self.matrix.iter().enumerate() {
            writeln!(f, "({index}): {row:?}")?;
        }
        Ok(())
    }
}
