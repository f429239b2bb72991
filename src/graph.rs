//! Computational graph storage.
//!
//! Wraps a petgraph `DiGraph`, which allows parallel edges, so it serves as
//! the directed multigraph the renderer consumes. Nodes are addressed by
//! their string id; petgraph supplies cycle detection and topological order.

use std::collections::HashMap;

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::{Error, Result};

/// Node attributes as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub id: String,
    pub name: Option<String>,
    pub inputs: Option<Vec<String>>,
    pub outputs: Option<Vec<String>>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = Some(inputs.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = Some(outputs.into_iter().map(Into::into).collect());
        self
    }
}

/// Node data stored in the graph. `label` is resolved once, on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    pub inputs: Option<Vec<String>>,
    pub outputs: Option<Vec<String>>,
}

impl NodeData {
    fn from_node(node: Node) -> Self {
        let label = node.name.unwrap_or_else(|| node.id.clone());
        Self {
            id: node.id,
            label,
            inputs: node.inputs,
            outputs: node.outputs,
        }
    }

    /// Internal nodes declare both inputs and outputs and are drawn as boxes.
    pub fn is_internal(&self) -> bool {
        self.inputs.is_some() && self.outputs.is_some()
    }

    pub fn has_input(&self, label: &str) -> bool {
        self.inputs
            .as_ref()
            .is_some_and(|inputs| inputs.iter().any(|i| i == label))
    }

    pub fn has_output(&self, label: &str) -> bool {
        self.outputs
            .as_ref()
            .is_some_and(|outputs| outputs.iter().any(|o| o == label))
    }
}

/// Edge attributes: which output of the source feeds which input of the
/// destination.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Connection {
    pub output: Option<String>,
    pub input: Option<String>,
}

impl Connection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompGraph {
    graph: DiGraph<NodeData, Connection>,
    node_index: HashMap<String, NodeIndex>,
}

impl CompGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or replace the attributes of an existing node with the
    /// same id. Existing edges are kept.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        match self.node_index.get(&node.id) {
            Some(&idx) => {
                self.graph[idx] = NodeData::from_node(node);
                idx
            }
            None => {
                let id = node.id.clone();
                let idx = self.graph.add_node(NodeData::from_node(node));
                self.node_index.insert(id, idx);
                idx
            }
        }
    }

    /// Add an edge from `from` to `to`. Endpoints that do not exist yet are
    /// created as attribute-less (external) nodes.
    pub fn add_edge(&mut self, from: &str, to: &str, connection: Connection) -> EdgeIndex {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);
        self.graph.add_edge(from_idx, to_idx, connection)
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        match self.node_index.get(id) {
            Some(&idx) => idx,
            None => self.add_node(Node::new(id)),
        }
    }

    pub fn node(&self, idx: NodeIndex) -> &NodeData {
        &self.graph[idx]
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &NodeData)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Edges in insertion order as `(from, to, connection)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &Connection)> {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    pub fn topological_order(&self) -> Result<Vec<NodeIndex>> {
        toposort(&self.graph, None).map_err(|_| Error::Cycle)
    }
}
