//! Read-only export of a subgraph for visualization.

use crate::autograd::graph::{Graph, NodeId};
use crate::error::ScalarGradError;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Snapshot of one node at trace time.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedNode {
    pub id: NodeId,
    pub data: f64,
    pub grad: f64,
    /// Operation label, empty for leaves.
    pub label: String,
}

/// Nodes reachable from a root and the `(producer, consumer)` edges between them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphTrace {
    pub root: Option<NodeId>,
    /// Producers before consumers.
    pub nodes: Vec<TracedNode>,
    /// Deduplicated and sorted.
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphTrace {
    pub fn node(&self, id: NodeId) -> Option<&TracedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Renders the trace as Graphviz DOT, laid out left to right.
    ///
    /// Every value becomes a record `{ data | grad }`. A non-leaf value also
    /// gets a small op node feeding it, and its producers point at that op
    /// node rather than at the value itself.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(dot, "digraph {{");
        let _ = writeln!(dot, "  rankdir=LR;");
        for node in &self.nodes {
            let _ = writeln!(
                dot,
                "  \"{}\" [label=\"{{ data {:.4} | grad {:.4} }}\", shape=record];",
                node.id, node.data, node.grad
            );
            if !node.label.is_empty() {
                let _ = writeln!(dot, "  \"{}{}\" [label=\"{}\"];", node.id, node.label, node.label);
                let _ = writeln!(dot, "  \"{}{}\" -> \"{}\";", node.id, node.label, node.id);
            }
        }
        for (producer, consumer) in &self.edges {
            let label = self
                .node(*consumer)
                .map(|n| n.label.as_str())
                .unwrap_or_default();
            let _ = writeln!(dot, "  \"{}\" -> \"{}{}\";", producer, consumer, label);
        }
        dot.push('}');
        dot.push('\n');
        dot
    }
}

impl Graph {
    /// Enumerates the nodes reachable from `root` with their current data,
    /// gradient and label, plus the producer → consumer edges.
    ///
    /// Does not touch gradients or graph structure.
    pub fn trace(&self, root: NodeId) -> Result<GraphTrace, ScalarGradError> {
        // Validates the id.
        self.node(root)?;
        Ok(self.trace_unchecked(root))
    }

    pub(crate) fn trace_unchecked(&self, root: NodeId) -> GraphTrace {
        let order = self.topological_order_unchecked(root);
        let mut nodes = Vec::with_capacity(order.len());
        let mut edges = BTreeSet::new();

        for id in order {
            let node = self.node_unchecked(id);
            for producer in node.op.producers() {
                edges.insert((producer, id));
            }
            nodes.push(TracedNode {
                id,
                data: node.data,
                grad: node.grad,
                label: node.op.label(),
            });
        }

        GraphTrace {
            root: Some(root),
            nodes,
            edges: edges.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "trace_test.rs"]
mod tests;
