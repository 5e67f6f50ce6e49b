// Backward rules for every node kind, dispatched on the `Op` tag.

use crate::autograd::graph::{Node, NodeId};
use crate::ops::Activation;
use std::fmt;

/// Records how a node was produced.
///
/// The tag and the producer ids travel together in one variant, so a rule can
/// only ever be paired with the producer set it was written for. The graph
/// stores one `Op` per node; no per-node closure is allocated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// Raw input, constant or parameter. Has no producers.
    Leaf,
    Add { lhs: NodeId, rhs: NodeId },
    Mul { lhs: NodeId, rhs: NodeId },
    /// `base ** exponent` with a constant, finite exponent.
    Pow { base: NodeId, exponent: f64 },
    Activate { kind: Activation, input: NodeId },
}

impl Op {
    /// Iterates the ids of the nodes this one was computed from.
    ///
    /// `x * x` yields `x` twice; callers that need a set deduplicate.
    pub fn producers(&self) -> impl Iterator<Item = NodeId> {
        let pair = match *self {
            Op::Leaf => [None, None],
            Op::Add { lhs, rhs } | Op::Mul { lhs, rhs } => [Some(lhs), Some(rhs)],
            Op::Pow { base, .. } => [Some(base), None],
            Op::Activate { input, .. } => [Some(input), None],
        };
        pair.into_iter().flatten()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Op::Leaf)
    }

    /// Diagnostic label, empty for leaves. Never consulted by the backward pass.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Leaf => Ok(()),
            Op::Add { .. } => write!(f, "+"),
            Op::Mul { .. } => write!(f, "*"),
            Op::Pow { exponent, .. } => write!(f, "**{}", exponent),
            Op::Activate { kind, .. } => write!(f, "{}", kind),
        }
    }
}

/// Applies the local chain rule of node `id`: reads its current `grad` and
/// accumulates the contribution into each producer's `grad`.
///
/// Contributions are always added, never assigned, so a node consumed by
/// several downstream operations receives the sum over all of them.
pub(crate) fn propagate(nodes: &mut [Node], id: NodeId) {
    let Node {
        data: out_data,
        grad: out_grad,
        op,
    } = nodes[id.index()];

    match op {
        Op::Leaf => {}
        Op::Add { lhs, rhs } => {
            nodes[lhs.index()].grad += out_grad;
            nodes[rhs.index()].grad += out_grad;
        }
        Op::Mul { lhs, rhs } => {
            let a = nodes[lhs.index()].data;
            let b = nodes[rhs.index()].data;
            nodes[lhs.index()].grad += b * out_grad;
            nodes[rhs.index()].grad += a * out_grad;
        }
        Op::Pow { base, exponent } => {
            let x = nodes[base.index()].data;
            nodes[base.index()].grad += exponent * x.powf(exponent - 1.0) * out_grad;
        }
        Op::Activate { kind, input } => {
            nodes[input.index()].grad += kind.local_grad(out_data) * out_grad;
        }
    }
}
