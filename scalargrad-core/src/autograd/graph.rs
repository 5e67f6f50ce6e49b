use crate::autograd::backward_op::{propagate, Op};
use crate::autograd::value::Value;
use crate::error::ScalarGradError;
use log::trace;
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// Source of `Graph::uid`; every graph gets a distinct one.
static NEXT_GRAPH_UID: AtomicU64 = AtomicU64::new(0);

/// Index of a node inside its [`Graph`] arena, tagged with the graph that
/// issued it.
///
/// Ids are only meaningful for that graph, and only until it is truncated
/// below them. Other graphs reject them with `ForeignNode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    graph: u64,
    index: usize,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.index)
    }
}

/// One scalar in the computation: its value, its accumulated gradient and the
/// operation that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub(crate) data: f64,
    pub(crate) grad: f64,
    pub(crate) op: Op,
}

impl Node {
    pub fn data(&self) -> f64 {
        self.data
    }

    pub fn grad(&self) -> f64 {
        self.grad
    }

    pub fn op(&self) -> Op {
        self.op
    }
}

/// Length of the arena at some point in time; see [`Graph::truncate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Arena holding every node of a computation graph.
///
/// Operations allocate through a shared `&Graph` (the node list sits behind a
/// `RefCell`), and producers are referenced by [`NodeId`]. Nodes are only ever
/// appended, and an operation can only reference nodes that already exist, so
/// every producer has a smaller id than its consumer and the graph is acyclic.
///
/// Memory is reclaimed wholesale: [`Graph::truncate`] drops everything
/// allocated after a [`Checkpoint`]. It takes `&mut self`, so no [`Value`]
/// handle into the dropped region can still be alive.
pub struct Graph {
    uid: u64,
    nodes: RefCell<Vec<Node>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Graph {
            uid: NEXT_GRAPH_UID.fetch_add(1, Ordering::Relaxed),
            nodes: RefCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Number of nodes currently allocated.
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a leaf node holding `data` with a zero gradient.
    pub fn leaf(&self, data: f64) -> Value<'_> {
        let id = self.push(data, Op::Leaf);
        Value::new(self, id)
    }

    /// Appends a node. Producers referenced by `op` must already exist.
    pub(crate) fn push(&self, data: f64, op: Op) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId {
            graph: self.uid,
            index: nodes.len(),
        };
        debug_assert!(op.producers().all(|p| p < id), "producer allocated after consumer");
        nodes.push(Node {
            data,
            grad: 0.0,
            op,
        });
        id
    }

    fn check(&self, id: NodeId) -> Result<(), ScalarGradError> {
        if id.graph != self.uid {
            return Err(ScalarGradError::ForeignNode { id: id.index });
        }
        let len = self.len();
        if id.index < len {
            Ok(())
        } else {
            Err(ScalarGradError::NodeNotFound { id: id.index, len })
        }
    }

    /// Returns a handle to an existing node.
    ///
    /// # Errors
    /// `ForeignNode` if `id` was issued by another graph, `NodeNotFound` if it
    /// lies past the end of this one.
    pub fn value(&self, id: NodeId) -> Result<Value<'_>, ScalarGradError> {
        self.check(id)?;
        Ok(Value::new(self, id))
    }

    /// Returns a copy of the node's current state.
    pub fn node(&self, id: NodeId) -> Result<Node, ScalarGradError> {
        self.check(id)?;
        Ok(self.node_unchecked(id))
    }

    pub(crate) fn node_unchecked(&self, id: NodeId) -> Node {
        self.nodes.borrow()[id.index]
    }

    /// Valid for ids handed out by this graph and still below its length,
    /// which holds for any live [`Value`]: truncation needs `&mut Graph`.
    pub(crate) fn update_unchecked(&self, id: NodeId, f: impl FnOnce(&mut Node)) {
        f(&mut self.nodes.borrow_mut()[id.index]);
    }

    pub fn data(&self, id: NodeId) -> Result<f64, ScalarGradError> {
        self.node(id).map(|n| n.data)
    }

    pub fn grad(&self, id: NodeId) -> Result<f64, ScalarGradError> {
        self.node(id).map(|n| n.grad)
    }

    /// Overwrites a node's value. Meant for parameter updates between
    /// iterations; nodes already computed from it are not recomputed.
    pub fn set_data(&self, id: NodeId, data: f64) -> Result<(), ScalarGradError> {
        self.check(id)?;
        self.update_unchecked(id, |node| node.data = data);
        Ok(())
    }

    pub fn set_grad(&self, id: NodeId, grad: f64) -> Result<(), ScalarGradError> {
        self.check(id)?;
        self.update_unchecked(id, |node| node.grad = grad);
        Ok(())
    }

    /// Resets the gradient of every node in the arena to zero.
    pub fn zero_grad(&self) {
        for node in self.nodes.borrow_mut().iter_mut() {
            node.grad = 0.0;
        }
    }

    /// Marks the current end of the arena.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.len())
    }

    /// Drops every node allocated after `checkpoint`. Nodes before it keep
    /// their data and gradients.
    pub fn truncate(&mut self, checkpoint: Checkpoint) {
        let nodes = self.nodes.get_mut();
        trace!(
            "truncate: dropping {} of {} nodes",
            nodes.len().saturating_sub(checkpoint.0),
            nodes.len()
        );
        nodes.truncate(checkpoint.0);
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.get_mut().clear();
    }

    /// Orders the nodes reachable from `root` so that every producer precedes
    /// its consumers. Each reachable node appears exactly once, even when it
    /// is shared by several consumers.
    pub fn topological_order(&self, root: NodeId) -> Result<Vec<NodeId>, ScalarGradError> {
        self.check(root)?;
        Ok(self.topological_order_unchecked(root))
    }

    /// Iterative depth-first post-order; the explicit stack keeps long chains
    /// from exhausting the call stack.
    pub(crate) fn topological_order_unchecked(&self, root: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut visited = vec![false; nodes.len()];
        let mut sorted = Vec::new();
        // (node, producers already pushed)
        let mut stack = vec![(root, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                sorted.push(id);
                continue;
            }
            if visited[id.index] {
                continue;
            }
            visited[id.index] = true;
            stack.push((id, true));
            for producer in nodes[id.index].op.producers() {
                if !visited[producer.index] {
                    stack.push((producer, false));
                }
            }
        }
        sorted
    }

    /// Runs reverse-mode differentiation from `root`.
    ///
    /// Seeds `root.grad = 1` and fires every reachable node's backward rule
    /// once, consumers before producers. Gradients of other nodes are added
    /// to, not reset: zero them first (e.g. [`Graph::zero_grad`]) unless
    /// accumulation across several roots is intended.
    pub fn backward(&self, root: NodeId) -> Result<(), ScalarGradError> {
        self.check(root)?;
        self.backward_unchecked(root);
        Ok(())
    }

    pub(crate) fn backward_unchecked(&self, root: NodeId) {
        let sorted = self.topological_order_unchecked(root);
        trace!("backward: {} nodes reachable from {}", sorted.len(), root);

        let mut nodes = self.nodes.borrow_mut();
        nodes[root.index].grad = 1.0;
        for &id in sorted.iter().rev() {
            propagate(&mut nodes, id);
        }
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("uid", &self.uid)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
