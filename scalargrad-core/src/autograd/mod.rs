//! Autograd: an arena of scalar nodes with reverse-mode differentiation.
//!
//! The graph is built implicitly while computing with [`Value`] handles; each
//! operation appends a node recording its producers. [`Value::backward`]
//! orders the reachable subgraph topologically and applies each node's
//! backward rule once, from the root towards the leaves.

pub mod backward_op;
pub mod grad_check;
pub mod graph;
pub mod trace;
pub mod value;

pub use backward_op::Op;
pub use grad_check::{check_gradients, GradCheckError};
pub use graph::{Checkpoint, Graph, Node, NodeId};
pub use trace::{GraphTrace, TracedNode};
pub use value::Value;
