use crate::autograd::{Graph, NodeId, Value};
use crate::error::ScalarGradError;

/// A learnable scalar: a leaf node allocated in a [`Graph`], optionally named.
///
/// The parameter only stores the node id. Its data and gradient live in the
/// graph, which must be the one it was created in; allocate parameters
/// before taking the per-iteration [`Checkpoint`](crate::autograd::Checkpoint)
/// so truncation keeps them.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    id: NodeId,
    name: Option<String>,
}

impl Parameter {
    /// Allocates a leaf holding `data` in `graph`.
    pub fn new(graph: &Graph, data: f64, name: Option<String>) -> Self {
        Parameter {
            id: graph.leaf(data).id(),
            name,
        }
    }

    pub fn new_unnamed(graph: &Graph, data: f64) -> Self {
        Self::new(graph, data, None)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Handle to the parameter's leaf, for use in a forward pass.
    ///
    /// `graph` must be the graph the parameter was created in; any other
    /// graph returns `ForeignNode`, even one with enough nodes to hold the id.
    pub fn value<'g>(&self, graph: &'g Graph) -> Result<Value<'g>, ScalarGradError> {
        graph.value(self.id)
    }

    pub fn data(&self, graph: &Graph) -> Result<f64, ScalarGradError> {
        graph.data(self.id)
    }

    pub fn grad(&self, graph: &Graph) -> Result<f64, ScalarGradError> {
        graph.grad(self.id)
    }

    pub fn set_data(&self, graph: &Graph, data: f64) -> Result<(), ScalarGradError> {
        graph.set_data(self.id, data)
    }

    pub fn zero_grad(&self, graph: &Graph) -> Result<(), ScalarGradError> {
        graph.set_grad(self.id, 0.0)
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
