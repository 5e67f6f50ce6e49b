use crate::autograd::{Graph, Value};
use crate::error::ScalarGradError;
use crate::nn::Parameter;

/// The base trait for all network components (neurons, layers, whole networks).
///
/// A module turns a slice of input values into output values by appending
/// nodes to the graph; it never evaluates anything outside the graph.
pub trait Module: std::fmt::Debug {
    /// Performs a forward pass of the module.
    ///
    /// # Errors
    /// `LengthMismatch` if `inputs` does not match the module's arity, or
    /// `ForeignNode` if the module's parameters belong to another graph.
    fn forward<'g>(
        &self,
        graph: &'g Graph,
        inputs: &[Value<'g>],
    ) -> Result<Vec<Value<'g>>, ScalarGradError>;

    /// Returns all learnable parameters of the module, including those of
    /// sub-modules.
    fn parameters(&self) -> Vec<&Parameter>;

    /// Parameters with hierarchical names such as `"layer0.neuron1.weight2"`.
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Forward pass on raw numbers; each input becomes a fresh leaf.
    fn forward_data<'g>(
        &self,
        graph: &'g Graph,
        inputs: &[f64],
    ) -> Result<Vec<Value<'g>>, ScalarGradError> {
        let leaves: Vec<Value<'g>> = inputs.iter().map(|&x| graph.leaf(x)).collect();
        self.forward(graph, &leaves)
    }

    /// Resets the gradient of every parameter to zero.
    fn zero_grad(&self, graph: &Graph) -> Result<(), ScalarGradError> {
        for param in self.parameters() {
            param.zero_grad(graph)?;
        }
        Ok(())
    }
}
