use crate::autograd::Graph;
use crate::error::ScalarGradError;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers are responsible for updating parameter leaves based on their
/// gradients. The gradients and values live in the graph, which is passed in
/// on every call.
pub trait Optimizer {
    /// Performs a single optimization step using the gradients currently
    /// accumulated on the managed parameters.
    fn step(&mut self, graph: &Graph) -> Result<(), ScalarGradError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    ///
    /// The engine never resets gradients by itself; call this before each
    /// backward pass unless accumulation is intended.
    fn zero_grad(&mut self, graph: &Graph) -> Result<(), ScalarGradError>;

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, lr: f64);
}
