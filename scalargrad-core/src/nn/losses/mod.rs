pub mod mse;

pub use mse::{MseLoss, Reduction};

use crate::autograd::Value;
use crate::error::ScalarGradError;

/// A scalar objective comparing network outputs with targets.
pub trait Loss: std::fmt::Debug {
    /// Builds the loss node. `predictions[i]` holds the outputs for sample `i`
    /// and must have the same length as `targets[i]`.
    fn calculate<'g>(
        &self,
        predictions: &[Vec<Value<'g>>],
        targets: &[Vec<f64>],
    ) -> Result<Value<'g>, ScalarGradError>;
}
