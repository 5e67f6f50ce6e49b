use crate::autograd::{Graph, Value};
use crate::error::ScalarGradError;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical} != numerical grad {numerical}. Difference: {difference}")]
    GradientMismatch {
        input_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for input {input_index}. Details: f(x+e): {value_plus}, f(x-e): {value_minus}")]
    NonFiniteNumerical {
        input_index: usize,
        value_plus: f64,
        value_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value}")]
    NonFiniteAnalytical { input_index: usize, value: f64 },

    #[error("Function evaluation failed during gradient check: {0}")]
    Forward(#[from] ScalarGradError),
}

/// Checks the gradients produced by `backward()` against central finite
/// differences.
///
/// `func` receives a fresh graph and one leaf per entry of `inputs`, and
/// returns the scalar to differentiate. For every input the analytical
/// derivative must agree with `(f(x + e) - f(x - e)) / 2e` within `tolerance`,
/// either absolutely or relative to the analytical value.
pub fn check_gradients<F>(
    func: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: for<'g> Fn(&'g Graph, &[Value<'g>]) -> Result<Value<'g>, ScalarGradError>,
{
    // --- Analytical gradients ---
    let analytical: Vec<f64> = {
        let graph = Graph::new();
        let leaves: Vec<Value<'_>> = inputs.iter().map(|&x| graph.leaf(x)).collect();
        let output = func(&graph, &leaves)?;
        output.backward();
        let grads = leaves.iter().map(|leaf| leaf.grad()).collect();
        grads
    };

    // --- Numerical gradients ---
    let evaluate = |perturbed: &[f64]| -> Result<f64, GradCheckError> {
        let graph = Graph::new();
        let leaves: Vec<Value<'_>> = perturbed.iter().map(|&x| graph.leaf(x)).collect();
        let output = func(&graph, &leaves)?;
        Ok(output.data())
    };

    for (input_index, &analytical_grad) in analytical.iter().enumerate() {
        let mut shifted = inputs.to_vec();
        shifted[input_index] = inputs[input_index] + epsilon;
        let value_plus = evaluate(&shifted)?;
        shifted[input_index] = inputs[input_index] - epsilon;
        let value_minus = evaluate(&shifted)?;

        let numerical = (value_plus - value_minus) / (2.0 * epsilon);
        if !numerical.is_finite() {
            return Err(GradCheckError::NonFiniteNumerical {
                input_index,
                value_plus,
                value_minus,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::NonFiniteAnalytical {
                input_index,
                value: analytical_grad,
            });
        }

        let difference = (analytical_grad - numerical).abs();
        if difference > tolerance && difference / (analytical_grad.abs() + epsilon) > tolerance {
            return Err(GradCheckError::GradientMismatch {
                input_index,
                analytical: analytical_grad,
                numerical,
                difference,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
