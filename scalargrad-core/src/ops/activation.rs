//! # Activation Functions
//!
//! Non-linear activation functions applied to a single scalar node.
//! Each variant knows its forward map and its local derivative, expressed
//! in terms of the *output* value so the backward pass never recomputes
//! the forward function.

use crate::error::ScalarGradError;
use std::fmt;
use std::str::FromStr;

/// The activations a [`Neuron`](crate::nn::Neuron) can apply to its weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Activation {
    /// `1 / (1 + e^-x)`
    Sigmoid,
    /// Hyperbolic tangent.
    #[default]
    Tanh,
    /// `max(0, x)`
    Relu,
    /// Identity.
    Linear,
}

impl Activation {
    /// Computes the forward value for input `x`.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            // f64::tanh stays finite where (e^2x - 1) / (e^2x + 1) overflows to NaN.
            Activation::Tanh => x.tanh(),
            Activation::Relu => {
                if x < 0.0 {
                    0.0
                } else {
                    x
                }
            }
            Activation::Linear => x,
        }
    }

    /// Derivative of the activation at the point that produced `out`.
    pub fn local_grad(self, out: f64) -> f64 {
        match self {
            Activation::Sigmoid => out * (1.0 - out),
            Activation::Tanh => 1.0 - out * out,
            Activation::Relu => {
                if out > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Linear => 1.0,
        }
    }

    /// Label used for graph diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Activation::Sigmoid => "Sigmoid",
            Activation::Tanh => "Tanh",
            Activation::Relu => "ReLU",
            Activation::Linear => "Linear",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = ScalarGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "relu" => Ok(Activation::Relu),
            "linear" | "identity" => Ok(Activation::Linear),
            _ => Err(ScalarGradError::UnknownActivation(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
