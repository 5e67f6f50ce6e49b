use crate::autograd::{Graph, Value};
use crate::error::ScalarGradError;
use crate::nn::{Init, Module, Parameter};
use crate::ops::Activation;
use rand::Rng;

/// A single unit computing `activation(bias + Σ wᵢ·xᵢ)`.
#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Vec<Parameter>,
    bias: Parameter,
    activation: Activation,
}

impl Neuron {
    /// Creates a neuron with `num_inputs` weights and a bias drawn from `init`.
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        num_inputs: usize,
        activation: Activation,
        init: Init,
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        let values = init.sample(num_inputs + 1, rng)?;
        let (weights, bias) = values.split_at(num_inputs);
        Ok(Self::from_weights(graph, weights, bias[0], activation))
    }

    /// Creates a neuron with explicit starting values.
    pub fn from_weights(graph: &Graph, weights: &[f64], bias: f64, activation: Activation) -> Self {
        let weights = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| Parameter::new(graph, w, Some(format!("weight{}", i))))
            .collect();
        Neuron {
            weights,
            bias: Parameter::new(graph, bias, Some("bias".to_string())),
            activation,
        }
    }

    pub fn num_inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn weights(&self) -> &[Parameter] {
        &self.weights
    }

    pub fn bias(&self) -> &Parameter {
        &self.bias
    }

    /// Forward pass producing the neuron's single output.
    pub fn output<'g>(&self, graph: &'g Graph, inputs: &[Value<'g>]) -> Result<Value<'g>, ScalarGradError> {
        if inputs.len() != self.weights.len() {
            return Err(ScalarGradError::LengthMismatch {
                expected: self.weights.len(),
                actual: inputs.len(),
                operation: "Neuron::forward".to_string(),
            });
        }
        // The sum starts from the bias, so it is the first producer in the chain.
        let mut sum = self.bias.value(graph)?;
        for (weight, &input) in self.weights.iter().zip(inputs) {
            sum = sum + weight.value(graph)? * input;
        }
        Ok(sum.activate(self.activation))
    }
}

impl Module for Neuron {
    fn forward<'g>(
        &self,
        graph: &'g Graph,
        inputs: &[Value<'g>],
    ) -> Result<Vec<Value<'g>>, ScalarGradError> {
        Ok(vec![self.output(graph, inputs)?])
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params: Vec<&Parameter> = self.weights.iter().collect();
        params.push(&self.bias);
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.parameters()
            .into_iter()
            .map(|p| (p.name().unwrap_or("param").to_string(), p))
            .collect()
    }
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests;
