use crate::autograd::{Graph, Value};
use crate::error::ScalarGradError;
use crate::nn::{Init, Module, Neuron, Parameter};
use crate::ops::Activation;
use rand::Rng;

/// A row of neurons reading the same inputs; produces one output per neuron.
#[derive(Debug, Clone)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        num_inputs: usize,
        num_neurons: usize,
        activation: Activation,
        init: Init,
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        let neurons = (0..num_neurons)
            .map(|_| Neuron::new(graph, num_inputs, activation, init, &mut *rng))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_neurons(neurons)
    }

    /// Groups existing neurons. They must all take the same number of inputs.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Result<Self, ScalarGradError> {
        let first = neurons.first().ok_or_else(|| {
            ScalarGradError::InvalidConfig("a layer needs at least one neuron".to_string())
        })?;
        let expected = first.num_inputs();
        if let Some(bad) = neurons.iter().find(|n| n.num_inputs() != expected) {
            return Err(ScalarGradError::LengthMismatch {
                expected,
                actual: bad.num_inputs(),
                operation: "Layer::from_neurons".to_string(),
            });
        }
        Ok(Layer { neurons })
    }

    pub fn num_inputs(&self) -> usize {
        self.neurons[0].num_inputs()
    }

    pub fn num_outputs(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }
}

impl Module for Layer {
    fn forward<'g>(
        &self,
        graph: &'g Graph,
        inputs: &[Value<'g>],
    ) -> Result<Vec<Value<'g>>, ScalarGradError> {
        self.neurons
            .iter()
            .map(|neuron| neuron.output(graph, inputs))
            .collect()
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.neurons.iter().flat_map(|n| n.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.neurons
            .iter()
            .enumerate()
            .flat_map(|(i, neuron)| {
                neuron
                    .named_parameters()
                    .into_iter()
                    .map(move |(name, p)| (format!("neuron{}.{}", i, name), p))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "layer_test.rs"]
mod tests;
