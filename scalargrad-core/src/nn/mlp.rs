use crate::autograd::{Graph, Value};
use crate::error::ScalarGradError;
use crate::nn::{Init, Layer, Module, Parameter};
use crate::ops::Activation;
use rand::Rng;

/// A multi-layer perceptron: fully connected layers applied in sequence.
///
/// Layer `i` maps `sizes[i]` inputs to `sizes[i + 1]` outputs, where
/// `sizes = [input_features] + layer_sizes`, and applies `activations[i]`.
#[derive(Debug, Clone)]
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        input_features: usize,
        layer_sizes: &[usize],
        activations: &[Activation],
        init: Init,
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        if input_features == 0 {
            return Err(ScalarGradError::InvalidConfig(
                "an MLP needs at least one input feature".to_string(),
            ));
        }
        if layer_sizes.is_empty() {
            return Err(ScalarGradError::InvalidConfig(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        if layer_sizes.len() != activations.len() {
            return Err(ScalarGradError::InvalidConfig(format!(
                "{} layer sizes but {} activations",
                layer_sizes.len(),
                activations.len()
            )));
        }
        if layer_sizes.contains(&0) {
            return Err(ScalarGradError::InvalidConfig(format!(
                "layer sizes must be non-zero, got {:?}",
                layer_sizes
            )));
        }

        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut fan_in = input_features;
        for (&size, &activation) in layer_sizes.iter().zip(activations) {
            layers.push(Layer::new(graph, fan_in, size, activation, init, &mut *rng)?);
            fan_in = size;
        }
        Ok(Mlp { layers })
    }

    /// Like [`Mlp::new`], with activations given by name (`"Tanh"`, `"Relu"`,
    /// `"Sigmoid"`, `"Linear"`).
    pub fn from_names<R: Rng + ?Sized>(
        graph: &Graph,
        input_features: usize,
        layer_sizes: &[usize],
        activations: &[&str],
        init: Init,
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        let activations = activations
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<Activation>, _>>()?;
        Self::new(graph, input_features, layer_sizes, &activations, init, rng)
    }

    /// Stacks existing layers; each layer's arity must match the previous output.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, ScalarGradError> {
        if layers.is_empty() {
            return Err(ScalarGradError::InvalidConfig(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        for pair in layers.windows(2) {
            if pair[1].num_inputs() != pair[0].num_outputs() {
                return Err(ScalarGradError::LengthMismatch {
                    expected: pair[0].num_outputs(),
                    actual: pair[1].num_inputs(),
                    operation: "Mlp::from_layers".to_string(),
                });
            }
        }
        Ok(Mlp { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn num_inputs(&self) -> usize {
        self.layers[0].num_inputs()
    }

    pub fn num_outputs(&self) -> usize {
        self.layers[self.layers.len() - 1].num_outputs()
    }
}

impl Module for Mlp {
    fn forward<'g>(
        &self,
        graph: &'g Graph,
        inputs: &[Value<'g>],
    ) -> Result<Vec<Value<'g>>, ScalarGradError> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(graph, &activations)?;
        }
        Ok(activations)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(i, layer)| {
                layer
                    .named_parameters()
                    .into_iter()
                    .map(move |(name, p)| (format!("layer{}.{}", i, name), p))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
