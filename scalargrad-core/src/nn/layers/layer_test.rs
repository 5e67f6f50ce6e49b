use super::Layer;
use crate::autograd::Graph;
use crate::error::ScalarGradError;
use crate::nn::{Init, Module, Neuron};
use crate::ops::Activation;
use crate::utils::testing::check_values_near;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_layer_outputs_one_value_per_neuron() {
    let graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(11);
    let layer = Layer::new(&graph, 3, 4, Activation::Relu, Init::default(), &mut rng).unwrap();
    assert_eq!(layer.num_inputs(), 3);
    assert_eq!(layer.num_outputs(), 4);
    assert_eq!(layer.num_parameters(), 4 * (3 + 1));

    let out = layer.forward_data(&graph, &[0.1, 0.2, 0.3]).unwrap();
    assert_eq!(out.len(), 4);
    assert!(out.iter().all(|v| v.data() >= 0.0));
}

#[test]
fn test_layer_forward_matches_neurons() {
    let graph = Graph::new();
    let layer = Layer::from_neurons(vec![
        Neuron::from_weights(&graph, &[1.0, 2.0], 0.5, Activation::Linear),
        Neuron::from_weights(&graph, &[-1.0, 0.0], 0.0, Activation::Relu),
    ])
    .unwrap();
    let out = layer.forward_data(&graph, &[3.0, 4.0]).unwrap();
    check_values_near(&out, &[0.5 + 3.0 + 8.0, 0.0], 1e-12);
}

#[test]
fn test_shared_inputs_accumulate_gradients() {
    let graph = Graph::new();
    let layer = Layer::from_neurons(vec![
        Neuron::from_weights(&graph, &[2.0], 0.0, Activation::Linear),
        Neuron::from_weights(&graph, &[5.0], 0.0, Activation::Linear),
    ])
    .unwrap();
    let x = graph.leaf(1.0);
    let out = layer.forward(&graph, &[x]).unwrap();
    let total = out[0] + out[1];
    total.backward();
    assert_eq!(x.grad(), 7.0);
}

#[test]
fn test_named_parameters_are_prefixed() {
    let graph = Graph::new();
    let layer = Layer::from_neurons(vec![
        Neuron::from_weights(&graph, &[1.0], 0.0, Activation::Tanh),
        Neuron::from_weights(&graph, &[1.0], 0.0, Activation::Tanh),
    ])
    .unwrap();
    let names: Vec<String> = layer.named_parameters().into_iter().map(|(n, _)| n).collect();
    assert_eq!(
        names,
        vec!["neuron0.weight0", "neuron0.bias", "neuron1.weight0", "neuron1.bias"]
    );
}

#[test]
fn test_invalid_layers() {
    let graph = Graph::new();
    assert!(matches!(
        Layer::from_neurons(Vec::new()),
        Err(ScalarGradError::InvalidConfig(_))
    ));
    let mismatched = Layer::from_neurons(vec![
        Neuron::from_weights(&graph, &[1.0], 0.0, Activation::Tanh),
        Neuron::from_weights(&graph, &[1.0, 2.0], 0.0, Activation::Tanh),
    ]);
    assert!(matches!(
        mismatched,
        Err(ScalarGradError::LengthMismatch { expected: 1, actual: 2, .. })
    ));
}
