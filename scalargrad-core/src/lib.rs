//! # scalargrad-core
//!
//! A scalar reverse-mode automatic differentiation engine, with a small
//! feed-forward network library trained by gradient descent on top of it.
//!
//! Every [`Value`] is one scalar node in a [`Graph`] arena. Arithmetic and
//! activations on values append nodes, and [`Value::backward`] fills in the
//! gradient of every node the root depends on.
//!
//! ```
//! use scalargrad_core::{Graph, nn::{Module, Neuron}, ops::Activation};
//!
//! let graph = Graph::new();
//! let neuron = Neuron::from_weights(&graph, &[0.5, -0.5], 0.0, Activation::Sigmoid);
//! let out = neuron.forward_data(&graph, &[1.0, 1.0]).unwrap();
//! assert_eq!(out[0].data(), 0.5);
//! ```

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod train;

pub(crate) mod utils;

pub use autograd::{Graph, NodeId, Value};
pub use error::ScalarGradError;
pub use ops::Activation;
pub use train::{fit, predict, TrainConfig, TrainReport};
