//! Full-batch training loop.
//!
//! Parameters live in the graph below a checkpoint taken when training
//! starts. Every iteration builds its forward graph above that checkpoint and
//! truncates it once the parameters have been updated.

use crate::autograd::{Graph, GraphTrace, Value};
use crate::error::ScalarGradError;
use crate::nn::{Loss, Module};
use crate::optim::{Optimizer, Sgd};
use log::{info, warn};

/// Hyper-parameters of [`fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub iterations: usize,
    pub learning_rate: f64,
    pub momentum: f64,
    pub weight_decay: f64,
    /// Emit an `info!` line every `log_every` iterations; 0 disables it.
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            iterations: 100,
            learning_rate: 0.01,
            momentum: 0.0,
            weight_decay: 0.0,
            log_every: 10,
        }
    }
}

impl TrainConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn validate(&self) -> Result<(), ScalarGradError> {
        if self.iterations == 0 {
            return Err(ScalarGradError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ScalarGradError::InvalidConfig(format!(
                "learning rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if !self.momentum.is_finite() || self.momentum < 0.0 {
            return Err(ScalarGradError::InvalidConfig(format!(
                "momentum must be finite and non-negative, got {}",
                self.momentum
            )));
        }
        if !self.weight_decay.is_finite() || self.weight_decay < 0.0 {
            return Err(ScalarGradError::InvalidConfig(format!(
                "weight decay must be finite and non-negative, got {}",
                self.weight_decay
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    /// 1-based: the first iteration is recorded as 1.
    pub iteration: usize,
    pub loss: f64,
}

/// Outcome of [`fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Loss before each iteration's update, in order.
    pub history: Vec<HistoryEntry>,
    /// Loss graph of the last iteration, traced after its update: parameter
    /// leaves show the final weights, every other node the values and
    /// gradients of that iteration's forward and backward pass.
    pub final_graph: GraphTrace,
}

impl TrainReport {
    pub fn final_loss(&self) -> Option<f64> {
        self.history.last().map(|entry| entry.loss)
    }
}

/// Trains `model` with gradient descent on the whole dataset.
///
/// Each iteration runs the forward pass on every sample, computes `loss`,
/// zeroes the parameter gradients, backpropagates and takes one [`Sgd`] step.
/// The graph is truncated back to its length at entry after every iteration,
/// so the model's parameters must already be allocated in it.
///
/// # Errors
/// `InvalidConfig` for a bad `config`, `EmptyDataset` when `inputs` is empty,
/// and whatever the model or loss report (typically `LengthMismatch`).
pub fn fit<M, L>(
    model: &M,
    graph: &mut Graph,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    loss: &L,
    config: &TrainConfig,
) -> Result<TrainReport, ScalarGradError>
where
    M: Module + ?Sized,
    L: Loss + ?Sized,
{
    config.validate()?;
    if inputs.is_empty() {
        return Err(ScalarGradError::EmptyDataset {
            operation: "fit a model".to_string(),
        });
    }
    if inputs.len() != targets.len() {
        return Err(ScalarGradError::LengthMismatch {
            expected: inputs.len(),
            actual: targets.len(),
            operation: "fit".to_string(),
        });
    }

    let mut optimizer = Sgd::new(model.parameters().into_iter().cloned(), config.learning_rate)
        .with_momentum(config.momentum)
        .with_weight_decay(config.weight_decay);
    let checkpoint = graph.checkpoint();
    let mut history = Vec::with_capacity(config.iterations);
    let mut final_graph = GraphTrace::default();

    info!(
        "fit: {} samples, {} parameters, {} iterations",
        inputs.len(),
        model.num_parameters(),
        config.iterations
    );

    for iteration in 1..=config.iterations {
        let is_last = iteration == config.iterations;
        let outcome = run_iteration(model, graph, inputs, targets, loss, &mut optimizer, is_last);
        graph.truncate(checkpoint);
        let (loss_value, trace) = outcome?;

        if !loss_value.is_finite() {
            warn!("fit: non-finite loss {} at iteration {}", loss_value, iteration);
        }
        if config.log_every > 0 && (iteration == 1 || iteration % config.log_every == 0) {
            info!("iteration {}: loss = {:.6}", iteration, loss_value);
        }
        history.push(HistoryEntry {
            iteration,
            loss: loss_value,
        });
        if let Some(trace) = trace {
            final_graph = trace;
        }
    }

    Ok(TrainReport {
        history,
        final_graph,
    })
}

fn run_iteration<M, L>(
    model: &M,
    graph: &Graph,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    loss: &L,
    optimizer: &mut Sgd,
    capture_trace: bool,
) -> Result<(f64, Option<GraphTrace>), ScalarGradError>
where
    M: Module + ?Sized,
    L: Loss + ?Sized,
{
    let predictions = inputs
        .iter()
        .map(|sample| model.forward_data(graph, sample))
        .collect::<Result<Vec<Vec<Value<'_>>>, _>>()?;
    let loss_value = loss.calculate(&predictions, targets)?;

    optimizer.zero_grad(graph)?;
    loss_value.backward();
    optimizer.step(graph)?;
    let trace = capture_trace.then(|| loss_value.trace());

    Ok((loss_value.data(), trace))
}

/// Runs the forward pass on every sample and returns the raw outputs.
///
/// Nodes created for the pass are dropped before returning.
pub fn predict<M>(
    model: &M,
    graph: &mut Graph,
    inputs: &[Vec<f64>],
) -> Result<Vec<Vec<f64>>, ScalarGradError>
where
    M: Module + ?Sized,
{
    let checkpoint = graph.checkpoint();
    let outputs = forward_all(model, graph, inputs);
    graph.truncate(checkpoint);
    outputs
}

fn forward_all<M>(
    model: &M,
    graph: &Graph,
    inputs: &[Vec<f64>],
) -> Result<Vec<Vec<f64>>, ScalarGradError>
where
    M: Module + ?Sized,
{
    inputs
        .iter()
        .map(|sample| -> Result<Vec<f64>, ScalarGradError> {
            let outputs = model.forward_data(graph, sample)?;
            Ok(outputs.iter().map(|out| out.data()).collect())
        })
        .collect()
}

#[cfg(test)]
#[path = "train_test.rs"]
mod tests;
