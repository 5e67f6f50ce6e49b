use crate::autograd::Graph;
use crate::error::ScalarGradError;
use crate::nn::Parameter;
use crate::optim::optimizer_trait::Optimizer;
use log::debug;

/// Implements the Stochastic Gradient Descent (SGD) optimizer.
///
/// With the default `momentum = 0` and `weight_decay = 0` each step is exactly
/// `data ← data − lr · grad`.
#[derive(Debug, Clone)]
pub struct Sgd {
    params: Vec<Parameter>,
    lr: f64,
    momentum: f64,
    weight_decay: f64,
    // One velocity per parameter; empty until the first step with momentum.
    velocities: Vec<f64>,
}

impl Sgd {
    /// Creates a new `Sgd` over `params`.
    pub fn new(params: impl IntoIterator<Item = Parameter>, lr: f64) -> Self {
        Sgd {
            params: params.into_iter().collect(),
            lr,
            momentum: 0.0,
            weight_decay: 0.0,
            velocities: Vec::new(),
        }
    }

    /// Momentum factor: `v ← momentum · v + g`, `data ← data − lr · v`.
    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    /// L2 penalty: the gradient used for the update is `g + weight_decay · data`.
    pub fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, graph: &Graph) -> Result<(), ScalarGradError> {
        debug!(
            "Sgd: step() over {} params, lr = {}",
            self.params.len(),
            self.lr
        );
        if self.momentum != 0.0 && self.velocities.len() != self.params.len() {
            self.velocities = vec![0.0; self.params.len()];
        }

        for (idx, param) in self.params.iter().enumerate() {
            let data = param.data(graph)?;
            let mut d_p = param.grad(graph)?;
            if self.weight_decay != 0.0 {
                d_p += self.weight_decay * data;
            }
            if self.momentum != 0.0 {
                let velocity = &mut self.velocities[idx];
                *velocity = self.momentum * *velocity + d_p;
                d_p = *velocity;
            }
            param.set_data(graph, data - self.lr * d_p)?;
        }
        Ok(())
    }

    fn zero_grad(&mut self, graph: &Graph) -> Result<(), ScalarGradError> {
        for param in &self.params {
            param.zero_grad(graph)?;
        }
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f64) {
        self.lr = lr;
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
