// src/nn/losses/mse.rs

use crate::autograd::Value;
use crate::error::ScalarGradError;
use crate::nn::losses::Loss;
use std::str::FromStr;

/// Specifies the reduction to apply to the per-element squared errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    Mean,
    #[default]
    Sum,
}

impl FromStr for Reduction {
    type Err = ScalarGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            _ => Err(ScalarGradError::UnknownReduction(s.to_string())),
        }
    }
}

/// Squared-error loss `Σ (ŷ - y)²`, optionally averaged over all elements.
#[derive(Debug, Clone, Default)]
pub struct MseLoss {
    reduction: Reduction,
}

impl MseLoss {
    pub fn new(reduction: Reduction) -> Self {
        MseLoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }
}

impl Loss for MseLoss {
    fn calculate<'g>(
        &self,
        predictions: &[Vec<Value<'g>>],
        targets: &[Vec<f64>],
    ) -> Result<Value<'g>, ScalarGradError> {
        if predictions.len() != targets.len() {
            return Err(ScalarGradError::LengthMismatch {
                expected: targets.len(),
                actual: predictions.len(),
                operation: "MseLoss::calculate".to_string(),
            });
        }

        let mut total: Option<Value<'g>> = None;
        let mut count = 0usize;
        for (sample, target) in predictions.iter().zip(targets) {
            if sample.len() != target.len() {
                return Err(ScalarGradError::LengthMismatch {
                    expected: target.len(),
                    actual: sample.len(),
                    operation: "MseLoss::calculate".to_string(),
                });
            }
            for (&prediction, &y) in sample.iter().zip(target) {
                let squared = (prediction - y).pow(2.0)?;
                total = Some(match total {
                    Some(acc) => acc + squared,
                    None => squared,
                });
                count += 1;
            }
        }

        let total = total.ok_or_else(|| ScalarGradError::EmptyDataset {
            operation: "compute a loss".to_string(),
        })?;
        Ok(match self.reduction {
            Reduction::Sum => total,
            Reduction::Mean => total / count as f64,
        })
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
