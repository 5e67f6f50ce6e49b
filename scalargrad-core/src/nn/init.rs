use crate::error::ScalarGradError;
use rand::Rng;
use rand::distributions::Uniform;
use rand_distr::{Distribution, Normal};

/// How freshly created weights and biases are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// Uniform on `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std: f64 },
    /// Every parameter gets the same value.
    Constant(f64),
}

impl Default for Init {
    fn default() -> Self {
        Init::Uniform {
            low: -1.0,
            high: 1.0,
        }
    }
}

impl Init {
    pub fn validate(&self) -> Result<(), ScalarGradError> {
        match *self {
            Init::Uniform { low, high } => {
                if !(low.is_finite() && high.is_finite() && low < high) {
                    return Err(ScalarGradError::InvalidConfig(format!(
                        "uniform init needs finite low < high, got [{}, {})",
                        low, high
                    )));
                }
            }
            Init::Normal { mean, std } => {
                if !(mean.is_finite() && std.is_finite() && std >= 0.0) {
                    return Err(ScalarGradError::InvalidConfig(format!(
                        "normal init needs a finite mean and std >= 0, got mean {} std {}",
                        mean, std
                    )));
                }
            }
            Init::Constant(value) => {
                if !value.is_finite() {
                    return Err(ScalarGradError::InvalidConfig(format!(
                        "constant init needs a finite value, got {}",
                        value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Draws `n` values.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>, ScalarGradError> {
        self.validate()?;
        let values = match *self {
            Init::Uniform { low, high } => {
                let dist = Uniform::new(low, high);
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            Init::Normal { mean, std } => {
                let dist = Normal::new(mean, std)
                    .map_err(|e| ScalarGradError::InvalidConfig(e.to_string()))?;
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            Init::Constant(value) => vec![value; n],
        };
        Ok(values)
    }
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
