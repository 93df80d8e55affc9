//! Hyperparameters of the epsilon-greedy tabular learner

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Learning rate, discount factor and exploration rate for one run.
///
/// # Examples
///
/// ```
/// use ttt_qlearn::q_learning::QLearningParams;
///
/// let params = QLearningParams::default()
///     .with_learning_rate(0.5)
///     .with_epsilon(0.1);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QLearningParams {
    /// α in [0, 1]; 0 leaves every value untouched
    pub learning_rate: f64,
    /// γ in [0, 1]
    pub discount_factor: f64,
    /// ε in [0, 1], probability of a uniformly random move
    pub epsilon: f64,
}

impl QLearningParams {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.4;
    pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.8;
    pub const DEFAULT_EPSILON: f64 = 0.7;

    /// Create validated parameters
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Result<Self> {
        let params = Self {
            learning_rate,
            discount_factor,
            epsilon,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters for playing a trained table: greedy, no learning
    pub fn frozen() -> Self {
        Self {
            learning_rate: 0.0,
            discount_factor: 0.0,
            epsilon: 0.0,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Check every parameter lies in [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("learning rate", self.learning_rate),
            ("discount factor", self.discount_factor),
            ("epsilon", self.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be in [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for QLearningParams {
    fn default() -> Self {
        Self {
            learning_rate: Self::DEFAULT_LEARNING_RATE,
            discount_factor: Self::DEFAULT_DISCOUNT_FACTOR,
            epsilon: Self::DEFAULT_EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(QLearningParams::default().validate().is_ok());
        assert!(QLearningParams::frozen().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(QLearningParams::new(1.5, 0.8, 0.1).is_err());
        assert!(QLearningParams::new(0.5, -0.1, 0.1).is_err());
        assert!(QLearningParams::new(0.5, 0.8, f64::NAN).is_err());
    }
}
