//! MCTS configuration parameters.

use mancala_core::{MancalaError, Result};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Weight of the exploration term in the UCB formula.
    /// 0 = pure exploitation.
    pub exploration_weight: f64,

    /// Number of rollouts per search.
    pub rollouts: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_weight: 1.0,
            rollouts: 50,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of rollouts.
    pub fn with_rollouts(rollouts: usize) -> Self {
        Self {
            rollouts,
            ..Default::default()
        }
    }

    /// Check that the parameters describe a usable search.
    ///
    /// # Errors
    /// Returns `MancalaError::InvalidConfig` if the exploration weight is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(MancalaError::InvalidConfig(format!(
                "exploration weight must be a finite, non-negative number, got {}",
                self.exploration_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.rollouts, 50);
        assert!((config.exploration_weight - 1.0).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_rollouts() {
        let config = MctsConfig::with_rollouts(400);
        assert_eq!(config.rollouts, 400);
        // Other values should be default
        assert!((config.exploration_weight - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weight_is_valid() {
        let config = MctsConfig {
            exploration_weight: 0.0,
            rollouts: 0,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_weights() {
        for weight in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = MctsConfig {
                exploration_weight: weight,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(MancalaError::InvalidConfig(_))),
                "weight {} accepted",
                weight
            );
        }
    }
}
