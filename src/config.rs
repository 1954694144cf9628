//! Network-wide hyperparameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Weight given to the previous recent-average value when folding in a new pass error.
///
/// `recent = (recent * RECENT_AVERAGE_SMOOTHING + error) / (RECENT_AVERAGE_SMOOTHING + 1)`
pub const RECENT_AVERAGE_SMOOTHING: f64 = 100.0;

/// Learning rate and momentum shared by every connection of a network.
///
/// Rough guide for `eta`: 0.0 does not learn, ~0.2 is a medium learner, 1.0 is reckless.
/// `alpha = 0.0` disables momentum, 0.5 is moderate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetConfig {
    /// Learning rate.
    pub eta: f64,
    /// Momentum coefficient.
    pub alpha: f64,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            eta: 0.15,
            alpha: 0.5,
        }
    }
}

impl NetConfig {
    pub fn new(eta: f64, alpha: f64) -> Result<Self> {
        let cfg = Self { eta, alpha };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.eta.is_finite() && self.eta >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "eta must be finite and >= 0, got {}",
                self.eta
            )));
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "alpha must be finite and >= 0, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}
