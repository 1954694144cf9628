//! Error metrics.
//!
//! These only observe outputs and targets; they do not participate in backprop.

use crate::config::RECENT_AVERAGE_SMOOTHING;

/// Root-mean-square of `target - output` over paired elements.
///
/// Shape contract: `outputs` yields exactly `targets.len()` items. Returns 0 for empty
/// input.
pub fn rms_error<I>(outputs: I, targets: &[f64]) -> f64
where
    I: IntoIterator<Item = f64>,
{
    if targets.is_empty() {
        return 0.0;
    }
    let sum: f64 = outputs
        .into_iter()
        .zip(targets)
        .map(|(y, &t)| {
            let delta = t - y;
            delta * delta
        })
        .sum();
    (sum / targets.len() as f64).sqrt()
}

/// Exponentially smoothed running average of per-pass errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentAverage {
    value: f64,
    smoothing: f64,
}

impl Default for RecentAverage {
    fn default() -> Self {
        Self::new(RECENT_AVERAGE_SMOOTHING)
    }
}

impl RecentAverage {
    pub fn new(smoothing: f64) -> Self {
        Self {
            value: 0.0,
            smoothing,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Folds `error` into the average and returns the updated value.
    #[inline]
    pub fn record(&mut self, error: f64) -> f64 {
        self.value = (self.value * self.smoothing + error) / (self.smoothing + 1.0);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rms_of_known_values() {
        let e = rms_error([0.0, 0.5], &[1.0, 0.0]);
        assert_abs_diff_eq!(e, ((1.0 + 0.25) / 2.0_f64).sqrt(), epsilon = 1e-12);
        assert_eq!(rms_error([0.3], &[0.3]), 0.0);
    }

    #[test]
    fn recent_average_converges_towards_constant_error() {
        let mut avg = RecentAverage::default();
        assert_abs_diff_eq!(avg.record(1.0), 1.0 / 101.0, epsilon = 1e-12);
        for _ in 0..5_000 {
            avg.record(0.2);
        }
        assert_abs_diff_eq!(avg.value(), 0.2, epsilon = 1e-9);
    }
}
