use tracing::{debug, trace};

use crate::{Net, PassRecord, Result, RunReport, Sample};

/// What one forward-then-backward pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutcome {
    /// Network outputs before the weights were updated.
    pub results: Vec<f64>,
    pub error: f64,
    pub recent_average_error: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    pub passes: usize,
    pub final_error: f64,
    pub recent_average_error: f64,
}

impl Net {
    /// One training pass: forward `inputs`, read the results, back-propagate `targets`.
    pub fn train_pass(&mut self, inputs: &[f64], targets: &[f64]) -> Result<PassOutcome> {
        self.feed_forward(inputs)?;
        let results = self.results()?;
        self.back_prop(targets)?;

        Ok(PassOutcome {
            results,
            error: self.error(),
            recent_average_error: self.recent_average_error(),
        })
    }

    /// Runs one pass per sample, in order.
    ///
    /// When `report` is given every pass is appended to it.
    pub fn fit(
        &mut self,
        samples: &[Sample],
        mut report: Option<&mut RunReport>,
    ) -> Result<FitReport> {
        for (idx, sample) in samples.iter().enumerate() {
            let outcome = self.train_pass(&sample.inputs, &sample.targets)?;
            trace!(
                pass = idx + 1,
                error = outcome.error,
                recent = outcome.recent_average_error,
                "training pass"
            );

            if let Some(report) = report.as_deref_mut() {
                report.record(PassRecord {
                    pass: idx + 1,
                    inputs: sample.inputs.clone(),
                    outputs: outcome.results,
                    targets: sample.targets.clone(),
                    error: outcome.error,
                    recent_average_error: outcome.recent_average_error,
                });
            }
        }

        let summary = FitReport {
            passes: samples.len(),
            final_error: self.error(),
            recent_average_error: self.recent_average_error(),
        };
        debug!(
            passes = summary.passes,
            final_error = summary.final_error,
            recent = summary.recent_average_error,
            "training finished"
        );
        Ok(summary)
    }
}
