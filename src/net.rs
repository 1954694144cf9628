use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::metrics::{RecentAverage, rms_error};
use crate::{Error, Init, Layer, NetConfig, Result};

/// Where the network is within the current training example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been fed forward yet.
    Idle,
    /// `feed_forward` completed; results are readable and `back_prop` is allowed.
    Forward,
    /// `back_prop` completed; the next `feed_forward` starts a new example.
    Backward,
}

/// Hook into the two phases of a backward pass.
///
/// `gradients_computed` fires once a layer's gradients are final, `weights_updated` once
/// every edge arriving at a layer has been adjusted. Layer indices count from the input
/// layer (0). Both default to no-ops.
pub trait PassObserver {
    fn gradients_computed(&mut self, _layer: usize) {}
    fn weights_updated(&mut self, _layer: usize) {}
}

impl PassObserver for () {}

/// A fully-connected tanh network trained one example at a time.
#[derive(Debug, Clone)]
pub struct Net {
    layers: Vec<Layer>,
    config: NetConfig,
    error: f64,
    recent_average: RecentAverage,
    phase: Phase,
}

impl Net {
    /// Default config, uniform `[0, 1)` weights from a seeded RNG.
    pub fn new_with_seed(topology: &[usize], seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new_with_rng(topology, NetConfig::default(), Init::Uniform, &mut rng)
    }

    pub fn new_with_rng<R: Rng + ?Sized>(
        topology: &[usize],
        config: NetConfig,
        init: Init,
        rng: &mut R,
    ) -> Result<Self> {
        if topology.is_empty() {
            return Err(Error::Construction("topology must not be empty".to_owned()));
        }
        if topology.len() < 2 {
            return Err(Error::Construction(
                "topology must include input and output widths".to_owned(),
            ));
        }
        if let Some(idx) = topology.iter().position(|&w| w == 0) {
            return Err(Error::Construction(format!(
                "layer {idx} has width 0; all widths must be > 0"
            )));
        }
        config.validate()?;

        let mut layers = Vec::with_capacity(topology.len());
        for (idx, &width) in topology.iter().enumerate() {
            let fan_out = topology.get(idx + 1).copied().unwrap_or(0);
            layers.push(Layer::new_with_rng(width, fan_out, init, rng));
        }

        debug!(?topology, eta = config.eta, alpha = config.alpha, "built network");

        Ok(Self {
            layers,
            config,
            error: 0.0,
            recent_average: RecentAverage::default(),
            phase: Phase::Idle,
        })
    }

    #[inline]
    pub fn input_width(&self) -> usize {
        self.layers[0].real_width()
    }

    #[inline]
    pub fn output_width(&self) -> usize {
        self.output_layer().real_width()
    }

    /// Real widths of every layer, input first.
    pub fn topology(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::real_width).collect()
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn config(&self) -> &NetConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// RMS error of the most recent `back_prop`.
    #[inline]
    pub fn error(&self) -> f64 {
        self.error
    }

    #[inline]
    pub fn recent_average_error(&self) -> f64 {
        self.recent_average.value()
    }

    /// Loads `inputs` into the input layer and propagates them to the output layer.
    pub fn feed_forward(&mut self, inputs: &[f64]) -> Result<()> {
        if inputs.len() != self.input_width() {
            return Err(Error::InputSizeMismatch {
                expected: self.input_width(),
                actual: inputs.len(),
            });
        }

        self.layers[0].set_inputs(inputs);

        for idx in 1..self.layers.len() {
            // Borrow the previous layer immutably and the current one mutably.
            let (left, right) = self.layers.split_at_mut(idx);
            let prev = &left[idx - 1];
            for neuron in right[0].real_neurons_mut() {
                neuron.feed_forward(prev);
            }
        }

        self.phase = Phase::Forward;
        Ok(())
    }

    /// Output values of the most recent forward pass, bias excluded.
    pub fn results(&self) -> Result<Vec<f64>> {
        self.ensure_fed("results requested before any feed_forward")?;
        Ok(self.output_layer().outputs().collect())
    }

    /// Non-allocating variant of [`Net::results`].
    pub fn results_into(&self, out: &mut [f64]) -> Result<()> {
        self.ensure_fed("results requested before any feed_forward")?;
        if out.len() != self.output_width() {
            return Err(Error::OutputSizeMismatch {
                expected: self.output_width(),
                actual: out.len(),
            });
        }
        for (o, y) in out.iter_mut().zip(self.output_layer().outputs()) {
            *o = y;
        }
        Ok(())
    }

    /// Trains on `targets` for the example last passed to [`Net::feed_forward`].
    pub fn back_prop(&mut self, targets: &[f64]) -> Result<()> {
        self.back_prop_observed(targets, &mut ())
    }

    /// [`Net::back_prop`], reporting progress to `observer`.
    ///
    /// Every gradient in the network is computed before the first weight is touched:
    /// hidden gradients read the downstream weights as they were during the forward pass.
    pub fn back_prop_observed<O>(&mut self, targets: &[f64], observer: &mut O) -> Result<()>
    where
        O: PassObserver + ?Sized,
    {
        if targets.len() != self.output_width() {
            return Err(Error::TargetSizeMismatch {
                expected: self.output_width(),
                actual: targets.len(),
            });
        }
        if self.phase != Phase::Forward {
            return Err(Error::OutOfSequence(
                "back_prop requires a feed_forward for the current example",
            ));
        }

        let last = self.layers.len() - 1;

        self.error = rms_error(self.layers[last].outputs(), targets);
        self.recent_average.record(self.error);

        let output_layer = &mut self.layers[last];
        for (neuron, &target) in output_layer.real_neurons_mut().iter_mut().zip(targets) {
            neuron.calc_output_gradient(target);
        }
        observer.gradients_computed(last);

        for idx in (1..last).rev() {
            let (left, right) = self.layers.split_at_mut(idx + 1);
            let next = &right[0];
            for neuron in left[idx].real_neurons_mut() {
                neuron.calc_hidden_gradient(next);
            }
            observer.gradients_computed(idx);
        }

        for idx in (1..=last).rev() {
            let (left, right) = self.layers.split_at_mut(idx);
            let prev = &mut left[idx - 1];
            for neuron in right[0].real_neurons() {
                neuron.update_incoming_weights(prev, &self.config);
            }
            observer.weights_updated(idx);
        }

        self.phase = Phase::Backward;
        Ok(())
    }

    #[inline]
    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    #[inline]
    fn ensure_fed(&self, msg: &'static str) -> Result<()> {
        if self.phase == Phase::Idle {
            return Err(Error::OutOfSequence(msg));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn constant_net(topology: &[usize], weight: f64) -> Net {
        let mut rng = StdRng::seed_from_u64(0);
        Net::new_with_rng(
            topology,
            NetConfig::default(),
            Init::Constant(weight),
            &mut rng,
        )
        .unwrap()
    }

    fn loss(net: &mut Net, input: &[f64], target: &[f64]) -> f64 {
        net.feed_forward(input).unwrap();
        let out = net.results().unwrap();
        0.5 * out
            .iter()
            .zip(target)
            .map(|(y, t)| (t - y) * (t - y))
            .sum::<f64>()
    }

    #[test]
    fn seeded_init_is_deterministic() {
        let mut a = Net::new_with_seed(&[2, 3, 1], 123).unwrap();
        let mut b = Net::new_with_seed(&[2, 3, 1], 123).unwrap();
        a.feed_forward(&[0.3, -0.7]).unwrap();
        b.feed_forward(&[0.3, -0.7]).unwrap();
        assert_eq!(a.results().unwrap(), b.results().unwrap());
    }

    #[test]
    fn forward_matches_hand_computation() {
        let mut net = constant_net(&[2, 2, 1], 0.5);
        net.feed_forward(&[1.0, 0.0]).unwrap();

        // hidden: tanh(0.5 * 1 + 0.5 * 0 + 0.5 * bias)
        let h = 1.0_f64.tanh();
        let y = (0.5 * h + 0.5 * h + 0.5).tanh();
        assert_abs_diff_eq!(net.results().unwrap()[0], y, epsilon = 1e-12);
    }

    #[test]
    fn gradients_match_numeric_derivative() {
        // With eta = 1 and alpha = 0 the applied delta is exactly -dL/dw for
        // L = 0.5 * sum((t - y)^2).
        let cfg = NetConfig {
            eta: 1.0,
            alpha: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let base = Net::new_with_rng(&[2, 3, 2], cfg, Init::Uniform, &mut rng).unwrap();
        let input = [0.3, -0.7];
        let target = [0.2, -0.4];

        let mut trained = base.clone();
        trained.feed_forward(&input).unwrap();
        trained.back_prop(&target).unwrap();

        let eps = 1e-6;
        for l in 0..base.layers.len() - 1 {
            for n in 0..base.layers[l].stored_width() {
                for c in 0..base.layers[l].neurons()[n].connections().len() {
                    let mut plus = base.clone();
                    plus.layers[l].neurons_mut()[n].connections_mut()[c].weight += eps;
                    let mut minus = base.clone();
                    minus.layers[l].neurons_mut()[n].connections_mut()[c].weight -= eps;

                    let numeric =
                        (loss(&mut plus, &input, &target) - loss(&mut minus, &input, &target))
                            / (2.0 * eps);
                    let applied = trained.layers[l].neurons()[n].connections()[c].delta_weight;
                    assert_abs_diff_eq!(applied, -numeric, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn bias_survives_training() {
        let mut net = Net::new_with_seed(&[2, 3, 2], 1).unwrap();
        for _ in 0..50 {
            net.feed_forward(&[0.5, -0.5]).unwrap();
            net.back_prop(&[0.1, -0.1]).unwrap();
        }
        for layer in net.layers() {
            assert_eq!(layer.bias().output(), 1.0);
        }
    }

    #[test]
    fn phase_follows_the_pass() {
        let mut net = Net::new_with_seed(&[1, 1], 0).unwrap();
        assert_eq!(net.phase(), Phase::Idle);
        net.feed_forward(&[0.5]).unwrap();
        assert_eq!(net.phase(), Phase::Forward);
        net.back_prop(&[0.0]).unwrap();
        assert_eq!(net.phase(), Phase::Backward);
        assert!(net.results().is_ok());
        assert_eq!(
            net.back_prop(&[0.0]),
            Err(Error::OutOfSequence(
                "back_prop requires a feed_forward for the current example"
            ))
        );
    }

    #[test]
    fn rejects_degenerate_topologies() {
        assert!(matches!(
            Net::new_with_seed(&[], 0),
            Err(Error::Construction(_))
        ));
        assert!(matches!(
            Net::new_with_seed(&[3], 0),
            Err(Error::Construction(_))
        ));
        assert!(matches!(
            Net::new_with_seed(&[2, 0, 1], 0),
            Err(Error::Construction(_))
        ));
    }

    #[test]
    fn results_into_checks_length() {
        let mut net = Net::new_with_seed(&[2, 2], 0).unwrap();
        net.feed_forward(&[0.1, 0.2]).unwrap();
        let mut out = [0.0; 2];
        net.results_into(&mut out).unwrap();
        assert_eq!(out.to_vec(), net.results().unwrap());

        let mut short = [0.0; 1];
        assert_eq!(
            net.results_into(&mut short),
            Err(Error::OutputSizeMismatch {
                expected: 2,
                actual: 1
            })
        );
    }
}
