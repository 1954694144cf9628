use rand::Rng;

use crate::activation::{transfer, transfer_grad_from_output};
use crate::{Connection, Init, Layer, NetConfig};

/// A single unit: its latest output, its local error signal and its outgoing edges.
///
/// `connections[j]` leads to the j-th real neuron of the next layer. `index` is this
/// neuron's own position in its layer; neurons of the previous layer use it to find the
/// edge that points here.
#[derive(Debug, Clone)]
pub struct Neuron {
    output: f64,
    gradient: f64,
    index: usize,
    connections: Vec<Connection>,
}

impl Neuron {
    pub fn new<R: Rng + ?Sized>(
        output_count: usize,
        index: usize,
        init: Init,
        rng: &mut R,
    ) -> Self {
        let connections = (0..output_count)
            .map(|_| Connection::new(init.sample(rng)))
            .collect();
        Self {
            output: 0.0,
            gradient: 0.0,
            index,
            connections,
        }
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    #[inline]
    pub fn set_output(&mut self, value: f64) {
        self.output = value;
    }

    #[inline]
    pub fn gradient(&self) -> f64 {
        self.gradient
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[cfg(test)]
    pub(crate) fn connections_mut(&mut self) -> &mut [Connection] {
        &mut self.connections
    }

    /// Weighted sum over every neuron of `prev` (bias included), squashed by `tanh`.
    ///
    /// # Panics
    ///
    /// If a neuron of `prev` has no edge at this neuron's index.
    pub fn feed_forward(&mut self, prev: &Layer) {
        let mut sum = 0.0;
        for n in prev.neurons() {
            sum = n.output.mul_add(n.connections[self.index].weight, sum);
        }
        self.output = transfer(sum);
    }

    #[inline]
    pub fn calc_output_gradient(&mut self, target: f64) {
        let delta = target - self.output;
        self.gradient = delta * transfer_grad_from_output(self.output);
    }

    /// Must run before any weight of `next`'s incoming edges is updated.
    #[inline]
    pub fn calc_hidden_gradient(&mut self, next: &Layer) {
        let dow = self.sum_dow(next);
        self.gradient = dow * transfer_grad_from_output(self.output);
    }

    /// Applies `eta * input * gradient + alpha * previous_delta` to every edge arriving
    /// at this neuron from `prev`.
    ///
    /// # Panics
    ///
    /// If a neuron of `prev` has no edge at this neuron's index.
    pub fn update_incoming_weights(&self, prev: &mut Layer, config: &NetConfig) {
        for n in prev.neurons_mut() {
            let input = n.output;
            let conn = &mut n.connections[self.index];
            let delta = config.eta * input * self.gradient + config.alpha * conn.delta_weight;
            conn.delta_weight = delta;
            conn.weight += delta;
        }
    }

    // Sum of this neuron's contributions to the errors of the real neurons it feeds.
    fn sum_dow(&self, next: &Layer) -> f64 {
        self.connections
            .iter()
            .zip(next.real_neurons())
            .map(|(conn, n)| conn.weight * n.gradient)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn constant_layer(width: usize, fan_out: usize, weight: f64) -> Layer {
        let mut rng = StdRng::seed_from_u64(0);
        Layer::new_with_rng(width, fan_out, Init::Constant(weight), &mut rng)
    }

    #[test]
    fn uniform_init_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = Neuron::new(64, 0, Init::Uniform, &mut rng);
        assert_eq!(n.connections().len(), 64);
        for c in n.connections() {
            assert!((0.0..1.0).contains(&c.weight));
            assert_eq!(c.delta_weight, 0.0);
        }
    }

    #[test]
    fn feed_forward_includes_bias() {
        let mut prev = constant_layer(2, 1, 0.5);
        prev.set_inputs(&[1.0, -0.4]);

        let mut rng = StdRng::seed_from_u64(0);
        let mut n = Neuron::new(0, 0, Init::Uniform, &mut rng);
        n.feed_forward(&prev);

        // 0.5 * 1.0 + 0.5 * -0.4 + 0.5 * 1.0 (bias)
        assert_abs_diff_eq!(n.output(), 0.8_f64.tanh(), epsilon = 1e-12);
    }

    #[test]
    fn output_gradient_uses_output_value() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut n = Neuron::new(0, 0, Init::Uniform, &mut rng);
        n.set_output(0.6);
        n.calc_output_gradient(1.0);
        assert_abs_diff_eq!(n.gradient(), 0.4 * (1.0 - 0.36), epsilon = 1e-12);
    }

    #[test]
    fn hidden_gradient_skips_next_layer_bias() {
        let mut next = constant_layer(2, 0, 0.0);
        for (i, n) in next.real_neurons_mut().iter_mut().enumerate() {
            n.gradient = 0.1 * (i + 1) as f64;
        }

        let mut rng = StdRng::seed_from_u64(0);
        let mut n = Neuron::new(2, 0, Init::Constant(0.5), &mut rng);
        n.set_output(0.2);
        n.calc_hidden_gradient(&next);

        let dow = 0.5 * 0.1 + 0.5 * 0.2;
        assert_abs_diff_eq!(n.gradient(), dow * (1.0 - 0.04), epsilon = 1e-12);
    }

    #[test]
    fn weight_update_applies_momentum() {
        let mut prev = constant_layer(1, 1, 0.5);
        prev.set_inputs(&[0.5]);

        let mut rng = StdRng::seed_from_u64(0);
        let mut n = Neuron::new(0, 0, Init::Uniform, &mut rng);
        n.gradient = 0.2;

        let cfg = NetConfig {
            eta: 0.1,
            alpha: 0.5,
        };
        n.update_incoming_weights(&mut prev, &cfg);

        let first = 0.1 * 0.5 * 0.2;
        let input_conn = prev.neurons()[0].connections()[0];
        assert_abs_diff_eq!(input_conn.delta_weight, first, epsilon = 1e-12);
        assert_abs_diff_eq!(input_conn.weight, 0.5 + first, epsilon = 1e-12);

        n.update_incoming_weights(&mut prev, &cfg);
        let second = first + 0.5 * first;
        let input_conn = prev.neurons()[0].connections()[0];
        assert_abs_diff_eq!(input_conn.delta_weight, second, epsilon = 1e-12);
        assert_abs_diff_eq!(input_conn.weight, 0.5 + first + second, epsilon = 1e-12);

        // Bias edge sees input 1.0.
        let bias_conn = prev.bias().connections()[0];
        assert_abs_diff_eq!(bias_conn.delta_weight, 0.1 * 0.2 * 1.5, epsilon = 1e-12);
    }

    #[test]
    #[should_panic]
    fn feed_forward_panics_past_previous_fan_out() {
        let prev = constant_layer(2, 1, 0.5);

        let mut rng = StdRng::seed_from_u64(0);
        let mut n = Neuron::new(0, 1, Init::Uniform, &mut rng);
        n.feed_forward(&prev);
    }

    #[test]
    #[should_panic]
    fn weight_update_panics_past_previous_fan_out() {
        let mut prev = constant_layer(2, 1, 0.5);

        let mut rng = StdRng::seed_from_u64(0);
        let n = Neuron::new(0, 3, Init::Uniform, &mut rng);
        n.update_incoming_weights(&mut prev, &NetConfig::default());
    }
}
