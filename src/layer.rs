use rand::Rng;

use crate::Neuron;

/// Weight initialization scheme.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Init {
    /// Independent draws from `U[0, 1)`.
    #[default]
    Uniform,
    /// Every weight set to the same value. Mostly useful to pin weights in tests.
    Constant(f64),
}

impl Init {
    #[inline]
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            Init::Uniform => rng.r#gen::<f64>(),
            Init::Constant(w) => w,
        }
    }
}

/// An ordered group of neurons followed by one bias neuron.
///
/// A layer of real width `w` stores `w + 1` neurons. The last one is the bias: its
/// output is pinned to 1.0 when the layer is built and nothing in the crate assigns it
/// afterwards. Use [`Layer::real_width`] / [`Layer::real_neurons`] whenever the bias
/// must be excluded, and [`Layer::stored_width`] / [`Layer::neurons`] when it must not.
#[derive(Debug, Clone)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Builds `width` real neurons plus the bias, each with `fan_out` outgoing edges.
    pub fn new_with_rng<R: Rng + ?Sized>(
        width: usize,
        fan_out: usize,
        init: Init,
        rng: &mut R,
    ) -> Self {
        let mut neurons = Vec::with_capacity(width + 1);
        for index in 0..=width {
            neurons.push(Neuron::new(fan_out, index, init, rng));
        }
        if let Some(bias) = neurons.last_mut() {
            bias.set_output(1.0);
        }
        Self { neurons }
    }

    /// Number of neurons excluding the bias.
    #[inline]
    pub fn real_width(&self) -> usize {
        self.neurons.len() - 1
    }

    /// Number of neurons including the bias.
    #[inline]
    pub fn stored_width(&self) -> usize {
        self.neurons.len()
    }

    /// All neurons, bias last.
    #[inline]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    #[inline]
    pub fn real_neurons(&self) -> &[Neuron] {
        &self.neurons[..self.real_width()]
    }

    #[inline]
    pub fn bias(&self) -> &Neuron {
        &self.neurons[self.real_width()]
    }

    /// Outputs of the real neurons, in order.
    pub fn outputs(&self) -> impl Iterator<Item = f64> + '_ {
        self.real_neurons().iter().map(Neuron::output)
    }

    // Callers only touch edge state through this; outputs are never written.
    #[inline]
    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    #[inline]
    pub(crate) fn real_neurons_mut(&mut self) -> &mut [Neuron] {
        let width = self.real_width();
        &mut self.neurons[..width]
    }

    /// Seeds the real neurons with `inputs`. The caller checks the length.
    pub(crate) fn set_inputs(&mut self, inputs: &[f64]) {
        debug_assert_eq!(inputs.len(), self.real_width());
        for (n, &x) in self.real_neurons_mut().iter_mut().zip(inputs) {
            n.set_output(x);
        }
    }
}
