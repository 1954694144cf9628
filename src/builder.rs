//! Network builder.
//!
//! `NetBuilder` is the recommended way to define a network. It keeps the topology,
//! the hyperparameters and the weight initializer in one place and makes the random
//! source explicit:
//!
//! - `build_with_seed`: reproducible weights from a seeded `StdRng`
//! - `build_with_rng`: weights drawn from any caller-owned RNG

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Init, Net, NetConfig, Result};

#[derive(Debug, Clone)]
/// Builder for a `Net`.
///
/// Example:
///
/// ```rust
/// use rust_bpnet::NetBuilder;
///
/// # fn main() -> rust_bpnet::Result<()> {
/// let net = NetBuilder::new(&[2, 4, 1])
///     .eta(0.15)
///     .alpha(0.5)
///     .build_with_seed(0)?;
/// assert_eq!(net.topology(), vec![2, 4, 1]);
/// # Ok(())
/// # }
/// ```
pub struct NetBuilder {
    topology: Vec<usize>,
    config: NetConfig,
    init: Init,
}

impl NetBuilder {
    /// Start building a network with the given layer widths, input first.
    pub fn new(topology: &[usize]) -> Self {
        Self {
            topology: topology.to_vec(),
            config: NetConfig::default(),
            init: Init::default(),
        }
    }

    pub fn config(mut self, config: NetConfig) -> Self {
        self.config = config;
        self
    }

    /// Learning rate.
    pub fn eta(mut self, eta: f64) -> Self {
        self.config.eta = eta;
        self
    }

    /// Momentum coefficient.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    pub fn init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, seed: u64) -> Result<Net> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build_with_rng(&mut rng)
    }

    /// Build using the provided RNG.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Net> {
        Net::new_with_rng(&self.topology, self.config, self.init, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn builder_threads_config_through() {
        let net = NetBuilder::new(&[3, 2])
            .eta(0.3)
            .alpha(0.1)
            .init(Init::Constant(0.25))
            .build_with_seed(9)
            .unwrap();

        assert_eq!(net.config().eta, 0.3);
        assert_eq!(net.config().alpha, 0.1);
        for n in net.layers()[0].neurons() {
            assert!(n.connections().iter().all(|c| c.weight == 0.25));
        }
    }

    #[test]
    fn builder_validates() {
        assert!(matches!(
            NetBuilder::new(&[]).build_with_seed(0),
            Err(Error::Construction(_))
        ));
        assert!(matches!(
            NetBuilder::new(&[2, 1]).eta(f64::NAN).build_with_seed(0),
            Err(Error::InvalidConfig(_))
        ));
    }
}
