//! A small fully-connected feed-forward network trained by online backpropagation
//! with momentum.
//!
//! `rust-bpnet` keeps the classic neuron-centric representation: every [`Neuron`] owns
//! its outgoing [`Connection`]s, every [`Layer`] ends with a bias neuron pinned to 1.0,
//! and a [`Net`] drives the forward and backward passes one example at a time.
//!
//! # Design goals
//!
//! - Readable algorithms: each step of backprop maps onto one method of `Neuron`.
//! - Explicit configuration: learning rate and momentum live in [`NetConfig`] and the
//!   random source is passed in, so runs are reproducible.
//! - Clear contracts: shapes and pass ordering are checked at the API boundary and
//!   reported as [`Error`] values.
//!
//! # Data layout and shapes
//!
//! - Scalars are `f64`; every neuron uses `tanh`, so outputs lie in `(-1, 1)`.
//! - A topology such as `[2, 4, 1]` lists real layer widths, input first. Each stored
//!   layer holds one more neuron than its width (the bias).
//! - Weights start in `[0, 1)` by default (see [`Init`]).
//!
//! # Quick start
//!
//! ```rust
//! use rust_bpnet::NetBuilder;
//!
//! # fn main() -> rust_bpnet::Result<()> {
//! let mut net = NetBuilder::new(&[2, 4, 1])
//!     .eta(0.15)
//!     .alpha(0.5)
//!     .build_with_seed(0)?;
//!
//! let xor = [
//!     ([0.0, 0.0], [0.0]),
//!     ([0.0, 1.0], [1.0]),
//!     ([1.0, 0.0], [1.0]),
//!     ([1.0, 1.0], [0.0]),
//! ];
//! for (inputs, targets) in xor.iter().cycle().take(400) {
//!     net.feed_forward(inputs)?;
//!     let _outputs = net.results()?;
//!     net.back_prop(targets)?;
//! }
//! println!("recent average error: {}", net.recent_average_error());
//! # Ok(())
//! # }
//! ```
//!
//! # Panics vs `Result`
//!
//! - Network-level calls ([`Net::feed_forward`], [`Net::results`], [`Net::back_prop`],
//!   [`Net::fit`], the constructors and the builder) check shapes and call order and
//!   return [`Result`].
//! - The per-neuron steps ([`Neuron::feed_forward`], [`Neuron::update_incoming_weights`])
//!   are the unchecked hot path. Pairing a neuron with a layer whose fan-out does not
//!   reach the neuron's index is a programmer error and panics on the out-of-bounds
//!   edge lookup. Inside a [`Net`] the pairing is correct by construction.
//!
//! # Backward pass ordering
//!
//! [`Net::back_prop`] computes every gradient in the network before it updates any
//! weight. [`Net::back_prop_observed`] exposes that sequence through [`PassObserver`].

pub mod activation;
pub mod builder;
pub mod config;
pub mod connection;
pub mod data;
pub mod error;
pub mod layer;
pub mod metrics;
pub mod net;
pub mod neuron;
pub mod patterns;
pub mod report;
pub mod train;

pub use builder::NetBuilder;
pub use config::NetConfig;
pub use connection::Connection;
pub use data::{DataError, Sample, TrainingData};
pub use error::{Error, Result};
pub use layer::{Init, Layer};
pub use net::{Net, PassObserver, Phase};
pub use neuron::Neuron;
pub use patterns::Pattern;
pub use report::{PassRecord, RunReport};
pub use train::{FitReport, PassOutcome};
