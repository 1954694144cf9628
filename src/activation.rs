//! Transfer function.
//!
//! Every neuron applies `tanh` to its weighted input sum. Outputs therefore stay in
//! `(-1, 1)`, which is also the range training targets are expected to live in.
//!
//! The derivative is expressed in terms of the cached *output* `y = tanh(x)` rather than
//! the pre-activation sum, so neurons never need to keep `x` around.

#[inline]
pub fn transfer(x: f64) -> f64 {
    x.tanh()
}

/// `tanh'(x) = 1 - tanh(x)^2 = 1 - y^2`
#[inline]
pub fn transfer_grad_from_output(y: f64) -> f64 {
    1.0 - y * y
}
