/// Directed weighted edge from a neuron to one real neuron of the next layer.
///
/// `delta_weight` is the change applied on the previous training step; it feeds the
/// momentum term of the next update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Connection {
    pub weight: f64,
    pub delta_weight: f64,
}

impl Connection {
    #[inline]
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            delta_weight: 0.0,
        }
    }
}
