use thiserror::Error;

/// Contract violations reported by the network.
///
/// None of these are transient: each one means the caller handed the network
/// something that does not fit its shape or its pass sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid topology: {0}")]
    Construction(String),
    #[error("input size mismatch: network expects {expected} inputs, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },
    #[error("target size mismatch: network has {expected} outputs, got {actual} targets")]
    TargetSizeMismatch { expected: usize, actual: usize },
    #[error("output buffer mismatch: network has {expected} outputs, buffer holds {actual}")]
    OutputSizeMismatch { expected: usize, actual: usize },
    #[error("out of sequence: {0}")]
    OutOfSequence(&'static str),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
