use thiserror::Error;

/// Custom error type for the scalargrad engine and the network built on it.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum ScalarGradError {
    #[error("Invalid exponent {exponent}: power only accepts a finite real constant")]
    InvalidExponent { exponent: f64 },

    #[error("Unknown activation function: {0}")]
    UnknownActivation(String),

    #[error("Unknown loss reduction: {0}")]
    UnknownReduction(String),

    #[error("Node {id} does not exist in a graph of {len} nodes")]
    NodeNotFound { id: usize, len: usize },

    #[error("Node {id} belongs to a different graph")]
    ForeignNode { id: usize },

    #[error("Length mismatch: expected {expected}, got {actual} during operation {operation}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Cannot {operation} on an empty dataset")]
    EmptyDataset { operation: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
