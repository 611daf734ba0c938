use thiserror::Error;

/// Reasons a table resize request is refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeError {
    /// An open addressing table cannot hold more live entries than it has slots
    #[error("cannot resize to {requested} slots while holding {size} entries")]
    BelowSize {
        /// Requested number of slots
        requested: usize,
        /// Live entries currently stored
        size: usize,
    },
    /// A chaining table needs at least one bucket
    #[error("table capacity must be at least 1")]
    ZeroCapacity,
}
