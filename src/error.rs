use thiserror::Error;

/// Reasons a table refuses a capacity change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The requested capacity cannot hold the live entries of an open-addressing table.
    #[error("requested capacity {requested} is below the current size {size}")]
    CapacityBelowSize {
        /// Capacity passed to the resize call
        requested: usize,
        /// Number of live entries at the time of the call
        size: usize,
    },

    /// A chaining table needs at least one bucket.
    #[error("requested capacity must be at least 1")]
    ZeroCapacity,
}
