//! Error types for weightlru

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Capacity combination rejected (zero max size, or max size below item weight)
    InvalidCapacity {
        /// Requested maximum size
        max_size: usize,
        /// Per-entry weight in effect
        item_weight: usize,
    },

    /// Key already present on insert
    DuplicateKey,

    /// Key absent on update
    KeyNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity {
                max_size,
                item_weight,
            } => write!(
                f,
                "Invalid capacity: max size {} with item weight {} (max size must be > 0 and >= item weight)",
                max_size, item_weight
            ),
            Error::DuplicateKey => write!(f, "Key already exists"),
            Error::KeyNotFound => write!(f, "Key not found"),
        }
    }
}

impl std::error::Error for Error {}
