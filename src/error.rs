use thiserror::Error;

/// Top-level error type for the vectis vector library.
///
/// Numeric edge cases (zero-length normalization, negative square roots,
/// non-unit rotation quaternions) are deliberately *not* represented here:
/// they propagate IEEE-754 infinities and NaNs instead, and domain validity
/// is the caller's responsibility.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VectisError {
    #[error("component index {index} is out of range for a {len}-component vector")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("destination slice holds {available} elements, but {needed} are required starting at offset {offset}")]
    DestinationTooSmall {
        needed: usize,
        offset: usize,
        available: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VectisError>;
