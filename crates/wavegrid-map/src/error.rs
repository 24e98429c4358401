//! This module defines the error types used by the `wavegrid-map` crate.

#![warn(missing_docs)]

use thiserror::Error;

/// Error type for grid map operations.
///
/// This enum encapsulates all possible errors that can occur while
/// constructing or accessing a grid, such as invalid map parameters or
/// out-of-bounds access.
#[derive(Debug, PartialEq, Error)]
pub enum MapError {
    /// Error for invalid map resolution.
    /// Returned when a map resolution is provided that is not positive.
    #[error("invalid map resolution: {0}")]
    InvalidResolution(&'static str),
    /// Error for invalid map dimensions.
    /// Returned when a dimension size is zero or the allocation would overflow.
    #[error("invalid map dimensions: {0}")]
    InvalidDimensions(&'static str),
    /// Error for out-of-bounds access.
    /// Returned when attempting to access cells outside the valid range.
    #[error("map access out of bounds: {0}")]
    OutOfBounds(&'static str),
    /// Error for invalid world coordinates.
    /// Returned when world coordinates fall outside the map bounds.
    #[error("invalid world coordinates: {0}")]
    InvalidWorldCoordinates(&'static str),
}
