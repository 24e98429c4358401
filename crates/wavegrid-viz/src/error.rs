//! This module defines the error types used by the `wavegrid-viz` crate.

#![warn(missing_docs)]

use thiserror::Error;

/// Error type for rendering operations.
///
/// Every variant is detected before the output buffer is mutated, so a
/// failed render never leaves a partially drawn image behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VizError {
    /// The grid is not 2-dimensional.
    /// The renderer only supports flat grids; higher dimensionality is rejected
    /// rather than silently reinterpreted.
    #[error("grid is {0}-dimensional, rendering supports exactly 2 dimensions")]
    DimensionMismatch(usize),
    /// A path point's truncated pixel coordinate falls outside the raster.
    #[error("path point ({x}, {y}) lies outside the {width}x{height} raster")]
    PathOutOfBounds {
        /// X coordinate of the offending point, in grid space.
        x: f64,
        /// Y coordinate of the offending point, in grid space.
        y: f64,
        /// Raster width in pixels.
        width: usize,
        /// Raster height in pixels.
        height: usize,
    },
    /// More paths were supplied than the overlay palette can distinguish.
    #[error("{count} paths exceed the {capacity}-color overlay palette")]
    TooManyPaths {
        /// Number of paths supplied.
        count: usize,
        /// Number of palette entries available.
        capacity: usize,
    },
}
