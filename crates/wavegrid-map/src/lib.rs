//! Grid map collaborator for wavefront path-planning diagnostics.
//!
//! This crate provides the cell grid consumed by the `wavegrid-viz`
//! renderer: a 2D (generically n-D) array of cells carrying an
//! occupancy level and a scalar value such as a wavefront arrival
//! time, together with world/grid coordinate conversion and the
//! [`GridMap`] capability trait that rendering code is written
//! against.
//!
//! # Coordinate conventions
//!
//! Grid coordinates are Cartesian: cell (0, 0) sits at the bottom-left
//! corner and Y grows upward. Cells are linearized x-major, so for a
//! 2D grid `index = x + width * y`. Display-space flipping is the
//! renderer's concern, not this crate's.

pub mod cell;
pub mod error;
pub mod grid;

pub use cell::Cell;
pub use error::MapError;
pub use grid::{Grid, Grid2D, GridMap};

/// A location in grid Cartesian space (origin bottom-left, Y up).
///
/// Path planners produce these; the renderer truncates them to pixel
/// coordinates. They are real-valued so planners may emit sub-cell
/// positions.
pub type Point2D = nalgebra::Point2<f64>;

/// An ordered traversal of grid-space locations.
///
/// Insertion order is traversal order along the path. May be empty.
pub type Path2D = Vec<Point2D>;
