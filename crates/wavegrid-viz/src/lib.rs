//! Diagnostic visualization for grid-based path planning.
//!
//! This crate turns a [`wavegrid_map::GridMap`] into raster images:
//! binary and continuous occupancy maps, false-colored value fields
//! (wavefront arrival times), and any of those with planned paths
//! overlaid. It is a debugging aid for planner development, not part
//! of any planning algorithm.
//!
//! Rendering is a stateless, synchronous, single-pass affair: every
//! operation reads the grid, builds a fresh [`Raster`], and hands it
//! to an [`ImageSurface`]. The only non-trivial logic is the
//! Cartesian-to-image coordinate flip, value normalization, and the
//! overlay channel allocation - see [`render`] for the details and the
//! invariants.
//!
//! With the `visualization` feature enabled, `surface::to_texture`
//! bridges rasters onto macroquad textures for on-screen display;
//! without it the crate is fully headless.

pub mod colormap;
pub mod error;
pub mod raster;
pub mod render;
pub mod surface;

pub use colormap::Colormap;
pub use error::VizError;
pub use raster::Raster;
pub use render::{GridRenderer, MAX_OVERLAY_PATHS};
pub use surface::{FrameStore, ImageSurface};

// The grid contract and path types this crate renders.
pub use wavegrid_map::{GridMap, Path2D, Point2D};
