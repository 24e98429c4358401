//! Cell grid implementation for planning diagnostics.
//!
//! This module provides a generic n-dimensional grid of [`Cell`]s used
//! to represent occupancy maps and scalar fields for path planning,
//! plus the [`GridMap`] trait through which rendering code observes a
//! grid without depending on this concrete type.

#![warn(missing_docs)]

use crate::cell::Cell;
use crate::error::MapError;
use nalgebra::SVector;

/// Read-only capability contract a renderer needs from a grid.
///
/// Cells are addressed by their linear index; for a 2D grid the
/// linearization is `index = x + width * y` with Cartesian `y`
/// (origin bottom-left). Implementations must answer every query for
/// `index < cell_count()`; queries beyond that range may panic.
pub trait GridMap {
    /// Size in cells along each axis (x, y, z, …).
    fn dim_sizes(&self) -> &[usize];

    /// Total number of cells.
    fn cell_count(&self) -> usize {
        self.dim_sizes().iter().product()
    }

    /// Whether the cell at `index` is blocked for traversal.
    fn is_occupied(&self, index: usize) -> bool;

    /// Clearness level of the cell at `index`, in `[0, 1]`.
    fn occupancy(&self, index: usize) -> f64;

    /// Scalar value of the cell at `index`.
    fn value(&self, index: usize) -> f64;

    /// Maximum finite scalar value across all cells.
    ///
    /// Non-finite values (an "unreached" infinity sentinel) are
    /// skipped; a grid with no finite values reports `0.0`.
    fn max_value(&self) -> f64;
}

/// Generic *n*-dimensional cell grid.
///
/// `D` is the dimensionality (2 for 2-D, 3 for 3-D, …).
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<const D: usize> {
    /// Size in cells along each axis (x, y, z, …).
    dims: SVector<usize, D>,
    /// Resolution (world meters per cell) along each axis.
    resolution: SVector<f32, D>,
    /// Origin of cell (0, 0, …) in world coordinates.
    origin: SVector<f32, D>,
    /// Cell storage, linearized x-major.
    data: Vec<Cell>,
}

impl<const D: usize> Grid<D> {
    /// Creates a new n-dimensional grid with the specified dimensions and resolution.
    ///
    /// All cells start clear with value `0.0`.
    ///
    /// # Arguments
    /// * `dims` - Size in cells along each axis
    /// * `resolution` - Resolution (world meters per cell) along each axis
    /// * `origin` - Origin of cell (0, 0, …) in world coordinates
    ///
    /// # Returns
    /// * `Result<Self, MapError>` - The created grid or an error if parameters are invalid
    pub fn new(
        dims: SVector<usize, D>,
        resolution: SVector<f32, D>,
        origin: SVector<f32, D>,
    ) -> Result<Self, MapError> {
        for i in 0..D {
            if dims[i] == 0 {
                return Err(MapError::InvalidDimensions(
                    "All dimensions must be non-zero",
                ));
            }
            if resolution[i] <= 0.0 {
                return Err(MapError::InvalidResolution(
                    "All resolutions must be positive",
                ));
            }
        }

        // Check for potential overflow in data allocation
        let total_cells = dims
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or(MapError::InvalidDimensions(
                "Grid dimensions too large, would cause overflow",
            ))?;

        Ok(Grid {
            dims,
            resolution,
            origin,
            data: vec![Cell::default(); total_cells],
        })
    }

    /// Gets the dimensions of the grid.
    pub fn dims(&self) -> &SVector<usize, D> {
        &self.dims
    }

    /// Gets the resolution of the grid.
    pub fn resolution(&self) -> &SVector<f32, D> {
        &self.resolution
    }

    /// Gets the origin of the grid.
    pub fn origin(&self) -> &SVector<f32, D> {
        &self.origin
    }

    /// Calculates the linear index for n-dimensional coordinates.
    fn index(&self, coords: &SVector<usize, D>) -> usize {
        let mut index = 0;
        let mut stride = 1;

        for i in 0..D {
            index += coords[i] * stride;
            stride *= self.dims[i];
        }

        index
    }

    fn check_bounds(&self, coords: &SVector<usize, D>) -> Result<(), MapError> {
        for i in 0..D {
            if coords[i] >= self.dims[i] {
                return Err(MapError::OutOfBounds("Grid coordinates out of bounds"));
            }
        }
        Ok(())
    }

    /// Converts world coordinates to grid coordinates.
    /// Returns None if the world coordinates are outside the map bounds.
    pub fn world_to_grid(&self, world_coords: &SVector<f32, D>) -> Option<SVector<usize, D>> {
        let mut grid_coords = SVector::<usize, D>::zeros();

        for i in 0..D {
            let grid_f = (world_coords[i] - self.origin[i]) / self.resolution[i];

            if grid_f < 0.0 || grid_f >= self.dims[i] as f32 {
                return None;
            }

            grid_coords[i] = grid_f.floor() as usize;

            if grid_coords[i] >= self.dims[i] {
                return None;
            }
        }

        Some(grid_coords)
    }

    /// Converts grid coordinates to world coordinates (center of cell).
    pub fn grid_to_world(&self, grid_coords: &SVector<usize, D>) -> Option<SVector<f32, D>> {
        if self.check_bounds(grid_coords).is_err() {
            return None;
        }

        let mut world_coords = SVector::<f32, D>::zeros();
        for i in 0..D {
            world_coords[i] = self.origin[i] + (grid_coords[i] as f32 + 0.5) * self.resolution[i];
        }

        Some(world_coords)
    }

    /// Gets the cell at grid coordinates.
    pub fn cell(&self, grid_coords: &SVector<usize, D>) -> Result<&Cell, MapError> {
        self.check_bounds(grid_coords)?;
        let index = self.index(grid_coords);
        Ok(&self.data[index])
    }

    /// Sets the clearness level at grid coordinates, clamped into `[0, 1]`.
    pub fn set_occupancy(
        &mut self,
        grid_coords: &SVector<usize, D>,
        occupancy: f64,
    ) -> Result<(), MapError> {
        self.check_bounds(grid_coords)?;
        let index = self.index(grid_coords);
        self.data[index].set_occupancy(occupancy);
        Ok(())
    }

    /// Sets the scalar value at grid coordinates.
    pub fn set_value(
        &mut self,
        grid_coords: &SVector<usize, D>,
        value: f64,
    ) -> Result<(), MapError> {
        self.check_bounds(grid_coords)?;
        let index = self.index(grid_coords);
        self.data[index].set_value(value);
        Ok(())
    }

    /// Marks the cell at grid coordinates as fully blocked.
    pub fn block(&mut self, grid_coords: &SVector<usize, D>) -> Result<(), MapError> {
        self.set_occupancy(grid_coords, 0.0)
    }

    /// Gets the clearness level at world coordinates.
    pub fn occupancy_at_world(&self, world_coords: &SVector<f32, D>) -> Result<f64, MapError> {
        if let Some(grid_coords) = self.world_to_grid(world_coords) {
            Ok(self.cell(&grid_coords)?.occupancy())
        } else {
            Err(MapError::InvalidWorldCoordinates(
                "World coordinates outside map bounds",
            ))
        }
    }

    /// Gets the scalar value at world coordinates.
    pub fn value_at_world(&self, world_coords: &SVector<f32, D>) -> Result<f64, MapError> {
        if let Some(grid_coords) = self.world_to_grid(world_coords) {
            Ok(self.cell(&grid_coords)?.value())
        } else {
            Err(MapError::InvalidWorldCoordinates(
                "World coordinates outside map bounds",
            ))
        }
    }

    /// Gets a reference to the underlying cell data.
    pub fn data(&self) -> &[Cell] {
        &self.data
    }

    /// Resets every cell to clear with value `0.0`.
    pub fn reset(&mut self) {
        self.data.fill(Cell::default());
    }

    /// Gets the total number of cells in the grid.
    pub fn total_cells(&self) -> usize {
        self.data.len()
    }
}

impl<const D: usize> GridMap for Grid<D> {
    fn dim_sizes(&self) -> &[usize] {
        self.dims.as_slice()
    }

    fn cell_count(&self) -> usize {
        self.data.len()
    }

    fn is_occupied(&self, index: usize) -> bool {
        self.data[index].is_occupied()
    }

    fn occupancy(&self, index: usize) -> f64 {
        self.data[index].occupancy()
    }

    fn value(&self, index: usize) -> f64 {
        self.data[index].value()
    }

    fn max_value(&self) -> f64 {
        self.data
            .iter()
            .map(|cell| cell.value())
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max)
    }
}

// Type alias for the common dimension
/// 2D grid using the generic implementation.
pub type Grid2D = Grid<2>;

impl std::fmt::Display for Grid2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Grid2D ({}x{}, resolution: {:.3}m)",
            self.dims[0], self.dims[1], self.resolution[0]
        )?;
        writeln!(f, "Origin: ({:.3}, {:.3})", self.origin[0], self.origin[1])?;

        // Top row of the printout is the top of the map (highest y).
        for y in (0..self.dims[1]).rev() {
            for x in 0..self.dims[0] {
                let coords = SVector::<usize, 2>::new(x, y);
                if let Ok(cell) = self.cell(&coords) {
                    if cell.is_occupied() {
                        write!(f, "# ")?;
                    } else if cell.occupancy() < 1.0 {
                        write!(f, "o ")?;
                    } else {
                        write!(f, ". ")?;
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
