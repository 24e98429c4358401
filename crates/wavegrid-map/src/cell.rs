//! Per-cell state stored in a grid.

/// A single grid cell: an occupancy level plus a scalar value.
///
/// Occupancy is a clearness level in `[0, 1]`: `0.0` means the cell is
/// fully blocked, `1.0` means it is completely clear. Anything in
/// between represents soft or probabilistic occupancy. The scalar
/// value carries whatever quantity the planner writes into the grid,
/// typically a wavefront arrival time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    occupancy: f64,
    value: f64,
}

impl Cell {
    /// Creates a clear cell with the given scalar value.
    pub fn clear(value: f64) -> Self {
        Cell {
            occupancy: 1.0,
            value,
        }
    }

    /// Creates a fully blocked cell.
    pub fn blocked() -> Self {
        Cell {
            occupancy: 0.0,
            value: 0.0,
        }
    }

    /// The cell's clearness level in `[0, 1]`.
    pub fn occupancy(&self) -> f64 {
        self.occupancy
    }

    /// Sets the clearness level, clamped into `[0, 1]`.
    pub fn set_occupancy(&mut self, occupancy: f64) {
        self.occupancy = occupancy.clamp(0.0, 1.0);
    }

    /// The cell's scalar value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the cell's scalar value.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Whether the cell is blocked for traversal.
    ///
    /// A cell counts as occupied only at zero clearness; any positive
    /// clearness is traversable.
    pub fn is_occupied(&self) -> bool {
        self.occupancy <= 0.0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::clear(0.0)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_occupied() {
            write!(f, "Blocked")
        } else {
            write!(f, "Clear({:.2}, value: {:.3})", self.occupancy, self.value)
        }
    }
}
