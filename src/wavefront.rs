//! Dijkstra-style wavefront propagation for the demo scene.
//!
//! Fills each reachable cell's value with its arrival time from a
//! start cell and extracts steepest-descent paths from that field.
//! This stands in for a real planner so the renderer has something to
//! draw; the rendering crates never depend on this module.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use nalgebra::SVector;
use tracing::debug;
use wavegrid_map::{Grid2D, GridMap, MapError, Path2D, Point2D};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct State {
    cost: usize,
    position: (usize, usize),
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.position.cmp(&other.position))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 4-connectivity neighbors within the grid bounds.
fn neighbors(position: (usize, usize), width: usize, height: usize) -> Vec<(usize, usize)> {
    let (x, y) = position;
    let mut out = Vec::with_capacity(4);
    if x > 0 {
        out.push((x - 1, y));
    }
    if x + 1 < width {
        out.push((x + 1, y));
    }
    if y > 0 {
        out.push((x, y - 1));
    }
    if y + 1 < height {
        out.push((x, y + 1));
    }
    out
}

/// Propagates arrival times from `start` across all free cells.
///
/// Each reached cell's arrival time is written into its scalar value
/// (the start cell gets time zero) and also returned as a table
/// indexed `x + width * y`, with `None` for unreached cells.
///
/// # Arguments
/// * `grid` - The grid to propagate through; occupied cells block the wave.
/// * `start` - Starting cell in grid coordinates.
pub fn propagate(
    grid: &mut Grid2D,
    start: (usize, usize),
) -> Result<Vec<Option<usize>>, MapError> {
    let width = grid.dims()[0];
    let height = grid.dims()[1];
    let start_coords = SVector::<usize, 2>::new(start.0, start.1);

    let mut arrival: Vec<Option<usize>> = vec![None; width * height];
    if grid.cell(&start_coords)?.is_occupied() {
        debug!(?start, "wavefront start cell is occupied, nothing reachable");
        return Ok(arrival);
    }

    let mut open_set = BinaryHeap::new();
    arrival[start.0 + width * start.1] = Some(0);
    open_set.push(State {
        cost: 0,
        position: start,
    });

    while let Some(State { cost, position }) = open_set.pop() {
        let index = position.0 + width * position.1;
        if arrival[index].is_some_and(|best| cost > best) {
            continue;
        }

        for neighbor in neighbors(position, width, height) {
            let neighbor_index = neighbor.0 + width * neighbor.1;
            if GridMap::is_occupied(grid, neighbor_index) {
                continue;
            }
            let tentative = cost + 1;
            if arrival[neighbor_index].is_none_or(|best| tentative < best) {
                arrival[neighbor_index] = Some(tentative);
                open_set.push(State {
                    cost: tentative,
                    position: neighbor,
                });
            }
        }
    }

    let mut reached = 0;
    for y in 0..height {
        for x in 0..width {
            if let Some(time) = arrival[x + width * y] {
                grid.set_value(&SVector::<usize, 2>::new(x, y), time as f64)?;
                reached += 1;
            }
        }
    }
    debug!(reached, total = width * height, "wavefront propagation complete");

    Ok(arrival)
}

/// Walks from `goal` down the arrival table back to `start`.
///
/// Returns the path in start-to-goal order, or `None` when the goal
/// was never reached by the wavefront.
pub fn extract_path(
    arrival: &[Option<usize>],
    width: usize,
    start: (usize, usize),
    goal: (usize, usize),
) -> Option<Path2D> {
    let height = arrival.len() / width;
    arrival[goal.0 + width * goal.1]?;

    let mut cells = vec![goal];
    let mut current = goal;
    while current != start {
        let current_time = arrival[current.0 + width * current.1]?;
        let next = neighbors(current, width, height)
            .into_iter()
            .filter_map(|n| arrival[n.0 + width * n.1].map(|t| (t, n)))
            .filter(|&(t, _)| t < current_time)
            .min()?;
        current = next.1;
        cells.push(current);
    }
    cells.reverse();

    Some(
        cells
            .into_iter()
            .map(|(x, y)| Point2D::new(x as f64, y as f64))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_grid() -> Grid2D {
        // 6x5 with a wall at x = 3 leaving a gap at the top row.
        let dims = SVector::<usize, 2>::new(6, 5);
        let resolution = SVector::<f32, 2>::new(1.0, 1.0);
        let origin = SVector::<f32, 2>::zeros();
        let mut grid = Grid2D::new(dims, resolution, origin).unwrap();
        for y in 0..4 {
            grid.block(&SVector::<usize, 2>::new(3, y)).unwrap();
        }
        grid
    }

    #[test]
    fn test_propagate_reaches_around_walls() {
        let mut grid = walled_grid();
        let arrival = propagate(&mut grid, (0, 0)).unwrap();

        // The wall cells stay unreached; everything else is reached.
        for y in 0..4 {
            assert!(arrival[3 + 6 * y].is_none());
        }
        // Cell (4, 0) behind the wall is reached by going over the top.
        let behind = arrival[4].unwrap();
        assert!(behind > 8);

        // Arrival times land in the grid values too.
        assert_eq!(
            grid.cell(&SVector::<usize, 2>::new(1, 0)).unwrap().value(),
            1.0
        );
    }

    #[test]
    fn test_propagate_from_occupied_start() {
        let mut grid = walled_grid();
        let arrival = propagate(&mut grid, (3, 0)).unwrap();
        assert!(arrival.iter().all(Option::is_none));
    }

    #[test]
    fn test_extract_path_endpoints_and_monotonicity() {
        let mut grid = walled_grid();
        let arrival = propagate(&mut grid, (0, 0)).unwrap();
        let path = extract_path(&arrival, 6, (0, 0), (5, 0)).unwrap();

        assert_eq!(path.first().unwrap(), &Point2D::new(0.0, 0.0));
        assert_eq!(path.last().unwrap(), &Point2D::new(5.0, 0.0));

        // Arrival time strictly increases along the path.
        let times: Vec<usize> = path
            .iter()
            .map(|p| arrival[p.x as usize + 6 * (p.y as usize)].unwrap())
            .collect();
        assert!(times.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_extract_path_to_unreached_goal() {
        let mut grid = walled_grid();
        let arrival = propagate(&mut grid, (0, 0)).unwrap();
        assert!(extract_path(&arrival, 6, (0, 0), (3, 0)).is_none());
    }
}
