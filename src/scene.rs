//! Demo scene construction from configuration.
//!
//! Loads the viewer settings from `config/default.toml` and builds the
//! grid the diagnostics are rendered from: a configurable extent,
//! seeded random box obstacles, and a softened clearness ring around
//! obstacle edges so the continuous occupancy view has something other
//! than hard zeros and ones to show.

use anyhow::ensure;
use config::{Config, File, FileFormat};
use nalgebra::SVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{info, warn};
use wavegrid_map::{Grid2D, MapError};
use wavegrid_viz::Colormap;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Clearness assigned to free cells that touch an obstacle.
const EDGE_CLEARNESS: f64 = 0.55;

/// Viewer settings, deserialized from the config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix for every window title.
    pub title: String,
    /// Grid extent in cells.
    pub width: usize,
    /// Grid extent in cells.
    pub height: usize,
    /// Seed for obstacle placement.
    pub seed: u64,
    /// Number of random box obstacles.
    pub obstacles: usize,
    /// Maximum obstacle side length in cells.
    pub max_obstacle_size: usize,
    /// Wavefront source cell, `[x, y]`.
    pub start: [usize; 2],
    /// Primary goal cell, `[x, y]`.
    pub goal: [usize; 2],
    /// Secondary goal cell for the multi-path view, `[x, y]`.
    pub alt_goal: [usize; 2],
    /// Colormap name for value field views: "jet" or "grayscale".
    pub colormap: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            title: "Wavefront".to_string(),
            width: 60,
            height: 40,
            seed: 7,
            obstacles: 18,
            max_obstacle_size: 6,
            start: [5, 5],
            goal: [52, 33],
            alt_goal: [52, 8],
            colormap: "jet".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the default config path; a missing file
    /// yields the built-in defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
        let config = Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(false))
            .build()?;
        config.try_deserialize()
    }

    /// Resolves the configured colormap name.
    pub fn colormap(&self) -> Colormap {
        match self.colormap.as_str() {
            "jet" => Colormap::Jet,
            "grayscale" => Colormap::Grayscale,
            other => {
                warn!("Unknown colormap {other:?}, falling back to jet");
                Colormap::Jet
            }
        }
    }
}

/// Builds the demo grid: random box obstacles, clear endpoints, soft
/// edges.
pub fn build_grid(settings: &Settings) -> anyhow::Result<Grid2D> {
    for &[x, y] in [&settings.start, &settings.goal, &settings.alt_goal] {
        ensure!(
            x < settings.width && y < settings.height,
            "cell ({x}, {y}) lies outside the {}x{} grid",
            settings.width,
            settings.height
        );
    }

    let dims = SVector::<usize, 2>::new(settings.width, settings.height);
    let resolution = SVector::<f32, 2>::new(1.0, 1.0);
    let origin = SVector::<f32, 2>::zeros();
    let mut grid = Grid2D::new(dims, resolution, origin)?;

    let mut rng = StdRng::seed_from_u64(settings.seed);
    for _ in 0..settings.obstacles {
        let corner_x = rng.random_range(0..settings.width);
        let corner_y = rng.random_range(0..settings.height);
        let box_w = rng.random_range(1..=settings.max_obstacle_size);
        let box_h = rng.random_range(1..=settings.max_obstacle_size);

        for x in corner_x..(corner_x + box_w).min(settings.width) {
            for y in corner_y..(corner_y + box_h).min(settings.height) {
                grid.block(&SVector::<usize, 2>::new(x, y))?;
            }
        }
    }

    // The wavefront endpoints must stay reachable.
    for &[x, y] in [&settings.start, &settings.goal, &settings.alt_goal] {
        clear_around(&mut grid, x, y)?;
    }

    soften_edges(&mut grid)?;
    Ok(grid)
}

/// Clears the cell and its 8-neighborhood.
fn clear_around(grid: &mut Grid2D, cx: usize, cy: usize) -> Result<(), MapError> {
    let width = grid.dims()[0];
    let height = grid.dims()[1];
    for x in cx.saturating_sub(1)..=(cx + 1).min(width - 1) {
        for y in cy.saturating_sub(1)..=(cy + 1).min(height - 1) {
            grid.set_occupancy(&SVector::<usize, 2>::new(x, y), 1.0)?;
        }
    }
    Ok(())
}

/// Drops the clearness of free cells bordering an obstacle.
fn soften_edges(grid: &mut Grid2D) -> Result<(), MapError> {
    let width = grid.dims()[0];
    let height = grid.dims()[1];

    let mut edges = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let coords = SVector::<usize, 2>::new(x, y);
            if grid.cell(&coords)?.is_occupied() {
                continue;
            }

            let mut near_obstacle = false;
            if x > 0 {
                near_obstacle |= grid.cell(&SVector::<usize, 2>::new(x - 1, y))?.is_occupied();
            }
            if x + 1 < width {
                near_obstacle |= grid.cell(&SVector::<usize, 2>::new(x + 1, y))?.is_occupied();
            }
            if y > 0 {
                near_obstacle |= grid.cell(&SVector::<usize, 2>::new(x, y - 1))?.is_occupied();
            }
            if y + 1 < height {
                near_obstacle |= grid.cell(&SVector::<usize, 2>::new(x, y + 1))?.is_occupied();
            }

            if near_obstacle {
                edges.push(coords);
            }
        }
    }

    for coords in edges {
        grid.set_occupancy(&coords, EDGE_CLEARNESS)?;
    }
    Ok(())
}
