//! Grid rendering operations.
//!
//! Each operation reads a [`GridMap`] and produces a fresh [`Raster`].
//! Grids are Cartesian (origin bottom-left, Y up) while rasters use
//! the image convention (origin top-left, Y down), so every cell at
//! grid row `y` lands on image row `height - y - 1`; the column is
//! unchanged. That flip is the load-bearing invariant of this module
//! and lives in exactly one helper, [`image_row`].
//!
//! The `*_image` functions are pure builders usable headlessly;
//! [`GridRenderer`] wraps them and dispatches the result to an
//! [`ImageSurface`] under the conventional window titles.

use tracing::debug;

use wavegrid_map::{GridMap, Path2D};

use crate::colormap::{Colormap, apply_colormap};
use crate::error::VizError;
use crate::raster::Raster;
use crate::surface::ImageSurface;

/// Overlay palette: the RGB channel each path keeps, in assignment
/// order. Path 0 renders blue, path 1 red, path 2 green; the other two
/// channels of each path pixel are zeroed.
const PATH_PALETTE: [usize; 3] = [2, 0, 1];

/// Channel kept by single-path overlays (red).
const SINGLE_PATH_CHANNEL: usize = 0;

/// Maximum number of simultaneously renderable paths.
pub const MAX_OVERLAY_PATHS: usize = PATH_PALETTE.len();

/// Validates that the grid is exactly 2-dimensional and returns
/// (width, height).
fn require_2d<G: GridMap>(grid: &G) -> Result<(usize, usize), VizError> {
    let dims = grid.dim_sizes();
    if dims.len() != 2 {
        return Err(VizError::DimensionMismatch(dims.len()));
    }
    Ok((dims[0], dims[1]))
}

/// Maps a Cartesian grid row (origin bottom-left) onto an image row
/// (origin top-left). The column needs no mapping.
#[inline]
fn image_row(height: usize, y: usize) -> usize {
    height - y - 1
}

/// Truncates path points toward zero into pixel coordinates.
///
/// Every point is validated before a single pixel is written: a point
/// whose truncated coordinate falls outside the raster aborts the
/// whole render, so a bad path can never scribble out of bounds or
/// leave a half-drawn overlay.
fn truncate_path(
    path: &Path2D,
    width: usize,
    height: usize,
) -> Result<Vec<(usize, usize)>, VizError> {
    let mut pixels = Vec::with_capacity(path.len());
    for point in path {
        if !(0.0..width as f64).contains(&point.x) || !(0.0..height as f64).contains(&point.y) {
            return Err(VizError::PathOutOfBounds {
                x: point.x,
                y: point.y,
                width,
                height,
            });
        }
        pixels.push((point.x as usize, point.y as usize));
    }
    Ok(pixels)
}

/// Zeroes every channel except `keep` at each path pixel.
fn overlay_pixels(img: &mut Raster, pixels: &[(usize, usize)], keep: usize) {
    let height = img.height();
    for &(x, y) in pixels {
        let row = image_row(height, y);
        for c in 0..img.channels() {
            if c != keep {
                img.set(x, row, c, 0);
            }
        }
    }
}

/// Renders the binary occupancy map: 255 where a cell is free, 0 where
/// it is occupied.
pub fn occupancy_image<G: GridMap>(grid: &G) -> Result<Raster, VizError> {
    let (width, height) = require_2d(grid)?;
    let mut img = Raster::gray(width, height);
    for y in 0..height {
        let row = image_row(height, y);
        for x in 0..width {
            if !grid.is_occupied(width * y + x) {
                img.set(x, row, 0, 255);
            }
        }
    }
    Ok(img)
}

/// Renders the continuous occupancy map: pixel = clearness level
/// scaled to `[0, 255]`, without the binary variant's inversion.
pub fn intensity_image<G: GridMap>(grid: &G) -> Result<Raster, VizError> {
    let (width, height) = require_2d(grid)?;
    let mut img = Raster::gray(width, height);
    for y in 0..height {
        let row = image_row(height, y);
        for x in 0..width {
            let level = (grid.occupancy(width * y + x) * 255.0).clamp(0.0, 255.0);
            img.set(x, row, 0, level as u8);
        }
    }
    Ok(img)
}

/// Renders cell values normalized against the grid's current maximum,
/// as a single-channel image.
///
/// The maximum is queried once per call, so the picture always
/// reflects the data as it stands; nothing is cached between calls. A
/// non-positive maximum yields an all-zero field rather than NaN
/// samples.
pub fn normalized_value_image<G: GridMap>(grid: &G) -> Result<Raster, VizError> {
    let (width, height) = require_2d(grid)?;
    let max_value = grid.max_value();
    let mut img = Raster::gray(width, height);

    if max_value <= 0.0 {
        debug!(max_value, "degenerate value range, rendering zero field");
        return Ok(img);
    }

    for y in 0..height {
        let row = image_row(height, y);
        for x in 0..width {
            let level = (grid.value(width * y + x) / max_value * 255.0).clamp(0.0, 255.0);
            img.set(x, row, 0, level as u8);
        }
    }
    Ok(img)
}

/// Renders the false-colored value field.
pub fn value_field_image<G: GridMap>(grid: &G, colormap: Colormap) -> Result<Raster, VizError> {
    Ok(apply_colormap(&normalized_value_image(grid)?, colormap))
}

/// Renders the binary occupancy map in RGB with one path drawn in red.
pub fn occupancy_with_path_image<G: GridMap>(
    grid: &G,
    path: &Path2D,
) -> Result<Raster, VizError> {
    let mut img = occupancy_image(grid)?.expand_rgb();
    let pixels = truncate_path(path, img.width(), img.height())?;
    overlay_pixels(&mut img, &pixels, SINGLE_PATH_CHANNEL);
    Ok(img)
}

/// Renders the continuous occupancy map in RGB with one path drawn in
/// red.
pub fn intensity_with_path_image<G: GridMap>(
    grid: &G,
    path: &Path2D,
) -> Result<Raster, VizError> {
    let mut img = intensity_image(grid)?.expand_rgb();
    let pixels = truncate_path(path, img.width(), img.height())?;
    overlay_pixels(&mut img, &pixels, SINGLE_PATH_CHANNEL);
    Ok(img)
}

/// Renders the binary occupancy map in RGB with up to
/// [`MAX_OVERLAY_PATHS`] paths, each in its own palette color.
///
/// Supplying more paths than the palette holds is an error; silently
/// wrapping colors around would render distinct paths identically.
pub fn occupancy_with_paths_image<G: GridMap>(
    grid: &G,
    paths: &[Path2D],
) -> Result<Raster, VizError> {
    if paths.len() > MAX_OVERLAY_PATHS {
        return Err(VizError::TooManyPaths {
            count: paths.len(),
            capacity: MAX_OVERLAY_PATHS,
        });
    }

    let mut img = occupancy_image(grid)?.expand_rgb();

    // Validate every path before the first overlay write.
    let mut rasterized = Vec::with_capacity(paths.len());
    for path in paths {
        rasterized.push(truncate_path(path, img.width(), img.height())?);
    }

    for (slot, pixels) in rasterized.iter().enumerate() {
        overlay_pixels(&mut img, pixels, PATH_PALETTE[slot]);
    }
    Ok(img)
}

/// Renders the false-colored value field with the path burned in at
/// the top of the ramp.
///
/// Path pixels are forced to the maximum sample before the colormap is
/// applied, so the path shows in the ramp's top color regardless of
/// the field value underneath.
pub fn value_field_with_path_image<G: GridMap>(
    grid: &G,
    path: &Path2D,
    colormap: Colormap,
) -> Result<Raster, VizError> {
    let mut field = normalized_value_image(grid)?;
    let pixels = truncate_path(path, field.width(), field.height())?;

    let height = field.height();
    for &(x, y) in &pixels {
        field.set(x, image_row(height, y), 0, 255);
    }
    Ok(apply_colormap(&field, colormap))
}

/// Stateless dispatcher binding the image builders to a display
/// surface.
///
/// Nothing is retained between calls apart from the surface handle and
/// the colormap choice; every call rebuilds its raster from the grid's
/// current contents.
pub struct GridRenderer<S> {
    surface: S,
    colormap: Colormap,
}

impl<S: ImageSurface> GridRenderer<S> {
    /// Creates a renderer drawing to `surface` with the jet colormap.
    pub fn new(surface: S) -> Self {
        GridRenderer {
            surface,
            colormap: Colormap::Jet,
        }
    }

    /// Replaces the colormap used for value field views.
    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// The underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consumes the renderer, yielding the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn dispatch(&mut self, image: Raster, title: String) {
        debug!(
            title = %title,
            width = image.width(),
            height = image.height(),
            channels = image.channels(),
            "dispatching frame"
        );
        self.surface.show(&image, &title);
    }

    /// Shows the binary occupancy map as `"<title> Map"`.
    pub fn occupancy_map<G: GridMap>(&mut self, grid: &G, title: &str) -> Result<(), VizError> {
        let img = occupancy_image(grid)?;
        self.dispatch(img, format!("{title} Map"));
        Ok(())
    }

    /// Shows the continuous occupancy map as `"<title> Occupancy Map"`.
    pub fn intensity_map<G: GridMap>(&mut self, grid: &G, title: &str) -> Result<(), VizError> {
        let img = intensity_image(grid)?;
        self.dispatch(img, format!("{title} Occupancy Map"));
        Ok(())
    }

    /// Shows the false-colored value field as `"<title> Grid values"`.
    pub fn value_field<G: GridMap>(&mut self, grid: &G, title: &str) -> Result<(), VizError> {
        let img = value_field_image(grid, self.colormap)?;
        self.dispatch(img, format!("{title} Grid values"));
        Ok(())
    }

    /// Shows the binary map with one path as `"<title> Map and Path"`.
    pub fn occupancy_with_path<G: GridMap>(
        &mut self,
        grid: &G,
        path: &Path2D,
        title: &str,
    ) -> Result<(), VizError> {
        let img = occupancy_with_path_image(grid, path)?;
        self.dispatch(img, format!("{title} Map and Path"));
        Ok(())
    }

    /// Shows the continuous occupancy map with one path as
    /// `"<title> Map and Path"`.
    pub fn intensity_with_path<G: GridMap>(
        &mut self,
        grid: &G,
        path: &Path2D,
        title: &str,
    ) -> Result<(), VizError> {
        let img = intensity_with_path_image(grid, path)?;
        self.dispatch(img, format!("{title} Map and Path"));
        Ok(())
    }

    /// Shows the binary map with a set of paths as
    /// `"<title> Map and Paths"`.
    pub fn occupancy_with_paths<G: GridMap>(
        &mut self,
        grid: &G,
        paths: &[Path2D],
        title: &str,
    ) -> Result<(), VizError> {
        let img = occupancy_with_paths_image(grid, paths)?;
        self.dispatch(img, format!("{title} Map and Paths"));
        Ok(())
    }

    /// Shows the value field with the path burned in as
    /// `"<title> Values and Path"`.
    pub fn value_field_with_path<G: GridMap>(
        &mut self,
        grid: &G,
        path: &Path2D,
        title: &str,
    ) -> Result<(), VizError> {
        let img = value_field_with_path_image(grid, path, self.colormap)?;
        self.dispatch(img, format!("{title} Values and Path"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FrameStore;
    use nalgebra::SVector;
    use wavegrid_map::{Grid, Grid2D, Point2D};

    fn open_grid(width: usize, height: usize) -> Grid2D {
        Grid2D::new(
            SVector::<usize, 2>::new(width, height),
            SVector::<f32, 2>::new(1.0, 1.0),
            SVector::<f32, 2>::zeros(),
        )
        .unwrap()
    }

    fn at(c: usize, r: usize) -> SVector<usize, 2> {
        SVector::<usize, 2>::new(c, r)
    }

    fn rgb_at(img: &Raster, x: usize, y: usize) -> [u8; 3] {
        [img.get(x, y, 0), img.get(x, y, 1), img.get(x, y, 2)]
    }

    #[test]
    fn test_occupancy_map_flips_vertically() {
        let mut grid = open_grid(3, 2);
        grid.block(&at(0, 0)).unwrap();
        grid.block(&at(2, 1)).unwrap();

        let img = occupancy_image(&grid).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                let occupied = grid.cell(&at(x, y)).unwrap().is_occupied();
                let expected = if occupied { 0 } else { 255 };
                assert_eq!(
                    img.get(x, 2 - y - 1, 0),
                    expected,
                    "cell ({x}, {y}) mapped wrong"
                );
            }
        }
    }

    #[test]
    fn test_one_by_one_occupied_cell() {
        let mut grid = open_grid(1, 1);
        grid.block(&at(0, 0)).unwrap();

        let img = occupancy_image(&grid).unwrap();
        assert_eq!(img.as_bytes(), &[0]);
    }

    #[test]
    fn test_intensity_map_scales_without_inversion() {
        let mut grid = open_grid(2, 1);
        grid.set_occupancy(&at(0, 0), 0.5).unwrap();
        grid.block(&at(1, 0)).unwrap();

        let img = intensity_image(&grid).unwrap();
        assert_eq!(img.get(0, 0, 0), 127);
        assert_eq!(img.get(1, 0, 0), 0);
    }

    #[test]
    fn test_value_normalization_bounds() {
        let mut grid = open_grid(3, 1);
        grid.set_value(&at(0, 0), 0.0).unwrap();
        grid.set_value(&at(1, 0), 5.0).unwrap();
        grid.set_value(&at(2, 0), 10.0).unwrap();

        let img = normalized_value_image(&grid).unwrap();
        assert_eq!(img.get(0, 0, 0), 0);
        assert_eq!(img.get(1, 0, 0), 127);
        assert_eq!(img.get(2, 0, 0), 255);
    }

    #[test]
    fn test_degenerate_max_renders_zero_field() {
        let grid = open_grid(4, 3);
        let img = normalized_value_image(&grid).unwrap();
        assert!(img.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_one_by_one_value_hits_top_of_ramp() {
        let mut grid = open_grid(1, 1);
        grid.set_value(&at(0, 0), 5.0).unwrap();

        let field = normalized_value_image(&grid).unwrap();
        assert_eq!(field.get(0, 0, 0), 255);

        let colored = value_field_image(&grid, Colormap::Jet).unwrap();
        assert_eq!(rgb_at(&colored, 0, 0), Colormap::Jet.apply(255));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut grid = open_grid(4, 4);
        grid.block(&at(1, 2)).unwrap();
        grid.set_value(&at(3, 3), 2.0).unwrap();

        assert_eq!(
            occupancy_image(&grid).unwrap(),
            occupancy_image(&grid).unwrap()
        );
        assert_eq!(
            value_field_image(&grid, Colormap::Jet).unwrap(),
            value_field_image(&grid, Colormap::Jet).unwrap()
        );
    }

    #[test]
    fn test_single_point_path_changes_exactly_one_pixel() {
        let grid = open_grid(4, 3);
        let path = vec![Point2D::new(1.0, 1.0)];

        let base = occupancy_image(&grid).unwrap().expand_rgb();
        let img = occupancy_with_path_image(&grid, &path).unwrap();

        // Grid (1, 1) lands on image row height - 1 - 1 = 1.
        for y in 0..3 {
            for x in 0..4 {
                if (x, y) == (1, 1) {
                    assert_eq!(rgb_at(&img, x, y), [255, 0, 0]);
                } else {
                    assert_eq!(rgb_at(&img, x, y), rgb_at(&base, x, y));
                }
            }
        }
    }

    #[test]
    fn test_path_points_truncate_toward_zero() {
        let grid = open_grid(4, 4);
        let path = vec![Point2D::new(2.9, 0.2)];

        let img = occupancy_with_path_image(&grid, &path).unwrap();
        // (2.9, 0.2) truncates to cell (2, 0), image row 3.
        assert_eq!(rgb_at(&img, 2, 3), [255, 0, 0]);
    }

    #[test]
    fn test_empty_path_changes_nothing() {
        let grid = open_grid(3, 3);
        let img = occupancy_with_path_image(&grid, &Vec::new()).unwrap();
        assert_eq!(img, occupancy_image(&grid).unwrap().expand_rgb());
    }

    #[test]
    fn test_multi_path_channel_isolation() {
        let grid = open_grid(5, 5);
        let paths = vec![
            vec![Point2D::new(1.0, 1.0)],
            vec![Point2D::new(3.0, 3.0)],
        ];

        let img = occupancy_with_paths_image(&grid, &paths).unwrap();
        // Path 0 keeps blue at image (1, 3); path 1 keeps red at (3, 1).
        assert_eq!(rgb_at(&img, 1, 3), [0, 0, 255]);
        assert_eq!(rgb_at(&img, 3, 1), [255, 0, 0]);
        // An untouched pixel stays white.
        assert_eq!(rgb_at(&img, 0, 0), [255, 255, 255]);
    }

    #[test]
    fn test_third_path_keeps_green() {
        let grid = open_grid(4, 4);
        let paths = vec![
            vec![Point2D::new(0.0, 0.0)],
            vec![Point2D::new(1.0, 1.0)],
            vec![Point2D::new(2.0, 2.0)],
        ];

        let img = occupancy_with_paths_image(&grid, &paths).unwrap();
        assert_eq!(rgb_at(&img, 2, 1), [0, 255, 0]);
    }

    #[test]
    fn test_too_many_paths_is_rejected() {
        let grid = open_grid(4, 4);
        let paths = vec![Vec::new(), Vec::new(), Vec::new(), Vec::new()];

        assert_eq!(
            occupancy_with_paths_image(&grid, &paths),
            Err(VizError::TooManyPaths {
                count: 4,
                capacity: MAX_OVERLAY_PATHS
            })
        );
    }

    #[test]
    fn test_out_of_bounds_path_point_is_rejected() {
        let grid = open_grid(3, 3);

        for bad in [
            Point2D::new(3.0, 1.0),
            Point2D::new(1.0, 3.0),
            Point2D::new(-0.1, 1.0),
        ] {
            let result = occupancy_with_path_image(&grid, &vec![bad]);
            assert!(
                matches!(result, Err(VizError::PathOutOfBounds { .. })),
                "point {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_path_burns_into_value_field_at_ramp_top() {
        let mut grid = open_grid(3, 3);
        grid.set_value(&at(2, 2), 10.0).unwrap();

        let path = vec![Point2D::new(0.0, 0.0)];
        let img = value_field_with_path_image(&grid, &path, Colormap::Jet).unwrap();

        // The path pixel reads as the ramp's top color even though the
        // field there is zero.
        assert_eq!(rgb_at(&img, 0, 2), Colormap::Jet.apply(255));
    }

    #[test]
    fn test_three_dimensional_grid_is_rejected() {
        let grid = Grid::<3>::new(
            SVector::<usize, 3>::new(2, 2, 2),
            SVector::<f32, 3>::new(1.0, 1.0, 1.0),
            SVector::<f32, 3>::zeros(),
        )
        .unwrap();

        assert_eq!(
            occupancy_image(&grid),
            Err(VizError::DimensionMismatch(3))
        );
    }

    #[test]
    fn test_renderer_titles() {
        let mut grid = open_grid(3, 3);
        grid.set_value(&at(1, 1), 1.0).unwrap();
        let path = vec![Point2D::new(0.0, 0.0)];

        let mut renderer = GridRenderer::new(FrameStore::new());
        renderer.occupancy_map(&grid, "Demo").unwrap();
        renderer.intensity_map(&grid, "Demo").unwrap();
        renderer.value_field(&grid, "Demo").unwrap();
        renderer.occupancy_with_path(&grid, &path, "Demo").unwrap();
        renderer.intensity_with_path(&grid, &path, "Demo").unwrap();
        renderer
            .occupancy_with_paths(&grid, std::slice::from_ref(&path), "Demo")
            .unwrap();
        renderer.value_field_with_path(&grid, &path, "Demo").unwrap();

        let titles: Vec<&str> = renderer
            .surface()
            .frames()
            .iter()
            .map(|(title, _)| title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Demo Map",
                "Demo Occupancy Map",
                "Demo Grid values",
                "Demo Map and Path",
                "Demo Map and Path",
                "Demo Map and Paths",
                "Demo Values and Path",
            ]
        );
    }
}
