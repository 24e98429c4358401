use nalgebra::SVector;
use wavegrid_map::{Grid2D, Point2D};
use wavegrid_viz::Raster;
use wavegrid_viz::render::{
    normalized_value_image, occupancy_image, occupancy_with_paths_image,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a 16x10 grid with a wall that leaves a gap near the top.
    let dims = SVector::<usize, 2>::new(16, 10);
    let resolution = SVector::<f32, 2>::new(1.0, 1.0);
    let origin = SVector::<f32, 2>::zeros();
    let mut grid = Grid2D::new(dims, resolution, origin)?;

    for y in 0..7 {
        grid.block(&SVector::<usize, 2>::new(8, y))?;
    }

    // Fake an arrival-time field radiating from the bottom-left corner.
    for y in 0..10 {
        for x in 0..16 {
            let coords = SVector::<usize, 2>::new(x, y);
            if !grid.cell(&coords)?.is_occupied() {
                grid.set_value(&coords, (x + y) as f64)?;
            }
        }
    }

    println!("Occupancy map (top row of output is the top of the map):");
    print_gray(&occupancy_image(&grid)?);

    println!("\nNormalized arrival times:");
    print_gray(&normalized_value_image(&grid)?);

    // Two hand-made paths around the wall, one per overlay color.
    let low_road: Vec<Point2D> = (0..16).map(|x| Point2D::new(x as f64, 8.0)).collect();
    let high_road: Vec<Point2D> = (0..16).map(|x| Point2D::new(x as f64, 9.0)).collect();

    let overlaid = occupancy_with_paths_image(&grid, &[low_road, high_road])?;
    println!("\nPath overlay (b = first path, r = second path):");
    print_overlay(&overlaid);

    Ok(())
}

/// Prints a single-channel raster as ASCII shades.
fn print_gray(img: &Raster) {
    for y in 0..img.height() {
        for x in 0..img.width() {
            let shade = match img.get(x, y, 0) {
                0 => '#',
                1..=84 => '+',
                85..=169 => 'o',
                _ => '.',
            };
            print!("{shade} ");
        }
        println!();
    }
}

/// Prints an RGB raster, marking which overlay channel survives.
fn print_overlay(img: &Raster) {
    for y in 0..img.height() {
        for x in 0..img.width() {
            let [r, g, b] = [img.get(x, y, 0), img.get(x, y, 1), img.get(x, y, 2)];
            let mark = match (r, g, b) {
                (0, 0, 0) => '#',
                (255, 0, 0) => 'r',
                (0, 255, 0) => 'g',
                (0, 0, 255) => 'b',
                _ => '.',
            };
            print!("{mark} ");
        }
        println!();
    }
}
