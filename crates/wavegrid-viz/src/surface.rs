//! Display surface abstraction.
//!
//! Rendering hands finished rasters to an [`ImageSurface`]; the
//! surface decides what "display" means. Tests and headless tools use
//! [`FrameStore`]; the demo application bridges captured frames onto a
//! macroquad window through [`to_texture`] (behind the `visualization`
//! feature). Keeping the windowing toolkit out of the render path is
//! what makes the coordinate-mapping core testable without a display.

use crate::raster::Raster;

/// Receiver for finished raster images.
///
/// `show` returns once the surface has accepted the frame; it must not
/// block on user interaction.
pub trait ImageSurface {
    /// Accepts a finished image under a window title.
    fn show(&mut self, image: &Raster, title: &str);
}

/// Headless capture surface that records every frame it is shown.
#[derive(Debug, Default)]
pub struct FrameStore {
    frames: Vec<(String, Raster)>,
}

impl FrameStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured (title, image) pairs, in display order.
    pub fn frames(&self) -> &[(String, Raster)] {
        &self.frames
    }

    /// Consumes the store, yielding the captured frames.
    pub fn into_frames(self) -> Vec<(String, Raster)> {
        self.frames
    }

    /// Number of captured frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frame has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl ImageSurface for FrameStore {
    fn show(&mut self, image: &Raster, title: &str) {
        self.frames.push((title.to_string(), image.clone()));
    }
}

/// Uploads a raster as a macroquad texture.
///
/// Grayscale rasters are replicated across RGB; alpha is opaque.
#[cfg(feature = "visualization")]
pub fn to_texture(image: &Raster) -> macroquad::texture::Texture2D {
    use macroquad::texture::{FilterMode, Texture2D};

    let (width, height) = (image.width(), image.height());
    let mut rgba = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let [r, g, b] = match image.channels() {
                1 => {
                    let v = image.get(x, y, 0);
                    [v, v, v]
                }
                _ => [image.get(x, y, 0), image.get(x, y, 1), image.get(x, y, 2)],
            };
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
    }

    let texture = Texture2D::from_rgba8(width as u16, height as u16, &rgba);
    // Cell edges must stay hard when the texture is scaled up.
    texture.set_filter(FilterMode::Nearest);
    texture
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_store_records_in_order() {
        let mut store = FrameStore::new();
        assert!(store.is_empty());

        store.show(&Raster::gray(2, 2), "first Map");
        store.show(&Raster::rgb(3, 3), "second Map and Path");

        assert_eq!(store.len(), 2);
        assert_eq!(store.frames()[0].0, "first Map");
        assert_eq!(store.frames()[1].0, "second Map and Path");
        assert_eq!(store.frames()[1].1.channels(), 3);
    }

    #[test]
    fn test_frame_store_clones_the_image() {
        let mut store = FrameStore::new();
        let mut img = Raster::gray(1, 1);
        img.set(0, 0, 0, 42);
        store.show(&img, "t");

        img.set(0, 0, 0, 0);
        assert_eq!(store.frames()[0].1.get(0, 0, 0), 42);
    }
}
