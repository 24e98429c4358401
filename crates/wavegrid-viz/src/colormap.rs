//! False-color look-up tables for scalar field rendering.
//!
//! The jet table is process-wide immutable configuration data: it is
//! computed once on first use and only ever read afterwards, so no
//! locking is involved.

use once_cell::sync::Lazy;

use crate::raster::Raster;

/// 256-entry blue-to-red ramp, indexed by a normalized byte level.
static JET: Lazy<[[u8; 3]; 256]> = Lazy::new(jet_ramp);

/// Builds the classic piecewise-linear jet ramp: dark blue through
/// cyan, green, and yellow up to dark red.
fn jet_ramp() -> [[u8; 3]; 256] {
    let mut lut = [[0u8; 3]; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let t = i as f64 / 255.0;
        *entry = [
            channel_ramp(1.5 - (4.0 * t - 3.0).abs()),
            channel_ramp(1.5 - (4.0 * t - 2.0).abs()),
            channel_ramp(1.5 - (4.0 * t - 1.0).abs()),
        ];
    }
    lut
}

fn channel_ramp(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Available false-color mappings for scalar field visualization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Colormap {
    /// Jet ramp - blue (low) through green to red (high).
    Jet,
    /// Grayscale passthrough - black (low) to white (high).
    Grayscale,
}

impl Colormap {
    /// Converts a normalized byte level into an RGB color.
    pub fn apply(self, level: u8) -> [u8; 3] {
        match self {
            Colormap::Jet => JET[level as usize],
            Colormap::Grayscale => [level; 3],
        }
    }
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Jet => write!(f, "Jet"),
            Colormap::Grayscale => write!(f, "Grayscale"),
        }
    }
}

/// Converts a single-channel raster into RGB through the given colormap.
///
/// Panics if `src` is not single-channel; false-coloring an already
/// colored image is a bug in the caller.
pub fn apply_colormap(src: &Raster, colormap: Colormap) -> Raster {
    assert_eq!(src.channels(), 1, "colormap input must be single-channel");

    let mut out = Raster::rgb(src.width(), src.height());
    for y in 0..src.height() {
        for x in 0..src.width() {
            let [r, g, b] = colormap.apply(src.get(x, y, 0));
            out.set(x, y, 0, r);
            out.set(x, y, 1, g);
            out.set(x, y, 2, b);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jet_low_end_is_dark_blue() {
        let [r, g, b] = Colormap::Jet.apply(0);
        assert_eq!(r, 0);
        assert_eq!(g, 0);
        assert_eq!(b, 128);
    }

    #[test]
    fn test_jet_high_end_is_dark_red() {
        let [r, g, b] = Colormap::Jet.apply(255);
        assert_eq!(r, 128);
        assert_eq!(g, 0);
        assert_eq!(b, 0);
    }

    #[test]
    fn test_jet_midpoint_is_green_dominant() {
        let [r, g, b] = Colormap::Jet.apply(128);
        assert_eq!(g, 255);
        assert!(g > r && g > b);
    }

    #[test]
    fn test_grayscale_is_identity_per_channel() {
        assert_eq!(Colormap::Grayscale.apply(0), [0, 0, 0]);
        assert_eq!(Colormap::Grayscale.apply(77), [77, 77, 77]);
        assert_eq!(Colormap::Grayscale.apply(255), [255, 255, 255]);
    }

    #[test]
    fn test_apply_colormap_maps_every_pixel() {
        let mut field = Raster::gray(2, 1);
        field.set(0, 0, 0, 0);
        field.set(1, 0, 0, 255);

        let colored = apply_colormap(&field, Colormap::Jet);
        assert_eq!(colored.channels(), 3);
        assert_eq!(
            [colored.get(0, 0, 0), colored.get(0, 0, 1), colored.get(0, 0, 2)],
            [0, 0, 128]
        );
        assert_eq!(
            [colored.get(1, 0, 0), colored.get(1, 0, 1), colored.get(1, 0, 2)],
            [128, 0, 0]
        );
    }
}
