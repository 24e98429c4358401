//! Raster image buffers in display coordinates.
//!
//! A [`Raster`] is addressed with the image convention: pixel (0, 0)
//! at the top-left corner, Y growing downward. The Cartesian flip from
//! grid space happens in the render operations, so this module never
//! sees grid coordinates.

/// A rectangular buffer of byte samples, one or more channels,
/// interleaved row-major.
///
/// Rasters are ephemeral: each render operation constructs one, fills
/// it completely, hands it to the display surface, and drops it. There
/// is no caching or reuse across calls.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Creates a zero-filled single-channel (grayscale) raster.
    pub fn gray(width: usize, height: usize) -> Self {
        Self::with_channels(width, height, 1)
    }

    /// Creates a zero-filled three-channel (RGB) raster.
    pub fn rgb(width: usize, height: usize) -> Self {
        Self::with_channels(width, height, 3)
    }

    fn with_channels(width: usize, height: usize, channels: usize) -> Self {
        Raster {
            width,
            height,
            channels,
            data: vec![0; width * height * channels],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of channels per pixel (1 = grayscale, 3 = RGB).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The raw interleaved sample bytes, row-major from the top-left.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, channel: usize) -> usize {
        assert!(
            x < self.width && y < self.height && channel < self.channels,
            "raster access ({x}, {y}, {channel}) outside {}x{}x{}",
            self.width,
            self.height,
            self.channels
        );
        (y * self.width + x) * self.channels + channel
    }

    /// Reads the sample at image coordinates (x, y) in the given channel.
    ///
    /// Panics when the coordinates are out of range; callers validate
    /// before writing, so an out-of-range access is a bug.
    pub fn get(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.data[self.offset(x, y, channel)]
    }

    /// Writes the sample at image coordinates (x, y) in the given channel.
    ///
    /// Panics when the coordinates are out of range.
    pub fn set(&mut self, x: usize, y: usize, channel: usize, sample: u8) {
        let offset = self.offset(x, y, channel);
        self.data[offset] = sample;
    }

    /// Replicates a single-channel raster into all three RGB channels.
    ///
    /// A raster that is already RGB is returned unchanged.
    pub fn expand_rgb(&self) -> Raster {
        if self.channels == 3 {
            return self.clone();
        }
        let mut out = Raster::rgb(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let sample = self.get(x, y, 0);
                for c in 0..3 {
                    out.set(x, y, c, sample);
                }
            }
        }
        out
    }
}
