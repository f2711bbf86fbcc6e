//! Decoded RGBA pixel storage.

use super::MetricsError;

/// One RGBA sample.
pub type Rgba = [u8; 4];

/// Decoded image samples in row-major order.
///
/// The sample count always equals `width * height`; construction enforces it,
/// and there is no way to mutate a buffer afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<Rgba>,
}

impl PixelBuffer {
    /// Creates a buffer from row-major RGBA samples.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::SampleCountMismatch`] if `samples.len()` is not
    /// `width * height`.
    pub fn new(width: u32, height: u32, samples: Vec<Rgba>) -> Result<Self, MetricsError> {
        let expected = pixel_count(width, height);
        if samples.len() != expected {
            return Err(MetricsError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Creates a buffer from interleaved `r, g, b, a` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::SampleCountMismatch`] if the byte length is not
    /// `width * height * 4`.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, MetricsError> {
        let expected = pixel_count(width, height);
        if bytes.len() != expected * 4 {
            return Err(MetricsError::SampleCountMismatch {
                expected,
                actual: bytes.len() / 4,
            });
        }
        let samples = bytes
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Self::new(width, height, samples)
    }

    /// Creates a buffer by evaluating `f(x, y)` for every pixel.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut samples = Vec::with_capacity(pixel_count(width, height));
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples, row-major.
    #[must_use]
    pub fn samples(&self) -> &[Rgba] {
        &self.samples
    }

    /// Row `y` as a slice of `width` samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[must_use]
    pub fn row(&self, y: u32) -> &[Rgba] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.samples[start..start + w]
    }

    /// Sample at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> {
        // chunks_exact(0) panics; an empty-width buffer has no samples anyway
        self.samples.chunks_exact(self.width.max(1) as usize)
    }
}

impl From<&image::RgbaImage> for PixelBuffer {
    fn from(image: &image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            samples: image.pixels().map(|p| p.0).collect(),
        }
    }
}

impl From<&image::DynamicImage> for PixelBuffer {
    fn from(image: &image::DynamicImage) -> Self {
        Self::from(&image.to_rgba8())
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
