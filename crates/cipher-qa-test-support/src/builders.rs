//! Synthetic pixel buffer builders for testing.

use cipher_qa_core::domain::{ImageInfo, PixelBuffer, Rgba};
use image::RgbaImage;

/// Builder for creating synthetic plaintext and cipher buffers.
///
/// Provides convenience methods for buffers with known metric values
/// (constant, structured, noise-like, inverted).
pub struct SyntheticBufferBuilder;

impl SyntheticBufferBuilder {
    // === Plaintext-like buffers ===

    /// Creates a uniform gray buffer (entropy 0, undefined correlation).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |_, _| gray(value))
    }

    /// Creates a uniform RGB buffer.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |_, _| [r, g, b, u8::MAX])
    }

    /// Creates a smooth horizontal gradient (strong horizontal correlation).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, _| {
            gray(((u32::from(u8::MAX) * x) / width.max(1)) as u8)
        })
    }

    /// Creates a checkerboard of black and white cells.
    ///
    /// With a cell size of 1, horizontal and vertical correlation is exactly -1.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32, cell_size: u32) -> PixelBuffer {
        let cell = cell_size.max(1);
        PixelBuffer::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                gray(u8::MAX)
            } else {
                gray(0)
            }
        })
    }

    /// Creates a 16x16 buffer holding every intensity exactly once
    /// (entropy 8, uniformity 1).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn one_per_bucket() -> PixelBuffer {
        PixelBuffer::from_fn(16, 16, |x, y| gray((y * 16 + x) as u8))
    }

    /// Creates a tiny 2x2 gray buffer.
    #[must_use]
    pub fn tiny(values: [[u8; 2]; 2]) -> PixelBuffer {
        PixelBuffer::from_fn(2, 2, |x, y| gray(values[y as usize][x as usize]))
    }

    // === Cipher-like buffers ===

    /// Creates deterministic gray noise; every channel carries the same value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn gray_noise(width: u32, height: u32, seed: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            gray(mix(seed ^ mix(y.wrapping_mul(width).wrapping_add(x))) as u8)
        })
    }

    /// Creates deterministic RGB noise with independent channels.
    #[must_use]
    pub fn rgb_noise(width: u32, height: u32, seed: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            let [r, g, b, _] = mix(seed ^ mix(y.wrapping_mul(width).wrapping_add(x))).to_le_bytes();
            [r, g, b, u8::MAX]
        })
    }

    /// Inverts every color channel of `buffer`, keeping alpha.
    #[must_use]
    pub fn inverse(buffer: &PixelBuffer) -> PixelBuffer {
        PixelBuffer::from_fn(buffer.width(), buffer.height(), |x, y| {
            let [r, g, b, a] = buffer.get(x, y).unwrap_or_default();
            [u8::MAX - r, u8::MAX - g, u8::MAX - b, a]
        })
    }

    // === Conversions ===

    /// Wraps a buffer in an [`ImageInfo`] with a synthetic path.
    #[must_use]
    pub fn info(name: &str, buffer: PixelBuffer) -> ImageInfo {
        ImageInfo::new(format!("synthetic://{name}"), buffer)
    }

    /// Converts a buffer to an `image` crate image, for saving to disk.
    #[must_use]
    pub fn to_image(buffer: &PixelBuffer) -> RgbaImage {
        RgbaImage::from_fn(buffer.width(), buffer.height(), |x, y| {
            image::Rgba(buffer.get(x, y).unwrap_or_default())
        })
    }
}

const fn gray(value: u8) -> Rgba {
    [value, value, value, u8::MAX]
}

/// 32-bit avalanche finalizer used as a stateless noise source.
const fn mix(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^ (h >> 16)
}
