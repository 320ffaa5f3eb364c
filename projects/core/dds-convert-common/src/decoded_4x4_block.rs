//! A decompressed 4x4 block of pixels.
//!
//! Pixels are stored in row-major order:
//!
//! ```text
//! [ 0] [ 1] [ 2] [ 3]
//! [ 4] [ 5] [ 6] [ 7]
//! [ 8] [ 9] [10] [11]
//! [12] [13] [14] [15]
//! ```

use crate::color_8888::Color8888;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded4x4Block {
    pub pixels: [Color8888; 16],
}

impl Decoded4x4Block {
    /// Creates a block where every pixel is `pixel`.
    pub const fn new(pixel: Color8888) -> Self {
        Self { pixels: [pixel; 16] }
    }

    /// Returns the pixel at (`x`, `y`).
    ///
    /// # Panics
    ///
    /// If `x` or `y` is 4 or greater.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color8888 {
        assert!(x < 4 && y < 4);
        self.pixels[y * 4 + x]
    }

    /// Sets the pixel at (`x`, `y`).
    ///
    /// # Panics
    ///
    /// If `x` or `y` is 4 or greater.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Color8888) {
        assert!(x < 4 && y < 4);
        self.pixels[y * 4 + x] = pixel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_pixel_are_row_major() {
        let mut block = Decoded4x4Block::new(Color8888::default());
        block.set_pixel(1, 2, Color8888::new(1, 2, 3, 4));

        assert_eq!(block.pixels[9], Color8888::new(1, 2, 3, 4));
        assert_eq!(block.pixel(1, 2), Color8888::new(1, 2, 3, 4));
        assert_eq!(block.pixel(2, 1), Color8888::default());
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_pixel_panics() {
        Decoded4x4Block::new(Color8888::default()).pixel(4, 0);
    }
}
