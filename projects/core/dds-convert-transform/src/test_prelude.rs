//! Common test imports and utilities for transform tests
#![allow(unused_imports)]

pub use crate::scanline::{load_scanline, store_scanline, Vector};
pub use dds_convert_common::{AlphaMode, DxgiFormat, ScratchImage, TexMetadata};
pub use rstest::rstest;

/// Creates a single surface image of the given format filled row by row with `pixels`.
///
/// `pixels` must hold `width * height` entries.
pub fn image_from_pixels(
    format: DxgiFormat,
    width: usize,
    height: usize,
    pixels: &[Vector],
) -> ScratchImage {
    assert_eq!(pixels.len(), width * height);
    let mut image = ScratchImage::initialize_2d(width, height, format).unwrap();
    let surface = &mut image.surfaces_mut()[0];
    for (y, row) in pixels.chunks_exact(width).enumerate() {
        assert!(store_scanline(surface.row_mut(y).unwrap(), format, row));
    }
    image
}

/// Loads every pixel of surface `index` of an image.
pub fn pixels_of(image: &ScratchImage, index: usize) -> Vec<Vector> {
    let surface = &image.surfaces()[index];
    let mut pixels = vec![[0.0; 4]; surface.width * surface.height];
    for (y, row) in pixels.chunks_exact_mut(surface.width).enumerate() {
        assert!(load_scanline(surface.row(y).unwrap(), surface.format, row));
    }
    pixels
}

/// Asserts that two pixels are equal within `tolerance` per channel.
pub fn assert_pixel_near(actual: Vector, expected: Vector, tolerance: f32) {
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() <= tolerance, "{actual:?} != {expected:?}");
    }
}
