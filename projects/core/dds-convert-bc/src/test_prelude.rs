//! Common test imports and utilities for BC decoder tests
#![allow(unused_imports)]

pub use dds_convert_common::{color_8888::Color8888, DxgiFormat, ScratchImage};
pub use rstest::rstest;

/// Creates a single surface block compressed image from raw block data.
pub fn compressed_image(format: DxgiFormat, width: usize, height: usize, blocks: &[u8]) -> ScratchImage {
    let mut image = ScratchImage::initialize_2d(width, height, format).unwrap();
    image.surfaces_mut()[0].pixels.copy_from_slice(blocks);
    image
}
