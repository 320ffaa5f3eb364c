//! Common test imports and utilities for pipeline tests
#![allow(unused_imports)]

pub use crate::properties::ImageProperties;
pub use dds_convert_codecs::{Codec, EncodeError};
pub use dds_convert_common::{AlphaMode, DxgiFormat, ScratchImage, TexDimension, TexMetadata};
pub use dds_convert_dds::DdsError;
pub use dds_convert_transform::TransformError;
pub use rstest::rstest;

use dds_convert_dds::save_to_dds_memory;

/// A BC1 block of solid red.
pub const BC1_RED_BLOCK: [u8; 8] = [0x00, 0xF8, 0x00, 0x00, 0, 0, 0, 0];

/// The pixel [`BC1_RED_BLOCK`] decodes to.
pub const BC1_RED: [u8; 4] = [255, 0, 0, 255];

/// Writes every surface of `metadata`, filling each with `fill`.
pub fn dds_with(metadata: TexMetadata, fill: impl Fn(usize) -> u8) -> Vec<u8> {
    let mut image = ScratchImage::initialize(metadata).unwrap();
    for surface in image.surfaces_mut() {
        for (index, byte) in surface.pixels.iter_mut().enumerate() {
            *byte = fill(index);
        }
    }
    save_to_dds_memory(&image).unwrap()
}

/// Creates a DDS file with a single surface holding `bytes`.
pub fn dds_from_bytes(format: DxgiFormat, width: usize, height: usize, bytes: &[u8]) -> Vec<u8> {
    let mut image = ScratchImage::initialize_2d(width, height, format).unwrap();
    let surface = &mut image.surfaces_mut()[0];
    assert_eq!(surface.pixels.len(), bytes.len());
    surface.pixels.copy_from_slice(bytes);
    save_to_dds_memory(&image).unwrap()
}

/// Creates a solid red BC1 texture with `mip_levels` levels.
pub fn bc1_dds_with_mips(width: usize, height: usize, mip_levels: usize) -> Vec<u8> {
    let metadata = TexMetadata {
        mip_levels,
        ..TexMetadata::new_2d(width, height, DxgiFormat::Bc1Unorm)
    };
    dds_with(metadata, |index| BC1_RED_BLOCK[index % BC1_RED_BLOCK.len()])
}

/// Creates a solid red BC1 texture.
pub fn bc1_dds(width: usize, height: usize) -> Vec<u8> {
    bc1_dds_with_mips(width, height, 1)
}

/// Creates a BC5 texture with both channels at their first endpoint.
pub fn bc5_dds(width: usize, height: usize) -> Vec<u8> {
    dds_with(TexMetadata::new_2d(width, height, DxgiFormat::Bc5Unorm), |index| {
        if index % 8 == 0 { 200 } else { 0 }
    })
}

/// Creates a BC4 texture of signed data.
pub fn bc4_snorm_dds(width: usize, height: usize) -> Vec<u8> {
    dds_with(TexMetadata::new_2d(width, height, DxgiFormat::Bc4Snorm), |index| {
        if index % 8 == 0 { 0x40 } else { 0 }
    })
}

/// Creates an `R8G8B8A8_UNORM` texture with a gradient in every channel.
pub fn rgba_dds(width: usize, height: usize) -> Vec<u8> {
    dds_with(TexMetadata::new_2d(width, height, DxgiFormat::R8G8B8A8Unorm), |index| {
        (index * 13 % 256) as u8
    })
}
