//! Common test imports and utilities for codec tests
#![allow(unused_imports)]

pub use crate::codec::Codec;
pub use dds_convert_common::{DxgiFormat, Surface};
pub use rstest::rstest;

/// Creates a surface holding exactly the given bytes.
pub fn surface_with(format: DxgiFormat, width: usize, height: usize, pixels: &[u8]) -> Surface {
    let mut surface = Surface::new(width, height, format).unwrap();
    assert_eq!(surface.pixels.len(), pixels.len());
    surface.pixels.copy_from_slice(pixels);
    surface
}

/// Creates a surface filled with a repeating byte pattern.
pub fn rgba_gradient(format: DxgiFormat, width: usize, height: usize) -> Surface {
    let mut surface = Surface::new(width, height, format).unwrap();
    for (index, byte) in surface.pixels.iter_mut().enumerate() {
        *byte = (index * 7 % 256) as u8;
    }
    surface
}
