#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod allocate;
pub mod color_565;
pub mod color_8888;
pub mod decoded_4x4_block;
pub mod dxgi_format;
pub mod format_class;
pub mod image;
pub mod metadata;

pub use dxgi_format::DxgiFormat;
pub use format_class::FormatClass;
pub use image::{ScratchImage, Surface};
pub use metadata::{AlphaMode, TexDimension, TexMetadata};

#[cfg(test)]
pub(crate) mod test_prelude;
