//! Hand off of surfaces to the `image` crate.
//!
//! Only formats with a direct counterpart among the codec pixel layouts are accepted:
//!
//! | Formats | Layout |
//! | ------- | ------ |
//! | `R8G8B8A8_UNORM[_SRGB]`, `B8G8R8A8_UNORM[_SRGB]`, `B5G5R5A1_UNORM`, `A8_UNORM` | RGBA 8-bit |
//! | `B8G8R8X8_UNORM[_SRGB]`, `B5G6R5_UNORM` | RGB 8-bit |
//! | `R16G16B16A16_UNORM`, `R10G10B10A2_UNORM`, `R10G10B10_XR_BIAS_A2_UNORM` | RGBA 16-bit |
//! | `R16G16B16A16_FLOAT`, `R32G32B32A32_FLOAT` | RGBA float |
//! | `R32G32B32_FLOAT` | RGB float |
//! | `R32_FLOAT`, `R16_FLOAT`, `R16_UNORM` | Luma 16-bit |
//! | `R8_UNORM`, `R1_UNORM` | Luma 8-bit |
//!
//! sRGB data is passed through unchanged.

use crate::error::EncodeError;
use dds_convert_common::{allocate::AllocateError, DxgiFormat, Surface};
use dds_convert_transform::scanline::{color::to_unorm, load_scanline, Vector};
use image::{DynamicImage, ImageBuffer};

/// Pixel layout a surface is handed to the codecs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeLayout {
    Luma8,
    Luma16,
    Rgb8,
    Rgba8,
    Rgba16,
    Rgb32F,
    Rgba32F,
}

impl BridgeLayout {
    /// Number of channels stored per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Luma8 | Self::Luma16 => 1,
            Self::Rgb8 | Self::Rgb32F => 3,
            Self::Rgba8 | Self::Rgba16 | Self::Rgba32F => 4,
        }
    }
}

/// Returns the layout a format is encoded from.
///
/// # Returns
///
/// `None` if the format cannot be encoded and must be converted first.
pub const fn bridge_layout(format: DxgiFormat) -> Option<BridgeLayout> {
    use DxgiFormat as F;

    Some(match format {
        F::R8G8B8A8Unorm
        | F::R8G8B8A8UnormSrgb
        | F::B8G8R8A8Unorm
        | F::B8G8R8A8UnormSrgb
        | F::B5G5R5A1Unorm
        | F::A8Unorm => BridgeLayout::Rgba8,
        F::B8G8R8X8Unorm | F::B8G8R8X8UnormSrgb | F::B5G6R5Unorm => BridgeLayout::Rgb8,
        F::R16G16B16A16Unorm | F::R10G10B10A2Unorm | F::R10G10B10XrBiasA2Unorm => {
            BridgeLayout::Rgba16
        }
        F::R16G16B16A16Float | F::R32G32B32A32Float => BridgeLayout::Rgba32F,
        F::R32G32B32Float => BridgeLayout::Rgb32F,
        F::R32Float | F::R16Float | F::R16Unorm => BridgeLayout::Luma16,
        F::R8Unorm | F::R1Unorm => BridgeLayout::Luma8,
        _ => return None,
    })
}

/// Whether a surface in this format can be handed to a codec.
pub const fn is_encodable(format: DxgiFormat) -> bool {
    bridge_layout(format).is_some()
}

/// Loads every row of the surface and quantizes the first `channels` channels of each pixel.
fn collect<T>(
    surface: &Surface,
    channels: usize,
    quantize: impl Fn(f32) -> T,
) -> Result<Vec<T>, EncodeError> {
    let mut data = Vec::new();
    data.try_reserve_exact(surface.width * surface.height * channels)
        .map_err(AllocateError::from)?;

    let mut row: Vec<Vector> = vec![[0.0; 4]; surface.width];
    for y in 0..surface.height {
        let bytes = surface.row(y).ok_or(EncodeError::TruncatedSurface)?;
        if !load_scanline(bytes, surface.format, &mut row) {
            return Err(EncodeError::UnsupportedFormat(surface.format));
        }
        for pixel in &row {
            for &component in &pixel[..channels] {
                data.push(quantize(component));
            }
        }
    }

    Ok(data)
}

/// Copies a surface into a [`DynamicImage`] with the layout of [`bridge_layout`].
///
/// # Errors
///
/// - [`EncodeError::UnsupportedFormat`] if the format has no bridge layout.
/// - [`EncodeError::TruncatedSurface`] if the surface has fewer rows than its height.
/// - [`EncodeError::Allocate`] if the pixel buffer could not be allocated.
pub fn to_dynamic_image(surface: &Surface) -> Result<DynamicImage, EncodeError> {
    let layout =
        bridge_layout(surface.format).ok_or(EncodeError::UnsupportedFormat(surface.format))?;
    let (width, height) = (surface.width as u32, surface.height as u32);
    let channels = layout.channels();

    let to_u8 = |c: f32| to_unorm(c, 0xFF) as u8;
    let to_u16 = |c: f32| to_unorm(c, 0xFFFF) as u16;
    let to_f32 = |c: f32| c;

    let image = match layout {
        BridgeLayout::Luma8 => ImageBuffer::from_raw(width, height, collect(surface, channels, to_u8)?)
            .map(DynamicImage::ImageLuma8),
        BridgeLayout::Luma16 => {
            ImageBuffer::from_raw(width, height, collect(surface, channels, to_u16)?)
                .map(DynamicImage::ImageLuma16)
        }
        BridgeLayout::Rgb8 => ImageBuffer::from_raw(width, height, collect(surface, channels, to_u8)?)
            .map(DynamicImage::ImageRgb8),
        BridgeLayout::Rgba8 => {
            ImageBuffer::from_raw(width, height, collect(surface, channels, to_u8)?)
                .map(DynamicImage::ImageRgba8)
        }
        BridgeLayout::Rgba16 => {
            ImageBuffer::from_raw(width, height, collect(surface, channels, to_u16)?)
                .map(DynamicImage::ImageRgba16)
        }
        BridgeLayout::Rgb32F => {
            ImageBuffer::from_raw(width, height, collect(surface, channels, to_f32)?)
                .map(DynamicImage::ImageRgb32F)
        }
        BridgeLayout::Rgba32F => {
            ImageBuffer::from_raw(width, height, collect(surface, channels, to_f32)?)
                .map(DynamicImage::ImageRgba32F)
        }
    };

    image.ok_or(EncodeError::TruncatedSurface)
}
