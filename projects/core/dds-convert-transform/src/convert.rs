//! Conversion between uncompressed formats.
//!
//! Every row is loaded into RGBA `f32` values, moved between the sRGB and linear colour spaces
//! if needed, and stored in the target format. When going from a colour format to a format with
//! only a red channel the luminance is kept; when going the other way red is copied into green
//! and blue.

use crate::error::{TransformError, TransformResult};
use crate::scanline::{
    can_load, can_store, color::luminance, convert_color_space, load_scanline, store_scanline,
    Vector,
};
use dds_convert_common::{DxgiFormat, ScratchImage};
use log::debug;

/// Whether the format only has a red (or depth) channel.
pub const fn is_red_only(format: DxgiFormat) -> bool {
    use DxgiFormat as F;

    matches!(
        format,
        F::R32Float
            | F::R32Uint
            | F::R32Sint
            | F::D32Float
            | F::R16Float
            | F::R16Unorm
            | F::R16Uint
            | F::R16Snorm
            | F::R16Sint
            | F::D16Unorm
            | F::R8Unorm
            | F::R8Uint
            | F::R8Snorm
            | F::R8Sint
            | F::R1Unorm
    )
}

/// Whether the format has red, green and blue channels.
pub const fn is_color(format: DxgiFormat) -> bool {
    use DxgiFormat as F;

    matches!(
        format,
        F::R32G32B32A32Float
            | F::R32G32B32A32Uint
            | F::R32G32B32A32Sint
            | F::R32G32B32Float
            | F::R32G32B32Uint
            | F::R32G32B32Sint
            | F::R16G16B16A16Float
            | F::R16G16B16A16Unorm
            | F::R16G16B16A16Uint
            | F::R16G16B16A16Snorm
            | F::R16G16B16A16Sint
            | F::R10G10B10A2Unorm
            | F::R10G10B10A2Uint
            | F::R10G10B10XrBiasA2Unorm
            | F::R11G11B10Float
            | F::R9G9B9E5SharedExp
            | F::R8G8B8A8Unorm
            | F::R8G8B8A8UnormSrgb
            | F::R8G8B8A8Uint
            | F::R8G8B8A8Snorm
            | F::R8G8B8A8Sint
            | F::B8G8R8A8Unorm
            | F::B8G8R8A8UnormSrgb
            | F::B8G8R8X8Unorm
            | F::B8G8R8X8UnormSrgb
            | F::B5G6R5Unorm
            | F::B5G5R5A1Unorm
            | F::B4G4R4A4Unorm
            | F::R8G8B8G8Unorm
            | F::G8R8G8B8Unorm
            | F::Ayuv
            | F::Y410
            | F::Y416
            | F::Yuy2
            | F::Y210
            | F::Y216
    )
}

/// Adjusts loaded pixels for the channel layout of the target format.
fn remap_channels(pixels: &mut [Vector], source: DxgiFormat, target: DxgiFormat) {
    if is_color(source) && is_red_only(target) {
        for pixel in pixels {
            pixel[0] = luminance(pixel);
        }
    } else if is_red_only(source) && is_color(target) {
        for pixel in pixels {
            pixel[1] = pixel[0];
            pixel[2] = pixel[0];
        }
    }
}

/// Converts every surface of an image to another uncompressed format.
///
/// # Parameters
///
/// - `image`: The image to convert. Must be in a format [`can_load`] accepts.
/// - `target`: The output format. Must be in a format [`can_store`] accepts.
///
/// # Errors
///
/// - [`TransformError::UnsupportedFormat`] if either format cannot be handled per scanline,
///   i.e. it is compressed, planar, typeless or palettized.
/// - [`TransformError::TruncatedSurface`] if a surface has fewer rows than its height.
/// - [`TransformError::Allocate`] if the output could not be allocated.
pub fn convert(image: &ScratchImage, target: DxgiFormat) -> TransformResult<ScratchImage> {
    let source = image.metadata().format;
    if !can_load(source) {
        return Err(TransformError::UnsupportedFormat {
            operation: "Convert",
            format: source,
        });
    }
    if !can_store(target) {
        return Err(TransformError::UnsupportedFormat {
            operation: "Convert",
            format: target,
        });
    }

    let mut metadata = *image.metadata();
    metadata.format = target;
    let mut output = ScratchImage::initialize(metadata)?;
    debug!("Converting {source} into {target}");

    let mut pixels: Vec<Vector> = Vec::new();
    for (index, (src, dst)) in image
        .surfaces()
        .iter()
        .zip(output.surfaces_mut())
        .enumerate()
    {
        pixels.clear();
        pixels.resize(src.width, [0.0; 4]);

        for y in 0..src.height {
            let row = src.row(y).ok_or(TransformError::TruncatedSurface { index })?;
            load_scanline(row, source, &mut pixels);
            convert_color_space(&mut pixels, source, target);
            remap_channels(&mut pixels, source, target);

            let out = dst.row_mut(y).ok_or(TransformError::TruncatedSurface { index })?;
            store_scanline(out, target, &pixels);
        }
    }

    Ok(output)
}
