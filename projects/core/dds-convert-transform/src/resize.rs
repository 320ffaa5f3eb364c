//! Resizing of the top mip level.

use crate::error::{TransformError, TransformResult};
use crate::scanline::{
    can_load, can_store, color, load_scanline, store_scanline, Vector,
};
use dds_convert_common::{DxgiFormat, ScratchImage, Surface, TexDimension};
use image::{imageops, imageops::FilterType, ImageBuffer, Rgba};
use log::debug;

/// Largest width or height a resized image may have.
pub const MAX_DIMENSION: usize = 16384;

type FloatImage = ImageBuffer<Rgba<f32>, Vec<f32>>;

/// Resizes the first mip level of every array item (or every volume slice) with a triangle
/// filter.
///
/// The result has a single mip level; the depth of volume textures is kept. sRGB images are
/// filtered in linear space. The format is kept unless it cannot be written back, see
/// [`resized_format`].
///
/// # Errors
///
/// - [`TransformError::InvalidDimensions`] if either dimension is zero or above [`MAX_DIMENSION`].
/// - [`TransformError::UnsupportedFormat`] if the format cannot be read per scanline.
/// - [`TransformError::TruncatedSurface`] if a surface has fewer rows than its height.
/// - [`TransformError::Allocate`] if the output could not be allocated.
pub fn resize(image: &ScratchImage, width: usize, height: usize) -> TransformResult<ScratchImage> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(TransformError::InvalidDimensions { width, height });
    }

    let source = *image.metadata();
    if !can_load(source.format) {
        return Err(TransformError::UnsupportedFormat {
            operation: "Resize",
            format: source.format,
        });
    }

    let mut metadata = source;
    metadata.format = resized_format(source.format);
    metadata.width = width;
    metadata.height = height;
    metadata.mip_levels = 1;
    let mut output = ScratchImage::initialize(metadata)?;
    debug!(
        "Resizing {}x{} {} into {width}x{height} {}",
        source.width, source.height, source.format, metadata.format
    );

    let (items, slices) = match source.dimension {
        TexDimension::Texture3D => (1, source.depth),
        TexDimension::Texture1D | TexDimension::Texture2D => (source.array_size, 1),
    };

    for item in 0..items {
        for slice in 0..slices {
            let (Some(src_index), Some(dst_index)) = (
                source.surface_index(0, item, slice),
                metadata.surface_index(0, item, slice),
            ) else {
                continue;
            };

            let resized = {
                let src = &image.surfaces()[src_index];
                let buffer = read_surface(src, src_index)?;
                imageops::resize(&buffer, width as u32, height as u32, FilterType::Triangle)
            };

            write_surface(&resized, &mut output.surfaces_mut()[dst_index], dst_index)?;
        }
    }

    Ok(output)
}

/// Format of the resized image.
///
/// Packed video formats can be read but not written per scanline; they are resized into
/// `R32G32B32A32_FLOAT` RGB instead.
pub fn resized_format(format: DxgiFormat) -> DxgiFormat {
    if can_store(format) {
        format
    } else {
        DxgiFormat::R32G32B32A32Float
    }
}

/// Loads a surface into a floating point buffer, in linear space.
fn read_surface(surface: &Surface, index: usize) -> TransformResult<FloatImage> {
    let mut data = Vec::new();
    data.try_reserve_exact(surface.width * surface.height * 4)
        .map_err(dds_convert_common::allocate::AllocateError::from)?;

    let mut row: Vec<Vector> = vec![[0.0; 4]; surface.width];
    for y in 0..surface.height {
        let bytes = surface.row(y).ok_or(TransformError::TruncatedSurface { index })?;
        load_scanline(bytes, surface.format, &mut row);
        if surface.format.is_srgb() {
            color::map_rgb(&mut row, color::srgb_to_linear);
        }
        data.extend(row.iter().flatten());
    }

    FloatImage::from_raw(surface.width as u32, surface.height as u32, data)
        .ok_or(TransformError::TruncatedSurface { index })
}

/// Stores a floating point buffer into a surface of the same size.
fn write_surface(buffer: &FloatImage, surface: &mut Surface, index: usize) -> TransformResult<()> {
    let format: DxgiFormat = surface.format;
    let mut row: Vec<Vector> = vec![[0.0; 4]; surface.width];

    for (y, pixels) in buffer.as_raw().chunks_exact(surface.width * 4).enumerate() {
        for (dst, src) in row.iter_mut().zip(pixels.chunks_exact(4)) {
            *dst = [src[0], src[1], src[2], src[3]];
        }
        if format.is_srgb() {
            color::map_rgb(&mut row, color::linear_to_srgb);
        }

        let bytes = surface
            .row_mut(y)
            .ok_or(TransformError::TruncatedSurface { index })?;
        store_scanline(bytes, format, &row);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn upscaling_solid_color_stays_solid() {
        let image = image_from_pixels(
            DxgiFormat::R8G8B8A8Unorm,
            2,
            2,
            &[[1.0, 0.0, 0.0, 1.0]; 4],
        );
        let output = resize(&image, 8, 4).unwrap();

        assert_eq!(output.metadata().width, 8);
        assert_eq!(output.metadata().height, 4);
        for pixel in pixels_of(&output, 0) {
            assert_eq!(pixel, [1.0, 0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn downscaling_averages_pixels() {
        let image = image_from_pixels(
            DxgiFormat::R32G32B32A32Float,
            2,
            1,
            &[[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]],
        );
        let output = resize(&image, 1, 1).unwrap();
        assert_pixel_near(pixels_of(&output, 0)[0], [0.5, 0.5, 0.5, 1.0], 1e-5);
    }

    #[test]
    fn drops_mip_chain_and_keeps_items() {
        let mut metadata = TexMetadata::new_2d(4, 4, DxgiFormat::R8G8B8A8Unorm);
        metadata.mip_levels = 3;
        metadata.array_size = 2;
        let image = ScratchImage::initialize(metadata).unwrap();

        let output = resize(&image, 2, 2).unwrap();
        assert_eq!(output.metadata().mip_levels, 1);
        assert_eq!(output.surfaces().len(), 2);
    }

    #[rstest]
    #[case(0, 4)]
    #[case(4, 0)]
    #[case(MAX_DIMENSION + 1, 4)]
    fn rejects_invalid_dimensions(#[case] width: usize, #[case] height: usize) {
        let image = ScratchImage::initialize_2d(4, 4, DxgiFormat::R8G8B8A8Unorm).unwrap();
        assert!(matches!(
            resize(&image, width, height),
            Err(TransformError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn packed_video_is_resized_into_float_rgb() {
        // Two white pixels sharing one chroma pair.
        let mut image = ScratchImage::initialize_2d(2, 1, DxgiFormat::Yuy2).unwrap();
        image.surfaces_mut()[0].pixels.copy_from_slice(&[235, 128, 235, 128]);

        let output = resize(&image, 4, 2).unwrap();
        assert_eq!(output.metadata().format, DxgiFormat::R32G32B32A32Float);
        assert_eq!((output.metadata().width, output.metadata().height), (4, 2));
        for pixel in pixels_of(&output, 0) {
            assert_pixel_near(pixel, [1.0, 1.0, 1.0, 1.0], 1e-3);
        }
    }

    #[rstest]
    #[case(DxgiFormat::R8G8B8A8UnormSrgb, DxgiFormat::R8G8B8A8UnormSrgb)]
    #[case(DxgiFormat::B5G6R5Unorm, DxgiFormat::B5G6R5Unorm)]
    #[case(DxgiFormat::Yuy2, DxgiFormat::R32G32B32A32Float)]
    #[case(DxgiFormat::Y216, DxgiFormat::R32G32B32A32Float)]
    #[case(DxgiFormat::Ayuv, DxgiFormat::R32G32B32A32Float)]
    fn keeps_format_when_it_can_be_written(
        #[case] format: DxgiFormat,
        #[case] expected: DxgiFormat,
    ) {
        assert_eq!(resized_format(format), expected);
    }

    #[rstest]
    #[case(DxgiFormat::Bc1Unorm)]
    #[case(DxgiFormat::Nv12)]
    fn rejects_formats_without_scanline_access(#[case] format: DxgiFormat) {
        let image = ScratchImage::initialize_2d(4, 4, format).unwrap();
        assert!(matches!(
            resize(&image, 2, 2),
            Err(TransformError::UnsupportedFormat { .. })
        ));
    }
}
