//! Encoding of a surface with a [`Codec`].

use crate::bridge::to_dynamic_image;
use crate::codec::Codec;
use crate::error::EncodeError;
use dds_convert_common::Surface;
use image::{DynamicImage, ImageFormat};
use log::debug;
use std::io::Cursor;

/// Largest width or height an icon can have.
pub const MAX_ICO_DIMENSION: usize = 256;

/// Narrows an image to the layouts the codec can store.
fn adapt_for_codec(image: DynamicImage, codec: Codec) -> DynamicImage {
    let color = image.color();
    let is_luma = !color.has_color();
    let has_alpha = color.has_alpha();
    let is_8_bit = color.bytes_per_pixel() / color.channel_count() == 1;

    match codec {
        Codec::Png | Codec::Tiff => match (is_8_bit, is_luma, has_alpha) {
            (true, _, _) => image,
            (false, true, _) => DynamicImage::ImageLuma16(image.to_luma16()),
            (false, false, true) => DynamicImage::ImageRgba16(image.to_rgba16()),
            (false, false, false) => DynamicImage::ImageRgb16(image.to_rgb16()),
        },
        Codec::Jpeg if is_luma => DynamicImage::ImageLuma8(image.to_luma8()),
        Codec::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        Codec::Bmp if is_luma => DynamicImage::ImageLuma8(image.to_luma8()),
        Codec::Bmp if has_alpha => DynamicImage::ImageRgba8(image.to_rgba8()),
        Codec::Bmp => DynamicImage::ImageRgb8(image.to_rgb8()),
        Codec::Gif | Codec::Ico | Codec::Wmp | Codec::Heif => {
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
    }
}

const fn image_format(codec: Codec) -> Option<ImageFormat> {
    Some(match codec {
        Codec::Bmp => ImageFormat::Bmp,
        Codec::Jpeg => ImageFormat::Jpeg,
        Codec::Png => ImageFormat::Png,
        Codec::Tiff => ImageFormat::Tiff,
        Codec::Gif => ImageFormat::Gif,
        Codec::Ico => ImageFormat::Ico,
        Codec::Wmp | Codec::Heif => return None,
    })
}

/// Encodes a surface into an in-memory image file.
///
/// # Parameters
///
/// - `surface`: The surface to encode. Its format must be accepted by
///   [`is_encodable`](crate::bridge::is_encodable).
/// - `codec`: The container to write.
///
/// # Returns
///
/// The bytes of the encoded file.
///
/// # Errors
///
/// - [`EncodeError::UnsupportedCodec`] for codecs without an encoder (WMP, HEIF).
/// - [`EncodeError::UnsupportedFormat`] if the surface format cannot be encoded.
/// - [`EncodeError::InvalidDimensions`] for icons larger than [`MAX_ICO_DIMENSION`].
/// - [`EncodeError::Image`] if the codec fails.
pub fn encode(surface: &Surface, codec: Codec) -> Result<Vec<u8>, EncodeError> {
    let format = image_format(codec).ok_or(EncodeError::UnsupportedCodec(codec))?;
    if codec == Codec::Ico && (surface.width > MAX_ICO_DIMENSION || surface.height > MAX_ICO_DIMENSION)
    {
        return Err(EncodeError::InvalidDimensions {
            codec,
            width: surface.width,
            height: surface.height,
        });
    }

    let image = adapt_for_codec(to_dynamic_image(surface)?, codec);
    debug!(
        "Encoding {}x{} {} as {codec} ({:?})",
        surface.width,
        surface.height,
        surface.format,
        image.color()
    );

    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(Codec::Png, &[0x89, b'P', b'N', b'G'])]
    #[case(Codec::Bmp, b"BM")]
    #[case(Codec::Jpeg, &[0xFF, 0xD8])]
    #[case(Codec::Tiff, b"II*")]
    #[case(Codec::Gif, b"GIF8")]
    #[case(Codec::Ico, &[0, 0, 1, 0])]
    fn writes_container_signature(#[case] codec: Codec, #[case] signature: &[u8]) {
        let surface = rgba_gradient(DxgiFormat::R8G8B8A8Unorm, 8, 8);
        let encoded = encode(&surface, codec).unwrap();
        assert!(encoded.starts_with(signature), "{codec}: {:?}", &encoded[..8]);
    }

    #[rstest]
    #[case(DxgiFormat::R8G8B8A8UnormSrgb)]
    #[case(DxgiFormat::B8G8R8X8Unorm)]
    #[case(DxgiFormat::R16G16B16A16Unorm)]
    #[case(DxgiFormat::R16G16B16A16Float)]
    #[case(DxgiFormat::R32G32B32A32Float)]
    #[case(DxgiFormat::R32G32B32Float)]
    #[case(DxgiFormat::R10G10B10A2Unorm)]
    #[case(DxgiFormat::B5G6R5Unorm)]
    #[case(DxgiFormat::R32Float)]
    #[case(DxgiFormat::R16Unorm)]
    #[case(DxgiFormat::R8Unorm)]
    #[case(DxgiFormat::A8Unorm)]
    #[case(DxgiFormat::R1Unorm)]
    fn png_encodes_every_bridged_format(#[case] format: DxgiFormat) {
        let surface = rgba_gradient(format, 4, 4);
        let encoded = encode(&surface, Codec::Png).unwrap();

        let decoded = image::load_from_memory(&encoded).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn png_keeps_8_bit_pixels() {
        let surface = surface_with(DxgiFormat::R8G8B8A8Unorm, 1, 1, &[1, 2, 3, 4]);
        let encoded = encode(&surface, Codec::Png).unwrap();
        let decoded = image::load_from_memory(&encoded).unwrap();
        assert_eq!(decoded.to_rgba8().into_raw(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn jpeg_drops_alpha() {
        let surface = rgba_gradient(DxgiFormat::R8G8B8A8Unorm, 8, 8);
        let encoded = encode(&surface, Codec::Jpeg).unwrap();
        let decoded = image::load_from_memory(&encoded).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[rstest]
    #[case(Codec::Wmp)]
    #[case(Codec::Heif)]
    fn rejects_unsupported_codecs(#[case] codec: Codec) {
        let surface = rgba_gradient(DxgiFormat::R8G8B8A8Unorm, 4, 4);
        assert!(matches!(
            encode(&surface, codec),
            Err(EncodeError::UnsupportedCodec(c)) if c == codec
        ));
    }

    #[test]
    fn rejects_oversized_icons() {
        let surface = rgba_gradient(DxgiFormat::R8G8B8A8Unorm, 257, 1);
        assert!(matches!(
            encode(&surface, Codec::Ico),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_unencodable_formats() {
        let surface = rgba_gradient(DxgiFormat::R8G8Unorm, 4, 4);
        assert!(matches!(
            encode(&surface, Codec::Png),
            Err(EncodeError::UnsupportedFormat(DxgiFormat::R8G8Unorm))
        ));
    }
}
