use super::{legacy_format::LegacyConversion, parse_dds};
use crate::error::{DdsError, DdsResult};
use dds_convert_common::image::compute_pitch;
use dds_convert_common::{DxgiFormat, ScratchImage};
use log::debug;

/// Loads every surface of an in-memory DDS file.
///
/// Legacy pixel formats without a direct DXGI equivalent (24-bit RGB, formats without alpha)
/// are expanded while copying, so the returned image always holds data in the format named by
/// its metadata. Data past the last surface is ignored.
///
/// # Errors
///
/// Any error from [`parse_dds`], plus [`DdsError::Truncated`] if the file holds less pixel
/// data than the header describes.
pub fn load_from_dds_memory(data: &[u8]) -> DdsResult<ScratchImage> {
    let info = parse_dds(data)?;
    let metadata = info.metadata;
    let pixels = &data[info.data_offset..];

    // Sized from the header alone; nothing is allocated until the file is known to hold it all.
    let mut required = 0usize;
    for (width, height) in metadata.surface_extents() {
        let (_, slice_pitch) = source_pitch(width, height, metadata.format, info.conversion)?;
        required = required
            .checked_add(slice_pitch)
            .ok_or(DdsError::InvalidHeader("image size overflows"))?;
    }

    if pixels.len() < required {
        return Err(DdsError::Truncated {
            expected: info.data_offset.saturating_add(required),
            actual: data.len(),
        });
    }

    let mut image = ScratchImage::initialize(metadata)?;
    let mut offset = 0;
    for surface in image.surfaces_mut() {
        let (row_pitch, slice_pitch) =
            source_pitch(surface.width, surface.height, surface.format, info.conversion)?;
        let src = &pixels[offset..offset + slice_pitch];
        offset += slice_pitch;

        if info.conversion == LegacyConversion::None {
            surface.pixels.copy_from_slice(src);
            continue;
        }

        let width = surface.width;
        for (y, src_row) in src.chunks_exact(row_pitch).enumerate() {
            if let Some(dst_row) = surface.row_mut(y) {
                info.conversion.convert_row(src_row, dst_row, width);
            }
        }
    }

    debug!(
        "Loaded DDS: {}x{}, {} mip(s), {} item(s), format {}",
        metadata.width, metadata.height, metadata.mip_levels, metadata.array_size, metadata.format
    );
    Ok(image)
}

/// Row and slice pitch of a surface as stored in the file.
fn source_pitch(
    width: usize,
    height: usize,
    format: DxgiFormat,
    conversion: LegacyConversion,
) -> DdsResult<(usize, usize)> {
    let pitch = match conversion.source_bits_per_pixel() {
        None => compute_pitch(format, width, height),
        Some(bits) => width
            .checked_mul(bits as usize)
            .map(|bits| bits.div_ceil(8))
            .and_then(|row| Some((row, row.checked_mul(height)?))),
    };
    pitch.ok_or(DdsError::InvalidHeader("image size overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn loads_single_bc1_surface() {
        let block = [0x00, 0xF8, 0x00, 0xF8, 1, 2, 3, 4];
        let data = create_legacy_dds(b"DXT1", 4, 4, 1, &block);

        let image = load_from_dds_memory(&data).unwrap();
        assert_eq!(image.metadata().format, DxgiFormat::Bc1Unorm);
        assert_eq!(image.surfaces().len(), 1);
        assert_eq!(image.surfaces()[0].pixels, block);
    }

    #[test]
    fn loads_mip_chain_in_order() {
        // 8x8 BC1: 4 blocks, then 1 block, then 1 block.
        let payload: Vec<u8> = (0..48).collect();
        let data = create_dx10_dds(DxgiFormat::Bc1Unorm, 8, 8, 3, &payload);

        let image = load_from_dds_memory(&data).unwrap();
        assert_eq!(image.surfaces().len(), 3);
        assert_eq!(image.surfaces()[0].pixels, payload[..32]);
        assert_eq!(image.surfaces()[1].pixels, payload[32..40]);
        assert_eq!(image.surfaces()[2].pixels, payload[40..48]);
    }

    #[test]
    fn ignores_trailing_data() {
        let data = create_legacy_dds(b"DXT1", 4, 4, 1, &[0; 64]);
        assert!(load_from_dds_memory(&data).is_ok());
    }

    #[test]
    fn expands_24_bit_rgb() {
        let data = create_uncompressed_legacy_dds(
            DDPF_RGB,
            24,
            [0xFF0000, 0xFF00, 0xFF, 0],
            2,
            1,
            &[10, 20, 30, 40, 50, 60],
        );

        let image = load_from_dds_memory(&data).unwrap();
        assert_eq!(image.metadata().format, DxgiFormat::R8G8B8A8Unorm);
        assert_eq!(image.surfaces()[0].pixels, [30, 20, 10, 255, 60, 50, 40, 255]);
    }

    #[test]
    fn fills_alpha_of_x8r8g8b8_with_opaque() {
        let data = create_uncompressed_legacy_dds(
            DDPF_RGB,
            32,
            [0xFF, 0xFF00, 0xFF0000, 0],
            1,
            1,
            &[1, 2, 3, 0],
        );

        let image = load_from_dds_memory(&data).unwrap();
        assert_eq!(image.surfaces()[0].pixels, [1, 2, 3, 255]);
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    fn rejects_truncated_pixel_data(#[case] payload_len: usize) {
        let data = create_legacy_dds(b"DXT1", 4, 4, 1, &vec![0; payload_len]);
        assert!(matches!(
            load_from_dds_memory(&data),
            Err(DdsError::Truncated { expected: 136, .. })
        ));
    }

    #[rstest]
    #[case(8192, 8192, 1)]
    #[case(16384, 16384, 2048)]
    fn rejects_truncated_huge_image_before_allocating(
        #[case] width: u32,
        #[case] height: u32,
        #[case] array_size: u32,
    ) {
        let mut data = create_dx10_dds(DxgiFormat::R32G32B32A32Float, width, height, 1, &[]);
        write_header_field(&mut data, DX10_ARRAY_SIZE_OFFSET, array_size);

        // Allocating this image would need up to 8 TiB; the size check must come first.
        let surface = width as usize * height as usize * 16;
        let expected = DDS_DX10_TOTAL_HEADER_SIZE + surface * array_size as usize;
        match load_from_dds_memory(&data) {
            Err(DdsError::Truncated { expected: e, actual }) => {
                assert_eq!(e, expected);
                assert_eq!(actual, DDS_DX10_TOTAL_HEADER_SIZE);
            }
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn propagates_header_errors() {
        assert!(matches!(
            load_from_dds_memory(b"not a dds file"),
            Err(DdsError::NotADds)
        ));
    }
}
