use super::{
    constants::*,
    legacy_format::{LegacyConversion, LegacyPixelFormat},
    likely_dds,
};
use crate::error::{DdsError, DdsResult};
use dds_convert_common::{AlphaMode, DxgiFormat, TexDimension, TexMetadata};
use endian_writer::{EndianReader, LittleEndianReader};

/// The information of the DDS file supplied to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsInfo {
    /// Layout of the texture, with the format already mapped to DXGI.
    pub metadata: TexMetadata,
    /// Offset of the first byte of pixel data.
    pub data_offset: usize,
    /// Conversion to apply to legacy pixel data while loading.
    pub conversion: LegacyConversion,
}

/// Parses and validates the headers of a DDS file.
///
/// Both the legacy header and the `DX10` extended header are supported. Legacy pixel formats
/// are mapped to their DXGI equivalent; see [`LegacyPixelFormat::to_dxgi`].
///
/// # Errors
///
/// - [`DdsError::NotADds`] if the magic is missing or the data is shorter than a header.
/// - [`DdsError::InvalidHeader`] if a header field is out of range.
/// - [`DdsError::UnsupportedFormat`] / [`DdsError::UnsupportedLegacyFormat`] if the pixel
///   format is not known.
/// - [`DdsError::Truncated`] if the `DX10` header is cut short.
pub fn parse_dds(data: &[u8]) -> DdsResult<DdsInfo> {
    if !likely_dds(data) {
        return Err(DdsError::NotADds);
    }

    // SAFETY: likely_dds checked data.len() >= DDS_HEADER_SIZE (128), every legacy field is within it.
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };

    if unsafe { reader.read_u32_at(DDS_SIZE_OFFSET as isize) } != DDS_HEADER_STRUCT_SIZE {
        return Err(DdsError::InvalidHeader("header size is not 124"));
    }
    if unsafe { reader.read_u32_at(DDS_PIXELFORMAT_OFFSET as isize) } != DDS_PIXELFORMAT_STRUCT_SIZE {
        return Err(DdsError::InvalidHeader("pixel format size is not 32"));
    }

    let flags = unsafe { reader.read_u32_at(DDS_FLAGS_OFFSET as isize) };
    let height = unsafe { reader.read_u32_at(DDS_HEIGHT_OFFSET as isize) };
    let width = unsafe { reader.read_u32_at(DDS_WIDTH_OFFSET as isize) };
    let depth = unsafe { reader.read_u32_at(DDS_DEPTH_OFFSET as isize) };
    let mip_count = unsafe { reader.read_u32_at(DDS_MIPMAP_COUNT_OFFSET as isize) }.max(1);
    let caps2 = unsafe { reader.read_u32_at(DDS_CAPS2_OFFSET as isize) };
    let pixel_format = LegacyPixelFormat {
        flags: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_FLAGS_OFFSET as isize) },
        fourcc: unsafe { reader.read_u32_at(FOURCC_OFFSET as isize) },
        rgb_bit_count: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_RGBBITCOUNT_OFFSET as isize) },
        r_mask: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_RBITMASK_OFFSET as isize) },
        g_mask: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_GBITMASK_OFFSET as isize) },
        b_mask: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_BBITMASK_OFFSET as isize) },
        a_mask: unsafe { reader.read_u32_at(DDS_PIXELFORMAT_ABITMASK_OFFSET as isize) },
    };

    if width == 0 || height == 0 {
        return Err(DdsError::InvalidHeader("width or height is zero"));
    }

    let mut metadata = TexMetadata::new_2d(width as usize, height as usize, DxgiFormat::Unknown);
    metadata.mip_levels = mip_count as usize;

    let is_dx10 = pixel_format.flags & DDPF_FOURCC != 0 && pixel_format.fourcc == FOURCC_DX10;
    let (data_offset, conversion) = if is_dx10 {
        if data.len() < DDS_HEADER_SIZE + DX10_HEADER_SIZE {
            return Err(DdsError::Truncated {
                expected: DDS_HEADER_SIZE + DX10_HEADER_SIZE,
                actual: data.len(),
            });
        }

        // SAFETY: We checked data.len() >= DDS_HEADER_SIZE + DX10_HEADER_SIZE (148).
        let raw_format = unsafe { reader.read_u32_at(DX10_FORMAT_OFFSET as isize) };
        let dimension = unsafe { reader.read_u32_at(DX10_RESOURCE_DIMENSION_OFFSET as isize) };
        let misc_flag = unsafe { reader.read_u32_at(DX10_MISC_FLAG_OFFSET as isize) };
        let array_size = unsafe { reader.read_u32_at(DX10_ARRAY_SIZE_OFFSET as isize) };
        let misc_flags2 = unsafe { reader.read_u32_at(DX10_MISC_FLAGS2_OFFSET as isize) };

        metadata.format = match DxgiFormat::from_raw(raw_format) {
            Some(DxgiFormat::Unknown) | None => {
                return Err(DdsError::UnsupportedFormat(raw_format))
            }
            Some(format) => format,
        };

        if array_size == 0 {
            return Err(DdsError::InvalidHeader("array size is zero"));
        }
        if array_size > MAX_TEXTURE_ARRAY_SIZE {
            return Err(DdsError::InvalidHeader("array size is too large"));
        }
        metadata.array_size = array_size as usize;

        match dimension {
            DDS_DIMENSION_TEXTURE1D => {
                if flags & DDSD_HEIGHT != 0 && height != 1 {
                    return Err(DdsError::InvalidHeader("1D texture has a height"));
                }
                metadata.dimension = TexDimension::Texture1D;
            }
            DDS_DIMENSION_TEXTURE2D => {
                if misc_flag & DDS_RESOURCE_MISC_TEXTURECUBE != 0 {
                    metadata.array_size *= 6;
                    metadata.is_cubemap = true;
                }
            }
            DDS_DIMENSION_TEXTURE3D => {
                if flags & DDSD_DEPTH == 0 {
                    return Err(DdsError::InvalidHeader("volume texture has no depth"));
                }
                if array_size > 1 {
                    return Err(DdsError::InvalidHeader("volume texture is an array"));
                }
                metadata.dimension = TexDimension::Texture3D;
                metadata.depth = depth.max(1) as usize;
            }
            _ => return Err(DdsError::InvalidHeader("unknown resource dimension")),
        }

        metadata.alpha_mode = AlphaMode::from_raw(misc_flags2);
        (DDS_HEADER_SIZE + DX10_HEADER_SIZE, LegacyConversion::None)
    } else {
        let (format, conversion) =
            pixel_format
                .to_dxgi()
                .ok_or(DdsError::UnsupportedLegacyFormat {
                    flags: pixel_format.flags,
                    fourcc: pixel_format.fourcc,
                    bit_count: pixel_format.rgb_bit_count,
                })?;
        metadata.format = format;

        if flags & DDSD_DEPTH != 0 || caps2 & DDSCAPS2_VOLUME != 0 {
            metadata.dimension = TexDimension::Texture3D;
            metadata.depth = depth.max(1) as usize;
        } else if caps2 & DDSCAPS2_CUBEMAP != 0 {
            if caps2 & DDSCAPS2_CUBEMAP_ALLFACES != DDSCAPS2_CUBEMAP_ALLFACES {
                return Err(DdsError::InvalidHeader("cube map is missing faces"));
            }
            metadata.array_size = 6;
            metadata.is_cubemap = true;
        }

        if pixel_format.is_premultiplied() {
            metadata.alpha_mode = AlphaMode::Premultiplied;
        }

        (DDS_HEADER_SIZE, conversion)
    };

    validate_extents(&metadata)?;

    Ok(DdsInfo {
        metadata,
        data_offset,
        conversion,
    })
}

fn validate_extents(metadata: &TexMetadata) -> DdsResult<()> {
    let largest = metadata.width.max(metadata.height).max(metadata.depth);
    if largest > MAX_TEXTURE_DIMENSION as usize {
        return Err(DdsError::InvalidHeader("dimensions are too large"));
    }

    let max_mips = (usize::BITS - largest.leading_zeros()) as usize;
    if metadata.mip_levels > max_mips {
        return Err(DdsError::InvalidHeader("too many mip levels for dimensions"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn parses_legacy_dxt1() {
        let data = create_legacy_dds(b"DXT1", 8, 4, 1, &[0; 16]);
        let info = parse_dds(&data).unwrap();

        assert_eq!(info.data_offset, DDS_HEADER_SIZE);
        assert_eq!(info.metadata.format, DxgiFormat::Bc1Unorm);
        assert_eq!((info.metadata.width, info.metadata.height), (8, 4));
        assert_eq!(info.metadata.mip_levels, 1);
        assert_eq!(info.metadata.alpha_mode, AlphaMode::Unknown);
        assert_eq!(info.conversion, LegacyConversion::None);
    }

    #[rstest]
    #[case(b"DXT2", AlphaMode::Premultiplied)]
    #[case(b"DXT3", AlphaMode::Unknown)]
    #[case(b"DXT4", AlphaMode::Premultiplied)]
    #[case(b"DXT5", AlphaMode::Unknown)]
    fn legacy_premultiplied_fourccs_set_alpha_mode(
        #[case] fourcc: &[u8; 4],
        #[case] expected: AlphaMode,
    ) {
        let data = create_legacy_dds(fourcc, 4, 4, 1, &[0; 16]);
        assert_eq!(parse_dds(&data).unwrap().metadata.alpha_mode, expected);
    }

    #[test]
    fn parses_dx10_header() {
        let data = create_dx10_dds(DxgiFormat::Bc7UnormSrgb, 16, 16, 5, &[]);
        let info = parse_dds(&data).unwrap();

        assert_eq!(info.data_offset, DDS_HEADER_SIZE + DX10_HEADER_SIZE);
        assert_eq!(info.metadata.format, DxgiFormat::Bc7UnormSrgb);
        assert_eq!(info.metadata.mip_levels, 5);
        assert_eq!(info.metadata.dimension, TexDimension::Texture2D);
    }

    #[rstest]
    #[case(1, AlphaMode::Straight)]
    #[case(2, AlphaMode::Premultiplied)]
    #[case(3, AlphaMode::Opaque)]
    #[case(4, AlphaMode::Custom)]
    fn dx10_alpha_mode_comes_from_misc_flags2(#[case] raw: u32, #[case] expected: AlphaMode) {
        let mut data = create_dx10_dds(DxgiFormat::R8G8B8A8Unorm, 4, 4, 1, &[]);
        write_header_field(&mut data, DX10_MISC_FLAGS2_OFFSET, raw);
        assert_eq!(parse_dds(&data).unwrap().metadata.alpha_mode, expected);
    }

    #[test]
    fn dx10_cube_map_multiplies_array_size() {
        let mut data = create_dx10_dds(DxgiFormat::R8G8B8A8Unorm, 4, 4, 1, &[]);
        write_header_field(&mut data, DX10_MISC_FLAG_OFFSET, DDS_RESOURCE_MISC_TEXTURECUBE);
        write_header_field(&mut data, DX10_ARRAY_SIZE_OFFSET, 2);

        let metadata = parse_dds(&data).unwrap().metadata;
        assert!(metadata.is_cubemap);
        assert_eq!(metadata.array_size, 12);
    }

    #[test]
    fn dx10_volume_requires_depth_flag() {
        let mut data = create_dx10_dds(DxgiFormat::R8G8B8A8Unorm, 4, 4, 1, &[]);
        write_header_field(&mut data, DX10_RESOURCE_DIMENSION_OFFSET, DDS_DIMENSION_TEXTURE3D);
        write_header_field(&mut data, DDS_DEPTH_OFFSET, 4);
        assert!(matches!(parse_dds(&data), Err(DdsError::InvalidHeader(_))));

        let flags = read_header_field(&data, DDS_FLAGS_OFFSET);
        write_header_field(&mut data, DDS_FLAGS_OFFSET, flags | DDSD_DEPTH);
        let metadata = parse_dds(&data).unwrap().metadata;
        assert_eq!(metadata.dimension, TexDimension::Texture3D);
        assert_eq!(metadata.depth, 4);
    }

    #[test]
    fn legacy_cube_map_requires_all_faces() {
        let mut data = create_legacy_dds(b"DXT1", 4, 4, 1, &[]);
        write_header_field(&mut data, DDS_CAPS2_OFFSET, DDSCAPS2_CUBEMAP | 0x400);
        assert!(matches!(parse_dds(&data), Err(DdsError::InvalidHeader(_))));

        write_header_field(
            &mut data,
            DDS_CAPS2_OFFSET,
            DDSCAPS2_CUBEMAP | DDSCAPS2_CUBEMAP_ALLFACES,
        );
        let metadata = parse_dds(&data).unwrap().metadata;
        assert!(metadata.is_cubemap);
        assert_eq!(metadata.array_size, 6);
    }

    #[test]
    fn zero_mip_count_means_one() {
        let mut data = create_legacy_dds(b"DXT1", 4, 4, 1, &[]);
        write_header_field(&mut data, DDS_MIPMAP_COUNT_OFFSET, 0);
        assert_eq!(parse_dds(&data).unwrap().metadata.mip_levels, 1);
    }

    #[rstest]
    #[case(DDS_SIZE_OFFSET, 0)]
    #[case(DDS_PIXELFORMAT_OFFSET, 0)]
    #[case(DDS_WIDTH_OFFSET, 0)]
    #[case(DDS_HEIGHT_OFFSET, 0)]
    #[case(DDS_WIDTH_OFFSET, MAX_TEXTURE_DIMENSION + 1)]
    #[case(DDS_MIPMAP_COUNT_OFFSET, 4)]
    fn rejects_invalid_header_fields(#[case] offset: usize, #[case] value: u32) {
        let mut data = create_legacy_dds(b"DXT1", 4, 4, 1, &[]);
        write_header_field(&mut data, offset, value);
        assert!(matches!(parse_dds(&data), Err(DdsError::InvalidHeader(_))));
    }

    #[test]
    fn rejects_zero_array_size() {
        let mut data = create_dx10_dds(DxgiFormat::R8G8B8A8Unorm, 4, 4, 1, &[]);
        write_header_field(&mut data, DX10_ARRAY_SIZE_OFFSET, 0);
        assert!(matches!(parse_dds(&data), Err(DdsError::InvalidHeader(_))));
    }

    #[rstest]
    #[case(0)]
    #[case(116)]
    #[case(0xFFFF)]
    fn rejects_unknown_dxgi_format(#[case] raw: u32) {
        let mut data = create_dx10_dds(DxgiFormat::R8G8B8A8Unorm, 4, 4, 1, &[]);
        write_header_field(&mut data, DX10_FORMAT_OFFSET, raw);
        assert!(matches!(
            parse_dds(&data),
            Err(DdsError::UnsupportedFormat(value)) if value == raw
        ));
    }

    #[test]
    fn rejects_unknown_legacy_fourcc() {
        let data = create_legacy_dds(b"UNKN", 4, 4, 1, &[]);
        assert!(matches!(
            parse_dds(&data),
            Err(DdsError::UnsupportedLegacyFormat { .. })
        ));
    }

    #[test]
    fn rejects_truncated_dx10_header() {
        let data = create_dx10_dds(DxgiFormat::R8G8B8A8Unorm, 4, 4, 1, &[]);
        assert!(matches!(
            parse_dds(&data[..DDS_HEADER_SIZE + 4]),
            Err(DdsError::Truncated { expected: 148, actual: 132 })
        ));
    }

    #[test]
    fn rejects_non_dds_data() {
        assert!(matches!(parse_dds(&[0u8; 256]), Err(DdsError::NotADds)));
        assert!(matches!(parse_dds(&[]), Err(DdsError::NotADds)));
    }
}
