use super::constants::*;
use crate::error::{DdsError, DdsResult};
use dds_convert_common::{allocate::allocate_zeroed, DxgiFormat, ScratchImage, TexDimension};
use endian_writer::{EndianWriter, LittleEndianWriter};

/// Writes an image as a DDS file with a `DX10` extended header.
///
/// The inverse of [`load_from_dds_memory`] for every format this crate can read.
///
/// # Errors
///
/// - [`DdsError::UnsupportedFormat`] if the image format is [`DxgiFormat::Unknown`].
/// - [`DdsError::Allocate`] if the output buffer could not be allocated.
///
/// [`load_from_dds_memory`]: crate::dds::load::load_from_dds_memory
pub fn save_to_dds_memory(image: &ScratchImage) -> DdsResult<Vec<u8>> {
    let metadata = image.metadata();
    if metadata.format == DxgiFormat::Unknown {
        return Err(DdsError::UnsupportedFormat(0));
    }

    let header_size = DDS_HEADER_SIZE + DX10_HEADER_SIZE;
    let pixel_size = image
        .surfaces()
        .iter()
        .map(|surface| surface.pixels.len())
        .sum::<usize>();
    let mut output = allocate_zeroed(header_size + pixel_size)?;

    let is_compressed = metadata.format.is_compressed();
    let pitch = image.surfaces().first().map_or(0, |surface| {
        if is_compressed {
            surface.slice_pitch
        } else {
            surface.row_pitch
        }
    });

    let mut flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT;
    flags |= if is_compressed {
        DDSD_LINEARSIZE
    } else {
        DDSD_PITCH
    };
    let mut caps = DDSCAPS_TEXTURE;
    let mut caps2 = 0;
    if metadata.mip_levels > 1 {
        flags |= DDSD_MIPMAPCOUNT;
        caps |= DDSCAPS_COMPLEX | DDSCAPS_MIPMAP;
    }
    if metadata.array_size > 1 {
        caps |= DDSCAPS_COMPLEX;
    }
    if metadata.is_cubemap {
        caps2 |= DDSCAPS2_CUBEMAP | DDSCAPS2_CUBEMAP_ALLFACES;
    }
    if metadata.dimension == TexDimension::Texture3D {
        flags |= DDSD_DEPTH;
        caps |= DDSCAPS_COMPLEX;
        caps2 |= DDSCAPS2_VOLUME;
    }

    let (misc_flag, array_size) = if metadata.is_cubemap {
        (DDS_RESOURCE_MISC_TEXTURECUBE, metadata.array_size / 6)
    } else {
        (0, metadata.array_size)
    };

    // SAFETY: output is at least DDS_HEADER_SIZE + DX10_HEADER_SIZE (148) bytes long and every
    // offset written below is within it.
    unsafe {
        let mut writer = LittleEndianWriter::new(output.as_mut_ptr());
        writer.write_u32_at(DDS_MAGIC, 0);
        writer.write_u32_at(DDS_HEADER_STRUCT_SIZE, DDS_SIZE_OFFSET as isize);
        writer.write_u32_at(flags, DDS_FLAGS_OFFSET as isize);
        writer.write_u32_at(metadata.height as u32, DDS_HEIGHT_OFFSET as isize);
        writer.write_u32_at(metadata.width as u32, DDS_WIDTH_OFFSET as isize);
        writer.write_u32_at(pitch as u32, DDS_PITCH_OFFSET as isize);
        writer.write_u32_at(metadata.depth as u32, DDS_DEPTH_OFFSET as isize);
        writer.write_u32_at(metadata.mip_levels as u32, DDS_MIPMAP_COUNT_OFFSET as isize);
        writer.write_u32_at(DDS_PIXELFORMAT_STRUCT_SIZE, DDS_PIXELFORMAT_OFFSET as isize);
        writer.write_u32_at(DDPF_FOURCC, DDS_PIXELFORMAT_FLAGS_OFFSET as isize);
        writer.write_u32_at(FOURCC_DX10, FOURCC_OFFSET as isize);
        writer.write_u32_at(caps, DDS_CAPS_OFFSET as isize);
        writer.write_u32_at(caps2, DDS_CAPS2_OFFSET as isize);

        writer.write_u32_at(metadata.format as u32, DX10_FORMAT_OFFSET as isize);
        writer.write_u32_at(metadata.dimension as u32, DX10_RESOURCE_DIMENSION_OFFSET as isize);
        writer.write_u32_at(misc_flag, DX10_MISC_FLAG_OFFSET as isize);
        writer.write_u32_at(array_size as u32, DX10_ARRAY_SIZE_OFFSET as isize);
        writer.write_u32_at(metadata.alpha_mode as u32, DX10_MISC_FLAGS2_OFFSET as isize);
    }

    let mut offset = header_size;
    for surface in image.surfaces() {
        output[offset..offset + surface.pixels.len()].copy_from_slice(&surface.pixels);
        offset += surface.pixels.len();
    }

    Ok(output)
}
