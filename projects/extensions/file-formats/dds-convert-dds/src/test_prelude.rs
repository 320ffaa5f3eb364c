//! Common test imports and utilities for DDS container tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

pub use dds_convert_common::{DxgiFormat, ScratchImage};
pub use rstest::rstest;

// Common DDS test data helpers
pub(crate) use crate::dds::constants::*;
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};

/// Total size of DDS header + DX10 header (used in tests)
pub const DDS_DX10_TOTAL_HEADER_SIZE: usize = DDS_HEADER_SIZE + DX10_HEADER_SIZE;

/// Helper function to create a basic DDS header with common fields
fn create_dds_header_base(
    data: &mut [u8],
    width: u32,
    height: u32,
    mipmap_count: u32,
    is_dx10: bool,
) {
    let required_size = if is_dx10 {
        DDS_DX10_TOTAL_HEADER_SIZE
    } else {
        DDS_HEADER_SIZE
    };
    if data.len() < required_size {
        return;
    }

    let mut writer = unsafe { LittleEndianWriter::new(data.as_mut_ptr()) };

    unsafe {
        writer.write_u32_at(DDS_MAGIC, 0);
        writer.write_u32_at(DDS_HEADER_STRUCT_SIZE, DDS_SIZE_OFFSET as isize);
        writer.write_u32_at(DDS_PIXELFORMAT_STRUCT_SIZE, DDS_PIXELFORMAT_OFFSET as isize);

        let mut flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_LINEARSIZE;
        if mipmap_count > 1 {
            flags |= DDSD_MIPMAPCOUNT;
        }
        writer.write_u32_at(flags, DDS_FLAGS_OFFSET as isize);

        writer.write_u32_at(height, DDS_HEIGHT_OFFSET as isize);
        writer.write_u32_at(width, DDS_WIDTH_OFFSET as isize);
        writer.write_u32_at(mipmap_count, DDS_MIPMAP_COUNT_OFFSET as isize);
        writer.write_u32_at(DDSCAPS_TEXTURE, DDS_CAPS_OFFSET as isize);
    }
}

/// Allocates a header of the given size followed by the payload.
fn header_with_payload(header_size: usize, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; header_size + payload.len()];
    data[header_size..].copy_from_slice(payload);
    data
}

/// Creates a DDS file with a legacy FOURCC pixel format.
pub fn create_legacy_dds(
    fourcc: &[u8; 4],
    width: u32,
    height: u32,
    mipmap_count: u32,
    payload: &[u8],
) -> Vec<u8> {
    let mut data = header_with_payload(DDS_HEADER_SIZE, payload);
    create_dds_header_base(&mut data, width, height, mipmap_count, false);
    data[FOURCC_OFFSET..FOURCC_OFFSET + 4].copy_from_slice(fourcc);
    write_header_field(&mut data, DDS_PIXELFORMAT_FLAGS_OFFSET, DDPF_FOURCC);
    data
}

/// Creates a DDS file with a legacy bit mask pixel format.
pub fn create_uncompressed_legacy_dds(
    pixel_flags: u32,
    bit_count: u32,
    [r_mask, g_mask, b_mask, a_mask]: [u32; 4],
    width: u32,
    height: u32,
    payload: &[u8],
) -> Vec<u8> {
    let mut data = header_with_payload(DDS_HEADER_SIZE, payload);
    create_dds_header_base(&mut data, width, height, 1, false);
    write_header_field(&mut data, DDS_PIXELFORMAT_FLAGS_OFFSET, pixel_flags);
    write_header_field(&mut data, DDS_PIXELFORMAT_RGBBITCOUNT_OFFSET, bit_count);
    write_header_field(&mut data, DDS_PIXELFORMAT_RBITMASK_OFFSET, r_mask);
    write_header_field(&mut data, DDS_PIXELFORMAT_GBITMASK_OFFSET, g_mask);
    write_header_field(&mut data, DDS_PIXELFORMAT_BBITMASK_OFFSET, b_mask);
    write_header_field(&mut data, DDS_PIXELFORMAT_ABITMASK_OFFSET, a_mask);
    data
}

/// Creates a 2D DDS file with a `DX10` header.
pub fn create_dx10_dds(
    format: DxgiFormat,
    width: u32,
    height: u32,
    mipmap_count: u32,
    payload: &[u8],
) -> Vec<u8> {
    let mut data = header_with_payload(DDS_DX10_TOTAL_HEADER_SIZE, payload);
    create_dds_header_base(&mut data, width, height, mipmap_count, true);
    data[FOURCC_OFFSET..FOURCC_OFFSET + 4].copy_from_slice(b"DX10");
    write_header_field(&mut data, DDS_PIXELFORMAT_FLAGS_OFFSET, DDPF_FOURCC);
    write_header_field(&mut data, DX10_FORMAT_OFFSET, format as u32);
    write_header_field(&mut data, DX10_RESOURCE_DIMENSION_OFFSET, DDS_DIMENSION_TEXTURE2D);
    write_header_field(&mut data, DX10_ARRAY_SIZE_OFFSET, 1);
    data
}

/// Overwrites a 32-bit header field.
pub fn write_header_field(data: &mut [u8], offset: usize, value: u32) {
    assert!(offset + 4 <= data.len());
    unsafe {
        let mut writer = LittleEndianWriter::new(data.as_mut_ptr());
        writer.write_u32_at(value, offset as isize);
    }
}

/// Reads a 32-bit header field.
pub fn read_header_field(data: &[u8], offset: usize) -> u32 {
    assert!(offset + 4 <= data.len());
    unsafe {
        let mut reader = LittleEndianReader::new(data.as_ptr());
        reader.read_u32_at(offset as isize)
    }
}
