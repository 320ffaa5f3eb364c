use super::constants::*;

/// Quick rejection of inputs that cannot be a DDS file: `DDS ` at offset 0 and room for the
/// 124 byte header after it. Everything else is validated by [`parse_dds`].
///
/// [`parse_dds`]: crate::dds::parse_dds::parse_dds
#[inline]
pub fn likely_dds(data: &[u8]) -> bool {
    data.len() >= DDS_HEADER_SIZE
        && u32::from_le_bytes([data[0], data[1], data[2], data[3]]) == DDS_MAGIC
}
