//! BC2 (DXT2/3) decoding; explicit 4 bit alpha followed by a BC1 style colour block.

use super::bc1_decode::{apply_color_indices, color_palette};
use dds_convert_common::{color_565::Color565, decoded_4x4_block::Decoded4x4Block};

/// Decodes a BC2 block into RGBA8 pixels.
///
/// # Parameters
///
/// - `src`: The source BC2 block (16 bytes)
#[inline]
pub fn decode_bc2_block(src: &[u8; 16]) -> Decoded4x4Block {
    let alpha = u64::from_le_bytes([
        src[0], src[1], src[2], src[3], src[4], src[5], src[6], src[7],
    ]);
    let c0 = Color565::from_le_bytes([src[8], src[9]]);
    let c1 = Color565::from_le_bytes([src[10], src[11]]);
    let indices = u32::from_le_bytes([src[12], src[13], src[14], src[15]]);

    // The colour block of BC2 always uses the 4 colour mode.
    let mut block = apply_color_indices(&color_palette(c0, c1, true), indices);
    for (pixel_idx, pixel) in block.pixels.iter_mut().enumerate() {
        let nibble = ((alpha >> (pixel_idx * 4)) & 0xF) as u8;
        pixel.a = nibble * 17;
    }

    block
}
