//! BC3 (DXT4/5) decoding; based on etcpak. BC4 style alpha followed by a BC1 style colour block.

use super::bc1_decode::{apply_color_indices, color_palette};
use super::bc4_decode::decode_bc4_unorm_block;
use dds_convert_common::{color_565::Color565, decoded_4x4_block::Decoded4x4Block};

/// Decodes a BC3 block into RGBA8 pixels.
///
/// # Parameters
///
/// - `src`: The source BC3 block (16 bytes)
#[inline]
pub fn decode_bc3_block(src: &[u8; 16]) -> Decoded4x4Block {
    let mut alpha_src = [0u8; 8];
    alpha_src.copy_from_slice(&src[..8]);
    let alpha = decode_bc4_unorm_block(&alpha_src);

    let c0 = Color565::from_le_bytes([src[8], src[9]]);
    let c1 = Color565::from_le_bytes([src[10], src[11]]);
    let indices = u32::from_le_bytes([src[12], src[13], src[14], src[15]]);

    let mut block = apply_color_indices(&color_palette(c0, c1, true), indices);
    for (pixel, alpha) in block.pixels.iter_mut().zip(alpha) {
        pixel.a = alpha;
    }

    block
}
