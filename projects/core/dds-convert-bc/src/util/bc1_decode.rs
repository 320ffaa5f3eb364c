//! BC1 (DXT1) decoding implementation; based on etcpak
//! https://github.com/wolfpld/etcpak and MSDN
//! https://learn.microsoft.com/en-us/windows/win32/direct3d9/opaque-and-1-bit-alpha-textures

use dds_convert_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
};

/// Decodes a BC1 block into RGBA8 pixels.
///
/// # Parameters
///
/// - `src`: The source BC1 block (8 bytes)
///
/// # Example
///
/// ```
/// use dds_convert_bc::util::decode_bc1_block;
///
/// let block = decode_bc1_block(&[0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0]);
/// assert_eq!(block.pixels[0].to_array(), [255, 0, 0, 255]);
/// ```
#[inline]
pub fn decode_bc1_block(src: &[u8; 8]) -> Decoded4x4Block {
    let c0 = Color565::from_le_bytes([src[0], src[1]]);
    let c1 = Color565::from_le_bytes([src[2], src[3]]);
    let indices = u32::from_le_bytes([src[4], src[5], src[6], src[7]]);

    let palette = color_palette(c0, c1, c0.greater_than(&c1));
    apply_color_indices(&palette, indices)
}

/// Builds the 4 entry colour palette of a BC1-BC3 colour block.
///
/// # Parameters
///
/// - `four_colors`: `true` to interpolate two colours between the endpoints;
///   `false` for the BC1 mode with one midpoint and transparent black.
#[inline]
pub(crate) fn color_palette(c0: Color565, c1: Color565, four_colors: bool) -> [Color8888; 4] {
    let (r0, g0, b0) = (c0.red() as u32, c0.green() as u32, c0.blue() as u32);
    let (r1, g1, b1) = (c1.red() as u32, c1.green() as u32, c1.blue() as u32);

    let mut palette = [c0.to_color_8888(), c1.to_color_8888(), Color8888::default(), Color8888::default()];
    if four_colors {
        palette[2] = Color8888::new(
            ((2 * r0 + r1) / 3) as u8,
            ((2 * g0 + g1) / 3) as u8,
            ((2 * b0 + b1) / 3) as u8,
            255,
        );
        palette[3] = Color8888::new(
            ((r0 + 2 * r1) / 3) as u8,
            ((g0 + 2 * g1) / 3) as u8,
            ((b0 + 2 * b1) / 3) as u8,
            255,
        );
    } else {
        palette[2] = Color8888::new(
            ((r0 + r1) / 2) as u8,
            ((g0 + g1) / 2) as u8,
            ((b0 + b1) / 2) as u8,
            255,
        );
        // Transparent black
        palette[3] = Color8888::new(0, 0, 0, 0);
    }

    palette
}

/// Expands 2 bit colour indices (pixel 0 in the lowest bits) into a block.
#[inline]
pub(crate) fn apply_color_indices(palette: &[Color8888; 4], indices: u32) -> Decoded4x4Block {
    let mut block = Decoded4x4Block::new(Color8888::default());
    for (pixel_idx, pixel) in block.pixels.iter_mut().enumerate() {
        let index = (indices >> (pixel_idx * 2)) & 0b11;
        *pixel = palette[index as usize];
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn decodes_solid_red_block() {
        let bc1_block = [
            0x00, 0xF8, // c0 = R:31 G:0 B:0
            0x00, 0xF8, // c1 = R:31 G:0 B:0 (identical to create solid color)
            0x00, 0x00, 0x00, 0x00, // All pixels use index 0
        ];

        let block = decode_bc1_block(&bc1_block);
        for pixel in block.pixels.iter() {
            assert_eq!(*pixel, Color8888::new(255, 0, 0, 255));
        }
    }

    #[test]
    fn four_color_mode_interpolates_thirds() {
        // c0 = white, c1 = black, index 2 on the first pixel, 3 on the second
        let block = decode_bc1_block(&[0xFF, 0xFF, 0x00, 0x00, 0b0000_1110, 0, 0, 0]);

        assert_eq!(block.pixel(0, 0), Color8888::new(170, 170, 170, 255));
        assert_eq!(block.pixel(1, 0), Color8888::new(85, 85, 85, 255));
        assert_eq!(block.pixel(2, 0), Color8888::new(255, 255, 255, 255));
    }

    #[rstest]
    #[case(0b10, Color8888::new(127, 127, 127, 255))]
    #[case(0b11, Color8888::new(0, 0, 0, 0))]
    fn three_color_mode_has_midpoint_and_transparent_black(
        #[case] index: u8,
        #[case] expected: Color8888,
    ) {
        // c0 = black <= c1 = white selects the 3 colour mode
        let block = decode_bc1_block(&[0x00, 0x00, 0xFF, 0xFF, index, 0, 0, 0]);
        assert_eq!(block.pixel(0, 0), expected);
    }
}
