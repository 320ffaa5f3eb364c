//! BC4 and BC5 decoding.
//!
//! A BC4 block stores a single channel as two 8 bit endpoints followed by sixteen 3 bit indices.
//! When the first endpoint is greater, six values are interpolated between the endpoints;
//! otherwise four are, and the last two indices map to the minimum and maximum value.
//! BC5 is two BC4 blocks, one for red and one for green.

/// Decodes an unsigned BC4 block (also the alpha block of BC3) into 16 values.
#[inline]
pub fn decode_bc4_unorm_block(src: &[u8; 8]) -> [u8; 16] {
    let e0 = src[0] as u32;
    let e1 = src[1] as u32;

    let mut palette = [0u8; 8];
    palette[0] = src[0];
    palette[1] = src[1];
    if e0 > e1 {
        for i in 1..7u32 {
            palette[i as usize + 1] = (((7 - i) * e0 + i * e1) / 7) as u8;
        }
    } else {
        for i in 1..5u32 {
            palette[i as usize + 1] = (((5 - i) * e0 + i * e1) / 5) as u8;
        }
        palette[6] = 0;
        palette[7] = 255;
    }

    let indices = read_indices(src);
    core::array::from_fn(|pixel_idx| palette[((indices >> (pixel_idx * 3)) & 0b111) as usize])
}

/// Decodes a signed BC4 block into 16 values.
///
/// An endpoint of -128 is treated as -127, so both -128 and -127 decode to -1.0.
#[inline]
pub fn decode_bc4_snorm_block(src: &[u8; 8]) -> [i8; 16] {
    let e0 = (src[0] as i8).max(-127) as i32;
    let e1 = (src[1] as i8).max(-127) as i32;

    let mut palette = [0i8; 8];
    palette[0] = e0 as i8;
    palette[1] = e1 as i8;
    if e0 > e1 {
        for i in 1..7i32 {
            palette[i as usize + 1] = (((7 - i) * e0 + i * e1) / 7) as i8;
        }
    } else {
        for i in 1..5i32 {
            palette[i as usize + 1] = (((5 - i) * e0 + i * e1) / 5) as i8;
        }
        palette[6] = -127;
        palette[7] = 127;
    }

    let indices = read_indices(src);
    core::array::from_fn(|pixel_idx| palette[((indices >> (pixel_idx * 3)) & 0b111) as usize])
}

/// Reads the 48 bits of indices following the endpoints.
#[inline(always)]
fn read_indices(src: &[u8; 8]) -> u64 {
    u64::from_le_bytes([src[2], src[3], src[4], src[5], src[6], src[7], 0, 0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(0, 200)]
    #[case(1, 100)]
    #[case(2, 185)] // (6 * 200 + 100) / 7
    #[case(7, 114)] // (200 + 6 * 100) / 7
    fn unorm_eight_value_mode(#[case] index: u64, #[case] expected: u8) {
        let mut src = [200, 100, 0, 0, 0, 0, 0, 0];
        src[2..8].copy_from_slice(&index.to_le_bytes()[..6]);
        assert_eq!(decode_bc4_unorm_block(&src)[0], expected);
    }

    #[rstest]
    #[case(2, 120)] // (4 * 100 + 200) / 5
    #[case(6, 0)]
    #[case(7, 255)]
    fn unorm_six_value_mode(#[case] index: u64, #[case] expected: u8) {
        let mut src = [100, 200, 0, 0, 0, 0, 0, 0];
        src[2..8].copy_from_slice(&index.to_le_bytes()[..6]);
        assert_eq!(decode_bc4_unorm_block(&src)[0], expected);
    }

    #[test]
    fn indices_span_byte_boundaries() {
        // Pixel 2 uses bits 6..9, split across the first two index bytes.
        let mut src = [255, 0, 0, 0, 0, 0, 0, 0];
        let indices: u64 = 0b001 << 6;
        src[2..8].copy_from_slice(&indices.to_le_bytes()[..6]);

        let values = decode_bc4_unorm_block(&src);
        assert_eq!(values[2], 0);
        assert_eq!(values[1], 255);
        assert_eq!(values[15], 255);
    }

    #[test]
    fn snorm_clamps_minimum_endpoint() {
        let src = [0x80, 0x80, 0, 0, 0, 0, 0, 0];
        assert!(decode_bc4_snorm_block(&src).iter().all(|&x| x == -127));
    }

    #[rstest]
    #[case(6, -127)]
    #[case(7, 127)]
    fn snorm_six_value_mode_extremes(#[case] index: u64, #[case] expected: i8) {
        let mut src = [(-10i8) as u8, 10, 0, 0, 0, 0, 0, 0];
        src[2..8].copy_from_slice(&index.to_le_bytes()[..6]);
        assert_eq!(decode_bc4_snorm_block(&src)[0], expected);
    }
}
