//! Whole image decompression of block compressed formats.

use crate::error::DecompressError;
use crate::util::*;
use dds_convert_common::{decoded_4x4_block::Decoded4x4Block, DxgiFormat, ScratchImage, Surface};
use log::debug;

/// Largest decoded block: 16 pixels of `R32G32B32A32_FLOAT`.
const MAX_DECODED_BLOCK_SIZE: usize = 16 * 16;

/// Returns the uncompressed format a block compressed format decodes to.
///
/// # Returns
///
/// `None` if the format is not block compressed, or is typeless.
pub const fn default_decompressed_format(format: DxgiFormat) -> Option<DxgiFormat> {
    use DxgiFormat as F;

    Some(match format {
        F::Bc1Unorm | F::Bc2Unorm | F::Bc3Unorm | F::Bc7Unorm => F::R8G8B8A8Unorm,
        F::Bc1UnormSrgb | F::Bc2UnormSrgb | F::Bc3UnormSrgb | F::Bc7UnormSrgb => {
            F::R8G8B8A8UnormSrgb
        }
        F::Bc4Unorm => F::R8Unorm,
        F::Bc4Snorm => F::R8Snorm,
        F::Bc5Unorm => F::R8G8Unorm,
        F::Bc5Snorm => F::R8G8Snorm,
        F::Bc6hUf16 | F::Bc6hSf16 => F::R32G32B32A32Float,
        _ => return None,
    })
}

/// Decompresses every surface of a block compressed image.
///
/// The output format is chosen by [`default_decompressed_format`]; the remaining metadata
/// (dimensions, mip levels, alpha mode, ...) is carried over unchanged.
///
/// # Errors
///
/// - [`DecompressError::UnsupportedFormat`] if the image is not in a decodable BC format.
/// - [`DecompressError::TruncatedSurface`] if a surface has less data than its size requires.
/// - [`DecompressError::Allocate`] if the output image could not be allocated.
pub fn decompress(image: &ScratchImage) -> Result<ScratchImage, DecompressError> {
    let format = image.metadata().format;
    let target =
        default_decompressed_format(format).ok_or(DecompressError::UnsupportedFormat(format))?;
    let block_size = format
        .block_size()
        .ok_or(DecompressError::UnsupportedFormat(format))?;

    let mut metadata = *image.metadata();
    metadata.format = target;
    let mut output = ScratchImage::initialize(metadata)?;

    for (index, (src, dst)) in image
        .surfaces()
        .iter()
        .zip(output.surfaces_mut())
        .enumerate()
    {
        if src.pixels.len() < src.slice_pitch {
            return Err(DecompressError::TruncatedSurface {
                index,
                expected: src.slice_pitch,
                actual: src.pixels.len(),
            });
        }

        decompress_surface(format, block_size, src, dst);
    }

    debug!(
        "Decompressed {} surface(s) from {} to {}",
        image.surfaces().len(),
        format.name(),
        target.name()
    );
    Ok(output)
}

fn decompress_surface(format: DxgiFormat, block_size: usize, src: &Surface, dst: &mut Surface) {
    let bytes_per_pixel = dst.format.bits_per_pixel() as usize / 8;
    let mut decoded = [0u8; MAX_DECODED_BLOCK_SIZE];

    for block_y in 0..src.height.div_ceil(4) {
        let Some(row) = src.row(block_y) else {
            return;
        };

        for (block_x, block) in row
            .chunks_exact(block_size)
            .take(src.width.div_ceil(4))
            .enumerate()
        {
            decode_block(format, block, &mut decoded);
            write_block(dst, block_x, block_y, bytes_per_pixel, &decoded);
        }
    }
}

/// Decodes a single block into 16 row-major pixels of the decompressed format.
fn decode_block(format: DxgiFormat, block: &[u8], out: &mut [u8; MAX_DECODED_BLOCK_SIZE]) {
    use DxgiFormat as F;

    match format {
        F::Bc1Unorm | F::Bc1UnormSrgb => write_rgba8(&decode_bc1_block(&read_block(block)), out),
        F::Bc2Unorm | F::Bc2UnormSrgb => write_rgba8(&decode_bc2_block(&read_block(block)), out),
        F::Bc3Unorm | F::Bc3UnormSrgb => write_rgba8(&decode_bc3_block(&read_block(block)), out),
        F::Bc4Unorm => {
            out[..16].copy_from_slice(&decode_bc4_unorm_block(&read_block(block)));
        }
        F::Bc4Snorm => {
            for (dst, value) in out.iter_mut().zip(decode_bc4_snorm_block(&read_block(block))) {
                *dst = value as u8;
            }
        }
        F::Bc5Unorm => {
            let red = decode_bc4_unorm_block(&read_block(block));
            let green = decode_bc4_unorm_block(&read_block(&block[8..]));
            for (pixel_idx, pixel) in out.chunks_exact_mut(2).take(16).enumerate() {
                pixel[0] = red[pixel_idx];
                pixel[1] = green[pixel_idx];
            }
        }
        F::Bc5Snorm => {
            let red = decode_bc4_snorm_block(&read_block(block));
            let green = decode_bc4_snorm_block(&read_block(&block[8..]));
            for (pixel_idx, pixel) in out.chunks_exact_mut(2).take(16).enumerate() {
                pixel[0] = red[pixel_idx] as u8;
                pixel[1] = green[pixel_idx] as u8;
            }
        }
        F::Bc6hUf16 | F::Bc6hSf16 => {
            // bcdec writes RGB; the pitch is in floats.
            let mut rgb = [0f32; 16 * 3];
            bcdec_rs::bc6h_float(block, &mut rgb, 4 * 3, format == F::Bc6hSf16);
            for (pixel, color) in out.chunks_exact_mut(16).zip(rgb.chunks_exact(3)) {
                pixel[0..4].copy_from_slice(&color[0].to_le_bytes());
                pixel[4..8].copy_from_slice(&color[1].to_le_bytes());
                pixel[8..12].copy_from_slice(&color[2].to_le_bytes());
                pixel[12..16].copy_from_slice(&1.0f32.to_le_bytes());
            }
        }
        F::Bc7Unorm | F::Bc7UnormSrgb => {
            // The pitch is in bytes.
            bcdec_rs::bc7(block, &mut out[..64], 4 * 4);
        }
        _ => {}
    }
}

/// Copies a block into a fixed size array, zero padding if it is short.
#[inline(always)]
fn read_block<const N: usize>(block: &[u8]) -> [u8; N] {
    let mut result = [0u8; N];
    let len = block.len().min(N);
    result[..len].copy_from_slice(&block[..len]);
    result
}

#[inline(always)]
fn write_rgba8(block: &Decoded4x4Block, out: &mut [u8; MAX_DECODED_BLOCK_SIZE]) {
    for (dst, pixel) in out.chunks_exact_mut(4).zip(block.pixels.iter()) {
        dst.copy_from_slice(&pixel.to_array());
    }
}

/// Writes a decoded 4x4 block into a surface, clipping at the right and bottom edges.
fn write_block(
    dst: &mut Surface,
    block_x: usize,
    block_y: usize,
    bytes_per_pixel: usize,
    decoded: &[u8; MAX_DECODED_BLOCK_SIZE],
) {
    let x = block_x * 4;
    let columns = dst.width.saturating_sub(x).min(4);
    let row_bytes = columns * bytes_per_pixel;
    let block_row_bytes = 4 * bytes_per_pixel;

    for y in 0..4 {
        let Some(row) = dst.row_mut(block_y * 4 + y) else {
            return;
        };

        let start = x * bytes_per_pixel;
        let src_start = y * block_row_bytes;
        row[start..start + row_bytes].copy_from_slice(&decoded[src_start..src_start + row_bytes]);
    }
}
