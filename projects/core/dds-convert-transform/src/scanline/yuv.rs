//! Loading of packed and interleaved YUV formats into RGBA.
//!
//! 8-bit formats use the BT.601 studio range matrix, 10 and 16-bit formats use BT.2020.

use super::Vector;
use dds_convert_common::DxgiFormat;

/// Converts 8-bit studio range YUV to RGBA.
#[inline]
fn yuv8_to_rgba(y: u8, u: u8, v: u8, alpha: f32) -> Vector {
    let y = y as i32 - 16;
    let u = u as i32 - 128;
    let v = v as i32 - 128;

    let r = (298 * y + 409 * v + 128) >> 8;
    let g = (298 * y - 100 * u - 208 * v + 128) >> 8;
    let b = (298 * y + 516 * u + 128) >> 8;

    [
        r.clamp(0, 255) as f32 / 255.0,
        g.clamp(0, 255) as f32 / 255.0,
        b.clamp(0, 255) as f32 / 255.0,
        alpha,
    ]
}

/// Converts 10-bit studio range YUV to RGBA.
#[inline]
fn yuv10_to_rgba(y: u32, u: u32, v: u32, alpha: f32) -> Vector {
    let y = y as i64 - 64;
    let u = u as i64 - 512;
    let v = v as i64 - 512;

    let r = (76533 * y + 110337 * v + 32768) >> 16;
    let g = (76533 * y - 12314 * u - 42699 * v + 32768) >> 16;
    let b = (76533 * y + 140777 * u + 32768) >> 16;

    [
        r.clamp(0, 1023) as f32 / 1023.0,
        g.clamp(0, 1023) as f32 / 1023.0,
        b.clamp(0, 1023) as f32 / 1023.0,
        alpha,
    ]
}

/// Converts 16-bit studio range YUV to RGBA.
#[inline]
fn yuv16_to_rgba(y: u16, u: u16, v: u16, alpha: f32) -> Vector {
    let y = y as i64 - 4096;
    let u = u as i64 - 32768;
    let v = v as i64 - 32768;

    let r = (76607 * y + 110532 * v + 32768) >> 16;
    let g = (76607 * y - 12397 * u - 42795 * v + 32768) >> 16;
    let b = (76607 * y + 140983 * u + 32768) >> 16;

    [
        r.clamp(0, 65535) as f32 / 65535.0,
        g.clamp(0, 65535) as f32 / 65535.0,
        b.clamp(0, 65535) as f32 / 65535.0,
        alpha,
    ]
}

#[inline]
fn u16_at(bytes: &[u8], index: usize) -> u16 {
    u16::from_le_bytes([bytes[index * 2], bytes[index * 2 + 1]])
}

/// Writes the two pixels of a packed element, dropping the second one at an odd row end.
#[inline]
fn write_pair(out: &mut [Vector], pair_index: usize, first: Vector, second: Vector) {
    let x = pair_index * 2;
    if let Some(pixel) = out.get_mut(x) {
        *pixel = first;
    }
    if let Some(pixel) = out.get_mut(x + 1) {
        *pixel = second;
    }
}

/// Loads a row of a YUV or packed RGB format.
///
/// # Returns
///
/// `false` if the format is not handled by this module.
pub fn load_video_scanline(src: &[u8], format: DxgiFormat, out: &mut [Vector]) -> bool {
    use DxgiFormat as F;

    match format {
        F::Ayuv => {
            for (p, dst) in src.chunks_exact(4).zip(out.iter_mut()) {
                *dst = yuv8_to_rgba(p[2], p[1], p[0], p[3] as f32 / 255.0);
            }
        }
        F::Y410 => {
            for (p, dst) in src.chunks_exact(4).zip(out.iter_mut()) {
                let t = u32::from_le_bytes([p[0], p[1], p[2], p[3]]);
                *dst = yuv10_to_rgba(
                    (t >> 10) & 0x3FF,
                    t & 0x3FF,
                    (t >> 20) & 0x3FF,
                    (t >> 30) as f32 / 3.0,
                );
            }
        }
        F::Y416 => {
            for (p, dst) in src.chunks_exact(8).zip(out.iter_mut()) {
                *dst = yuv16_to_rgba(
                    u16_at(p, 1),
                    u16_at(p, 0),
                    u16_at(p, 2),
                    u16_at(p, 3) as f32 / 65535.0,
                );
            }
        }
        F::Yuy2 => {
            for (pair, p) in src.chunks_exact(4).take(out.len().div_ceil(2)).enumerate() {
                let (y0, u, y1, v) = (p[0], p[1], p[2], p[3]);
                write_pair(out, pair, yuv8_to_rgba(y0, u, v, 1.0), yuv8_to_rgba(y1, u, v, 1.0));
            }
        }
        F::Y210 => {
            for (pair, p) in src.chunks_exact(8).take(out.len().div_ceil(2)).enumerate() {
                let [y0, u, y1, v] = [0, 1, 2, 3].map(|index| (u16_at(p, index) >> 6) as u32);
                write_pair(out, pair, yuv10_to_rgba(y0, u, v, 1.0), yuv10_to_rgba(y1, u, v, 1.0));
            }
        }
        F::Y216 => {
            for (pair, p) in src.chunks_exact(8).take(out.len().div_ceil(2)).enumerate() {
                let [y0, u, y1, v] = [0, 1, 2, 3].map(|index| u16_at(p, index));
                write_pair(out, pair, yuv16_to_rgba(y0, u, v, 1.0), yuv16_to_rgba(y1, u, v, 1.0));
            }
        }
        F::R8G8B8G8Unorm => {
            for (pair, p) in src.chunks_exact(4).take(out.len().div_ceil(2)).enumerate() {
                let [r, g0, b, g1] = [p[0], p[1], p[2], p[3]].map(|c| c as f32 / 255.0);
                write_pair(out, pair, [r, g0, b, 1.0], [r, g1, b, 1.0]);
            }
        }
        F::G8R8G8B8Unorm => {
            for (pair, p) in src.chunks_exact(4).take(out.len().div_ceil(2)).enumerate() {
                let [g0, r, g1, b] = [p[0], p[1], p[2], p[3]].map(|c| c as f32 / 255.0);
                write_pair(out, pair, [r, g0, b, 1.0], [r, g1, b, 1.0]);
            }
        }
        _ => return false,
    }

    true
}
