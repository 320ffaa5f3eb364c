use super::{color::*, Vector};
use dds_convert_common::DxgiFormat;

#[inline(always)]
fn each(dst: &mut [u8], size: usize, pixels: &[Vector], store: impl Fn(&mut [u8], &Vector)) {
    for (out, pixel) in dst.chunks_exact_mut(size).zip(pixels) {
        store(out, pixel);
    }
}

#[inline(always)]
fn put_u16s(out: &mut [u8], values: &[u16]) {
    for (chunk, value) in out.chunks_exact_mut(2).zip(values) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
}

#[inline(always)]
fn put_u32s(out: &mut [u8], values: &[u32]) {
    for (chunk, value) in out.chunks_exact_mut(4).zip(values) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
}

#[inline(always)]
fn put_f32s(out: &mut [u8], values: &[f32]) {
    for (chunk, value) in out.chunks_exact_mut(4).zip(values) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
}

#[inline(always)]
fn unorm8(value: f32) -> u8 {
    to_unorm(value, 255) as u8
}

#[inline(always)]
fn unorm16(value: f32) -> u16 {
    to_unorm(value, 0xFFFF) as u16
}

#[inline(always)]
fn snorm8(value: f32) -> u8 {
    to_snorm(value, 127) as i8 as u8
}

#[inline(always)]
fn snorm16(value: f32) -> u16 {
    to_snorm(value, 32767) as i16 as u16
}

#[inline(always)]
fn uint(value: f32, max: u32) -> u32 {
    to_int(value, 0, max as i64) as u32
}

#[inline(always)]
fn sint(value: f32, min: i32, max: i32) -> u32 {
    to_int(value, min as i64, max as i64) as i32 as u32
}

/// Stores a row of RGBA `f32` values in the given format.
///
/// Values are saturated to the range of the format. Channels the format does not have are
/// dropped.
///
/// # Returns
///
/// `false` if the format cannot be stored (compressed, planar, video, typeless, palettized).
pub fn store_scanline(dst: &mut [u8], format: DxgiFormat, pixels: &[Vector]) -> bool {
    use DxgiFormat as F;

    match format {
        F::R32G32B32A32Float => each(dst, 16, pixels, |o, p| put_f32s(o, p)),
        F::R32G32B32A32Uint => each(dst, 16, pixels, |o, p| {
            put_u32s(o, &p.map(|c| uint(c, u32::MAX)))
        }),
        F::R32G32B32A32Sint => each(dst, 16, pixels, |o, p| {
            put_u32s(o, &p.map(|c| sint(c, i32::MIN, i32::MAX)))
        }),
        F::R32G32B32Float => each(dst, 12, pixels, |o, p| put_f32s(o, &p[..3])),
        F::R32G32B32Uint => each(dst, 12, pixels, |o, p| {
            put_u32s(o, &p.map(|c| uint(c, u32::MAX))[..3])
        }),
        F::R32G32B32Sint => each(dst, 12, pixels, |o, p| {
            put_u32s(o, &p.map(|c| sint(c, i32::MIN, i32::MAX))[..3])
        }),
        F::R16G16B16A16Float => each(dst, 8, pixels, |o, p| put_u16s(o, &p.map(f32_to_f16))),
        F::R16G16B16A16Unorm => each(dst, 8, pixels, |o, p| put_u16s(o, &p.map(unorm16))),
        F::R16G16B16A16Uint => each(dst, 8, pixels, |o, p| {
            put_u16s(o, &p.map(|c| uint(c, 0xFFFF) as u16))
        }),
        F::R16G16B16A16Snorm => each(dst, 8, pixels, |o, p| put_u16s(o, &p.map(snorm16))),
        F::R16G16B16A16Sint => each(dst, 8, pixels, |o, p| {
            put_u16s(o, &p.map(|c| sint(c, i16::MIN as i32, i16::MAX as i32) as u16))
        }),
        F::R32G32Float => each(dst, 8, pixels, |o, p| put_f32s(o, &p[..2])),
        F::R32G32Uint => each(dst, 8, pixels, |o, p| {
            put_u32s(o, &[uint(p[0], u32::MAX), uint(p[1], u32::MAX)])
        }),
        F::R32G32Sint => each(dst, 8, pixels, |o, p| {
            put_u32s(
                o,
                &[sint(p[0], i32::MIN, i32::MAX), sint(p[1], i32::MIN, i32::MAX)],
            )
        }),
        F::D32FloatS8X24Uint => each(dst, 8, pixels, |o, p| {
            put_u32s(o, &[p[0].to_bits(), uint(p[1], 0xFF)])
        }),
        F::R10G10B10A2Unorm => each(dst, 4, pixels, |o, p| {
            let [r, g, b] = [p[0], p[1], p[2]].map(|c| to_unorm(c, 1023));
            put_u32s(o, &[r | (g << 10) | (b << 20) | (to_unorm(p[3], 3) << 30)])
        }),
        F::R10G10B10A2Uint => each(dst, 4, pixels, |o, p| {
            let [r, g, b] = [p[0], p[1], p[2]].map(|c| uint(c, 1023));
            put_u32s(o, &[r | (g << 10) | (b << 20) | (uint(p[3], 3) << 30)])
        }),
        F::R10G10B10XrBiasA2Unorm => each(dst, 4, pixels, |o, p| {
            let xr = |c: f32| ((c * 510.0 + 384.0).round() as i32).clamp(0, 1023) as u32;
            let [r, g, b] = [p[0], p[1], p[2]].map(xr);
            put_u32s(o, &[r | (g << 10) | (b << 20) | (to_unorm(p[3], 3) << 30)])
        }),
        F::R11G11B10Float => each(dst, 4, pixels, |o, p| {
            let r = f32_to_small_float(p[0], 6);
            let g = f32_to_small_float(p[1], 6);
            let b = f32_to_small_float(p[2], 5);
            put_u32s(o, &[r | (g << 11) | (b << 22)])
        }),
        F::R9G9B9E5SharedExp => each(dst, 4, pixels, |o, p| {
            put_u32s(o, &[rgb_to_shared_exponent([p[0], p[1], p[2]])])
        }),
        F::R8G8B8A8Unorm | F::R8G8B8A8UnormSrgb => {
            each(dst, 4, pixels, |o, p| o.copy_from_slice(&p.map(unorm8)))
        }
        F::R8G8B8A8Uint => each(dst, 4, pixels, |o, p| {
            o.copy_from_slice(&p.map(|c| uint(c, 0xFF) as u8))
        }),
        F::R8G8B8A8Snorm => each(dst, 4, pixels, |o, p| o.copy_from_slice(&p.map(snorm8))),
        F::R8G8B8A8Sint => each(dst, 4, pixels, |o, p| {
            o.copy_from_slice(&p.map(|c| sint(c, i8::MIN as i32, i8::MAX as i32) as u8))
        }),
        F::B8G8R8A8Unorm | F::B8G8R8A8UnormSrgb => each(dst, 4, pixels, |o, p| {
            o.copy_from_slice(&[p[2], p[1], p[0], p[3]].map(unorm8))
        }),
        F::B8G8R8X8Unorm | F::B8G8R8X8UnormSrgb => each(dst, 4, pixels, |o, p| {
            o.copy_from_slice(&[unorm8(p[2]), unorm8(p[1]), unorm8(p[0]), 0xFF])
        }),
        F::R16G16Float => each(dst, 4, pixels, |o, p| {
            put_u16s(o, &[f32_to_f16(p[0]), f32_to_f16(p[1])])
        }),
        F::R16G16Unorm => each(dst, 4, pixels, |o, p| put_u16s(o, &[unorm16(p[0]), unorm16(p[1])])),
        F::R16G16Uint => each(dst, 4, pixels, |o, p| {
            put_u16s(o, &[uint(p[0], 0xFFFF) as u16, uint(p[1], 0xFFFF) as u16])
        }),
        F::R16G16Snorm => each(dst, 4, pixels, |o, p| put_u16s(o, &[snorm16(p[0]), snorm16(p[1])])),
        F::R16G16Sint => each(dst, 4, pixels, |o, p| {
            let [r, g] = [p[0], p[1]].map(|c| sint(c, i16::MIN as i32, i16::MAX as i32) as u16);
            put_u16s(o, &[r, g])
        }),
        F::D32Float | F::R32Float => each(dst, 4, pixels, |o, p| put_f32s(o, &p[..1])),
        F::R32Uint => each(dst, 4, pixels, |o, p| put_u32s(o, &[uint(p[0], u32::MAX)])),
        F::R32Sint => each(dst, 4, pixels, |o, p| {
            put_u32s(o, &[sint(p[0], i32::MIN, i32::MAX)])
        }),
        F::D24UnormS8Uint => each(dst, 4, pixels, |o, p| {
            put_u32s(o, &[to_unorm(p[0], 0xFF_FFFF) | (uint(p[1], 0xFF) << 24)])
        }),
        F::R8G8Unorm => each(dst, 2, pixels, |o, p| o.copy_from_slice(&[unorm8(p[0]), unorm8(p[1])])),
        F::R8G8Uint => each(dst, 2, pixels, |o, p| {
            o.copy_from_slice(&[uint(p[0], 0xFF) as u8, uint(p[1], 0xFF) as u8])
        }),
        F::R8G8Snorm => each(dst, 2, pixels, |o, p| o.copy_from_slice(&[snorm8(p[0]), snorm8(p[1])])),
        F::R8G8Sint => each(dst, 2, pixels, |o, p| {
            let [r, g] = [p[0], p[1]].map(|c| sint(c, i8::MIN as i32, i8::MAX as i32) as u8);
            o.copy_from_slice(&[r, g])
        }),
        F::R16Float => each(dst, 2, pixels, |o, p| put_u16s(o, &[f32_to_f16(p[0])])),
        F::D16Unorm | F::R16Unorm => each(dst, 2, pixels, |o, p| put_u16s(o, &[unorm16(p[0])])),
        F::R16Uint => each(dst, 2, pixels, |o, p| put_u16s(o, &[uint(p[0], 0xFFFF) as u16])),
        F::R16Snorm => each(dst, 2, pixels, |o, p| put_u16s(o, &[snorm16(p[0])])),
        F::R16Sint => each(dst, 2, pixels, |o, p| {
            put_u16s(o, &[sint(p[0], i16::MIN as i32, i16::MAX as i32) as u16])
        }),
        F::B5G6R5Unorm => each(dst, 2, pixels, |o, p| {
            let value = (to_unorm(p[0], 31) << 11) | (to_unorm(p[1], 63) << 5) | to_unorm(p[2], 31);
            put_u16s(o, &[value as u16])
        }),
        F::B5G5R5A1Unorm => each(dst, 2, pixels, |o, p| {
            let value = (to_unorm(p[0], 31) << 10)
                | (to_unorm(p[1], 31) << 5)
                | to_unorm(p[2], 31)
                | (to_unorm(p[3], 1) << 15);
            put_u16s(o, &[value as u16])
        }),
        F::B4G4R4A4Unorm => each(dst, 2, pixels, |o, p| {
            let value = (to_unorm(p[0], 15) << 8)
                | (to_unorm(p[1], 15) << 4)
                | to_unorm(p[2], 15)
                | (to_unorm(p[3], 15) << 12);
            put_u16s(o, &[value as u16])
        }),
        F::R8Unorm => each(dst, 1, pixels, |o, p| o[0] = unorm8(p[0])),
        F::R8Uint => each(dst, 1, pixels, |o, p| o[0] = uint(p[0], 0xFF) as u8),
        F::R8Snorm => each(dst, 1, pixels, |o, p| o[0] = snorm8(p[0])),
        F::R8Sint => each(dst, 1, pixels, |o, p| {
            o[0] = sint(p[0], i8::MIN as i32, i8::MAX as i32) as u8
        }),
        F::A8Unorm => each(dst, 1, pixels, |o, p| o[0] = unorm8(p[3])),
        F::R1Unorm => {
            for (byte, chunk) in dst.iter_mut().zip(pixels.chunks(8)) {
                *byte = chunk
                    .iter()
                    .enumerate()
                    .filter(|(_, pixel)| pixel[0] > 0.25)
                    .fold(0u8, |bits, (bit, _)| bits | (0x80 >> bit));
            }
        }
        _ => return false,
    }

    true
}
