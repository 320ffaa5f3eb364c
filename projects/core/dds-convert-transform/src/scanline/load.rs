use super::{color::*, yuv::load_video_scanline, Vector};
use dds_convert_common::DxgiFormat;

#[inline(always)]
fn u16_at(p: &[u8], index: usize) -> u16 {
    u16::from_le_bytes([p[index * 2], p[index * 2 + 1]])
}

#[inline(always)]
fn u32_at(p: &[u8], index: usize) -> u32 {
    let i = index * 4;
    u32::from_le_bytes([p[i], p[i + 1], p[i + 2], p[i + 3]])
}

#[inline(always)]
fn f32_at(p: &[u8], index: usize) -> f32 {
    f32::from_bits(u32_at(p, index))
}

#[inline(always)]
fn i32_at(p: &[u8], index: usize) -> f32 {
    u32_at(p, index) as i32 as f32
}

#[inline(always)]
fn each(src: &[u8], size: usize, out: &mut [Vector], load: impl Fn(&[u8]) -> Vector) {
    for (pixel, dst) in src.chunks_exact(size).zip(out.iter_mut()) {
        *dst = load(pixel);
    }
}

/// Loads a row of pixels into RGBA `f32` values.
///
/// Missing channels load as 0 for colour and 1 for alpha. Normalized formats load into
/// `[0, 1]` (or `[-1, 1]` when signed), integer formats load their integer value. sRGB data is
/// returned as stored; see [`super::convert_color_space`].
///
/// # Parameters
///
/// - `src`: The row of pixel data.
/// - `format`: The format of `src`.
/// - `out`: One entry per pixel of the row.
///
/// # Returns
///
/// `false` if the format cannot be loaded (compressed, planar, typeless, palettized).
pub fn load_scanline(src: &[u8], format: DxgiFormat, out: &mut [Vector]) -> bool {
    use DxgiFormat as F;

    match format {
        F::R32G32B32A32Float => each(src, 16, out, |p| {
            [f32_at(p, 0), f32_at(p, 1), f32_at(p, 2), f32_at(p, 3)]
        }),
        F::R32G32B32A32Uint => each(src, 16, out, |p| {
            [0, 1, 2, 3].map(|i| u32_at(p, i) as f32)
        }),
        F::R32G32B32A32Sint => each(src, 16, out, |p| [0, 1, 2, 3].map(|i| i32_at(p, i))),
        F::R32G32B32Float => each(src, 12, out, |p| {
            [f32_at(p, 0), f32_at(p, 1), f32_at(p, 2), 1.0]
        }),
        F::R32G32B32Uint => each(src, 12, out, |p| {
            [u32_at(p, 0) as f32, u32_at(p, 1) as f32, u32_at(p, 2) as f32, 1.0]
        }),
        F::R32G32B32Sint => each(src, 12, out, |p| {
            [i32_at(p, 0), i32_at(p, 1), i32_at(p, 2), 1.0]
        }),
        F::R16G16B16A16Float => each(src, 8, out, |p| {
            [0, 1, 2, 3].map(|i| f16_to_f32(u16_at(p, i)))
        }),
        F::R16G16B16A16Unorm => each(src, 8, out, |p| {
            [0, 1, 2, 3].map(|i| unorm(u16_at(p, i) as u32, 0xFFFF))
        }),
        F::R16G16B16A16Uint => each(src, 8, out, |p| [0, 1, 2, 3].map(|i| u16_at(p, i) as f32)),
        F::R16G16B16A16Snorm => each(src, 8, out, |p| {
            [0, 1, 2, 3].map(|i| snorm16(u16_at(p, i)))
        }),
        F::R16G16B16A16Sint => each(src, 8, out, |p| {
            [0, 1, 2, 3].map(|i| u16_at(p, i) as i16 as f32)
        }),
        F::R32G32Float => each(src, 8, out, |p| [f32_at(p, 0), f32_at(p, 1), 0.0, 1.0]),
        F::R32G32Uint => each(src, 8, out, |p| {
            [u32_at(p, 0) as f32, u32_at(p, 1) as f32, 0.0, 1.0]
        }),
        F::R32G32Sint => each(src, 8, out, |p| [i32_at(p, 0), i32_at(p, 1), 0.0, 1.0]),
        F::D32FloatS8X24Uint => each(src, 8, out, |p| [f32_at(p, 0), p[4] as f32, 0.0, 1.0]),
        F::R10G10B10A2Unorm => each(src, 4, out, |p| {
            let v = u32_at(p, 0);
            [
                unorm(v & 0x3FF, 1023),
                unorm((v >> 10) & 0x3FF, 1023),
                unorm((v >> 20) & 0x3FF, 1023),
                unorm(v >> 30, 3),
            ]
        }),
        F::R10G10B10A2Uint => each(src, 4, out, |p| {
            let v = u32_at(p, 0);
            [
                (v & 0x3FF) as f32,
                ((v >> 10) & 0x3FF) as f32,
                ((v >> 20) & 0x3FF) as f32,
                (v >> 30) as f32,
            ]
        }),
        F::R10G10B10XrBiasA2Unorm => each(src, 4, out, |p| {
            let v = u32_at(p, 0);
            let xr = |bits: u32| (bits as f32 - 384.0) / 510.0;
            [
                xr(v & 0x3FF),
                xr((v >> 10) & 0x3FF),
                xr((v >> 20) & 0x3FF),
                unorm(v >> 30, 3),
            ]
        }),
        F::R11G11B10Float => each(src, 4, out, |p| {
            let v = u32_at(p, 0);
            [
                small_float_to_f32(v & 0x7FF, 6),
                small_float_to_f32((v >> 11) & 0x7FF, 6),
                small_float_to_f32(v >> 22, 5),
                1.0,
            ]
        }),
        F::R9G9B9E5SharedExp => each(src, 4, out, |p| {
            let [r, g, b] = shared_exponent_to_rgb(u32_at(p, 0));
            [r, g, b, 1.0]
        }),
        F::R8G8B8A8Unorm | F::R8G8B8A8UnormSrgb => each(src, 4, out, |p| {
            [p[0], p[1], p[2], p[3]].map(|c| unorm(c as u32, 255))
        }),
        F::R8G8B8A8Uint => each(src, 4, out, |p| [p[0], p[1], p[2], p[3]].map(|c| c as f32)),
        F::R8G8B8A8Snorm => each(src, 4, out, |p| [p[0], p[1], p[2], p[3]].map(snorm8)),
        F::R8G8B8A8Sint => each(src, 4, out, |p| {
            [p[0], p[1], p[2], p[3]].map(|c| c as i8 as f32)
        }),
        F::B8G8R8A8Unorm | F::B8G8R8A8UnormSrgb => each(src, 4, out, |p| {
            [p[2], p[1], p[0], p[3]].map(|c| unorm(c as u32, 255))
        }),
        F::B8G8R8X8Unorm | F::B8G8R8X8UnormSrgb => each(src, 4, out, |p| {
            let [r, g, b] = [p[2], p[1], p[0]].map(|c| unorm(c as u32, 255));
            [r, g, b, 1.0]
        }),
        F::R16G16Float => each(src, 4, out, |p| {
            [f16_to_f32(u16_at(p, 0)), f16_to_f32(u16_at(p, 1)), 0.0, 1.0]
        }),
        F::R16G16Unorm => each(src, 4, out, |p| {
            [
                unorm(u16_at(p, 0) as u32, 0xFFFF),
                unorm(u16_at(p, 1) as u32, 0xFFFF),
                0.0,
                1.0,
            ]
        }),
        F::R16G16Uint => each(src, 4, out, |p| {
            [u16_at(p, 0) as f32, u16_at(p, 1) as f32, 0.0, 1.0]
        }),
        F::R16G16Snorm => each(src, 4, out, |p| {
            [snorm16(u16_at(p, 0)), snorm16(u16_at(p, 1)), 0.0, 1.0]
        }),
        F::R16G16Sint => each(src, 4, out, |p| {
            [u16_at(p, 0) as i16 as f32, u16_at(p, 1) as i16 as f32, 0.0, 1.0]
        }),
        F::D32Float | F::R32Float => each(src, 4, out, |p| [f32_at(p, 0), 0.0, 0.0, 1.0]),
        F::R32Uint => each(src, 4, out, |p| [u32_at(p, 0) as f32, 0.0, 0.0, 1.0]),
        F::R32Sint => each(src, 4, out, |p| [i32_at(p, 0), 0.0, 0.0, 1.0]),
        F::D24UnormS8Uint => each(src, 4, out, |p| {
            let v = u32_at(p, 0);
            [unorm(v & 0xFF_FFFF, 0xFF_FFFF), (v >> 24) as f32, 0.0, 1.0]
        }),
        F::R8G8Unorm => each(src, 2, out, |p| {
            [unorm(p[0] as u32, 255), unorm(p[1] as u32, 255), 0.0, 1.0]
        }),
        F::R8G8Uint => each(src, 2, out, |p| [p[0] as f32, p[1] as f32, 0.0, 1.0]),
        F::R8G8Snorm => each(src, 2, out, |p| [snorm8(p[0]), snorm8(p[1]), 0.0, 1.0]),
        F::R8G8Sint => each(src, 2, out, |p| {
            [p[0] as i8 as f32, p[1] as i8 as f32, 0.0, 1.0]
        }),
        F::R16Float => each(src, 2, out, |p| [f16_to_f32(u16_at(p, 0)), 0.0, 0.0, 1.0]),
        F::D16Unorm | F::R16Unorm => each(src, 2, out, |p| {
            [unorm(u16_at(p, 0) as u32, 0xFFFF), 0.0, 0.0, 1.0]
        }),
        F::R16Uint => each(src, 2, out, |p| [u16_at(p, 0) as f32, 0.0, 0.0, 1.0]),
        F::R16Snorm => each(src, 2, out, |p| [snorm16(u16_at(p, 0)), 0.0, 0.0, 1.0]),
        F::R16Sint => each(src, 2, out, |p| [u16_at(p, 0) as i16 as f32, 0.0, 0.0, 1.0]),
        F::B5G6R5Unorm => each(src, 2, out, |p| {
            let v = u16_at(p, 0) as u32;
            [
                unorm((v >> 11) & 0x1F, 31),
                unorm((v >> 5) & 0x3F, 63),
                unorm(v & 0x1F, 31),
                1.0,
            ]
        }),
        F::B5G5R5A1Unorm => each(src, 2, out, |p| {
            let v = u16_at(p, 0) as u32;
            [
                unorm((v >> 10) & 0x1F, 31),
                unorm((v >> 5) & 0x1F, 31),
                unorm(v & 0x1F, 31),
                (v >> 15) as f32,
            ]
        }),
        F::B4G4R4A4Unorm => each(src, 2, out, |p| {
            let v = u16_at(p, 0) as u32;
            [
                unorm((v >> 8) & 0xF, 15),
                unorm((v >> 4) & 0xF, 15),
                unorm(v & 0xF, 15),
                unorm(v >> 12, 15),
            ]
        }),
        F::R8Unorm => each(src, 1, out, |p| [unorm(p[0] as u32, 255), 0.0, 0.0, 1.0]),
        F::R8Uint => each(src, 1, out, |p| [p[0] as f32, 0.0, 0.0, 1.0]),
        F::R8Snorm => each(src, 1, out, |p| [snorm8(p[0]), 0.0, 0.0, 1.0]),
        F::R8Sint => each(src, 1, out, |p| [p[0] as i8 as f32, 0.0, 0.0, 1.0]),
        F::A8Unorm => each(src, 1, out, |p| [0.0, 0.0, 0.0, unorm(p[0] as u32, 255)]),
        F::R1Unorm => {
            for (x, dst) in out.iter_mut().enumerate() {
                let Some(byte) = src.get(x / 8) else {
                    break;
                };
                let bit = (byte >> (7 - x % 8)) & 1;
                *dst = [bit as f32, 0.0, 0.0, 1.0];
            }
        }
        _ => return load_video_scanline(src, format, out),
    }

    true
}
