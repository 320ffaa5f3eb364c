//! Per component encodings shared by the scanline loaders and storers.

use super::Vector;
use half::f16;

/// Weights used to derive luminance from linear RGB.
pub const LUMINANCE: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Luminance of the RGB components of a pixel.
#[inline]
pub fn luminance(pixel: &Vector) -> f32 {
    pixel[0] * LUMINANCE[0] + pixel[1] * LUMINANCE[1] + pixel[2] * LUMINANCE[2]
}

#[inline]
pub fn unorm(value: u32, max: u32) -> f32 {
    value as f32 / max as f32
}

#[inline]
pub fn snorm8(value: u8) -> f32 {
    (value as i8 as f32 / 127.0).max(-1.0)
}

#[inline]
pub fn snorm16(value: u16) -> f32 {
    (value as i16 as f32 / 32767.0).max(-1.0)
}

/// Quantizes a value to an unsigned normalized integer with `max` as its largest value.
#[inline]
pub fn to_unorm(value: f32, max: u32) -> u32 {
    (value.clamp(0.0, 1.0) * max as f32).round() as u32
}

/// Quantizes a value to a signed normalized integer with `max` as its largest value.
#[inline]
pub fn to_snorm(value: f32, max: i32) -> i32 {
    (value.clamp(-1.0, 1.0) * max as f32).round() as i32
}

/// Clamps a value into an integer range, for the `UINT` and `SINT` formats.
#[inline]
pub fn to_int(value: f32, min: i64, max: i64) -> i64 {
    (value.round() as i64).clamp(min, max)
}

#[inline]
pub fn f16_to_f32(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

#[inline]
pub fn f32_to_f16(value: f32) -> u16 {
    f16::from_f32(value).to_bits()
}

/// Decodes an unsigned float with a 5 bit exponent and `mantissa_bits` mantissa bits,
/// as used by `R11G11B10_FLOAT`.
pub fn small_float_to_f32(bits: u32, mantissa_bits: u32) -> f32 {
    let exponent = (bits >> mantissa_bits) & 0x1F;
    let mantissa = bits & ((1 << mantissa_bits) - 1);
    let fraction = mantissa as f32 / (1 << mantissa_bits) as f32;

    match exponent {
        0 => fraction * 2f32.powi(-14),
        0x1F if mantissa == 0 => f32::INFINITY,
        0x1F => f32::NAN,
        _ => (1.0 + fraction) * 2f32.powi(exponent as i32 - 15),
    }
}

/// Encodes an unsigned float with a 5 bit exponent and `mantissa_bits` mantissa bits.
///
/// Negative values are stored as zero.
pub fn f32_to_small_float(value: f32, mantissa_bits: u32) -> u32 {
    if value.is_nan() {
        return (0x1F << mantissa_bits) | 1;
    }

    // Half floats share the exponent layout; only the mantissa needs truncating.
    let half = f32_to_f16(value.max(0.0)) as u32;
    (half >> (10 - mantissa_bits)) & ((1 << (mantissa_bits + 5)) - 1)
}

/// Decodes `R9G9B9E5_SHAREDEXP`.
pub fn shared_exponent_to_rgb(value: u32) -> [f32; 3] {
    let scale = 2f32.powi(((value >> 27) & 0x1F) as i32 - 15 - 9);
    [
        (value & 0x1FF) as f32 * scale,
        ((value >> 9) & 0x1FF) as f32 * scale,
        ((value >> 18) & 0x1FF) as f32 * scale,
    ]
}

/// Encodes `R9G9B9E5_SHAREDEXP`.
pub fn rgb_to_shared_exponent(rgb: [f32; 3]) -> u32 {
    const MAX: f32 = 65408.0; // (511 / 512) * 2^16
    let [r, g, b] = rgb.map(|value| if value.is_nan() { 0.0 } else { value.clamp(0.0, MAX) });
    let largest = r.max(g).max(b);
    if largest <= 0.0 {
        return 0;
    }

    let mut exponent = (largest.log2().floor() as i32).max(-16) + 16;
    let mut scale = 2f32.powi(exponent - 15 - 9);
    if (largest / scale).round() >= 512.0 {
        exponent += 1;
        scale *= 2.0;
    }

    let [r, g, b] = [r, g, b].map(|value| ((value / scale).round() as u32).min(511));
    r | (g << 9) | (b << 18) | ((exponent as u32) << 27)
}

/// Converts a single sRGB encoded component to linear.
#[inline]
pub fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts a single linear component to sRGB.
#[inline]
pub fn linear_to_srgb(value: f32) -> f32 {
    if value <= 0.0031308 {
        value * 12.92
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Applies `f` to the RGB components of every pixel, leaving alpha alone.
pub fn map_rgb(pixels: &mut [Vector], f: impl Fn(f32) -> f32) {
    for pixel in pixels {
        pixel[0] = f(pixel[0]);
        pixel[1] = f(pixel[1]);
        pixel[2] = f(pixel[2]);
    }
}
