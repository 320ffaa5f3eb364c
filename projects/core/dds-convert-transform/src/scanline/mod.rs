//! Row level access to pixel data of any direct (non-compressed, non-planar) format.
//!
//! Every transform reads a row with [`load_scanline`] into RGBA [`Vector`]s, works on those,
//! and writes the row back with [`store_scanline`].

pub mod color;
pub mod load;
pub mod store;
pub mod yuv;

pub use load::load_scanline;
pub use store::store_scanline;

use dds_convert_common::DxgiFormat;

/// A single RGBA pixel.
pub type Vector = [f32; 4];

/// Whether rows of the format can be read with [`load_scanline`].
pub fn can_load(format: DxgiFormat) -> bool {
    let probe = [0u8; 16];
    let mut out = [[0.0; 4]; 1];
    load_scanline(&probe, format, &mut out)
}

/// Whether rows of the format can be written with [`store_scanline`].
pub fn can_store(format: DxgiFormat) -> bool {
    let mut probe = [0u8; 16];
    store_scanline(&mut probe, format, &[[0.0; 4]])
}

/// Moves loaded pixels between the sRGB and linear colour spaces when going from `source` to
/// `target`.
///
/// Nothing happens if both formats are in the same colour space.
pub fn convert_color_space(pixels: &mut [Vector], source: DxgiFormat, target: DxgiFormat) {
    match (source.is_srgb(), target.is_srgb()) {
        (true, false) => color::map_rgb(pixels, color::srgb_to_linear),
        (false, true) => color::map_rgb(pixels, color::linear_to_srgb),
        _ => {}
    }
}
