//! Inspection of the alpha channel.

use crate::error::{TransformError, TransformResult};
use crate::scanline::{load_scanline, Vector};
use dds_convert_common::{AlphaMode, DxgiFormat, ScratchImage};

/// Smallest alpha value still considered opaque.
pub const OPAQUE_THRESHOLD: f32 = 0.997;

/// Checks whether every alpha value of every surface is (nearly) at its maximum.
///
/// Formats without alpha are always opaque.
///
/// # Errors
///
/// [`TransformError::UnsupportedFormat`] if the format cannot be loaded per scanline.
pub fn is_alpha_all_opaque(image: &ScratchImage) -> TransformResult<bool> {
    let format = image.metadata().format;
    if !format.has_alpha() {
        return Ok(true);
    }

    let mut pixels: Vec<Vector> = Vec::new();
    for (index, surface) in image.surfaces().iter().enumerate() {
        pixels.clear();
        pixels.resize(surface.width, [0.0; 4]);

        for y in 0..surface.height {
            let row = surface
                .row(y)
                .ok_or(TransformError::TruncatedSurface { index })?;
            if !load_scanline(row, format, &mut pixels) {
                return Err(TransformError::UnsupportedFormat {
                    operation: "IsAlphaAllOpaque",
                    format,
                });
            }

            if pixels.iter().any(|pixel| pixel[3] < OPAQUE_THRESHOLD) {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Determines the alpha mode an image should be reported with.
///
/// - Formats without alpha (and `A8_UNORM`, whose only channel is alpha) are
///   [`AlphaMode::Unknown`].
/// - Otherwise, images whose alpha is entirely opaque are [`AlphaMode::Opaque`].
/// - Otherwise an unknown mode becomes [`AlphaMode::Straight`], and any known mode is kept.
///
/// # Errors
///
/// [`TransformError::UnsupportedFormat`] if the alpha channel cannot be read.
pub fn resolve_alpha_mode(image: &ScratchImage) -> TransformResult<AlphaMode> {
    let metadata = image.metadata();
    if !metadata.format.has_alpha() || metadata.format == DxgiFormat::A8Unorm {
        return Ok(AlphaMode::Unknown);
    }

    if is_alpha_all_opaque(image)? {
        return Ok(AlphaMode::Opaque);
    }

    Ok(match metadata.alpha_mode {
        AlphaMode::Unknown => AlphaMode::Straight,
        mode => mode,
    })
}
