//! Unpacking of planar video formats into a single interleaved plane.
//!
//! | Planar            | Single plane | Chroma plane                        |
//! | ----------------- | ------------ | ----------------------------------- |
//! | `NV12`, `420_OPAQUE` | `YUY2`    | UV pairs, half width, half height   |
//! | `P010`            | `Y210`       | 16-bit UV pairs, half width, half height |
//! | `P016`            | `Y216`       | 16-bit UV pairs, half width, half height |
//! | `NV11`            | `YUY2`       | UV pairs, quarter width, full height |
//! | `P208`            | `YUY2`       | UV pairs, half width, full height   |
//! | `V208`            | `AYUV`       | separate U and V, full width, half height |
//! | `V408`            | `AYUV`       | separate U and V, full size         |

use crate::error::{TransformError, TransformResult};
use dds_convert_common::{DxgiFormat, ScratchImage, Surface};
use log::debug;

/// Returns the single plane format a planar format unpacks to.
///
/// # Returns
///
/// `None` if the format is not planar.
pub const fn single_plane_format(format: DxgiFormat) -> Option<DxgiFormat> {
    use DxgiFormat as F;

    Some(match format {
        F::Nv12 | F::Opaque420 | F::Nv11 | F::P208 => F::Yuy2,
        F::P010 => F::Y210,
        F::P016 => F::Y216,
        F::V208 | F::V408 => F::Ayuv,
        _ => return None,
    })
}

/// Unpacks every surface of a planar image into its single plane format.
///
/// # Errors
///
/// - [`TransformError::UnsupportedFormat`] if the image is not planar.
/// - [`TransformError::TruncatedSurface`] if a surface is missing plane data.
/// - [`TransformError::Allocate`] if the output could not be allocated.
pub fn convert_to_single_plane(image: &ScratchImage) -> TransformResult<ScratchImage> {
    let format = image.metadata().format;
    let target = single_plane_format(format).ok_or(TransformError::UnsupportedFormat {
        operation: "ConvertToSinglePlane",
        format,
    })?;

    let mut metadata = *image.metadata();
    metadata.format = target;
    let mut output = ScratchImage::initialize(metadata)?;
    debug!("Unpacking {format} into {target}");

    for (index, (src, dst)) in image
        .surfaces()
        .iter()
        .zip(output.surfaces_mut())
        .enumerate()
    {
        unpack_surface(src, dst).ok_or(TransformError::TruncatedSurface { index })?;
    }

    Ok(output)
}

fn unpack_surface(src: &Surface, dst: &mut Surface) -> Option<()> {
    use DxgiFormat as F;

    let height = src.height;
    let chroma_start = height;
    for y in 0..height {
        let luma = src.row(y)?;
        match src.format {
            F::Nv12 | F::Opaque420 => {
                interleave_u8(luma, src.row(chroma_start + y / 2)?, 2, dst.row_mut(y)?)
            }
            F::P208 => interleave_u8(luma, src.row(chroma_start + y)?, 2, dst.row_mut(y)?),
            F::Nv11 => interleave_u8(luma, src.row(chroma_start + y)?, 4, dst.row_mut(y)?),
            F::P010 | F::P016 => {
                interleave_u16(luma, src.row(chroma_start + y / 2)?, dst.row_mut(y)?)
            }
            F::V208 => {
                let chroma_height = height.div_ceil(2);
                let u = src.row(chroma_start + y / 2)?;
                let v = src.row(chroma_start + chroma_height + y / 2)?;
                merge_ayuv(luma, u, v, src.width, dst.row_mut(y)?);
            }
            F::V408 => {
                let u = src.row(chroma_start + y)?;
                let v = src.row(chroma_start + height + y)?;
                merge_ayuv(luma, u, v, src.width, dst.row_mut(y)?);
            }
            _ => return None,
        }
    }

    Some(())
}

/// Writes `Y0 U Y1 V` groups from an 8-bit luma row and a row of UV pairs, where each UV pair
/// covers `pixels_per_pair` luma samples.
fn interleave_u8(luma: &[u8], chroma: &[u8], pixels_per_pair: usize, dst: &mut [u8]) {
    for (x, out) in dst.chunks_exact_mut(4).enumerate() {
        let pair = (x * 2 / pixels_per_pair) * 2;
        let (Some(&u), Some(&v)) = (chroma.get(pair), chroma.get(pair + 1)) else {
            break;
        };
        let y0 = luma.get(x * 2).copied().unwrap_or(0);
        let y1 = luma.get(x * 2 + 1).copied().unwrap_or(0);
        out.copy_from_slice(&[y0, u, y1, v]);
    }
}

/// 16-bit version of [`interleave_u8`] with one UV pair per two pixels.
fn interleave_u16(luma: &[u8], chroma: &[u8], dst: &mut [u8]) {
    for (x, out) in dst.chunks_exact_mut(8).enumerate() {
        let (Some(y), Some(uv)) = (luma.get(x * 4..x * 4 + 4), chroma.get(x * 4..x * 4 + 4)) else {
            break;
        };
        out.copy_from_slice(&[y[0], y[1], uv[0], uv[1], y[2], y[3], uv[2], uv[3]]);
    }
}

/// Writes opaque `AYUV` pixels (`V U Y A` byte order) from separate planes.
fn merge_ayuv(luma: &[u8], u: &[u8], v: &[u8], width: usize, dst: &mut [u8]) {
    for (x, out) in dst.chunks_exact_mut(4).take(width).enumerate() {
        out.copy_from_slice(&[v[x], u[x], luma[x], 0xFF]);
    }
}
