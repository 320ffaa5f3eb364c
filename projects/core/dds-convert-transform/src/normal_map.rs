//! Derivation of tangent space normal maps from a height channel.
//!
//! Heights are differentiated with a 3x3 central difference (a Sobel-like kernel without the
//! centre weighting). Pixels beyond the edges are either wrapped around or mirrored, per axis.
//! The optional occlusion term in alpha darkens pixels that sit below their neighbours.

use crate::error::{TransformError, TransformResult};
use crate::scanline::{can_load, can_store, color::luminance, load_scanline, store_scanline, Vector};
use dds_convert_common::{DxgiFormat, ScratchImage, Surface};
use log::debug;

/// The channel heights are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalMapChannel {
    #[default]
    Luminance,
    Red,
    Green,
    Blue,
    Alpha,
}

impl NormalMapChannel {
    #[inline]
    fn evaluate(self, pixel: &Vector) -> f32 {
        match self {
            Self::Luminance => luminance(pixel),
            Self::Red => pixel[0],
            Self::Green => pixel[1],
            Self::Blue => pixel[2],
            Self::Alpha => pixel[3],
        }
    }
}

/// Options for [`compute_normal_map`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalMapFlags {
    pub channel: NormalMapChannel,
    /// Mirror at the left and right edges instead of wrapping around.
    pub mirror_u: bool,
    /// Mirror at the top and bottom edges instead of wrapping around.
    pub mirror_v: bool,
    /// Negate the normals.
    pub invert_sign: bool,
    /// Store an occlusion term in alpha instead of 1.0.
    pub compute_occlusion: bool,
}

impl NormalMapFlags {
    pub fn new(channel: NormalMapChannel) -> Self {
        Self {
            channel,
            ..Self::default()
        }
    }
}

/// Creates a normal map from every surface of a height map.
///
/// # Parameters
///
/// - `image`: The height map. Must be in a format the scanline loader accepts.
/// - `flags`: Source channel and edge handling.
/// - `amplitude`: Scale applied to the height differences.
/// - `format`: Format of the normal map. For `UNORM` formats normals are biased into `[0, 1]`.
///
/// # Errors
///
/// - [`TransformError::UnsupportedFormat`] if the source or target format cannot be handled per
///   scanline.
/// - [`TransformError::TruncatedSurface`] if a surface has fewer rows than its height.
/// - [`TransformError::Allocate`] if the output could not be allocated.
pub fn compute_normal_map(
    image: &ScratchImage,
    flags: NormalMapFlags,
    amplitude: f32,
    format: DxgiFormat,
) -> TransformResult<ScratchImage> {
    let source = image.metadata().format;
    if !can_load(source) {
        return Err(TransformError::UnsupportedFormat {
            operation: "ComputeNormalMap",
            format: source,
        });
    }
    if !can_store(format) {
        return Err(TransformError::UnsupportedFormat {
            operation: "ComputeNormalMap",
            format,
        });
    }

    let mut metadata = *image.metadata();
    metadata.format = format;
    let mut output = ScratchImage::initialize(metadata)?;
    debug!("Computing normal map from {source} into {format} with {flags:?}");

    let unorm = format.name().contains("UNORM");
    for (index, (src, dst)) in image
        .surfaces()
        .iter()
        .zip(output.surfaces_mut())
        .enumerate()
    {
        NormalMapper::new(src, flags, amplitude, unorm)
            .run(dst)
            .ok_or(TransformError::TruncatedSurface { index })?;
    }

    Ok(output)
}

/// Works through one surface keeping three rows of heights, each padded with one value on
/// either side.
struct NormalMapper<'a> {
    src: &'a Surface,
    flags: NormalMapFlags,
    amplitude: f32,
    unorm: bool,
    scanline: Vec<Vector>,
}

impl<'a> NormalMapper<'a> {
    fn new(src: &'a Surface, flags: NormalMapFlags, amplitude: f32, unorm: bool) -> Self {
        Self {
            src,
            flags,
            amplitude,
            unorm,
            scanline: vec![[0.0; 4]; src.width],
        }
    }

    /// Loads row `y` into `heights`, which holds `width + 2` values.
    fn evaluate_row(&mut self, y: usize, heights: &mut [f32]) -> Option<()> {
        let width = self.src.width;
        load_scanline(self.src.row(y)?, self.src.format, &mut self.scanline);

        for (height, pixel) in heights[1..=width].iter_mut().zip(&self.scanline) {
            *height = self.flags.channel.evaluate(pixel);
        }

        if self.flags.mirror_u {
            heights[0] = heights[1];
            heights[width + 1] = heights[width];
        } else {
            heights[0] = heights[width];
            heights[width + 1] = heights[1];
        }

        Some(())
    }

    fn run(mut self, dst: &mut Surface) -> Option<()> {
        let width = self.src.width;
        let height = self.src.height;
        let stride = width + 2;

        let mut above = vec![0.0f32; stride];
        let mut current = vec![0.0f32; stride];
        let mut below = vec![0.0f32; stride];
        let mut normals: Vec<Vector> = vec![[0.0; 4]; width];
        let format = dst.format;

        self.evaluate_row(0, &mut current)?;
        if self.flags.mirror_v {
            above.copy_from_slice(&current);
        } else {
            self.evaluate_row(height - 1, &mut above)?;
        }
        if height > 1 {
            self.evaluate_row(1, &mut below)?;
        } else {
            below.copy_from_slice(&current);
        }

        for y in 0..height {
            for (x, normal) in normals.iter_mut().enumerate() {
                *normal = self.normal_at(&above, &current, &below, x);
            }
            store_scanline(dst.row_mut(y)?, format, &normals);

            // Rotate the rows and read the one below the next row.
            std::mem::swap(&mut above, &mut current);
            std::mem::swap(&mut current, &mut below);
            if y + 2 < height {
                self.evaluate_row(y + 2, &mut below)?;
            } else if self.flags.mirror_v {
                self.evaluate_row(height - 1, &mut below)?;
            } else {
                self.evaluate_row(0, &mut below)?;
            }
        }

        Some(())
    }

    fn normal_at(&self, row0: &[f32], row1: &[f32], row2: &[f32], x: usize) -> Vector {
        let amplitude = self.amplitude;

        let delta_zx = ((row0[x] - row0[x + 2]) + (row1[x] - row1[x + 2]) + (row2[x] - row2[x + 2]))
            * amplitude
            / 6.0;
        let delta_zy = ((row0[x] - row2[x])
            + (row0[x + 1] - row2[x + 1])
            + (row0[x + 2] - row2[x + 2]))
            * amplitude
            / 6.0;

        // Cross product of (-1, 0, dzx) and (0, -1, dzy).
        let length = (delta_zx * delta_zx + delta_zy * delta_zy + 1.0).sqrt();
        let normal = [delta_zx / length, delta_zy / length, 1.0 / length];

        let alpha = if self.flags.compute_occlusion {
            let centre = row1[x + 1];
            let neighbours = [
                row0[x],
                row0[x + 1],
                row0[x + 2],
                row1[x],
                row1[x + 2],
                row2[x],
                row2[x + 1],
                row2[x + 2],
            ];
            let delta = neighbours
                .iter()
                .map(|&height| (height - centre).max(0.0))
                .sum::<f32>()
                * 0.125
                * amplitude;

            if delta > 0.0 {
                let r = (1.0 + delta * delta).sqrt();
                (r - delta) / r
            } else {
                1.0
            }
        } else {
            1.0
        };

        let sign = if self.flags.invert_sign { -1.0 } else { 1.0 };
        let [x, y, z] = if self.unorm {
            normal.map(|component| sign * 0.5 * component + 0.5)
        } else {
            normal.map(|component| sign * component)
        };
        [x, y, z, alpha]
    }
}
