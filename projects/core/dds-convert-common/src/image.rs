//! # In-memory Images
//!
//! A [`ScratchImage`] owns every surface of a texture (array items, mip levels and volume
//! slices) along with the [`TexMetadata`] describing them. Surfaces are stored in the same order
//! DirectX uses: item-major for 1D/2D textures, and mip-major (then slice) for volume textures.
//!
//! Each pipeline stage consumes one [`ScratchImage`] and produces a new one, so at most two
//! are alive at any time.

use crate::allocate::{allocate_zeroed, AllocateError};
use crate::dxgi_format::DxgiFormat;
use crate::metadata::TexMetadata;

/// A single 2D surface of a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub width: usize,
    pub height: usize,
    pub format: DxgiFormat,
    /// Bytes between the starts of two consecutive rows (or rows of blocks).
    pub row_pitch: usize,
    /// Total number of bytes in the surface, including any extra planes.
    pub slice_pitch: usize,
    pub pixels: Vec<u8>,
}

impl Surface {
    /// Allocates a zeroed surface with pitches computed from the format.
    pub fn new(width: usize, height: usize, format: DxgiFormat) -> Result<Self, AllocateError> {
        let (row_pitch, slice_pitch) =
            compute_pitch(format, width, height).ok_or(AllocateError::SizeOverflow {
                width,
                height,
                format: format.name(),
            })?;

        Ok(Self {
            width,
            height,
            format,
            row_pitch,
            slice_pitch,
            pixels: allocate_zeroed(slice_pitch)?,
        })
    }

    /// Returns row `y` of the surface, or `None` if it is out of range.
    ///
    /// For compressed formats a row is a row of 4x4 blocks.
    #[inline]
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        let start = y.checked_mul(self.row_pitch)?;
        self.pixels.get(start..start + self.row_pitch)
    }

    /// Mutable version of [`Surface::row`].
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        let start = y.checked_mul(self.row_pitch)?;
        self.pixels.get_mut(start..start + self.row_pitch)
    }
}

/// An image consisting of one or more surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchImage {
    metadata: TexMetadata,
    surfaces: Vec<Surface>,
}

impl ScratchImage {
    /// Allocates zeroed surfaces for every item, mip level and slice described by `metadata`.
    pub fn initialize(metadata: TexMetadata) -> Result<Self, AllocateError> {
        let mut surfaces = Vec::new();
        surfaces.try_reserve_exact(metadata.surface_count())?;
        for (width, height) in metadata.surface_extents() {
            surfaces.push(Surface::new(width, height, metadata.format)?);
        }

        Ok(Self { metadata, surfaces })
    }

    /// Allocates a single 2D surface with one mip level.
    pub fn initialize_2d(
        width: usize,
        height: usize,
        format: DxgiFormat,
    ) -> Result<Self, AllocateError> {
        Self::initialize(TexMetadata::new_2d(width, height, format))
    }

    pub fn metadata(&self) -> &TexMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut TexMetadata {
        &mut self.metadata
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn surfaces_mut(&mut self) -> &mut [Surface] {
        &mut self.surfaces
    }

    /// Returns the surface at the given mip level, array item and volume slice.
    pub fn image(&self, mip: usize, item: usize, slice: usize) -> Option<&Surface> {
        let index = self.metadata.surface_index(mip, item, slice)?;
        self.surfaces.get(index)
    }

    /// Reinterprets the pixel data as another format with the same bit layout.
    ///
    /// # Returns
    ///
    /// `false` (leaving the image untouched) if the sizes of the formats differ.
    pub fn override_format(&mut self, format: DxgiFormat) -> bool {
        if format.bits_per_pixel() != self.metadata.format.bits_per_pixel() {
            return false;
        }

        self.metadata.format = format;
        for surface in &mut self.surfaces {
            surface.format = format;
        }

        true
    }
}

/// Computes the row and slice pitch of a surface.
///
/// # Returns
///
/// `(row_pitch, slice_pitch)` in bytes, or `None` if the size overflows
/// or the format is [`DxgiFormat::Unknown`].
pub fn compute_pitch(format: DxgiFormat, width: usize, height: usize) -> Option<(usize, usize)> {
    use DxgiFormat as F;

    if let Some(block_size) = format.block_size() {
        let blocks_wide = width.div_ceil(4).max(1);
        let blocks_high = height.div_ceil(4).max(1);
        let row = blocks_wide.checked_mul(block_size)?;
        return Some((row, row.checked_mul(blocks_high)?));
    }

    let half_width = width.checked_add(1)? >> 1;
    let half_height = height.checked_add(1)? >> 1;
    let (row, plane_rows) = match format {
        F::Unknown => return None,
        F::R8G8B8G8Unorm | F::G8R8G8B8Unorm | F::Yuy2 => (half_width.checked_mul(4)?, height),
        F::Y210 | F::Y216 => (half_width.checked_mul(8)?, height),
        F::Nv12 | F::Opaque420 => (half_width.checked_mul(2)?, height.checked_add(half_height)?),
        F::P010 | F::P016 => (half_width.checked_mul(4)?, height.checked_add(half_height)?),
        F::Nv11 => (
            (width.checked_add(3)? >> 2).checked_mul(4)?,
            height.checked_mul(2)?,
        ),
        F::P208 => (half_width.checked_mul(2)?, height.checked_mul(2)?),
        F::V208 => (width, height.checked_add(half_height.checked_mul(2)?)?),
        F::V408 => (width, height.checked_add((height >> 1).checked_mul(4)?)?),
        _ => {
            let bits = width.checked_mul(format.bits_per_pixel() as usize)?;
            (bits.checked_add(7)? / 8, height)
        }
    };

    Some((row, row.checked_mul(plane_rows)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(DxgiFormat::R8G8B8A8Unorm, 4, 4, 16, 64)]
    #[case(DxgiFormat::R32G32B32Float, 3, 2, 36, 72)]
    #[case(DxgiFormat::Bc1Unorm, 4, 4, 8, 8)]
    #[case(DxgiFormat::Bc1Unorm, 1, 1, 8, 8)]
    #[case(DxgiFormat::Bc3Unorm, 8, 5, 32, 64)]
    #[case(DxgiFormat::R1Unorm, 9, 2, 2, 4)]
    #[case(DxgiFormat::Yuy2, 3, 2, 8, 16)]
    #[case(DxgiFormat::Y216, 4, 1, 16, 16)]
    #[case(DxgiFormat::Nv12, 4, 4, 4, 24)]
    #[case(DxgiFormat::P010, 4, 4, 8, 48)]
    #[case(DxgiFormat::Nv11, 4, 2, 4, 16)]
    #[case(DxgiFormat::P208, 4, 2, 4, 16)]
    #[case(DxgiFormat::V208, 4, 4, 4, 32)]
    #[case(DxgiFormat::V408, 4, 4, 4, 48)]
    fn computes_pitches(
        #[case] format: DxgiFormat,
        #[case] width: usize,
        #[case] height: usize,
        #[case] row_pitch: usize,
        #[case] slice_pitch: usize,
    ) {
        assert_eq!(
            compute_pitch(format, width, height),
            Some((row_pitch, slice_pitch))
        );
    }

    #[test]
    fn compute_pitch_rejects_overflow_and_unknown() {
        assert_eq!(compute_pitch(DxgiFormat::R32G32B32A32Float, usize::MAX, 1), None);
        assert_eq!(compute_pitch(DxgiFormat::Unknown, 4, 4), None);
    }

    #[test]
    fn initialize_allocates_mip_chain() {
        let mut metadata = TexMetadata::new_2d(8, 4, DxgiFormat::R8G8B8A8Unorm);
        metadata.mip_levels = 4;

        let image = ScratchImage::initialize(metadata).unwrap();
        let sizes: Vec<_> = image
            .surfaces()
            .iter()
            .map(|surface| (surface.width, surface.height, surface.pixels.len()))
            .collect();

        assert_eq!(sizes, vec![(8, 4, 128), (4, 2, 32), (2, 1, 8), (1, 1, 4)]);
        assert_eq!(image.image(2, 0, 0).map(|s| s.width), Some(2));
    }

    #[test]
    fn override_format_requires_matching_size() {
        let mut image = ScratchImage::initialize_2d(4, 4, DxgiFormat::R8G8B8A8Typeless).unwrap();

        assert!(!image.override_format(DxgiFormat::R16G16B16A16Unorm));
        assert_eq!(image.metadata().format, DxgiFormat::R8G8B8A8Typeless);

        assert!(image.override_format(DxgiFormat::R8G8B8A8Unorm));
        assert_eq!(image.metadata().format, DxgiFormat::R8G8B8A8Unorm);
        assert_eq!(image.surfaces()[0].format, DxgiFormat::R8G8B8A8Unorm);
    }

    #[test]
    fn rows_are_bounded_by_surface() {
        let surface = Surface::new(2, 2, DxgiFormat::R8Unorm).unwrap();
        assert_eq!(surface.row(1).map(<[u8]>::len), Some(2));
        assert!(surface.row(2).is_none());
    }
}
