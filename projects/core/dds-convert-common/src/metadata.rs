//! Texture metadata tracked through the conversion pipeline.

use crate::dxgi_format::DxgiFormat;
use crate::format_class::FormatClass;

/// How the alpha channel of a texture relates to its colour channels.
///
/// Values match `DDS_ALPHA_MODE` from the `DX10` header's `miscFlags2` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum AlphaMode {
    /// Nothing is known about the alpha channel.
    #[default]
    Unknown = 0,
    /// Colour values are not multiplied by alpha.
    Straight = 1,
    /// Colour values are already multiplied by alpha.
    Premultiplied = 2,
    /// Every alpha value is at its maximum.
    Opaque = 3,
    /// Alpha holds something other than transparency.
    Custom = 4,
}

impl AlphaMode {
    /// Converts the low bits of a raw `miscFlags2` value.
    pub const fn from_raw(value: u32) -> Self {
        match value & 0x7 {
            1 => Self::Straight,
            2 => Self::Premultiplied,
            3 => Self::Opaque,
            4 => Self::Custom,
            _ => Self::Unknown,
        }
    }
}

/// Dimension of a texture resource.
///
/// Values match `D3D11_RESOURCE_DIMENSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum TexDimension {
    Texture1D = 2,
    #[default]
    Texture2D = 3,
    Texture3D = 4,
}

/// Describes the layout of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexMetadata {
    pub width: usize,
    pub height: usize,
    /// Depth of a volume texture; always 1 for 1D and 2D textures.
    pub depth: usize,
    /// Number of array items; a multiple of 6 for cube maps.
    pub array_size: usize,
    pub mip_levels: usize,
    pub format: DxgiFormat,
    pub dimension: TexDimension,
    pub alpha_mode: AlphaMode,
    pub is_cubemap: bool,
}

impl TexMetadata {
    /// Creates metadata for a single 2D surface with one mip level.
    pub fn new_2d(width: usize, height: usize, format: DxgiFormat) -> Self {
        Self {
            width,
            height,
            depth: 1,
            array_size: 1,
            mip_levels: 1,
            format,
            dimension: TexDimension::Texture2D,
            alpha_mode: AlphaMode::Unknown,
            is_cubemap: false,
        }
    }

    /// The [`FormatClass`] of the current format.
    pub fn format_class(&self) -> FormatClass {
        FormatClass::of(self.format)
    }

    /// Whether the alpha channel is already premultiplied.
    pub fn is_pm_alpha(&self) -> bool {
        self.alpha_mode == AlphaMode::Premultiplied
    }

    /// Number of surfaces (array items, mip levels and volume slices) the texture consists of.
    pub fn surface_count(&self) -> usize {
        match self.dimension {
            TexDimension::Texture3D => (0..self.mip_levels)
                .map(|mip| mip_extent(self.depth, mip))
                .sum(),
            TexDimension::Texture1D | TexDimension::Texture2D => {
                self.array_size * self.mip_levels
            }
        }
    }

    /// Width and height of every surface, in storage order.
    ///
    /// Yields [`surface_count`](Self::surface_count) entries without allocating any pixel data,
    /// so the size of a texture can be checked before it is created.
    pub fn surface_extents(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (items, depth) = match self.dimension {
            TexDimension::Texture3D => (1, Some(self.depth)),
            TexDimension::Texture1D | TexDimension::Texture2D => (self.array_size, None),
        };

        (0..items).flat_map(move |_| {
            (0..self.mip_levels).flat_map(move |mip| {
                let slices = depth.map_or(1, |depth| mip_extent(depth, mip));
                let extent = (mip_extent(self.width, mip), mip_extent(self.height, mip));
                core::iter::repeat_n(extent, slices)
            })
        })
    }

    /// Index of the surface for the given item, mip level and volume slice.
    ///
    /// # Returns
    ///
    /// `None` if any of the coordinates is out of range.
    pub fn surface_index(&self, mip: usize, item: usize, slice: usize) -> Option<usize> {
        if mip >= self.mip_levels {
            return None;
        }

        match self.dimension {
            TexDimension::Texture3D => {
                if item != 0 || slice >= mip_extent(self.depth, mip) {
                    return None;
                }

                let preceding: usize = (0..mip).map(|level| mip_extent(self.depth, level)).sum();
                Some(preceding + slice)
            }
            TexDimension::Texture1D | TexDimension::Texture2D => {
                if item >= self.array_size || slice != 0 {
                    return None;
                }

                Some(item * self.mip_levels + mip)
            }
        }
    }
}

/// Size of a texture dimension at the given mip level, never below 1.
#[inline]
pub fn mip_extent(size: usize, mip: usize) -> usize {
    size.checked_shr(mip as u32).unwrap_or(0).max(1)
}
