//! Mapping of legacy (pre `DX10`) `DDS_PIXELFORMAT` descriptions to DXGI formats.

use super::constants::*;
use dds_convert_common::DxgiFormat;

/// A legacy pixel format read from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegacyPixelFormat {
    pub flags: u32,
    pub fourcc: u32,
    pub rgb_bit_count: u32,
    pub r_mask: u32,
    pub g_mask: u32,
    pub b_mask: u32,
    pub a_mask: u32,
}

/// A transformation applied to each row when copying a legacy format into its DXGI equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyConversion {
    /// Data is copied as is.
    #[default]
    None,
    /// 24-bit `B8G8R8` is expanded to `R8G8B8A8` with an opaque alpha.
    Expand888,
    /// 32-bit data without alpha; the unused byte is set to opaque.
    NoAlpha8888,
    /// 16-bit `X1R5G5B5`; the unused bit is set to opaque.
    NoAlpha5551,
    /// 16-bit `X4R4G4B4`; the unused nibble is set to opaque.
    NoAlpha4444,
}

impl LegacyConversion {
    /// Bits per pixel of the data as stored in the file, if it differs from the DXGI format.
    pub const fn source_bits_per_pixel(self) -> Option<u32> {
        match self {
            Self::Expand888 => Some(24),
            Self::None | Self::NoAlpha8888 | Self::NoAlpha5551 | Self::NoAlpha4444 => None,
        }
    }

    /// Converts a single row of `width` pixels.
    ///
    /// `src` holds the row as stored in the file, `dst` the row in the DXGI format.
    pub fn convert_row(self, src: &[u8], dst: &mut [u8], width: usize) {
        match self {
            Self::None => {
                let len = src.len().min(dst.len());
                dst[..len].copy_from_slice(&src[..len]);
            }
            Self::Expand888 => {
                for (bgr, rgba) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)).take(width) {
                    rgba.copy_from_slice(&[bgr[2], bgr[1], bgr[0], 255]);
                }
            }
            Self::NoAlpha8888 => {
                for (src, dst) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)).take(width) {
                    dst.copy_from_slice(&[src[0], src[1], src[2], 255]);
                }
            }
            Self::NoAlpha5551 => {
                for (src, dst) in src.chunks_exact(2).zip(dst.chunks_exact_mut(2)).take(width) {
                    dst.copy_from_slice(&[src[0], src[1] | 0x80]);
                }
            }
            Self::NoAlpha4444 => {
                for (src, dst) in src.chunks_exact(2).zip(dst.chunks_exact_mut(2)).take(width) {
                    dst.copy_from_slice(&[src[0], src[1] | 0xF0]);
                }
            }
        }
    }
}

impl LegacyPixelFormat {
    #[inline]
    fn masks_are(&self, r: u32, g: u32, b: u32, a: u32) -> bool {
        self.r_mask == r && self.g_mask == g && self.b_mask == b && self.a_mask == a
    }

    /// Determines the DXGI format (and any conversion needed) for this pixel format.
    ///
    /// # Returns
    ///
    /// `None` if the pixel format has no supported DXGI equivalent.
    pub fn to_dxgi(&self) -> Option<(DxgiFormat, LegacyConversion)> {
        use DxgiFormat as F;
        use LegacyConversion as C;

        if self.flags & DDPF_FOURCC != 0 {
            let format = match self.fourcc {
                FOURCC_DXT1 => F::Bc1Unorm,
                FOURCC_DXT2 | FOURCC_DXT3 => F::Bc2Unorm,
                FOURCC_DXT4 | FOURCC_DXT5 => F::Bc3Unorm,
                FOURCC_ATI1 | FOURCC_BC4U => F::Bc4Unorm,
                FOURCC_BC4S => F::Bc4Snorm,
                FOURCC_ATI2 | FOURCC_BC5U => F::Bc5Unorm,
                FOURCC_BC5S => F::Bc5Snorm,
                FOURCC_RGBG => F::R8G8B8G8Unorm,
                FOURCC_GRGB => F::G8R8G8B8Unorm,
                FOURCC_YUY2 => F::Yuy2,
                D3DFMT_A16B16G16R16 => F::R16G16B16A16Unorm,
                D3DFMT_Q16W16V16U16 => F::R16G16B16A16Snorm,
                D3DFMT_R16F => F::R16Float,
                D3DFMT_G16R16F => F::R16G16Float,
                D3DFMT_A16B16G16R16F => F::R16G16B16A16Float,
                D3DFMT_R32F => F::R32Float,
                D3DFMT_G32R32F => F::R32G32Float,
                D3DFMT_A32B32G32R32F => F::R32G32B32A32Float,
                _ => return None,
            };
            return Some((format, C::None));
        }

        let has_alpha = self.flags & DDPF_ALPHAPIXELS != 0;
        if self.flags & DDPF_RGB != 0 {
            return match self.rgb_bit_count {
                32 if self.masks_are(0xFF, 0xFF00, 0xFF0000, 0xFF000000) && has_alpha => {
                    Some((F::R8G8B8A8Unorm, C::None))
                }
                32 if self.masks_are(0xFF, 0xFF00, 0xFF0000, 0) => {
                    Some((F::R8G8B8A8Unorm, C::NoAlpha8888))
                }
                32 if self.masks_are(0xFF0000, 0xFF00, 0xFF, 0xFF000000) && has_alpha => {
                    Some((F::B8G8R8A8Unorm, C::None))
                }
                32 if self.masks_are(0xFF0000, 0xFF00, 0xFF, 0) => {
                    Some((F::B8G8R8X8Unorm, C::None))
                }
                // Many writers swapped the masks of 10:10:10:2 formats, this is what they
                // actually mean.
                32 if self.masks_are(0x3FF, 0xFFC00, 0x3FF00000, 0xC0000000) => {
                    Some((F::R10G10B10A2Unorm, C::None))
                }
                32 if self.masks_are(0xFFFF, 0xFFFF0000, 0, 0) => Some((F::R16G16Unorm, C::None)),
                32 if self.masks_are(0xFFFFFFFF, 0, 0, 0) => Some((F::R32Float, C::None)),
                24 if self.masks_are(0xFF0000, 0xFF00, 0xFF, 0) => {
                    Some((F::R8G8B8A8Unorm, C::Expand888))
                }
                16 if self.masks_are(0xF800, 0x07E0, 0x001F, 0) => Some((F::B5G6R5Unorm, C::None)),
                16 if self.masks_are(0x7C00, 0x03E0, 0x001F, 0x8000) => {
                    Some((F::B5G5R5A1Unorm, C::None))
                }
                16 if self.masks_are(0x7C00, 0x03E0, 0x001F, 0) => {
                    Some((F::B5G5R5A1Unorm, C::NoAlpha5551))
                }
                16 if self.masks_are(0x0F00, 0x00F0, 0x000F, 0xF000) => {
                    Some((F::B4G4R4A4Unorm, C::None))
                }
                16 if self.masks_are(0x0F00, 0x00F0, 0x000F, 0) => {
                    Some((F::B4G4R4A4Unorm, C::NoAlpha4444))
                }
                _ => None,
            };
        }

        if self.flags & DDPF_LUMINANCE != 0 {
            return match self.rgb_bit_count {
                8 if self.r_mask == 0xFF => Some((F::R8Unorm, C::None)),
                16 if self.r_mask == 0xFFFF => Some((F::R16Unorm, C::None)),
                16 if self.r_mask == 0xFF && self.a_mask == 0xFF00 => {
                    Some((F::R8G8Unorm, C::None))
                }
                _ => None,
            };
        }

        if self.flags & DDPF_ALPHA != 0 && self.rgb_bit_count == 8 {
            return Some((F::A8Unorm, C::None));
        }

        if self.flags & DDPF_BUMPDUDV != 0 {
            return match self.rgb_bit_count {
                16 if self.masks_are(0xFF, 0xFF00, 0, 0) => Some((F::R8G8Snorm, C::None)),
                32 if self.masks_are(0xFF, 0xFF00, 0xFF0000, 0xFF000000) => {
                    Some((F::R8G8B8A8Snorm, C::None))
                }
                32 if self.masks_are(0xFFFF, 0xFFFF0000, 0, 0) => Some((F::R16G16Snorm, C::None)),
                _ => None,
            };
        }

        None
    }

    /// Whether the format stores premultiplied alpha (`DXT2` and `DXT4`).
    pub fn is_premultiplied(&self) -> bool {
        self.flags & DDPF_FOURCC != 0 && matches!(self.fourcc, FOURCC_DXT2 | FOURCC_DXT4)
    }
}
