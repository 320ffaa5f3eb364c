//! # DXGI Pixel Formats
//!
//! The [`DxgiFormat`] enumeration mirrors `DXGI_FORMAT` as stored inside the `DX10` extended
//! header of a DDS file. Besides the raw values, this module provides the classification
//! queries needed when normalizing an arbitrary texture into something an image codec accepts:
//!
//! - [`DxgiFormat::is_typeless`]: the bit layout is known, but the numeric interpretation isn't.
//! - [`DxgiFormat::is_planar`]: luma and chroma live in separate planes.
//! - [`DxgiFormat::is_compressed`]: data is stored as 4x4 compressed blocks.
//! - [`DxgiFormat::has_alpha`]: the format carries a usable alpha channel.
//!
//! Typeless formats can be resolved with [`DxgiFormat::make_typeless_unorm`] and
//! [`DxgiFormat::make_typeless_float`].

use derive_enum_all_values::AllValues;

macro_rules! dxgi_formats {
    ($($variant:ident = $value:literal => $name:literal,)*) => {
        /// A `DXGI_FORMAT` value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
        #[repr(u32)]
        pub enum DxgiFormat {
            $($variant = $value,)*
        }

        impl DxgiFormat {
            /// Returns the name of the format, without the `DXGI_FORMAT_` prefix.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

dxgi_formats! {
    Unknown = 0 => "UNKNOWN",
    R32G32B32A32Typeless = 1 => "R32G32B32A32_TYPELESS",
    R32G32B32A32Float = 2 => "R32G32B32A32_FLOAT",
    R32G32B32A32Uint = 3 => "R32G32B32A32_UINT",
    R32G32B32A32Sint = 4 => "R32G32B32A32_SINT",
    R32G32B32Typeless = 5 => "R32G32B32_TYPELESS",
    R32G32B32Float = 6 => "R32G32B32_FLOAT",
    R32G32B32Uint = 7 => "R32G32B32_UINT",
    R32G32B32Sint = 8 => "R32G32B32_SINT",
    R16G16B16A16Typeless = 9 => "R16G16B16A16_TYPELESS",
    R16G16B16A16Float = 10 => "R16G16B16A16_FLOAT",
    R16G16B16A16Unorm = 11 => "R16G16B16A16_UNORM",
    R16G16B16A16Uint = 12 => "R16G16B16A16_UINT",
    R16G16B16A16Snorm = 13 => "R16G16B16A16_SNORM",
    R16G16B16A16Sint = 14 => "R16G16B16A16_SINT",
    R32G32Typeless = 15 => "R32G32_TYPELESS",
    R32G32Float = 16 => "R32G32_FLOAT",
    R32G32Uint = 17 => "R32G32_UINT",
    R32G32Sint = 18 => "R32G32_SINT",
    R32G8X24Typeless = 19 => "R32G8X24_TYPELESS",
    D32FloatS8X24Uint = 20 => "D32_FLOAT_S8X24_UINT",
    R32FloatX8X24Typeless = 21 => "R32_FLOAT_X8X24_TYPELESS",
    X32TypelessG8X24Uint = 22 => "X32_TYPELESS_G8X24_UINT",
    R10G10B10A2Typeless = 23 => "R10G10B10A2_TYPELESS",
    R10G10B10A2Unorm = 24 => "R10G10B10A2_UNORM",
    R10G10B10A2Uint = 25 => "R10G10B10A2_UINT",
    R11G11B10Float = 26 => "R11G11B10_FLOAT",
    R8G8B8A8Typeless = 27 => "R8G8B8A8_TYPELESS",
    R8G8B8A8Unorm = 28 => "R8G8B8A8_UNORM",
    R8G8B8A8UnormSrgb = 29 => "R8G8B8A8_UNORM_SRGB",
    R8G8B8A8Uint = 30 => "R8G8B8A8_UINT",
    R8G8B8A8Snorm = 31 => "R8G8B8A8_SNORM",
    R8G8B8A8Sint = 32 => "R8G8B8A8_SINT",
    R16G16Typeless = 33 => "R16G16_TYPELESS",
    R16G16Float = 34 => "R16G16_FLOAT",
    R16G16Unorm = 35 => "R16G16_UNORM",
    R16G16Uint = 36 => "R16G16_UINT",
    R16G16Snorm = 37 => "R16G16_SNORM",
    R16G16Sint = 38 => "R16G16_SINT",
    R32Typeless = 39 => "R32_TYPELESS",
    D32Float = 40 => "D32_FLOAT",
    R32Float = 41 => "R32_FLOAT",
    R32Uint = 42 => "R32_UINT",
    R32Sint = 43 => "R32_SINT",
    R24G8Typeless = 44 => "R24G8_TYPELESS",
    D24UnormS8Uint = 45 => "D24_UNORM_S8_UINT",
    R24UnormX8Typeless = 46 => "R24_UNORM_X8_TYPELESS",
    X24TypelessG8Uint = 47 => "X24_TYPELESS_G8_UINT",
    R8G8Typeless = 48 => "R8G8_TYPELESS",
    R8G8Unorm = 49 => "R8G8_UNORM",
    R8G8Uint = 50 => "R8G8_UINT",
    R8G8Snorm = 51 => "R8G8_SNORM",
    R8G8Sint = 52 => "R8G8_SINT",
    R16Typeless = 53 => "R16_TYPELESS",
    R16Float = 54 => "R16_FLOAT",
    D16Unorm = 55 => "D16_UNORM",
    R16Unorm = 56 => "R16_UNORM",
    R16Uint = 57 => "R16_UINT",
    R16Snorm = 58 => "R16_SNORM",
    R16Sint = 59 => "R16_SINT",
    R8Typeless = 60 => "R8_TYPELESS",
    R8Unorm = 61 => "R8_UNORM",
    R8Uint = 62 => "R8_UINT",
    R8Snorm = 63 => "R8_SNORM",
    R8Sint = 64 => "R8_SINT",
    A8Unorm = 65 => "A8_UNORM",
    R1Unorm = 66 => "R1_UNORM",
    R9G9B9E5SharedExp = 67 => "R9G9B9E5_SHAREDEXP",
    R8G8B8G8Unorm = 68 => "R8G8_B8G8_UNORM",
    G8R8G8B8Unorm = 69 => "G8R8_G8B8_UNORM",
    Bc1Typeless = 70 => "BC1_TYPELESS",
    Bc1Unorm = 71 => "BC1_UNORM",
    Bc1UnormSrgb = 72 => "BC1_UNORM_SRGB",
    Bc2Typeless = 73 => "BC2_TYPELESS",
    Bc2Unorm = 74 => "BC2_UNORM",
    Bc2UnormSrgb = 75 => "BC2_UNORM_SRGB",
    Bc3Typeless = 76 => "BC3_TYPELESS",
    Bc3Unorm = 77 => "BC3_UNORM",
    Bc3UnormSrgb = 78 => "BC3_UNORM_SRGB",
    Bc4Typeless = 79 => "BC4_TYPELESS",
    Bc4Unorm = 80 => "BC4_UNORM",
    Bc4Snorm = 81 => "BC4_SNORM",
    Bc5Typeless = 82 => "BC5_TYPELESS",
    Bc5Unorm = 83 => "BC5_UNORM",
    Bc5Snorm = 84 => "BC5_SNORM",
    B5G6R5Unorm = 85 => "B5G6R5_UNORM",
    B5G5R5A1Unorm = 86 => "B5G5R5A1_UNORM",
    B8G8R8A8Unorm = 87 => "B8G8R8A8_UNORM",
    B8G8R8X8Unorm = 88 => "B8G8R8X8_UNORM",
    R10G10B10XrBiasA2Unorm = 89 => "R10G10B10_XR_BIAS_A2_UNORM",
    B8G8R8A8Typeless = 90 => "B8G8R8A8_TYPELESS",
    B8G8R8A8UnormSrgb = 91 => "B8G8R8A8_UNORM_SRGB",
    B8G8R8X8Typeless = 92 => "B8G8R8X8_TYPELESS",
    B8G8R8X8UnormSrgb = 93 => "B8G8R8X8_UNORM_SRGB",
    Bc6hTypeless = 94 => "BC6H_TYPELESS",
    Bc6hUf16 = 95 => "BC6H_UF16",
    Bc6hSf16 = 96 => "BC6H_SF16",
    Bc7Typeless = 97 => "BC7_TYPELESS",
    Bc7Unorm = 98 => "BC7_UNORM",
    Bc7UnormSrgb = 99 => "BC7_UNORM_SRGB",
    Ayuv = 100 => "AYUV",
    Y410 = 101 => "Y410",
    Y416 = 102 => "Y416",
    Nv12 = 103 => "NV12",
    P010 = 104 => "P010",
    P016 = 105 => "P016",
    Opaque420 = 106 => "420_OPAQUE",
    Yuy2 = 107 => "YUY2",
    Y210 = 108 => "Y210",
    Y216 = 109 => "Y216",
    Nv11 = 110 => "NV11",
    Ai44 = 111 => "AI44",
    Ia44 = 112 => "IA44",
    P8 = 113 => "P8",
    A8P8 = 114 => "A8P8",
    B4G4R4A4Unorm = 115 => "B4G4R4A4_UNORM",
    P208 = 130 => "P208",
    V208 = 131 => "V208",
    V408 = 132 => "V408",
}

impl DxgiFormat {
    /// Converts a raw `DXGI_FORMAT` value into a [`DxgiFormat`].
    ///
    /// # Returns
    ///
    /// `None` if the value does not name a format known to this crate.
    pub fn from_raw(value: u32) -> Option<Self> {
        Self::all_values()
            .iter()
            .copied()
            .find(|format| *format as u32 == value)
    }

    /// Finds a format by name. Accepts both `BC1_UNORM` and `DXGI_FORMAT_BC1_UNORM`,
    /// case insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        let name = upper.strip_prefix("DXGI_FORMAT_").unwrap_or(&upper);
        Self::all_values()
            .iter()
            .copied()
            .find(|format| format.name() == name)
    }

    /// Whether the bit layout of the format is fixed but its numeric interpretation isn't.
    ///
    /// Includes the partially typeless depth/stencil formats.
    pub const fn is_typeless(self) -> bool {
        matches!(
            self,
            Self::R32G32B32A32Typeless
                | Self::R32G32B32Typeless
                | Self::R16G16B16A16Typeless
                | Self::R32G32Typeless
                | Self::R32G8X24Typeless
                | Self::R32FloatX8X24Typeless
                | Self::X32TypelessG8X24Uint
                | Self::R10G10B10A2Typeless
                | Self::R8G8B8A8Typeless
                | Self::R16G16Typeless
                | Self::R32Typeless
                | Self::R24G8Typeless
                | Self::R24UnormX8Typeless
                | Self::X24TypelessG8Uint
                | Self::R8G8Typeless
                | Self::R16Typeless
                | Self::R8Typeless
                | Self::Bc1Typeless
                | Self::Bc2Typeless
                | Self::Bc3Typeless
                | Self::Bc4Typeless
                | Self::Bc5Typeless
                | Self::B8G8R8A8Typeless
                | Self::B8G8R8X8Typeless
                | Self::Bc6hTypeless
                | Self::Bc7Typeless
        )
    }

    /// Whether the format is stored as 4x4 compressed blocks.
    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            Self::Bc1Typeless
                | Self::Bc1Unorm
                | Self::Bc1UnormSrgb
                | Self::Bc2Typeless
                | Self::Bc2Unorm
                | Self::Bc2UnormSrgb
                | Self::Bc3Typeless
                | Self::Bc3Unorm
                | Self::Bc3UnormSrgb
                | Self::Bc4Typeless
                | Self::Bc4Unorm
                | Self::Bc4Snorm
                | Self::Bc5Typeless
                | Self::Bc5Unorm
                | Self::Bc5Snorm
                | Self::Bc6hTypeless
                | Self::Bc6hUf16
                | Self::Bc6hSf16
                | Self::Bc7Typeless
                | Self::Bc7Unorm
                | Self::Bc7UnormSrgb
        )
    }

    /// Whether the format stores luma and chroma in separate planes.
    pub const fn is_planar(self) -> bool {
        matches!(
            self,
            Self::Nv12
                | Self::P010
                | Self::P016
                | Self::Opaque420
                | Self::Nv11
                | Self::P208
                | Self::V208
                | Self::V408
        )
    }

    /// Whether two horizontally adjacent pixels share chroma samples within one element.
    pub const fn is_packed(self) -> bool {
        matches!(
            self,
            Self::R8G8B8G8Unorm | Self::G8R8G8B8Unorm | Self::Yuy2 | Self::Y210 | Self::Y216
        )
    }

    /// Whether the format is a video (YUV or palettized) format.
    pub const fn is_video(self) -> bool {
        matches!(
            self,
            Self::Ayuv
                | Self::Y410
                | Self::Y416
                | Self::Nv12
                | Self::P010
                | Self::P016
                | Self::Opaque420
                | Self::Yuy2
                | Self::Y210
                | Self::Y216
                | Self::Nv11
                | Self::Ai44
                | Self::Ia44
                | Self::P8
                | Self::A8P8
                | Self::P208
                | Self::V208
                | Self::V408
        )
    }

    /// Whether colour values are stored in the sRGB colour space.
    pub const fn is_srgb(self) -> bool {
        matches!(
            self,
            Self::R8G8B8A8UnormSrgb
                | Self::Bc1UnormSrgb
                | Self::Bc2UnormSrgb
                | Self::Bc3UnormSrgb
                | Self::B8G8R8A8UnormSrgb
                | Self::B8G8R8X8UnormSrgb
                | Self::Bc7UnormSrgb
        )
    }

    /// Whether the format has a usable alpha channel.
    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::R32G32B32A32Typeless
                | Self::R32G32B32A32Float
                | Self::R32G32B32A32Uint
                | Self::R32G32B32A32Sint
                | Self::R16G16B16A16Typeless
                | Self::R16G16B16A16Float
                | Self::R16G16B16A16Unorm
                | Self::R16G16B16A16Uint
                | Self::R16G16B16A16Snorm
                | Self::R16G16B16A16Sint
                | Self::R10G10B10A2Typeless
                | Self::R10G10B10A2Unorm
                | Self::R10G10B10A2Uint
                | Self::R8G8B8A8Typeless
                | Self::R8G8B8A8Unorm
                | Self::R8G8B8A8UnormSrgb
                | Self::R8G8B8A8Uint
                | Self::R8G8B8A8Snorm
                | Self::R8G8B8A8Sint
                | Self::A8Unorm
                | Self::Bc1Typeless
                | Self::Bc1Unorm
                | Self::Bc1UnormSrgb
                | Self::Bc2Typeless
                | Self::Bc2Unorm
                | Self::Bc2UnormSrgb
                | Self::Bc3Typeless
                | Self::Bc3Unorm
                | Self::Bc3UnormSrgb
                | Self::B5G5R5A1Unorm
                | Self::B8G8R8A8Unorm
                | Self::R10G10B10XrBiasA2Unorm
                | Self::B8G8R8A8Typeless
                | Self::B8G8R8A8UnormSrgb
                | Self::Bc7Typeless
                | Self::Bc7Unorm
                | Self::Bc7UnormSrgb
                | Self::Ayuv
                | Self::Y410
                | Self::Y416
                | Self::Ai44
                | Self::Ia44
                | Self::A8P8
                | Self::B4G4R4A4Unorm
        )
    }

    /// Number of bits used by a single pixel; or by a 4x4 block divided by 16 for compressed
    /// formats. Returns 0 for [`DxgiFormat::Unknown`].
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::R32G32B32A32Typeless
            | Self::R32G32B32A32Float
            | Self::R32G32B32A32Uint
            | Self::R32G32B32A32Sint => 128,

            Self::R32G32B32Typeless
            | Self::R32G32B32Float
            | Self::R32G32B32Uint
            | Self::R32G32B32Sint => 96,

            Self::R16G16B16A16Typeless
            | Self::R16G16B16A16Float
            | Self::R16G16B16A16Unorm
            | Self::R16G16B16A16Uint
            | Self::R16G16B16A16Snorm
            | Self::R16G16B16A16Sint
            | Self::R32G32Typeless
            | Self::R32G32Float
            | Self::R32G32Uint
            | Self::R32G32Sint
            | Self::R32G8X24Typeless
            | Self::D32FloatS8X24Uint
            | Self::R32FloatX8X24Typeless
            | Self::X32TypelessG8X24Uint
            | Self::Y416
            | Self::Y210
            | Self::Y216 => 64,

            Self::R10G10B10A2Typeless
            | Self::R10G10B10A2Unorm
            | Self::R10G10B10A2Uint
            | Self::R11G11B10Float
            | Self::R8G8B8A8Typeless
            | Self::R8G8B8A8Unorm
            | Self::R8G8B8A8UnormSrgb
            | Self::R8G8B8A8Uint
            | Self::R8G8B8A8Snorm
            | Self::R8G8B8A8Sint
            | Self::R16G16Typeless
            | Self::R16G16Float
            | Self::R16G16Unorm
            | Self::R16G16Uint
            | Self::R16G16Snorm
            | Self::R16G16Sint
            | Self::R32Typeless
            | Self::D32Float
            | Self::R32Float
            | Self::R32Uint
            | Self::R32Sint
            | Self::R24G8Typeless
            | Self::D24UnormS8Uint
            | Self::R24UnormX8Typeless
            | Self::X24TypelessG8Uint
            | Self::R9G9B9E5SharedExp
            | Self::R8G8B8G8Unorm
            | Self::G8R8G8B8Unorm
            | Self::B8G8R8A8Unorm
            | Self::B8G8R8X8Unorm
            | Self::R10G10B10XrBiasA2Unorm
            | Self::B8G8R8A8Typeless
            | Self::B8G8R8A8UnormSrgb
            | Self::B8G8R8X8Typeless
            | Self::B8G8R8X8UnormSrgb
            | Self::Ayuv
            | Self::Y410
            | Self::Yuy2 => 32,

            Self::P010 | Self::P016 | Self::V408 => 24,

            Self::R8G8Typeless
            | Self::R8G8Unorm
            | Self::R8G8Uint
            | Self::R8G8Snorm
            | Self::R8G8Sint
            | Self::R16Typeless
            | Self::R16Float
            | Self::D16Unorm
            | Self::R16Unorm
            | Self::R16Uint
            | Self::R16Snorm
            | Self::R16Sint
            | Self::B5G6R5Unorm
            | Self::B5G5R5A1Unorm
            | Self::A8P8
            | Self::B4G4R4A4Unorm
            | Self::P208
            | Self::V208 => 16,

            Self::Nv12 | Self::Opaque420 | Self::Nv11 => 12,

            Self::R8Typeless
            | Self::R8Unorm
            | Self::R8Uint
            | Self::R8Snorm
            | Self::R8Sint
            | Self::A8Unorm
            | Self::Ai44
            | Self::Ia44
            | Self::P8
            | Self::Bc2Typeless
            | Self::Bc2Unorm
            | Self::Bc2UnormSrgb
            | Self::Bc3Typeless
            | Self::Bc3Unorm
            | Self::Bc3UnormSrgb
            | Self::Bc5Typeless
            | Self::Bc5Unorm
            | Self::Bc5Snorm
            | Self::Bc6hTypeless
            | Self::Bc6hUf16
            | Self::Bc6hSf16
            | Self::Bc7Typeless
            | Self::Bc7Unorm
            | Self::Bc7UnormSrgb => 8,

            Self::Bc1Typeless
            | Self::Bc1Unorm
            | Self::Bc1UnormSrgb
            | Self::Bc4Typeless
            | Self::Bc4Unorm
            | Self::Bc4Snorm => 4,

            Self::R1Unorm => 1,

            Self::Unknown => 0,
        }
    }

    /// Size of a single 4x4 block in bytes, for compressed formats.
    pub const fn block_size(self) -> Option<usize> {
        if !self.is_compressed() {
            return None;
        }

        Some((self.bits_per_pixel() as usize * 16) / 8)
    }

    /// Resolves a typeless format to its UNORM interpretation.
    ///
    /// Formats without a UNORM interpretation are returned unchanged.
    pub const fn make_typeless_unorm(self) -> Self {
        match self {
            Self::R16G16B16A16Typeless => Self::R16G16B16A16Unorm,
            Self::R10G10B10A2Typeless => Self::R10G10B10A2Unorm,
            Self::R8G8B8A8Typeless => Self::R8G8B8A8Unorm,
            Self::R16G16Typeless => Self::R16G16Unorm,
            Self::R8G8Typeless => Self::R8G8Unorm,
            Self::R16Typeless => Self::R16Unorm,
            Self::R8Typeless => Self::R8Unorm,
            Self::Bc1Typeless => Self::Bc1Unorm,
            Self::Bc2Typeless => Self::Bc2Unorm,
            Self::Bc3Typeless => Self::Bc3Unorm,
            Self::Bc4Typeless => Self::Bc4Unorm,
            Self::Bc5Typeless => Self::Bc5Unorm,
            Self::B8G8R8A8Typeless => Self::B8G8R8A8Unorm,
            Self::B8G8R8X8Typeless => Self::B8G8R8X8Unorm,
            Self::Bc7Typeless => Self::Bc7Unorm,
            other => other,
        }
    }

    /// Resolves a typeless format to its FLOAT interpretation.
    ///
    /// Formats without a FLOAT interpretation are returned unchanged.
    pub const fn make_typeless_float(self) -> Self {
        match self {
            Self::R32G32B32A32Typeless => Self::R32G32B32A32Float,
            Self::R32G32B32Typeless => Self::R32G32B32Float,
            Self::R16G16B16A16Typeless => Self::R16G16B16A16Float,
            Self::R32G32Typeless => Self::R32G32Float,
            Self::R16G16Typeless => Self::R16G16Float,
            Self::R32Typeless => Self::R32Float,
            Self::R16Typeless => Self::R16Float,
            other => other,
        }
    }

    /// Returns the sRGB variant of the format, if one exists.
    pub const fn make_srgb(self) -> Self {
        match self {
            Self::R8G8B8A8Unorm => Self::R8G8B8A8UnormSrgb,
            Self::Bc1Unorm => Self::Bc1UnormSrgb,
            Self::Bc2Unorm => Self::Bc2UnormSrgb,
            Self::Bc3Unorm => Self::Bc3UnormSrgb,
            Self::B8G8R8A8Unorm => Self::B8G8R8A8UnormSrgb,
            Self::B8G8R8X8Unorm => Self::B8G8R8X8UnormSrgb,
            Self::Bc7Unorm => Self::Bc7UnormSrgb,
            other => other,
        }
    }
}

impl core::fmt::Display for DxgiFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.name(), *self as u32)
    }
}
