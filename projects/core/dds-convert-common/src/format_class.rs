//! Coarse classification of pixel formats.
//!
//! A texture moves through the classes in a fixed order while it is normalized:
//!
//! ```text
//! Typeless -> Planar -> Compressed -> Direct
//! ```
//!
//! Each class is left by exactly one pipeline stage, after which the texture is in a later class.

use crate::dxgi_format::DxgiFormat;

/// The class of a [`DxgiFormat`], carrying the format itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatClass {
    /// The numeric interpretation of the format is undefined.
    Typeless(DxgiFormat),
    /// Luma and chroma are stored in separate planes.
    Planar(DxgiFormat),
    /// Pixels are stored as compressed 4x4 blocks.
    Compressed(DxgiFormat),
    /// Pixels can be read element by element.
    Direct(DxgiFormat),
}

impl FormatClass {
    /// Classifies a format.
    ///
    /// Typeless takes priority over other classes, i.e. `BC1_TYPELESS` is [`FormatClass::Typeless`].
    pub const fn of(format: DxgiFormat) -> Self {
        if format.is_typeless() {
            Self::Typeless(format)
        } else if format.is_planar() {
            Self::Planar(format)
        } else if format.is_compressed() {
            Self::Compressed(format)
        } else {
            Self::Direct(format)
        }
    }

    /// The classified format.
    pub const fn format(self) -> DxgiFormat {
        match self {
            Self::Typeless(format)
            | Self::Planar(format)
            | Self::Compressed(format)
            | Self::Direct(format) => format,
        }
    }
}

impl From<DxgiFormat> for FormatClass {
    fn from(format: DxgiFormat) -> Self {
        Self::of(format)
    }
}
