//! The output containers an image can be encoded into.

use core::fmt;

/// An output image container.
///
/// Discriminants match the codec numbering of the C interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Codec {
    Bmp = 1,
    Jpeg = 2,
    #[default]
    Png = 3,
    Tiff = 4,
    Gif = 5,
    /// JPEG XR. Recognized, but cannot be encoded.
    Wmp = 6,
    Ico = 7,
    /// Recognized, but cannot be encoded.
    Heif = 8,
}

impl Codec {
    /// Converts a raw codec number. `0` selects the default codec (PNG).
    ///
    /// # Returns
    ///
    /// `None` for unknown numbers.
    pub const fn from_raw(value: u32) -> Option<Self> {
        Some(match value {
            0 | 3 => Self::Png,
            1 => Self::Bmp,
            2 => Self::Jpeg,
            4 => Self::Tiff,
            5 => Self::Gif,
            6 => Self::Wmp,
            7 => Self::Ico,
            8 => Self::Heif,
            _ => return None,
        })
    }

    /// Finds a codec by its name or file extension, case insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "bmp" => Self::Bmp,
            "jpeg" | "jpg" => Self::Jpeg,
            "png" => Self::Png,
            "tiff" | "tif" => Self::Tiff,
            "gif" => Self::Gif,
            "wmp" | "jxr" => Self::Wmp,
            "ico" => Self::Ico,
            "heif" | "heic" => Self::Heif,
            _ => return None,
        })
    }

    /// Whether images can be encoded with this codec.
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Wmp | Self::Heif)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bmp => "BMP",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Tiff => "TIFF",
            Self::Gif => "GIF",
            Self::Wmp => "WMP",
            Self::Ico => "ICO",
            Self::Heif => "HEIF",
        }
    }

    /// The usual file extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Tiff => "tif",
            Self::Gif => "gif",
            Self::Wmp => "jxr",
            Self::Ico => "ico",
            Self::Heif => "heif",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
