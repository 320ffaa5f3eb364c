//! # C API (FFI) Documentation
//!
//! *Note: The C API is only available when the `c-exports` feature is enabled.*
//!
//! Three functions are exported:
//!
//! - **`ConvertDdsInMemory(in, in_len, options, out_buffer, out_size, out_properties)`**: converts
//!   a DDS file into an image file. Returns `false` on failure.
//! - **`GetError()`**: the message describing the last failure on the calling thread.
//! - **`FreeMemory(buffer)`**: releases a buffer returned by `ConvertDdsInMemory`.
//!
//! ## Example Usage
//!
//! ```c
//! DdsConversionOptions options = {0}; // PNG, keep format and size
//! uint8_t* png = NULL;
//! size_t png_size = 0;
//! DdsImageProperties properties;
//!
//! if (!ConvertDdsInMemory(dds, dds_size, options, &png, &png_size, &properties)) {
//!     fprintf(stderr, "%s\n", GetError());
//!     return 1;
//! }
//!
//! fwrite(png, 1, png_size, file);
//! FreeMemory(png);
//! ```
//!
//! ## Ownership
//!
//! The output buffer belongs to the library until it is passed to `FreeMemory`. Releasing the
//! same buffer twice, or passing `NULL`, does nothing. The buffer must not be used after release.
//!
//! ## Error Handling
//!
//! Errors are kept per thread. The pointer returned by `GetError` stays valid until the next
//! failing call on the same thread; successful calls do not clear it.

pub mod convert;
pub mod error;
pub mod memory;

use crate::error::ConvertError;
use crate::options::{ConversionOptions, PipelineProfile};
use crate::properties::ImageProperties;
use core::ffi::{CStr, c_char};
use dds_convert_codecs::Codec;
use dds_convert_common::DxgiFormat;

/// FFI-safe version of [`ConversionOptions`].
///
/// Zero means "unspecified" for every numeric field, so a zeroed struct gives the default
/// conversion.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct DdsConversionOptions {
    /// Normal map options such as `"rmo"`, or null.
    pub normal_map_options: *const c_char,
    pub typeless_float: bool,
    pub typeless_unorm: bool,
    /// 0 = PNG, 1 BMP, 2 JPEG, 3 PNG, 4 TIFF, 5 GIF, 6 WMP, 7 ICO, 8 HEIF.
    pub codec: u32,
    /// `DXGI_FORMAT` value to convert to.
    pub format: u32,
    pub width: u32,
    pub height: u32,
    /// 0 = Extended, 1 = Standard.
    pub profile: u32,
}

impl Default for DdsConversionOptions {
    fn default() -> Self {
        Self {
            normal_map_options: core::ptr::null(),
            typeless_float: false,
            typeless_unorm: false,
            codec: 0,
            format: 0,
            width: 0,
            height: 0,
            profile: 0,
        }
    }
}

impl DdsConversionOptions {
    /// Converts the options into their Rust counterpart.
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnknownCodec`], [`ConvertError::UnknownFormat`] or
    /// [`ConvertError::UnknownProfile`] for values outside the documented ranges.
    ///
    /// # Safety
    ///
    /// `normal_map_options` must be null or point to a NUL terminated string.
    pub unsafe fn to_options(&self) -> Result<ConversionOptions, ConvertError> {
        let codec = Codec::from_raw(self.codec).ok_or(ConvertError::UnknownCodec(self.codec))?;
        let format = match self.format {
            0 => None,
            value => Some(DxgiFormat::from_raw(value).ok_or(ConvertError::UnknownFormat(value))?),
        };
        let profile =
            PipelineProfile::from_raw(self.profile).ok_or(ConvertError::UnknownProfile(self.profile))?;

        let normal_map = if self.normal_map_options.is_null() {
            None
        } else {
            let options = unsafe { CStr::from_ptr(self.normal_map_options) };
            Some(options.to_string_lossy().into_owned())
        };

        let dimension = |value: u32| (value != 0).then_some(value as usize);
        Ok(ConversionOptions {
            format,
            width: dimension(self.width),
            height: dimension(self.height),
            normal_map,
            typeless_unorm: self.typeless_unorm,
            typeless_float: self.typeless_float,
            codec,
            profile,
        })
    }
}

/// FFI-safe version of [`ImageProperties`].
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DdsImageProperties {
    pub width: u32,
    pub height: u32,
    /// `DXGI_FORMAT` of the source texture.
    pub format: u32,
}

impl From<ImageProperties> for DdsImageProperties {
    fn from(properties: ImageProperties) -> Self {
        Self {
            width: u32::try_from(properties.width).unwrap_or(u32::MAX),
            height: u32::try_from(properties.height).unwrap_or(u32::MAX),
            format: properties.original_format as u32,
        }
    }
}
