//! DDS conversion for C API.

use super::{DdsConversionOptions, DdsImageProperties};
use crate::error::ConvertError;
use crate::error_channel::set_error;
use crate::pipeline::convert;
use crate::registry::{self, BufferRegistry, convert_and_register};
use core::slice;
use log::debug;

/// Converts an in-memory DDS file into an image file.
///
/// # Parameters
///
/// - `input`: Pointer to the DDS file
/// - `input_len`: Length of the DDS file in bytes
/// - `options`: Conversion options; a zeroed struct writes a PNG of the texture as is
/// - `out_buffer`: Receives a pointer to the encoded image, or null to discard the output
/// - `out_size`: Receives the size of the encoded image, or null
/// - `out_properties`: Receives the size of the image and the format of the DDS file, or null
///
/// # Returns
///
/// `true` on success. On failure nothing is written to the out parameters and [`GetError`]
/// describes the problem.
///
/// The buffer written to `out_buffer` must be released with [`FreeMemory`].
///
/// # Safety
///
/// - `input` must be valid for reads of `input_len` bytes
/// - `options.normal_map_options` must be null or a NUL terminated string
/// - Each out parameter must be null or valid for writes
///
/// [`GetError`]: crate::c_api::error::GetError
/// [`FreeMemory`]: crate::c_api::memory::FreeMemory
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ConvertDdsInMemory(
    input: *const u8,
    input_len: usize,
    options: DdsConversionOptions,
    out_buffer: *mut *mut u8,
    out_size: *mut usize,
    out_properties: *mut DdsImageProperties,
) -> bool {
    unsafe {
        convert_dds_into(
            registry::global(),
            input,
            input_len,
            options,
            out_buffer,
            out_size,
            out_properties,
        )
    }
}

/// [`ConvertDdsInMemory`] with the registry that takes ownership of the output.
///
/// # Safety
///
/// See [`ConvertDdsInMemory`].
pub unsafe fn convert_dds_into(
    registry: &BufferRegistry,
    input: *const u8,
    input_len: usize,
    options: DdsConversionOptions,
    out_buffer: *mut *mut u8,
    out_size: *mut usize,
    out_properties: *mut DdsImageProperties,
) -> bool {
    match unsafe { try_convert(registry, input, input_len, options, out_buffer) } {
        Ok((size, properties)) => {
            if !out_size.is_null() {
                unsafe { *out_size = size };
            }
            if !out_properties.is_null() {
                unsafe { *out_properties = properties };
            }
            true
        }
        Err(error) => {
            debug!("ConvertDdsInMemory failed ({:?}): {error}", error.kind());
            set_error(&error.to_string());
            false
        }
    }
}

unsafe fn try_convert(
    registry: &BufferRegistry,
    input: *const u8,
    input_len: usize,
    options: DdsConversionOptions,
    out_buffer: *mut *mut u8,
) -> Result<(usize, DdsImageProperties), ConvertError> {
    if input.is_null() {
        return Err(ConvertError::InvalidInput("input pointer is null"));
    }

    let source = unsafe { slice::from_raw_parts(input, input_len) };
    let options = unsafe { options.to_options() }?;

    if out_buffer.is_null() {
        let converted = convert(source, &options)?;
        return Ok((converted.data.len(), converted.properties.into()));
    }

    let registered = convert_and_register(source, &options, registry)?;
    unsafe { *out_buffer = registered.handle as *mut u8 };
    Ok((registered.len, registered.properties.into()))
}
