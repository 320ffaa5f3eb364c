//! Release of output buffers for C API.

use crate::registry;

/// Releases a buffer returned by [`ConvertDdsInMemory`].
///
/// # Parameters
///
/// - `buffer`: The pointer written to `out_buffer`. Null and unknown pointers are ignored, so
///   releasing a buffer twice is harmless.
///
/// # Safety
///
/// The buffer must not be read after it is released.
///
/// [`ConvertDdsInMemory`]: crate::c_api::convert::ConvertDdsInMemory
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn FreeMemory(buffer: *const u8) {
    if buffer.is_null() {
        return;
    }

    registry::global().release(buffer as usize);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::c_api::convert::ConvertDdsInMemory;
    use crate::c_api::DdsConversionOptions;
    use crate::test_prelude::*;
    use core::ptr;

    #[test]
    fn releases_converted_buffer_once() {
        let dds = bc1_dds(4, 4);
        let mut buffer = ptr::null_mut();

        let ok = unsafe {
            ConvertDdsInMemory(
                dds.as_ptr(),
                dds.len(),
                DdsConversionOptions::default(),
                &mut buffer,
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };
        assert!(ok);
        assert!(registry::global().contains(buffer as usize));

        unsafe {
            FreeMemory(buffer);
            FreeMemory(buffer);
            FreeMemory(ptr::null());
        }
        assert!(!registry::global().contains(buffer as usize));
    }
}
