//! Error reporting for C API.

use crate::error_channel::last_error_ptr;
use core::ffi::c_char;

/// Returns the message describing the last failure on the calling thread.
///
/// # Returns
///
/// A NUL terminated string; empty if nothing has failed on this thread yet.
///
/// # Safety
///
/// The string is owned by the library and stays valid until the next failing call on the same
/// thread. It must not be freed.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetError() -> *const c_char {
    last_error_ptr()
}
