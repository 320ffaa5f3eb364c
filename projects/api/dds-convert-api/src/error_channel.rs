//! Per-thread storage of the last error message.
//!
//! Failures that cross the C boundary are reported as `false`; the message describing them is
//! kept here until the same thread fails again. Successful calls leave the message untouched.

use core::cell::RefCell;
use std::ffi::{CStr, CString};

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Replaces the calling thread's last error message.
///
/// Interior NUL bytes are dropped so the message stays a valid C string.
pub fn set_error(message: &str) {
    let bytes: Vec<u8> = message.bytes().filter(|&b| b != 0).collect();
    // Cannot fail; every NUL byte was filtered out above.
    let message = CString::new(bytes).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message));
}

/// Returns the calling thread's last error message, or an empty string if none was set.
pub fn last_error() -> String {
    with_last_error(|message| message.to_string_lossy().into_owned())
}

/// Calls `f` with the calling thread's last error message as a C string.
pub fn with_last_error<R>(f: impl FnOnce(&CStr) -> R) -> R {
    LAST_ERROR.with(|slot| f(slot.borrow().as_deref().unwrap_or(c"")))
}

/// Returns a pointer to the calling thread's last error message.
///
/// The pointer stays valid until the next [`set_error`] on this thread, or until the thread
/// exits.
pub fn last_error_ptr() -> *const core::ffi::c_char {
    // The CString lives in thread-local storage, so its buffer outlives the borrow.
    with_last_error(CStr::as_ptr)
}
