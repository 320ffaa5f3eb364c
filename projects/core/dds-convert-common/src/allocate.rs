//! Fallible allocation of pixel buffers.
//!
//! Textures can declare dimensions far larger than what is actually available in memory,
//! so every image buffer is allocated through [`allocate_zeroed`], which reports failure
//! instead of aborting the process.

use std::collections::TryReserveError;
use thiserror::Error;

/// An error that happened in memory allocation within the library.
#[derive(Debug, Error)]
pub enum AllocateError {
    /// The requested size does not fit in the address space.
    #[error("Requested allocation size overflows: {width}x{height} of {format}")]
    SizeOverflow {
        width: usize,
        height: usize,
        format: &'static str,
    },

    /// The allocator could not provide the memory.
    #[error("Failed to allocate memory. {0}")]
    AllocationFailed(#[from] TryReserveError),
}

/// Allocates a zero filled buffer of `num_bytes` bytes.
///
/// # Returns
///
/// The buffer, or [`AllocateError::AllocationFailed`] if memory could not be reserved.
#[inline]
pub fn allocate_zeroed(num_bytes: usize) -> Result<Vec<u8>, AllocateError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(num_bytes)?;
    buffer.resize(num_bytes, 0);
    Ok(buffer)
}
