//! Ownership of output buffers handed across the C boundary.
//!
//! A buffer is registered under the address of its first byte. The caller only ever sees that
//! address and its length, and passes the address back to release the buffer.

use crate::error::ConvertError;
use crate::options::ConversionOptions;
use crate::pipeline::convert;
use crate::properties::ImageProperties;
use log::trace;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Opaque handle of a registered buffer; the address of its first byte.
pub type BufferHandle = usize;

/// A table of buffers owned on behalf of a caller.
#[derive(Debug, Default)]
pub struct BufferRegistry {
    buffers: Mutex<HashMap<BufferHandle, Box<[u8]>>>,
}

static GLOBAL: Lazy<BufferRegistry> = Lazy::new(BufferRegistry::new);

/// The process-wide registry used by the C exports.
pub fn global() -> &'static BufferRegistry {
    &GLOBAL
}

impl BufferRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<BufferHandle, Box<[u8]>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.buffers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes ownership of a buffer.
    ///
    /// # Returns
    ///
    /// The handle to release the buffer with, or `None` if the buffer is empty.
    /// Empty buffers have no unique address and are dropped instead.
    pub fn register(&self, buffer: Vec<u8>) -> Option<BufferHandle> {
        if buffer.is_empty() {
            return None;
        }

        let buffer = buffer.into_boxed_slice();
        let handle = buffer.as_ptr() as BufferHandle;
        trace!("Registering buffer {handle:#x} ({} bytes)", buffer.len());
        self.lock().insert(handle, buffer);
        Some(handle)
    }

    /// Destroys a registered buffer.
    ///
    /// # Returns
    ///
    /// `true` if the handle was registered. Unknown handles are ignored.
    pub fn release(&self, handle: BufferHandle) -> bool {
        let buffer = self.lock().remove(&handle);
        trace!("Releasing buffer {handle:#x} (known: {})", buffer.is_some());
        // Dropped outside the lock.
        buffer.is_some()
    }

    /// Length of a registered buffer.
    pub fn buffer_len(&self, handle: BufferHandle) -> Option<usize> {
        self.lock().get(&handle).map(|buffer| buffer.len())
    }

    /// Whether the handle refers to a registered buffer.
    pub fn contains(&self, handle: BufferHandle) -> bool {
        self.lock().contains_key(&handle)
    }

    /// Number of registered buffers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// An encoded image owned by a [`BufferRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredImage {
    /// Address of the first byte; pass to [`BufferRegistry::release`] when done.
    pub handle: BufferHandle,
    pub len: usize,
    pub properties: ImageProperties,
}

/// Converts a DDS file and hands the encoded image to `registry`.
///
/// Nothing is registered if the conversion fails.
///
/// # Errors
///
/// - Any error from [`convert`].
/// - [`ConvertError::EmptyOutput`] if the codec produced no bytes.
pub fn convert_and_register(
    source: &[u8],
    options: &ConversionOptions,
    registry: &BufferRegistry,
) -> Result<RegisteredImage, ConvertError> {
    let converted = convert(source, options)?;
    let len = converted.data.len();
    let handle = registry
        .register(converted.data)
        .ok_or(ConvertError::EmptyOutput)?;

    Ok(RegisteredImage {
        handle,
        len,
        properties: converted.properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use std::sync::Arc;

    #[test]
    fn register_then_release() {
        let registry = BufferRegistry::new();
        let buffer = vec![1, 2, 3];
        let address = buffer.as_ptr() as BufferHandle;

        let handle = registry.register(buffer).unwrap();
        assert_eq!(handle, address);
        assert!(registry.contains(handle));
        assert_eq!(registry.buffer_len(handle), Some(3));
        assert_eq!(registry.len(), 1);

        assert!(registry.release(handle));
        assert!(registry.is_empty());
    }

    #[test]
    fn release_is_idempotent() {
        let registry = BufferRegistry::new();
        let handle = registry.register(vec![0; 16]).unwrap();

        assert!(registry.release(handle));
        assert!(!registry.release(handle));
        assert!(!registry.release(0));
        assert!(registry.is_empty());
    }

    #[test]
    fn rejects_empty_buffers() {
        let registry = BufferRegistry::new();
        assert_eq!(registry.register(Vec::new()), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_handles_leave_other_entries() {
        let registry = BufferRegistry::new();
        let handle = registry.register(vec![7; 4]).unwrap();

        assert!(!registry.release(handle + 1));
        assert!(registry.contains(handle));
    }

    #[test]
    fn instances_are_independent() {
        let first = BufferRegistry::new();
        let second = BufferRegistry::new();
        let handle = first.register(vec![1]).unwrap();

        assert!(!second.release(handle));
        assert!(first.contains(handle));
    }

    #[test]
    fn concurrent_register_and_release() {
        let registry = Arc::new(BufferRegistry::new());
        let threads: Vec<_> = (0..8)
            .map(|thread| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let handle = registry.register(vec![thread as u8; 1 + i % 7]).unwrap();
                        assert!(registry.contains(handle));
                        assert!(registry.release(handle));
                    }
                })
            })
            .collect();

        for thread in threads {
            thread.join().unwrap();
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn convert_and_register_owns_output() {
        let registry = BufferRegistry::new();
        let registered =
            convert_and_register(&bc1_dds(4, 4), &ConversionOptions::default(), &registry).unwrap();

        assert_eq!(registry.buffer_len(registered.handle), Some(registered.len));
        assert_eq!(registered.properties.original_format, DxgiFormat::Bc1Unorm);
        assert!(registry.release(registered.handle));
        assert!(registry.is_empty());
    }

    #[test]
    fn failed_conversion_registers_nothing() {
        let registry = BufferRegistry::new();
        let result = convert_and_register(b"garbage", &ConversionOptions::default(), &registry);

        assert!(result.is_err());
        assert!(registry.is_empty());
    }
}
