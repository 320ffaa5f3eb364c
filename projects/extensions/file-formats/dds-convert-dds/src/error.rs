use dds_convert_common::allocate::AllocateError;
use thiserror::Error;

/// Result type for DDS container operations.
pub type DdsResult<T> = Result<T, DdsError>;

/// Errors that can occur while reading or writing a DDS container.
#[derive(Debug, Error)]
pub enum DdsError {
    /// The data does not start with the `DDS ` magic, or is shorter than a header.
    #[error("Data is not a DDS file")]
    NotADds,

    /// A header field holds a value the reader cannot accept.
    #[error("Invalid DDS header: {0}")]
    InvalidHeader(&'static str),

    /// The `DX10` header names a DXGI format that is not known.
    #[error("Unsupported DXGI format {0}")]
    UnsupportedFormat(u32),

    /// A legacy pixel format has no supported DXGI equivalent.
    #[error("Unsupported legacy pixel format (flags: {flags:#X}, fourcc: {fourcc:#010X}, bits: {bit_count})")]
    UnsupportedLegacyFormat {
        flags: u32,
        fourcc: u32,
        bit_count: u32,
    },

    /// The file holds less pixel data than the header describes.
    #[error("DDS data is truncated: expected {expected} bytes, got {actual} bytes")]
    Truncated { expected: usize, actual: usize },

    #[error(transparent)]
    Allocate(#[from] AllocateError),
}
