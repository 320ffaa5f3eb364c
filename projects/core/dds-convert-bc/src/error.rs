use dds_convert_common::{allocate::AllocateError, DxgiFormat};
use thiserror::Error;

/// An error that happened while decompressing a block compressed image.
#[derive(Debug, Error)]
pub enum DecompressError {
    /// The format is not block compressed, or is a typeless block compressed format.
    #[error("Format {0} cannot be decompressed")]
    UnsupportedFormat(DxgiFormat),

    /// A surface holds fewer bytes than its dimensions require.
    #[error("Surface {index} is truncated: expected {expected} bytes, got {actual}")]
    TruncatedSurface {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Allocate(#[from] AllocateError),
}
