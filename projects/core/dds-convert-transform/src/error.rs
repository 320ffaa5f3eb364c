use dds_convert_common::{allocate::AllocateError, DxgiFormat};
use thiserror::Error;

/// An error that happened while transforming an image.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The transform does not support the format of the image, or the requested target format.
    #[error("{operation} does not support format {format}")]
    UnsupportedFormat {
        operation: &'static str,
        format: DxgiFormat,
    },

    /// A requested size is zero or larger than a texture may be.
    #[error("Invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A surface holds fewer bytes than its dimensions require.
    #[error("Surface {index} is truncated")]
    TruncatedSurface { index: usize },

    #[error(transparent)]
    Allocate(#[from] AllocateError),
}

/// Result type of the transforms.
pub type TransformResult<T> = Result<T, TransformError>;
