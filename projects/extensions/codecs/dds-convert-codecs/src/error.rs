use crate::codec::Codec;
use dds_convert_common::{allocate::AllocateError, DxgiFormat};
use thiserror::Error;

/// An error that happened while encoding an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The codec is recognized but has no encoder.
    #[error("Codec {0} is not supported")]
    UnsupportedCodec(Codec),

    /// The pixel format cannot be passed to a codec.
    #[error("Format {0} cannot be encoded")]
    UnsupportedFormat(DxgiFormat),

    /// The image is too large for the codec.
    #[error("{codec} cannot store images of {width}x{height}")]
    InvalidDimensions {
        codec: Codec,
        width: usize,
        height: usize,
    },

    /// The surface holds fewer bytes than its dimensions require.
    #[error("Surface is truncated")]
    TruncatedSurface,

    /// The codec itself failed.
    #[error("Codec failed: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Allocate(#[from] AllocateError),
}
