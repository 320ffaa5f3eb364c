//! Error types for the conversion pipeline.
//!
//! Every message starts with `ERROR` and names the operation that failed, so it can be passed
//! through the C interface as is.

use dds_convert_bc::DecompressError;
use dds_convert_codecs::EncodeError;
use dds_convert_common::DxgiFormat;
use dds_convert_dds::DdsError;
use dds_convert_transform::TransformError;
use thiserror::Error;

/// Broad classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source bytes are not a valid DDS file.
    Input,
    /// The conversion options are invalid or contradictory.
    Configuration,
    /// The texture uses something the pipeline cannot handle.
    Capability,
    /// Memory could not be allocated.
    Resource,
}

/// Errors that can occur while converting a texture.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source pointer or slice is unusable.
    #[error("ERROR Invalid input: {0}")]
    InvalidInput(&'static str),

    /// The DDS file could not be decoded.
    #[error("ERROR Failed to decode DDS file: {0}")]
    Decode(#[from] DdsError),

    /// A typeless texture needs exactly one of the UNORM and FLOAT preferences.
    #[error(
        "ERROR Image has a typeless format of: {0}, but exactly one of the UNORM or FLOAT typeless options must be set"
    )]
    AmbiguousTypelessPreference(DxgiFormat),

    /// The typeless format has no interpretation under the selected preference.
    #[error("ERROR Image has a typeless format of: {0}")]
    PersistentlyTypeless(DxgiFormat),

    #[error("ERROR Failed to unpack planar image: {0}")]
    Planar(#[source] TransformError),

    #[error("ERROR Failed to decompress image: {0}")]
    Decompress(#[from] DecompressError),

    #[error("ERROR Failed to resize image: {0}")]
    Resize(#[source] TransformError),

    #[error("ERROR Failed to convert image: {0}")]
    Convert(#[source] TransformError),

    #[error("ERROR Failed to compute normal map: {0}")]
    NormalMap(#[source] TransformError),

    #[error("ERROR Failed to inspect alpha channel: {0}")]
    Alpha(#[source] TransformError),

    /// No channel letter was found in the normal map options.
    #[error("ERROR Invalid value specified for normal map options ({0}), missing l, r, g, b, or a")]
    MissingNormalMapChannel(String),

    /// More than one channel letter was found in the normal map options.
    #[error(
        "ERROR Invalid value specified for normal map options ({0}), only one of l, r, g, b, or a may be given"
    )]
    DuplicateNormalMapChannel(String),

    #[error("ERROR Unknown codec value: {0}")]
    UnknownCodec(u32),

    #[error("ERROR Unknown DXGI format value: {0}")]
    UnknownFormat(u32),

    #[error("ERROR Unknown pipeline profile value: {0}")]
    UnknownProfile(u32),

    /// The final image could not be encoded.
    #[error("ERROR Failed to encode image: {0}")]
    Encode(#[from] EncodeError),

    /// The codec produced no bytes, so there is nothing to hand out.
    #[error("ERROR Encoder produced an empty image")]
    EmptyOutput,
}

/// Classifies an error raised by a transform.
fn transform_kind(error: &TransformError) -> ErrorKind {
    match error {
        TransformError::Allocate(_) => ErrorKind::Resource,
        TransformError::InvalidDimensions { .. } => ErrorKind::Configuration,
        TransformError::UnsupportedFormat { .. } | TransformError::TruncatedSurface { .. } => {
            ErrorKind::Capability
        }
    }
}

impl ConvertError {
    /// The class of the failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::Input,
            Self::Decode(DdsError::Allocate(_)) => ErrorKind::Resource,
            Self::Decode(_) => ErrorKind::Input,
            Self::AmbiguousTypelessPreference(_)
            | Self::MissingNormalMapChannel(_)
            | Self::DuplicateNormalMapChannel(_)
            | Self::UnknownCodec(_)
            | Self::UnknownFormat(_)
            | Self::UnknownProfile(_) => ErrorKind::Configuration,
            Self::PersistentlyTypeless(_) | Self::EmptyOutput => ErrorKind::Capability,
            Self::Planar(error)
            | Self::Resize(error)
            | Self::Convert(error)
            | Self::NormalMap(error)
            | Self::Alpha(error) => transform_kind(error),
            Self::Decompress(DecompressError::Allocate(_)) => ErrorKind::Resource,
            Self::Decompress(_) => ErrorKind::Capability,
            Self::Encode(EncodeError::UnsupportedCodec(_)) => ErrorKind::Configuration,
            Self::Encode(EncodeError::Allocate(_)) => ErrorKind::Resource,
            Self::Encode(_) => ErrorKind::Capability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(ConvertError::Decode(DdsError::NotADds), ErrorKind::Input)]
    #[case(ConvertError::UnknownCodec(9), ErrorKind::Configuration)]
    #[case(
        ConvertError::AmbiguousTypelessPreference(DxgiFormat::R16Typeless),
        ErrorKind::Configuration
    )]
    #[case(
        ConvertError::PersistentlyTypeless(DxgiFormat::R8G8B8A8Typeless),
        ErrorKind::Capability
    )]
    #[case(
        ConvertError::Encode(EncodeError::UnsupportedCodec(Codec::Heif)),
        ErrorKind::Configuration
    )]
    #[case(
        ConvertError::Encode(EncodeError::UnsupportedFormat(DxgiFormat::R8G8Unorm)),
        ErrorKind::Capability
    )]
    #[case(
        ConvertError::Resize(TransformError::InvalidDimensions { width: 0, height: 1 }),
        ErrorKind::Configuration
    )]
    #[case(
        ConvertError::Convert(TransformError::UnsupportedFormat {
            operation: "Convert",
            format: DxgiFormat::P8,
        }),
        ErrorKind::Capability
    )]
    fn classifies_errors(#[case] error: ConvertError, #[case] expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
    }

    #[test]
    fn messages_start_with_error() {
        let error = ConvertError::MissingNormalMapChannel("x".into());
        assert_eq!(
            error.to_string(),
            "ERROR Invalid value specified for normal map options (x), missing l, r, g, b, or a"
        );
        assert!(ConvertError::Decode(DdsError::NotADds).to_string().starts_with("ERROR "));
    }
}
