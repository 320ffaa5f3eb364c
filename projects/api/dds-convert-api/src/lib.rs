#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod error;
pub mod error_channel;
pub mod options;
pub mod pipeline;
pub mod properties;
pub mod registry;

#[cfg(feature = "c-exports")]
pub mod c_api;

pub use dds_convert_codecs::Codec;
pub use dds_convert_common::{AlphaMode, DxgiFormat, TexMetadata};
pub use error::{ConvertError, ErrorKind};
pub use error_channel::{last_error, set_error};
pub use options::{
    parse_normal_map_options, ConversionOptions, ConversionOptionsBuilder, PipelineProfile,
    TypelessPreference,
};
pub use pipeline::{convert, ConvertedImage, Stage};
pub use properties::ImageProperties;
pub use registry::{convert_and_register, BufferHandle, BufferRegistry, RegisteredImage};

#[cfg(test)]
pub(crate) mod test_prelude;
