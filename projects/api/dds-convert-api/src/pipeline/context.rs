use crate::error::ConvertError;
use crate::options::ConversionOptions;
use crate::properties::ImageProperties;
use dds_convert_codecs::EncodeError;
use dds_convert_common::{DxgiFormat, ScratchImage, TexMetadata};
use dds_convert_dds::load_from_dds_memory;
use dds_convert_transform::NormalMapFlags;
use log::{debug, warn};

/// State carried from one stage to the next.
#[derive(Debug)]
pub struct PipelineContext<'a> {
    pub options: &'a ConversionOptions,
    /// The current image. Replaced by every stage that produces a new one.
    pub image: ScratchImage,
    /// Format of the texture as stored in the file.
    pub original_format: DxgiFormat,
    /// Parsed normal map options.
    pub normal_map: Option<NormalMapFlags>,
    /// Encoded output, written by the final stage.
    pub output: Vec<u8>,
}

/// The result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedImage {
    /// The encoded image file.
    pub data: Vec<u8>,
    /// Metadata of the image that was encoded.
    pub metadata: TexMetadata,
    pub properties: ImageProperties,
}

impl<'a> PipelineContext<'a> {
    /// Validates the options and decodes the DDS file.
    ///
    /// The options are checked first, so a bad configuration is reported without touching the
    /// source.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::MissingNormalMapChannel`] or [`ConvertError::DuplicateNormalMapChannel`]
    ///   for bad normal map options.
    /// - [`ConvertError::Encode`] if the codec has no encoder.
    /// - [`ConvertError::Decode`] if the source is not a valid DDS file.
    pub fn decode(source: &[u8], options: &'a ConversionOptions) -> Result<Self, ConvertError> {
        let normal_map = options.normal_map_flags()?;
        if !options.codec.is_supported() {
            return Err(EncodeError::UnsupportedCodec(options.codec).into());
        }
        if options.target_size().is_some() && !options.profile.can_resize() {
            warn!(
                "Target size is ignored under the {:?} pipeline profile",
                options.profile
            );
        }

        let image = load_from_dds_memory(source)?;
        let original_format = image.metadata().format;
        debug!(
            "Decode: {}x{} {original_format}",
            image.metadata().width,
            image.metadata().height
        );

        Ok(Self {
            options,
            image,
            original_format,
            normal_map,
            output: Vec::new(),
        })
    }

    /// Format of the current image.
    pub fn format(&self) -> DxgiFormat {
        self.image.metadata().format
    }

    /// Format the image should end up in.
    ///
    /// The requested format, or the current one if none was given. `R8G8_UNORM` has no codec
    /// counterpart and is widened to `R32G32B32_FLOAT`.
    pub fn target_format(&self) -> DxgiFormat {
        match self.options.format.unwrap_or(self.format()) {
            DxgiFormat::R8G8Unorm => DxgiFormat::R32G32B32Float,
            format => format,
        }
    }

    /// Consumes the context once every stage has run.
    pub fn finish(self) -> ConvertedImage {
        let metadata = *self.image.metadata();
        ConvertedImage {
            data: self.output,
            properties: ImageProperties::new(&metadata, self.original_format),
            metadata,
        }
    }
}
