use dds_convert_common::{DxgiFormat, TexMetadata};

/// Properties of a converted image reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageProperties {
    /// Width of the encoded image.
    pub width: usize,
    /// Height of the encoded image.
    pub height: usize,
    /// Format of the texture before conversion, as stored in the DDS file.
    pub original_format: DxgiFormat,
}

impl ImageProperties {
    /// Combines the size of the final image with the format of the source texture.
    pub fn new(final_metadata: &TexMetadata, original_format: DxgiFormat) -> Self {
        Self {
            width: final_metadata.width,
            height: final_metadata.height,
            original_format,
        }
    }
}
