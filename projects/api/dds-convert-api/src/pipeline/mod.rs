//! # Conversion Pipeline
//!
//! A DDS file is decoded into a [`ScratchImage`](dds_convert_common::ScratchImage) and passed
//! through a fixed sequence of [`Stage`]s, each of which runs only if the current image needs
//! it:
//!
//! 1. [`TypelessResolution`]: typeless formats become UNORM or FLOAT.
//! 2. [`PlanarUnpack`]: planar video formats are interleaved.
//! 3. [`Decompress`]: block compressed formats are decoded.
//! 4. [`Resize`]: the top mip level is resampled to the requested size.
//! 5. [`NormalMap`]: a normal map is derived from one channel, if requested.
//! 6. [`FormatConversion`]: otherwise, pixels are converted to the requested format.
//! 7. [`AlphaModeInference`]: the alpha mode is recorded.
//! 8. [`Encode`]: the first surface is written with the selected codec.
//!
//! Any failure stops the pipeline.

mod context;
pub mod stages;

pub use context::{ConvertedImage, PipelineContext};
pub use stages::*;

use crate::error::ConvertError;
use crate::options::ConversionOptions;
use log::{debug, trace};

/// A single step of the conversion pipeline.
pub trait Stage {
    /// Name used in log messages.
    fn name(&self) -> &'static str;

    /// Whether the stage has anything to do for the current image.
    fn applies(&self, context: &PipelineContext) -> bool;

    /// Runs the stage, replacing the image in the context on success.
    fn apply(&self, context: &mut PipelineContext) -> Result<(), ConvertError>;
}

/// Every stage, in the order they run.
pub const STAGES: &[&dyn Stage] = &[
    &TypelessResolution,
    &PlanarUnpack,
    &Decompress,
    &Resize,
    &NormalMap,
    &FormatConversion,
    &AlphaModeInference,
    &Encode,
];

/// Runs the stages that apply, in order.
///
/// # Errors
///
/// The error of the first stage that fails.
pub fn run_stages(context: &mut PipelineContext, stages: &[&dyn Stage]) -> Result<(), ConvertError> {
    for stage in stages {
        if !stage.applies(context) {
            trace!("{}: skipped", stage.name());
            continue;
        }

        let before = context.format();
        stage.apply(context)?;
        let metadata = context.image.metadata();
        debug!(
            "{}: {before} -> {} ({}x{}, {} mip(s))",
            stage.name(),
            metadata.format,
            metadata.width,
            metadata.height,
            metadata.mip_levels
        );
    }

    Ok(())
}

/// Converts an in-memory DDS file into an image file.
///
/// # Parameters
///
/// - `source`: The DDS file. Only borrowed for the duration of the call.
/// - `options`: How to convert it. [`ConversionOptions::default`] writes a PNG of the texture as
///   it is stored.
///
/// # Returns
///
/// The encoded image, the metadata of the image that was encoded and the properties to report.
///
/// # Errors
///
/// See [`ConvertError`]; [`ConvertError::kind`] tells whether the input, the options, the
/// texture format or memory was at fault.
///
/// # Examples
///
/// ```no_run
/// use dds_convert_api::{convert, Codec, ConversionOptions};
///
/// let dds = std::fs::read("texture.dds").unwrap();
/// let options = ConversionOptions::builder().codec(Codec::Jpeg).build();
/// let converted = convert(&dds, &options).unwrap();
/// std::fs::write("texture.jpg", &converted.data).unwrap();
/// ```
pub fn convert(source: &[u8], options: &ConversionOptions) -> Result<ConvertedImage, ConvertError> {
    let mut context = PipelineContext::decode(source, options)?;
    run_stages(&mut context, STAGES)?;
    Ok(context.finish())
}
