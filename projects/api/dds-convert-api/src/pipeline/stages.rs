//! The stages a texture passes through, in the order they run.

use super::{PipelineContext, Stage};
use crate::error::ConvertError;
use crate::options::TypelessPreference;
use dds_convert_bc::decompress;
use dds_convert_codecs::{encode, EncodeError};
use dds_convert_common::DxgiFormat;
use dds_convert_transform::{
    compute_normal_map, convert, convert_to_single_plane, resize, resolve_alpha_mode,
};

/// Height differences are used as is.
const NORMAL_MAP_AMPLITUDE: f32 = 1.0;

/// Gives a typeless texture a concrete interpretation without touching its bits.
pub struct TypelessResolution;

impl Stage for TypelessResolution {
    fn name(&self) -> &'static str {
        "TypelessResolution"
    }

    fn applies(&self, context: &PipelineContext) -> bool {
        context.format().is_typeless()
    }

    fn apply(&self, context: &mut PipelineContext) -> Result<(), ConvertError> {
        let format = context.format();
        let resolved = match context.options.typeless_preference() {
            Some(TypelessPreference::Unorm) => format.make_typeless_unorm(),
            Some(TypelessPreference::Float) => format.make_typeless_float(),
            None => return Err(ConvertError::AmbiguousTypelessPreference(format)),
        };

        if resolved.is_typeless() || !context.image.override_format(resolved) {
            return Err(ConvertError::PersistentlyTypeless(format));
        }
        Ok(())
    }
}

/// Interleaves the planes of a planar video texture.
pub struct PlanarUnpack;

impl Stage for PlanarUnpack {
    fn name(&self) -> &'static str {
        "PlanarUnpack"
    }

    fn applies(&self, context: &PipelineContext) -> bool {
        context.format().is_planar()
    }

    fn apply(&self, context: &mut PipelineContext) -> Result<(), ConvertError> {
        context.image = convert_to_single_plane(&context.image).map_err(ConvertError::Planar)?;
        Ok(())
    }
}

pub struct Decompress;

impl Stage for Decompress {
    fn name(&self) -> &'static str {
        "Decompress"
    }

    fn applies(&self, context: &PipelineContext) -> bool {
        context.format().is_compressed()
    }

    fn apply(&self, context: &mut PipelineContext) -> Result<(), ConvertError> {
        context.image = decompress(&context.image)?;
        Ok(())
    }
}

/// Resamples the texture to the requested size, keeping only the top mip level.
pub struct Resize;

impl Resize {
    fn target_size(context: &PipelineContext) -> Option<(usize, usize)> {
        if !context.options.profile.can_resize() {
            return None;
        }

        let metadata = context.image.metadata();
        context
            .options
            .target_size()
            .filter(|&size| size != (metadata.width, metadata.height))
    }
}

impl Stage for Resize {
    fn name(&self) -> &'static str {
        "Resize"
    }

    fn applies(&self, context: &PipelineContext) -> bool {
        Self::target_size(context).is_some()
    }

    fn apply(&self, context: &mut PipelineContext) -> Result<(), ConvertError> {
        if let Some((width, height)) = Self::target_size(context) {
            context.image = resize(&context.image, width, height).map_err(ConvertError::Resize)?;
        }
        Ok(())
    }
}

/// Derives a normal map from one channel of the texture. Replaces [`FormatConversion`].
pub struct NormalMap;

impl Stage for NormalMap {
    fn name(&self) -> &'static str {
        "NormalMap"
    }

    fn applies(&self, context: &PipelineContext) -> bool {
        context.normal_map.is_some()
    }

    fn apply(&self, context: &mut PipelineContext) -> Result<(), ConvertError> {
        let Some(flags) = context.normal_map else {
            return Ok(());
        };

        let target = context.target_format();
        let format = match (target.is_compressed(), flags.compute_occlusion) {
            (false, _) => target,
            (true, true) => DxgiFormat::R32G32B32A32Float,
            (true, false) => DxgiFormat::R32G32B32Float,
        };

        context.image = compute_normal_map(&context.image, flags, NORMAL_MAP_AMPLITUDE, format)
            .map_err(ConvertError::NormalMap)?;
        Ok(())
    }
}

/// Converts the pixels to the target format. Compressed targets are not re-compressed.
pub struct FormatConversion;

impl Stage for FormatConversion {
    fn name(&self) -> &'static str {
        "FormatConversion"
    }

    fn applies(&self, context: &PipelineContext) -> bool {
        let target = context.target_format();
        context.normal_map.is_none() && target != context.format() && !target.is_compressed()
    }

    fn apply(&self, context: &mut PipelineContext) -> Result<(), ConvertError> {
        let target = context.target_format();
        context.image = convert(&context.image, target).map_err(ConvertError::Convert)?;
        Ok(())
    }
}

/// Records whether the alpha channel is opaque, straight or premultiplied.
pub struct AlphaModeInference;

impl Stage for AlphaModeInference {
    fn name(&self) -> &'static str {
        "AlphaMode"
    }

    fn applies(&self, _context: &PipelineContext) -> bool {
        true
    }

    fn apply(&self, context: &mut PipelineContext) -> Result<(), ConvertError> {
        let mode = resolve_alpha_mode(&context.image).map_err(ConvertError::Alpha)?;
        context.image.metadata_mut().alpha_mode = mode;
        Ok(())
    }
}

/// Encodes the first surface (item 0, mip 0, slice 0) with the selected codec.
pub struct Encode;

impl Stage for Encode {
    fn name(&self) -> &'static str {
        "Encode"
    }

    fn applies(&self, _context: &PipelineContext) -> bool {
        true
    }

    fn apply(&self, context: &mut PipelineContext) -> Result<(), ConvertError> {
        let surface = context
            .image
            .image(0, 0, 0)
            .ok_or(EncodeError::TruncatedSurface)?;
        context.output = encode(surface, context.options.codec)?;
        Ok(())
    }
}
