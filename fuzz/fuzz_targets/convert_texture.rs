#![no_main]

// Builds a well formed DDS file of an arbitrary format and size, then converts it with arbitrary
// options. Every stage must either succeed or fail with an error; a success must produce a
// non-typeless, encodable image of the requested size.

use dds_convert_api::{convert, Codec, ConversionOptions, DxgiFormat, PipelineProfile};
use dds_convert_common::{ScratchImage, TexMetadata};
use dds_convert_dds::save_to_dds_memory;
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Input {
    pub format: u8,
    pub target_format: u8,
    pub width: u8,
    pub height: u8,
    pub mip_levels: u8,
    pub target_size: Option<(u8, u8)>,
    pub normal_map: Option<String>,
    pub codec: u8,
    pub typeless_unorm: bool,
    pub typeless_float: bool,
    pub standard_profile: bool,
    pub pixels: Vec<u8>,
}

fn pick_format(index: u8) -> DxgiFormat {
    let formats = DxgiFormat::all_values();
    formats[index as usize % formats.len()]
}

fuzz_target!(|input: Input| {
    let format = pick_format(input.format);
    let width = (input.width as usize % 64) + 1;
    let height = (input.height as usize % 64) + 1;
    let metadata = TexMetadata {
        mip_levels: (input.mip_levels as usize % 3) + 1,
        ..TexMetadata::new_2d(width, height, format)
    };

    let Ok(mut image) = ScratchImage::initialize(metadata) else {
        return;
    };
    if !input.pixels.is_empty() {
        for surface in image.surfaces_mut() {
            for (byte, value) in surface.pixels.iter_mut().zip(input.pixels.iter().cycle()) {
                *byte = *value;
            }
        }
    }
    let Ok(dds) = save_to_dds_memory(&image) else {
        return;
    };

    let options = ConversionOptions {
        format: (input.target_format % 4 != 0).then(|| pick_format(input.target_format)),
        width: input.target_size.map(|(w, _)| (w as usize % 64) + 1),
        height: input.target_size.map(|(_, h)| (h as usize % 64) + 1),
        normal_map: input.normal_map,
        typeless_unorm: input.typeless_unorm,
        typeless_float: input.typeless_float,
        codec: Codec::from_raw(input.codec as u32 % 9).unwrap_or_default(),
        profile: if input.standard_profile {
            PipelineProfile::Standard
        } else {
            PipelineProfile::Extended
        },
    };

    if let Ok(converted) = convert(&dds, &options) {
        assert!(!converted.data.is_empty());
        assert!(!converted.metadata.format.is_typeless());
        assert!(!converted.metadata.format.is_compressed());
        assert_eq!(converted.properties.original_format, format);

        if let (Some(width), Some(height), PipelineProfile::Extended) =
            (options.width, options.height, options.profile)
        {
            assert_eq!((converted.metadata.width, converted.metadata.height), (width, height));
        }
    }
});
