//! End to end conversions through the public API.

use dds_convert_api::{
    convert, convert_and_register, AlphaMode, BufferRegistry, Codec, ConversionOptions,
    ConvertError, DxgiFormat, ErrorKind, PipelineProfile,
};
use dds_convert_common::{ScratchImage, TexMetadata};
use dds_convert_dds::save_to_dds_memory;
use std::sync::Arc;
use std::thread;

/// Writes a DDS file with every byte of every surface set by `fill`.
fn dds_with(metadata: TexMetadata, fill: impl Fn(usize) -> u8) -> Vec<u8> {
    let mut image = ScratchImage::initialize(metadata).unwrap();
    for surface in image.surfaces_mut() {
        for (index, byte) in surface.pixels.iter_mut().enumerate() {
            *byte = fill(index);
        }
    }
    save_to_dds_memory(&image).unwrap()
}

fn bc1_dds(width: usize, height: usize) -> Vec<u8> {
    const BLOCK: [u8; 8] = [0x1F, 0x00, 0x00, 0xF8, 0b00_01_10_11, 0, 0, 0];
    dds_with(
        TexMetadata::new_2d(width, height, DxgiFormat::Bc1Unorm),
        |index| BLOCK[index % 8],
    )
}

#[test]
fn compressed_texture_with_default_options() {
    let converted = convert(&bc1_dds(4, 4), &ConversionOptions::default()).unwrap();

    assert!(!converted.data.is_empty());
    assert_eq!(converted.properties.width, 4);
    assert_eq!(converted.properties.height, 4);
    assert_eq!(converted.properties.original_format, DxgiFormat::Bc1Unorm);

    let decoded = image::load_from_memory(&converted.data).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

#[test]
fn resize_produces_single_mip_of_requested_size() {
    let metadata = TexMetadata {
        mip_levels: 3,
        ..TexMetadata::new_2d(4, 4, DxgiFormat::R8G8B8A8Unorm)
    };
    let dds = dds_with(metadata, |index| (index * 7) as u8);

    for (width, height) in [(8, 8), (1, 1), (3, 9)] {
        let options = ConversionOptions::builder().size(width, height).build();
        let converted = convert(&dds, &options).unwrap();

        assert_eq!((converted.metadata.width, converted.metadata.height), (width, height));
        assert_eq!(converted.metadata.mip_levels, 1);
        let decoded = image::load_from_memory(&converted.data).unwrap();
        assert_eq!((decoded.width() as usize, decoded.height() as usize), (width, height));
    }
}

#[test]
fn invalid_normal_map_options_are_configuration_errors() {
    let options = ConversionOptions::builder().normal_map("x").build();
    let error = convert(&bc1_dds(4, 4), &options).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Configuration);
    assert_eq!(
        error.to_string(),
        "ERROR Invalid value specified for normal map options (x), missing l, r, g, b, or a"
    );
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let dds = bc1_dds(16, 8);
    let options = ConversionOptions::builder()
        .format(DxgiFormat::B8G8R8A8Unorm)
        .size(5, 7)
        .codec(Codec::Tiff)
        .build();

    let first = convert(&dds, &options).unwrap();
    for _ in 0..4 {
        assert_eq!(convert(&dds, &options).unwrap().data, first.data);
    }
}

#[test]
fn typeless_resolution_is_total() {
    let typeless = DxgiFormat::all_values()
        .iter()
        .copied()
        .filter(|format| format.is_typeless());

    for format in typeless {
        let Ok(image) = ScratchImage::initialize_2d(4, 4, format) else {
            continue;
        };
        let dds = save_to_dds_memory(&image).unwrap();

        for profile in [PipelineProfile::Extended, PipelineProfile::Standard] {
            let options = ConversionOptions {
                typeless_unorm: profile == PipelineProfile::Standard,
                profile,
                ..Default::default()
            };
            let resolved = match profile {
                PipelineProfile::Extended => format.make_typeless_float(),
                PipelineProfile::Standard => format.make_typeless_unorm(),
            };

            match convert(&dds, &options) {
                Ok(converted) => {
                    assert!(!converted.metadata.format.is_typeless(), "{format}");
                    assert_eq!(converted.properties.original_format, format);
                }
                Err(ConvertError::PersistentlyTypeless(reported)) => {
                    assert_eq!(reported, format);
                    assert!(resolved.is_typeless(), "{format} resolves to {resolved}");
                }
                Err(error) => {
                    // Resolution succeeded; a later stage rejected the format.
                    assert!(!resolved.is_typeless(), "{format}: {error}");
                    assert_ne!(error.kind(), ErrorKind::Input, "{format}: {error}");
                }
            }
        }
    }
}

#[test]
fn formats_without_alpha_report_unknown_alpha_mode() {
    let formats = [
        DxgiFormat::R8Unorm,
        DxgiFormat::R16Unorm,
        DxgiFormat::R32Float,
        DxgiFormat::B5G6R5Unorm,
        DxgiFormat::B8G8R8X8Unorm,
        DxgiFormat::R32G32B32Float,
    ];

    for format in formats {
        let metadata = TexMetadata {
            alpha_mode: AlphaMode::Straight,
            ..TexMetadata::new_2d(2, 2, format)
        };
        let converted = convert(&dds_with(metadata, |_| 0x3F), &ConversionOptions::default())
            .unwrap_or_else(|error| panic!("{format}: {error}"));
        assert_eq!(converted.metadata.alpha_mode, AlphaMode::Unknown, "{format}");
    }
}

#[test]
fn premultiplied_alpha_is_kept() {
    let metadata = TexMetadata {
        alpha_mode: AlphaMode::Premultiplied,
        ..TexMetadata::new_2d(2, 2, DxgiFormat::R8G8B8A8Unorm)
    };
    let converted = convert(&dds_with(metadata, |_| 0x40), &ConversionOptions::default()).unwrap();
    assert_eq!(converted.metadata.alpha_mode, AlphaMode::Premultiplied);
}

#[test]
fn concurrent_conversions_keep_registry_consistent() {
    let registry = Arc::new(BufferRegistry::new());
    let dds = Arc::new(bc1_dds(8, 8));

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            let dds = Arc::clone(&dds);
            thread::spawn(move || {
                let options = ConversionOptions::builder().size(4 + worker, 4).build();
                let mut handles = Vec::new();
                for _ in 0..10 {
                    let registered = convert_and_register(&dds, &options, &registry).unwrap();
                    assert_eq!(registry.buffer_len(registered.handle), Some(registered.len));
                    handles.push(registered.handle);
                }

                for handle in handles {
                    assert!(registry.release(handle));
                    assert!(!registry.release(handle));
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    assert!(registry.is_empty());
}

#[test]
fn failures_never_register_buffers() {
    let registry = BufferRegistry::new();
    let dds = bc1_dds(4, 4);

    let cases = [
        (&dds[..10], ConversionOptions::default()),
        (&dds[..], ConversionOptions::builder().normal_map("rg").build()),
        (&dds[..], ConversionOptions::builder().codec(Codec::Heif).build()),
    ];
    for (source, options) in cases {
        assert!(convert_and_register(source, &options, &registry).is_err());
    }
    assert!(registry.is_empty());
}
