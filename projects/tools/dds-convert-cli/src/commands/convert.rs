use crate::error::CliError;
use crate::util::{find_dds_files, parse_codec, parse_format, parse_profile, parse_typeless};
use argh::FromArgs;
use dds_convert_api::{
    convert, Codec, ConversionOptions, DxgiFormat, PipelineProfile, TypelessPreference,
};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(FromArgs, Debug)]
/// Convert a DDS file, or every DDS file in a directory, into an image file
#[argh(subcommand, name = "convert")]
pub struct ConvertCmd {
    /// input DDS file or directory
    #[argh(option)]
    pub input: PathBuf,

    /// output image file, or directory when the input is a directory
    #[argh(option)]
    pub output: PathBuf,

    /// DXGI format to convert to, e.g. R8G8B8A8_UNORM [default: keep]
    #[argh(option, from_str_fn(parse_format))]
    pub format: Option<DxgiFormat>,

    /// output codec: png, jpeg, bmp, tiff, gif, ico [default: png]
    #[argh(option, from_str_fn(parse_codec), default = "Codec::Png")]
    pub codec: Codec,

    /// width to resize to; needs --height
    #[argh(option)]
    pub width: Option<usize>,

    /// height to resize to; needs --width
    #[argh(option)]
    pub height: Option<usize>,

    /// normal map options: one of l, r, g, b, a plus any of u, v, m, i, o
    #[argh(option)]
    pub normal_map: Option<String>,

    /// how typeless formats are read: unorm, float
    #[argh(option, from_str_fn(parse_typeless))]
    pub typeless: Option<TypelessPreference>,

    /// pipeline profile: standard, extended [default: extended]
    #[argh(option, from_str_fn(parse_profile), default = "PipelineProfile::Extended")]
    pub profile: PipelineProfile,
}

impl ConvertCmd {
    fn options(&self) -> ConversionOptions {
        ConversionOptions {
            format: self.format,
            width: self.width,
            height: self.height,
            normal_map: self.normal_map.clone(),
            typeless_unorm: self.typeless == Some(TypelessPreference::Unorm),
            typeless_float: self.typeless == Some(TypelessPreference::Float),
            codec: self.codec,
            profile: self.profile,
        }
    }
}

pub fn handle_convert_command(cmd: ConvertCmd) -> Result<(), CliError> {
    let options = cmd.options();
    if !cmd.input.is_dir() {
        return convert_file(&cmd.input, &cmd.output, &options);
    }

    let mut files = Vec::new();
    find_dds_files(&cmd.input, &mut files)?;
    if files.is_empty() {
        println!("No DDS files found in {}", cmd.input.display());
        return Ok(());
    }

    let start = Instant::now();
    let mut failed = 0;
    for file in &files {
        let output = output_path(&cmd.input, &cmd.output, file, options.codec);
        if let Err(e) = convert_file(file, &output, &options) {
            error!("{e}");
            failed += 1;
        }
    }

    println!(
        "Converted {} of {} files in {:.2?}",
        files.len() - failed,
        files.len(),
        start.elapsed()
    );
    match failed {
        0 => Ok(()),
        failed => Err(CliError::Batch {
            failed,
            total: files.len(),
        }),
    }
}

/// Path of the converted file, mirroring the layout of the input directory.
fn output_path(input_dir: &Path, output_dir: &Path, file: &Path, codec: Codec) -> PathBuf {
    let relative = file.strip_prefix(input_dir).unwrap_or(file);
    output_dir.join(relative).with_extension(codec.extension())
}

fn convert_file(input: &Path, output: &Path, options: &ConversionOptions) -> Result<(), CliError> {
    let source = fs::read(input)?;
    let converted = convert(&source, options).map_err(|source| CliError::Convert {
        path: input.to_path_buf(),
        source,
    })?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &converted.data)?;

    info!(
        "{} -> {} ({}x{}, originally {})",
        input.display(),
        output.display(),
        converted.properties.width,
        converted.properties.height,
        converted.properties.original_format
    );
    Ok(())
}
