use crate::error::CliError;
use argh::FromArgs;
use dds_convert_common::{FormatClass, TexMetadata};
use dds_convert_dds::parse_dds;
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Print the layout of a DDS file
#[argh(subcommand, name = "info")]
pub struct InfoCmd {
    /// input DDS file
    #[argh(option)]
    pub input: PathBuf,
}

pub fn handle_info_command(cmd: InfoCmd) -> Result<(), CliError> {
    let data = fs::read(&cmd.input)?;
    let info = parse_dds(&data)?;
    print!("{}", describe(&info.metadata));
    Ok(())
}

fn describe(metadata: &TexMetadata) -> String {
    let format = metadata.format;
    let mut text = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(text, "Format:     {format}");
    let _ = writeln!(
        text,
        "Size:       {}x{}x{}",
        metadata.width, metadata.height, metadata.depth
    );
    let _ = writeln!(text, "Dimension:  {:?}", metadata.dimension);
    let _ = writeln!(text, "Array size: {}", metadata.array_size);
    let _ = writeln!(text, "Mip levels: {}", metadata.mip_levels);
    let _ = writeln!(text, "Cubemap:    {}", metadata.is_cubemap);
    let _ = writeln!(text, "Alpha mode: {:?}", metadata.alpha_mode);
    let _ = writeln!(
        text,
        "Class:      {}",
        match metadata.format_class() {
            FormatClass::Typeless(_) => "typeless",
            FormatClass::Planar(_) => "planar",
            FormatClass::Compressed(_) => "block compressed",
            FormatClass::Direct(format) if format.is_video() => "packed video",
            FormatClass::Direct(_) => "direct",
        }
    );
    text
}
