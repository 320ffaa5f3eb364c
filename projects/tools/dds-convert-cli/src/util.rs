use dds_convert_api::{Codec, DxgiFormat, PipelineProfile, TypelessPreference};
use std::fs;
use std::path::{Path, PathBuf};

/// Recursively collects every `.dds` file under `dir`.
///
/// Directories and entries that cannot be read are skipped.
pub fn find_dds_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let Ok(dir_entries) = fs::read_dir(dir) else {
        return Ok(());
    };

    for entry in dir_entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            find_dds_files(&path, files)?;
        } else if is_dds_path(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Whether the path has a `.dds` extension, in any case.
pub fn is_dds_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("dds"))
}

/// Parses a DXGI format name, e.g. `R8G8B8A8_UNORM` or `DXGI_FORMAT_BC1_UNORM`.
pub fn parse_format(value: &str) -> Result<DxgiFormat, String> {
    DxgiFormat::from_name(value).ok_or_else(|| format!("Unknown DXGI format: {value}"))
}

pub fn parse_codec(value: &str) -> Result<Codec, String> {
    Codec::from_name(value)
        .filter(|codec| codec.is_supported())
        .ok_or_else(|| {
            format!("Unsupported codec: {value}. Valid options: png, jpeg, bmp, tiff, gif, ico")
        })
}

pub fn parse_profile(value: &str) -> Result<PipelineProfile, String> {
    match value.to_lowercase().as_str() {
        "standard" => Ok(PipelineProfile::Standard),
        "extended" => Ok(PipelineProfile::Extended),
        _ => Err(format!(
            "Unknown profile: {value}. Valid options: standard, extended"
        )),
    }
}

pub fn parse_typeless(value: &str) -> Result<TypelessPreference, String> {
    match value.to_lowercase().as_str() {
        "unorm" => Ok(TypelessPreference::Unorm),
        "float" => Ok(TypelessPreference::Float),
        _ => Err(format!(
            "Unknown typeless preference: {value}. Valid options: unorm, float"
        )),
    }
}
