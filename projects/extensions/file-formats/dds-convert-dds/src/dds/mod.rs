/// Shared constants between modules.
pub mod constants;

/// Mapping of legacy pixel formats to DXGI formats.
pub mod legacy_format;

/// Determine if a file is a DDS file.
pub mod likely_dds;

/// Load a DDS file into a [`ScratchImage`](dds_convert_common::ScratchImage).
pub mod load;

/// Read and validate the headers of a DDS file.
pub mod parse_dds;

/// Write a [`ScratchImage`](dds_convert_common::ScratchImage) as a DDS file.
pub mod save;

pub use likely_dds::*;
pub use load::*;
pub use parse_dds::*;
pub use save::*;
