#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod decompress;
pub mod error;
pub mod util;

pub use decompress::{decompress, default_decompressed_format};
pub use error::DecompressError;

#[cfg(test)]
pub(crate) mod test_prelude;
