#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod dds;
pub mod error;

pub use dds::{likely_dds, load_from_dds_memory, parse_dds, save_to_dds_memory, DdsInfo};
pub use error::{DdsError, DdsResult};

#[cfg(test)]
pub(crate) mod test_prelude;
