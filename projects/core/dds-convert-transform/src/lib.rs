#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod alpha;
pub mod convert;
pub mod error;
pub mod normal_map;
pub mod planar;
pub mod resize;
pub mod scanline;

pub use alpha::{is_alpha_all_opaque, resolve_alpha_mode};
pub use convert::convert;
pub use error::{TransformError, TransformResult};
pub use normal_map::{compute_normal_map, NormalMapFlags, NormalMapChannel};
pub use planar::convert_to_single_plane;
pub use resize::resize;

#[cfg(test)]
pub(crate) mod test_prelude;
