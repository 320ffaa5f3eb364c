#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]

pub mod bridge;
pub mod codec;
pub mod encode;
pub mod error;

pub use bridge::{bridge_layout, is_encodable, to_dynamic_image, BridgeLayout};
pub use codec::Codec;
pub use encode::encode;
pub use error::EncodeError;

#[cfg(test)]
pub(crate) mod test_prelude;
