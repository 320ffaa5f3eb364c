//! Per-block decoders for the BC formats implemented in this crate.

pub mod bc1_decode;
pub mod bc2_decode;
pub mod bc3_decode;
pub mod bc4_decode;

pub use bc1_decode::decode_bc1_block;
pub use bc2_decode::decode_bc2_block;
pub use bc3_decode::decode_bc3_block;
pub use bc4_decode::{decode_bc4_snorm_block, decode_bc4_unorm_block};
