//! Common test imports and utilities for common crate tests
#![allow(unused_imports)]

pub use crate::dxgi_format::DxgiFormat;
pub use rstest::rstest;
