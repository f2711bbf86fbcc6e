//! cipher-qa adapters - external adapters for cipher-qa.
//!
//! This crate provides adapters for:
//! - Decoding image files into pixel buffers
//! - Pairing a plaintext image with cipher images on the filesystem

pub mod decode;
pub mod fs;

pub use decode::{decode_image, load_image};
pub use fs::FsPairSource;
