//! # stegano-lsb
//!
//! Least-significant-bit steganography for raster images: hide a byte payload in the
//! lowest bit of each R, G and B sample, and get it back out.
//!
//! - [`processing`]: the codec and the image boundary
//! - [`service`]: async façade running codec work on tokio's blocking pool
//! - [`common`]: configuration

pub mod common;
pub mod processing;
pub mod service;

pub use processing::{decode, encode, EmbeddingReport, PixelGrid, StegoError};
pub use service::StegoService;
