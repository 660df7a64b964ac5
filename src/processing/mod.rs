//! # Image Processing and Steganography
//!
//! LSB (Least Significant Bit) steganography over an in-memory [`PixelGrid`].
//!
//! ## Modules
//!
//! - [`framing`]: bit-index to grid-position mapping and the length-prefixed frame
//! - [`encoder`] / [`decoder`]: embedding and extraction
//! - [`report`]: the diagnostic report returned by the encoder
//! - [`text`]: text conventions for messages
//! - [`image_io`]: conversion to and from `image` crate rasters
//!
//! ### Capacity
//! A grid holds `3 · width · height` bits. The frame needs `32 + 8 · message_len` of
//! them, so an 800x600 image carries up to 179,996 message bytes.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod grid;
pub mod image_io;
pub mod report;
pub mod text;

// Re-export main functions for convenience
pub use decoder::{decode, decode_frame, DecodedFrame};
pub use encoder::{encode, encode_with, max_message_bytes, EncodeOptions};
pub use error::{StegoError, StegoResult};
pub use grid::PixelGrid;
pub use report::{Channel, EmbeddingReport, Modification};
pub use text::TextEncoding;
