//! # Codec Errors
//!
//! [`StegoError`] covers every way embedding or extraction can fail. All of them are
//! returned to the caller; nothing in the codec panics on bad input.

use thiserror::Error;

/// Result type for codec operations.
pub type StegoResult<T> = Result<T, StegoError>;

/// Errors produced by the LSB encoder and decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StegoError {
    /// The grid has fewer than the three color channels the traversal walks.
    #[error("unsupported channel layout: need at least 3 channels, image has {channels}")]
    InvalidChannelLayout { channels: usize },

    /// The sample buffer does not match the declared grid dimensions.
    #[error("pixel buffer holds {actual} samples but the grid shape needs {expected}")]
    InvalidGridShape { expected: usize, actual: usize },

    /// The grid shape has more samples than can be addressed.
    #[error("grid of {width}x{height} with {channels} channels is too large to address")]
    GridTooLarge {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// The frame does not fit in the grid's least significant bits.
    #[error("message too large: frame needs {required_bits} bits, image has {available_bits}")]
    CapacityExceeded {
        required_bits: usize,
        available_bits: usize,
    },

    /// The grid cannot even hold the 32-bit length prefix.
    #[error("no embedded data: image only has {available_bits} bits, length prefix needs 32")]
    NoEmbeddedData { available_bits: usize },

    /// The length prefix claims more payload bits than the grid can supply.
    #[error("truncated payload: prefix claims {claimed_bits} bits, {available_bits} remain")]
    TruncatedPayload {
        claimed_bits: usize,
        available_bits: usize,
    },

    /// The message bit length does not fit in the 32-bit prefix.
    #[error("message of {bytes} bytes is too long for a 32-bit length prefix")]
    MessageTooLong { bytes: usize },

    /// A character cannot be written as a single byte.
    #[error("character {character:?} at position {index} is outside the one-byte range")]
    UnencodableCharacter { character: char, index: usize },

    /// The recovered bytes are not valid UTF-8.
    #[error("extracted message is not valid UTF-8")]
    InvalidUtf8,

    /// The requested output format would destroy least significant bits.
    #[error("refusing to write {format}: lossy formats destroy embedded data")]
    LossyFormat { format: String },
}
