//! # Traversal and Framing
//!
//! Both the encoder and the decoder derive bit positions from the same pure function,
//! [`position_of`], instead of sharing a cursor.
//!
//! ## Frame layout
//!
//! ```text
//! [32 bits] message bit length (big-endian u32)
//! [8·N bits] message bytes, most significant bit first
//! ```
//!
//! ## Traversal
//!
//! Bit `i` lands in channel `i mod 3` of pixel `i div 3`, pixels counted row-major.

use serde::Serialize;

use super::error::{StegoError, StegoResult};
use super::grid::COLOR_CHANNELS;

/// Width of the length prefix in bits.
pub const LENGTH_PREFIX_BITS: usize = 32;

/// A sample location in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
    pub channel: usize,
}

/// Map frame bit `index` to its grid position, or `None` past the grid's capacity.
pub fn position_of(index: usize, height: usize, width: usize) -> Option<Position> {
    if width == 0 {
        return None;
    }

    let pixel = index / COLOR_CHANNELS;
    let row = pixel / width;
    if row >= height {
        return None;
    }

    Some(Position {
        row,
        column: pixel % width,
        channel: index % COLOR_CHANNELS,
    })
}

/// Inverse of [`position_of`].
pub fn index_of(position: Position, width: usize) -> usize {
    (position.row * width + position.column) * COLOR_CHANNELS + position.channel
}

/// Frame size in bits for a message of `message_len` bytes.
pub fn frame_bits_for(message_len: usize) -> usize {
    LENGTH_PREFIX_BITS + message_len * 8
}

/// A length-prefixed message ready to be laid out bit by bit.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    message_bits: u32,
    message: &'a [u8],
}

impl<'a> Frame<'a> {
    /// # Errors
    /// [`StegoError::MessageTooLong`] when `8 · message.len()` overflows the prefix.
    pub fn new(message: &'a [u8]) -> StegoResult<Self> {
        let message_bits = message
            .len()
            .checked_mul(8)
            .and_then(|bits| u32::try_from(bits).ok())
            .ok_or(StegoError::MessageTooLong {
                bytes: message.len(),
            })?;

        Ok(Self {
            message_bits,
            message,
        })
    }

    /// Value written into the length prefix.
    pub fn message_bits(&self) -> u32 {
        self.message_bits
    }

    /// Total frame length in bits.
    pub fn len(&self) -> usize {
        frame_bits_for(self.message.len())
    }

    /// Bit `index` of the frame (0 or 1), or `None` past the end.
    pub fn bit(&self, index: usize) -> Option<u8> {
        if index < LENGTH_PREFIX_BITS {
            let shift = LENGTH_PREFIX_BITS - 1 - index;
            return Some(((self.message_bits >> shift) & 1) as u8);
        }

        let payload_index = index - LENGTH_PREFIX_BITS;
        let byte = *self.message.get(payload_index / 8)?;
        Some((byte >> (7 - payload_index % 8)) & 1)
    }

    /// All frame bits in order.
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len()).filter_map(move |index| self.bit(index))
    }
}

/// Render a byte as its 8-bit binary form, e.g. `65 -> "01000001"`.
pub fn binary_string(value: u8) -> String {
    format!("{value:08b}")
}
