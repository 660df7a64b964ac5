//! # LSB Decoder
//!
//! Recovers a message embedded by [`encode`](super::encoder::encode).
//!
//! ### Decoding Process
//! 1. Read the LSBs at frame positions `0..32` and rebuild the big-endian bit length
//! 2. A zero length is a valid, empty message
//! 3. Read the LSBs at positions `32..32 + bit_length`, continuing the same traversal
//! 4. Pack the payload bits into bytes, most significant bit first
//!
//! Positions come from [`position_of`], so there is no cursor to resume after the prefix.

use log::debug;

use super::error::{StegoError, StegoResult};
use super::framing::{position_of, LENGTH_PREFIX_BITS};
use super::grid::PixelGrid;

/// A decoded frame: the claimed length and the bytes recovered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Raw value of the length prefix.
    pub bit_length: u32,
    /// Payload packed into bytes. A trailing group shorter than 8 bits is dropped.
    pub bytes: Vec<u8>,
}

impl DecodedFrame {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Recover the embedded message bytes.
///
/// An image holding an empty message yields `Ok(vec![])`; an image too small to hold a
/// length prefix yields [`StegoError::NoEmbeddedData`].
pub fn decode(grid: &PixelGrid) -> StegoResult<Vec<u8>> {
    decode_frame(grid).map(|frame| frame.bytes)
}

/// Recover the embedded frame, keeping the raw length prefix.
///
/// # Errors
/// - [`StegoError::InvalidChannelLayout`] if the grid has fewer than 3 channels
/// - [`StegoError::NoEmbeddedData`] if the grid has fewer than 32 bit positions
/// - [`StegoError::TruncatedPayload`] if the prefix claims more bits than remain
pub fn decode_frame(grid: &PixelGrid) -> StegoResult<DecodedFrame> {
    grid.check_layout()?;

    let available_bits = grid.capacity_bits();
    if available_bits < LENGTH_PREFIX_BITS {
        return Err(StegoError::NoEmbeddedData { available_bits });
    }

    let bit_length = (0..LENGTH_PREFIX_BITS).try_fold(0u32, |length, index| {
        let bit = lsb_at(grid, index).ok_or(StegoError::NoEmbeddedData { available_bits })?;
        Ok::<_, StegoError>((length << 1) | u32::from(bit))
    })?;

    debug!("Length prefix claims {} message bits", bit_length);

    if bit_length == 0 {
        return Ok(DecodedFrame {
            bit_length,
            bytes: Vec::new(),
        });
    }

    let claimed_bits = bit_length as usize;
    let remaining_bits = available_bits - LENGTH_PREFIX_BITS;
    let truncated = || StegoError::TruncatedPayload {
        claimed_bits,
        available_bits: remaining_bits,
    };

    if claimed_bits > remaining_bits {
        return Err(truncated());
    }

    let mut bytes = Vec::with_capacity(claimed_bits / 8);
    let mut current = 0u8;

    for offset in 0..claimed_bits {
        let bit = lsb_at(grid, LENGTH_PREFIX_BITS + offset).ok_or_else(truncated)?;
        current = (current << 1) | bit;

        if offset % 8 == 7 {
            bytes.push(current);
            current = 0;
        }
    }

    debug!("Recovered {} message bytes", bytes.len());

    Ok(DecodedFrame { bit_length, bytes })
}

fn lsb_at(grid: &PixelGrid, index: usize) -> Option<u8> {
    let position = position_of(index, grid.height(), grid.width())?;
    grid.get(position.row, position.column, position.channel)
        .map(|sample| sample & 1)
}
