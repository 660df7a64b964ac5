//! # LSB Encoder
//!
//! Embeds a length-prefixed message into the least significant bits of a copy of the
//! cover grid.
//!
//! ### Encoding Process
//! 1. Build the frame: 32-bit big-endian bit length, then the message bits (MSB first)
//! 2. Check the frame fits in `3 · height · width` bits before touching anything
//! 3. For frame bit `i`, overwrite the LSB of the sample at [`position_of`]`(i)`
//! 4. Record the first few writes in an [`EmbeddingReport`]
//!
//! The caller's grid is never modified; the encoder works on its own clone.

use log::debug;

use super::error::{StegoError, StegoResult};
use super::framing::{position_of, Frame, LENGTH_PREFIX_BITS};
use super::grid::PixelGrid;
use super::report::{EmbeddingReport, Modification, DEFAULT_REPORT_LIMIT, FRAME_PREVIEW_BITS};

/// Tuning for [`encode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Maximum number of [`Modification`] records kept in the report.
    pub report_limit: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            report_limit: DEFAULT_REPORT_LIMIT,
        }
    }
}

/// Largest message, in bytes, that fits in `grid`.
pub fn max_message_bytes(grid: &PixelGrid) -> usize {
    grid.capacity_bits().saturating_sub(LENGTH_PREFIX_BITS) / 8
}

/// Embed `message` into a copy of `grid` with default options.
///
/// # Errors
/// - [`StegoError::InvalidChannelLayout`] if the grid has fewer than 3 channels
/// - [`StegoError::MessageTooLong`] if the bit length overflows the 32-bit prefix
/// - [`StegoError::CapacityExceeded`] if the frame does not fit
///
/// # Example
/// ```
/// use stegano_lsb::processing::{decode, encode, PixelGrid};
///
/// let cover = PixelGrid::filled(10, 10, 3, 128)?;
/// let (stego, report) = encode(&cover, b"A")?;
///
/// assert_eq!(report.frame_bits, 40);
/// assert_eq!(decode(&stego)?, b"A");
/// # Ok::<(), stegano_lsb::processing::StegoError>(())
/// ```
pub fn encode(grid: &PixelGrid, message: &[u8]) -> StegoResult<(PixelGrid, EmbeddingReport)> {
    encode_with(grid, message, EncodeOptions::default())
}

/// Embed `message` into a copy of `grid`.
///
/// Capacity is checked before any sample is written; the frame is embedded whole or not at all.
pub fn encode_with(
    grid: &PixelGrid,
    message: &[u8],
    options: EncodeOptions,
) -> StegoResult<(PixelGrid, EmbeddingReport)> {
    grid.check_layout()?;

    let frame = Frame::new(message)?;
    let required_bits = frame.len();
    let available_bits = grid.capacity_bits();

    if required_bits > available_bits {
        return Err(StegoError::CapacityExceeded {
            required_bits,
            available_bits,
        });
    }

    debug!(
        "Embedding {} frame bits ({} message bytes) into {}x{} grid with {} bits available",
        required_bits,
        message.len(),
        grid.width(),
        grid.height(),
        available_bits
    );

    let mut encoded = grid.clone();
    let mut modifications = Vec::with_capacity(options.report_limit.min(required_bits));
    let mut bits_written = 0usize;

    for (index, bit) in frame.bits().enumerate() {
        let capacity_exceeded = || StegoError::CapacityExceeded {
            required_bits,
            available_bits,
        };

        let position =
            position_of(index, grid.height(), grid.width()).ok_or_else(capacity_exceeded)?;
        let original = encoded
            .get(position.row, position.column, position.channel)
            .ok_or_else(capacity_exceeded)?;

        // Single-bit overwrite; the upper seven bits stay as they were.
        let modified = (original & 0xFE) | bit;
        encoded.set(position.row, position.column, position.channel, modified);
        bits_written += 1;

        if modifications.len() < options.report_limit {
            modifications.extend(Modification::new(position, bit, original, modified));
        }
    }

    let report = EmbeddingReport {
        message_bits: frame.message_bits(),
        frame_bits: required_bits,
        bits_written,
        pixels_touched: bits_written.div_ceil(3),
        frame_preview: frame
            .bits()
            .take(FRAME_PREVIEW_BITS)
            .map(|bit| char::from(b'0' + bit))
            .collect(),
        modifications,
    };

    debug!(
        "Embedded {} bits across {} pixels",
        report.bits_written, report.pixels_touched
    );

    Ok((encoded, report))
}
