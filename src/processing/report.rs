//! # Embedding Report
//!
//! Diagnostic summary returned by the encoder. It has no effect on decodability; it
//! exists so callers can inspect exactly which samples changed.

use serde::Serialize;

use super::framing::{binary_string, Position};

/// Default number of per-bit modification records kept in a report.
pub const DEFAULT_REPORT_LIMIT: usize = 20;

/// Number of frame bits rendered into [`EmbeddingReport::frame_preview`].
pub const FRAME_PREVIEW_BITS: usize = 256;

/// Color channel label for a traversal channel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::R),
            1 => Some(Self::G),
            2 => Some(Self::B),
            _ => None,
        }
    }
}

/// One overwritten least significant bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modification {
    pub position: Position,
    pub channel: Channel,
    pub bit: u8,
    pub original: u8,
    pub modified: u8,
    pub original_binary: String,
    pub modified_binary: String,
}

impl Modification {
    pub fn new(position: Position, bit: u8, original: u8, modified: u8) -> Option<Self> {
        Some(Self {
            position,
            channel: Channel::from_index(position.channel)?,
            bit,
            original,
            modified,
            original_binary: binary_string(original),
            modified_binary: binary_string(modified),
        })
    }

    /// Whether the write actually flipped the sample.
    pub fn changed(&self) -> bool {
        self.original != self.modified
    }
}

/// What the encoder did to the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddingReport {
    /// Value of the length prefix (8 × message bytes).
    pub message_bits: u32,
    /// Length prefix plus payload.
    pub frame_bits: usize,
    pub bits_written: usize,
    /// `ceil(bits_written / 3)`.
    pub pixels_touched: usize,
    /// Leading frame bits as a `0`/`1` string.
    pub frame_preview: String,
    pub modifications: Vec<Modification>,
}

impl EmbeddingReport {
    /// Number of recorded samples whose value changed.
    pub fn samples_changed(&self) -> usize {
        self.modifications.iter().filter(|m| m.changed()).count()
    }
}
