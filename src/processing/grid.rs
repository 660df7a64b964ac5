//! # Pixel Grid
//!
//! A dense `(row, column, channel)` array of 8-bit samples stored row-major with
//! interleaved channels, which is the same layout `image::ImageBuffer` uses.

use super::error::{StegoError, StegoResult};

/// Number of color channels the traversal writes into (R, G, B).
pub const COLOR_CHANNELS: usize = 3;

/// An owned image raster in row-major, channel-interleaved order.
///
/// Grids may carry more than three channels (e.g. RGBA). Only the first three are
/// touched by the codec; any extra channel is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// Wrap an existing sample buffer.
    ///
    /// # Errors
    /// - [`StegoError::GridTooLarge`] when `width * height * channels` overflows `usize`
    /// - [`StegoError::InvalidGridShape`] when `samples.len() != width * height * channels`
    pub fn from_samples(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<u8>,
    ) -> StegoResult<Self> {
        let expected = sample_count(width, height, channels)?;
        if samples.len() != expected {
            return Err(StegoError::InvalidGridShape {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// A grid with every sample set to `value`.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> StegoResult<Self> {
        let len = sample_count(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            samples: vec![value; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Sample at `(row, column, channel)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, column: usize, channel: usize) -> Option<u8> {
        self.offset(row, column, channel)
            .map(|offset| self.samples[offset])
    }

    /// Overwrite the sample at `(row, column, channel)`. Returns the previous value.
    pub fn set(&mut self, row: usize, column: usize, channel: usize, value: u8) -> Option<u8> {
        let offset = self.offset(row, column, channel)?;
        Some(std::mem::replace(&mut self.samples[offset], value))
    }

    /// Total number of least significant bits available to the traversal (`3·H·W`).
    pub fn capacity_bits(&self) -> usize {
        self.width
            .saturating_mul(self.height)
            .saturating_mul(COLOR_CHANNELS)
    }

    /// Fails unless the grid has at least the three color channels.
    pub fn check_layout(&self) -> StegoResult<()> {
        if self.channels < COLOR_CHANNELS {
            return Err(StegoError::InvalidChannelLayout {
                channels: self.channels,
            });
        }
        Ok(())
    }

    fn offset(&self, row: usize, column: usize, channel: usize) -> Option<usize> {
        if row >= self.height || column >= self.width || channel >= self.channels {
            return None;
        }
        Some((row * self.width + column) * self.channels + channel)
    }
}

fn sample_count(width: usize, height: usize, channels: usize) -> StegoResult<usize> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or(StegoError::GridTooLarge {
            width,
            height,
            channels,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        let err = PixelGrid::from_samples(2, 2, 3, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            StegoError::InvalidGridShape {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn overflowing_shape_is_an_error() {
        let width = usize::MAX / 2 + 1;
        let too_large = StegoError::GridTooLarge {
            width,
            height: 2,
            channels: 3,
        };

        let wrapped = PixelGrid::from_samples(width, 2, 3, Vec::new());
        assert_eq!(wrapped, Err(too_large.clone()));
        assert_eq!(PixelGrid::filled(width, 2, 3, 0), Err(too_large));
        assert!(matches!(
            PixelGrid::from_samples(usize::MAX, usize::MAX, 1, vec![0]),
            Err(StegoError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn indexes_row_major_interleaved() {
        let samples: Vec<u8> = (0..24).collect();
        let grid = PixelGrid::from_samples(2, 3, 4, samples).unwrap();

        assert_eq!(grid.get(0, 0, 0), Some(0));
        assert_eq!(grid.get(0, 1, 2), Some(6));
        assert_eq!(grid.get(2, 1, 3), Some(23));
        assert_eq!(grid.get(3, 0, 0), None);
        assert_eq!(grid.get(0, 0, 4), None);
    }

    #[test]
    fn capacity_ignores_extra_channels() {
        let rgb = PixelGrid::filled(10, 10, 3, 0).unwrap();
        let rgba = PixelGrid::filled(10, 10, 4, 0).unwrap();

        assert_eq!(rgb.capacity_bits(), 300);
        assert_eq!(rgba.capacity_bits(), 300);
    }

    #[test]
    fn grayscale_layout_is_rejected() {
        let grid = PixelGrid::filled(4, 4, 1, 0).unwrap();
        assert_eq!(
            grid.check_layout(),
            Err(StegoError::InvalidChannelLayout { channels: 1 })
        );
    }
}
