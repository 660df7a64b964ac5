//! # Image Boundary
//!
//! Lifts decoded rasters from the `image` crate into a [`PixelGrid`] and back.
//!
//! RGB images become 3-channel grids. Images with alpha become 4-channel grids and the
//! alpha plane is passed through untouched. Grayscale images are rejected rather than
//! silently converted, since the traversal needs three color channels. Images deeper
//! than 8 bits per channel are converted to 8 bits on load.
//!
//! Encoded images must only ever be written in a lossless format: any lossy
//! re-compression destroys the least significant bits.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use super::error::{StegoError, StegoResult};
use super::grid::PixelGrid;

/// Lift a decoded image into a pixel grid.
///
/// # Errors
/// [`StegoError::InvalidChannelLayout`] for grayscale images.
pub fn grid_from_image(image: &DynamicImage) -> Result<PixelGrid> {
    let color = image.color();

    if !color.has_color() {
        return Err(StegoError::InvalidChannelLayout {
            channels: usize::from(color.channel_count()),
        }
        .into());
    }

    let grid = if color.has_alpha() {
        let buffer = image.to_rgba8();
        let (width, height) = buffer.dimensions();
        PixelGrid::from_samples(width as usize, height as usize, 4, buffer.into_raw())?
    } else {
        let buffer = image.to_rgb8();
        let (width, height) = buffer.dimensions();
        PixelGrid::from_samples(width as usize, height as usize, 3, buffer.into_raw())?
    };

    Ok(grid)
}

/// Turn a 3- or 4-channel grid back into an image.
pub fn grid_to_image(grid: &PixelGrid) -> Result<DynamicImage> {
    let width = u32::try_from(grid.width()).context("Grid width does not fit an image")?;
    let height = u32::try_from(grid.height()).context("Grid height does not fit an image")?;
    let samples = grid.samples().to_vec();

    let image = match grid.channels() {
        3 => RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, samples).map(DynamicImage::ImageRgba8),
        channels => {
            return Err(StegoError::InvalidChannelLayout { channels }.into());
        }
    };

    image.context("Pixel buffer does not match grid dimensions")
}

/// Only accept output formats that store every sample bit exactly.
pub fn ensure_lossless(format: ImageFormat) -> StegoResult<()> {
    match format {
        ImageFormat::Png
        | ImageFormat::Bmp
        | ImageFormat::Tiff
        | ImageFormat::Tga
        | ImageFormat::Pnm => Ok(()),
        other => Err(StegoError::LossyFormat {
            format: format!("{other:?}"),
        }),
    }
}

/// Decode image bytes of any supported format into a grid.
pub fn grid_from_bytes(bytes: &[u8]) -> Result<PixelGrid> {
    let image = image::load_from_memory(bytes).context("Failed to decode image data")?;
    grid_from_image(&image)
}

/// Encode a grid in a lossless `format`.
pub fn encode_grid(grid: &PixelGrid, format: ImageFormat) -> Result<Vec<u8>> {
    ensure_lossless(format)?;

    let image = grid_to_image(grid)?;
    let mut output_bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut output_bytes), format)
        .with_context(|| format!("Failed to encode {:?}", format))?;
    Ok(output_bytes)
}

/// Encode a grid as PNG bytes.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>> {
    encode_grid(grid, ImageFormat::Png)
}

/// Open an image file as a grid.
pub fn load_grid(path: impl AsRef<Path>) -> Result<PixelGrid> {
    let path = path.as_ref();
    let image =
        image::open(path).with_context(|| format!("Failed to open image {}", path.display()))?;
    grid_from_image(&image)
}

/// Save a grid, choosing the format from the file extension.
///
/// # Errors
/// [`StegoError::LossyFormat`] if the extension names a lossy format such as JPEG.
pub fn save_grid(grid: &PixelGrid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Cannot infer image format for {}", path.display()))?;
    ensure_lossless(format)?;

    grid_to_image(grid)?
        .save_with_format(path, format)
        .with_context(|| format!("Failed to write image {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba};

    #[test]
    fn rgba_keeps_alpha_plane() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4])));
        let grid = grid_from_image(&image).unwrap();

        assert_eq!(grid.channels(), 4);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(1, 2, 3), Some(4));
    }

    #[test]
    fn grayscale_is_rejected() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([9])));
        let err = grid_from_image(&image).unwrap_err();

        assert_eq!(
            err.downcast_ref::<StegoError>(),
            Some(&StegoError::InvalidChannelLayout { channels: 1 })
        );
    }

    #[test]
    fn lossy_formats_are_refused() {
        assert!(ensure_lossless(ImageFormat::Png).is_ok());
        assert!(ensure_lossless(ImageFormat::Bmp).is_ok());
        assert_eq!(
            ensure_lossless(ImageFormat::Jpeg),
            Err(StegoError::LossyFormat {
                format: "Jpeg".to_string()
            })
        );
    }

    #[test]
    fn bmp_bytes_reload_identically() {
        let grid = PixelGrid::filled(4, 3, 3, 0x5A).unwrap();
        let bmp = encode_grid(&grid, ImageFormat::Bmp).unwrap();
        assert_eq!(grid_from_bytes(&bmp).unwrap(), grid);
    }

    #[test]
    fn png_bytes_reload_identically() {
        let samples: Vec<u8> = (0..=255).cycle().take(5 * 7 * 3).collect();
        let grid = PixelGrid::from_samples(5, 7, 3, samples).unwrap();

        let png = encode_png(&grid).unwrap();
        assert_eq!(grid_from_bytes(&png).unwrap(), grid);
    }
}
