//! # Steganography Service
//!
//! Async façade over the codec for callers running on tokio. Every image is processed
//! on the blocking thread pool, since decoding, embedding and PNG encoding are
//! CPU-bound. Independent images can be handled concurrently; a single image is
//! always walked sequentially.
//!
//! The service holds no per-request state. The embedding report of each call goes
//! straight back to that caller.

use anyhow::Result;
use image::ImageFormat;
use log::{info, warn};
use tokio::task::JoinHandle;

use crate::common::config::CodecConfig;
use crate::processing::{self, image_io, EmbeddingReport};

/// Encoded image file bytes together with the embedding report.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub report: EmbeddingReport,
}

/// Runs codec work off the async runtime.
#[derive(Debug, Clone, Default)]
pub struct StegoService {
    config: CodecConfig,
}

impl StegoService {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Embed `message` into the image in `image_bytes` and return the result as PNG.
    ///
    /// # Errors
    /// - The image cannot be decoded or has no color channels
    /// - The message does not fit
    /// - The blocking task panicked
    pub async fn encode_image(
        &self,
        image_bytes: Vec<u8>,
        message: Vec<u8>,
    ) -> Result<EncodedImage> {
        self.encode_image_as(image_bytes, message, ImageFormat::Png).await
    }

    /// Like [`encode_image`](Self::encode_image), writing the result in a lossless `format`.
    pub async fn encode_image_as(
        &self,
        image_bytes: Vec<u8>,
        message: Vec<u8>,
        format: ImageFormat,
    ) -> Result<EncodedImage> {
        image_io::ensure_lossless(format)?;
        let options = self.config.encode_options();

        let encoded = tokio::task::spawn_blocking(move || -> Result<EncodedImage> {
            let cover = image_io::grid_from_bytes(&image_bytes)?;
            let (stego, report) = processing::encode_with(&cover, &message, options)?;
            let bytes = image_io::encode_grid(&stego, format)?;
            Ok(EncodedImage { bytes, report })
        })
        .await
        .map_err(|e| anyhow::anyhow!("Encoding task panicked: {}", e))??;

        info!(
            "✅ Embedded {} bits across {} pixels",
            encoded.report.bits_written, encoded.report.pixels_touched
        );

        Ok(encoded)
    }

    /// Recover the message bytes hidden in `image_bytes`.
    pub async fn decode_image(&self, image_bytes: Vec<u8>) -> Result<Vec<u8>> {
        let message = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let grid = image_io::grid_from_bytes(&image_bytes)?;
            Ok(processing::decode(&grid)?)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Decoding task panicked: {}", e))??;

        info!("✅ Recovered {} message bytes", message.len());

        Ok(message)
    }

    /// Decode several independent images concurrently.
    ///
    /// Results come back in input order, exactly one per image; a failure on one image
    /// does not affect the others.
    pub async fn decode_many(
        &self,
        images: Vec<(String, Vec<u8>)>,
    ) -> Vec<(String, Result<Vec<u8>>)> {
        let tasks = images
            .into_iter()
            .map(|(name, bytes)| {
                let service = self.clone();
                let task = tokio::spawn(async move { service.decode_image(bytes).await });
                (name, task)
            })
            .collect();

        join_in_order(tasks).await
    }
}

/// Await each task in turn. A task that fails to join still yields an entry for its name.
async fn join_in_order<T>(
    tasks: Vec<(String, JoinHandle<Result<T>>)>,
) -> Vec<(String, Result<T>)> {
    let mut results = Vec::with_capacity(tasks.len());

    for (name, task) in tasks {
        let result = match task.await {
            Ok(result) => result,
            Err(e) => {
                warn!("⚠️  Decode task for {} failed to join: {}", name, e);
                Err(anyhow::anyhow!("Decoding task failed: {}", e))
            }
        };
        results.push((name, result));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn explode() -> Result<u8> {
        panic!("boom")
    }

    #[tokio::test]
    async fn failed_task_keeps_its_entry() {
        let tasks: Vec<(String, JoinHandle<Result<u8>>)> = vec![
            ("ok".to_string(), tokio::spawn(async { Ok(1) })),
            ("panics".to_string(), tokio::spawn(explode())),
            ("cancelled".to_string(), {
                let task = tokio::spawn(std::future::pending::<Result<u8>>());
                task.abort();
                task
            }),
            (
                "err".to_string(),
                tokio::spawn(async { Err(anyhow::anyhow!("bad image")) }),
            ),
        ];

        let results = join_in_order(tasks).await;
        let names: Vec<_> = results.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, ["ok", "panics", "cancelled", "err"]);
        assert_eq!(*results[0].1.as_ref().unwrap(), 1);
        let panicked = results[1].1.as_ref().unwrap_err().to_string();
        assert!(panicked.starts_with("Decoding task failed"));
        assert!(results[2].1.is_err());
        assert_eq!(results[3].1.as_ref().unwrap_err().to_string(), "bad image");
    }
}
