use image::{ImageFormat, Rgb, RgbImage};
use stegano_lsb::common::config::CodecConfig;
use stegano_lsb::processing::{image_io, StegoError, TextEncoding};
use stegano_lsb::StegoService;

fn cover_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 77]));
    let grid = image_io::grid_from_image(&image.into()).unwrap();
    image_io::encode_png(&grid).unwrap()
}

#[tokio::test]
async fn encode_then_decode_through_service() {
    let service = StegoService::default();

    let encoded = service
        .encode_image(cover_png(40, 40), b"through the pool".to_vec())
        .await
        .unwrap();

    assert_eq!(encoded.report.frame_bits, 32 + 16 * 8);
    assert_eq!(
        service.decode_image(encoded.bytes).await.unwrap(),
        b"through the pool"
    );
}

#[tokio::test]
async fn report_limit_comes_from_config() {
    let service = StegoService::new(CodecConfig {
        report_limit: 4,
        text_encoding: TextEncoding::Utf8,
    });

    let encoded = service
        .encode_image(cover_png(20, 20), b"abc".to_vec())
        .await
        .unwrap();

    assert_eq!(encoded.report.modifications.len(), 4);
}

#[tokio::test]
async fn bmp_output_round_trips() {
    let service = StegoService::default();

    let encoded = service
        .encode_image_as(cover_png(16, 16), b"bmp".to_vec(), ImageFormat::Bmp)
        .await
        .unwrap();

    assert_eq!(service.decode_image(encoded.bytes).await.unwrap(), b"bmp");
}

#[tokio::test]
async fn oversized_message_is_an_error() {
    let service = StegoService::default();

    let err = service
        .encode_image(cover_png(4, 4), vec![0; 64])
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::CapacityExceeded { .. })
    ));
}

#[tokio::test]
async fn lossy_format_is_rejected_up_front() {
    let service = StegoService::default();

    let err = service
        .encode_image_as(cover_png(8, 8), b"x".to_vec(), ImageFormat::Jpeg)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::LossyFormat { .. })
    ));
}

#[tokio::test]
async fn decode_many_keeps_order_and_isolates_failures() {
    let service = StegoService::default();

    let mut images = Vec::new();
    for (index, message) in ["first", "second", "third"].iter().enumerate() {
        let encoded = service
            .encode_image(cover_png(30, 30), message.as_bytes().to_vec())
            .await
            .unwrap();
        images.push((format!("image-{index}"), encoded.bytes));
    }
    images.insert(1, ("garbage".to_string(), b"not an image".to_vec()));

    let results = service.decode_many(images).await;
    let names: Vec<_> = results.iter().map(|(name, _)| name.as_str()).collect();

    assert_eq!(names, ["image-0", "garbage", "image-1", "image-2"]);
    assert_eq!(results[0].1.as_ref().unwrap(), b"first");
    assert!(results[1].1.is_err());
    assert_eq!(results[2].1.as_ref().unwrap(), b"second");
    assert_eq!(results[3].1.as_ref().unwrap(), b"third");
}
