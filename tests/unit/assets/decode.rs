use std::io::Cursor;

use super::*;

fn encode(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

#[test]
fn png_alpha_is_dropped_and_color_kept() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let bytes = encode(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png);

    let frame = decode_image(&bytes).unwrap();
    assert_eq!((frame.width, frame.height), (1, 1));
    assert!(!frame.premultiplied);
    assert_eq!(frame.data, vec![100, 50, 200, 255]);
}

#[test]
fn jpeg_decodes_to_opaque_rgba() {
    let img = image::RgbImage::from_pixel(4, 2, image::Rgb([10, 200, 30]));
    let bytes = encode(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Jpeg);

    let frame = decode_image(&bytes).unwrap();
    assert_eq!((frame.width, frame.height), (4, 2));
    assert_eq!(frame.data.len(), 4 * 2 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn garbage_and_missing_files_fail() {
    assert!(decode_image(b"definitely not an image").is_err());
    let err = decode_image_file(Path::new("target/does-not-exist/none.png")).unwrap_err();
    assert!(err.to_string().contains("none.png"));
}
