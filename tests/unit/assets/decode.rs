use std::io::Cursor;

use super::*;

fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_keeps_dimensions_and_color() {
    let src = image::RgbImage::from_raw(2, 1, vec![100, 50, 200, 1, 2, 3]).unwrap();
    let decoded = decode_image(&png_bytes(image::DynamicImage::ImageRgb8(src))).unwrap();
    assert_eq!(decoded.width(), 2);
    assert_eq!(decoded.height(), 1);
    assert_eq!(decoded.to_rgb8().into_raw(), vec![100, 50, 200, 1, 2, 3]);
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn open_image_reads_file_and_reports_missing_path() {
    let dir = std::path::PathBuf::from("target").join("unit_decode");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("pixel.png");
    let src = image::RgbaImage::from_raw(1, 1, vec![9, 8, 7, 255]).unwrap();
    std::fs::write(&path, png_bytes(image::DynamicImage::ImageRgba8(src))).unwrap();

    let img = open_image(&path).unwrap();
    assert_eq!(img.to_rgba8().into_raw(), vec![9, 8, 7, 255]);

    let err = open_image(&dir.join("missing.png")).unwrap_err();
    assert!(err.to_string().contains("missing.png"));
}
