use super::*;

#[test]
fn threshold_is_strict() {
    assert_eq!(key_pixel([255, 255, 255]), [0, 0, 0, 0]);
    assert_eq!(key_pixel([201, 201, 201]), [0, 0, 0, 0]);
    assert_eq!(key_pixel([200, 200, 200]), [200, 200, 200, 255]);
    assert_eq!(key_pixel([0, 0, 0]), [0, 0, 0, 255]);
}

#[test]
fn every_channel_must_be_bright() {
    assert_eq!(key_pixel([255, 255, 200]), [255, 255, 200, 255]);
    assert_eq!(key_pixel([201, 0, 255]), [201, 0, 255, 255]);
}

#[test]
fn key_mask_preserves_dimensions_and_is_binary() {
    let rgb = RgbGrid::from_fn(5, 4, |x, y| {
        let v = (x * 50 + y * 10) as u8;
        [v, v, v]
    });
    let out = key_mask(&rgb);
    assert_eq!(out.dimensions(), (5, 4));
    assert!(out.pixels().all(|px| px[3] == 0 || px[3] == 255));
    for y in 0..4 {
        for x in 0..5 {
            let [r, g, b] = rgb.pixel(x, y).unwrap();
            assert_eq!(out.pixel(x, y).unwrap(), key_pixel([r, g, b]));
        }
    }
}

#[test]
fn key_mask_leaves_input_untouched() {
    let rgb = RgbGrid::from_fn(2, 2, |_, _| [255, 255, 255]);
    let before = rgb.clone();
    let _ = key_mask(&rgb);
    assert_eq!(rgb, before);
}

#[test]
fn key_mask_empty_grid() {
    assert!(key_mask(&RgbGrid::new(0, 0)).is_empty());
}
