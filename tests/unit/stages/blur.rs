use super::*;

fn k(v: u32) -> SmoothingIntensity {
    SmoothingIntensity::new(v).unwrap()
}

fn uniform(w: u32, h: u32, px: [u8; 3]) -> RgbGrid {
    RgbGrid::from_fn(w, h, |_, _| px)
}

#[test]
fn intensity_range_is_enforced() {
    assert!(SmoothingIntensity::new(1).is_ok());
    assert!(SmoothingIntensity::new(21).is_ok());
    assert!(matches!(
        SmoothingIntensity::new(0),
        Err(KeycompError::InvalidIntensity { value: 0 })
    ));
    assert!(matches!(
        SmoothingIntensity::new(22),
        Err(KeycompError::InvalidIntensity { value: 22 })
    ));
    assert_eq!(SmoothingIntensity::default().get(), 5);
    assert_eq!(k(4).offset(), 2);
}

#[test]
fn intensity_deserializes_with_validation() {
    let ok: SmoothingIntensity = serde_json::from_str("7").unwrap();
    assert_eq!(ok.get(), 7);
    assert!(serde_json::from_str::<SmoothingIntensity>("30").is_err());
}

#[test]
fn kernel_1_is_identity() {
    let src = RgbGrid::from_fn(4, 3, |x, y| [x as u8 * 7, y as u8 * 9, 200]);
    assert_eq!(box_blur(&src, k(1)), src);
}

#[test]
fn uniform_interior_is_unchanged_and_border_is_black() {
    let (w, h) = (6u32, 5u32);
    let out = box_blur(&uniform(w, h, [40, 80, 120]), k(3));
    for y in 0..h {
        for x in 0..w {
            let border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            let expected = if border { [0, 0, 0] } else { [40, 80, 120] };
            assert_eq!(out.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn mean_uses_floor_division() {
    let mut src = RgbGrid::new(3, 3);
    src.put_pixel(1, 1, [10, 17, 255]);
    let out = box_blur(&src, k(3));
    assert_eq!(out.pixel(1, 1), Some([1, 1, 28]));
}

#[test]
fn even_kernel_window_is_shifted_towards_origin() {
    // k=4, offset=2: the window for (2, 2) spans x and y in 0..4.
    let src = RgbGrid::from_fn(5, 5, |x, y| if x == 4 || y == 4 { [160, 160, 160] } else { [0, 0, 0] });
    let out = box_blur(&src, k(4));
    assert_eq!(out.pixel(2, 2), Some([0, 0, 0]));

    let src = RgbGrid::from_fn(5, 5, |x, y| if x == 0 && y == 0 { [160, 0, 0] } else { [0, 0, 0] });
    let out = box_blur(&src, k(4));
    assert_eq!(out.pixel(2, 2), Some([10, 0, 0]));
}

#[test]
fn kernel_larger_than_image_is_all_black() {
    let blur = BoxBlur::new(k(9));
    assert!(blur.is_degenerate(8, 20));
    assert!(!blur.is_degenerate(9, 9));
    assert!(!blur.is_degenerate(0, 0));

    let out = blur.apply(&uniform(8, 20, [255, 255, 255]));
    assert!(out.pixels().all(|px| px == [0, 0, 0]));
}

#[test]
fn copy_source_border_keeps_edge_pixels() {
    let src = RgbGrid::from_fn(4, 4, |x, y| [(x * 10) as u8, (y * 10) as u8, 5]);
    let out = BoxBlur::new(k(3))
        .with_border(BorderMode::CopySource)
        .apply(&src);
    assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
    assert_eq!(out.pixel(3, 2), src.pixel(3, 2));
    // Interior (1, 1): mean of x in 0..3 -> 10, y in 0..3 -> 10.
    assert_eq!(out.pixel(1, 1), Some([10, 10, 5]));
}

#[test]
fn clamp_edge_preserves_uniform_image_everywhere() {
    let src = uniform(5, 4, [33, 66, 99]);
    let out = BoxBlur::new(k(5))
        .with_border(BorderMode::ClampEdge)
        .apply(&src);
    assert_eq!(out, src);
}

#[test]
fn clamp_edge_repeats_edge_pixels() {
    let src = RgbGrid::from_fn(3, 1, |x, _| [[90, 0, 0], [0, 0, 0], [0, 0, 0]][x as usize]);
    let out = BoxBlur::new(k(3))
        .with_border(BorderMode::ClampEdge)
        .apply(&src);
    // Window for (0, 0) covers x = {0, 0, 1} on three clamped rows: 6 * 90 / 9.
    assert_eq!(out.pixel(0, 0), Some([60, 0, 0]));
}

#[test]
fn parallel_rows_match_sequential() {
    let src = RgbGrid::from_fn(17, 11, |x, y| [(x * 13 + y) as u8, (y * 29) as u8, (x ^ y) as u8]);
    let pool = RowExecutor::new(&crate::Threading {
        parallel: true,
        threads: Some(3),
    })
    .unwrap();
    for border in [BorderMode::Black, BorderMode::CopySource, BorderMode::ClampEdge] {
        let blur = BoxBlur::new(k(5)).with_border(border);
        assert_eq!(box_blur_rows(&src, &blur, &pool), blur.apply(&src));
    }
}

#[test]
fn empty_grid_stays_empty() {
    assert!(box_blur(&RgbGrid::new(0, 3), k(3)).is_empty());
}
