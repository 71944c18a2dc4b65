use crate::foundation::{
    error::{KeycompError, KeycompResult},
    grid::{RgbGrid, RgbaGrid},
    threading::RowExecutor,
};

/// Top-left corner at which a `subject` sized grid sits centered on a `backdrop` sized one.
///
/// Fails with [`KeycompError::OutOfBoundsComposite`] when the subject is larger than the
/// backdrop in either dimension.
pub fn placement_offset(subject: (u32, u32), backdrop: (u32, u32)) -> KeycompResult<(u32, u32)> {
    let (sw, sh) = subject;
    let (bw, bh) = backdrop;
    if sw > bw || sh > bh {
        return Err(KeycompError::OutOfBoundsComposite {
            subject_width: sw,
            subject_height: sh,
            backdrop_width: bw,
            backdrop_height: bh,
        });
    }
    Ok(((bw - sw) / 2, (bh - sh) / 2))
}

/// Paste the visible pixels of `subject` centered over an opaque copy of `backdrop`.
///
/// Subject pixels with alpha 0 leave the backdrop untouched; any other alpha overwrites the
/// destination verbatim. There is no blending.
pub fn composite_centered(subject: &RgbaGrid, backdrop: &RgbGrid) -> KeycompResult<RgbaGrid> {
    composite_rows(subject, backdrop, &RowExecutor::Sequential)
}

pub(crate) fn composite_rows(
    subject: &RgbaGrid,
    backdrop: &RgbGrid,
    exec: &RowExecutor,
) -> KeycompResult<RgbaGrid> {
    let (start_x, start_y) = placement_offset(subject.dimensions(), backdrop.dimensions())?;
    let subject_rows = start_y..start_y + subject.height();
    let paste_at = start_x as usize * 4;

    let mut out = RgbaGrid::new(backdrop.width(), backdrop.height());
    let row_len = out.row_len();
    exec.for_each_row(out.raw_mut(), row_len, |y, row| {
        for (dst, src) in row.chunks_exact_mut(4).zip(backdrop.row(y).chunks_exact(3)) {
            dst[..3].copy_from_slice(src);
            dst[3] = 255;
        }

        if !subject_rows.contains(&y) {
            return;
        }
        let src_row = subject.row(y - start_y);
        let dst_row = &mut row[paste_at..paste_at + src_row.len()];
        for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            if src[3] > 0 {
                dst.copy_from_slice(src);
            }
        }
    });
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/stages/composite.rs"]
mod tests;
