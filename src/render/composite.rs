use crate::foundation::math::mul_div255_u8;
use crate::render::frame::Frame;
use crate::render::surface::Surface;

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `src` onto `dst` with both anchored at the origin.
///
/// Only the overlapping rectangle is touched, so a stale surface from before a resize can
/// never write out of bounds.
pub(crate) fn over_at_origin(dst: &mut Frame, src: &Surface) {
    let w = dst.width().min(src.width()) as usize;
    let h = dst.height().min(src.height()) as usize;
    if w == 0 || h == 0 {
        return;
    }
    let dst_stride = dst.width() as usize * 4;
    let src_stride = src.width() as usize * 4;
    let src_data = src.data();
    let dst_data = dst.data_mut();

    for y in 0..h {
        let (Some(d_row), Some(s_row)) = (
            dst_data.get_mut(y * dst_stride..y * dst_stride + w * 4),
            src_data.get(y * src_stride..y * src_stride + w * 4),
        ) else {
            return;
        };
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            if s[3] == 0 {
                continue;
            }
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
