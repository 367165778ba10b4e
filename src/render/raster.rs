use vello_cpu::kurbo::{BezPath, Cap, Join, Stroke};

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::PathchainResult;
use crate::path::curve::Curve;
use crate::render::surface::{Surface, surface_dims};
use crate::transform::CoordinateTransform;

/// Sample intervals per curve; each curve contributes `SAMPLE_INTERVALS + 1` points.
pub(crate) const SAMPLE_INTERVALS: u32 = 100;

/// One stroke over the whole polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StrokePass {
    /// Width in pixels.
    pub(crate) width: f64,
    /// Straight (non-premultiplied) RGBA.
    pub(crate) rgba: [u8; 4],
}

/// Pixel-space polyline through the sampled curves.
///
/// Consecutive curves continue the same sub-path, so segment boundaries are joined rather
/// than capped.
#[derive(Default)]
pub(crate) struct Polyline {
    path: BezPath,
    last: Option<Point>,
}

impl Polyline {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_curve(
        &mut self,
        curve: &dyn Curve,
        transform: &dyn CoordinateTransform,
        canvas: Canvas,
    ) {
        for i in 0..=SAMPLE_INTERVALS {
            let t = f64::from(i) / f64::from(SAMPLE_INTERVALS);
            let p = transform.to_pixel_space(curve.point(t), canvas);
            self.push_point(p);
        }
    }

    fn push_point(&mut self, p: Point) {
        if !p.x.is_finite() || !p.y.is_finite() {
            return;
        }
        match self.last {
            None => self.path.move_to(point_to_cpu(p)),
            Some(last) if last == p => return,
            Some(_) => self.path.line_to(point_to_cpu(p)),
        }
        self.last = Some(p);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    #[cfg(test)]
    pub(crate) fn point_count(&self) -> usize {
        self.path.elements().len()
    }
}

/// Allocate a transparent surface and stroke `polyline` onto it once per pass, in order.
pub(crate) fn stroke_onto_new_surface(
    canvas: Canvas,
    polyline: &Polyline,
    passes: &[StrokePass],
) -> PathchainResult<Surface> {
    let mut surface = Surface::new(canvas)?;
    if polyline.is_empty() || passes.is_empty() {
        return Ok(surface);
    }

    let (w, h) = surface_dims(canvas)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    for pass in passes {
        let [r, g, b, a] = pass.rgba;
        ctx.set_stroke(
            Stroke::new(pass.width)
                .with_caps(Cap::Butt)
                .with_join(Join::Round),
        );
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.stroke_path(&polyline.path);
    }
    ctx.flush();
    ctx.render_to_pixmap(&mut surface.pixmap);
    Ok(surface)
}

pub(crate) fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
