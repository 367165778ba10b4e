use vello_cpu::kurbo::{BezPath, Cap, Stroke};

use crate::foundation::core::{Canvas, Point, Pose, Rgb8};
use crate::foundation::error::PathchainResult;
use crate::render::raster::point_to_cpu;
use crate::render::surface::{Surface, surface_dims};
use crate::transform::CoordinateTransform;

/// Rectangular actor outline, centred on the pose and rotated by its heading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Footprint {
    /// Extent along the heading, logical units.
    pub(crate) width: f64,
    /// Extent across the heading, logical units.
    pub(crate) height: f64,
    pub(crate) opacity: f32,
    pub(crate) color: Rgb8,
}

/// Draw `footprint` at `pose` onto a fresh surface: a translucent body plus an opaque
/// heading marker from the centre to the front edge.
pub(crate) fn draw_actor(
    pose: Pose,
    footprint: Footprint,
    transform: &dyn CoordinateTransform,
    canvas: Canvas,
) -> PathchainResult<Surface> {
    let mut surface = Surface::new(canvas)?;
    let (w, h) = surface_dims(canvas)?;

    let (sin, cos) = pose.heading.sin_cos();
    let local = |dx: f64, dy: f64| {
        let p = Point::new(pose.x + dx * cos - dy * sin, pose.y + dx * sin + dy * cos);
        transform.to_pixel_space(p, canvas)
    };
    let hw = footprint.width / 2.0;
    let hh = footprint.height / 2.0;
    let corners = [local(hw, hh), local(-hw, hh), local(-hw, -hh), local(hw, -hh)];
    let centre = local(0.0, 0.0);
    let front = local(hw, 0.0);

    let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
    if !corners.iter().chain([&centre, &front]).all(finite) || hw <= 0.0 || hh <= 0.0 {
        return Ok(surface);
    }

    let mut body = BezPath::new();
    body.move_to(point_to_cpu(corners[0]));
    for c in &corners[1..] {
        body.line_to(point_to_cpu(*c));
    }
    body.close_path();

    let mut marker = BezPath::new();
    marker.move_to(point_to_cpu(centre));
    marker.line_to(point_to_cpu(front));

    let [r, g, b, a] = footprint.color.with_opacity(footprint.opacity);
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.fill_path(&body);
    ctx.set_stroke(
        Stroke::new(transform.scale_length(1.0, canvas).max(1.0)).with_caps(Cap::Round),
    );
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, 255));
    ctx.stroke_path(&marker);
    ctx.flush();
    ctx.render_to_pixmap(&mut surface.pixmap);
    Ok(surface)
}

#[cfg(test)]
#[path = "../../tests/unit/render/actor.rs"]
mod tests;
