use std::sync::Arc;

use crate::{
    foundation::core::Canvas,
    foundation::error::PathchainResult,
    path::chain::PathChain,
    render::composite::over_at_origin,
    render::frame::Frame,
    render::raster::{Polyline, StrokePass, stroke_onto_new_surface},
    render::surface::Surface,
    style::path_style::PathStyle,
    style::theme::Theme,
    transform::CoordinateTransform,
};

/// Rebuild counters, for hosts that want to watch cache behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Base surface draws, including the initial one.
    pub base_rebuilds: u64,
    /// Overlay rebuilds, including clears to "no active segment".
    pub overlay_rebuilds: u64,
}

/// Retained-mode renderer for a path chain.
///
/// The full chain is drawn once into a base surface in the unfocused style. The active
/// segment is drawn separately into an overlay surface with a halo + core stroke. Both
/// surfaces are only redrawn when one of their inputs changes; [`PathRenderer::render`]
/// just composites them.
#[derive(Debug)]
pub struct PathRenderer {
    chain: Arc<PathChain>,
    transform: Arc<dyn CoordinateTransform>,
    style: PathStyle,
    canvas: Canvas,
    theme: Theme,
    base: Surface,
    overlay: Option<Surface>,
    focused: Option<usize>,
    stats: RendererStats,
}

impl PathRenderer {
    pub fn new(
        chain: Arc<PathChain>,
        canvas: Canvas,
        theme: Theme,
        style: PathStyle,
        transform: Arc<dyn CoordinateTransform>,
    ) -> PathchainResult<Self> {
        let base = draw_base(&chain, transform.as_ref(), canvas, &theme, &style)?;
        Ok(Self {
            chain,
            transform,
            style,
            canvas,
            theme,
            base,
            overlay: None,
            focused: None,
            stats: RendererStats {
                base_rebuilds: 1,
                overlay_rebuilds: 0,
            },
        })
    }

    pub fn chain(&self) -> &Arc<PathChain> {
        &self.chain
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    pub fn focused_segment(&self) -> Option<usize> {
        self.focused
    }

    pub fn base(&self) -> &Surface {
        &self.base
    }

    pub fn overlay(&self) -> Option<&Surface> {
        self.overlay.as_ref()
    }

    pub fn stats(&self) -> RendererStats {
        self.stats
    }

    /// Redraw the full chain into a fresh base surface.
    pub fn rebuild_base(&mut self) -> PathchainResult<()> {
        self.base = draw_base(
            &self.chain,
            self.transform.as_ref(),
            self.canvas,
            &self.theme,
            &self.style,
        )?;
        self.stats.base_rebuilds += 1;
        Ok(())
    }

    /// Redraw the overlay for the focused segment, or clear it when nothing is focused.
    pub fn rebuild_overlay(&mut self) -> PathchainResult<()> {
        self.overlay = draw_overlay(
            &self.chain,
            self.focused,
            self.transform.as_ref(),
            self.canvas,
            &self.theme,
            &self.style,
        )?;
        self.stats.overlay_rebuilds += 1;
        Ok(())
    }

    /// Highlight segment `index` (or nothing). Indices outside the chain count as nothing.
    ///
    /// Returns whether the overlay was rebuilt; focusing the current segment again is a no-op.
    pub fn focus_segment(&mut self, index: Option<usize>) -> PathchainResult<bool> {
        let index = index.filter(|&i| i < self.chain.len());
        if index == self.focused {
            return Ok(false);
        }
        tracing::debug!(from = ?self.focused, to = ?index, "focus segment");
        let previous = std::mem::replace(&mut self.focused, index);
        if let Err(err) = self.rebuild_overlay() {
            self.focused = previous;
            return Err(err);
        }
        Ok(true)
    }

    /// Composite base, then overlay, at the target origin.
    pub fn render(&self, target: &mut Frame) {
        over_at_origin(target, &self.base);
        if let Some(overlay) = &self.overlay {
            over_at_origin(target, overlay);
        }
    }

    /// Redraw both surfaces at the new size. Returns `false` if the size is unchanged.
    ///
    /// On failure the previous surfaces and canvas are kept.
    #[tracing::instrument(skip(self), fields(old = ?self.canvas))]
    pub fn on_canvas_resize(&mut self, width: u32, height: u32) -> PathchainResult<bool> {
        let canvas = Canvas::new(width, height);
        if canvas == self.canvas {
            return Ok(false);
        }
        self.rebuild_all(canvas, self.theme.clone())?;
        Ok(true)
    }

    /// Redraw both surfaces with the new theme. Returns `false` if the theme is unchanged.
    ///
    /// The overlay is redrawn together with the base so the active segment never shows
    /// the previous theme's color.
    #[tracing::instrument(skip(self, theme), fields(theme = %theme.name))]
    pub fn on_theme_change(&mut self, theme: &Theme) -> PathchainResult<bool> {
        if *theme == self.theme {
            return Ok(false);
        }
        self.rebuild_all(self.canvas, theme.clone())?;
        Ok(true)
    }

    fn rebuild_all(&mut self, canvas: Canvas, theme: Theme) -> PathchainResult<()> {
        let transform = self.transform.as_ref();
        let base = draw_base(&self.chain, transform, canvas, &theme, &self.style)?;
        let overlay = draw_overlay(
            &self.chain,
            self.focused,
            transform,
            canvas,
            &theme,
            &self.style,
        )?;

        self.canvas = canvas;
        self.theme = theme;
        self.base = base;
        self.stats.base_rebuilds += 1;
        if self.focused.is_some() {
            self.overlay = overlay;
            self.stats.overlay_rebuilds += 1;
        }
        tracing::debug!(stats = ?self.stats, "path surfaces rebuilt");
        Ok(())
    }
}

fn draw_base(
    chain: &PathChain,
    transform: &dyn CoordinateTransform,
    canvas: Canvas,
    theme: &Theme,
    style: &PathStyle,
) -> PathchainResult<Surface> {
    let mut polyline = Polyline::new();
    for curve in chain.iter() {
        polyline.push_curve(curve, transform, canvas);
    }
    let pass = StrokePass {
        width: transform.scale_length(style.inner_stroke_width, canvas),
        rgba: theme.path_color.with_opacity(style.unfocused_opacity),
    };
    stroke_onto_new_surface(canvas, &polyline, &[pass])
}

fn draw_overlay(
    chain: &PathChain,
    focused: Option<usize>,
    transform: &dyn CoordinateTransform,
    canvas: Canvas,
    theme: &Theme,
    style: &PathStyle,
) -> PathchainResult<Option<Surface>> {
    let Some(curve) = focused.and_then(|i| chain.curve(i)) else {
        return Ok(None);
    };
    let mut polyline = Polyline::new();
    polyline.push_curve(curve, transform, canvas);
    let halo = StrokePass {
        width: transform.scale_length(style.outer_stroke_width, canvas),
        rgba: theme.path_color.with_opacity(style.outer_opacity),
    };
    let core = StrokePass {
        width: transform.scale_length(style.inner_stroke_width, canvas),
        rgba: theme.path_color.with_opacity(1.0),
    };
    stroke_onto_new_surface(canvas, &polyline, &[halo, core]).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/render/path_renderer.rs"]
mod tests;
