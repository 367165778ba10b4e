/// Stroke widths (logical units) and opacities used when drawing a chain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathStyle {
    /// Width of the full-chain stroke and of the active segment's core.
    pub inner_stroke_width: f64,
    /// Width of the active segment's halo.
    pub outer_stroke_width: f64,
    pub unfocused_opacity: f32,
    pub outer_opacity: f32,
}

impl PathStyle {
    pub const INNER_STROKE_WIDTH: f64 = 0.5;
    pub const OUTER_STROKE_WIDTH: f64 = 2.0;
    pub const UNFOCUSED_OPACITY: f32 = 0.3;
    pub const OUTER_OPACITY: f32 = 0.4;
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            inner_stroke_width: Self::INNER_STROKE_WIDTH,
            outer_stroke_width: Self::OUTER_STROKE_WIDTH,
            unfocused_opacity: Self::UNFOCUSED_OPACITY,
            outer_opacity: Self::OUTER_OPACITY,
        }
    }
}
