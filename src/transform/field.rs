use crate::foundation::core::{Affine, Canvas, Point, Vec2};

use super::CoordinateTransform;

/// Square playing field centred on the origin with +y pointing up.
///
/// The field is stretched to fill the canvas; lengths scale with the horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldTransform {
    pub field_width: f64,
    pub field_height: f64,
}

impl Default for FieldTransform {
    fn default() -> Self {
        Self {
            field_width: 144.0,
            field_height: 144.0,
        }
    }
}

impl FieldTransform {
    pub fn new(field_width: f64, field_height: f64) -> Self {
        Self {
            field_width,
            field_height,
        }
    }

    pub fn to_affine(self, canvas: Canvas) -> Affine {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let sx = w / self.field_width;
        let sy = h / self.field_height;
        // T(canvas centre) * S(sx, -sy)
        Affine::translate(Vec2::new(w / 2.0, h / 2.0)) * Affine::scale_non_uniform(sx, -sy)
    }
}

impl CoordinateTransform for FieldTransform {
    fn to_pixel_space(&self, p: Point, canvas: Canvas) -> Point {
        self.to_affine(canvas) * p
    }

    fn scale_length(&self, len: f64, canvas: Canvas) -> f64 {
        len * f64::from(canvas.width) / self.field_width
    }
}

/// Identity transform for hosts whose logical units already are pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelTransform;

impl CoordinateTransform for PixelTransform {
    fn to_pixel_space(&self, p: Point, _canvas: Canvas) -> Point {
        p
    }

    fn scale_length(&self, len: f64, _canvas: Canvas) -> f64 {
        len
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/field.rs"]
mod tests;
