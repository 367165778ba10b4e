//! Logical-to-pixel coordinate transforms.
//!
//! The renderer never interprets axes itself; every logical point goes through a
//! [`CoordinateTransform`] before it is stroked.

mod field;

pub use field::{FieldTransform, PixelTransform};

use crate::foundation::core::{Canvas, Point};

/// Maps logical coordinates onto a canvas.
///
/// Implementations must be deterministic and must not keep per-call state.
pub trait CoordinateTransform: std::fmt::Debug + Send + Sync {
    fn to_pixel_space(&self, p: Point, canvas: Canvas) -> Point;

    /// Scale a logical length (e.g. a stroke width) to pixels.
    fn scale_length(&self, len: f64, canvas: Canvas) -> f64;
}
