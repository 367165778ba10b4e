use std::sync::Arc;

use crate::{
    foundation::core::Point,
    foundation::error::{PathchainError, PathchainResult},
    path::chain::PathChain,
    path::curve::{BezierCurve, Curve, HeadingInterpolation},
};

/// Consuming builder for a [`PathChain`] of Bezier segments.
///
/// Heading setters apply to the most recently added segment.
#[derive(Debug, Default)]
pub struct PathChainBuilder {
    curves: Vec<BezierCurve>,
}

impl PathChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bezier_curve(mut self, points: Vec<Point>) -> PathchainResult<Self> {
        self.curves.push(BezierCurve::new(points)?);
        Ok(self)
    }

    pub fn add_bezier_line(self, start: Point, end: Point) -> PathchainResult<Self> {
        self.add_bezier_curve(vec![start, end])
    }

    pub fn add_curve(mut self, curve: BezierCurve) -> Self {
        self.curves.push(curve);
        self
    }

    pub fn set_tangent_heading(self) -> PathchainResult<Self> {
        self.set_heading(HeadingInterpolation::Tangent)
    }

    pub fn set_reversed_tangent_heading(self) -> PathchainResult<Self> {
        self.set_heading(HeadingInterpolation::ReversedTangent)
    }

    pub fn set_constant_heading(self, heading: f64) -> PathchainResult<Self> {
        self.set_heading(HeadingInterpolation::Constant { heading })
    }

    pub fn set_linear_heading(self, start: f64, end: f64) -> PathchainResult<Self> {
        self.set_heading(HeadingInterpolation::Linear { start, end })
    }

    fn set_heading(mut self, heading: HeadingInterpolation) -> PathchainResult<Self> {
        let last = self.curves.last_mut().ok_or_else(|| {
            PathchainError::validation("heading interpolation set before any curve was added")
        })?;
        last.set_heading(heading);
        Ok(self)
    }

    pub fn build(self) -> PathChain {
        PathChain::new(
            self.curves
                .into_iter()
                .map(|c| Arc::new(c) as Arc<dyn Curve>)
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/builder.rs"]
mod tests;
