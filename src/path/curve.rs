//! Parametric curve segments.
//!
//! A [`Curve`] is the only geometry the simulation and renderer consume: a position and a
//! heading goal for every `t` in `[0, 1]`. [`BezierCurve`] is the built-in implementation;
//! hosts with their own geometry implement the trait directly.

use std::f64::consts::PI;

use kurbo::{ParamCurve, ParamCurveDeriv};

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{PathchainError, PathchainResult};
use crate::foundation::math::lerp;

const DEGENERATE_TANGENT_EPS: f64 = 1e-12;

/// A parametric segment queryable for position and heading over `t` in `[0, 1]`.
pub trait Curve: std::fmt::Debug + Send + Sync {
    fn point(&self, t: f64) -> Point;

    /// Heading the actor should face at `t`, in radians.
    fn heading_goal(&self, t: f64) -> f64;
}

/// How a [`BezierCurve`] derives its heading goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadingInterpolation {
    /// Face along the direction of travel.
    #[default]
    Tangent,
    /// Face against the direction of travel (driving backwards).
    ReversedTangent,
    Constant { heading: f64 },
    /// Turn from `start` to `end` along the shorter arc, linearly in `t`.
    Linear { start: f64, end: f64 },
}

/// Arbitrary-degree Bezier segment (two control points make a line).
#[derive(Clone, Debug, PartialEq)]
pub struct BezierCurve {
    control_points: Vec<Point>,
    heading: HeadingInterpolation,
}

impl BezierCurve {
    pub fn new(control_points: Vec<Point>) -> PathchainResult<Self> {
        if control_points.len() < 2 {
            return Err(PathchainError::validation(format!(
                "bezier curve needs at least 2 control points, got {}",
                control_points.len()
            )));
        }
        if let Some(p) = control_points
            .iter()
            .find(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(PathchainError::validation(format!(
                "bezier control point must be finite, got ({}, {})",
                p.x, p.y
            )));
        }
        Ok(Self {
            control_points,
            heading: HeadingInterpolation::default(),
        })
    }

    pub fn line(start: Point, end: Point) -> PathchainResult<Self> {
        Self::new(vec![start, end])
    }

    pub fn with_heading(mut self, heading: HeadingInterpolation) -> Self {
        self.heading = heading;
        self
    }

    pub fn set_heading(&mut self, heading: HeadingInterpolation) {
        self.heading = heading;
    }

    pub fn heading(&self) -> HeadingInterpolation {
        self.heading
    }

    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }

    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    /// First derivative with respect to `t` (hodograph evaluated by de Casteljau).
    pub fn derivative(&self, t: f64) -> Vec2 {
        let n = self.degree() as f64;
        let diffs: Vec<Vec2> = self
            .control_points
            .windows(2)
            .map(|w| (w[1] - w[0]) * n)
            .collect();
        de_casteljau(&diffs, t.clamp(0.0, 1.0))
    }

    fn tangent_angle(&self, t: f64) -> f64 {
        let d = self.derivative(t);
        if d.hypot() > DEGENERATE_TANGENT_EPS {
            return d.atan2();
        }
        let chord = self.control_points[self.control_points.len() - 1] - self.control_points[0];
        if chord.hypot() > DEGENERATE_TANGENT_EPS {
            chord.atan2()
        } else {
            0.0
        }
    }
}

impl Curve for BezierCurve {
    fn point(&self, t: f64) -> Point {
        let pts: Vec<Vec2> = self.control_points.iter().map(|p| p.to_vec2()).collect();
        de_casteljau(&pts, t.clamp(0.0, 1.0)).to_point()
    }

    fn heading_goal(&self, t: f64) -> f64 {
        match self.heading {
            HeadingInterpolation::Tangent => self.tangent_angle(t),
            HeadingInterpolation::ReversedTangent => normalize_angle(self.tangent_angle(t) + PI),
            HeadingInterpolation::Constant { heading } => heading,
            HeadingInterpolation::Linear { start, end } => {
                start + lerp(0.0, shortest_angle_delta(start, end), t)
            }
        }
    }
}

impl Curve for kurbo::CubicBez {
    fn point(&self, t: f64) -> Point {
        self.eval(t.clamp(0.0, 1.0))
    }

    fn heading_goal(&self, t: f64) -> f64 {
        self.deriv().eval(t.clamp(0.0, 1.0)).to_vec2().atan2()
    }
}

impl Curve for kurbo::Line {
    fn point(&self, t: f64) -> Point {
        self.eval(t.clamp(0.0, 1.0))
    }

    fn heading_goal(&self, _t: f64) -> f64 {
        (self.p1 - self.p0).atan2()
    }
}

fn de_casteljau(points: &[Vec2], t: f64) -> Vec2 {
    let mut work = points.to_vec();
    let mut n = work.len();
    while n > 1 {
        for i in 0..n - 1 {
            work[i] = work[i].lerp(work[i + 1], t);
        }
        n -= 1;
    }
    work.first().copied().unwrap_or(Vec2::ZERO)
}

/// Wrap an angle into `(-PI, PI]`.
pub(crate) fn normalize_angle(a: f64) -> f64 {
    let mut a = a % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

fn shortest_angle_delta(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

#[cfg(test)]
#[path = "../../tests/unit/path/curve.rs"]
mod tests;
