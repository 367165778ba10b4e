//! JSON description of a path chain.
//!
//! ```json
//! { "curves": [ { "points": [[0, 0], [24, 0]], "heading": { "kind": "tangent" } } ] }
//! ```

use std::path::Path;

use crate::{
    foundation::core::Point,
    foundation::error::{PathchainError, PathchainResult},
    path::builder::PathChainBuilder,
    path::chain::PathChain,
    path::curve::{BezierCurve, HeadingInterpolation},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainDoc {
    pub curves: Vec<CurveDoc>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurveDoc {
    /// Bezier control points `[x, y]` in logical units.
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub heading: HeadingInterpolation,
}

impl ChainDoc {
    pub fn from_json_str(s: &str) -> PathchainResult<Self> {
        let doc: Self = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PathchainResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            PathchainError::validation(format!(
                "failed to read chain document '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> PathchainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> PathchainResult<()> {
        for (i, c) in self.curves.iter().enumerate() {
            if c.points.len() < 2 {
                return Err(PathchainError::validation(format!(
                    "curve {i} needs at least 2 points, got {}",
                    c.points.len()
                )));
            }
        }
        Ok(())
    }

    pub fn to_chain(&self) -> PathchainResult<PathChain> {
        let mut builder = PathChainBuilder::new();
        for (i, c) in self.curves.iter().enumerate() {
            let points = c.points.iter().map(|&[x, y]| Point::new(x, y)).collect();
            let curve = BezierCurve::new(points)
                .map_err(|e| PathchainError::validation(format!("curve {i}: {e}")))?
                .with_heading(c.heading);
            builder = builder.add_curve(curve);
        }
        Ok(builder.build())
    }

    /// Two-segment demo: a quartic Bezier sweep followed by a straight line, both
    /// facing along the direction of travel. Coordinates are centred on a 144 unit field.
    pub fn demo() -> Self {
        let shift = |x: f64, y: f64| [x - 72.0, y - 72.0];
        Self {
            curves: vec![
                CurveDoc {
                    points: vec![
                        shift(7.701, 85.476),
                        shift(31.572, 120.590),
                        shift(75.465, 8.317),
                        shift(3.465, 87.317),
                        shift(57.138, 97.335),
                    ],
                    heading: HeadingInterpolation::Tangent,
                },
                CurveDoc {
                    points: vec![shift(57.138, 97.335), shift(102.263, 19.713)],
                    heading: HeadingInterpolation::Tangent,
                },
            ],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/doc.rs"]
mod tests;
