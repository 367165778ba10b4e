/// Where elapsed time falls within a chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentPosition {
    /// Inside segment `index`, `progress` in `[0, 1)`.
    Active { index: usize, progress: f64 },
    /// Past the end of the chain (or nothing to traverse).
    Exhausted,
}

impl SegmentPosition {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Active { index, .. } => Some(index),
            Self::Exhausted => None,
        }
    }
}

/// Maps elapsed time to a segment using a fixed duration per segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentMapper {
    segment_duration: f64,
}

impl SegmentMapper {
    pub fn new(segment_duration: f64) -> Self {
        Self { segment_duration }
    }

    pub fn segment_duration(&self) -> f64 {
        self.segment_duration
    }

    /// A non-positive or non-finite duration can never place time inside a segment.
    pub fn is_degenerate(&self) -> bool {
        !(self.segment_duration.is_finite() && self.segment_duration > 0.0)
    }

    /// Total time needed to traverse `len` segments.
    pub fn chain_duration(&self, len: usize) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.segment_duration * len as f64
    }

    pub fn locate(&self, elapsed: f64, len: usize) -> SegmentPosition {
        if len == 0 || self.is_degenerate() || !elapsed.is_finite() || elapsed < 0.0 {
            return SegmentPosition::Exhausted;
        }
        // Index and progress come from the same quotient so they agree at boundaries.
        let q = elapsed / self.segment_duration;
        let index = q.floor();
        if index >= len as f64 {
            return SegmentPosition::Exhausted;
        }
        let progress = (q - index).clamp(0.0, 1.0 - f64::EPSILON);
        SegmentPosition::Active {
            index: index as usize,
            progress,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/follow/mapper.rs"]
mod tests;
