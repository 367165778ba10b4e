use crate::animation::ease::Ease;
use crate::foundation::core::Pose;

/// Ticks consumed after every `follow_path` before time starts advancing.
pub const DEFAULT_SKIP_TICKS: u32 = 2;
/// Seconds spent on each segment of a chain.
pub const DEFAULT_SEGMENT_SECS: f64 = 2.0;
/// Actor footprint edge length in logical units.
pub const DEFAULT_ACTOR_SIZE: f64 = 18.0;
pub const DEFAULT_ACTOR_OPACITY: f32 = 0.8;

/// Tunables for a [`PathFollower`](crate::PathFollower).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FollowerConfig {
    /// Seconds per segment. Non-positive values make every chain degenerate.
    pub segment_duration: f64,
    /// Warm-up ticks that absorb oversized first-frame deltas. Zero disables warm-up.
    pub skip_ticks: u32,
    pub looping: bool,
    pub ease: Ease,
    /// Pose reported before the first active tick.
    pub start_pose: Pose,
    /// Footprint extent along the heading, logical units.
    pub actor_width: f64,
    /// Footprint extent across the heading, logical units.
    pub actor_height: f64,
    pub actor_opacity: f32,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            segment_duration: DEFAULT_SEGMENT_SECS,
            skip_ticks: DEFAULT_SKIP_TICKS,
            looping: true,
            ease: Ease::InOutCubic,
            start_pose: Pose::default(),
            actor_width: DEFAULT_ACTOR_SIZE,
            actor_height: DEFAULT_ACTOR_SIZE,
            actor_opacity: DEFAULT_ACTOR_OPACITY,
        }
    }
}

impl FollowerConfig {
    /// Defaults, overridden by `PATHCHAIN_SKIP_TICKS` and `PATHCHAIN_SEGMENT_SECS` when set
    /// to parseable values.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(n) = lookup("PATHCHAIN_SKIP_TICKS").and_then(|v| v.trim().parse::<u32>().ok())
        {
            self.skip_ticks = n;
        }
        if let Some(secs) = lookup("PATHCHAIN_SEGMENT_SECS")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|s| s.is_finite())
        {
            self.segment_duration = secs;
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/follow/config.rs"]
mod tests;
