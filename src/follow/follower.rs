//! Actor that walks a [`PathChain`] over simulated time.
//!
//! Each segment of the chain takes a fixed amount of time. On every tick the follower
//! works out which segment is active, keeps the renderer's highlighted segment in sync,
//! and samples the active curve at eased progress to produce the displayed [`Pose`].
//! The actor footprint is redrawn whenever that pose moves.

use std::sync::Arc;
use std::time::Duration;

use crate::{
    follow::config::FollowerConfig,
    follow::mapper::{SegmentMapper, SegmentPosition},
    foundation::core::{Canvas, Pose},
    foundation::error::PathchainResult,
    path::chain::PathChain,
    render::actor::{Footprint, draw_actor},
    render::composite::over_at_origin,
    render::frame::Frame,
    render::path_renderer::PathRenderer,
    render::surface::{Surface, surface_dims},
    style::path_style::PathStyle,
    style::theme::Theme,
    transform::{CoordinateTransform, FieldTransform},
};

/// Lifecycle of a [`PathFollower`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FollowState {
    /// No chain assigned, or the assigned chain has nothing to traverse.
    Idle,
    Running,
    /// Chain assigned, elapsed time frozen.
    Paused,
    /// Reached the end of a non-looping chain.
    Finished,
}

#[derive(Debug)]
pub struct PathFollower {
    config: FollowerConfig,
    mapper: SegmentMapper,
    canvas: Canvas,
    theme: Theme,
    style: PathStyle,
    transform: Arc<dyn CoordinateTransform>,

    chain: Option<Arc<PathChain>>,
    renderer: Option<PathRenderer>,
    /// Footprint at `pose`; present whenever a chain is assigned.
    actor: Option<Surface>,
    state: FollowState,
    looping: bool,
    elapsed: f64,
    active: Option<usize>,
    skipped_ticks: u32,
    pose: Pose,
}

impl PathFollower {
    /// A follower drawing in field coordinates with the default path style.
    pub fn new(config: FollowerConfig, canvas: Canvas, theme: Theme) -> Self {
        Self {
            mapper: SegmentMapper::new(config.segment_duration),
            looping: config.looping,
            pose: config.start_pose,
            config,
            canvas,
            theme,
            style: PathStyle::default(),
            transform: Arc::new(FieldTransform::default()),
            chain: None,
            renderer: None,
            actor: None,
            state: FollowState::Idle,
            elapsed: 0.0,
            active: None,
            skipped_ticks: 0,
        }
    }

    /// Applies to chains assigned after this call.
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    /// Applies to chains assigned after this call.
    pub fn with_transform(mut self, transform: Arc<dyn CoordinateTransform>) -> Self {
        self.transform = transform;
        self
    }

    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn active_segment(&self) -> Option<usize> {
        self.active
    }

    pub fn chain(&self) -> Option<&Arc<PathChain>> {
        self.chain.as_ref()
    }

    pub fn renderer(&self) -> Option<&PathRenderer> {
        self.renderer.as_ref()
    }

    /// Surface holding the actor footprint, if a chain is assigned.
    pub fn actor(&self) -> Option<&Surface> {
        self.actor.as_ref()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_finished(&self) -> bool {
        self.state == FollowState::Finished
    }

    pub fn is_paused(&self) -> bool {
        self.state == FollowState::Paused
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Start following `chain` from its beginning, replacing any chain in flight.
    ///
    /// Elapsed time, the active segment and the warm-up counter are reset. Fails only if
    /// the chain's base surface cannot be allocated, in which case the previous chain is
    /// left untouched.
    #[tracing::instrument(skip(self, chain))]
    pub fn follow_path(&mut self, chain: impl Into<Arc<PathChain>>) -> PathchainResult<()> {
        let chain = chain.into();
        let renderer = PathRenderer::new(
            Arc::clone(&chain),
            self.canvas,
            self.theme.clone(),
            self.style,
            Arc::clone(&self.transform),
        )?;
        let actor = self.draw_actor_at(self.canvas, &self.theme)?;

        self.elapsed = 0.0;
        self.active = None;
        self.skipped_ticks = 0;
        self.state = match self.mapper.locate(0.0, chain.len()) {
            SegmentPosition::Exhausted => {
                tracing::warn!(
                    segments = chain.len(),
                    segment_duration = self.mapper.segment_duration(),
                    "chain has nothing to traverse; follower stays idle"
                );
                FollowState::Idle
            }
            SegmentPosition::Active { .. } => FollowState::Running,
        };
        tracing::debug!(segments = chain.len(), state = ?self.state, "follow path");
        self.chain = Some(chain);
        self.renderer = Some(renderer);
        self.actor = Some(actor);
        Ok(())
    }

    /// Drop the current chain and go back to [`FollowState::Idle`]. The pose is kept.
    pub fn clear_path(&mut self) {
        self.chain = None;
        self.renderer = None;
        self.actor = None;
        self.state = FollowState::Idle;
        self.elapsed = 0.0;
        self.active = None;
        self.skipped_ticks = 0;
    }

    pub fn pause(&mut self) {
        if self.state == FollowState::Running {
            self.state = FollowState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == FollowState::Paused {
            self.state = FollowState::Running;
        }
    }

    /// Advance by `delta` and refresh the pose.
    ///
    /// Logical misuse (no chain, finished chain) is a no-op. Errors only come from
    /// overlay surface allocation.
    pub fn tick(&mut self, delta: Duration) -> PathchainResult<()> {
        if !matches!(self.state, FollowState::Running | FollowState::Paused) {
            return Ok(());
        }
        let Some(chain) = self.chain.clone() else {
            return Ok(());
        };

        if self.skipped_ticks < self.config.skip_ticks {
            self.skipped_ticks += 1;
            return Ok(());
        }

        if self.state == FollowState::Running {
            self.elapsed += delta.as_secs_f64();
        }

        let mut position = self.mapper.locate(self.elapsed, chain.len());
        if position == SegmentPosition::Exhausted {
            if !self.looping {
                tracing::info!(elapsed = self.elapsed, "chain finished");
                self.state = FollowState::Finished;
                return self.set_active(None);
            }
            tracing::debug!(elapsed = self.elapsed, "chain finished, looping");
            self.elapsed = 0.0;
            position = self.mapper.locate(self.elapsed, chain.len());
        }

        match position {
            SegmentPosition::Exhausted => {
                tracing::warn!("chain became untraversable; follower going idle");
                self.state = FollowState::Idle;
                self.set_active(None)
            }
            SegmentPosition::Active { index, progress } => {
                self.set_active(Some(index))?;
                if let Some(curve) = chain.curve(index) {
                    let t = self.config.ease.apply(progress);
                    let p = curve.point(t);
                    let pose = Pose::new(p.x, p.y, curve.heading_goal(t));
                    if pose != self.pose {
                        self.pose = pose;
                        self.actor = Some(self.draw_actor_at(self.canvas, &self.theme)?);
                    }
                }
                Ok(())
            }
        }
    }

    /// Composite the chain drawing, then the actor, onto `target`. Draws nothing without
    /// a chain.
    pub fn render(&self, target: &mut Frame) {
        if let Some(renderer) = &self.renderer {
            renderer.render(target);
        }
        if let Some(actor) = &self.actor {
            over_at_origin(target, actor);
        }
    }

    /// Returns whether surfaces were rebuilt.
    ///
    /// The size is validated even without a chain, so a bad canvas is rejected here rather
    /// than by a later `follow_path`.
    pub fn on_canvas_resize(&mut self, width: u32, height: u32) -> PathchainResult<bool> {
        let canvas = Canvas::new(width, height);
        surface_dims(canvas)?;
        let actor = match &self.actor {
            Some(_) if canvas != self.canvas => Some(self.draw_actor_at(canvas, &self.theme)?),
            _ => None,
        };
        let rebuilt = match &mut self.renderer {
            Some(renderer) => renderer.on_canvas_resize(width, height)?,
            None => false,
        };
        if actor.is_some() {
            self.actor = actor;
        }
        self.canvas = canvas;
        Ok(rebuilt)
    }

    /// Returns whether surfaces were rebuilt.
    pub fn on_theme_change(&mut self, theme: &Theme) -> PathchainResult<bool> {
        let actor = match &self.actor {
            Some(_) if *theme != self.theme => Some(self.draw_actor_at(self.canvas, theme)?),
            _ => None,
        };
        let rebuilt = match &mut self.renderer {
            Some(renderer) => renderer.on_theme_change(theme)?,
            None => false,
        };
        if actor.is_some() {
            self.actor = actor;
        }
        self.theme = theme.clone();
        Ok(rebuilt)
    }

    fn draw_actor_at(&self, canvas: Canvas, theme: &Theme) -> PathchainResult<Surface> {
        let footprint = Footprint {
            width: self.config.actor_width,
            height: self.config.actor_height,
            opacity: self.config.actor_opacity,
            color: theme.actor_color,
        };
        draw_actor(self.pose, footprint, self.transform.as_ref(), canvas)
    }

    fn set_active(&mut self, index: Option<usize>) -> PathchainResult<()> {
        if index == self.active {
            return Ok(());
        }
        tracing::debug!(from = ?self.active, to = ?index, elapsed = self.elapsed, "segment change");
        if let Some(renderer) = &mut self.renderer {
            renderer.focus_segment(index)?;
        }
        self.active = index;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/follow/follower.rs"]
mod tests;
