use std::time::Duration;

use crate::{
    follow::follower::PathFollower,
    foundation::core::Canvas,
    foundation::error::PathchainResult,
    render::frame::Frame,
    style::theme::Theme,
};

/// Something a [`Stage`](crate::Stage) drives every tick and draws every frame.
pub trait Entity: std::fmt::Debug + Send {
    /// Stable label, used for lookup and removal.
    fn tag(&self) -> &str;

    /// Draw order; lower values are drawn first.
    fn z_index(&self) -> i32 {
        0
    }

    fn update(&mut self, delta: Duration) -> PathchainResult<()>;

    fn render(&self, target: &mut Frame);

    fn on_canvas_resize(&mut self, canvas: Canvas) -> PathchainResult<()>;

    fn on_theme_change(&mut self, theme: &Theme) -> PathchainResult<()>;

    fn on_attach(&mut self) {}

    fn on_detach(&mut self) {}
}

impl Entity for PathFollower {
    fn tag(&self) -> &str {
        "path_follower"
    }

    fn update(&mut self, delta: Duration) -> PathchainResult<()> {
        self.tick(delta)
    }

    fn render(&self, target: &mut Frame) {
        PathFollower::render(self, target);
    }

    fn on_canvas_resize(&mut self, canvas: Canvas) -> PathchainResult<()> {
        PathFollower::on_canvas_resize(self, canvas.width, canvas.height).map(|_| ())
    }

    fn on_theme_change(&mut self, theme: &Theme) -> PathchainResult<()> {
        PathFollower::on_theme_change(self, theme).map(|_| ())
    }

    /// Leaving the stage drops the chain and its surfaces.
    fn on_detach(&mut self) {
        self.clear_path();
    }
}
