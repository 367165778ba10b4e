use std::time::Duration;

use crate::{
    foundation::core::Canvas,
    foundation::error::PathchainResult,
    host::entity::Entity,
    render::frame::Frame,
    style::theme::Theme,
};

/// Minimal entity registry: ticks entities in insertion order and draws them by z-index.
#[derive(Debug)]
pub struct Stage {
    canvas: Canvas,
    theme: Theme,
    entities: Vec<Box<dyn Entity>>,
}

impl Stage {
    pub fn new(canvas: Canvas, theme: Theme) -> Self {
        Self {
            canvas,
            theme,
            entities: Vec::new(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Takes ownership of `entity` and runs its attach hook.
    pub fn add(&mut self, mut entity: Box<dyn Entity>) {
        entity.on_attach();
        tracing::debug!(tag = entity.tag(), "entity attached");
        self.entities.push(entity);
    }

    /// Removes the first entity tagged `tag`, running its detach hook.
    pub fn remove(&mut self, tag: &str) -> Option<Box<dyn Entity>> {
        let idx = self.entities.iter().position(|e| e.tag() == tag)?;
        let mut entity = self.entities.remove(idx);
        entity.on_detach();
        tracing::debug!(tag, "entity detached");
        Some(entity)
    }

    pub fn get(&self, tag: &str) -> Option<&dyn Entity> {
        self.entities
            .iter()
            .find(|e| e.tag() == tag)
            .map(|e| e.as_ref())
    }

    /// Update every entity, stopping at the first error.
    pub fn step(&mut self, delta: Duration) -> PathchainResult<()> {
        for entity in &mut self.entities {
            entity.update(delta)?;
        }
        Ok(())
    }

    /// Render into `frame`: cleared to the theme background, then entities by ascending
    /// z-index. Entities with equal z-index keep insertion order.
    pub fn render_into(&self, frame: &mut Frame) {
        frame.clear(self.theme.background.to_premul_opaque());
        let mut order: Vec<&dyn Entity> = self.entities.iter().map(|e| e.as_ref()).collect();
        order.sort_by_key(|e| e.z_index());
        for entity in order {
            entity.render(frame);
        }
    }

    pub fn render_frame(&self) -> Frame {
        let mut frame = Frame::new(self.canvas);
        self.render_into(&mut frame);
        frame
    }

    /// Forward a canvas change to every entity. Same-size calls are ignored.
    ///
    /// If an entity rejects the new canvas, the entities already resized are handed the
    /// previous canvas again and the stage keeps it.
    pub fn resize(&mut self, canvas: Canvas) -> PathchainResult<()> {
        if canvas == self.canvas {
            return Ok(());
        }
        for i in 0..self.entities.len() {
            if let Err(err) = self.entities[i].on_canvas_resize(canvas) {
                let previous = self.canvas;
                for entity in &mut self.entities[..i] {
                    if let Err(undo) = entity.on_canvas_resize(previous) {
                        tracing::warn!(tag = entity.tag(), error = %undo, "canvas rollback failed");
                    }
                }
                return Err(err);
            }
        }
        self.canvas = canvas;
        Ok(())
    }

    /// Forward a theme change to every entity, rolling back like [`Stage::resize`] on error.
    pub fn set_theme(&mut self, theme: Theme) -> PathchainResult<()> {
        if theme == self.theme {
            return Ok(());
        }
        for i in 0..self.entities.len() {
            if let Err(err) = self.entities[i].on_theme_change(&theme) {
                for entity in &mut self.entities[..i] {
                    if let Err(undo) = entity.on_theme_change(&self.theme) {
                        tracing::warn!(tag = entity.tag(), error = %undo, "theme rollback failed");
                    }
                }
                return Err(err);
            }
        }
        self.theme = theme;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/stage.rs"]
mod tests;
