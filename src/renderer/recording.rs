//! Recording surface
//!
//! Captures draw calls instead of painting. Used by the native runner and
//! by tests to observe what a frame would draw.

use glam::Vec2;

use super::surface::{Color, CompositeMode, Surface};

/// One captured draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fade {
        amount: f32,
    },
    Composite(CompositeMode),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Square {
        center: Vec2,
        side: f32,
        rotation: f32,
        color: Color,
    },
    Text {
        text: String,
        center: Vec2,
        font_px: f32,
        color: Color,
        alpha: f32,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain captured commands (call once per frame to bound memory)
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn square_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Square { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fade(&mut self, amount: f32) {
        self.commands.push(DrawCommand::Fade { amount });
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.commands.push(DrawCommand::Composite(mode));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_rotated_square(&mut self, center: Vec2, side: f32, rotation: f32, color: Color) {
        self.commands.push(DrawCommand::Square {
            center,
            side,
            rotation,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, center: Vec2, font_px: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            font_px,
            color,
            alpha,
        });
    }
}
