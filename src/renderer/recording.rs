//! Surface that records draw calls instead of drawing
//!
//! Used by the headless native build and by rendering tests.

use super::{Color, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Color),
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Save,
    Restore,
    Translate {
        x: f32,
        y: f32,
    },
    Scale {
        x: f32,
        y: f32,
    },
    Font(String),
    Text {
        text: String,
        x: f32,
        y: f32,
    },
    Sprite {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    sprite_loaded: bool,
}

impl RecordingSurface {
    /// Recording surface that reports the player sprite as loaded
    pub fn with_sprite() -> Self {
        Self {
            commands: Vec::new(),
            sprite_loaded: true,
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Unmatched `save` calls
    pub fn depth(&self) -> i32 {
        self.commands.iter().fold(0, |depth, c| match c {
            DrawCommand::Save => depth + 1,
            DrawCommand::Restore => depth - 1,
            _ => depth,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Scale { x, y });
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_string()));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn sprite_ready(&self) -> bool {
        self.sprite_loaded
    }

    fn draw_sprite(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Sprite {
            x,
            y,
            width,
            height,
        });
    }
}
