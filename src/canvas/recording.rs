use super::{Canvas, Point};
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::palette::Rgb;

/// One call made against a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Rgb },
    StrokeRect { rect: Rect, color: Rgb, width: u32 },
    Line { from: Point, to: Point, color: Rgb, width: u32 },
    FillCircle { center: Point, radius: u32, color: Rgb },
    Text { text: String, origin: Point, size: f64, color: Rgb },
}

/// Canvas that keeps the draw calls instead of rasterising them.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    size: Size,
    with_text: bool,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            with_text: true,
            commands: Vec::new(),
        }
    }

    /// Behave like a surface without a label font.
    pub fn without_text(mut self) -> Self {
        self.with_text = false;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Filled rectangles of exactly `width` x `height`, in call order.
    pub fn fills_of_size(&self, width: u32, height: u32) -> Vec<(Rect, Rgb)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { rect, color }
                    if rect.width == width && rect.height == height =>
                {
                    Some((*rect, *color))
                }
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: u32) -> Result<()> {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: u32) -> Result<()> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb) -> Result<()> {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn text(&mut self, text: &str, origin: Point, size: f64, color: Rgb) -> Result<bool> {
        if !self.with_text {
            return Ok(false);
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            size,
            color,
        });
        Ok(true)
    }
}
