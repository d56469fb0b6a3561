//! Drawing surface used by the renderer.
//!
//! [`Canvas`] is the seam between the renderer and a concrete raster backend.
//! [`BitmapCanvas`] draws into an in-memory RGB buffer through plotters and
//! serialises it as PNG; [`RecordingCanvas`] only records the calls.

mod bitmap;
mod font;
mod recording;

pub use bitmap::{BitmapCanvas, write_png};
pub use font::{LabelFont, SYSTEM_FONT_CANDIDATES, load_label_font};
pub use recording::{DrawCommand, RecordingCanvas};

use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::palette::Rgb;

/// Pixel position on the canvas.
pub type Point = (u32, u32);

/// Immediate-mode 2D drawing surface.
pub trait Canvas {
    fn size(&self) -> Size;

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()>;

    /// Outline `rect` with a stroke of `width` pixels.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: u32) -> Result<()>;

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: u32) -> Result<()>;

    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb) -> Result<()>;

    /// Draw `text` with its left edge at `origin.0`, vertically centred on
    /// `origin.1`. Returns `false` when the surface has no font to draw with.
    fn text(&mut self, text: &str, origin: Point, size: f64, color: Rgb) -> Result<bool>;
}
