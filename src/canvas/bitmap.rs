use std::io::Write;
use std::path::Path;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{Canvas, Point};
use crate::error::{EncodeError, Result};
use crate::geometry::{Rect, Size};
use crate::palette::Rgb;

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn point((x, y): Point) -> (i32, i32) {
    (x as i32, y as i32)
}

/// Inclusive pixel corners covered by `rect`.
fn corners(rect: Rect) -> [(i32, i32); 2] {
    [
        point((rect.x, rect.y)),
        point((
            rect.right().saturating_sub(1).max(rect.x),
            rect.bottom().saturating_sub(1).max(rect.y),
        )),
    ]
}

/// RGB8 raster drawn through the plotters bitmap backend.
pub struct BitmapCanvas {
    size: Size,
    buffer: Vec<u8>,
    font_family: Option<String>,
}

impl BitmapCanvas {
    /// Allocate a canvas filled with `background`.
    ///
    /// Callers are expected to pass sizes produced by the layout engine,
    /// which keeps both sides within the backend's `i32` coordinate range.
    pub fn new(size: Size, background: Rgb) -> Result<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(EncodeError::Backend(format!(
                "cannot allocate a {}x{} canvas",
                size.width, size.height
            )));
        }
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(size.rgb_len())
            .map_err(|_| EncodeError::CanvasTooLarge {
                width: u64::from(size.width),
                height: u64::from(size.height),
            })?;
        buffer.resize(size.rgb_len(), 0);
        let mut canvas = Self {
            size,
            buffer,
            font_family: None,
        };
        canvas.draw(|area| area.fill(&rgb(background)))?;
        Ok(canvas)
    }

    /// Use a font registered under `family` for [`Canvas::text`].
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn has_font(&self) -> bool {
        self.font_family.is_some()
    }

    /// Raw RGB8 pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let offset = (y as usize * self.size.width as usize + x as usize) * 3;
        Some(Rgb(
            self.buffer[offset],
            self.buffer[offset + 1],
            self.buffer[offset + 2],
        ))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(
                &self.buffer,
                self.size.width,
                self.size.height,
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| EncodeError::Backend(format!("PNG encode: {e}")))?;
        Ok(png)
    }

    /// Encode and persist the canvas at `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let png = self.encode_png()?;
        write_png(path, &png)
    }

    fn draw<F, E>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> std::result::Result<(), E>,
        E: std::fmt::Display,
    {
        let dims = (self.size.width, self.size.height);
        let root = BitMapBackend::with_buffer(&mut self.buffer, dims).into_drawing_area();
        op(&root).map_err(|e| EncodeError::Backend(e.to_string()))?;
        root.present()
            .map_err(|e| EncodeError::Backend(e.to_string()))?;
        Ok(())
    }
}

impl Canvas for BitmapCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        if rect.width == 0 || rect.height == 0 {
            return Ok(());
        }
        self.draw(|area| area.draw(&Rectangle::new(corners(rect), rgb(color).filled())))
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: u32) -> Result<()> {
        if rect.width == 0 || rect.height == 0 {
            return Ok(());
        }
        self.draw(|area| {
            area.draw(&Rectangle::new(
                corners(rect),
                rgb(color).stroke_width(width),
            ))
        })
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, width: u32) -> Result<()> {
        self.draw(|area| {
            area.draw(&PathElement::new(
                vec![point(from), point(to)],
                rgb(color).stroke_width(width),
            ))
        })
    }

    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb) -> Result<()> {
        if radius == 0 {
            return Ok(());
        }
        self.draw(|area| {
            area.draw(&Circle::new(
                point(center),
                radius as i32,
                rgb(color).filled(),
            ))
        })
    }

    fn text(&mut self, text: &str, origin: Point, size: f64, color: Rgb) -> Result<bool> {
        let Some(family) = self.font_family.clone() else {
            return Ok(false);
        };
        if text.is_empty() {
            return Ok(true);
        }
        let fill = rgb(color);
        self.draw(|area| {
            let style = (family.as_str(), size)
                .into_font()
                .color(&fill)
                .pos(Pos::new(HPos::Left, VPos::Center));
            area.draw(&Text::new(text.to_string(), point(origin), style))
        })?;
        Ok(true)
    }
}

/// Write `bytes` to `path` without ever leaving a partial file there.
///
/// Data goes to a uniquely named temporary file in the target directory and
/// is renamed into place once fully written. The temporary file is removed
/// on failure.
pub fn write_png(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let render_io = |source| EncodeError::RenderIo {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut staging = tempfile::Builder::new()
        .prefix(".motif-strip-")
        .suffix(".partial")
        .tempfile_in(parent)
        .map_err(render_io)?;
    staging.write_all(bytes).map_err(render_io)?;
    staging.as_file().sync_all().map_err(render_io)?;
    staging.persist(path).map_err(|e| render_io(e.error))?;
    Ok(())
}
