use serde::Serialize;

use crate::encoding::Mapping;
use crate::error::{EncodeError, Result};
use crate::geometry::{Rect, Size};

use super::grid::LegendCursor;

/// Largest canvas side the bitmap backend can address.
const MAX_SIDE: u64 = i32::MAX as u64;

/// Largest pixel count the renderer will allocate (3 GiB of RGB8).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 30;

/// Pixel constants consumed by the layout formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub stripe_width: u32,
    pub stripe_height: u32,
    pub margin: u32,
    pub gap: u32,
    pub big_gap: u32,
    /// Estimated advance of one label character.
    pub font_width: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            stripe_width: 10,
            stripe_height: 12,
            margin: 20,
            gap: 4,
            big_gap: 16,
            font_width: 7,
        }
    }
}

/// Solved canvas geometry. Read-only once computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub token_count: usize,
    pub distinct_count: usize,
    pub stripe_width: u32,
    pub stripe_height: u32,
    pub margin: u32,
    pub strip_width: u32,
    pub entry_width: u32,
    pub entry_height: u32,
    pub entries_per_row: u32,
    pub legend_rows: u32,
    /// Y coordinate of the first legend row.
    pub legend_top: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

/// Compute the canvas geometry for a token sequence and its mapping.
///
/// Entries per row use floor division clamped to at least one, legend rows
/// use ceiling division, so the last legend row is never clipped and a single
/// over-long token still lays out.
pub fn compute_geometry(
    token_count: usize,
    mapping: &Mapping,
    config: &LayoutConfig,
) -> Result<Geometry> {
    if token_count == 0 || mapping.is_empty() {
        return Err(EncodeError::EmptyInput);
    }
    if config.stripe_width == 0 || config.stripe_height == 0 {
        return Err(EncodeError::InvalidConfig(
            "stripe dimensions must be positive".to_string(),
        ));
    }

    let stripe_width = u64::from(config.stripe_width);
    let stripe_height = u64::from(config.stripe_height);
    let margin = u64::from(config.margin);
    let gap = u64::from(config.gap);
    let tokens = token_count as u64;
    let distinct = mapping.len() as u64;

    let usable_width = tokens.saturating_mul(stripe_width);
    let strip_width = usable_width.saturating_add(margin.saturating_mul(2));

    let entry_width = (mapping.longest_token_width() as u64)
        .saturating_mul(u64::from(config.font_width))
        .saturating_add(stripe_width)
        .saturating_add(gap.saturating_mul(3));
    let entry_height = stripe_height + gap;

    let entries_per_row = (usable_width / entry_width).max(1);
    let legend_rows = distinct.div_ceil(entries_per_row);

    let legend_top = margin + stripe_height + u64::from(config.big_gap);
    let canvas_height = legend_rows
        .saturating_mul(entry_height)
        .saturating_add(legend_top)
        .saturating_add(margin);

    if strip_width > MAX_SIDE
        || canvas_height > MAX_SIDE
        || entry_width > MAX_SIDE
        || strip_width.saturating_mul(canvas_height) > MAX_CANVAS_PIXELS
    {
        return Err(EncodeError::CanvasTooLarge {
            width: strip_width,
            height: canvas_height,
        });
    }

    // Every value below is bounded by MAX_SIDE, so the narrowing casts are exact.
    Ok(Geometry {
        token_count,
        distinct_count: mapping.len(),
        stripe_width: config.stripe_width,
        stripe_height: config.stripe_height,
        margin: config.margin,
        strip_width: strip_width as u32,
        entry_width: entry_width as u32,
        entry_height: entry_height as u32,
        entries_per_row: entries_per_row.min(MAX_SIDE) as u32,
        legend_rows: legend_rows as u32,
        legend_top: legend_top as u32,
        canvas_width: strip_width as u32,
        canvas_height: canvas_height as u32,
    })
}

impl Geometry {
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Rectangle of the `index`-th strip cell, in sequence order.
    pub fn strip_cell(&self, index: usize) -> Rect {
        Rect::new(
            self.margin + index as u32 * self.stripe_width,
            self.margin,
            self.stripe_width,
            self.stripe_height,
        )
    }

    /// Space reserved for the whole legend block.
    pub fn legend_area(&self) -> Rect {
        Rect::new(
            self.margin,
            self.legend_top,
            self.canvas_width.saturating_sub(self.margin * 2),
            self.legend_rows * self.entry_height,
        )
    }

    /// Row-major placement of the legend entries.
    pub fn legend_cursor(&self) -> LegendCursor {
        LegendCursor::new(self)
    }
}
