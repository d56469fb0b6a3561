//! Row-major legend placement.
//!
//! The cursor starts at the left margin of the legend block and moves one
//! entry width to the right per entry. Once a row holds `entries_per_row`
//! entries the horizontal position resets to the margin and the cursor drops
//! by one entry height.

use super::core::Geometry;
use crate::geometry::Rect;

/// Placement of one legend entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendSlot {
    /// Position in legend order.
    pub index: usize,
    pub row: u32,
    pub col: u32,
    /// Full cell reserved for the entry (swatch, separator and label).
    pub entry: Rect,
    /// Colour swatch, same size as a strip cell.
    pub swatch: Rect,
    /// Left edge of the label text.
    pub label_x: u32,
    /// Vertical centre line of the label text.
    pub label_y: u32,
}

/// Iterator over legend slots for a solved geometry.
#[derive(Debug, Clone)]
pub struct LegendCursor {
    left: u32,
    x: u32,
    y: u32,
    col: u32,
    row: u32,
    index: usize,
    remaining: usize,
    entry_width: u32,
    entry_height: u32,
    entries_per_row: u32,
    stripe_width: u32,
    stripe_height: u32,
}

impl LegendCursor {
    pub fn new(geometry: &Geometry) -> Self {
        Self {
            left: geometry.margin,
            x: geometry.margin,
            y: geometry.legend_top,
            col: 0,
            row: 0,
            index: 0,
            remaining: geometry.distinct_count,
            entry_width: geometry.entry_width,
            entry_height: geometry.entry_height,
            entries_per_row: geometry.entries_per_row.max(1),
            stripe_width: geometry.stripe_width,
            stripe_height: geometry.stripe_height,
        }
    }

    fn advance(&mut self) {
        self.index += 1;
        self.col += 1;
        if self.col >= self.entries_per_row {
            self.col = 0;
            self.row += 1;
            self.x = self.left;
            self.y = self.y.saturating_add(self.entry_height);
        } else {
            self.x = self.x.saturating_add(self.entry_width);
        }
    }
}

impl Iterator for LegendCursor {
    type Item = LegendSlot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let swatch = Rect::new(self.x, self.y, self.stripe_width, self.stripe_height);
        let slot = LegendSlot {
            index: self.index,
            row: self.row,
            col: self.col,
            entry: Rect::new(self.x, self.y, self.entry_width, self.entry_height),
            swatch,
            label_x: swatch.right(),
            label_y: swatch.y + self.stripe_height / 2,
        };
        self.advance();
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LegendCursor {}
