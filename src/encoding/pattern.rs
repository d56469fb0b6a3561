use serde::Serialize;

/// Number of patterns with a defined decoration (including the plain one).
pub const PATTERN_COUNT: usize = 6;

/// Decoration drawn over a colour swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Colour only.
    Plain,
    /// Line from the top-left to the bottom-right corner.
    DiagonalLine,
    /// Line through the horizontal centre.
    VerticalLine,
    /// Line through the vertical centre.
    HorizontalLine,
    /// Top-left and bottom-right quarters filled.
    Checkerboard,
    /// Filled circle in the middle of the swatch.
    CenterDot,
    /// Index past the defined set. Rendered without decoration.
    Overflow,
}

impl Pattern {
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Pattern::Plain,
            1 => Pattern::DiagonalLine,
            2 => Pattern::VerticalLine,
            3 => Pattern::HorizontalLine,
            4 => Pattern::Checkerboard,
            5 => Pattern::CenterDot,
            _ => Pattern::Overflow,
        }
    }

    /// Whether anything is drawn on top of the swatch colour.
    pub fn is_decorated(self) -> bool {
        !matches!(self, Pattern::Plain | Pattern::Overflow)
    }
}
