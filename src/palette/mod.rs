//! Fixed, ordered colour palette used to encode motifs.
//!
//! Colours are handed out by rank modulo the palette length, so the order of
//! this list is part of the output format: reordering it changes every image.

use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, Result};

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const BACKGROUND: Rgb = Rgb(252, 252, 252);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }
}

const DEFAULT_COLORS: [Rgb; 15] = [
    Rgb(255, 12, 12),
    Rgb(12, 255, 12),
    Rgb(12, 12, 255),
    Rgb(255, 255, 12),
    Rgb(12, 255, 255),
    Rgb(255, 12, 255),
    Rgb(255, 128, 12),
    Rgb(12, 255, 128),
    Rgb(128, 12, 255),
    Rgb(153, 76, 0),
    Rgb(153, 0, 76),
    Rgb(51, 102, 0),
    Rgb(178, 102, 255),
    Rgb(192, 192, 192),
    Rgb(255, 178, 102),
];

/// Ordered, non-empty list of colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.is_empty() {
            return Err(EncodeError::InvalidConfig(
                "palette must contain at least one colour".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a palette built through [`Palette::new`].
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Colour assigned to a rank, cycling through the palette.
    pub fn color_for(&self, rank: usize) -> Rgb {
        self.colors[rank % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}
