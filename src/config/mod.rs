//! Render configuration.
//!
//! Built once at startup (defaults, optionally overridden from a JSON file and
//! then from CLI flags) and passed by reference to every stage. Keys use the
//! camelCase names `stripeWidth`, `stripeHeight`, `margin`, `gap`, `bigGap`,
//! `fontWidth` and `fontSize`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::encoding::LegendOrder;
use crate::error::{EncodeError, Result};
use crate::layout::LayoutConfig;
use crate::palette::{Palette, Rgb};

pub const DEFAULT_OUTPUT: &str = "human-encoding.png";
pub const DEFAULT_FONT_FAMILY: &str = "motif-label";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderConfig {
    pub stripe_width: u32,
    pub stripe_height: u32,
    pub margin: u32,
    pub gap: u32,
    /// Vertical space between the strip and the legend.
    pub big_gap: u32,
    /// Estimated pixel advance of one label character.
    pub font_width: u32,
    pub font_size: f64,
    pub output: PathBuf,
    /// Name the label font is registered under.
    pub font_family: String,
    /// TrueType font for legend labels. System locations are searched when unset.
    pub font_path: Option<PathBuf>,
    pub legend_order: LegendOrder,
    pub palette: Vec<Rgb>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self {
            stripe_width: layout.stripe_width,
            stripe_height: layout.stripe_height,
            margin: layout.margin,
            gap: layout.gap,
            big_gap: layout.big_gap,
            font_width: layout.font_width,
            font_size: 12.0,
            output: PathBuf::from(DEFAULT_OUTPUT),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_path: None,
            legend_order: LegendOrder::default(),
            palette: Palette::default().colors().to_vec(),
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| EncodeError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stripe_width == 0 || self.stripe_height == 0 {
            return Err(EncodeError::InvalidConfig(
                "stripeWidth and stripeHeight must be positive".to_string(),
            ));
        }
        if self.font_width == 0 {
            return Err(EncodeError::InvalidConfig(
                "fontWidth must be positive".to_string(),
            ));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(EncodeError::InvalidConfig(format!(
                "fontSize must be a positive number, got {}",
                self.font_size
            )));
        }
        if self.palette.is_empty() {
            return Err(EncodeError::InvalidConfig(
                "palette must contain at least one colour".to_string(),
            ));
        }
        Ok(())
    }

    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            stripe_width: self.stripe_width,
            stripe_height: self.stripe_height,
            margin: self.margin,
            gap: self.gap,
            big_gap: self.big_gap,
            font_width: self.font_width,
        }
    }

    pub fn palette(&self) -> Result<Palette> {
        Palette::new(self.palette.clone())
    }
}
