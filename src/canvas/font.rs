use std::fs;
use std::path::{Path, PathBuf};

use plotters::style::{FontStyle, register_font};

use crate::error::{EncodeError, Result};

/// Locations probed for a label font when none is configured.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/ubuntu/Ubuntu-R.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font registered with the drawing backend for legend labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFont {
    pub family: String,
    pub source: PathBuf,
}

/// Register a label font under `family`.
///
/// An explicit `path` must load. Without one, the system candidates are tried
/// in order and `Ok(None)` means none of them was usable.
pub fn load_label_font(family: &str, path: Option<&Path>) -> Result<Option<LabelFont>> {
    if let Some(path) = path {
        return register_from(family, path).map(Some);
    }

    for candidate in SYSTEM_FONT_CANDIDATES {
        let candidate = Path::new(candidate);
        if !candidate.is_file() {
            continue;
        }
        if let Ok(font) = register_from(family, candidate) {
            return Ok(Some(font));
        }
    }
    Ok(None)
}

fn register_from(family: &str, path: &Path) -> Result<LabelFont> {
    let data = fs::read(path)
        .map_err(|e| EncodeError::Font(format!("cannot read `{}`: {e}", path.display())))?;
    // The backend keeps registered fonts for the rest of the process.
    let bytes: &'static [u8] = Box::leak(data.into_boxed_slice());
    register_font(family, FontStyle::Normal, bytes).map_err(|_| {
        EncodeError::Font(format!("`{}` is not a usable TrueType font", path.display()))
    })?;
    Ok(LabelFont {
        family: family.to_string(),
        source: path.to_path_buf(),
    })
}
