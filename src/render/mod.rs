//! Draws the strip and the legend onto a [`Canvas`](crate::canvas::Canvas).

mod core;

pub use self::core::{RendererSettings, StripRenderer, label_text};
