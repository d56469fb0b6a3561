//! Layout engine: strip geometry, legend wrapping and canvas size.
//!
//! Everything here is pure integer arithmetic on the configuration and the
//! mapping. The renderer only reads the resulting [`Geometry`] and never
//! re-derives wrapping on its own.

mod core;
pub mod grid;

pub use self::core::{Geometry, LayoutConfig, MAX_CANVAS_PIXELS, compute_geometry};
pub use grid::{LegendCursor, LegendSlot};
