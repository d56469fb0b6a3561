//! Render a minisatellite (a sequence of repeated motif tokens) as a strip of
//! coloured, patterned cells with a wrapped legend underneath.
//!
//! Data flows one way: tokens are read from a file, the [`encoding`] module
//! assigns each distinct token a colour/pattern pair, the [`layout`] engine
//! solves the canvas geometry and the [`render`] module draws onto a
//! [`canvas::Canvas`] that is finally written out as PNG.

pub mod canvas;
pub mod config;
pub mod encoding;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod palette;
pub mod pipeline;
pub mod render;

pub use canvas::{BitmapCanvas, Canvas, DrawCommand, LabelFont, RecordingCanvas};
pub use config::RenderConfig;
pub use encoding::{
    CapacityWarning, Encoding, LegendOrder, Mapping, MappingEntry, PATTERN_COUNT, Pattern, Token,
    build_mapping,
};
pub use error::{EncodeError, Result};
pub use geometry::{Rect, Size};
pub use input::{parse_tokens, read_tokens};
pub use layout::{Geometry, LayoutConfig, LegendCursor, LegendSlot, compute_geometry};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{MetricSnapshot, RenderMetrics};
pub use palette::{Palette, Rgb};
pub use pipeline::{Pipeline, PipelineStage, Plan, RunSummary};
pub use render::{RendererSettings, StripRenderer};
