//! One-shot batch pipeline: tokens → mapping → geometry → pixels → PNG.
//!
//! Every stage emits a structured event under [`PIPELINE_TARGET`]. Input and
//! mapping failures abort before a canvas is allocated, so no partial output
//! is ever written; capacity overflow is only reported.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde::Serialize;
use serde_json::{Value, json};

use crate::canvas::{BitmapCanvas, LabelFont, load_label_font};
use crate::config::RenderConfig;
use crate::encoding::{CapacityWarning, Mapping, MappingEntry, Token, build_mapping};
use crate::error::Result;
use crate::input::read_tokens;
use crate::layout::{Geometry, compute_geometry};
use crate::logging::{LogEvent, LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::MetricSnapshot;
use crate::palette::{Palette, Rgb};
use crate::render::{RendererSettings, StripRenderer};

pub const PIPELINE_TARGET: &str = "motif_strip::pipeline";
pub const METRICS_TARGET: &str = "motif_strip::metrics";

/// Checkpoints reported while a sequence is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    TokensRead,
    MappingBuilt,
    DegradedEncoding,
    GeometryComputed,
    FontResolved,
    LabelsSkipped,
    RenderCommitted,
    OutputWritten,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStage::TokensRead => "tokens_read",
            PipelineStage::MappingBuilt => "mapping_built",
            PipelineStage::DegradedEncoding => "degraded_encoding",
            PipelineStage::GeometryComputed => "geometry_computed",
            PipelineStage::FontResolved => "font_resolved",
            PipelineStage::LabelsSkipped => "labels_skipped",
            PipelineStage::RenderCommitted => "render_committed",
            PipelineStage::OutputWritten => "output_written",
        }
    }
}

/// Mapping and geometry for a sequence, computed without drawing anything.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    #[serde(skip)]
    pub tokens: Vec<Token>,
    pub geometry: Geometry,
    pub capacity_warning: Option<CapacityWarning>,
    /// Legend entries in draw order.
    pub legend: Vec<MappingEntry>,
    #[serde(skip)]
    pub mapping: Mapping,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub geometry: Geometry,
    pub capacity_warning: Option<CapacityWarning>,
    pub font: Option<LabelFont>,
    pub metrics: MetricSnapshot,
}

pub struct Pipeline {
    config: RenderConfig,
    palette: Palette,
    logger: Logger,
    log_failures: AtomicUsize,
}

impl Pipeline {
    pub fn new(config: RenderConfig, logger: Logger) -> Result<Self> {
        config.validate()?;
        let palette = config.palette()?;
        Ok(Self {
            config,
            palette,
            logger,
            log_failures: AtomicUsize::new(0),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Events the logger failed to record so far.
    pub fn log_failures(&self) -> usize {
        self.log_failures.load(Ordering::Relaxed)
    }

    /// Read `input` and compute its plan.
    pub fn plan(&self, input: &Path) -> Result<Plan> {
        let tokens = read_tokens(input)?;
        self.emit(
            LogLevel::Debug,
            PipelineStage::TokensRead,
            [
                json_str("input", input.display().to_string()),
                json_kv("tokens", tokens.len()),
            ],
        );
        self.plan_tokens(tokens)
    }

    pub fn plan_tokens(&self, tokens: Vec<Token>) -> Result<Plan> {
        let mapping = build_mapping(&tokens, &self.palette)?;
        self.emit(
            LogLevel::Debug,
            PipelineStage::MappingBuilt,
            [
                json_kv("distinct", mapping.len()),
                json_kv("longest_token_width", mapping.longest_token_width()),
            ],
        );

        let capacity_warning = mapping.capacity_warning();
        if let Some(warning) = capacity_warning {
            self.emit(
                LogLevel::Warn,
                PipelineStage::DegradedEncoding,
                [
                    json_kv("distinct", warning.distinct),
                    json_kv("capacity", warning.capacity),
                    json_kv("undecorated", warning.overflowing()),
                ],
            );
        }

        let geometry = compute_geometry(tokens.len(), &mapping, &self.config.layout())?;
        self.emit(
            LogLevel::Debug,
            PipelineStage::GeometryComputed,
            [
                json_kv("canvas_width", geometry.canvas_width),
                json_kv("canvas_height", geometry.canvas_height),
                json_kv("entries_per_row", geometry.entries_per_row),
                json_kv("legend_rows", geometry.legend_rows),
            ],
        );

        let legend = mapping
            .legend_order(self.config.legend_order)
            .into_iter()
            .cloned()
            .collect();

        Ok(Plan {
            tokens,
            geometry,
            capacity_warning,
            legend,
            mapping,
        })
    }

    /// Render `input` to the configured output file.
    pub fn run(&self, input: &Path) -> Result<RunSummary> {
        let plan = self.plan(input)?;
        self.render_plan(&plan)
    }

    pub fn render_plan(&self, plan: &Plan) -> Result<RunSummary> {
        let started = Instant::now();
        let font = self.resolve_font()?;

        let mut canvas = BitmapCanvas::new(plan.geometry.canvas_size(), Rgb::BACKGROUND)?;
        if let Some(font) = &font {
            canvas = canvas.with_font_family(font.family.clone());
        }

        let renderer = StripRenderer::new(RendererSettings::from(&self.config));
        let metrics = renderer.render(&mut canvas, &plan.tokens, &plan.mapping, &plan.geometry)?;
        let snapshot = metrics.snapshot(started.elapsed());
        self.emit(
            LogLevel::Debug,
            PipelineStage::RenderCommitted,
            [
                json_kv("strip_cells", snapshot.strip_cells),
                json_kv("legend_entries", snapshot.legend_entries),
            ],
        );

        let output = self.config.output.clone();
        canvas.save_png(&output)?;
        self.emit(
            LogLevel::Info,
            PipelineStage::OutputWritten,
            [
                json_str("output", output.display().to_string()),
                json_kv("width", plan.geometry.canvas_width),
                json_kv("height", plan.geometry.canvas_height),
            ],
        );
        self.record(snapshot.to_log_event(METRICS_TARGET));

        Ok(RunSummary {
            output,
            geometry: plan.geometry,
            capacity_warning: plan.capacity_warning,
            font,
            metrics: snapshot,
        })
    }

    fn resolve_font(&self) -> Result<Option<LabelFont>> {
        let font = load_label_font(&self.config.font_family, self.config.font_path.as_deref())?;
        match &font {
            Some(font) => self.emit(
                LogLevel::Debug,
                PipelineStage::FontResolved,
                [
                    json_str("family", font.family.clone()),
                    json_str("source", font.source.display().to_string()),
                ],
            ),
            None => self.emit(
                LogLevel::Warn,
                PipelineStage::LabelsSkipped,
                [json_kv("reason", json!("no usable label font found"))],
            ),
        }
        Ok(font)
    }

    fn emit(
        &self,
        level: LogLevel,
        stage: PipelineStage,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        self.record(event_with_fields(level, PIPELINE_TARGET, stage.as_str(), fields));
    }

    /// Log sink failures never abort a run; the first one is reported on stderr.
    fn record(&self, event: LogEvent) {
        if let Err(err) = self.logger.log_event(event) {
            if self.log_failures.fetch_add(1, Ordering::Relaxed) == 0 {
                eprintln!("warning: log sink failed, later events may be lost: {err}");
            }
        }
    }
}
