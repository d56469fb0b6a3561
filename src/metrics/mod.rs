use crate::encoding::Pattern;
use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters collected while drawing one image.
#[derive(Debug, Default, Clone)]
pub struct RenderMetrics {
    strip_cells: u64,
    legend_entries: u64,
    decorated_swatches: u64,
    fallback_swatches: u64,
    labels_skipped: u64,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_strip_cell(&mut self, pattern: Pattern) {
        self.strip_cells = self.strip_cells.saturating_add(1);
        self.record_swatch(pattern);
    }

    pub fn record_legend_entry(&mut self, pattern: Pattern) {
        self.legend_entries = self.legend_entries.saturating_add(1);
        self.record_swatch(pattern);
    }

    pub fn record_label_skipped(&mut self) {
        self.labels_skipped = self.labels_skipped.saturating_add(1);
    }

    fn record_swatch(&mut self, pattern: Pattern) {
        match pattern {
            Pattern::Overflow => {
                self.fallback_swatches = self.fallback_swatches.saturating_add(1)
            }
            p if p.is_decorated() => {
                self.decorated_swatches = self.decorated_swatches.saturating_add(1)
            }
            _ => {}
        }
    }

    pub fn snapshot(&self, elapsed: Duration) -> MetricSnapshot {
        MetricSnapshot {
            elapsed_ms: elapsed.as_millis() as u64,
            strip_cells: self.strip_cells,
            legend_entries: self.legend_entries,
            decorated_swatches: self.decorated_swatches,
            fallback_swatches: self.fallback_swatches,
            labels_skipped: self.labels_skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub elapsed_ms: u64,
    pub strip_cells: u64,
    pub legend_entries: u64,
    pub decorated_swatches: u64,
    pub fallback_swatches: u64,
    pub labels_skipped: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "render_metrics".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("elapsed_ms".to_string(), json!(self.elapsed_ms));
        map.insert("strip_cells".to_string(), json!(self.strip_cells));
        map.insert("legend_entries".to_string(), json!(self.legend_entries));
        map.insert(
            "decorated_swatches".to_string(),
            json!(self.decorated_swatches),
        );
        map.insert(
            "fallback_swatches".to_string(),
            json!(self.fallback_swatches),
        );
        map.insert("labels_skipped".to_string(), json!(self.labels_skipped));
        map
    }
}
