use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::encoding::{Encoding, LegendOrder, Mapping, Pattern, Token};
use crate::error::{EncodeError, Result};
use crate::geometry::Rect;
use crate::layout::Geometry;
use crate::metrics::RenderMetrics;
use crate::palette::Rgb;

/// Renderer parameters that are not part of the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererSettings {
    pub font_size: f64,
    pub legend_order: LegendOrder,
    /// Stroke around each strip cell.
    pub border_width: u32,
    /// Stroke of the line patterns.
    pub pattern_width: u32,
    pub ink: Rgb,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            legend_order: LegendOrder::Rank,
            border_width: 1,
            pattern_width: 3,
            ink: Rgb::BLACK,
        }
    }
}

impl From<&RenderConfig> for RendererSettings {
    fn from(config: &RenderConfig) -> Self {
        Self {
            font_size: config.font_size,
            legend_order: config.legend_order,
            ..Self::default()
        }
    }
}

/// Legend label drawn to the right of a swatch.
pub fn label_text(token: &str) -> String {
    format!(" : {token}")
}

/// Draws strip cells in sequence order, then the wrapped legend.
pub struct StripRenderer {
    settings: RendererSettings,
}

impl StripRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn render<C: Canvas>(
        &self,
        canvas: &mut C,
        tokens: &[Token],
        mapping: &Mapping,
        geometry: &Geometry,
    ) -> Result<RenderMetrics> {
        let expected = geometry.canvas_size();
        let actual = canvas.size();
        if actual != expected {
            return Err(EncodeError::Backend(format!(
                "canvas is {}x{} but the layout needs {}x{}",
                actual.width, actual.height, expected.width, expected.height
            )));
        }

        let mut metrics = RenderMetrics::new();
        self.render_strip(canvas, tokens, mapping, geometry, &mut metrics)?;
        self.render_legend(canvas, mapping, geometry, &mut metrics)?;
        Ok(metrics)
    }

    fn render_strip<C: Canvas>(
        &self,
        canvas: &mut C,
        tokens: &[Token],
        mapping: &Mapping,
        geometry: &Geometry,
        metrics: &mut RenderMetrics,
    ) -> Result<()> {
        for (index, token) in tokens.iter().enumerate() {
            let encoding = mapping
                .get(token)
                .ok_or_else(|| EncodeError::UnmappedToken(token.clone()))?;
            let cell = geometry.strip_cell(index);
            self.draw_swatch(canvas, cell, encoding)?;
            canvas.stroke_rect(cell, self.settings.ink, self.settings.border_width)?;
            metrics.record_strip_cell(encoding.pattern());
        }
        Ok(())
    }

    fn render_legend<C: Canvas>(
        &self,
        canvas: &mut C,
        mapping: &Mapping,
        geometry: &Geometry,
        metrics: &mut RenderMetrics,
    ) -> Result<()> {
        let entries = mapping.legend_order(self.settings.legend_order);
        for (entry, slot) in entries.into_iter().zip(geometry.legend_cursor()) {
            self.draw_swatch(canvas, slot.swatch, &entry.encoding)?;
            metrics.record_legend_entry(entry.encoding.pattern());

            let drawn = canvas.text(
                &label_text(&entry.token),
                (slot.label_x, slot.label_y),
                self.settings.font_size,
                self.settings.ink,
            )?;
            if !drawn {
                metrics.record_label_skipped();
            }
        }
        Ok(())
    }

    fn draw_swatch<C: Canvas>(&self, canvas: &mut C, rect: Rect, encoding: &Encoding) -> Result<()> {
        canvas.fill_rect(rect, encoding.color)?;
        self.decorate(canvas, rect, encoding.pattern())
    }

    fn decorate<C: Canvas>(&self, canvas: &mut C, rect: Rect, pattern: Pattern) -> Result<()> {
        let ink = self.settings.ink;
        let stroke = self.settings.pattern_width;
        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        let (cx, cy) = rect.center();

        match pattern {
            Pattern::Plain | Pattern::Overflow => Ok(()),
            Pattern::DiagonalLine => canvas.line((x, y), (rect.right(), rect.bottom()), ink, stroke),
            Pattern::VerticalLine => canvas.line((cx, y), (cx, rect.bottom()), ink, stroke),
            Pattern::HorizontalLine => canvas.line((x, cy), (rect.right(), cy), ink, stroke),
            Pattern::Checkerboard => {
                let (half_w, half_h) = (width / 2, height / 2);
                canvas.fill_rect(Rect::new(x, y, half_w, half_h), ink)?;
                canvas.fill_rect(Rect::new(x + half_w, y + half_h, half_w, half_h), ink)
            }
            Pattern::CenterDot => canvas.fill_circle((cx, cy), (width / 2).saturating_sub(1), ink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::encoding::build_mapping;
    use crate::geometry::Size;
    use crate::layout::{LayoutConfig, compute_geometry};
    use crate::palette::Palette;

    fn tokens(raw: &[&str]) -> Vec<Token> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn render(
        raw: &[&str],
        palette: &Palette,
        canvas_text: bool,
    ) -> (RecordingCanvas, RenderMetrics, Geometry) {
        let tokens = tokens(raw);
        let mapping = build_mapping(&tokens, palette).unwrap();
        let geometry = compute_geometry(tokens.len(), &mapping, &LayoutConfig::default()).unwrap();
        let mut canvas = RecordingCanvas::new(geometry.canvas_size());
        if !canvas_text {
            canvas = canvas.without_text();
        }
        let metrics = StripRenderer::with_default()
            .render(&mut canvas, &tokens, &mapping, &geometry)
            .unwrap();
        (canvas, metrics, geometry)
    }

    #[test]
    fn strip_follows_sequence_order() {
        let palette = Palette::default();
        let (canvas, metrics, geometry) =
            render(&["AAT", "AAT", "CCG", "AAT", "GGC"], &palette, true);

        let cells: Vec<(Rect, Rgb)> = canvas
            .fills_of_size(geometry.stripe_width, geometry.stripe_height)
            .into_iter()
            .filter(|(rect, _)| rect.y == geometry.margin)
            .collect();
        assert_eq!(cells.len(), 5);
        let colors: Vec<Rgb> = cells.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            colors,
            vec![
                palette.color_for(0),
                palette.color_for(0),
                palette.color_for(1),
                palette.color_for(0),
                palette.color_for(2),
            ]
        );
        for (i, (rect, _)) in cells.iter().enumerate() {
            assert_eq!(*rect, geometry.strip_cell(i));
        }

        let snapshot = metrics.snapshot(std::time::Duration::ZERO);
        assert_eq!(snapshot.strip_cells, 5);
        assert_eq!(snapshot.legend_entries, 3);
    }

    #[test]
    fn every_strip_cell_gets_a_border() {
        let (canvas, _, geometry) = render(&["A", "B", "A"], &Palette::default(), true);
        let borders: Vec<&DrawCommand> = canvas
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::StrokeRect { width: 1, .. }))
            .collect();
        assert_eq!(borders.len(), 3);
        assert_eq!(
            borders[2],
            &DrawCommand::StrokeRect {
                rect: geometry.strip_cell(2),
                color: Rgb::BLACK,
                width: 1,
            }
        );
    }

    #[test]
    fn legend_labels_in_rank_order() {
        let (canvas, _, _) = render(&["GGC", "AAT", "CCG", "AAT"], &Palette::default(), true);
        assert_eq!(canvas.texts(), vec![" : AAT", " : CCG", " : GGC"]);
    }

    #[test]
    fn empty_token_is_drawn_once_in_each_section() {
        let (canvas, metrics, geometry) = render(&[""], &Palette::default(), true);
        let swatches = canvas.fills_of_size(geometry.stripe_width, geometry.stripe_height);
        assert_eq!(swatches.len(), 2);
        assert_eq!(canvas.texts(), vec![" : "]);
        let snapshot = metrics.snapshot(std::time::Duration::ZERO);
        assert_eq!((snapshot.strip_cells, snapshot.legend_entries), (1, 1));
    }

    #[test]
    fn patterns_follow_palette_cycles() {
        let palette = Palette::new(vec![Rgb(200, 0, 0)]).unwrap();
        let (canvas, metrics, _) = render(&["a", "b", "c", "d", "e", "f", "g"], &palette, true);

        let lines = canvas
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { width: 3, .. }))
            .count();
        let circles = canvas
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillCircle { .. }))
            .count();
        // b, c, d carry line patterns; f the dot; each drawn in strip and legend
        assert_eq!(lines, 6);
        assert_eq!(circles, 2);

        let snapshot = metrics.snapshot(std::time::Duration::ZERO);
        assert_eq!(snapshot.decorated_swatches, 10);
        // g overflows the six patterns
        assert_eq!(snapshot.fallback_swatches, 2);
    }

    #[test]
    fn checkerboard_fills_two_quarters() {
        let palette = Palette::new(vec![Rgb(0, 200, 0)]).unwrap();
        let (canvas, _, geometry) = render(&["a", "b", "c", "d", "e"], &palette, true);
        let quarters =
            canvas.fills_of_size(geometry.stripe_width / 2, geometry.stripe_height / 2);
        // strip and legend swatch for "e"
        assert_eq!(quarters.len(), 4);
        assert!(quarters.iter().all(|(_, color)| *color == Rgb::BLACK));
        let cell = geometry.strip_cell(4);
        assert_eq!(quarters[0].0, Rect::new(cell.x, cell.y, 5, 6));
        assert_eq!(quarters[1].0, Rect::new(cell.x + 5, cell.y + 6, 5, 6));
    }

    #[test]
    fn missing_font_only_skips_labels() {
        let (canvas, metrics, _) = render(&["AAT", "CCG"], &Palette::default(), false);
        assert!(canvas.texts().is_empty());
        let snapshot = metrics.snapshot(std::time::Duration::ZERO);
        assert_eq!(snapshot.labels_skipped, 2);
        assert_eq!(snapshot.legend_entries, 2);
    }

    #[test]
    fn unmapped_token_is_an_error() {
        let mapping = build_mapping(&tokens(&["A"]), &Palette::default()).unwrap();
        let geometry = compute_geometry(2, &mapping, &LayoutConfig::default()).unwrap();
        let mut canvas = RecordingCanvas::new(geometry.canvas_size());
        let err = StripRenderer::with_default()
            .render(&mut canvas, &tokens(&["A", "B"]), &mapping, &geometry)
            .unwrap_err();
        assert!(matches!(err, EncodeError::UnmappedToken(t) if t == "B"));
    }

    #[test]
    fn settings_follow_config() {
        let config = RenderConfig {
            font_size: 9.0,
            legend_order: LegendOrder::Color,
            ..RenderConfig::default()
        };
        let settings = RendererSettings::from(&config);
        assert_eq!(settings.font_size, 9.0);
        assert_eq!(settings.legend_order, LegendOrder::Color);
        assert_eq!(settings.border_width, 1);
    }

    #[test]
    fn canvas_must_match_the_layout() {
        let tokens = tokens(&["AAT", "CCG"]);
        let mapping = build_mapping(&tokens, &Palette::default()).unwrap();
        let geometry = compute_geometry(tokens.len(), &mapping, &LayoutConfig::default()).unwrap();
        let size = Size::new(geometry.canvas_width - 1, geometry.canvas_height);
        let mut canvas = RecordingCanvas::new(size);
        let err = StripRenderer::with_default()
            .render(&mut canvas, &tokens, &mapping, &geometry)
            .unwrap_err();
        assert!(matches!(err, EncodeError::Backend(_)));
        assert!(canvas.commands().is_empty());
    }
}
