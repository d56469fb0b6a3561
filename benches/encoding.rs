use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use motif_strip::{
    LayoutConfig, Logger, Palette, Pipeline, RecordingCanvas, RenderConfig, StripRenderer,
    build_mapping, compute_geometry,
};

fn minisatellite(len: usize, distinct: usize) -> Vec<String> {
    (0..len)
        .map(|i| format!("motif{:04}", (i * 7919) % distinct))
        .collect()
}

fn mapping_large_sequence(c: &mut Criterion) {
    let tokens = minisatellite(50_000, 400);
    let palette = Palette::default();
    c.bench_function("mapping_50k_tokens", |b| {
        b.iter(|| build_mapping(black_box(&tokens), &palette).expect("mapping"));
    });
}

fn geometry_and_layout(c: &mut Criterion) {
    let tokens = minisatellite(5_000, 120);
    let mapping = build_mapping(&tokens, &Palette::default()).expect("mapping");
    let config = LayoutConfig::default();
    c.bench_function("geometry_5k_tokens", |b| {
        b.iter(|| {
            let geometry =
                compute_geometry(black_box(tokens.len()), &mapping, &config).expect("geometry");
            geometry.legend_cursor().count()
        });
    });
}

fn render_commands(c: &mut Criterion) {
    let pipeline = Pipeline::new(RenderConfig::default(), Logger::null()).expect("pipeline");
    let plan = pipeline
        .plan_tokens(minisatellite(2_000, 60))
        .expect("plan");
    let renderer = StripRenderer::with_default();
    c.bench_function("render_2k_tokens_recorded", |b| {
        b.iter(|| {
            let mut canvas = RecordingCanvas::new(plan.geometry.canvas_size());
            renderer
                .render(&mut canvas, &plan.tokens, &plan.mapping, &plan.geometry)
                .expect("render");
            canvas.commands().len()
        });
    });
}

criterion_group!(
    benches,
    mapping_large_sequence,
    geometry_and_layout,
    render_commands
);
criterion_main!(benches);
