//! Benchmarks for index construction, hit-testing and full renders.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use stipple::{
    ChartBase, ChartDefinition, ChannelData, IndexedPoint, LinearScale, Margins, PointDataset,
    QuadTree, RenderOptions, ScatterRenderer, UaDimension,
};
use stipple_core::{Color, Point, Rect, RecordingCanvas};

const POINTS: usize = 50_000;

/// Deterministic coordinates in [0, 1000).
fn coords(n: usize) -> Vec<(f32, f32)> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        ((state >> 33) % 1_000_000) as f32 / 1000.0
    };
    (0..n).map(|_| (next(), next())).collect()
}

fn build_index(points: &[(f32, f32)]) -> QuadTree {
    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 1000.0, 1000.0));
    for (record, &(x, y)) in points.iter().enumerate() {
        let point = IndexedPoint {
            position: Point::new(x, y),
            record,
            radius: 5.0,
            color: Color::BLACK,
        };
        if tree.insert(point).is_err() {
            break;
        }
    }
    tree
}

fn bench_build_index(c: &mut Criterion) {
    let points = coords(POINTS);
    c.bench_function("quadtree_build_50k", |b| {
        b.iter(|| build_index(black_box(&points)));
    });
}

fn bench_find(c: &mut Criterion) {
    let tree = build_index(&coords(POINTS));
    let queries = coords(1000);
    c.bench_function("quadtree_find_1k_queries", |b| {
        b.iter(|| {
            queries
                .iter()
                .filter(|&&(x, y)| tree.find(black_box(Point::new(x, y)), 2000.0).is_some())
                .count()
        });
    });
}

fn chart(points: &[(f32, f32)]) -> ScatterRenderer<RecordingCanvas> {
    let xs: Vec<f64> = points.iter().map(|p| f64::from(p.0)).collect();
    let ys: Vec<f64> = points.iter().map(|p| f64::from(p.1)).collect();
    let definition = ChartDefinition::new(UaDimension::numerical("x"), UaDimension::numerical("y"));
    let data = PointDataset::new(ChannelData::numeric(xs), ChannelData::numeric(ys));
    let base = ChartBase::new(
        1000.0,
        1000.0,
        Margins::ZERO,
        Box::new(LinearScale::identity(1000.0)),
        Box::new(LinearScale::identity(1000.0)),
    );
    let options = RenderOptions {
        pixel_ratio: 1.0,
        ..RenderOptions::default()
    };
    ScatterRenderer::new(
        RecordingCanvas::new(1000.0, 1000.0),
        definition,
        data,
        base,
        options,
    )
    .unwrap()
}

fn bench_render(c: &mut Criterion) {
    let points = coords(POINTS);
    c.bench_function("render_50k", |b| {
        b.iter_batched(
            || chart(&points),
            |mut chart| chart.render().unwrap(),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_build_index, bench_find, bench_render);
criterion_main!(benches);
