//! Benchmarks for range controller event handling.
//!
//! Run with: cargo bench -p xrange-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use xrange_core::event::{FocusTarget, KeyCode, KeyEvent, PointerEvent, PointerId};
use xrange_core::geometry::TrackBounds;
use xrange_model::RangeConfig;
use xrange_widgets::RangeControl;
use xrange_widgets::text_edit::parse_leading_float;

const TRACK: TrackBounds = TrackBounds::new(0.0, 1000.0);

// ============================================================================
// Pointer drag
// ============================================================================

fn bench_pointer_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("range/drag");

    for step in [1.0, 0.1, 0.001] {
        let config = RangeConfig::new(0.0, 100.0, step).expect("valid config");
        group.bench_with_input(BenchmarkId::new("sweep_1000_moves", step), &config, |b, config| {
            b.iter(|| {
                let mut control = RangeControl::new(*config);
                control.handle_pointer(&PointerEvent::down(PointerId(1), 0.0, TRACK));
                for x in 0..1000 {
                    let t = control
                        .handle_pointer(&PointerEvent::moved(PointerId(1), f64::from(x), TRACK));
                    black_box(t);
                }
                control.handle_pointer(&PointerEvent::up(PointerId(1), 1000.0, TRACK));
                black_box(control.state())
            })
        });
    }

    let config = RangeConfig::new(0.0, 100.0, 1.0).expect("valid config");
    group.bench_function("jitter_same_bucket", |b| {
        let mut control = RangeControl::new(config);
        control.handle_pointer(&PointerEvent::down(PointerId(1), 500.0, TRACK));
        b.iter(|| {
            let t = control.handle_pointer(&PointerEvent::moved(
                PointerId(1),
                black_box(501.0),
                TRACK,
            ));
            black_box(t)
        })
    });

    group.finish();
}

// ============================================================================
// Keyboard and text edit
// ============================================================================

fn bench_discrete_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("range/discrete");
    let config = RangeConfig::new(0.0, 1_000_000.0, 1.0).expect("valid config");

    group.bench_function("arrow_right", |b| {
        let mut control = RangeControl::new(config);
        b.iter(|| black_box(control.handle_key(KeyEvent::new(KeyCode::Right), FocusTarget::Control)))
    });

    for text in ["42", "  -3.25e2px", "Infinity", "abc"] {
        group.bench_with_input(BenchmarkId::new("parse_leading_float", text), text, |b, text| {
            b.iter(|| black_box(parse_leading_float(black_box(text))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pointer_drag, bench_discrete_input);
criterion_main!(benches);
