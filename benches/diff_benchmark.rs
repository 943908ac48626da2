//! Diff renderer benchmark: cost of one key press worth of screen updates.

use calci::app::{Repaint, View};
use calci::buffer::diff::{render_diff, render_full, DiffState};
use calci::config::Theme;
use calci::{Calculator, Key};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// A view that has painted its first frame.
fn painted_view(width: u16, height: u16) -> View {
    let mut view = View::new(Calculator::new(), Theme::default(), width, height);
    view.render();
    view
}

fn diff_key_press(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_key_press");
    for (width, height) in [(40u16, 30u16), (120, 40), (200, 60)] {
        let mut view = painted_view(width, height);
        let before = view.frame().clone();
        view.press(Key::Digit(7));
        let Repaint::Regions(dirty) = view.render() else {
            continue;
        };
        let after = view.frame().clone();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &(before, after, dirty),
            |b, (before, after, dirty)| {
                b.iter(|| {
                    let mut output = Vec::with_capacity(4096);
                    let mut state = DiffState::new();
                    render_diff(black_box(before), black_box(after), dirty, &mut output, &mut state)
                });
            },
        );
    }
    group.finish();
}

fn diff_whole_screen(c: &mut Criterion) {
    let mut view = painted_view(120, 40);
    let before = view.frame().clone();
    for key in [Key::Digit(9), Key::Digit(8), Key::Digit(7), Key::Digit(6), Key::Digit(5)] {
        view.press(key);
    }
    view.render();
    let after = view.frame().clone();

    c.bench_function("diff_120x40_undirtied", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(4096);
            let mut state = DiffState::new();
            render_diff(black_box(&before), black_box(&after), &[], &mut output, &mut state)
        });
    });
}

fn full_redraw(c: &mut Criterion) {
    let view = painted_view(120, 40);
    c.bench_function("full_redraw_120x40", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(65536);
            render_full(black_box(view.frame()), &mut output);
            output
        });
    });
}

criterion_group!(benches, diff_key_press, diff_whole_screen, full_redraw);
criterion_main!(benches);
