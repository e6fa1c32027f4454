use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dialkit::{palette, Dial, DialConfig, Gauge, InputEvent, ScrollDirection, Sweep, ValueRange};

fn bench_palette(c: &mut Criterion) {
    c.bench_function("palette_preset", |b| {
        b.iter(|| palette::build(black_box("yellow"), black_box("red")).unwrap())
    });
    c.bench_function("palette_interpolated", |b| {
        b.iter(|| palette::build(black_box("#102030"), black_box("#e0d0c0")).unwrap())
    });
}

fn bench_angle_conversion(c: &mut Criterion) {
    let range = ValueRange::new(0.0, 100.0).unwrap();
    let sweep = Sweep::Arc {
        start_deg: 240.0,
        extent_deg: -295.0,
    };
    c.bench_function("angle_roundtrip", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for value in 0..=100 {
                let angle = sweep.angle_of(&range, f64::from(value));
                acc += sweep.value_at(&range, angle);
            }
            black_box(acc)
        })
    });
}

fn bench_dial_scroll(c: &mut Criterion) {
    let mut dial = Dial::new(DialConfig::default()).unwrap();
    c.bench_function("dial_scroll_tick", |b| {
        b.iter(|| {
            dial.handle_event(InputEvent::Scroll {
                direction: ScrollDirection::Up,
            })
        })
    });
}

criterion_group!(
    benches,
    bench_palette,
    bench_angle_conversion,
    bench_dial_scroll
);
criterion_main!(benches);
