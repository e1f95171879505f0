//! Benchmarks du moteur de modes.
//!
//! Run with: cargo bench -p tg-ascii

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tg_ascii::compositor::{RenderOptions, render};
use tg_core::charset::{CHARSET_STANDARD, GlyphSpec};
use tg_core::config::ModeKind;
use tg_core::frame::PixelBuffer;

fn gradient(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::from_fn(w, h, |x, y| {
        (
            (x * 255 / w.max(1)) as u8,
            (y * 255 / h.max(1)) as u8,
            ((x + y) % 256) as u8,
        )
    })
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let spec = GlyphSpec {
        glyph: '▀',
        charset: CHARSET_STANDARD.to_string(),
    };
    let options = RenderOptions::default();

    for (w, h) in [(80u32, 48u32), (150, 90), (300, 180)] {
        let frame = gradient(w, h);
        group.throughput(Throughput::Elements(u64::from(w * h)));
        for mode in ModeKind::ALL {
            group.bench_with_input(
                BenchmarkId::new(mode.as_str(), format!("{w}x{h}")),
                &frame,
                |b, frame| b.iter(|| render(black_box(mode), black_box(frame), &spec, &options)),
            );
        }
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let frame = gradient(150, 90);
    let Ok(grid) = render(
        ModeKind::CharLuminance,
        &frame,
        &GlyphSpec::default(),
        &RenderOptions::default(),
    ) else {
        return;
    };
    c.bench_function("to_ansi_lines/150x90", |b| {
        b.iter(|| black_box(&grid).to_ansi_lines());
    });
}

criterion_group!(benches, bench_modes, bench_encode);
criterion_main!(benches);
