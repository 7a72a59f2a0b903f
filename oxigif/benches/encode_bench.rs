//! Performance benchmarks for oxigif
//!
//! - Quantization throughput
//! - Full session encoding (palette, LZW, container)
//! - Rescaling cost for mismatched frames

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxigif::{EncoderConfig, Frame, encode_to_vec, quantize_frame};
use std::hint::black_box;

/// Frame sizes as (width, height)
const SIZES: [(&str, u16, u16); 3] = [
    ("thumbnail", 64, 64),
    ("screen", 480, 320),
    ("large", 1280, 720),
];

/// Diagonal gradient - smooth content that quantizes into bands
fn gradient(width: u16, height: u16) -> Frame {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height as u32 {
        for x in 0..width as u32 {
            pixels.extend_from_slice(&[
                (x * 255 / width as u32) as u8,
                (y * 255 / height as u32) as u8,
                ((x + y) % 256) as u8,
                255,
            ]);
        }
    }
    Frame::from_rgba(width, height, pixels)
}

fn bench_quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");

    for (name, width, height) in SIZES {
        let frame = gradient(width, height);
        group.throughput(Throughput::Elements(frame.pixel_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &frame, |b, frame| {
            b.iter(|| quantize_frame(black_box(frame)))
        });
    }

    group.finish();
}

fn bench_encode_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_session");
    group.sample_size(20);

    for (name, width, height) in SIZES {
        let frames: Vec<Frame> = (0..5).map(|_| gradient(width, height)).collect();
        let bytes = frames.iter().map(|f| f.pixels().len() as u64).sum();
        group.throughput(Throughput::Bytes(bytes));
        group.bench_with_input(BenchmarkId::from_parameter(name), &frames, |b, frames| {
            b.iter(|| encode_to_vec(black_box(frames.clone()), EncoderConfig::default()))
        });
    }

    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");
    let source = gradient(1280, 720);

    for (name, width, height) in SIZES {
        group.bench_function(BenchmarkId::new("from_1280x720", name), |b| {
            b.iter(|| black_box(&source).resized(width, height))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_quantize, bench_encode_session, bench_resize);
criterion_main!(benches);
