//! Benchmarks for the Darkroom ingestion pipeline.
//!
//! Run with: cargo bench -p darkroom-core

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use darkroom_core::config::{ImageConfig, LimitsConfig};
use darkroom_core::pipeline::{Decoder, Encoder, Normalizer};
use std::io::Cursor;

fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 200])
    });
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn benchmark_decode(c: &mut Criterion) {
    let bytes = sample_png(1024, 768);
    let decoder = Decoder::new(LimitsConfig::default());

    c.bench_function("decode_png_1024", |b| {
        b.iter(|| {
            let _ = decoder.decode(black_box(&bytes));
        })
    });
}

fn benchmark_normalize(c: &mut Criterion) {
    let bytes = sample_png(1024, 768);
    let decoder = Decoder::new(LimitsConfig::default());
    let normalizer = Normalizer::new(&ImageConfig::default());

    c.bench_function("normalize_rgba_1024", |b| {
        b.iter_batched(
            || decoder.decode(&bytes).unwrap(),
            |decoded| normalizer.normalize(black_box(decoded)),
            BatchSize::SmallInput,
        )
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let bytes = sample_png(1024, 768);
    let decoder = Decoder::new(LimitsConfig::default());
    let normalizer = Normalizer::new(&ImageConfig::default());
    let encoder = Encoder::new(&ImageConfig::default());
    let normalized = normalizer.normalize(decoder.decode(&bytes).unwrap()).unwrap();

    c.bench_function("encode_jpeg_1024", |b| {
        b.iter(|| {
            let _ = encoder.encode(black_box(&normalized));
        })
    });
}

fn benchmark_full_transform(c: &mut Criterion) {
    let bytes = sample_png(1024, 768);
    let decoder = Decoder::new(LimitsConfig::default());
    let normalizer = Normalizer::new(&ImageConfig::default());
    let encoder = Encoder::new(&ImageConfig::default());

    c.bench_function("decode_normalize_encode_1024", |b| {
        b.iter(|| {
            let decoded = decoder.decode(black_box(&bytes)).unwrap();
            let normalized = normalizer.normalize(decoded).unwrap();
            let _ = encoder.encode(&normalized);
        })
    });
}

criterion_group!(
    benches,
    benchmark_decode,
    benchmark_normalize,
    benchmark_encode,
    benchmark_full_transform,
);
criterion_main!(benches);
