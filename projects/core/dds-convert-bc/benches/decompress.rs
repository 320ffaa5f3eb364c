use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dds_convert_bc::decompress;
use dds_convert_common::{DxgiFormat, ScratchImage};
use std::hint::black_box;

/// Fills an image with pseudo random blocks, so every decoder mode gets exercised.
fn random_image(format: DxgiFormat, size: usize) -> ScratchImage {
    let mut image = ScratchImage::initialize_2d(size, size, format).unwrap();
    let mut state = 0x2545_F491_u32;
    for byte in image.surfaces_mut()[0].pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *byte = state as u8;
    }
    image
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let size = 512;

    for format in [
        DxgiFormat::Bc1Unorm,
        DxgiFormat::Bc3Unorm,
        DxgiFormat::Bc5Unorm,
        DxgiFormat::Bc7Unorm,
    ] {
        let image = random_image(format, size);
        group.throughput(Throughput::Bytes(image.surfaces()[0].pixels.len() as u64));
        group.bench_with_input(BenchmarkId::new(format.name(), size), &image, |b, image| {
            b.iter(|| decompress(black_box(image)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decompress);
criterion_main!(benches);
