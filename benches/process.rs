use criterion::{criterion_group, criterion_main, Criterion};
use edgeviewer_bridge::{process, Image};

fn test_image(width: u32, height: u32) -> Image {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x * 37 % 256) as u8,
                (y * 53 % 256) as u8,
                ((x + y) * 11 % 256) as u8,
                255,
            ]);
        }
    }
    Image::from_pixels(width, height, pixels).unwrap()
}

pub fn benchmark_grayscale(c: &mut Criterion) {
    let dims = [(320, 240), (640, 480), (960, 540), (1920, 1080)];

    let mut group = c.benchmark_group("grayscale");
    for dim in dims.iter() {
        let img = test_image(dim.0, dim.1);
        group.bench_with_input(format!("{}x{}", dim.0, dim.1), &img, |b, img| {
            b.iter(|| process::grayscale(img))
        });
    }
}

pub fn benchmark_canny(c: &mut Criterion) {
    let dims = [(320, 240), (640, 480), (960, 540), (1920, 1080)];

    let mut group = c.benchmark_group("canny");
    for dim in dims.iter() {
        let img = test_image(dim.0, dim.1);
        group.bench_with_input(format!("{}x{}", dim.0, dim.1), &img, |b, img| {
            b.iter(|| process::canny_edges(img))
        });
    }
}

criterion_group!(benches, benchmark_grayscale, benchmark_canny);
criterion_main!(benches);
