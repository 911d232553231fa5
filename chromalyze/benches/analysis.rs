use chromalyze::{extract, AnalysisConfig, Analyzer, ImageMetadata};
use criterion::{
	black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, BenchmarkId, Criterion,
	SamplingMode,
};
use palette::Srgb;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::{num::NonZeroU8, time::Duration};

const SIZES: [(u32, u32); 3] = [(480, 270), (1920, 1080), (3840, 2160)];

/// A synthetic image of smooth gradients with some noise, so that quantization merges neighboring colors
fn synthetic_image(width: u32, height: u32) -> Vec<Srgb<u8>> {
	let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
	let mut pixels = Vec::with_capacity((width * height) as usize);

	for y in 0..height {
		for x in 0..width {
			let noise = rng.gen_range(0..8);
			pixels.push(Srgb::new(
				((x * 255 / width) as u8).saturating_add(noise),
				((y * 255 / height) as u8).saturating_add(noise),
				(((x + y) * 255 / (width + height)) as u8).saturating_add(noise),
			));
		}
	}

	pixels
}

fn create_group<'a>(c: &'a mut Criterion, name: &'a str) -> BenchmarkGroup<'a, WallTime> {
	let mut group = c.benchmark_group(name);
	group
		.sample_size(30)
		.noise_threshold(0.05)
		.sampling_mode(SamplingMode::Flat)
		.warm_up_time(Duration::from_millis(500));
	group
}

fn extraction(c: &mut Criterion) {
	let mut group = create_group(c, "extract");

	for (width, height) in SIZES {
		let pixels = synthetic_image(width, height);
		for step in [1, 10, 32] {
			let config = AnalysisConfig::default()
				.with_quantization_step(NonZeroU8::new(step).expect("non-zero step"));

			group.bench_with_input(
				BenchmarkId::new(format!("step {step}"), format!("{width}x{height}")),
				&pixels,
				|b, pixels| b.iter(|| extract(black_box(pixels), black_box(&config))),
			);
		}
	}
}

fn analysis(c: &mut Criterion) {
	let mut group = create_group(c, "analyze");
	group.measurement_time(Duration::from_secs(4));

	let analyzer = Analyzer::new(AnalysisConfig::default().with_min_frequency(0.0));

	for (width, height) in SIZES {
		let pixels = synthetic_image(width, height);
		group.bench_with_input(
			BenchmarkId::from_parameter(format!("{width}x{height}")),
			&pixels,
			|b, pixels| {
				b.iter(|| analyzer.analyze(black_box(pixels), ImageMetadata::new(width, height, "RAW")));
			},
		);
	}
}

criterion_group!(benches, extraction, analysis);
criterion_main!(benches);
