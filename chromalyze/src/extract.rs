//! Provides the implementation for palette extraction

use crate::{AnalysisConfig, Color, Error, Result};
use palette::Srgb;
use std::{cmp::Reverse, collections::HashMap, num::NonZeroU8};

/// A palette color along with how much of the image it covers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
	/// The quantized color
	pub color: Color,
	/// The number of pixels that fell into this color's bucket
	pub count: u64,
	/// The fraction of all pixels that fell into this color's bucket, in `0.0..=1.0`
	pub frequency: f64,
}

/// The colors of an image ranked by descending frequency
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
	/// Palette entries, most frequent first
	///
	/// Entries with the same count are kept in the order their colors were first seen in the pixels.
	pub entries: Vec<PaletteEntry>,
	/// The number of pixels the palette was extracted from
	pub total_pixels: u64,
	/// The number of color buckets removed by the minimum frequency or the maximum number of colors
	pub dropped: usize,
}

impl Palette {
	/// The most frequent entry.
	///
	/// This is always `Some` for a palette returned by [`extract`].
	#[must_use]
	pub fn dominant(&self) -> Option<&PaletteEntry> {
		self.entries.first()
	}

	/// The sum of all entry frequencies.
	///
	/// This is `1.0` (within floating point error) if no color buckets were dropped.
	#[must_use]
	pub fn frequency_sum(&self) -> f64 {
		self.entries.iter().map(|entry| entry.frequency).sum()
	}
}

/// Round each channel of a color to the nearest multiple of `step`, clamped to `255`.
///
/// Halfway values are rounded up, so with a step of `10` the buckets are `0, 10, ..., 250, 255`.
#[must_use]
pub fn quantize(color: Color, step: NonZeroU8) -> Color {
	let step = u16::from(step.get());
	let round = |channel: u8| {
		let bucket = (u16::from(channel) + step / 2) / step * step;
		u8::try_from(bucket).unwrap_or(u8::MAX)
	};

	Srgb::new(round(color.red), round(color.green), round(color.blue))
}

/// Quantize the given pixels and count each color bucket.
///
/// Returns the palette ranked by descending frequency,
/// without the buckets below `config.min_frequency` and truncated to `config.max_colors`.
/// The most frequent bucket is always kept.
///
/// # Errors
/// Returns [`Error::EmptyImage`] if `pixels` is empty.
pub fn extract(pixels: &[Color], config: &AnalysisConfig) -> Result<Palette> {
	if pixels.is_empty() {
		return Err(Error::EmptyImage);
	}

	let step = config.quantization_step;

	// Buckets in order of first appearance
	let mut colors = Vec::new();
	let mut counts = Vec::<u64>::new();

	// Packed quantized color -> bucket index
	let mut memo: HashMap<u32, usize> = HashMap::new();

	for &pixel in pixels {
		let color = quantize(pixel, step);
		let key = u32::from_be_bytes([0, color.red, color.green, color.blue]);
		let index = *memo.entry(key).or_insert_with(|| {
			colors.push(color);
			counts.push(0);
			colors.len() - 1
		});

		counts[index] += 1;
	}

	let total_pixels = pixels.len() as u64;

	// Only lossy for more than 2^53 pixels
	#[allow(clippy::cast_precision_loss)]
	let mut entries = colors
		.into_iter()
		.zip(counts)
		.map(|(color, count)| PaletteEntry {
			color,
			count,
			frequency: count as f64 / total_pixels as f64,
		})
		.collect::<Vec<_>>();

	// Stable, so ties stay in order of first appearance
	entries.sort_by_key(|entry| Reverse(entry.count));

	let buckets = entries.len();

	// Entries are sorted, so everything after the first entry below the threshold is also below it
	let mut keep = entries
		.iter()
		.take_while(|entry| entry.frequency >= config.min_frequency)
		.count();

	if let Some(max_colors) = config.max_colors {
		keep = keep.min(max_colors);
	}

	let keep = keep.max(1);
	entries.truncate(keep);

	log::debug!(
		"Reduced {total_pixels} pixels to {buckets} color buckets with step {step}, keeping {keep}"
	);

	Ok(Palette {
		entries,
		total_pixels,
		dropped: buckets - keep,
	})
}
