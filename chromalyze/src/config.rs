//! Tunable parameters for an analysis

use crate::SortKey;
use std::num::NonZeroU8;

/// The default quantization step: each channel is rounded to the nearest multiple of 10
pub const DEFAULT_QUANTIZATION_STEP: NonZeroU8 = match NonZeroU8::new(10) {
	Some(step) => step,
	None => unreachable!(),
};

/// The default minimum frequency a color bucket needs to be kept: 1% of all pixels
pub const DEFAULT_MIN_FREQUENCY: f64 = 0.01;

/// Parameters for palette extraction and ordering, passed to [`Analyzer::new`](crate::Analyzer::new)
///
/// # Examples
///
/// ```
/// use chromalyze::{AnalysisConfig, SortKey};
///
/// let config = AnalysisConfig::default()
/// 	.with_min_frequency(0.05)
/// 	.with_max_colors(Some(8))
/// 	.with_sort_by(SortKey::Brightness);
///
/// assert_eq!(config.quantization_step.get(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
	/// The order of the colors in the final result
	pub sort_by: SortKey,
	/// Each channel is rounded to the nearest multiple of this value before counting
	///
	/// A step of 1 counts exact colors.
	pub quantization_step: NonZeroU8,
	/// Color buckets with a lower frequency than this are dropped, unless it is the most frequent bucket
	///
	/// This should be in the range `0.0..=1.0`.
	pub min_frequency: f64,
	/// The maximum number of colors to keep, or `None` to keep every color above `min_frequency`
	pub max_colors: Option<usize>,
}

impl Default for AnalysisConfig {
	fn default() -> Self {
		Self {
			sort_by: SortKey::Frequency,
			quantization_step: DEFAULT_QUANTIZATION_STEP,
			min_frequency: DEFAULT_MIN_FREQUENCY,
			max_colors: None,
		}
	}
}

impl AnalysisConfig {
	/// Change the order of the colors in the final result
	#[must_use]
	pub const fn with_sort_by(self, sort_by: SortKey) -> Self {
		Self { sort_by, ..self }
	}

	/// Change the quantization step
	#[must_use]
	pub const fn with_quantization_step(self, quantization_step: NonZeroU8) -> Self {
		Self { quantization_step, ..self }
	}

	/// Change the minimum frequency, which should be in the range `0.0..=1.0`
	#[must_use]
	pub fn with_min_frequency(self, min_frequency: f64) -> Self {
		// Values outside this range do not make sense but will technically work, so this is a debug assert
		debug_assert!((0.0..=1.0).contains(&min_frequency));
		Self { min_frequency, ..self }
	}

	/// Change the maximum number of colors to keep
	#[must_use]
	pub const fn with_max_colors(self, max_colors: Option<usize>) -> Self {
		Self { max_colors, ..self }
	}
}
