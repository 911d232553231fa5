//! Specifies the CLI and handles arg parsing

use chromalyze::{AnalysisConfig, SortKey, DEFAULT_MIN_FREQUENCY, DEFAULT_QUANTIZATION_STEP};
use clap::{Parser, ValueEnum};
use std::{
	fmt::{Debug, Display},
	num::{NonZeroU8, ParseFloatError},
	ops::RangeBounds,
	path::PathBuf,
	str::FromStr,
};

/// Sort orders for the reported colors
#[derive(Copy, Clone, ValueEnum)]
pub enum SortOutput {
	/// Descending frequency
	Frequency,
	/// Ascending HSV hue
	Hue,
	/// Ascending HSV saturation
	Saturation,
	/// Ascending HSV value
	Brightness,
}

impl From<SortOutput> for SortKey {
	fn from(sort: SortOutput) -> Self {
		match sort {
			SortOutput::Frequency => Self::Frequency,
			SortOutput::Hue => Self::Hue,
			SortOutput::Saturation => Self::Saturation,
			SortOutput::Brightness => Self::Brightness,
		}
	}
}

/// Analyze the colors of an image or a directory of images.
///
/// For each image, a text report is written with the image's most frequent colors,
/// their hex and CMYK values, and their complementary, analogous, triadic, and tetradic harmonies.
#[derive(Parser)]
#[command(version)]
pub struct Options {
	/// The path to an image, or a directory that is searched recursively for images
	pub input: PathBuf,

	/// The directory to write the reports to
	pub output: PathBuf,

	/// The order to report the colors in
	#[arg(short, long, default_value = "frequency")]
	pub sort: SortOutput,

	/// Similar colors are merged by rounding each channel to a multiple of this step
	///
	/// A step of 1 only merges identical colors.
	#[arg(long, default_value_t = DEFAULT_QUANTIZATION_STEP)]
	pub step: NonZeroU8,

	/// Colors that make up less than this fraction of the image are left out of the report
	///
	/// The most frequent color is always reported.
	/// Provided values should be in the range [0.0, 1.0].
	#[arg(short = 'f', long, default_value_t = DEFAULT_MIN_FREQUENCY, value_parser = parse_valid_frequency)]
	pub min_frequency: f64,

	/// The maximum number of colors to report for each image
	#[arg(short = 'k', long)]
	pub max_colors: Option<usize>,

	/// The maximum image size, in number of pixels, before a thumbnail is created
	///
	/// This option is intended for reducing the time needed for large images,
	/// but the interpolation may blend colors and so change the reported frequencies.
	#[arg(short = 'p', long, default_value_t = u32::MAX)]
	pub max_pixels: u32,

	/// The number of threads to analyze a directory of images with
	///
	/// A value of 0 uses one thread per CPU.
	#[cfg(feature = "threads")]
	#[arg(short, long, default_value_t = 0)]
	pub threads: u8,

	/// Also print each image's colors as true color swatches
	#[arg(long)]
	pub swatch: bool,

	/// Print additional information, such as the time taken by each step
	#[arg(short, long)]
	pub verbose: bool,
}

impl Options {
	/// The [`AnalysisConfig`] described by these options
	pub fn analysis_config(&self) -> AnalysisConfig {
		AnalysisConfig::default()
			.with_sort_by(self.sort.into())
			.with_quantization_step(self.step)
			.with_min_frequency(self.min_frequency)
			.with_max_colors(self.max_colors)
	}
}

/// Parse a float value and ensure it in the provided, valid range
fn parse_float_in_range<T>(s: &str, range: impl RangeBounds<T> + Debug) -> Result<T, String>
where
	T: FromStr<Err = ParseFloatError> + Display + PartialOrd,
{
	let value: T = s.parse().map_err(|e| format!("{e}"))?;
	if range.contains(&value) {
		Ok(value)
	} else {
		Err(format!("{value} is not in {range:?}"))
	}
}

/// Parse the minimum frequency and ensure it is in `0.0..=1.0`
fn parse_valid_frequency(s: &str) -> Result<f64, String> {
	parse_float_in_range(s, 0.0..=1.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_library_defaults() {
		let options = Options::try_parse_from(["chromalyze", "in.png", "out"]).unwrap();
		let config = options.analysis_config();
		let default = AnalysisConfig::default();

		assert_eq!(config, default);
		assert_eq!(options.max_pixels, u32::MAX);
		assert!(!options.swatch);
	}

	#[test]
	fn options_map_to_config() {
		let options = Options::try_parse_from([
			"chromalyze",
			"images",
			"reports",
			"--sort",
			"hue",
			"--step",
			"1",
			"-f",
			"0.05",
			"-k",
			"6",
		])
		.unwrap();

		let config = options.analysis_config();
		assert_eq!(config.sort_by, SortKey::Hue);
		assert_eq!(config.quantization_step.get(), 1);
		assert_eq!(config.max_colors, Some(6));
		assert!((config.min_frequency - 0.05).abs() < f64::EPSILON);
	}

	#[test]
	fn invalid_values_are_rejected() {
		assert!(Options::try_parse_from(["chromalyze", "in", "out", "--step", "0"]).is_err());
		assert!(Options::try_parse_from(["chromalyze", "in", "out", "-f", "1.5"]).is_err());
		assert!(Options::try_parse_from(["chromalyze", "in", "out", "--sort", "volume"]).is_err());
	}

	#[test]
	fn sort_output_matches_every_sort_key() {
		for (output, key) in SortOutput::value_variants().iter().zip(SortKey::ALL) {
			assert_eq!(SortKey::from(*output), key);
			assert_eq!(output.to_possible_value().unwrap().get_name(), key.name());
		}
	}
}
