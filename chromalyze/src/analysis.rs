//! Ties extraction, sorting, and color descriptions together into a single analysis per image

use crate::{
	convert, extract::extract, harmony::harmonies, sort::sort_palette, AnalysisConfig, Cmyk, Color, Error,
	HarmonySet, PaletteEntry, Result, SortKey,
};

/// Information about the image the pixels came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
	/// Image width in pixels
	pub width: u32,
	/// Image height in pixels
	pub height: u32,
	/// Name of the image format, e.g. `PNG`
	pub format: String,
}

impl ImageMetadata {
	/// Create new [`ImageMetadata`]
	#[must_use]
	pub fn new(width: u32, height: u32, format: impl Into<String>) -> Self {
		Self { width, height, format: format.into() }
	}
}

/// A palette color along with its alternate representations and harmonies
#[derive(Debug, Clone, PartialEq)]
pub struct ColorReport {
	/// The color and its frequency
	pub entry: PaletteEntry,
	/// `#RRGGBB` hex string
	pub hex: String,
	/// CMYK representation
	pub cmyk: Cmyk,
	/// Colors related by hue rotation
	pub harmonies: HarmonySet,
}

impl ColorReport {
	/// Describe a palette entry
	#[must_use]
	pub fn new(entry: PaletteEntry) -> Self {
		Self {
			entry,
			hex: convert::hex(entry.color),
			cmyk: convert::cmyk(entry.color),
			harmonies: harmonies(entry.color),
		}
	}

	/// The palette color
	#[must_use]
	pub const fn color(&self) -> Color {
		self.entry.color
	}
}

/// The result of analyzing one image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAnalysis {
	/// The image the colors were extracted from
	pub metadata: ImageMetadata,
	/// The most frequent color, regardless of the order of `colors`
	pub dominant: PaletteEntry,
	/// The order of `colors`
	pub sorted_by: SortKey,
	/// The palette colors in the requested order
	pub colors: Vec<ColorReport>,
	/// The number of pixels the palette was extracted from
	pub total_pixels: u64,
	/// The number of color buckets that were too rare to be included in `colors`
	pub dropped: usize,
}

/// Runs palette extraction, sorting, and color descriptions with a fixed [`AnalysisConfig`]
///
/// An `Analyzer` holds no mutable state, so it can be shared between threads
/// to analyze multiple images in parallel.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
	/// Configuration used for every analysis
	config: AnalysisConfig,
}

impl Analyzer {
	/// Create an analyzer with the given configuration
	#[must_use]
	pub const fn new(config: AnalysisConfig) -> Self {
		Self { config }
	}

	/// The configuration used for every analysis
	#[must_use]
	pub const fn config(&self) -> &AnalysisConfig {
		&self.config
	}

	/// Analyze the given pixels, sorting the colors by the configured sort key.
	///
	/// # Errors
	/// Returns [`Error::EmptyImage`] if `pixels` is empty.
	pub fn analyze(&self, pixels: &[Color], metadata: ImageMetadata) -> Result<ImageAnalysis> {
		self.analyze_with_key(pixels, metadata, self.config.sort_by)
	}

	/// Analyze the given pixels, sorting the colors by the named sort key.
	///
	/// # Errors
	/// Returns [`Error::UnknownSortKey`] if `sort_by` is not a [`SortKey`] name
	/// or [`Error::EmptyImage`] if `pixels` is empty.
	pub fn analyze_sorted_by(&self, pixels: &[Color], metadata: ImageMetadata, sort_by: &str) -> Result<ImageAnalysis> {
		let key = sort_by.parse()?;
		self.analyze_with_key(pixels, metadata, key)
	}

	/// Analyze the given pixels, sorting the colors by the given sort key.
	///
	/// # Errors
	/// Returns [`Error::EmptyImage`] if `pixels` is empty.
	pub fn analyze_with_key(&self, pixels: &[Color], metadata: ImageMetadata, sort_by: SortKey) -> Result<ImageAnalysis> {
		let mut palette = extract(pixels, &self.config)?;

		// Taken before sorting, since the sort order may not be by frequency
		let dominant = *palette.dominant().ok_or(Error::EmptyImage)?;

		sort_palette(&mut palette.entries, sort_by);

		let colors = palette.entries.into_iter().map(ColorReport::new).collect::<Vec<_>>();

		log::debug!(
			"Analyzed {}x{} {} image: {} colors sorted by {sort_by}, dominant {}",
			metadata.width,
			metadata.height,
			metadata.format,
			colors.len(),
			convert::hex(dominant.color),
		);

		Ok(ImageAnalysis {
			metadata,
			dominant,
			sorted_by: sort_by,
			colors,
			total_pixels: palette.total_pixels,
			dropped: palette.dropped,
		})
	}
}
