//! Renders analysis results as text reports and terminal swatches

use chromalyze::{Color, ImageAnalysis, PaletteEntry};
use colored::Colorize;
use std::{
	fs::{self, File},
	io::{self, BufWriter, Write},
	path::{Path, PathBuf},
};

/// Format a color as an `(r, g, b)` triple
fn rgb(color: Color) -> String {
	format!("({}, {}, {})", color.red, color.green, color.blue)
}

/// Format a list of colors as `[(r, g, b), ...]`
fn rgb_list(colors: &[Color]) -> String {
	let colors = colors.iter().map(|&color| rgb(color)).collect::<Vec<_>>();
	format!("[{}]", colors.join(", "))
}

/// Format a frequency as a percentage with two decimals
fn percentage(entry: &PaletteEntry) -> String {
	format!("{:.2}%", entry.frequency * 100.0)
}

/// Write the text report for an analysis
pub fn write_report(out: &mut impl Write, file_name: &str, analysis: &ImageAnalysis) -> io::Result<()> {
	let metadata = &analysis.metadata;
	let dominant = &analysis.dominant;

	writeln!(out, "Image Analysis for {file_name}")?;
	writeln!(out, "Dimensions: {}x{}", metadata.width, metadata.height)?;
	writeln!(out, "Format: {}", metadata.format)?;
	writeln!(
		out,
		"Dominant Color: RGB: {}, HEX: {}, Frequency: {}",
		rgb(dominant.color),
		chromalyze::hex(dominant.color),
		percentage(dominant)
	)?;

	writeln!(out)?;
	writeln!(out, "Colors (sorted by {}):", analysis.sorted_by)?;

	for color in &analysis.colors {
		writeln!(
			out,
			"  RGB: {}, HEX: {}, CMYK: {}, Frequency: {}",
			rgb(color.color()),
			color.hex,
			color.cmyk,
			percentage(&color.entry)
		)?;

		writeln!(out, "    Harmonies:")?;
		for (harmony, colors) in color.harmonies.iter() {
			writeln!(out, "      {harmony}: {}", rgb_list(colors))?;
		}
	}

	if analysis.dropped > 0 {
		writeln!(out)?;
		writeln!(
			out,
			"{} rarer colors are not listed (analyzed {} pixels)",
			analysis.dropped, analysis.total_pixels
		)?;
	}

	Ok(())
}

/// Write the report for an analysis to `<output_dir>/<file_name>_analysis.txt`,
/// creating `output_dir` if necessary.
///
/// Returns the path of the written report.
pub fn save_report(output_dir: &Path, file_name: &str, analysis: &ImageAnalysis) -> io::Result<PathBuf> {
	fs::create_dir_all(output_dir)?;

	let path = output_dir.join(format!("{file_name}_analysis.txt"));
	let mut out = BufWriter::new(File::create(&path)?);
	write_report(&mut out, file_name, analysis)?;
	out.flush()?;

	Ok(path)
}

/// Print a line of true color swatches for the colors of an analysis
pub fn print_swatches(file_name: &str, analysis: &ImageAnalysis) {
	let swatches = analysis
		.colors
		.iter()
		.map(|report| {
			let color = report.color();
			"   ".on_truecolor(color.red, color.green, color.blue).to_string()
		})
		.collect::<String>();

	println!("{swatches} {file_name}");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;
	use chromalyze::{AnalysisConfig, Analyzer, ImageMetadata};
	use palette::Srgb;

	fn report(analysis: &ImageAnalysis) -> String {
		let mut out = Vec::new();
		write_report(&mut out, "white.png", analysis).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn white_image_report() {
		let pixels = [Srgb::new(255, 255, 255); 4];
		let analysis = Analyzer::default()
			.analyze(&pixels, ImageMetadata::new(2, 2, "PNG"))
			.unwrap();

		let expected = "\
Image Analysis for white.png
Dimensions: 2x2
Format: PNG
Dominant Color: RGB: (255, 255, 255), HEX: #FFFFFF, Frequency: 100.00%

Colors (sorted by frequency):
  RGB: (255, 255, 255), HEX: #FFFFFF, CMYK: (0.0%, 0.0%, 0.0%, 0.0%), Frequency: 100.00%
    Harmonies:
      Complementary: [(0, 0, 0)]
      Analogous: [(255, 255, 255), (255, 255, 255)]
      Triadic: [(255, 255, 255), (255, 255, 255)]
      Tetradic: [(255, 255, 255), (255, 255, 255), (255, 255, 255)]
";

		assert_eq!(report(&analysis), expected);
	}

	#[test]
	fn dropped_colors_are_mentioned() {
		let mut pixels = vec![Srgb::new(255, 0, 0); 99];
		pixels.push(Srgb::new(0, 0, 255));

		let config = AnalysisConfig::default().with_min_frequency(0.05);
		let analysis = Analyzer::new(config)
			.analyze(&pixels, ImageMetadata::new(10, 10, "JPG"))
			.unwrap();

		let report = report(&analysis);
		assert!(report.contains("  RGB: (255, 0, 0), HEX: #FF0000, CMYK: (0.0%, 100.0%, 100.0%, 0.0%), Frequency: 99.00%\n"));
		assert!(report.contains("      Complementary: [(0, 255, 255)]\n"));
		assert!(!report.contains("#0000FF"));
		assert!(report.ends_with("1 rarer colors are not listed (analyzed 100 pixels)\n"));
	}

	#[test]
	fn saved_report_is_named_after_the_image() {
		let dir = std::env::temp_dir().join(format!("chromalyze-report-{}", std::process::id()));
		let analysis = Analyzer::default()
			.analyze(&[Srgb::new(1, 2, 3)], ImageMetadata::new(1, 1, "PNG"))
			.unwrap();

		let path = save_report(&dir.join("nested"), "tiny.png", &analysis).unwrap();
		assert_eq!(path, dir.join("nested").join("tiny.png_analysis.txt"));
		assert!(fs::read_to_string(&path).unwrap().starts_with("Image Analysis for tiny.png\n"));

		fs::remove_dir_all(dir).unwrap();
	}
}
