//! Extract the dominant colors of an image and derive their color harmonies.
//!
//! # Examples
//!
//! ## Analyze raw, already decoded RGB pixels with the default settings.
//!
//! ```no_run
//! use chromalyze::{Analyzer, ImageMetadata};
//!
//! let raw = std::fs::read("some image.rgb").unwrap();
//! let pixels: &[palette::Srgb<u8>] = palette::cast::from_component_slice(&raw);
//! let metadata = ImageMetadata::new(640, 480, "RGB");
//!
//! let analysis = Analyzer::default().analyze(pixels, metadata).unwrap();
//! println!("dominant color: {}", chromalyze::hex(analysis.dominant.color));
//! ```
//!
//! ## Use a coarser quantization and sort the palette by hue.
//!
//! ```
//! use chromalyze::{AnalysisConfig, Analyzer, ImageMetadata, SortKey};
//! use palette::Srgb;
//! use std::num::NonZeroU8;
//!
//! let config = AnalysisConfig::default()
//! 	.with_quantization_step(NonZeroU8::new(32).unwrap())
//! 	.with_sort_by(SortKey::Hue);
//!
//! let pixels = [Srgb::new(250, 10, 10), Srgb::new(10, 10, 250), Srgb::new(10, 250, 10)];
//! let analysis = Analyzer::new(config)
//! 	.analyze(&pixels, ImageMetadata::new(3, 1, "RAW"))
//! 	.unwrap();
//!
//! assert_eq!(analysis.colors.len(), 3);
//! ```
//!
//! # Pipeline
//!
//! Each analysis runs the same steps in order:
//!
//! 1. [`extract`] quantizes every pixel into a bucket and counts the buckets,
//!    giving a [`Palette`] ranked by descending frequency.
//! 2. [`sort_palette`] reorders the palette by the requested [`SortKey`].
//! 3. [`harmonies`], [`hex`] and [`cmyk`] describe each palette color.
//!
//! [`Analyzer`] ties these steps together and is the usual entry point.
//! The individual steps are public so that callers can reuse them,
//! e.g. to sort an already extracted palette several ways.
//!
//! # Quantization
//!
//! Near-duplicate colors are merged by rounding each channel to the nearest
//! multiple of the quantization step (10 by default), clamped to 255.
//! A step of 1 counts exact colors.
//!
//! Buckets that make up less than the minimum frequency (1% by default) are dropped,
//! except that the most frequent bucket is always kept.
//!
//! # Color Representations
//!
//! - Hex strings are always `#RRGGBB` in uppercase.
//! - CMYK components are fractions in `0.0..=1.0` rounded to [`CMYK_DECIMALS`] decimal places.
//! - HSV hue is in degrees in `0.0..360.0`, saturation and value are in `0.0..=1.0`.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::cargo)]
#![warn(clippy::use_debug, clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![warn(clippy::unwrap_used, clippy::unwrap_in_result)]
#![warn(clippy::unneeded_field_pattern, clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::str_to_string, clippy::string_to_string, clippy::string_slice)]
#![warn(missing_docs, clippy::missing_docs_in_private_items, rustdoc::all)]
#![warn(clippy::float_cmp_const, clippy::lossy_float_literal)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::enum_glob_use)]
#![allow(clippy::unreadable_literal)]

mod analysis;
mod config;
mod convert;
mod error;
mod extract;
mod harmony;
mod sort;

pub use analysis::{Analyzer, ColorReport, ImageAnalysis, ImageMetadata};
pub use config::{AnalysisConfig, DEFAULT_MIN_FREQUENCY, DEFAULT_QUANTIZATION_STEP};
pub use convert::{
	channel, cmyk, cmyk_to_rgb, hex, hex_to_rgb, hsv, hsv_to_rgb, rgb_to_cmyk, rgb_to_hex, rgb_to_hsv, Cmyk,
	CMYK_DECIMALS,
};
pub use error::{Error, Result};
pub use extract::{extract, quantize, Palette, PaletteEntry};
pub use harmony::{harmonies, Harmony, HarmonySet};
pub use sort::{sort_palette, SortKey};

/// An 8-bit sRGB color, the unit every analysis step works on
pub type Color = palette::Srgb<u8>;
