//! Conversions between RGB, hex strings, CMYK, and HSV
//!
//! The `rgb_to_*` functions take plain integer channels and validate them,
//! while the shorter named functions ([`hex`], [`cmyk`], [`hsv`]) take an already valid [`Color`].

use crate::{Color, Error, Result};
use palette::{FromColor, Hsv, Srgb};
use std::fmt;

/// The number of decimal places each [`Cmyk`] component is rounded to
///
/// Three decimals are needed for an RGB -> CMYK -> RGB round trip to stay within ±1 per channel.
pub const CMYK_DECIMALS: i32 = 3;

/// A subtractive CMYK color with each component as a fraction in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
	/// Cyan
	pub c: f64,
	/// Magenta
	pub m: f64,
	/// Yellow
	pub y: f64,
	/// Key (black)
	pub k: f64,
}

impl Cmyk {
	/// Create a new [`Cmyk`] from the given components
	#[must_use]
	pub const fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
		Self { c, m, y, k }
	}
}

impl fmt::Display for Cmyk {
	/// Formats the components as percentages, e.g. `(0.0%, 50.2%, 100.0%, 0.0%)`
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"({:.1}%, {:.1}%, {:.1}%, {:.1}%)",
			self.c * 100.0,
			self.m * 100.0,
			self.y * 100.0,
			self.k * 100.0
		)
	}
}

/// Validate that a channel value is in `0..=255`.
///
/// # Errors
/// Returns [`Error::InvalidChannelValue`] if `value` is outside of `0..=255`.
pub fn channel(value: i32) -> Result<u8> {
	u8::try_from(value).map_err(|_| Error::InvalidChannelValue { value })
}

/// Validate the given channels and combine them into a [`Color`]
fn color(r: i32, g: i32, b: i32) -> Result<Color> {
	Ok(Srgb::new(channel(r)?, channel(g)?, channel(b)?))
}

/// Format a color as an uppercase `#RRGGBB` hex string.
#[must_use]
pub fn hex(color: Color) -> String {
	format!("#{color:X}")
}

/// Format the given channels as an uppercase `#RRGGBB` hex string.
///
/// # Errors
/// Returns [`Error::InvalidChannelValue`] if any channel is outside of `0..=255`.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> Result<String> {
	color(r, g, b).map(hex)
}

/// Parse a `#RRGGBB` or `RRGGBB` hex string (case-insensitive).
///
/// # Errors
/// Returns [`Error::MalformedHexString`] if the input is not exactly 6 hex digits after an optional `#`.
pub fn hex_to_rgb(input: &str) -> Result<Color> {
	let digits = input.strip_prefix('#').unwrap_or(input);

	// from_str_radix also accepts a leading sign, so check each digit first
	if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(Error::malformed_hex(input));
	}

	let packed = u32::from_str_radix(digits, 16).map_err(|_| Error::malformed_hex(input))?;
	let [_, r, g, b] = packed.to_be_bytes();
	Ok(Srgb::new(r, g, b))
}

/// Round a CMYK component to [`CMYK_DECIMALS`] decimal places
fn round_component(x: f64) -> f64 {
	let scale = 10f64.powi(CMYK_DECIMALS);
	// adding 0.0 turns -0.0 into 0.0
	(x.clamp(0.0, 1.0) * scale).round() / scale + 0.0
}

/// Convert a color to CMYK.
///
/// Black is `(0, 0, 0, 1)`.
#[must_use]
pub fn cmyk(color: Color) -> Cmyk {
	let [r, g, b] = [color.red, color.green, color.blue].map(|c| f64::from(c) / 255.0);

	let k = 1.0 - r.max(g).max(b);
	if k >= 1.0 {
		return Cmyk::new(0.0, 0.0, 0.0, 1.0);
	}

	let white = 1.0 - k;
	Cmyk::new(
		round_component((1.0 - r - k) / white),
		round_component((1.0 - g - k) / white),
		round_component((1.0 - b - k) / white),
		round_component(k),
	)
}

/// Convert the given channels to CMYK.
///
/// # Errors
/// Returns [`Error::InvalidChannelValue`] if any channel is outside of `0..=255`.
pub fn rgb_to_cmyk(r: i32, g: i32, b: i32) -> Result<Cmyk> {
	color(r, g, b).map(cmyk)
}

/// Convert a CMYK color back to RGB, rounding and clamping each channel.
#[must_use]
pub fn cmyk_to_rgb(cmyk: Cmyk) -> Color {
	let white = 1.0 - cmyk.k;
	let channel = |x: f64| {
		let value = (255.0 * (1.0 - x) * white).round().clamp(0.0, 255.0);
		// value is in 0.0..=255.0
		#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
		{
			value as u8
		}
	};

	Srgb::new(channel(cmyk.c), channel(cmyk.m), channel(cmyk.y))
}

/// Convert a color to HSV with the hue in `0.0..360.0` degrees.
#[must_use]
pub fn hsv(color: Color) -> Hsv {
	let hsv: Hsv = Hsv::from_color(color.into_format::<f32>());
	Hsv::new(hsv.hue.into_positive_degrees(), hsv.saturation, hsv.value)
}

/// Convert the given channels to HSV with the hue in `0.0..360.0` degrees.
///
/// # Errors
/// Returns [`Error::InvalidChannelValue`] if any channel is outside of `0..=255`.
pub fn rgb_to_hsv(r: i32, g: i32, b: i32) -> Result<Hsv> {
	color(r, g, b).map(hsv)
}

/// Convert an HSV color to RGB, rounding and clamping each channel to `0..=255`.
#[must_use]
pub fn hsv_to_rgb(hsv: Hsv) -> Color {
	let rgb: Srgb = Srgb::from_color(hsv);
	rgb.into_format()
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use rand::{Rng, SeedableRng};
	use rand_xoshiro::Xoshiro256PlusPlus;

	fn random_colors(n: usize) -> Vec<Color> {
		let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
		(0..n).map(|_| Srgb::new(rng.gen(), rng.gen(), rng.gen())).collect()
	}

	#[test]
	fn channel_rejects_out_of_range_values() {
		assert_eq!(channel(0), Ok(0));
		assert_eq!(channel(255), Ok(255));
		assert_eq!(channel(-1), Err(Error::InvalidChannelValue { value: -1 }));
		assert_eq!(channel(256), Err(Error::InvalidChannelValue { value: 256 }));
		assert_eq!(rgb_to_hex(0, 300, 0), Err(Error::InvalidChannelValue { value: 300 }));
		assert!(rgb_to_cmyk(0, 0, -5).is_err());
		assert!(rgb_to_hsv(1000, 0, 0).is_err());
	}

	#[test]
	fn hex_is_uppercase_and_zero_padded() {
		assert_eq!(rgb_to_hex(255, 255, 255).as_deref(), Ok("#FFFFFF"));
		assert_eq!(rgb_to_hex(10, 11, 12).as_deref(), Ok("#0A0B0C"));
		assert_eq!(rgb_to_hex(0, 0, 0).as_deref(), Ok("#000000"));
		assert_eq!(hex(Srgb::new(171, 205, 239)), "#ABCDEF");
	}

	#[test]
	fn hex_parses_with_and_without_hash() {
		assert_eq!(hex_to_rgb("#FF8000"), Ok(Srgb::new(255, 128, 0)));
		assert_eq!(hex_to_rgb("ff8000"), Ok(Srgb::new(255, 128, 0)));
		assert_eq!(hex_to_rgb("#aBcDeF"), Ok(Srgb::new(171, 205, 239)));
	}

	#[test]
	fn hex_rejects_malformed_input() {
		for input in ["", "#", "#FFF", "FFFFF", "#FFFFFFF", "##FFFFFF", "GG0000", "+F0000", "#12 456", "ÿÿÿ"] {
			assert_eq!(hex_to_rgb(input), Err(Error::malformed_hex(input)), "{input}");
		}
	}

	#[test]
	fn hex_round_trip_is_exact() {
		for color in random_colors(10_000) {
			assert_eq!(hex_to_rgb(&hex(color)), Ok(color));
		}
	}

	#[test]
	fn cmyk_known_values() {
		assert_eq!(cmyk(Srgb::new(0, 0, 0)), Cmyk::new(0.0, 0.0, 0.0, 1.0));
		assert_eq!(cmyk(Srgb::new(255, 255, 255)), Cmyk::new(0.0, 0.0, 0.0, 0.0));
		assert_eq!(cmyk(Srgb::new(255, 0, 0)), Cmyk::new(0.0, 1.0, 1.0, 0.0));
		assert_eq!(cmyk(Srgb::new(128, 64, 32)), Cmyk::new(0.0, 0.5, 0.75, 0.498));
	}

	#[test]
	fn cmyk_components_have_fixed_precision() {
		let scale = 10f64.powi(CMYK_DECIMALS);
		for color in random_colors(1000) {
			let Cmyk { c, m, y, k } = cmyk(color);
			for x in [c, m, y, k] {
				assert!((0.0..=1.0).contains(&x));
				assert_relative_eq!(x * scale, (x * scale).round(), epsilon = 1e-6);
			}
		}
	}

	#[test]
	fn cmyk_display_uses_percentages() {
		assert_eq!(cmyk(Srgb::new(255, 0, 0)).to_string(), "(0.0%, 100.0%, 100.0%, 0.0%)");
		assert_eq!(cmyk(Srgb::new(128, 64, 32)).to_string(), "(0.0%, 50.0%, 75.0%, 49.8%)");
	}

	#[test]
	fn cmyk_round_trip_within_one() {
		for r in (0..=255).step_by(3) {
			for g in (0..=255).step_by(3) {
				for b in (0..=255).step_by(3) {
					let color = Srgb::new(r, g, b);
					let back = cmyk_to_rgb(cmyk(color));
					assert!(
						color.red.abs_diff(back.red) <= 1
							&& color.green.abs_diff(back.green) <= 1
							&& color.blue.abs_diff(back.blue) <= 1,
						"({r}, {g}, {b}) -> ({}, {}, {})",
						back.red,
						back.green,
						back.blue,
					);
				}
			}
		}
	}

	#[test]
	fn hsv_known_values() {
		let red = hsv(Srgb::new(255, 0, 0));
		assert_relative_eq!(red.hue.into_positive_degrees(), 0.0);
		assert_relative_eq!(red.saturation, 1.0);
		assert_relative_eq!(red.value, 1.0);

		let blue = hsv(Srgb::new(0, 0, 255));
		assert_relative_eq!(blue.hue.into_positive_degrees(), 240.0, epsilon = 1e-3);

		let gray = hsv(Srgb::new(128, 128, 128));
		assert_relative_eq!(gray.saturation, 0.0);
		assert_relative_eq!(gray.value, 128.0 / 255.0, epsilon = 1e-6);
	}

	#[test]
	fn hsv_hue_is_positive() {
		for color in random_colors(1000) {
			let hue = hsv(color).hue.into_raw_degrees();
			assert!((0.0..=360.0).contains(&hue), "{hue}");
		}
	}

	#[test]
	fn hsv_round_trip_is_exact() {
		for color in random_colors(1000) {
			assert_eq!(hsv_to_rgb(hsv(color)), color);
		}
	}
}
