//! Color harmonies derived by rotating the hue of a base color in HSV

use crate::{convert, Color};
use palette::{Hsv, Srgb};
use std::fmt;

/// A classical color harmony, defined by fixed hue offsets from a base color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Harmony {
	/// The opposite hue: +180°
	Complementary,
	/// The two neighboring hues: -30° and +30°
	Analogous,
	/// The two other corners of an equilateral triangle: +120° and +240°
	Triadic,
	/// The three other corners of a square: +90°, +180°, and +270°
	Tetradic,
}

impl Harmony {
	/// All harmonies in the order they are reported
	pub const ALL: [Self; 4] = [Self::Complementary, Self::Analogous, Self::Triadic, Self::Tetradic];

	/// The hue offsets in degrees of each derived color, in order
	#[must_use]
	pub const fn offsets(self) -> &'static [f32] {
		match self {
			Self::Complementary => &[180.0],
			Self::Analogous => &[-30.0, 30.0],
			Self::Triadic => &[120.0, 240.0],
			Self::Tetradic => &[90.0, 180.0, 270.0],
		}
	}
}

impl fmt::Display for Harmony {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Complementary => write!(f, "Complementary"),
			Self::Analogous => write!(f, "Analogous"),
			Self::Triadic => write!(f, "Triadic"),
			Self::Tetradic => write!(f, "Tetradic"),
		}
	}
}

/// The colors related to a base color by each [`Harmony`]
///
/// The base color itself is never included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonySet {
	/// The base rotated by +180°
	pub complementary: [Color; 1],
	/// The base rotated by -30° and +30°
	pub analogous: [Color; 2],
	/// The base rotated by +120° and +240°
	pub triadic: [Color; 2],
	/// The base rotated by +90°, +180°, and +270°
	pub tetradic: [Color; 3],
}

impl HarmonySet {
	/// The colors of the given harmony
	#[must_use]
	pub fn colors(&self, harmony: Harmony) -> &[Color] {
		match harmony {
			Harmony::Complementary => &self.complementary,
			Harmony::Analogous => &self.analogous,
			Harmony::Triadic => &self.triadic,
			Harmony::Tetradic => &self.tetradic,
		}
	}

	/// Each harmony along with its colors, in the order of [`Harmony::ALL`]
	pub fn iter(&self) -> impl Iterator<Item = (Harmony, &[Color])> + '_ {
		Harmony::ALL.into_iter().map(|harmony| (harmony, self.colors(harmony)))
	}
}

/// Rotate the hue of `hsv` by `offset` degrees, keeping its saturation and value
fn rotate(hsv: Hsv, offset: f32) -> Color {
	let hue = (hsv.hue.into_positive_degrees() + offset).rem_euclid(360.0);
	convert::hsv_to_rgb(Hsv::new(hue, hsv.saturation, hsv.value))
}

/// Rotate the hue of `hsv` by each of the `N` offsets
fn rotations<const N: usize>(hsv: Hsv, harmony: Harmony) -> [Color; N] {
	let offsets = harmony.offsets();
	debug_assert_eq!(offsets.len(), N);
	std::array::from_fn(|i| rotate(hsv, offsets[i]))
}

/// Compute every harmony of a base color.
///
/// The hue is rotated in HSV while saturation and value are kept unchanged.
///
/// An achromatic base (a gray, with a saturation of `0`) has no hue to rotate.
/// Its complementary color is its RGB inverse instead, e.g. black for white,
/// and its other harmonies are all equal to the base.
#[must_use]
pub fn harmonies(base: Color) -> HarmonySet {
	let hsv = convert::hsv(base);

	#[allow(clippy::float_cmp)] // exactly 0 for grays
	let complementary = if hsv.saturation == 0.0 {
		Srgb::new(u8::MAX - base.red, u8::MAX - base.green, u8::MAX - base.blue)
	} else {
		rotate(hsv, Harmony::Complementary.offsets()[0])
	};

	let set = HarmonySet {
		complementary: [complementary],
		analogous: rotations(hsv, Harmony::Analogous),
		triadic: rotations(hsv, Harmony::Triadic),
		tetradic: rotations(hsv, Harmony::Tetradic),
	};

	log::trace!(
		"Harmonies of {}: complementary {}",
		convert::hex(base),
		convert::hex(set.complementary[0])
	);

	set
}
