//! Orderings for an extracted palette

use crate::{convert, Error, PaletteEntry};
use palette::Hsv;
use std::{cmp::Reverse, fmt, str::FromStr};

/// Sort orders for palette entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
	/// Descending frequency
	#[default]
	Frequency,
	/// Ascending HSV hue, from 0° to 360°
	Hue,
	/// Ascending HSV saturation
	Saturation,
	/// Ascending HSV value
	Brightness,
}

impl SortKey {
	/// All sort keys
	pub const ALL: [Self; 4] = [Self::Frequency, Self::Hue, Self::Saturation, Self::Brightness];

	/// The name used to parse and display this key
	#[must_use]
	pub const fn name(self) -> &'static str {
		match self {
			Self::Frequency => "frequency",
			Self::Hue => "hue",
			Self::Saturation => "saturation",
			Self::Brightness => "brightness",
		}
	}
}

impl fmt::Display for SortKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for SortKey {
	type Err = Error;

	/// Parse a sort key by name, ignoring ASCII case
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|key| key.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| Error::UnknownSortKey { key: s.to_owned() })
	}
}

/// Sort by a component of each entry's HSV color
fn sort_by_hsv(entries: &mut [PaletteEntry], component: impl Fn(Hsv) -> f32) {
	entries.sort_by(|x, y| {
		f32::total_cmp(&component(convert::hsv(x.color)), &component(convert::hsv(y.color)))
	});
}

/// Sort palette entries by the given key.
///
/// The sort is stable: entries with equal keys keep their relative order.
pub fn sort_palette(entries: &mut [PaletteEntry], key: SortKey) {
	match key {
		SortKey::Frequency => entries.sort_by_key(|entry| Reverse(entry.count)),
		SortKey::Hue => sort_by_hsv(entries, |hsv| hsv.hue.into_positive_degrees()),
		SortKey::Saturation => sort_by_hsv(entries, |hsv| hsv.saturation),
		SortKey::Brightness => sort_by_hsv(entries, |hsv| hsv.value),
	}
}
