//! Error types shared by every analysis step

use thiserror::Error;

/// Result type alias for chromalyze operations
pub type Result<T> = std::result::Result<T, Error>;

/// Validation failures raised by the analysis steps
///
/// Errors are reported where they are detected and passed up unchanged,
/// so an [`Analyzer`](crate::Analyzer) call either fully succeeds or fails as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// A color channel was outside of `0..=255`
	#[error("Invalid channel value: {value} is not in 0..=255")]
	InvalidChannelValue {
		/// The rejected channel value
		value: i32,
	},

	/// A hex color string was not 6 hex digits with an optional leading `#`
	#[error("Malformed hex string: '{input}' (expected #RRGGBB or RRGGBB)")]
	MalformedHexString {
		/// The rejected input
		input: String,
	},

	/// There were no pixels to analyze
	#[error("Empty image: there are no pixels to analyze")]
	EmptyImage,

	/// A sort criterion was not one of frequency, hue, saturation, or brightness
	#[error("Unknown sort key: '{key}' (expected one of frequency, hue, saturation, brightness)")]
	UnknownSortKey {
		/// The rejected sort key
		key: String,
	},
}

impl Error {
	/// Create a [`Error::MalformedHexString`] for the given input
	pub(crate) fn malformed_hex(input: &str) -> Self {
		Self::MalformedHexString { input: input.to_owned() }
	}
}
