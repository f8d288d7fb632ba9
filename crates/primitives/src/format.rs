use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag families the interpreters understand.
///
/// A format is never declared by the caller; it is detected from structural
/// signatures in decrypted memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagFormat {
	/// Bambu Lab proprietary layout, binary little-endian fields.
	Bambu,
	/// TigerTag open community layout, binary big-endian fields.
	#[serde(rename = "tigertag")]
	TigerTag,
	/// Creality layout, ASCII-encoded fields.
	Creality,
	Unrecognized,
}

impl TagFormat {
	/// Known formats in detection priority order.
	pub const KNOWN: [TagFormat; 3] = [TagFormat::Bambu, TagFormat::TigerTag, TagFormat::Creality];

	/// Leading sectors a layout needs before any of its fields can be read.
	pub const fn required_sectors(self) -> usize {
		match self {
			TagFormat::Bambu => 5,
			TagFormat::TigerTag => 3,
			TagFormat::Creality => 2,
			TagFormat::Unrecognized => 0,
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			TagFormat::Bambu => "bambu",
			TagFormat::TigerTag => "tigertag",
			TagFormat::Creality => "creality",
			TagFormat::Unrecognized => "unrecognized",
		}
	}
}

impl fmt::Display for TagFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Fewest authenticated sectors any known format can be read from.
pub const MIN_SECTORS_FOR_ANY_FORMAT: usize = {
	let mut min = usize::MAX;
	let mut i = 0;
	while i < TagFormat::KNOWN.len() {
		let n = TagFormat::KNOWN[i].required_sectors();
		if n < min {
			min = n;
		}
		i += 1;
	}
	min
};

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn minimum_matches_smallest_layout() {
		assert_eq!(MIN_SECTORS_FOR_ANY_FORMAT, 2);
		assert!(
			TagFormat::KNOWN
				.iter()
				.all(|f| f.required_sectors() >= MIN_SECTORS_FOR_ANY_FORMAT)
		);
	}
}
