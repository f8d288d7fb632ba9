use serde::{Deserialize, Serialize};

/// Display name used for codes with no catalog entry.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Display metadata for one vendor code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
	pub code: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
	/// Set only by [`CatalogEntry::unknown`]; catalog data can never produce it.
	#[serde(skip)]
	placeholder: bool,
}

impl CatalogEntry {
	pub fn new(code: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			name: name.into(),
			description: description.into(),
			placeholder: false,
		}
	}

	/// Placeholder for a code the catalog does not know.
	///
	/// Interpreters never build results from placeholders; this exists for display
	/// paths that must show something for an unresolved code.
	pub fn unknown(code: impl Into<String>) -> Self {
		Self {
			placeholder: true,
			..Self::new(code, UNKNOWN_NAME, "")
		}
	}

	pub fn is_placeholder(&self) -> bool {
		self.placeholder
	}
}
