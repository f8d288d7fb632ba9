use std::fmt;

use serde::{Deserialize, Serialize};
use spool_catalog::{CatalogEntry, CatalogSnapshot, Table};
use spool_primitives::{ScanResult, TagFormat};

use crate::result::InterpretationResult;

/// Required catalog lookup that a format performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogField {
	Material,
	Brand,
	Vendor,
	Product,
}

impl CatalogField {
	pub const fn name(self) -> &'static str {
		match self {
			CatalogField::Material => "material",
			CatalogField::Brand => "brand",
			CatalogField::Vendor => "vendor",
			CatalogField::Product => "product",
		}
	}
}

impl fmt::Display for CatalogField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Where an interpretation pass ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
	/// The scan was not classified as `Success`; nothing was attempted.
	NotDecoded(ScanResult),
	/// No known signature matched. Conceptually `ParsingFailed`.
	UnrecognizedFormat,
	/// The signature matched but the layout's required blocks are missing or invalid.
	Malformed(TagFormat),
	/// The layout decoded but a required code has no exact catalog entry.
	CatalogMiss {
		format: TagFormat,
		field: CatalogField,
		code: String,
	},
	Resolved(InterpretationResult),
}

impl Interpretation {
	pub fn into_result(self) -> Option<InterpretationResult> {
		match self {
			Interpretation::Resolved(result) => Some(result),
			_ => None,
		}
	}

	pub fn as_result(&self) -> Option<&InterpretationResult> {
		match self {
			Interpretation::Resolved(result) => Some(result),
			_ => None,
		}
	}

	/// Format the pass settled on, if detection ran and matched.
	pub fn format(&self) -> Option<TagFormat> {
		match self {
			Interpretation::NotDecoded(_) | Interpretation::UnrecognizedFormat => None,
			Interpretation::Malformed(format) | Interpretation::CatalogMiss { format, .. } => Some(*format),
			Interpretation::Resolved(result) => Some(result.format),
		}
	}

	/// The scan classification this outcome corresponds to.
	///
	/// Interpretation never changes the scan it was given; this is the value a caller
	/// would report for the combined authenticate-then-interpret step. A catalog miss
	/// parsed fine and stays `Success` with no result; only data no known layout can
	/// parse is `ParsingFailed`.
	pub fn scan_result(&self) -> ScanResult {
		match self {
			Interpretation::NotDecoded(result) => *result,
			Interpretation::Resolved(_) | Interpretation::CatalogMiss { .. } => ScanResult::Success,
			Interpretation::UnrecognizedFormat | Interpretation::Malformed(_) => ScanResult::ParsingFailed,
		}
	}
}

/// Why a format's decoder refused a block map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Refusal {
	Malformed,
	Miss { field: CatalogField, code: String },
}

impl Refusal {
	pub(crate) fn miss(field: CatalogField, code: impl Into<String>) -> Self {
		Refusal::Miss {
			field,
			code: code.into(),
		}
	}
}

/// Exact lookup in `table`, or a [`Refusal::Miss`] naming `field`.
pub(crate) fn require<'a>(
	catalog: &'a CatalogSnapshot,
	table: Table,
	field: CatalogField,
	code: &str,
) -> Result<&'a CatalogEntry, Refusal> {
	catalog.resolve(table, code).ok_or_else(|| Refusal::miss(field, code))
}
