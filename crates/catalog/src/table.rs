use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::entry::CatalogEntry;

/// Names every code table a snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
	BambuMaterial,
	TigerMaterial,
	TigerBrand,
	CrealityMaterial,
	CrealityVendor,
}

impl Table {
	pub const ALL: [Table; 5] = [
		Table::BambuMaterial,
		Table::TigerMaterial,
		Table::TigerBrand,
		Table::CrealityMaterial,
		Table::CrealityVendor,
	];

	pub const COUNT: usize = Self::ALL.len();

	/// Key used for this table in catalog files.
	pub const fn key(self) -> &'static str {
		match self {
			Table::BambuMaterial => "bambu_material",
			Table::TigerMaterial => "tiger_material",
			Table::TigerBrand => "tiger_brand",
			Table::CrealityMaterial => "creality_material",
			Table::CrealityVendor => "creality_vendor",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|t| t.key() == key)
	}

	pub(crate) const fn index(self) -> usize {
		self as usize
	}
}

impl fmt::Display for Table {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// Exact-match code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTable {
	table: Table,
	entries: FxHashMap<String, CatalogEntry>,
}

impl CatalogTable {
	pub fn new(table: Table) -> Self {
		Self {
			table,
			entries: FxHashMap::default(),
		}
	}

	pub fn from_entries(table: Table, entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
		let mut out = Self::new(table);
		for entry in entries {
			out.insert(entry);
		}
		out
	}

	/// Inserts `entry`, replacing any entry with the same code.
	pub(crate) fn insert(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
		self.entries.insert(entry.code.clone(), entry)
	}

	pub fn table(&self) -> Table {
		self.table
	}

	/// Looks up `code` by exact string match.
	pub fn resolve(&self, code: &str) -> Option<&CatalogEntry> {
		self.entries.get(code)
	}

	pub fn is_known(&self, code: &str) -> bool {
		self.resolve(code).is_some()
	}

	/// Resolved entry, or an "Unknown" placeholder carrying `code`.
	pub fn resolve_or_placeholder(&self, code: &str) -> Cow<'_, CatalogEntry> {
		match self.resolve(code) {
			Some(entry) => Cow::Borrowed(entry),
			None => Cow::Owned(CatalogEntry::unknown(code)),
		}
	}

	/// Every known code, sorted.
	pub fn all_codes(&self) -> BTreeSet<&str> {
		self.entries.keys().map(String::as_str).collect()
	}

	pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
		self.entries.values()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
