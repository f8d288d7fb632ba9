//! On-disk catalog schema.
//!
//! The file is owned by the data-repository collaborator; this module only reads it.
//! Unknown table names are skipped so older readers keep working with newer files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spool_primitives::TagFormat;

use crate::entry::CatalogEntry;
use crate::error::CatalogError;
use crate::product::{ProductEntry, ProductKey};
use crate::snapshot::CatalogSnapshot;
use crate::table::{CatalogTable, Table};

/// Top-level catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
	pub version: u32,
	#[serde(default)]
	pub last_updated: Option<String>,
	/// Table key (see [`Table::key`]) to code-to-name map.
	#[serde(default)]
	pub tables: BTreeMap<String, BTreeMap<String, MappingValue>>,
	#[serde(default)]
	pub products: Vec<ProductRecord>,
}

/// A mapping value: either a bare display name or a name with a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingValue {
	Name(String),
	Detailed {
		name: String,
		#[serde(default)]
		description: String,
	},
}

impl MappingValue {
	fn into_entry(self, code: String) -> CatalogEntry {
		match self {
			MappingValue::Name(name) => CatalogEntry::new(code, name, ""),
			MappingValue::Detailed { name, description } => CatalogEntry::new(code, name, description),
		}
	}
}

/// One product row of the catalog array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
	pub sku: String,
	pub format: TagFormat,
	pub material: String,
	pub variant: String,
	pub name: String,
	#[serde(default)]
	pub color_name: String,
}

impl From<ProductRecord> for ProductEntry {
	fn from(record: ProductRecord) -> Self {
		ProductEntry {
			sku: record.sku,
			key: ProductKey::new(record.format, record.material, record.variant),
			name: record.name,
			color_name: record.color_name,
		}
	}
}

impl CatalogFile {
	pub fn from_json(json: &str) -> Result<Self, CatalogError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Validates the document and builds an unpublished snapshot from it.
	pub fn into_snapshot(self) -> Result<CatalogSnapshot, CatalogError> {
		let mut tables = Vec::with_capacity(self.tables.len());
		for (key, rows) in self.tables {
			let Some(table) = Table::from_key(&key) else {
				tracing::warn!(table = %key, "skipping unknown catalog table");
				continue;
			};
			tables.push(CatalogTable::from_entries(
				table,
				rows.into_iter().map(|(code, value)| value.into_entry(code)),
			));
		}

		CatalogSnapshot::from_parts(
			self.version,
			self.last_updated,
			tables,
			self.products.into_iter().map(ProductEntry::from),
		)
	}
}
